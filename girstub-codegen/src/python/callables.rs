//! Function and method stub generation.

use crate::config::StubConfig;
use crate::python::docstring::docstring;
use girstub_schema::ir::ResolvedCallable;

/// Generator for `def` stubs.
pub struct CallableGenerator<'a> {
    config: &'a StubConfig,
}

impl<'a> CallableGenerator<'a> {
    /// Creates a new callable generator.
    #[must_use]
    pub fn new(config: &'a StubConfig) -> Self {
        Self { config }
    }

    /// Generates one callable at the given nesting level.
    ///
    /// Level 0 is a module function, level 1 a class member.
    #[must_use]
    pub fn generate(&self, callable: &ResolvedCallable, level: usize) -> String {
        let mut output = String::new();
        let indent = self.config.indent_for(level);
        let body = self.config.indent_for(level + 1);

        if callable.is_static {
            output.push_str(&format!("{indent}@staticmethod\n"));
        }

        output.push_str(&format!(
            "{indent}def {}({}) -> {}:\n",
            callable.name,
            callable.parameters.join(", "),
            callable.return_type
        ));

        if let Some(doc) = &callable.doc {
            output.push_str(&format!("{body}{}\n", docstring(doc)));
        }

        output.push_str(&format!("{body}...\n\n"));
        output
    }
}
