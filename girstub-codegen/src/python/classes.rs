//! Class and interface stub generation.

use crate::config::StubConfig;
use crate::python::callables::CallableGenerator;
use crate::python::docstring::docstring;
use girstub_schema::ir::ResolvedClass;

/// Generator for class definitions.
pub struct ClassGenerator<'a> {
    config: &'a StubConfig,
}

impl<'a> ClassGenerator<'a> {
    /// Creates a new class generator.
    #[must_use]
    pub fn new(config: &'a StubConfig) -> Self {
        Self { config }
    }

    /// Generates a class definition with all of its callables.
    #[must_use]
    pub fn generate(&self, class: &ResolvedClass) -> String {
        let mut output = String::new();
        let indent = self.config.indent_for(1);

        if class.bases.is_empty() {
            output.push_str(&format!("class {}:\n", class.name));
        } else {
            output.push_str(&format!(
                "class {}({}):\n",
                class.name,
                class.bases.join(", ")
            ));
        }

        if let Some(doc) = &class.doc {
            output.push_str(&format!("{indent}{}\n", docstring(doc)));
        }

        if class.methods.is_empty() {
            output.push_str(&format!("{indent}pass\n"));
        } else {
            let callables = CallableGenerator::new(self.config);
            for method in &class.methods {
                output.push_str(&callables.generate(method, 1));
            }
        }

        output
    }
}
