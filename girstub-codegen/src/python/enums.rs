//! Enumeration and bitfield stub generation.

use crate::config::StubConfig;
use crate::python::docstring::docstring;
use girstub_schema::ir::ResolvedEnum;

/// Generator for enum and flag definitions.
pub struct EnumGenerator<'a> {
    config: &'a StubConfig,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(config: &'a StubConfig) -> Self {
        Self { config }
    }

    /// Generates an `Enum` or `IntFlag` class.
    #[must_use]
    pub fn generate(&self, enum_def: &ResolvedEnum) -> String {
        let mut output = String::new();
        let indent = self.config.indent_for(1);

        output.push_str(&format!(
            "class {}({}):\n",
            enum_def.name,
            enum_def.base.as_str()
        ));

        if let Some(doc) = &enum_def.doc {
            output.push_str(&format!("{indent}{}\n", docstring(doc)));
        }

        for member in &enum_def.members {
            output.push_str(&format!("{indent}{} = {}\n", member.name, member.value));
            if let Some(doc) = &member.doc {
                output.push_str(&format!("{indent}{}\n", docstring(doc)));
            }
        }

        if enum_def.doc.is_none() && enum_def.members.is_empty() {
            output.push_str(&format!("{indent}pass\n"));
        }

        output.push('\n');
        output
    }
}
