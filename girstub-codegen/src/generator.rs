//! Top-level stub generator.

use crate::config::StubConfig;
use crate::python::{CallableGenerator, ClassGenerator, EnumGenerator, docstring};
use girstub_schema::ir::{ResolvedType, StubIr};

/// Assembles a complete `.pyi` module from a [`StubIr`].
pub struct Generator<'a> {
    ir: &'a StubIr,
    config: StubConfig,
}

impl<'a> Generator<'a> {
    /// Creates a new generator with the default configuration.
    #[must_use]
    pub fn new(ir: &'a StubIr) -> Self {
        Self {
            ir,
            config: StubConfig::default(),
        }
    }

    /// Uses the given configuration.
    #[must_use]
    pub fn with_config(mut self, config: &StubConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Generates the stub module text.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.generate_header());
        output.push_str(&self.generate_constants());

        let classes = ClassGenerator::new(&self.config);
        let enums = EnumGenerator::new(&self.config);
        for resolved in self.ir.types.values() {
            match resolved {
                ResolvedType::Class(class) => output.push_str(&classes.generate(class)),
                ResolvedType::Enum(enum_def) => output.push_str(&enums.generate(enum_def)),
            }
            output.push('\n');
        }

        let callables = CallableGenerator::new(&self.config);
        for function in &self.ir.functions {
            output.push_str(&callables.generate(function, 0));
            output.push('\n');
        }

        output
    }

    /// Generates the import block.
    fn generate_header(&self) -> String {
        let imports = self.config.imports.as_ref().unwrap_or(&self.ir.imports);

        let mut output = String::new();
        output.push_str("from typing import List\n");
        output.push_str("import gi\n");
        if !imports.is_empty() {
            output.push_str(&format!(
                "from gi.repository import {}\n",
                imports.join(", ")
            ));
        }
        output.push_str("from enum import Enum, IntFlag\n");
        output.push('\n');
        output
    }

    /// Generates module-level constants.
    fn generate_constants(&self) -> String {
        let mut output = String::new();

        for constant in &self.ir.constants {
            output.push_str(&format!("{} = {}\n", constant.name, constant.value));
            if let Some(doc) = &constant.doc {
                output.push_str(&format!("{}\n", docstring(doc)));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use girstub_schema::parser::parse_repository;

    const DEMO_GIR: &str = r#"<?xml version="1.0"?>
<repository version="1.2"
            xmlns="http://www.gtk.org/introspection/core/1.0"
            xmlns:c="http://www.gtk.org/introspection/c/1.0"
            xmlns:glib="http://www.gtk.org/introspection/glib/1.0">
  <include name="GObject" version="2.0"/>
  <namespace name="Demo" version="1.0">
    <constant name="MAJOR_VERSION" value="1">
      <doc xml:space="preserve">Major version.</doc>
      <type name="gint"/>
    </constant>
    <class name="Widget" parent="GObject.InitiallyUnowned">
      <method name="show">
        <return-value><type name="none"/></return-value>
        <parameters><instance-parameter name="widget"><type name="Widget"/></instance-parameter></parameters>
      </method>
    </class>
    <enumeration name="Align">
      <member name="fill" value="0"/>
    </enumeration>
    <function name="init">
      <doc xml:space="preserve">Initialize.</doc>
      <return-value><type name="gboolean"/></return-value>
      <parameters>
        <parameter name="argc"><type name="gint"/></parameter>
      </parameters>
    </function>
  </namespace>
</repository>"#;

    fn demo_ir() -> StubIr {
        let repo = parse_repository(DEMO_GIR).expect("Failed to parse");
        StubIr::from_repository(&repo)
    }

    #[test]
    fn test_generate_golden() {
        let ir = demo_ir();
        let output = Generator::new(&ir).generate();

        let expected = concat!(
            "from typing import List\n",
            "import gi\n",
            "from gi.repository import GObject\n",
            "from enum import Enum, IntFlag\n",
            "\n",
            "MAJOR_VERSION = 1\n",
            "\"\"\"Major version.\"\"\"\n",
            "class Align(Enum):\n",
            "    FILL = 0\n",
            "\n",
            "\n",
            "class Widget(GObject.InitiallyUnowned):\n",
            "    def show(self) -> None:\n",
            "        ...\n",
            "\n",
            "\n",
            "def init(argc: int) -> bool:\n",
            "    \"\"\"Initialize.\"\"\"\n",
            "    ...\n",
            "\n",
            "\n",
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_import_override() {
        let ir = demo_ir();
        let config = StubConfig::default().with_imports(vec![
            "Gtk".to_string(),
            "GObject".to_string(),
        ]);
        let output = Generator::new(&ir).with_config(&config).generate();

        assert!(output.contains("from gi.repository import Gtk, GObject\n"));
    }

    #[test]
    fn test_no_imports_omits_repository_line() {
        let repo = parse_repository(
            r#"<repository><namespace name="GLib" version="2.0"/></repository>"#,
        )
        .expect("Failed to parse");
        let ir = StubIr::from_repository(&repo);
        let output = Generator::new(&ir).generate();

        assert_eq!(
            output,
            "from typing import List\nimport gi\nfrom enum import Enum, IntFlag\n\n"
        );
    }
}
