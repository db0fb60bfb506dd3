//! Stub generation configuration.

use girstub_schema::ParseOptions;

/// Default number of spaces per indentation level.
pub const DEFAULT_INDENT: usize = 4;

/// Options controlling stub generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubConfig {
    /// Spaces per indentation level.
    pub indent: usize,
    /// Modules imported from `gi.repository`; `None` uses the repository's
    /// `<include>` elements.
    pub imports: Option<Vec<String>>,
    /// Strict parsing and validation.
    pub strict: bool,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            imports: None,
            strict: false,
        }
    }
}

impl StubConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per indentation level.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Overrides the `gi.repository` import list.
    #[must_use]
    pub fn with_imports(mut self, imports: Vec<String>) -> Self {
        self.imports = Some(imports);
        self
    }

    /// Enables or disables strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns the parser options implied by this configuration.
    #[must_use]
    pub fn parse_options(&self) -> ParseOptions {
        if self.strict {
            ParseOptions::strict()
        } else {
            ParseOptions::lenient()
        }
    }

    /// Returns the indentation for the given nesting level.
    #[must_use]
    pub fn indent_for(&self, level: usize) -> String {
        " ".repeat(self.indent * level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StubConfig::default();
        assert_eq!(config.indent, 4);
        assert!(config.imports.is_none());
        assert!(!config.strict);
        assert_eq!(config.parse_options(), ParseOptions::lenient());
    }

    #[test]
    fn test_builder() {
        let config = StubConfig::new()
            .with_indent(2)
            .with_imports(vec!["Gio".to_string()])
            .with_strict(true);

        assert_eq!(config.indent_for(0), "");
        assert_eq!(config.indent_for(2), "    ");
        assert_eq!(config.imports.as_deref(), Some(&["Gio".to_string()][..]));
        assert!(config.parse_options().strict);
    }
}
