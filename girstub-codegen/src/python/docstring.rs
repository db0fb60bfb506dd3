//! Docstring rendering.

/// Renders `text` as a triple-quoted Python docstring.
///
/// Backslashes and embedded triple quotes are escaped, as is a trailing
/// quote that would otherwise merge with the closing delimiter.
#[must_use]
pub fn docstring(text: &str) -> String {
    let mut escaped = text.replace('\\', "\\\\").replace("\"\"\"", "\\\"\\\"\\\"");

    if escaped.ends_with('"') {
        let before = &escaped[..escaped.len() - 1];
        let slashes = before.chars().rev().take_while(|&c| c == '\\').count();
        if slashes % 2 == 0 {
            escaped.insert(escaped.len() - 1, '\\');
        }
    }

    format!("\"\"\"{escaped}\"\"\"")
}
