//! HCL formatting utilities for Terraform emission.
//!
//! Provides string escaping and block/indentation management.

/// Escape a string for use in an HCL quoted string literal.
///
/// Handles backslashes, quotes, control characters, and the `${` / `%{`
/// template introducers.
#[must_use]
pub fn escape_hcl_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                result.push(c);
                result.push(c);
            }
            c => result.push(c),
        }
    }
    result
}

/// Quote a string literal with double quotes.
#[must_use]
pub fn quote_string(s: &str) -> String {
    format!("\"{}\"", escape_hcl_string(s))
}

/// A writer that manages indentation and block nesting for HCL output.
///
/// Indentation is two spaces per level, the `terraform fmt` convention.
pub struct HclWriter {
    buffer: String,
    current_indent: usize,
}

impl HclWriter {
    const INDENT: &'static str = "  ";

    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            current_indent: 0,
        }
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.current_indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        self.current_indent = self.current_indent.saturating_sub(1);
    }

    /// Write a complete line at the current indentation.
    pub fn write_line(&mut self, s: &str) {
        for _ in 0..self.current_indent {
            self.buffer.push_str(Self::INDENT);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }

    /// Write a blank line.
    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    /// Open a block (`header {`) and indent.
    pub fn open_block(&mut self, header: &str) {
        self.write_line(&format!("{header} {{"));
        self.indent();
    }

    /// Dedent and close the innermost block.
    pub fn close_block(&mut self) {
        self.dedent();
        self.write_line("}");
    }

    /// Write `key = value` with the key padded to `width` columns.
    ///
    /// `value` is written as-is; quote it with [`quote_string`] if it is a
    /// literal rather than a reference or expression.
    pub fn write_attribute(&mut self, key: &str, width: usize, value: &str) {
        self.write_line(&format!("{key:<width$} = {value}"));
    }

    /// Write a comment line.
    pub fn write_comment(&mut self, comment: &str) {
        self.write_line(&format!("# {comment}"));
    }

    /// Write a banner comment followed by a blank line.
    pub fn write_section_header(&mut self, title: &str) {
        self.write_line("#");
        self.write_comment(title);
        self.write_line("#");
        self.blank_line();
    }

    /// Consume the writer and return the final string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buffer
    }

    /// Get a reference to the current buffer.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl Default for HclWriter {
    fn default() -> Self {
        Self::new()
    }
}
