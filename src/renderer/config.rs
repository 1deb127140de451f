//! Configuration for HTML output

/// Configuration options for HTML output
#[derive(Debug, Clone)]
pub struct HtmlConfig {
    /// Put each element on its own indented line, dropping blank text
    pub pretty_print: bool,

    /// Spaces per nesting level when pretty-printing
    pub indent_width: usize,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            pretty_print: false,
            indent_width: 2,
        }
    }
}

impl HtmlConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Output exactly as composed, no added whitespace
    pub fn compact() -> Self {
        Self::default()
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}
