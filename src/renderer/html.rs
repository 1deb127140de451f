//! HTML serialization of composed nodes

use crate::parser::ast::{is_void_element, Attribute, Element, Node};

use super::HtmlConfig;

/// Build HTML output incrementally
pub struct HtmlBuilder {
    config: HtmlConfig,
    out: String,
    indent: usize,
}

impl HtmlBuilder {
    /// Create a new HTML builder
    pub fn new(config: HtmlConfig) -> Self {
        Self {
            config,
            out: String::new(),
            indent: 0,
        }
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            " ".repeat(self.indent * self.config.indent_width)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Append a sequence of nodes
    pub fn add_nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.add_node(node);
        }
    }

    fn add_node(&mut self, node: &Node) {
        match node {
            Node::Element(el) => self.add_element(el),
            Node::Text(text) if self.config.pretty_print => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    let line = format!("{}{}{}", self.indent_str(), trimmed, self.newline());
                    self.out.push_str(&line);
                }
            }
            Node::Text(text) => self.out.push_str(text),
            // Composed output carries no interpolations; print the marker as-is
            Node::Interpolation(path) => self.out.push_str(&format!("{{{{ {} }}}}", path)),
        }
    }

    fn add_element(&mut self, el: &Element) {
        let open = format!("<{}{}>", el.tag, format_attrs(&el.attrs));
        let indent = self.indent_str();

        if is_void_element(&el.tag) {
            let line = format!("{}{}{}", indent, open, self.newline());
            self.out.push_str(&line);
            return;
        }

        let close = format!("</{}>", el.tag);
        if !self.config.pretty_print || is_inline_only(el) {
            let mut inner = HtmlBuilder::new(self.config.clone().with_pretty_print(false));
            inner.add_nodes(&el.children);
            let body = if self.config.pretty_print {
                inner.out.trim().to_string()
            } else {
                inner.out
            };
            let line = format!("{}{}{}{}{}", indent, open, body, close, self.newline());
            self.out.push_str(&line);
            return;
        }

        let line = format!("{}{}{}", indent, open, self.newline());
        self.out.push_str(&line);
        self.indent += 1;
        self.add_nodes(&el.children);
        self.indent -= 1;
        let line = format!("{}{}{}", indent, close, self.newline());
        self.out.push_str(&line);
    }

    /// Finish and return the HTML string
    pub fn build(self) -> String {
        if self.config.pretty_print {
            self.out.trim_end().to_string()
        } else {
            self.out
        }
    }
}

/// Elements whose children are all text stay on one line when pretty-printing
fn is_inline_only(el: &Element) -> bool {
    el.children.iter().all(|c| matches!(c, Node::Text(_)))
}

fn format_attrs(attrs: &[Attribute]) -> String {
    let mut s = String::new();
    for attr in attrs {
        s.push(' ');
        s.push_str(&attr.name);
        if let Some(value) = &attr.value {
            s.push_str(&format!("=\"{}\"", escape_attr(value)));
        }
    }
    s
}

/// Escape text content
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// Serialize composed nodes to HTML
pub fn to_html(nodes: &[Node], config: &HtmlConfig) -> String {
    let mut builder = HtmlBuilder::new(config.clone());
    builder.add_nodes(nodes);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn roundtrip(source: &str, config: &HtmlConfig) -> String {
        let template = parse(source).expect("Should parse");
        to_html(&template.nodes, config)
    }

    #[test]
    fn test_compact_preserves_source_shape() {
        let source = r#"<div id="app"><p>{{ message }}</p><input v-model="newTodo"><br></div>"#;
        assert_eq!(
            roundtrip(source, &HtmlConfig::compact()),
            r#"<div id="app"><p>{{ message }}</p><input v-model="newTodo"><br></div>"#
        );
    }

    #[test]
    fn test_pretty_print() {
        let source = "<div>\n   <h1>Title</h1>\n   <ul><li>a</li><li>b</li></ul>\n</div>";
        let html = roundtrip(source, &HtmlConfig::new().with_pretty_print(true));
        assert_eq!(
            html,
            "<div>\n  <h1>Title</h1>\n  <ul>\n    <li>a</li>\n    <li>b</li>\n  </ul>\n</div>"
        );
    }

    #[test]
    fn test_attribute_escaping() {
        let el = Element::new("a").with_attr("title", "say \"hi\" & bye");
        let html = to_html(&[Node::Element(el)], &HtmlConfig::compact());
        assert_eq!(html, r#"<a title="say &quot;hi&quot; &amp; bye"></a>"#);
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }
}
