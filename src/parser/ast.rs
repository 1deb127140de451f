//! Syntax tree for template markup

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// HTML elements that never take a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Check if a tag is a void element
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

/// A parsed template
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Template {
    pub nodes: Vec<Node>,
}

impl Template {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Slot markers in document order
    pub fn slots(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_slots(&self.nodes, &mut out);
        out
    }

    /// Names of every element tag used in the template, in document order
    pub fn tag_names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_tags(&self.nodes, &mut out);
        out
    }
}

fn collect_slots<'a>(nodes: &'a [Node], out: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(el) = node {
            if el.is_slot() {
                out.push(el);
            } else {
                collect_slots(&el.children, out);
            }
        }
    }
}

fn collect_tags<'a>(nodes: &'a [Node], out: &mut Vec<&'a str>) {
    for node in nodes {
        if let Node::Element(el) = node {
            out.push(el.tag.as_str());
            collect_tags(&el.children, out);
        }
    }
}

/// Template node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Literal text, kept verbatim
    Text(String),
    /// `{{ path }}` with the path trimmed
    Interpolation(String),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    /// True for text nodes that hold only whitespace
    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Text(s) if s.trim().is_empty())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

/// Element with attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(Attribute {
            name: name.into(),
            value: Some(value.into()),
        });
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Value of an attribute; `Some("")` for a bare attribute
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    pub fn is_slot(&self) -> bool {
        self.tag == "slot"
    }

    /// Name of a `<slot>` marker; None for the default slot
    pub fn slot_name(&self) -> Option<&str> {
        self.attr("name").filter(|n| !n.is_empty())
    }

    /// Target slot of supplied content (`slot="x"`)
    pub fn slot_target(&self) -> Option<&str> {
        self.attr("slot").filter(|n| !n.is_empty())
    }
}

/// Attribute, possibly valueless (`<input disabled>`)
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}
