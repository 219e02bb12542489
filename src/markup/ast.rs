//! Syntax tree for view markup

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A parsed markup source: the top-level nodes in source order
#[derive(Debug, Clone, PartialEq)]
pub struct Markup {
    pub nodes: Vec<Spanned<MarkupNode>>,
}

/// A node in the markup tree
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    Element(ElementDecl),
    Text(String),
}

/// `tag #id .class [key: value] { children }`
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDecl {
    pub tag: Spanned<String>,
    pub id: Option<Spanned<String>>,
    pub classes: Vec<Spanned<String>>,
    pub attributes: Vec<Spanned<Attribute>>,
    pub children: Vec<Spanned<MarkupNode>>,
}

impl ElementDecl {
    /// Look up an attribute value by key
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.node.key == key)
            .map(|a| a.node.value.as_str())
    }
}

/// A single `key: value` attribute; all values are kept as text
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}
