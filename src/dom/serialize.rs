//! HTML serialization of document subtrees

use super::{Document, NodeId, NodeKind};

/// Elements rendered without a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Render `node` and its subtree as compact HTML
pub fn to_html(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, node, &mut out);
    out
}

fn write_node(doc: &Document, node: NodeId, out: &mut String) {
    match doc.kind(node) {
        None => {}
        Some(NodeKind::Text(text)) => out.push_str(&escape_text(text)),
        Some(NodeKind::Element(el)) => {
            out.push('<');
            out.push_str(&el.tag);
            if let Some(id) = &el.id {
                out.push_str(&format!(" id=\"{}\"", escape_attr(id)));
            }
            if !el.classes.is_empty() {
                out.push_str(&format!(" class=\"{}\"", escape_attr(&el.classes.join(" "))));
            }
            for (key, value) in &el.attributes {
                out.push_str(&format!(" {}=\"{}\"", key, escape_attr(value)));
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                return;
            }
            for &child in doc.children(node) {
                write_node(doc, child, out);
            }
            out.push_str(&format!("</{}>", el.tag));
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
