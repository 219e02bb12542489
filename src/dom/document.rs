//! Arena-backed document tree

use std::fmt;

use thiserror::Error;

use crate::markup::{ElementDecl, Markup, MarkupNode, Spanned};

/// Handle to a node in a [`Document`]
///
/// Handles stay valid after the node is detached; slots are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Errors raised by structural document mutations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("{0} does not exist in this document")]
    InvalidNode(NodeId),

    #[error("cannot insert {child} into {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("{child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
}

/// Element payload
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An in-memory document rooted at a `body` element
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only its body
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            body: NodeId(0),
        };
        doc.body = doc.alloc(NodeKind::Element(Element::new("body")));
        doc
    }

    /// Build a document whose body contains the given markup in source order
    pub fn from_markup(markup: &Markup) -> Self {
        let mut doc = Self::new();
        let body = doc.body;
        doc.build_children(body, &markup.nodes);
        doc
    }

    fn build_children(&mut self, parent: NodeId, nodes: &[Spanned<MarkupNode>]) {
        for node in nodes {
            let id = match &node.node {
                MarkupNode::Text(text) => self.create_text_node(text.as_str()),
                MarkupNode::Element(decl) => {
                    let id = self.alloc(NodeKind::Element(element_from_decl(decl)));
                    self.build_children(id, &decl.children);
                    id
                }
            };
            self.link(parent, id);
        }
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0)
    }

    fn data_mut(&mut self, node: NodeId) -> Result<&mut NodeData, DomError> {
        self.nodes.get_mut(node.0).ok_or(DomError::InvalidNode(node))
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.0 < self.nodes.len()
    }

    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Element(Element::new(tag)))
    }

    pub fn create_text_node(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Text(text.into()))
    }

    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.data(node).map(|d| &d.kind)
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match self.kind(node) {
            Some(NodeKind::Element(el)) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(node.0).map(|d| &mut d.kind) {
            Some(NodeKind::Element(el)) => Some(el),
            _ => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.data(node).and_then(|d| d.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.data(node).map(|d| d.children.as_slice()).unwrap_or(&[])
    }

    /// Whether the node is reachable from the body
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == self.body {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Find a connected element by its id, in document order
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|&n| self.element(n).and_then(|el| el.id.as_deref()) == Some(id))
    }

    /// All descendants of `node` in pre-order, excluding `node` itself
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// Whether `parent` can hold children at all
    pub(crate) fn check_container(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        match self.kind(parent) {
            None => Err(DomError::InvalidNode(parent)),
            Some(NodeKind::Text(_)) => Err(DomError::HierarchyRequest { parent, child }),
            Some(NodeKind::Element(_)) => Ok(()),
        }
    }

    /// Whether `child` may be inserted into `parent` without breaking the tree
    pub(crate) fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if !self.contains(child) {
            return Err(DomError::InvalidNode(child));
        }
        self.check_container(parent, child)?;
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Append `child` as the last child of `parent`, moving it if already attached
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, DomError> {
        self.check_insert(parent, child)?;
        self.detach(child);
        self.link(parent, child);
        Ok(child)
    }

    /// Insert `child` into `parent` immediately before `reference`
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<NodeId, DomError> {
        self.check_insert(parent, child)?;
        if self.parent(reference) != Some(parent) {
            return Err(DomError::NotAChild {
                parent,
                child: reference,
            });
        }
        if child == reference {
            return Ok(child);
        }
        self.detach(child);
        let data = self.data_mut(parent)?;
        let index = data
            .children
            .iter()
            .position(|&c| c == reference)
            .unwrap_or(data.children.len());
        data.children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
        Ok(child)
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, DomError> {
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(child)
    }

    /// Remove `node` from its parent; returns the former parent
    pub fn detach(&mut self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        self.nodes[parent.0].children.retain(|&c| c != node);
        self.nodes[node.0].parent = None;
        Some(parent)
    }

    /// Copy a node (and its subtree when `deep`) into a new detached node
    pub fn clone_node(&mut self, node: NodeId, deep: bool) -> Result<NodeId, DomError> {
        let kind = self
            .kind(node)
            .cloned()
            .ok_or(DomError::InvalidNode(node))?;
        let copy = self.alloc(kind);
        if deep {
            let children = self.children(node).to_vec();
            for child in children {
                let child_copy = self.clone_node(child, true)?;
                self.link(copy, child_copy);
            }
        }
        Ok(copy)
    }

    /// Same kind, payload and children, compared recursively
    pub fn structurally_equal(&self, a: NodeId, b: NodeId) -> bool {
        match (self.kind(a), self.kind(b)) {
            (Some(ka), Some(kb)) if ka == kb => {
                let (ca, cb) = (self.children(a), self.children(b));
                ca.len() == cb.len()
                    && ca
                        .iter()
                        .zip(cb)
                        .all(|(&x, &y)| self.structurally_equal(x, y))
            }
            _ => false,
        }
    }

    pub fn text_content(&self, node: NodeId) -> String {
        match self.kind(node) {
            Some(NodeKind::Text(text)) => text.clone(),
            Some(NodeKind::Element(_)) => self
                .children(node)
                .iter()
                .map(|&c| self.text_content(c))
                .collect(),
            None => String::new(),
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            el.classes.retain(|c| c != class);
        }
    }

    pub fn attribute(&self, node: NodeId, key: &str) -> Option<&str> {
        self.element(node).and_then(|el| el.attribute(key))
    }
}

fn element_from_decl(decl: &ElementDecl) -> Element {
    Element {
        tag: decl.tag.node.clone(),
        id: decl.id.as_ref().map(|id| id.node.clone()),
        classes: decl.classes.iter().map(|c| c.node.clone()).collect(),
        attributes: decl
            .attributes
            .iter()
            .map(|a| (a.node.key.clone(), a.node.value.clone()))
            .collect(),
    }
}
