//! A managed markup fragment with a materialization policy and load lifecycle

use tracing::debug;

use crate::dom::{Document, DomError, NodeId};

use super::hooks::{LifecycleEvent, LifecycleHooks};
use super::mode::{LoadState, TemplateMode};
use super::TemplateError;

/// Class marking a node as an unmaterialized template in static markup
pub const TEMPLATE_MARKER: &str = "template";

/// What a template is constructed from
#[derive(Debug, Clone, Copy)]
pub enum TemplateSource<'a> {
    /// Share another template's node and mode
    Template(&'a Template),
    /// Resolve a connected element by id
    Id(&'a str),
    /// Wrap a node directly
    Node(NodeId),
}

impl<'a> From<&'a Template> for TemplateSource<'a> {
    fn from(template: &'a Template) -> Self {
        TemplateSource::Template(template)
    }
}

impl<'a> From<&'a str> for TemplateSource<'a> {
    fn from(id: &'a str) -> Self {
        TemplateSource::Id(id)
    }
}

impl From<NodeId> for TemplateSource<'_> {
    fn from(node: NodeId) -> Self {
        TemplateSource::Node(node)
    }
}

/// Wraps a markup fragment and controls how it is inserted into a document
///
/// A template whose source could not be resolved wraps no node at all; every
/// operation on it is then a no-op returning `None`.
#[derive(Debug)]
pub struct Template {
    root: Option<NodeId>,
    mode: TemplateMode,
    /// Container of `root` at construction time; lookup only
    parent: Option<NodeId>,
    state: LoadState,
    hooks: LifecycleHooks,
    marker: String,
}

impl Template {
    /// Create a template from any supported source
    ///
    /// When the source is another template its mode wins over `mode`.
    pub fn new<'a>(
        doc: &Document,
        source: impl Into<TemplateSource<'a>>,
        mode: TemplateMode,
    ) -> Self {
        let (root, mode, marker) = match source.into() {
            TemplateSource::Template(other) => (other.root, other.mode, other.marker.clone()),
            TemplateSource::Id(id) => {
                let root = doc.get_element_by_id(id);
                if root.is_none() {
                    debug!(id, "template source id did not resolve");
                }
                (root, mode, TEMPLATE_MARKER.to_string())
            }
            TemplateSource::Node(node) => (
                doc.contains(node).then_some(node),
                mode,
                TEMPLATE_MARKER.to_string(),
            ),
        };

        Self {
            root,
            mode,
            parent: root.and_then(|r| doc.parent(r)),
            state: LoadState::NotLoaded,
            hooks: LifecycleHooks::default(),
            marker,
        }
    }

    /// Wrap the connected element with the given id
    pub fn from_id(doc: &Document, id: &str, mode: TemplateMode) -> Self {
        Self::new(doc, TemplateSource::Id(id), mode)
    }

    pub fn from_node(doc: &Document, node: NodeId, mode: TemplateMode) -> Self {
        Self::new(doc, TemplateSource::Node(node), mode)
    }

    /// Share the node and mode of `other`; hooks and load state start fresh
    pub fn from_template(doc: &Document, other: &Template) -> Self {
        Self::new(doc, TemplateSource::Template(other), other.mode)
    }

    /// Build a detached `<div>` holding a single text node
    pub fn from_text(doc: &mut Document, text: &str, mode: TemplateMode) -> Self {
        let div = doc.create_element("div");
        let text = doc.create_text_node(text);
        // a fresh element always accepts a fresh text node
        let _ = doc.append_child(div, text);
        Self::from_node(doc, div, mode)
    }

    pub fn with_hooks(mut self, hooks: LifecycleHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Use a different marker class than `template`
    pub fn with_marker_class(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// The wrapped node
    pub fn underlying_node(&self) -> Option<NodeId> {
        self.root
    }

    pub fn mode(&self) -> TemplateMode {
        self.mode
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn has_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// Produce the node to insert according to the template's mode
    pub fn materialize(&mut self, doc: &mut Document) -> Result<Option<NodeId>, TemplateError> {
        let Some(root) = self.root else {
            return Ok(None);
        };

        match self.mode {
            TemplateMode::Move => {
                doc.detach(root);
                doc.remove_class(root, &self.marker);
                self.mode = TemplateMode::Reuse;
                debug!(%root, "template moved out of its original location");
                Ok(Some(root))
            }
            TemplateMode::Clone => Ok(Some(doc.clone_node(root, true)?)),
            TemplateMode::Reuse => Ok(Some(root)),
        }
    }

    /// Fail before materializing if the node could not be placed under `parent`
    ///
    /// A clone is a fresh node, so only the container itself matters.
    fn check_target(
        &self,
        doc: &Document,
        parent: NodeId,
        root: NodeId,
    ) -> Result<(), TemplateError> {
        match self.mode {
            TemplateMode::Clone => doc.check_container(parent, root)?,
            TemplateMode::Move | TemplateMode::Reuse => doc.check_insert(parent, root)?,
        }
        Ok(())
    }

    /// Original container of the node, or `fallback` when it had none
    pub fn get_parent(&self, fallback: Option<NodeId>) -> Option<NodeId> {
        self.parent.or(fallback)
    }

    fn will_load(&mut self, doc: &mut Document, node: NodeId) {
        self.state = LoadState::Loaded;
        self.hooks.fire(LifecycleEvent::WillLoad, doc, node);
    }

    fn did_load(&mut self, doc: &mut Document, node: NodeId) {
        self.hooks.fire(LifecycleEvent::DidLoad, doc, node);
    }

    /// Notify the template that `node` is about to be removed
    ///
    /// Removal is owned by the caller; the template never fires this itself.
    pub fn will_unload(&mut self, doc: &mut Document, node: NodeId) {
        self.hooks.fire(LifecycleEvent::WillUnload, doc, node);
    }

    /// Notify the template that `node` has been removed
    pub fn did_unload(&mut self, doc: &mut Document, node: NodeId) {
        self.hooks.fire(LifecycleEvent::DidUnload, doc, node);
    }

    /// Materialize and append to `parent`, firing the load hooks around the insertion
    ///
    /// Returns `Ok(None)` without side effects when duplicates are disallowed
    /// and the template has already loaded.
    pub fn load_into(
        &mut self,
        doc: &mut Document,
        parent: NodeId,
        allow_duplicate: bool,
    ) -> Result<Option<NodeId>, TemplateError> {
        if !allow_duplicate && self.has_loaded() {
            debug!(%parent, "template already loaded, skipping");
            return Ok(None);
        }

        let Some(root) = self.root else {
            return Ok(None);
        };
        self.check_target(doc, parent, root)?;

        let Some(node) = self.materialize(doc)? else {
            return Ok(None);
        };
        self.will_load(doc, node);
        doc.append_child(parent, node)?;
        self.did_load(doc, node);
        Ok(Some(node))
    }

    /// Materialize and insert right before `sibling`; no hooks, no state change
    pub fn load_before(
        &mut self,
        doc: &mut Document,
        sibling: NodeId,
    ) -> Result<Option<NodeId>, TemplateError> {
        let Some(parent) = doc.parent(sibling) else {
            return Ok(None);
        };
        let Some(root) = self.root else {
            return Ok(None);
        };
        // moving the sibling itself would remove the insertion point
        if self.mode == TemplateMode::Move && root == sibling {
            return Err(DomError::HierarchyRequest {
                parent,
                child: root,
            }
            .into());
        }
        self.check_target(doc, parent, root)?;

        let Some(node) = self.materialize(doc)? else {
            return Ok(None);
        };
        doc.insert_before(parent, node, sibling)?;
        Ok(Some(node))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::dom::load;

    const PAGE: &str = r#"
        main #app {
            section #foo .template { "Write your answer" }
            ul #list { li #last }
        }
    "#;

    fn page() -> Document {
        load(PAGE).expect("Should parse")
    }

    #[test]
    fn test_move_detaches_once_then_reuses() {
        let mut doc = page();
        let app = doc.get_element_by_id("app").unwrap();
        let mut template = Template::from_id(&doc, "foo", TemplateMode::Move);

        let first = template.materialize(&mut doc).unwrap().unwrap();
        assert_eq!(doc.parent(first), None);
        assert!(!doc.has_class(first, TEMPLATE_MARKER));
        assert_eq!(template.mode(), TemplateMode::Reuse);

        doc.append_child(app, first).unwrap();
        let second = template.materialize(&mut doc).unwrap().unwrap();
        assert_eq!(second, first);
        // reuse no longer detaches
        assert_eq!(doc.parent(second), Some(app));
    }

    #[test]
    fn test_clone_yields_distinct_equal_copies() {
        let mut doc = page();
        let mut template = Template::from_id(&doc, "foo", TemplateMode::Clone);
        let root = template.underlying_node().unwrap();
        let original_parent = doc.parent(root);

        let copies: Vec<_> = (0..3)
            .map(|_| template.materialize(&mut doc).unwrap().unwrap())
            .collect();

        for (i, &copy) in copies.iter().enumerate() {
            assert_ne!(copy, root);
            assert!(doc.structurally_equal(copy, root));
            assert!(copies[i + 1..].iter().all(|&other| other != copy));
        }
        assert_eq!(doc.parent(root), original_parent);
        assert!(doc.has_class(root, TEMPLATE_MARKER));
        assert_eq!(template.mode(), TemplateMode::Clone);
    }

    #[test]
    fn test_reuse_returns_same_node() {
        let mut doc = page();
        let mut template = Template::from_id(&doc, "foo", TemplateMode::Reuse);
        let root = template.underlying_node();
        for _ in 0..4 {
            assert_eq!(template.materialize(&mut doc).unwrap(), root);
        }
        assert!(doc.is_connected(root.unwrap()));
    }

    #[test]
    fn test_get_parent_fallback_only_for_parentless_nodes() {
        let mut doc = page();
        let app = doc.get_element_by_id("app").unwrap();
        let fallback = doc.body();

        let attached = Template::from_id(&doc, "foo", TemplateMode::Move);
        assert_eq!(attached.get_parent(Some(fallback)), Some(app));

        let detached = Template::from_text(&mut doc, "hi", TemplateMode::Clone);
        assert_eq!(detached.get_parent(Some(fallback)), Some(fallback));
        assert_eq!(detached.get_parent(None), None);
    }

    #[test]
    fn test_parent_is_captured_at_construction() {
        let mut doc = page();
        let app = doc.get_element_by_id("app").unwrap();
        let mut template = Template::from_id(&doc, "foo", TemplateMode::Move);
        template.materialize(&mut doc).unwrap();
        assert_eq!(template.get_parent(None), Some(app));
    }

    #[test]
    fn test_from_text_builds_div() {
        let mut doc = Document::new();
        let template = Template::from_text(&mut doc, "hello", TemplateMode::Reuse);
        let node = template.underlying_node().unwrap();
        assert_eq!(doc.element(node).unwrap().tag, "div");
        assert_eq!(doc.text_content(node), "hello");
    }

    #[test]
    fn test_from_template_shares_node_and_mode() {
        let doc = page();
        let original = Template::from_id(&doc, "foo", TemplateMode::Clone);
        let copy = Template::from_template(&doc, &original);
        assert_eq!(copy.underlying_node(), original.underlying_node());
        assert_eq!(copy.mode(), TemplateMode::Clone);
        assert!(!copy.has_loaded());

        let via_new = Template::new(&doc, &original, TemplateMode::Move);
        assert_eq!(via_new.mode(), TemplateMode::Clone);
    }

    #[test]
    fn test_unresolved_id_is_a_silent_noop() {
        let mut doc = page();
        let body = doc.body();
        let mut template = Template::from_id(&doc, "missing", TemplateMode::Move);
        assert_eq!(template.underlying_node(), None);
        assert_eq!(template.get_parent(None), None);
        assert_eq!(template.materialize(&mut doc).unwrap(), None);
        assert_eq!(template.load_into(&mut doc, body, true).unwrap(), None);
        assert!(!template.has_loaded());
    }

    #[test]
    fn test_load_into_fires_hooks_around_insertion() {
        let mut doc = page();
        let body = doc.body();
        let events = Rc::new(RefCell::new(Vec::new()));
        let (before, after) = (events.clone(), events.clone());
        let hooks = LifecycleHooks::new()
            .on_will_load(move |doc, node| before.borrow_mut().push(("will", doc.parent(node))))
            .on_did_load(move |doc, node| after.borrow_mut().push(("did", doc.parent(node))));
        let mut template = Template::from_id(&doc, "foo", TemplateMode::Move).with_hooks(hooks);

        let node = template.load_into(&mut doc, body, false).unwrap().unwrap();
        assert!(template.has_loaded());
        assert_eq!(doc.parent(node), Some(body));
        assert_eq!(*events.borrow(), vec![("will", None), ("did", Some(body))]);

        assert_eq!(template.load_into(&mut doc, body, false).unwrap(), None);
        assert_eq!(events.borrow().len(), 2);
    }

    #[test]
    fn test_load_into_allows_duplicates_by_request() {
        let mut doc = page();
        let body = doc.body();
        let mut template = Template::from_id(&doc, "foo", TemplateMode::Clone);
        let a = template.load_into(&mut doc, body, true).unwrap().unwrap();
        let b = template.load_into(&mut doc, body, true).unwrap().unwrap();
        assert_ne!(a, b);
        let children = doc.children(body);
        assert_eq!(&children[children.len() - 2..], &[a, b]);
    }

    #[test]
    fn test_load_before_skips_lifecycle() {
        let mut doc = page();
        let list = doc.get_element_by_id("list").unwrap();
        let last = doc.get_element_by_id("last").unwrap();
        let fired = Rc::new(RefCell::new(false));
        let flag = fired.clone();
        let mut template = Template::from_text(&mut doc, "first", TemplateMode::Reuse)
            .with_hooks(LifecycleHooks::new().on_will_load(move |_, _| *flag.borrow_mut() = true));

        let node = template.load_before(&mut doc, last).unwrap().unwrap();
        assert_eq!(doc.children(list), &[node, last]);
        assert!(!template.has_loaded());
        assert!(!*fired.borrow());
    }

    #[test]
    fn test_load_before_parentless_sibling_keeps_move_template() {
        let mut doc = page();
        let orphan = doc.create_element("span");
        let mut template = Template::from_id(&doc, "foo", TemplateMode::Move);
        assert_eq!(template.load_before(&mut doc, orphan).unwrap(), None);
        assert_eq!(template.mode(), TemplateMode::Move);
    }

    #[test]
    fn test_rejected_insert_keeps_move_template_intact() {
        let mut doc = page();
        let body = doc.body();
        let root = doc.get_element_by_id("foo").unwrap();
        let text = doc.children(root)[0];
        let fired = Rc::new(RefCell::new(0));
        let counter = fired.clone();
        let mut template = Template::from_id(&doc, "foo", TemplateMode::Move)
            .with_hooks(LifecycleHooks::new().on_will_load(move |_, _| *counter.borrow_mut() += 1));

        // a text node cannot hold children
        assert!(matches!(
            template.load_into(&mut doc, text, false),
            Err(TemplateError::Dom(DomError::HierarchyRequest { .. }))
        ));
        assert_eq!(template.mode(), TemplateMode::Move);
        assert!(!template.has_loaded());
        assert!(doc.is_connected(root));
        assert!(doc.has_class(root, TEMPLATE_MARKER));
        assert_eq!(*fired.borrow(), 0);

        let node = template.load_into(&mut doc, body, false).unwrap().unwrap();
        assert_eq!(node, root);
        assert_eq!(doc.parent(node), Some(body));
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn test_load_into_own_descendant_is_rejected() {
        let mut doc = page();
        let app = doc.get_element_by_id("app").unwrap();
        let root = doc.get_element_by_id("foo").unwrap();
        let inner = doc.create_element("span");
        doc.append_child(root, inner).unwrap();
        let mut template = Template::from_id(&doc, "foo", TemplateMode::Move);

        assert!(template.load_into(&mut doc, inner, true).is_err());
        assert_eq!(doc.parent(root), Some(app));
        assert_eq!(template.mode(), TemplateMode::Move);
    }

    #[test]
    fn test_clone_may_load_into_its_own_root() {
        let mut doc = page();
        let root = doc.get_element_by_id("foo").unwrap();
        let mut template = Template::from_id(&doc, "foo", TemplateMode::Clone);
        let copy = template.load_into(&mut doc, root, true).unwrap().unwrap();
        assert_eq!(doc.parent(copy), Some(root));
    }

    #[test]
    fn test_rejected_load_before_keeps_move_template() {
        let mut doc = page();
        let root = doc.get_element_by_id("foo").unwrap();
        let text = doc.children(root)[0];
        let mut template = Template::from_id(&doc, "foo", TemplateMode::Move);

        // the sibling lives inside the template itself
        assert!(template.load_before(&mut doc, text).is_err());
        assert!(template.load_before(&mut doc, root).is_err());
        assert_eq!(template.mode(), TemplateMode::Move);
        assert!(doc.is_connected(root));
        assert!(doc.has_class(root, TEMPLATE_MARKER));
    }

    #[test]
    fn test_unload_notifications_are_caller_driven() {
        let mut doc = page();
        let body = doc.body();
        let events = Rc::new(RefCell::new(Vec::new()));
        let (will, did) = (events.clone(), events.clone());
        let hooks = LifecycleHooks::new()
            .on_will_unload(move |_, _| will.borrow_mut().push("will_unload"))
            .on_did_unload(move |_, _| did.borrow_mut().push("did_unload"));
        let mut template = Template::from_id(&doc, "foo", TemplateMode::Move).with_hooks(hooks);

        let node = template.load_into(&mut doc, body, true).unwrap().unwrap();
        doc.remove_child(body, node).unwrap();
        assert!(events.borrow().is_empty());

        template.will_unload(&mut doc, node);
        template.did_unload(&mut doc, node);
        assert_eq!(*events.borrow(), vec!["will_unload", "did_unload"]);
        assert!(template.has_loaded());
    }
}
