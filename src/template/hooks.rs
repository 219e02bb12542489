//! Lifecycle handler slots for templates

use std::fmt;

use crate::dom::{Document, NodeId};

/// A lifecycle handler; receives the document and the inserted/removed node
pub type Hook = Box<dyn FnMut(&mut Document, NodeId)>;

/// Points in a template's appearance lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    WillLoad,
    DidLoad,
    WillUnload,
    DidUnload,
}

/// Optional handlers fired around insertion and removal
///
/// Every slot defaults to a no-op.
#[derive(Default)]
pub struct LifecycleHooks {
    will_load: Option<Hook>,
    did_load: Option<Hook>,
    will_unload: Option<Hook>,
    did_unload: Option<Hook>,
}

impl LifecycleHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called right before the node is inserted
    pub fn on_will_load(mut self, hook: impl FnMut(&mut Document, NodeId) + 'static) -> Self {
        self.will_load = Some(Box::new(hook));
        self
    }

    /// Called after the node has been inserted
    pub fn on_did_load(mut self, hook: impl FnMut(&mut Document, NodeId) + 'static) -> Self {
        self.did_load = Some(Box::new(hook));
        self
    }

    /// Called before the node disappears
    pub fn on_will_unload(mut self, hook: impl FnMut(&mut Document, NodeId) + 'static) -> Self {
        self.will_unload = Some(Box::new(hook));
        self
    }

    /// Called once the node has disappeared
    pub fn on_did_unload(mut self, hook: impl FnMut(&mut Document, NodeId) + 'static) -> Self {
        self.did_unload = Some(Box::new(hook));
        self
    }

    pub(crate) fn fire(&mut self, event: LifecycleEvent, doc: &mut Document, node: NodeId) {
        let slot = match event {
            LifecycleEvent::WillLoad => &mut self.will_load,
            LifecycleEvent::DidLoad => &mut self.did_load,
            LifecycleEvent::WillUnload => &mut self.will_unload,
            LifecycleEvent::DidUnload => &mut self.did_unload,
        };
        if let Some(hook) = slot {
            hook(doc, node);
        }
    }
}

impl fmt::Debug for LifecycleHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHooks")
            .field("will_load", &self.will_load.is_some())
            .field("did_load", &self.did_load.is_some())
            .field("will_unload", &self.will_unload.is_some())
            .field("did_unload", &self.did_unload.is_some())
            .finish()
    }
}
