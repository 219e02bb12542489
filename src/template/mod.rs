//! View templates
//!
//! A [`Template`] wraps a markup fragment and decides how it is materialized
//! when inserted into a [`Document`](crate::dom::Document):
//!
//! - `move`: the original node is detached and claimed once, after which the
//!   template behaves as `reuse`
//! - `clone`: every insertion gets a fresh deep copy
//! - `reuse`: the original node is handed out untouched
//!
//! # Example
//!
//! ```rust
//! use viewcore::dom::load;
//! use viewcore::template::{Template, TemplateMode};
//!
//! let mut doc = load(r#"main #app { section #answer-box .template { "Answer" } }"#).unwrap();
//! let body = doc.body();
//!
//! let mut answer = Template::from_id(&doc, "answer-box", TemplateMode::Move);
//! let node = answer.load_into(&mut doc, body, false).unwrap().unwrap();
//!
//! assert_eq!(doc.parent(node), Some(body));
//! assert!(answer.has_loaded());
//! ```

mod hooks;
mod instance;
mod mode;
mod registry;

use thiserror::Error;

use crate::dom::DomError;

pub use hooks::{Hook, LifecycleEvent, LifecycleHooks};
pub use instance::{Template, TemplateSource, TEMPLATE_MARKER};
pub use mode::{LoadState, TemplateMode};
pub use registry::{TemplateRegistry, MODE_ATTRIBUTE};

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found in registry
    #[error("template not found: {name}")]
    NotFound { name: String },

    /// Duplicate template registration
    #[error("duplicate template definition: {name}")]
    Duplicate { name: String },

    /// Unknown materialization mode
    #[error("invalid template mode '{value}': expected move, clone or reuse")]
    InvalidMode { value: String },

    /// The document rejected an insertion
    #[error(transparent)]
    Dom(#[from] DomError),
}
