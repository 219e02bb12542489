//! In-memory document model
//!
//! The document is an arena of nodes addressed by [`NodeId`] handles. It
//! provides exactly the operations view templates rely on: lookup by id,
//! parent/child edits, class-list edits and node creation/cloning.

mod document;
pub mod serialize;

pub use document::{Document, DomError, Element, NodeId, NodeKind};
pub use serialize::to_html;

use crate::ParseError;

/// Parse markup source and build a document from it
pub fn load(source: &str) -> Result<Document, Vec<ParseError>> {
    let markup = crate::markup::parse(source)?;
    Ok(Document::from_markup(&markup))
}
