//! viewcore - view templates and centralized error reporting
//!
//! This library provides an in-memory document built from a small view
//! markup language, templates that control how markup fragments are
//! inserted into that document, and an error manager that keeps a durable,
//! dumpable log of failures.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use viewcore::{ErrorManager, Runtime, RuntimeConfig};
//!
//! let config = RuntimeConfig::default();
//! let errors = Rc::new(ErrorManager::from_config(&config));
//! let mut runtime = Runtime::from_source(
//!     r#"
//!     main #app {
//!         section #answer-box .template { "Write your answer" }
//!     }
//!     "#,
//!     config,
//!     errors,
//! )
//! .unwrap();
//!
//! let node = runtime.load("answer-box", None).unwrap().unwrap();
//! assert_eq!(runtime.document.text_content(node), "Write your answer");
//! ```

pub mod config;
pub mod diagnostics;
pub mod dom;
pub mod error;
pub mod markup;
pub mod template;

use std::rc::Rc;

pub use config::{ConfigError, RuntimeConfig};
pub use diagnostics::{ErrorManager, ErrorRecord};
pub use dom::{Document, NodeId};
pub use error::ParseError;
pub use template::{Template, TemplateError, TemplateMode, TemplateRegistry};

use diagnostics::NativeFailure;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while building or driving a runtime
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Error while parsing markup
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error while loading configuration
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from a template operation
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// A parent named by id does not exist in the document
    #[error("no element with id '{id}'")]
    MissingNode { id: String },
}

impl From<Vec<ParseError>> for RuntimeError {
    fn from(errors: Vec<ParseError>) -> Self {
        RuntimeError::Parse(errors)
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Composition root: owns the document, its templates and the error manager
#[derive(Debug)]
pub struct Runtime {
    pub document: Document,
    pub templates: TemplateRegistry,
    errors: Rc<ErrorManager>,
    config: RuntimeConfig,
}

impl Runtime {
    /// Parse markup, build the document and register its marked templates
    ///
    /// `errors` is the application's single error manager; the runtime only
    /// holds a handle to it.
    pub fn from_source(
        source: &str,
        config: RuntimeConfig,
        errors: Rc<ErrorManager>,
    ) -> Result<Self, RuntimeError> {
        let document = dom::load(source)?;

        let mut templates = TemplateRegistry::new();
        templates.collect_from_document(
            &document,
            &config.templates.marker_class,
            config.templates.default_mode,
        )?;

        debug!(count = templates.len(), "registered templates");

        Ok(Self {
            document,
            templates,
            errors,
            config,
        })
    }

    /// Shared handle to the error manager
    pub fn errors(&self) -> Rc<ErrorManager> {
        Rc::clone(&self.errors)
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Load a registered template into `parent_id`
    ///
    /// Without a parent the template goes back to its original container,
    /// or to the body if it had none.
    pub fn load(
        &mut self,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<Option<NodeId>, RuntimeError> {
        let parent = match parent_id {
            Some(id) => Some(
                self.document
                    .get_element_by_id(id)
                    .ok_or_else(|| RuntimeError::MissingNode { id: id.to_string() })?,
            ),
            None => None,
        };

        let template = self.templates.require(name)?;
        let body = self.document.body();
        let parent = parent
            .or_else(|| template.get_parent(None))
            .unwrap_or(body);
        Ok(template.load_into(&mut self.document, parent, true)?)
    }

    /// Like [`load`](Self::load), but failures are recorded instead of returned
    pub fn load_or_report(&mut self, name: &str, parent_id: Option<&str>) -> Option<NodeId> {
        match self.load(name, parent_id) {
            Ok(node) => node,
            Err(e) => {
                let failure = NativeFailure::from_error(&e).with_name("LoadError");
                self.errors.silent(
                    failure,
                    &format!("could not load template '{}'", name),
                    vec![],
                );
                None
            }
        }
    }
}
