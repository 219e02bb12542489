//! Registry of named templates

use std::collections::HashMap;

use crate::dom::Document;

use super::instance::Template;
use super::mode::TemplateMode;
use super::TemplateError;

/// Attribute selecting a template's mode in markup
pub const MODE_ATTRIBUTE: &str = "data-template";

/// Registry for storing templates by name
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under `name`
    pub fn register(
        &mut self,
        name: impl Into<String>,
        template: Template,
    ) -> Result<(), TemplateError> {
        let name = name.into();
        if self.templates.contains_key(&name) {
            return Err(TemplateError::Duplicate { name });
        }
        self.templates.insert(name, template);
        Ok(())
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Get a mutable reference to a template
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Template> {
        self.templates.get_mut(name)
    }

    /// Like [`get_mut`](Self::get_mut) but reports a missing name as an error
    pub fn require(&mut self, name: &str) -> Result<&mut Template, TemplateError> {
        self.templates
            .get_mut(name)
            .ok_or_else(|| TemplateError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// All template names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Register every connected element carrying `marker` and an id
    ///
    /// The element's `data-template` attribute selects its mode, falling back
    /// to `default_mode`.
    pub fn collect_from_document(
        &mut self,
        doc: &Document,
        marker: &str,
        default_mode: TemplateMode,
    ) -> Result<usize, TemplateError> {
        let mut collected = 0;
        for node in doc.descendants(doc.body()) {
            if !doc.has_class(node, marker) {
                continue;
            }
            let Some(id) = doc.element(node).and_then(|el| el.id.clone()) else {
                continue;
            };
            let mode = match doc.attribute(node, MODE_ATTRIBUTE) {
                Some(value) => value.parse()?,
                None => default_mode,
            };
            let template = Template::from_node(doc, node, mode).with_marker_class(marker);
            self.register(id, template)?;
            collected += 1;
        }
        Ok(collected)
    }
}
