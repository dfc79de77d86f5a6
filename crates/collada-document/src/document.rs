//! In-memory document: elements indexed by id.
//!
//! Loads element descriptions from RON, rejects duplicate ids, and resolves
//! same-document links in O(1).

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::element::{Effect, MaterialDefinition};
use crate::link::{Element, ElementKind, Link, LinkResolver};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned while building a [`Document`].
#[derive(Debug, Error)]
pub enum DocumentError {
    /// I/O error reading the document file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// RON deserialization error.
    #[error("ron parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// Two elements share the same id.
    #[error("duplicate element id: {0}")]
    DuplicateId(String),

    /// An element has an empty id and could never be linked to.
    #[error("element has an empty id")]
    EmptyId,
}

// ---------------------------------------------------------------------------
// RON description
// ---------------------------------------------------------------------------

/// Serialized form of a document's material and effect libraries.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentDesc {
    /// `<library_materials>` contents.
    pub materials: Vec<MaterialDefinition>,
    /// `<library_effects>` contents.
    pub effects: Vec<Effect>,
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// Addressable elements of one parsed document.
#[derive(Clone, Debug, Default)]
pub struct Document {
    elements: HashMap<String, Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a document from a RON file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] on I/O, parse, or id validation failures.
    pub fn from_ron(path: &Path) -> Result<Self, DocumentError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load a document from a RON string.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] on parse or id validation failures.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, DocumentError> {
        let desc: DocumentDesc = ron::from_str(ron_str)?;
        Self::from_desc(desc)
    }

    /// Index every element of `desc`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::DuplicateId`] or [`DocumentError::EmptyId`].
    pub fn from_desc(desc: DocumentDesc) -> Result<Self, DocumentError> {
        let mut document = Self::new();
        for material in desc.materials {
            document.insert(Element::Material(material))?;
        }
        for effect in desc.effects {
            document.insert(Element::Effect(effect))?;
        }
        Ok(document)
    }

    /// Add an element. Ids are unique across all element kinds.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::DuplicateId`] if the id is taken.
    pub fn insert(&mut self, element: Element) -> Result<(), DocumentError> {
        let id = element.id();
        if id.is_empty() {
            return Err(DocumentError::EmptyId);
        }
        if self.elements.contains_key(id) {
            return Err(DocumentError::DuplicateId(id.to_string()));
        }
        self.elements.insert(id.to_string(), element);
        Ok(())
    }

    /// Look up an element by id.
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl LinkResolver for Document {
    fn resolve(&self, link: Option<&Link>, kind: ElementKind) -> Option<&Element> {
        let link = link?;
        let Some(id) = link.fragment() else {
            log::debug!("Link {link} does not point into this document");
            return None;
        };
        let Some(element) = self.elements.get(id) else {
            log::debug!("Link {link} has no target");
            return None;
        };
        if element.kind() != kind {
            log::debug!(
                "Link {link} points to a {:?}, expected a {kind:?}",
                element.kind()
            );
            return None;
        }
        Some(element)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
