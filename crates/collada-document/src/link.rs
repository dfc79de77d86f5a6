//! Opaque element references and the resolver contract.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::{Effect, MaterialDefinition};

/// A URL-style reference to another element, e.g. `"#Material-1"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Link(String);

impl Link {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Link to an element of the same document.
    pub fn local(id: &str) -> Self {
        Self(format!("#{id}"))
    }

    /// The raw URL as written in the document.
    pub fn url(&self) -> &str {
        &self.0
    }

    /// Target id for same-document links; `None` for external or empty fragments.
    pub fn fragment(&self) -> Option<&str> {
        self.0.strip_prefix('#').filter(|id| !id.is_empty())
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of element a link is expected to name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Material,
    Effect,
}

/// An addressable document element.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Material(MaterialDefinition),
    Effect(Effect),
}

impl Element {
    pub fn id(&self) -> &str {
        match self {
            Self::Material(material) => &material.id,
            Self::Effect(effect) => &effect.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Material(_) => ElementKind::Material,
            Self::Effect(_) => ElementKind::Effect,
        }
    }
}

/// Resolves links against a parsed document.
///
/// Resolution has no side effects. An absent link always resolves to `None`,
/// and so does a link whose target is missing or of another kind; callers
/// must treat every call as fallible.
pub trait LinkResolver: Send + Sync {
    /// Resolve `link` to an element of the given kind.
    fn resolve(&self, link: Option<&Link>, kind: ElementKind) -> Option<&Element>;

    /// Resolve `link` to a material definition.
    fn material(&self, link: Option<&Link>) -> Option<&MaterialDefinition> {
        match self.resolve(link, ElementKind::Material)? {
            Element::Material(material) => Some(material),
            Element::Effect(_) => None,
        }
    }

    /// Resolve `link` to an effect.
    fn effect(&self, link: Option<&Link>) -> Option<&Effect> {
        match self.resolve(link, ElementKind::Effect)? {
            Element::Effect(effect) => Some(effect),
            Element::Material(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_link_fragment() {
        let link = Link::local("M1");
        assert_eq!(link.url(), "#M1");
        assert_eq!(link.fragment(), Some("M1"));
    }

    #[test]
    fn test_external_link_has_no_fragment() {
        assert_eq!(Link::new("library.dae#M1").fragment(), None);
        assert_eq!(Link::new("#").fragment(), None);
    }

    #[test]
    fn test_element_kind() {
        let element = Element::Effect(Effect {
            id: "E1".to_string(),
            technique: None,
        });
        assert_eq!(element.kind(), ElementKind::Effect);
        assert_eq!(element.id(), "E1");
    }
}
