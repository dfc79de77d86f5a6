//! Parsed COLLADA document elements and the link resolution contract.
//!
//! The converter never walks XML itself; it consumes addressable elements
//! (materials, effects) through [`LinkResolver`]. [`Document`] is the in-memory
//! implementation used by the converter and its tests.

mod document;
mod element;
mod link;

pub use document::{Document, DocumentDesc, DocumentError};
pub use element::{Color, ColorOrTexture, Effect, EffectTechnique, MaterialDefinition, TextureRef};
pub use link::{Element, ElementKind, Link, LinkResolver};
