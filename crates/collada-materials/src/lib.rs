//! Material resolution and deduplication for the COLLADA converter.
//!
//! A geometry binds its mesh slots to materials through
//! [`MaterialInstanceRef`]s. [`MaterialResolver`] follows each reference
//! through material, effect, and technique, converts the texture slots, and
//! registers the result in a session-scoped [`MaterialRegistry`] so one
//! material id always maps to one shared [`ConvertedMaterial`]. Malformed input
//! never aborts a conversion: it degrades to the default material and is
//! reported through a [`DiagnosticSink`].

mod diagnostics;
mod instance;
mod map;
mod material;
mod registry;
mod resolver;
mod texture;

pub use collada_config::RegistryKeying;
pub use diagnostics::{Diagnostic, DiagnosticLog, DiagnosticSink, Severity};
pub use instance::MaterialInstanceRef;
pub use map::{SymbolMap, SymbolMapError};
pub use material::{ConvertedMaterial, ConvertedTexture, DEFAULT_MATERIAL_ID};
pub use registry::MaterialRegistry;
pub use resolver::MaterialResolver;
pub use texture::{SamplerTextureCreator, TextureCreator};
