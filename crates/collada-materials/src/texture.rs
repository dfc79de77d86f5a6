//! Texture creation for material slots.

use collada_document::ColorOrTexture;

use crate::diagnostics::{DiagnosticSink, Severity};
use crate::material::ConvertedTexture;

/// Turns a raw technique channel into a usable texture binding.
///
/// Returns `None` for absent channels, constant colors, and textures that
/// could not be converted; a failed slot never fails the material.
pub trait TextureCreator: Send + Sync {
    fn create_texture(
        &self,
        slot: Option<&ColorOrTexture>,
        diagnostics: &dyn DiagnosticSink,
    ) -> Option<ConvertedTexture>;
}

/// Binds textures by sampler name without touching image data.
#[derive(Clone, Copy, Debug, Default)]
pub struct SamplerTextureCreator;

impl TextureCreator for SamplerTextureCreator {
    fn create_texture(
        &self,
        slot: Option<&ColorOrTexture>,
        diagnostics: &dyn DiagnosticSink,
    ) -> Option<ConvertedTexture> {
        let texture = slot?.texture()?;
        let sampler = texture.sampler.trim();
        if sampler.is_empty() {
            diagnostics.emit(Severity::Warning, "Texture has no sampler, texture skipped.");
            return None;
        }
        Some(ConvertedTexture {
            name: sampler.to_string(),
            texcoord: texture.texcoord.clone(),
        })
    }
}
