//! Converted material records handed to the scene converter.

use serde::Serialize;

/// Reserved registry id of the synthetic fallback material.

pub const DEFAULT_MATERIAL_ID: &str = "collada converter default material";

/// A texture binding that survived conversion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConvertedTexture {
    /// Sampler or image name the texture was created from.
    pub name: String,
    /// Texture coordinate set the binding samples with, if named.
    pub texcoord: Option<String>,
}

/// Canonical, already-converted material.
///
/// Identity is by [`id`](Self::id); within one session the registry hands
/// out a single shared instance per id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConvertedMaterial {
    pub id: String,
    pub diffuse: Option<ConvertedTexture>,
    pub specular: Option<ConvertedTexture>,
    pub normal: Option<ConvertedTexture>,
}

impl ConvertedMaterial {
    /// A material with no texture bindings.
    pub fn untextured(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            diffuse: None,
            specular: None,
            normal: None,
        }
    }

    /// The synthetic fallback material.
    pub fn default_material() -> Self {
        Self::untextured(DEFAULT_MATERIAL_ID)
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_MATERIAL_ID
    }

    /// Number of bound texture slots (0..=3).
    pub fn texture_count(&self) -> usize {
        [&self.diffuse, &self.specular, &self.normal]
            .into_iter()
            .filter(|slot| slot.is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material_has_no_textures() {
        let material = ConvertedMaterial::default_material();
        assert!(material.is_default());
        assert_eq!(material.texture_count(), 0);
    }

    #[test]
    fn test_default_material_id_spelling() {
        assert_eq!(DEFAULT_MATERIAL_ID, "collada converter default material");
    }

    #[test]
    fn test_texture_count() {
        let mut material = ConvertedMaterial::untextured("M1");
        material.normal = Some(ConvertedTexture {
            name: "bump".to_string(),
            texcoord: None,
        });
        assert!(!material.is_default());
        assert_eq!(material.texture_count(), 1);
    }
}
