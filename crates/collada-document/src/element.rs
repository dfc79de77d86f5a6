//! Element types produced by the document parser.

use serde::{Deserialize, Serialize};

use crate::link::Link;

/// Linear RGBA constant color.
pub type Color = [f32; 4];

// ---------------------------------------------------------------------------
// MaterialDefinition
// ---------------------------------------------------------------------------

/// A `<material>` element: an id plus the effect it instantiates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialDefinition {
    /// Document-unique id; also the identity of the converted material.
    pub id: String,
    /// Optional human-readable name.
    #[serde(default)]
    pub name: Option<String>,
    /// `<instance_effect url=...>`; absent when the element had none.
    #[serde(default)]
    pub effect: Option<Link>,
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// An `<effect>` element. Only the common-profile technique is kept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    /// Document-unique id.
    pub id: String,
    /// Shading technique; absent when the effect had no supported profile.
    #[serde(default)]
    pub technique: Option<EffectTechnique>,
}

/// Per-channel shading parameters of an effect.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectTechnique {
    pub diffuse: Option<ColorOrTexture>,
    pub specular: Option<ColorOrTexture>,
    pub bump: Option<ColorOrTexture>,
}

impl EffectTechnique {
    /// Returns `true` if any channel carries a constant color instead of a texture.
    pub fn has_constant_colors(&self) -> bool {
        [&self.diffuse, &self.specular, &self.bump]
            .into_iter()
            .flatten()
            .any(ColorOrTexture::is_color)
    }
}

// ---------------------------------------------------------------------------
// ColorOrTexture
// ---------------------------------------------------------------------------

/// Value of one technique channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ColorOrTexture {
    /// `<color>` constant.
    Color(Color),
    /// `<texture texture=... texcoord=...>` reference.
    Texture(TextureRef),
}

impl ColorOrTexture {
    pub fn is_color(&self) -> bool {
        matches!(self, Self::Color(_))
    }

    /// The texture reference, if this channel is textured.
    pub fn texture(&self) -> Option<&TextureRef> {
        match self {
            Self::Texture(texture) => Some(texture),
            Self::Color(_) => None,
        }
    }
}

/// Raw texture reference as written in the effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureRef {
    /// Sampler (or image) the channel samples from.
    pub sampler: String,
    /// Texture coordinate set semantic, e.g. `"UVSET0"`.
    #[serde(default)]
    pub texcoord: Option<String>,
}
