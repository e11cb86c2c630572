//! Material descriptions used by node modifiers

use crate::entity::Entity;
use serde::{Deserialize, Serialize};
use soho_math::{Color3, Color4};

/// Texture source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Texture {
    /// Image asset, path passed to the host loader untouched
    Common { src: String },
    /// Frames of the video player attached to an entity
    Video { video_player_entity: Entity },
}

impl Texture {
    pub fn common(src: impl Into<String>) -> Self {
        Self::Common { src: src.into() }
    }

    pub fn video(video_player_entity: Entity) -> Self {
        Self::Video { video_player_entity }
    }
}

/// Physically based material. Unset fields keep the host defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PbrMaterial {
    pub albedo_color: Option<Color4>,
    pub emissive_color: Option<Color3>,
    pub emissive_intensity: Option<f32>,
    pub metallic: Option<f32>,
    pub roughness: Option<f32>,
    pub texture: Option<Texture>,
}

impl PbrMaterial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_albedo(mut self, color: Color4) -> Self {
        self.albedo_color = Some(color);
        self
    }

    pub fn with_emissive(mut self, color: Color3, intensity: f32) -> Self {
        self.emissive_color = Some(color);
        self.emissive_intensity = Some(intensity);
        self
    }

    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = Some(metallic);
        self
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = Some(roughness);
        self
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }
}

/// Unlit material
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnlitMaterial {
    pub diffuse_color: Option<Color4>,
    pub texture: Option<Texture>,
}

impl UnlitMaterial {
    pub fn with_diffuse(mut self, color: Color4) -> Self {
        self.diffuse_color = Some(color);
        self
    }
}

/// Material variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Material {
    Pbr(PbrMaterial),
    Unlit(UnlitMaterial),
}

impl From<PbrMaterial> for Material {
    fn from(m: PbrMaterial) -> Self {
        Self::Pbr(m)
    }
}

impl From<UnlitMaterial> for Material {
    fn from(m: UnlitMaterial) -> Self {
        Self::Unlit(m)
    }
}
