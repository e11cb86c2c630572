//! Light source component

use super::material::Texture;
use serde::{Deserialize, Serialize};
use soho_math::Color3;

/// Light shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LightKind {
    /// Cone light, angles in degrees
    Spot { inner_angle: f32, outer_angle: f32 },
    /// Omnidirectional light
    Point,
}

/// Light attached to an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightSource {
    pub kind: LightKind,
    /// None keeps the host default (white)
    pub color: Option<Color3>,
    /// Luminous intensity in candela
    pub intensity: f32,
    pub shadow: bool,
    /// Projected mask for spot light shadows
    pub shadow_mask_texture: Option<Texture>,
}

impl LightSource {
    /// Spot light with the given cone angles (degrees)
    pub fn spot(inner_angle: f32, outer_angle: f32) -> Self {
        Self::new(LightKind::Spot {
            inner_angle,
            outer_angle,
        })
    }

    /// Point light
    pub fn point() -> Self {
        Self::new(LightKind::Point)
    }

    fn new(kind: LightKind) -> Self {
        Self {
            kind,
            color: None,
            intensity: 16000.0,
            shadow: false,
            shadow_mask_texture: None,
        }
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_color(mut self, color: Color3) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_shadow(mut self) -> Self {
        self.shadow = true;
        self
    }

    pub fn with_shadow_mask(mut self, texture: Texture) -> Self {
        self.shadow_mask_texture = Some(texture);
        self
    }

    pub fn is_spot(&self) -> bool {
        matches!(self.kind, LightKind::Spot { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spot_builder() {
        let light = LightSource::spot(30.0, 60.0)
            .with_intensity(1_000_000.0)
            .with_color(Color3::magenta())
            .with_shadow()
            .with_shadow_mask(Texture::common("assets/scene/images/lightmask1.png"));

        assert!(light.is_spot());
        assert!(light.shadow);
        assert_eq!(light.color, Some(Color3::magenta()));
        assert!(matches!(light.shadow_mask_texture, Some(Texture::Common { .. })));
    }

    #[test]
    fn test_point_defaults() {
        let light = LightSource::point().with_intensity(100_000.0);
        assert!(!light.is_spot());
        assert!(!light.shadow);
        assert_eq!(light.color, None);
    }
}
