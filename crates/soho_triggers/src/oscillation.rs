//! Spotlight oscillation
//!
//! Sweeps registered entities left and right around their original yaw. It
//! is a per-frame system, but nothing registers it unless the scene
//! configuration asks for it.

use soho_math::{consts::TAU, Quat, Vec3};
use soho_scene::{Entity, Result, SceneHost};
use std::collections::HashMap;

/// Per-frame yaw sweep around each entity's original orientation
#[derive(Debug, Clone)]
pub struct SpotlightOscillator {
    /// Half of the sweep arc, in degrees
    pub amplitude: f32,
    /// Full sweeps per second
    pub frequency: f32,
    /// Original orientation (Euler degrees) per entity
    originals: HashMap<Entity, Vec3>,
}

impl SpotlightOscillator {
    pub fn new(amplitude: f32, frequency: f32) -> Self {
        Self {
            amplitude,
            frequency,
            originals: HashMap::new(),
        }
    }

    /// Remember the current rotation of `entity` as its rest orientation
    pub fn track(&mut self, host: &dyn SceneHost, entity: Entity) -> Result<()> {
        let rotation = host.transform(entity)?.rotation;
        self.originals.insert(entity, rotation.to_euler_degrees());
        Ok(())
    }

    pub fn is_tracking(&self, entity: Entity) -> bool {
        self.originals.contains_key(&entity)
    }

    pub fn tracked_count(&self) -> usize {
        self.originals.len()
    }

    /// Yaw offset in degrees at `time` seconds
    pub fn offset_at(&self, time: f64) -> f32 {
        let phase = (time * self.frequency as f64 * TAU as f64).sin() as f32;
        phase * self.amplitude
    }

    /// Rotate every tracked entity to its offset at `time` seconds
    pub fn update(&self, host: &mut dyn SceneHost, time: f64) -> Result<()> {
        let offset = self.offset_at(time);
        for (&entity, original) in &self.originals {
            let mut transform = host.transform(entity)?;
            transform.rotation =
                Quat::from_euler_degrees(original.x, original.y + offset, original.z);
            host.set_transform(entity, transform)?;
        }
        Ok(())
    }
}

impl Default for SpotlightOscillator {
    fn default() -> Self {
        Self::new(15.0, 0.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soho_scene::{MemoryScene, Transform};

    #[test]
    fn test_offset_bounds() {
        let osc = SpotlightOscillator::default();
        assert!(osc.offset_at(0.0).abs() < 1e-4);
        // Quarter period of 0.3 Hz peaks at the amplitude
        let peak = osc.offset_at(1.0 / (4.0 * 0.3));
        assert!((peak - 15.0).abs() < 1e-3);
        for i in 0..100 {
            assert!(osc.offset_at(i as f64 * 0.137).abs() <= 15.0 + 1e-4);
        }
    }

    #[test]
    fn test_update_sweeps_yaw() {
        let mut scene = MemoryScene::new();
        let light = scene
            .spawn_named(
                "Light_Ref",
                Transform::IDENTITY.with_rotation(Quat::from_euler_degrees(0.0, 30.0, 0.0)),
            )
            .unwrap();

        let mut osc = SpotlightOscillator::default();
        osc.track(&scene, light).unwrap();

        osc.update(&mut scene, 1.0 / (4.0 * 0.3)).unwrap();
        let yaw = scene.transform(light).unwrap().rotation.to_euler_degrees().y;
        assert!((yaw - 45.0).abs() < 1e-2);

        osc.update(&mut scene, 0.0).unwrap();
        let yaw = scene.transform(light).unwrap().rotation.to_euler_degrees().y;
        assert!((yaw - 30.0).abs() < 1e-2);
    }

    #[test]
    fn test_track_unknown_entity() {
        let scene = MemoryScene::new();
        let mut osc = SpotlightOscillator::default();
        assert!(osc.track(&scene, Entity::from_raw(9)).is_err());
        assert_eq!(osc.tracked_count(), 0);
    }
}
