//! # soho_script - Soho Scene Content
//!
//! The scene's behavior on top of [`soho_triggers`]: four reference lights,
//! material swaps on the TRex and on Wen Moon, and the shark with its
//! animation cycle, video player and node modifier triggers.
//!
//! ```ignore
//! let config = SceneConfig::load_from_file("soho.toml")?;
//! let mut scene = stage_scene(&config)?;
//! let mut script = SceneScript::setup(&mut scene, &config)?;
//!
//! script.click_trigger(&mut scene, "wenmoon_blink")?;
//! script.update(&mut scene, 0.016)?;
//! ```

pub mod config;
pub mod lights;
pub mod materials;
pub mod names;
pub mod shark;
pub mod stage;

pub use config::{ConfigError, SceneConfig};
pub use stage::stage_scene;

use rand::rngs::StdRng;
use soho_math::{Ray, Vec3};
use soho_scene::{Entity, Result, SceneError, SceneHost};
use soho_triggers::{
    create_clickable_cube, seeded_rng, AnimationCycle, PointerCallback, PointerEventOpts,
    PointerEventsSystem, SpotlightOscillator,
};
use std::sync::Arc;

/// A clickable trigger the script installed
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerInfo {
    /// Stable key for scripted clicks
    pub key: &'static str,
    /// Hover label
    pub label: String,
    pub entity: Entity,
}

/// Everything the setup steps need while wiring triggers
pub(crate) struct SetupContext<'a> {
    pub host: &'a mut dyn SceneHost,
    pub pointer_events: &'a mut PointerEventsSystem,
    pub config: &'a SceneConfig,
    triggers: Vec<TriggerInfo>,
    rng_index: u64,
}

impl<'a> SetupContext<'a> {
    fn new(
        host: &'a mut dyn SceneHost,
        pointer_events: &'a mut PointerEventsSystem,
        config: &'a SceneConfig,
    ) -> Self {
        Self {
            host,
            pointer_events,
            config,
            triggers: Vec::new(),
            rng_index: 0,
        }
    }

    /// Random source for the next trigger; seeded ones differ per trigger
    pub fn rng(&mut self) -> StdRng {
        let seed = self.config.trigger_seed(self.rng_index);
        self.rng_index += 1;
        seeded_rng(seed)
    }

    /// Place a clickable cube and record it under `key`
    pub fn cube(
        &mut self,
        key: &'static str,
        position: Vec3,
        label: &str,
        callback: PointerCallback,
    ) -> Result<Entity> {
        let entity = create_clickable_cube(
            &mut *self.host,
            &mut *self.pointer_events,
            position,
            label,
            callback,
        )?;
        self.triggers.push(TriggerInfo {
            key,
            label: label.to_string(),
            entity,
        });
        Ok(entity)
    }

    /// Bind a callback to an existing entity and record it under `key`
    pub fn register(
        &mut self,
        key: &'static str,
        entity: Entity,
        opts: PointerEventOpts,
        callback: PointerCallback,
    ) {
        let label = opts.hover_text.clone();
        self.pointer_events.on_pointer_down(entity, opts, callback);
        self.triggers.push(TriggerInfo { key, label, entity });
    }
}

/// The running scene script
pub struct SceneScript {
    pointer_events: PointerEventsSystem,
    triggers: Vec<TriggerInfo>,
    shark_cycle: Arc<AnimationCycle>,
    oscillator: Option<SpotlightOscillator>,
}

impl SceneScript {
    /// One-shot setup: lights, initial materials, every trigger, and the
    /// oscillator when enabled. Any host failure aborts setup.
    pub fn setup(host: &mut dyn SceneHost, config: &SceneConfig) -> Result<Self> {
        lights::setup_lights(host, config)?;

        let mut pointer_events = PointerEventsSystem::new();
        let mut cx = SetupContext::new(host, &mut pointer_events, config);
        materials::setup_trex(&mut cx)?;
        materials::setup_wen_moon(&mut cx)?;
        let shark_cycle = shark::setup_shark(&mut cx)?;
        let triggers = std::mem::take(&mut cx.triggers);
        drop(cx);

        let oscillator = if config.oscillation.enabled {
            let mut oscillator = SpotlightOscillator::new(
                config.oscillation.amplitude,
                config.oscillation.frequency,
            );
            for name in &config.oscillation.targets {
                let entity = host.entity_by_name(name)?;
                oscillator.track(host, entity)?;
            }
            log::info!(
                "Spotlight oscillation on {} entities",
                oscillator.tracked_count()
            );
            Some(oscillator)
        } else {
            None
        };

        log::info!("Scene script ready with {} triggers", triggers.len());
        Ok(Self {
            pointer_events,
            triggers,
            shark_cycle,
            oscillator,
        })
    }

    /// Run one frame: dispatch queued pointer input, then sweep the lights
    /// if oscillation is on. `time` is in seconds.
    pub fn update(&mut self, host: &mut dyn SceneHost, time: f64) -> Result<usize> {
        let fired = self.pointer_events.update(host)?;
        if let Some(oscillator) = &self.oscillator {
            oscillator.update(host, time)?;
        }
        Ok(fired)
    }

    pub fn pointer_events(&self) -> &PointerEventsSystem {
        &self.pointer_events
    }

    pub fn pointer_events_mut(&mut self) -> &mut PointerEventsSystem {
        &mut self.pointer_events
    }

    pub fn triggers(&self) -> &[TriggerInfo] {
        &self.triggers
    }

    pub fn trigger(&self, key: &str) -> Option<&TriggerInfo> {
        self.triggers.iter().find(|t| t.key == key)
    }

    /// State the shark animation cycle will run next
    pub fn shark_cycle_state(&self) -> usize {
        self.shark_cycle.state()
    }

    pub fn oscillator(&self) -> Option<&SpotlightOscillator> {
        self.oscillator.as_ref()
    }

    /// Ray that hits the trigger's collider head-on, from two meters in front
    pub fn ray_to(&self, host: &dyn SceneHost, key: &str) -> Result<Ray> {
        let trigger = self
            .trigger(key)
            .ok_or_else(|| SceneError::NameNotFound(key.to_string()))?;
        let target = host.transform(trigger.entity)?.position;
        Ok(Ray::new(target - Vec3::Z * 2.0, Vec3::Z))
    }

    /// Click a trigger by key and dispatch immediately
    pub fn click_trigger(&mut self, host: &mut dyn SceneHost, key: &str) -> Result<usize> {
        let ray = self.ray_to(host, key)?;
        self.pointer_events.click(ray);
        self.pointer_events.update(host)
    }
}

impl std::fmt::Debug for SceneScript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneScript")
            .field("pointer_events", &self.pointer_events)
            .field("triggers", &self.triggers.len())
            .field("shark_cycle_state", &self.shark_cycle.state())
            .field("oscillating", &self.oscillator.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_trigger_rngs_differ() {
        use rand::Rng;

        let config = SceneConfig {
            seed: Some(5),
            ..SceneConfig::default()
        };
        let mut scene = stage_scene(&config).unwrap();
        let mut pointer_events = PointerEventsSystem::new();
        let mut cx = SetupContext::new(&mut scene, &mut pointer_events, &config);

        let a: u64 = cx.rng().gen();
        let b: u64 = cx.rng().gen();
        assert_ne!(a, b);
        assert_eq!(a, seeded_rng(Some(5)).gen::<u64>());
    }

    #[test]
    fn test_unknown_trigger_key() {
        let config = SceneConfig::default();
        let mut scene = stage_scene(&config).unwrap();
        let mut script = SceneScript::setup(&mut scene, &config).unwrap();

        let err = script.click_trigger(&mut scene, "nope").unwrap_err();
        assert_eq!(err, SceneError::NameNotFound("nope".into()));
    }
}
