//! Toggle dispatchers
//!
//! Each dispatcher owns the state of exactly one trigger and mutates exactly
//! one target entity. State lives inside the dispatcher (behind a mutex so
//! the callback stays `Fn + Send + Sync`), never in module globals.
//!
//! - [`AnimationCycle`]: Moore machine over animation steps, advancing on
//!   every activation and wrapping forever
//! - [`PresenceToggle`]: attaches or removes an override depending on
//!   whether the target currently has one; the host is the only record
//! - [`ReplaceOverride`]: installs a freshly built override every time
//! - [`ClearOverride`]: removes any override

use crate::events::PointerEvent;
use crate::system::PointerCallback;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use soho_scene::{Entity, GltfNodeModifiers, Result, SceneHost};
use std::sync::Arc;

/// Something a trigger runs on every activation
pub trait Dispatcher: Send + Sync + 'static {
    /// What an activation did, for callers that drive dispatchers directly
    type Outcome;

    fn activate(&self, host: &mut dyn SceneHost) -> Result<Self::Outcome>;

    /// Wrap into a pointer callback, discarding the outcome
    fn into_callback(self) -> PointerCallback
    where
        Self: Sized,
    {
        Box::new(move |host: &mut dyn SceneHost, _: &PointerEvent| {
            self.activate(host).map(|_| ())
        })
    }
}

impl<D: Dispatcher> Dispatcher for Arc<D> {
    type Outcome = D::Outcome;

    fn activate(&self, host: &mut dyn SceneHost) -> Result<Self::Outcome> {
        (**self).activate(host)
    }
}

/// Counter over `0..len` that wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    state: usize,
    len: usize,
}

impl Cycle {
    /// Cycle of `len` states starting at 0. A zero length is treated as 1.
    pub fn new(len: usize) -> Self {
        Self {
            state: 0,
            len: len.max(1),
        }
    }

    pub fn state(&self) -> usize {
        self.state
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Return the current state and move to the next one
    pub fn advance(&mut self) -> usize {
        let current = self.state;
        self.state = (self.state + 1) % self.len;
        current
    }

    pub fn reset(&mut self) {
        self.state = 0;
    }
}

/// Action of one animation cycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationStep {
    /// Play one clip alone
    Play(String),
    /// Play `base` alone, then force `layered` on top of it
    PlayLayered { base: String, layered: String },
    /// Stop every clip
    StopAll,
}

impl AnimationStep {
    pub fn play(clip: impl Into<String>) -> Self {
        Self::Play(clip.into())
    }

    pub fn layered(base: impl Into<String>, layered: impl Into<String>) -> Self {
        Self::PlayLayered {
            base: base.into(),
            layered: layered.into(),
        }
    }

    pub fn apply(&self, host: &mut dyn SceneHost, target: Entity) -> Result<()> {
        match self {
            Self::Play(clip) => host.play_single_animation(target, clip),
            Self::PlayLayered { base, layered } => {
                host.play_single_animation(target, base)?;
                host.set_clip_playing(target, layered, true)
            }
            Self::StopAll => host.stop_all_animations(target),
        }
    }
}

/// Cycling animation toggler
///
/// Advances, then runs the step of the state it left. After `k`
/// activations the state is `k mod len`, whether or not the steps succeeded.
pub struct AnimationCycle {
    target: Entity,
    steps: Vec<AnimationStep>,
    cycle: Mutex<Cycle>,
}

impl AnimationCycle {
    pub fn new(target: Entity, steps: Vec<AnimationStep>) -> Self {
        let cycle = Cycle::new(steps.len());
        Self {
            target,
            steps,
            cycle: Mutex::new(cycle),
        }
    }

    /// swim, bite, swim with bite layered on top, stop
    pub fn swim_and_bite(target: Entity, swim: &str, bite: &str) -> Self {
        Self::new(
            target,
            vec![
                AnimationStep::play(swim),
                AnimationStep::play(bite),
                AnimationStep::layered(swim, bite),
                AnimationStep::StopAll,
            ],
        )
    }

    pub fn target(&self) -> Entity {
        self.target
    }

    pub fn state(&self) -> usize {
        self.cycle.lock().state()
    }

    /// Step that the next activation will run
    pub fn next_step(&self) -> Option<&AnimationStep> {
        self.steps.get(self.state())
    }

    pub fn step(&self, state: usize) -> Option<&AnimationStep> {
        self.steps.get(state)
    }
}

impl Dispatcher for AnimationCycle {
    /// State whose step ran
    type Outcome = usize;

    fn activate(&self, host: &mut dyn SceneHost) -> Result<usize> {
        // Every activation advances, even when the step fails on the host
        let state = self.cycle.lock().advance();
        let result = match self.steps.get(state) {
            Some(step) => step.apply(host, self.target),
            None => Ok(()),
        };
        log::debug!(
            "Animation cycle on {} ran state {} (ok: {})",
            self.target,
            state,
            result.is_ok()
        );
        result.map(|()| state)
    }
}

/// Whether a target carries an override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    Absent,
}

impl Presence {
    pub fn of(host: &dyn SceneHost, target: Entity) -> Self {
        if host.has_node_modifiers(target) {
            Self::Present
        } else {
            Self::Absent
        }
    }
}

/// Attach when absent, remove when present
///
/// Reads presence from the host on every activation, so it stays correct
/// even if something else attached or removed the override in between.
pub struct PresenceToggle {
    target: Entity,
    modifiers: GltfNodeModifiers,
}

impl PresenceToggle {
    pub fn new(target: Entity, modifiers: GltfNodeModifiers) -> Self {
        Self { target, modifiers }
    }

    pub fn target(&self) -> Entity {
        self.target
    }

    pub fn modifiers(&self) -> &GltfNodeModifiers {
        &self.modifiers
    }
}

impl Dispatcher for PresenceToggle {
    /// Presence after the activation
    type Outcome = Presence;

    fn activate(&self, host: &mut dyn SceneHost) -> Result<Presence> {
        let presence = match Presence::of(host, self.target) {
            Presence::Present => {
                host.delete_node_modifiers(self.target);
                Presence::Absent
            }
            Presence::Absent => {
                host.create_or_replace_node_modifiers(self.target, self.modifiers.clone())?;
                Presence::Present
            }
        };
        log::debug!("Presence toggle on {} -> {:?}", self.target, presence);
        Ok(presence)
    }
}

/// Builds the override installed by a [`ReplaceOverride`]
pub type OverrideBuilder = Box<dyn Fn(&mut StdRng) -> GltfNodeModifiers + Send + Sync>;

/// Where a [`ReplaceOverride`] gets its override from
enum OverrideSource {
    /// Same override every time
    Fixed(GltfNodeModifiers),
    /// Rebuilt per activation from the trigger's own random source
    Random {
        rng: Mutex<StdRng>,
        build: OverrideBuilder,
    },
}

/// Install an override on every activation, replacing whatever is there
///
/// Randomized overrides run their builder per activation, so randomized
/// values are never reused.
pub struct ReplaceOverride {
    target: Entity,
    source: OverrideSource,
}

impl ReplaceOverride {
    pub fn new<F>(target: Entity, rng: StdRng, build: F) -> Self
    where
        F: Fn(&mut StdRng) -> GltfNodeModifiers + Send + Sync + 'static,
    {
        Self {
            target,
            source: OverrideSource::Random {
                rng: Mutex::new(rng),
                build: Box::new(build),
            },
        }
    }

    /// Override that is the same every time
    pub fn fixed(target: Entity, modifiers: GltfNodeModifiers) -> Self {
        Self {
            target,
            source: OverrideSource::Fixed(modifiers),
        }
    }

    pub fn target(&self) -> Entity {
        self.target
    }

    pub fn is_randomized(&self) -> bool {
        matches!(self.source, OverrideSource::Random { .. })
    }
}

impl Dispatcher for ReplaceOverride {
    /// Override that was installed
    type Outcome = GltfNodeModifiers;

    fn activate(&self, host: &mut dyn SceneHost) -> Result<GltfNodeModifiers> {
        let modifiers = match &self.source {
            OverrideSource::Fixed(modifiers) => modifiers.clone(),
            OverrideSource::Random { rng, build } => {
                let mut rng = rng.lock();
                build(&mut *rng)
            }
        };
        host.create_or_replace_node_modifiers(self.target, modifiers.clone())?;
        log::debug!(
            "Replaced override on {} ({} node(s))",
            self.target,
            modifiers.len()
        );
        Ok(modifiers)
    }
}

/// Remove any override from the target
pub struct ClearOverride {
    target: Entity,
}

impl ClearOverride {
    pub fn new(target: Entity) -> Self {
        Self { target }
    }
}

impl Dispatcher for ClearOverride {
    /// Whether an override was removed
    type Outcome = bool;

    fn activate(&self, host: &mut dyn SceneHost) -> Result<bool> {
        let removed = host.delete_node_modifiers(self.target).is_some();
        log::debug!("Cleared override on {} (removed: {})", self.target, removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{random_hex_color, seeded_rng};
    use soho_math::{Color4, Vec3};
    use soho_scene::{
        Animator, MemoryScene, NodeModifier, PbrMaterial, SceneError, SceneHost, Transform,
    };

    fn shark_scene() -> (MemoryScene, Entity) {
        let mut scene = MemoryScene::new();
        let shark = scene
            .spawn_named("shark", Transform::from_position(Vec3::new(48.0, 2.0, 50.0)))
            .unwrap();
        scene
            .insert_animator(shark, Animator::with_clips(["swim", "bite"]))
            .unwrap();
        (scene, shark)
    }

    fn blink_modifiers() -> GltfNodeModifiers {
        GltfNodeModifiers::single(
            NodeModifier::new("M_Head_BaseMesh").with_material(PbrMaterial::new().with_metallic(0.02)),
        )
    }

    fn random_albedo(target: Entity, rng: StdRng) -> ReplaceOverride {
        ReplaceOverride::new(target, rng, |rng| {
            GltfNodeModifiers::single(
                NodeModifier::whole_model()
                    .with_material(PbrMaterial::new().with_albedo(random_hex_color(rng))),
            )
        })
    }

    fn albedo_of(modifiers: &GltfNodeModifiers) -> Option<Color4> {
        match modifiers.get("")?.material.as_ref()? {
            soho_scene::Material::Pbr(pbr) => pbr.albedo_color,
            _ => None,
        }
    }

    #[test]
    fn test_cycle_wraps() {
        let mut cycle = Cycle::new(4);
        let fired: Vec<usize> = (0..9).map(|_| cycle.advance()).collect();
        assert_eq!(fired, vec![0, 1, 2, 3, 0, 1, 2, 3, 0]);
        assert_eq!(cycle.state(), 1);
        assert_eq!(Cycle::new(0).len(), 1);
    }

    #[test]
    fn test_animation_cycle_state_after_k_activations() {
        let (mut scene, shark) = shark_scene();
        let cycle = AnimationCycle::swim_and_bite(shark, "swim", "bite");
        assert_eq!(cycle.step(0), Some(&AnimationStep::play("swim")));

        for k in 1..=12 {
            cycle.activate(&mut scene).unwrap();
            assert_eq!(cycle.state(), k % 4);
        }
    }

    #[test]
    fn test_animation_cycle_actions() {
        let (mut scene, shark) = shark_scene();
        let cycle = AnimationCycle::swim_and_bite(shark, "swim", "bite");
        let playing = |scene: &MemoryScene| -> Vec<String> {
            let animator = scene.animator(shark).unwrap();
            animator.playing().into_iter().map(String::from).collect()
        };

        assert_eq!(cycle.activate(&mut scene).unwrap(), 0);
        assert_eq!(playing(&scene), vec!["swim"]);

        assert_eq!(cycle.activate(&mut scene).unwrap(), 1);
        assert_eq!(playing(&scene), vec!["bite"]);

        assert_eq!(cycle.activate(&mut scene).unwrap(), 2);
        assert_eq!(playing(&scene), vec!["swim", "bite"]);

        assert_eq!(cycle.activate(&mut scene).unwrap(), 3);
        assert!(playing(&scene).is_empty());

        // Back to the start
        assert_eq!(cycle.next_step(), Some(&AnimationStep::play("swim")));
        assert_eq!(cycle.activate(&mut scene).unwrap(), 0);
        assert_eq!(playing(&scene), vec!["swim"]);
    }

    #[test]
    fn test_animation_cycle_advances_past_failing_steps() {
        let mut scene = MemoryScene::new();
        let shark = scene.spawn_named("shark", Transform::IDENTITY).unwrap();
        // No "bite" clip: states 1 and 2 fail on the host
        scene.insert_animator(shark, Animator::with_clips(["swim"])).unwrap();
        let cycle = AnimationCycle::swim_and_bite(shark, "swim", "bite");

        let outcomes: Vec<(bool, usize)> = (0..6)
            .map(|_| {
                let ok = cycle.activate(&mut scene).is_ok();
                (ok, cycle.state())
            })
            .collect();
        assert_eq!(
            outcomes,
            vec![(true, 1), (false, 2), (false, 3), (true, 0), (true, 1), (false, 2)]
        );

        let err = cycle.activate(&mut scene).unwrap_err();
        assert!(matches!(err, SceneError::ClipNotFound { .. }));
        assert_eq!(cycle.state(), 3);
    }

    #[test]
    fn test_animation_cycle_without_animator_still_advances() {
        let mut scene = MemoryScene::new();
        let statue = scene.spawn_named("statue", Transform::IDENTITY).unwrap();
        let cycle = AnimationCycle::swim_and_bite(statue, "swim", "bite");

        let err = cycle.activate(&mut scene).unwrap_err();
        assert!(matches!(err, SceneError::MissingComponent { .. }));
        assert_eq!(cycle.state(), 1);
    }

    #[test]
    fn test_presence_parity() {
        let (mut scene, target) = shark_scene();
        let toggle = PresenceToggle::new(target, blink_modifiers());

        for k in 1..=7 {
            toggle.activate(&mut scene).unwrap();
            let expected = if k % 2 == 1 { Presence::Present } else { Presence::Absent };
            assert_eq!(Presence::of(&scene, target), expected);
        }
    }

    #[test]
    fn test_presence_reads_host_state() {
        let (mut scene, target) = shark_scene();
        let toggle = PresenceToggle::new(target, blink_modifiers());

        // Something else attached an override first: the toggle removes it
        scene
            .create_or_replace_node_modifiers(
                target,
                GltfNodeModifiers::single(NodeModifier::whole_model().with_cast_shadows(false)),
            )
            .unwrap();
        assert_eq!(toggle.activate(&mut scene).unwrap(), Presence::Absent);
        assert!(!scene.has_node_modifiers(target));

        assert_eq!(toggle.activate(&mut scene).unwrap(), Presence::Present);
        assert_eq!(scene.node_modifiers(target), Some(&blink_modifiers()));
    }

    #[test]
    fn test_replace_draws_fresh_values() {
        let (mut scene, target) = shark_scene();
        let replace = random_albedo(target, seeded_rng(Some(99)));

        let first = replace.activate(&mut scene).unwrap();
        let second = replace.activate(&mut scene).unwrap();

        assert_ne!(albedo_of(&first), albedo_of(&second));
        assert_eq!(scene.node_modifiers(target), Some(&second));
        assert_eq!(scene.node_modifiers(target).unwrap().len(), 1);
    }

    #[test]
    fn test_independent_triggers_do_not_share_state() {
        let (mut scene, shark) = shark_scene();
        let other = scene.spawn_named("wenmoon", Transform::IDENTITY).unwrap();

        let a = AnimationCycle::swim_and_bite(shark, "swim", "bite");
        let b = PresenceToggle::new(other, blink_modifiers());

        a.activate(&mut scene).unwrap();
        a.activate(&mut scene).unwrap();
        b.activate(&mut scene).unwrap();

        assert_eq!(a.state(), 2);
        assert!(!scene.has_node_modifiers(shark));
        assert!(scene.has_node_modifiers(other));
    }

    #[test]
    fn test_clear_and_fixed() {
        let (mut scene, target) = shark_scene();
        let shadows = GltfNodeModifiers::single(NodeModifier::whole_model().with_cast_shadows(false));
        let fixed = ReplaceOverride::fixed(target, shadows.clone());
        let clear = ClearOverride::new(target);
        assert!(!fixed.is_randomized());
        assert!(random_albedo(target, seeded_rng(Some(1))).is_randomized());

        assert!(!clear.activate(&mut scene).unwrap());
        assert_eq!(fixed.activate(&mut scene).unwrap(), shadows);
        assert_eq!(fixed.activate(&mut scene).unwrap(), shadows);
        assert!(clear.activate(&mut scene).unwrap());
        assert!(!scene.has_node_modifiers(target));
    }

    #[test]
    fn test_shared_dispatcher_as_callback() {
        let (mut scene, target) = shark_scene();
        let toggle = Arc::new(PresenceToggle::new(target, blink_modifiers()));
        let callback = toggle.clone().into_callback();

        let event = PointerEvent::down(target, crate::events::InputAction::Pointer, 1.0);
        callback(&mut scene, &event).unwrap();
        assert_eq!(Presence::of(&scene, toggle.target()), Presence::Present);
    }
}
