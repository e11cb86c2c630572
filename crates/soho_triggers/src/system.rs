//! Pointer events system
//!
//! Stands in for the host input layer: raw pointer samples are queued with
//! [`PointerEventsSystem::push_input`] and turned into activations on
//! [`PointerEventsSystem::update`]. A press fires at most one callback; the
//! button must be released before the next press can fire again.

use crate::events::{InputAction, PointerEvent, PointerEventOpts, PointerInput};
use soho_math::Ray;
use soho_scene::{Entity, Result, SceneHost};
use std::collections::{HashMap, HashSet, VecDeque};

/// Callback bound to a pointer-down registration
pub type PointerCallback =
    Box<dyn Fn(&mut dyn SceneHost, &PointerEvent) -> Result<()> + Send + Sync>;

struct Registration {
    opts: PointerEventOpts,
    callback: PointerCallback,
    activations: u32,
}

/// Routes pointer presses to the callback registered on the hit entity
pub struct PointerEventsSystem {
    /// One callback per entity
    registrations: HashMap<Entity, Registration>,
    /// Inputs not yet processed
    pending: VecDeque<PointerInput>,
    /// Buttons currently held down
    held: HashSet<InputAction>,
}

impl PointerEventsSystem {
    /// Create a new pointer events system
    pub fn new() -> Self {
        Self {
            registrations: HashMap::new(),
            pending: VecDeque::new(),
            held: HashSet::new(),
        }
    }

    /// Register the pointer-down callback for an entity, replacing any
    /// earlier one
    pub fn on_pointer_down(
        &mut self,
        entity: Entity,
        opts: PointerEventOpts,
        callback: PointerCallback,
    ) {
        let previous = self.registrations.insert(
            entity,
            Registration {
                opts,
                callback,
                activations: 0,
            },
        );
        if previous.is_some() {
            log::warn!("Replaced pointer-down callback on {}", entity);
        }
    }

    pub fn is_registered(&self, entity: Entity) -> bool {
        self.registrations.contains_key(&entity)
    }

    pub fn registration_count(&self) -> usize {
        self.registrations.len()
    }

    /// Hover label of an entity
    pub fn hover_text(&self, entity: Entity) -> Option<&str> {
        self.registrations
            .get(&entity)
            .map(|r| r.opts.hover_text.as_str())
    }

    /// Hover label of whatever registered entity the ray points at
    pub fn hover_text_at(&self, host: &dyn SceneHost, ray: &Ray) -> Option<&str> {
        let (entity, distance) = host.pick(ray)?;
        let registration = self.registrations.get(&entity)?;
        (distance <= registration.opts.max_distance).then(|| registration.opts.hover_text.as_str())
    }

    /// Number of times the entity's callback has fired
    pub fn activation_count(&self, entity: Entity) -> u32 {
        self.registrations
            .get(&entity)
            .map_or(0, |r| r.activations)
    }

    /// Queue a raw input sample
    pub fn push_input(&mut self, input: PointerInput) {
        self.pending.push_back(input);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Queue a full press and release of the pointer button along `ray`
    pub fn click(&mut self, ray: Ray) {
        self.push_input(PointerInput::press(InputAction::Pointer, ray));
        self.push_input(PointerInput::release(InputAction::Pointer, ray));
    }

    /// Process queued input, firing callbacks in arrival order
    ///
    /// Returns the number of callbacks fired. A callback error stops
    /// processing and is returned; inputs after it stay queued.
    pub fn update(&mut self, host: &mut dyn SceneHost) -> Result<usize> {
        let mut fired = 0;

        while let Some(input) = self.pending.pop_front() {
            if !input.pressed {
                self.held.remove(&input.button);
                continue;
            }

            // Held buttons do not repeat
            if !self.held.insert(input.button) {
                continue;
            }

            let Some((entity, distance)) = host.pick(&input.ray) else {
                continue;
            };

            let Some(registration) = self.registrations.get_mut(&entity) else {
                log::debug!("Pointer hit {} with no callback", entity);
                continue;
            };

            if !registration.opts.button.accepts(input.button)
                || distance > registration.opts.max_distance
            {
                continue;
            }

            registration.activations += 1;
            log::debug!(
                "Pointer down on {} ('{}'), activation {}",
                entity,
                registration.opts.hover_text,
                registration.activations
            );

            let event = PointerEvent::down(entity, input.button, distance);
            (registration.callback)(&mut *host, &event)?;
            fired += 1;
        }

        Ok(fired)
    }
}

impl Default for PointerEventsSystem {
    fn default() -> Self {
        Self::new()
    }
}

// Manual Debug implementation (skip callbacks)
impl std::fmt::Debug for PointerEventsSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerEventsSystem")
            .field("registrations", &self.registrations.len())
            .field("pending", &self.pending.len())
            .field("held", &self.held)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soho_math::Vec3;
    use soho_scene::{MemoryScene, MeshCollider, SceneError, Transform};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn cube_at(scene: &mut MemoryScene, position: Vec3) -> Entity {
        let entity = scene.add_entity().unwrap();
        scene
            .set_transform(entity, Transform::from_position(position).with_scale(Vec3::splat(0.5)))
            .unwrap();
        scene.set_collider(entity, MeshCollider::Box).unwrap();
        entity
    }

    fn counting_callback(counter: &Arc<AtomicU32>) -> PointerCallback {
        let counter = counter.clone();
        Box::new(move |_: &mut dyn SceneHost, _: &PointerEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    fn ray_at(x: f32) -> Ray {
        Ray::new(Vec3::new(x, 1.0, 0.0), Vec3::Z)
    }

    #[test]
    fn test_click_fires_once() {
        let mut scene = MemoryScene::new();
        let cube = cube_at(&mut scene, Vec3::new(0.0, 1.0, 3.0));
        let count = Arc::new(AtomicU32::new(0));

        let mut system = PointerEventsSystem::new();
        system.on_pointer_down(cube, PointerEventOpts::new("Blink"), counting_callback(&count));

        system.click(ray_at(0.0));
        assert_eq!(system.update(&mut scene).unwrap(), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(system.activation_count(cube), 1);
    }

    #[test]
    fn test_callback_receives_hit() {
        let mut scene = MemoryScene::new();
        let cube = cube_at(&mut scene, Vec3::new(0.0, 1.0, 3.0));
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = seen.clone();

        let mut system = PointerEventsSystem::new();
        system.on_pointer_down(
            cube,
            PointerEventOpts::new("Hit"),
            Box::new(move |_: &mut dyn SceneHost, event: &PointerEvent| {
                sink.lock().push(event.clone());
                Ok(())
            }),
        );

        system.click(ray_at(0.0));
        system.update(&mut scene).unwrap();

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].entity, cube);
        assert_eq!(seen[0].button, InputAction::Pointer);
        assert!((seen[0].distance - 2.75).abs() < 1e-4);
    }

    #[test]
    fn test_held_button_does_not_repeat() {
        let mut scene = MemoryScene::new();
        let cube = cube_at(&mut scene, Vec3::new(0.0, 1.0, 3.0));
        let count = Arc::new(AtomicU32::new(0));

        let mut system = PointerEventsSystem::new();
        system.on_pointer_down(cube, PointerEventOpts::new("Hold"), counting_callback(&count));

        // Three frames of the button held down
        for _ in 0..3 {
            system.push_input(PointerInput::press(InputAction::Pointer, ray_at(0.0)));
        }
        system.update(&mut scene).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        system.push_input(PointerInput::release(InputAction::Pointer, ray_at(0.0)));
        system.push_input(PointerInput::press(InputAction::Pointer, ray_at(0.0)));
        system.update(&mut scene).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_miss_and_wrong_button() {
        let mut scene = MemoryScene::new();
        let cube = cube_at(&mut scene, Vec3::new(0.0, 1.0, 3.0));
        let count = Arc::new(AtomicU32::new(0));

        let mut system = PointerEventsSystem::new();
        system.on_pointer_down(cube, PointerEventOpts::new("Cube"), counting_callback(&count));

        system.click(ray_at(5.0));
        system.push_input(PointerInput::press(InputAction::Secondary, ray_at(0.0)));
        assert_eq!(system.update(&mut scene).unwrap(), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_out_of_range() {
        let mut scene = MemoryScene::new();
        let cube = cube_at(&mut scene, Vec3::new(0.0, 1.0, 30.0));
        let count = Arc::new(AtomicU32::new(0));

        let mut system = PointerEventsSystem::new();
        system.on_pointer_down(cube, PointerEventOpts::new("Far"), counting_callback(&count));

        system.click(ray_at(0.0));
        assert_eq!(system.update(&mut scene).unwrap(), 0);
    }

    #[test]
    fn test_each_trigger_gets_its_own_callback() {
        let mut scene = MemoryScene::new();
        let left = cube_at(&mut scene, Vec3::new(0.0, 1.0, 3.0));
        let right = cube_at(&mut scene, Vec3::new(2.0, 1.0, 3.0));
        let left_count = Arc::new(AtomicU32::new(0));
        let right_count = Arc::new(AtomicU32::new(0));

        let mut system = PointerEventsSystem::new();
        system.on_pointer_down(left, PointerEventOpts::new("L"), counting_callback(&left_count));
        system.on_pointer_down(right, PointerEventOpts::new("R"), counting_callback(&right_count));

        system.click(ray_at(2.0));
        system.click(ray_at(2.0));
        system.update(&mut scene).unwrap();

        assert_eq!(left_count.load(Ordering::SeqCst), 0);
        assert_eq!(right_count.load(Ordering::SeqCst), 2);
        assert_eq!(system.hover_text_at(&scene, &ray_at(0.0)), Some("L"));
    }

    #[test]
    fn test_callback_error_keeps_later_input() {
        let mut scene = MemoryScene::new();
        let cube = cube_at(&mut scene, Vec3::new(0.0, 1.0, 3.0));

        let mut system = PointerEventsSystem::new();
        system.on_pointer_down(
            cube,
            PointerEventOpts::new("Broken"),
            Box::new(|host: &mut dyn SceneHost, _: &PointerEvent| {
                host.entity_by_name("missing").map(|_| ())
            }),
        );

        system.click(ray_at(0.0));
        system.click(ray_at(0.0));
        let err = system.update(&mut scene).unwrap_err();
        assert_eq!(err, SceneError::NameNotFound("missing".into()));
        // release of the first click and the whole second click remain
        assert_eq!(system.pending_count(), 3);
    }
}
