//! Clickable cube factory

use crate::events::PointerEventOpts;
use crate::system::{PointerCallback, PointerEventsSystem};
use soho_math::Vec3;
use soho_scene::{Entity, MeshCollider, MeshRenderer, Result, SceneHost, Transform};

/// Uniform scale of every clickable cube
pub const CLICKABLE_CUBE_SCALE: f32 = 0.5;

/// Place a small clickable cube at `position` showing `hover_text`, and bind
/// `callback` to pointer-down on it.
///
/// The cube is never moved or removed afterwards. Host failures (entity
/// exhaustion, rejected components) are returned untouched.
pub fn create_clickable_cube(
    host: &mut dyn SceneHost,
    pointer_events: &mut PointerEventsSystem,
    position: Vec3,
    hover_text: &str,
    callback: PointerCallback,
) -> Result<Entity> {
    let cube = host.add_entity()?;
    host.set_transform(
        cube,
        Transform::from_position(position).with_scale(Vec3::splat(CLICKABLE_CUBE_SCALE)),
    )?;
    host.set_mesh(cube, MeshRenderer::Box)?;
    host.set_collider(cube, MeshCollider::Box)?;
    pointer_events.on_pointer_down(cube, PointerEventOpts::new(hover_text), callback);

    log::debug!("Clickable cube '{}' at {:?} is {}", hover_text, position, cube);
    Ok(cube)
}
