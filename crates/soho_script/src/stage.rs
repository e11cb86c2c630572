//! Pre-authored scene composite
//!
//! The script only looks entities up by name; in a real deployment the
//! editor places them. This builds the same named entities into a
//! [`MemoryScene`] for the headless runtime and tests.

use crate::config::SceneConfig;
use soho_math::{Quat, Vec3};
use soho_scene::{Animator, MemoryScene, MeshCollider, Result, SceneHost, Transform};

/// Where the shark swims; its collider box receives the "Animate!" click
pub const SHARK_POSITION: Vec3 = Vec3::new(48.0, 1.5, 52.0);

/// Size of the shark collider box
pub const SHARK_EXTENT: Vec3 = Vec3::new(3.0, 1.5, 3.0);

/// Spawn every entity the script expects to find by name
pub fn stage_scene(config: &SceneConfig) -> Result<MemoryScene> {
    let names = &config.entities;
    let mut scene = MemoryScene::new();

    // Spot lights point down at the floor
    let down = Quat::from_euler_degrees(90.0, 0.0, 0.0);
    scene.spawn_named(
        &names.spot_light,
        Transform::from_position(Vec3::new(70.0, 8.0, 60.0)).with_rotation(down),
    )?;
    scene.spawn_named(
        &names.point_light,
        Transform::from_position(Vec3::new(56.0, 4.0, 56.0)),
    )?;
    scene.spawn_named(
        &names.red_spot_light,
        Transform::from_position(Vec3::new(80.0, 8.0, 64.0))
            .with_rotation(Quat::from_euler_degrees(90.0, 20.0, 0.0)),
    )?;
    scene.spawn_named(
        &names.masked_spot_light,
        Transform::from_position(Vec3::new(62.0, 8.0, 44.0))
            .with_rotation(Quat::from_euler_degrees(90.0, -20.0, 0.0)),
    )?;

    scene.spawn_named(&names.big_model, Transform::from_position(Vec3::new(80.0, 0.0, 80.0)))?;
    scene.spawn_named(&names.wen_moon, Transform::from_position(Vec3::new(63.0, 0.0, 44.0)))?;

    let shark = scene.spawn_named(
        &names.shark,
        Transform::from_position(SHARK_POSITION).with_scale(SHARK_EXTENT),
    )?;
    scene.set_collider(shark, MeshCollider::Box)?;
    scene.insert_animator(
        shark,
        Animator::with_clips([config.shark.swim_clip.as_str(), config.shark.bite_clip.as_str()]),
    )?;

    log::debug!("Staged {} named entities", scene.entity_count());
    Ok(scene)
}
