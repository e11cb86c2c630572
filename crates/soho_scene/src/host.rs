//! The scene host port
//!
//! Everything the scene script needs from the runtime goes through this
//! trait. Implementations own entity storage; callers only hold [`Entity`]
//! handles. Errors are reported, never recovered from, by the script.

use crate::components::{
    GltfNodeModifiers, LightSource, MeshCollider, MeshRenderer, Transform, VideoPlayer,
};
use crate::entity::Entity;
use crate::error::Result;
use soho_math::Ray;

/// Capabilities consumed from the host runtime
pub trait SceneHost {
    // Entities

    /// Look up a pre-authored entity by its stable name
    fn entity_by_name(&self, name: &str) -> Result<Entity>;

    /// Allocate a new entity
    fn add_entity(&mut self) -> Result<Entity>;

    // Transforms and shapes

    fn transform(&self, entity: Entity) -> Result<Transform>;

    fn set_transform(&mut self, entity: Entity, transform: Transform) -> Result<()>;

    fn set_mesh(&mut self, entity: Entity, mesh: MeshRenderer) -> Result<()>;

    fn set_collider(&mut self, entity: Entity, collider: MeshCollider) -> Result<()>;

    /// Closest entity whose collider the ray hits, with hit distance
    fn pick(&self, ray: &Ray) -> Option<(Entity, f32)>;

    // Node modifiers

    /// Attach modifiers; fails if the entity already has some
    fn create_node_modifiers(&mut self, entity: Entity, modifiers: GltfNodeModifiers)
        -> Result<()>;

    /// Attach modifiers, replacing any existing set
    fn create_or_replace_node_modifiers(
        &mut self,
        entity: Entity,
        modifiers: GltfNodeModifiers,
    ) -> Result<()>;

    fn node_modifiers(&self, entity: Entity) -> Option<&GltfNodeModifiers>;

    /// Detach modifiers, returning the removed set
    fn delete_node_modifiers(&mut self, entity: Entity) -> Option<GltfNodeModifiers>;

    fn has_node_modifiers(&self, entity: Entity) -> bool {
        self.node_modifiers(entity).is_some()
    }

    // Lights and video

    fn create_light(&mut self, entity: Entity, light: LightSource) -> Result<()>;

    fn create_video_player(&mut self, entity: Entity, player: VideoPlayer) -> Result<()>;

    // Animation

    /// Play one clip, stopping every other clip on the entity
    fn play_single_animation(&mut self, entity: Entity, clip: &str) -> Result<()>;

    fn set_clip_playing(&mut self, entity: Entity, clip: &str, playing: bool) -> Result<()>;

    fn clip_playing(&self, entity: Entity, clip: &str) -> Result<bool>;

    fn stop_all_animations(&mut self, entity: Entity) -> Result<()>;
}
