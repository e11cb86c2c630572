//! # soho_scene - Scene Graph Port
//!
//! The scene script never owns rendering, animation or entity storage. It
//! talks to the host runtime through the [`SceneHost`] trait, which exposes
//! only the capabilities the script consumes:
//!
//! - entity lookup by name and entity creation
//! - transforms, box meshes and box colliders
//! - glTF node modifiers (material overrides per node path)
//! - light sources and video players
//! - animator clip playback
//! - collider picking
//!
//! [`MemoryScene`] is an in-process host used by the headless runtime and by
//! tests.

pub mod components;
pub mod entity;
pub mod error;
pub mod host;
pub mod memory;

pub mod prelude {
    pub use crate::components::{
        AnimationClip, Animator, GltfNodeModifiers, LightKind, LightSource, Material,
        MeshCollider, MeshRenderer, NodeModifier, PbrMaterial, Texture, Transform,
        UnlitMaterial, VideoPlayer,
    };
    pub use crate::entity::Entity;
    pub use crate::error::{Result, SceneError};
    pub use crate::host::SceneHost;
    pub use crate::memory::MemoryScene;
}

pub use prelude::*;
