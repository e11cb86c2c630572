//! Component data attached to host entities

pub mod animator;
pub mod light;
pub mod material;
pub mod mesh;
pub mod node_modifiers;
pub mod transform;
pub mod video;

pub use animator::{AnimationClip, Animator};
pub use light::{LightKind, LightSource};
pub use material::{Material, PbrMaterial, Texture, UnlitMaterial};
pub use mesh::{MeshCollider, MeshRenderer};
pub use node_modifiers::{GltfNodeModifiers, NodeModifier};
pub use transform::Transform;
pub use video::VideoPlayer;
