//! Primitive mesh and collider shapes

use serde::{Deserialize, Serialize};

/// Visible primitive mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshRenderer {
    Box,
}

/// Pointer/physics collider shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshCollider {
    /// Unit box scaled by the entity transform
    Box,
}
