//! # soho_math - Scene Math
//!
//! Small value types shared by the scene crates:
//! - `Vec3` positions and scales
//! - `Quat` rotations built from Euler degrees
//! - `Color3` / `Color4` with hex string parsing
//! - `AABB` and `Ray` for pointer picking

pub mod bounds;
pub mod color;
pub mod intersect;
pub mod quaternion;
pub mod ray;
pub mod vector;

pub use bounds::*;
pub use color::*;
pub use intersect::*;
pub use quaternion::*;
pub use ray::*;
pub use vector::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
    pub const DEG_TO_RAD: f32 = PI / 180.0;
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * consts::DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians * consts::RAD_TO_DEG
}

pub mod prelude {
    pub use crate::bounds::AABB;
    pub use crate::color::{Color3, Color4};
    pub use crate::intersect::ray_aabb;
    pub use crate::quaternion::Quat;
    pub use crate::ray::Ray;
    pub use crate::vector::Vec3;
    pub use crate::{degrees, radians};
}
