//! Quaternion for entity orientation

use crate::vector::Vec3;

/// Quaternion representing a 3D rotation
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create from Euler angles (radians, XYZ order)
    pub fn from_euler(x: f32, y: f32, z: f32) -> Self {
        let (sx, cx) = (x * 0.5).sin_cos();
        let (sy, cy) = (y * 0.5).sin_cos();
        let (sz, cz) = (z * 0.5).sin_cos();

        Self::new(
            sx * cy * cz - cx * sy * sz,
            cx * sy * cz + sx * cy * sz,
            cx * cy * sz - sx * sy * cz,
            cx * cy * cz + sx * sy * sz,
        )
    }

    /// Create from Euler angles in degrees
    pub fn from_euler_degrees(x: f32, y: f32, z: f32) -> Self {
        Self::from_euler(crate::radians(x), crate::radians(y), crate::radians(z))
    }

    /// Convert to Euler angles (radians, XYZ order)
    pub fn to_euler(self) -> Vec3 {
        let sinr_cosp = 2.0 * (self.w * self.x + self.y * self.z);
        let cosr_cosp = 1.0 - 2.0 * (self.x * self.x + self.y * self.y);
        let x = sinr_cosp.atan2(cosr_cosp);

        let sinp = 2.0 * (self.w * self.y - self.z * self.x);
        let y = if sinp.abs() >= 1.0 {
            (core::f32::consts::PI / 2.0).copysign(sinp)
        } else {
            sinp.asin()
        };

        let siny_cosp = 2.0 * (self.w * self.z + self.x * self.y);
        let cosy_cosp = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        let z = siny_cosp.atan2(cosy_cosp);

        Vec3::new(x, y, z)
    }

    /// Convert to Euler angles in degrees
    pub fn to_euler_degrees(self) -> Vec3 {
        let e = self.to_euler();
        Vec3::new(crate::degrees(e.x), crate::degrees(e.y), crate::degrees(e.z))
    }

}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}
