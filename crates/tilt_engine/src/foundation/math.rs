//! Math utilities and types
//!
//! Provides the fundamental math types shared by the physics and render layers.

pub use nalgebra::{Matrix4, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Small math helpers
pub mod utils {
    /// Clamp a value to the unit interval `[-1, 1]`
    pub fn clamp_unit(value: f32) -> f32 {
        value.clamp(-1.0, 1.0)
    }

    /// Normalize a device tilt angle in degrees to `[-1, 1]`
    ///
    /// Device orientation delivers angles in degrees; a 90-degree tilt maps to
    /// full deflection on that axis, anything beyond saturates.
    pub fn tilt_to_unit(degrees: f32) -> f32 {
        clamp_unit(degrees / 90.0)
    }
}
