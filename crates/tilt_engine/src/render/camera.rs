//! Orthographic camera sized to the display surface
//!
//! The frustum spans the full surface centered on the origin, so one render
//! unit is one pixel and physics positions map directly onto the screen.

use crate::foundation::math::{Mat4, Vec3};

/// Orthographic camera with a surface-centered frustum
#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicCamera {
    /// Left frustum plane
    pub left: f32,
    /// Right frustum plane
    pub right: f32,
    /// Top frustum plane
    pub top: f32,
    /// Bottom frustum plane
    pub bottom: f32,
    /// Near clipping distance
    pub near: f32,
    /// Far clipping distance
    pub far: f32,
    /// Camera position in render space
    pub position: Vec3,
}

impl OrthographicCamera {
    /// Create a camera whose frustum spans a surface of the given size
    ///
    /// The camera sits on the Z axis at `z_offset` looking toward the origin.
    pub fn from_surface(width: f32, height: f32, near: f32, far: f32, z_offset: f32) -> Self {
        Self {
            left: -width / 2.0,
            right: width / 2.0,
            top: height / 2.0,
            bottom: -height / 2.0,
            near,
            far,
            position: Vec3::new(0.0, 0.0, z_offset),
        }
    }

    /// Refit the frustum to a new surface size, preserving clip planes
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.left = -width / 2.0;
        self.right = width / 2.0;
        self.top = height / 2.0;
        self.bottom = -height / 2.0;
    }

    /// Orthographic projection matrix for the current frustum
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_orthographic(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }

    /// View matrix (translation only; the camera never rotates)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::new_translation(&-self.position)
    }
}
