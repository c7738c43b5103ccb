//! Render-side representation and the render collaborator seam
//!
//! The actual rendering engine (mesh primitives, draw pipeline, canvas) is an
//! external collaborator consumed through the narrow [`RenderSurface`] trait.
//! This module owns only the data the scene layer needs to describe what to
//! draw: per-body [`MeshInstance`] transforms and the orthographic camera.

pub mod camera;

pub use camera::OrthographicCamera;

use crate::foundation::math::Vec3;
use thiserror::Error;

/// RGB color in linear `[0, 1]` components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
}

impl Color {
    /// Construct from components
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Pure red
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Pure yellow
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    /// Pure blue
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    /// Pure white
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
}

/// Render-side transform and material state for one box mesh
///
/// Pure data: the collaborator interprets it as a unit box scaled by `scale`,
/// rotated around Z, translated to `position`. Geometry and material are
/// conceptually owned by this instance and released when it is dropped, which
/// only ever happens through the visual body's dispose path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshInstance {
    /// Render-space position
    pub position: Vec3,

    /// Rotation around the Z axis in radians
    pub rotation_z: f32,

    /// Scale applied to the unit box
    pub scale: Vec3,

    /// Flat material color
    pub color: Color,
}

impl MeshInstance {
    /// Unit box at the origin with the given color
    pub fn unit_box(color: Color) -> Self {
        Self {
            position: Vec3::zeros(),
            rotation_z: 0.0,
            scale: Vec3::new(1.0, 1.0, 1.0),
            color,
        }
    }

    /// Cube of uniform side length at the origin
    pub fn cube(size: f32, color: Color) -> Self {
        Self {
            scale: Vec3::new(size, size, size),
            ..Self::unit_box(color)
        }
    }
}

/// Rendering collaborator
///
/// Implemented by whatever actually draws: a GPU renderer, a canvas binding,
/// or a headless recorder in tests. The scene calls these; it never reaches
/// past them.
pub trait RenderSurface {
    /// Resize the output target
    ///
    /// `preserve_aspect` mirrors the collaborator's native resize flag; the
    /// scene always passes `false` because the camera frustum handles aspect.
    fn set_output_size(&mut self, width: u32, height: u32, preserve_aspect: bool);

    /// Set the device pixel ratio of the output target
    fn set_pixel_ratio(&mut self, ratio: f32);

    /// Draw one frame of the given instances through the camera
    fn draw(&mut self, instances: &[MeshInstance], camera: &OrthographicCamera)
        -> Result<(), RenderError>;
}

/// Errors reported by the render collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The collaborator failed to produce a frame
    #[error("draw failed: {0}")]
    Draw(String),
}
