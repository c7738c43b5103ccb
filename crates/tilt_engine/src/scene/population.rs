//! Declarative scene population and layout policy
//!
//! A scene never hardcodes which bodies exist. A [`ScenePopulation`] supplies
//! the wall set, the initial dynamic bodies, and the resize-time placement of
//! every wall as a function of the current surface metrics. This keeps a
//! single `Scene` type serving any scenario variant.

use crate::display::SurfaceMetrics;
use crate::render::Color;
use crate::scene::config::SceneConfig;

/// A static wall to create at construction
#[derive(Debug, Clone, Copy)]
pub struct WallSpec {
    /// Wall color
    pub color: Color,
}

/// A dynamic body to create at construction
#[derive(Debug, Clone, Copy)]
pub struct BodySpawn {
    /// Render-space X position
    pub x: f32,
    /// Render-space Y position
    pub y: f32,
    /// Side length of the cube
    pub size: f32,
    /// Body color
    pub color: Color,
}

/// Render-space placement of one wall for the current surface size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallPlacement {
    /// Center X
    pub x: f32,
    /// Center Y
    pub y: f32,
    /// Wall width
    pub width: f32,
    /// Wall height
    pub height: f32,
}

/// Strategy supplying what bodies exist and how walls are laid out on resize
pub trait ScenePopulation {
    /// Walls to create during scene construction
    fn walls(&self, config: &SceneConfig) -> Vec<WallSpec>;

    /// Dynamic bodies to create during scene construction
    fn initial_bodies(&self, metrics: &SurfaceMetrics, config: &SceneConfig) -> Vec<BodySpawn>;

    /// Placement of wall `index` for the given surface metrics
    ///
    /// Called for every wall on every resize; placements are pure functions
    /// of the surface size, never retained state.
    fn wall_placement(
        &self,
        index: usize,
        metrics: &SurfaceMetrics,
        config: &SceneConfig,
    ) -> WallPlacement;

    /// Color given to bodies added after construction
    fn spawn_color(&self, existing: usize) -> Color {
        let _ = existing;
        Color::WHITE
    }
}
