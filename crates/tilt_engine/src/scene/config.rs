//! Scene configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Tunable parameters for a scene
///
/// Defaults reproduce the canonical gravity-cubes scenario: ten 30px cubes
/// between 10px walls under an orthographic camera at z = 1000.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Near clipping plane
    pub camera_near: f32,

    /// Far clipping plane
    pub camera_far: f32,

    /// Camera offset along the Z axis
    pub camera_z: f32,

    /// Thickness of layout walls in pixels
    pub wall_thickness: f32,

    /// Side length of spawned dynamic cubes in pixels
    pub body_size: f32,

    /// Number of dynamic bodies created at construction
    pub initial_bodies: usize,

    /// Global gravity strength multiplier
    pub gravity_scale: f32,

    /// Physics driver timestep in seconds
    pub fixed_timestep: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera_near: 0.1,
            camera_far: 2000.0,
            camera_z: 1000.0,
            wall_thickness: 10.0,
            body_size: 30.0,
            initial_bodies: 10,
            gravity_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
        }
    }
}

impl SceneConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(ConfigError::Parse)
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config {0}: {1}")]
    Io(String, #[source] std::io::Error),

    /// File contents were not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}
