//! Device orientation input seam
//!
//! Device orientation is a permission-gated external source. The host
//! performs the permission request and calls [`OrientationSource::subscribe`];
//! the scene only ever polls [`OrientationSource::latest`] and applies the
//! tilt-to-gravity mapping. Teardown unsubscribes so no listener outlives the
//! scene.

use thiserror::Error;

/// One device orientation reading in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationSample {
    /// Rotation around the Z axis (unused by the gravity mapping)
    pub alpha: f32,
    /// Front-to-back tilt
    pub beta: f32,
    /// Left-to-right tilt
    pub gamma: f32,
}

/// Permission-gated orientation collaborator
pub trait OrientationSource {
    /// Begin delivering samples; requires the host to have obtained permission
    fn subscribe(&mut self) -> Result<(), InputError>;

    /// Stop delivering samples
    fn unsubscribe(&mut self);

    /// Most recent sample since the last call, if any arrived
    fn latest(&mut self) -> Option<OrientationSample>;
}

/// Orientation input errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The user or platform denied the motion permission
    #[error("device orientation permission denied")]
    PermissionDenied,

    /// The platform has no orientation sensor
    #[error("device orientation unavailable: {0}")]
    Unavailable(String),
}
