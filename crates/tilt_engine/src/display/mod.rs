//! Display surface tracking
//!
//! [`DisplaySurface`] owns the metrics of a canvas-like output target: width,
//! height, device pixel ratio, and screen position. The actual layout system
//! (DOM, window manager) is an external collaborator reached through the
//! narrow [`LayoutProbe`] trait; the surface never polls it implicitly.
//! `resize` must be invoked by an external layout-change signal, and the read
//! accessors are always consistent with the most recent `resize` call.

use thiserror::Error;

/// Layout collaborator exposing the bound container's current geometry
///
/// Implementations wrap whatever provides pixel dimensions for the output
/// target: a DOM element, a native window, or a fixed-size probe in tests.
pub trait LayoutProbe {
    /// Current container size in pixels (width, height)
    fn container_size(&self) -> (u32, u32);

    /// Device pixel ratio of the output target
    fn pixel_ratio(&self) -> f32;

    /// Container position on screen (x, y)
    fn container_position(&self) -> (f32, f32);
}

/// Snapshot of surface geometry captured by the most recent `resize`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMetrics {
    /// Surface width in pixels
    pub width: u32,

    /// Surface height in pixels
    pub height: u32,

    /// Device pixel ratio
    pub pixel_ratio: f32,

    /// Screen position of the container (x, y)
    pub position: (f32, f32),
}

impl SurfaceMetrics {
    /// Width / height aspect ratio
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Surface width as f32, convenient for layout math
    pub fn width_f(&self) -> f32 {
        self.width as f32
    }

    /// Surface height as f32, convenient for layout math
    pub fn height_f(&self) -> f32 {
        self.height as f32
    }
}

/// Display surface state
///
/// Metrics are `None` until the first successful `resize`; querying before
/// that is a programmer error surfaced as [`DisplayError::NotReady`].
pub struct DisplaySurface {
    probe: Box<dyn LayoutProbe>,
    metrics: Option<SurfaceMetrics>,
}

impl DisplaySurface {
    /// Create a surface bound to a layout collaborator
    ///
    /// No metrics are captured yet; callers must invoke [`Self::resize`]
    /// before reading any accessor.
    pub fn new(probe: Box<dyn LayoutProbe>) -> Self {
        Self {
            probe,
            metrics: None,
        }
    }

    /// Recompute width/height/pixel ratio from the bound container
    ///
    /// Synchronous: the new metrics are visible to every accessor as soon as
    /// this returns, never stale across a frame boundary. A zero-sized
    /// container is rejected so construction-time layout failures surface
    /// immediately.
    pub fn resize(&mut self) -> Result<SurfaceMetrics, DisplayError> {
        let (width, height) = self.probe.container_size();
        if width == 0 || height == 0 {
            return Err(DisplayError::InvalidDimensions { width, height });
        }

        let metrics = SurfaceMetrics {
            width,
            height,
            pixel_ratio: self.probe.pixel_ratio(),
            position: self.probe.container_position(),
        };
        self.metrics = Some(metrics);
        log::trace!("surface resized to {}x{}", width, height);
        Ok(metrics)
    }

    /// Metrics captured by the most recent `resize`
    pub fn metrics(&self) -> Result<SurfaceMetrics, DisplayError> {
        self.metrics.ok_or(DisplayError::NotReady)
    }

    /// Surface width in pixels
    pub fn width(&self) -> Result<u32, DisplayError> {
        Ok(self.metrics()?.width)
    }

    /// Surface height in pixels
    pub fn height(&self) -> Result<u32, DisplayError> {
        Ok(self.metrics()?.height)
    }

    /// Device pixel ratio
    pub fn pixel_ratio(&self) -> Result<f32, DisplayError> {
        Ok(self.metrics()?.pixel_ratio)
    }
}

/// Display surface errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// Surface queried before the first resize
    #[error("display surface queried before first resize")]
    NotReady,

    /// Container reported unusable dimensions
    #[error("container reported invalid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Reported width
        width: u32,
        /// Reported height
        height: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe {
        size: (u32, u32),
        ratio: f32,
    }

    impl LayoutProbe for FixedProbe {
        fn container_size(&self) -> (u32, u32) {
            self.size
        }

        fn pixel_ratio(&self) -> f32 {
            self.ratio
        }

        fn container_position(&self) -> (f32, f32) {
            (0.0, 0.0)
        }
    }

    #[test]
    fn test_query_before_resize_fails() {
        let surface = DisplaySurface::new(Box::new(FixedProbe {
            size: (800, 600),
            ratio: 1.0,
        }));
        assert_eq!(surface.metrics(), Err(DisplayError::NotReady));
        assert_eq!(surface.width(), Err(DisplayError::NotReady));
    }

    #[test]
    fn test_resize_captures_metrics() {
        let mut surface = DisplaySurface::new(Box::new(FixedProbe {
            size: (800, 600),
            ratio: 2.0,
        }));
        let metrics = surface.resize().unwrap();
        assert_eq!(metrics.width, 800);
        assert_eq!(metrics.height, 600);
        assert_eq!(metrics.pixel_ratio, 2.0);
        assert_eq!(surface.width().unwrap(), 800);
        assert!((metrics.aspect_ratio() - 800.0 / 600.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_size_container_rejected() {
        let mut surface = DisplaySurface::new(Box::new(FixedProbe {
            size: (0, 600),
            ratio: 1.0,
        }));
        assert_eq!(
            surface.resize(),
            Err(DisplayError::InvalidDimensions {
                width: 0,
                height: 600
            })
        );
        // The failed resize leaves the surface unready
        assert_eq!(surface.metrics(), Err(DisplayError::NotReady));
    }
}
