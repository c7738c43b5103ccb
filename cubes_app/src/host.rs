//! Scene hosting and platform collaborators
//!
//! [`SceneHost`] owns every live scene and fans lifecycle signals out to all
//! of them: physics pumping, frame updates, layout changes, and shutdown.
//! The collaborator implementations here are headless stand-ins for a real
//! platform binding: a fixed layout probe, a logging render surface, and a
//! synthesized orientation sweep.

use thiserror::Error;

use tilt_engine::prelude::*;

/// Host-level errors
#[derive(Error, Debug)]
pub enum HostError {
    /// A scene with this name already exists
    #[error("scene '{0}' already registered")]
    DuplicateScene(String),

    /// Error surfaced by a scene, tagged with its name
    #[error("scene '{name}': {source}")]
    Scene {
        /// Name of the failing scene
        name: String,
        /// Underlying scene error
        source: SceneError,
    },
}

/// Fixed-size layout probe standing in for a measured container
pub struct FixedProbe {
    width: u32,
    height: u32,
    pixel_ratio: f32,
}

impl FixedProbe {
    /// Probe reporting a constant container geometry
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }
}

impl LayoutProbe for FixedProbe {
    fn container_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn container_position(&self) -> (f32, f32) {
        (0.0, 0.0)
    }
}

/// Render surface that logs draw traffic instead of rasterizing
pub struct ConsoleSurface {
    label: String,
    frames: u64,
}

impl ConsoleSurface {
    /// Surface tagged with a label for log output
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            frames: 0,
        }
    }
}

impl RenderSurface for ConsoleSurface {
    fn set_output_size(&mut self, width: u32, height: u32, preserve_aspect: bool) {
        log::info!(
            "[{}] output {}x{} (preserve aspect: {})",
            self.label,
            width,
            height,
            preserve_aspect
        );
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        log::info!("[{}] pixel ratio {:.2}", self.label, ratio);
    }

    fn draw(
        &mut self,
        instances: &[MeshInstance],
        _camera: &OrthographicCamera,
    ) -> Result<(), RenderError> {
        self.frames += 1;
        // One sample body per second of frames keeps the log readable
        if self.frames % 60 == 1 {
            if let Some(instance) = instances.last() {
                log::info!(
                    "[{}] frame {}: {} instances, last at ({:.1}, {:.1}) rot {:.2}",
                    self.label,
                    self.frames,
                    instances.len(),
                    instance.position.x,
                    instance.position.y,
                    instance.rotation_z
                );
            }
        }
        Ok(())
    }
}

/// Orientation source that sweeps the device tilt back and forth
///
/// Synthesizes a slow sinusoidal beta/gamma pair so the demo exercises the
/// gravity mapping without real sensors. Permission is granted on subscribe.
pub struct SweepOrientation {
    phase: f32,
    step: f32,
    subscribed: bool,
}

impl SweepOrientation {
    /// Sweep advancing `step` radians per poll
    pub fn new(step: f32) -> Self {
        Self {
            phase: 0.0,
            step,
            subscribed: false,
        }
    }
}

impl OrientationSource for SweepOrientation {
    fn subscribe(&mut self) -> Result<(), InputError> {
        self.subscribed = true;
        log::info!("orientation sweep subscribed");
        Ok(())
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
        log::info!("orientation sweep unsubscribed");
    }

    fn latest(&mut self) -> Option<OrientationSample> {
        if !self.subscribed {
            return None;
        }
        self.phase += self.step;
        Some(OrientationSample {
            alpha: 0.0,
            beta: 60.0 * self.phase.sin(),
            gamma: 90.0 * (self.phase * 0.5).cos(),
        })
    }
}

/// Registry of live scenes
///
/// Scenes are destroyed through [`Self::destroy_all`] or when the host is
/// dropped; each scene's own teardown releases its physics driver and bodies.
#[derive(Default)]
pub struct SceneHost {
    scenes: Vec<Scene>,
}

impl SceneHost {
    /// Empty host
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live scenes
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Construct a scene and register it under its name
    pub fn create_scene(
        &mut self,
        name: &str,
        context: SceneContext,
        population: Box<dyn ScenePopulation>,
        config: SceneConfig,
    ) -> Result<(), HostError> {
        if self.scenes.iter().any(|scene| scene.name() == name) {
            return Err(HostError::DuplicateScene(name.to_string()));
        }
        let scene = Scene::new(name, context, population, config)
            .map_err(|source| HostError::Scene {
                name: name.to_string(),
                source,
            })?;
        self.scenes.push(scene);
        Ok(())
    }

    /// Feed elapsed time to every scene's physics driver
    pub fn pump_all(&mut self, elapsed: f32) -> Result<(), HostError> {
        for scene in &mut self.scenes {
            scene
                .pump_physics(elapsed)
                .map_err(|source| HostError::Scene {
                    name: scene.name().to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Present one frame on every scene
    pub fn update_all(&mut self) -> Result<(), HostError> {
        for scene in &mut self.scenes {
            scene.update().map_err(|source| HostError::Scene {
                name: scene.name().to_string(),
                source,
            })?;
        }
        Ok(())
    }

    /// Propagate a layout change to every scene
    pub fn resize_all(&mut self) -> Result<(), HostError> {
        for scene in &mut self.scenes {
            scene.resize().map_err(|source| HostError::Scene {
                name: scene.name().to_string(),
                source,
            })?;
        }
        Ok(())
    }

    /// Tear down and drop every scene
    pub fn destroy_all(&mut self) {
        for scene in &mut self.scenes {
            scene.destroy();
        }
        self.scenes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::population::GravityCubes;

    fn context(width: u32, height: u32) -> SceneContext {
        SceneContext::new(
            Box::new(FixedProbe::new(width, height)),
            Box::new(ConsoleSurface::new("test")),
        )
    }

    #[test]
    fn test_host_rejects_duplicate_scene_names() {
        let mut host = SceneHost::new();
        host.create_scene(
            "main",
            context(800, 600),
            Box::new(GravityCubes),
            SceneConfig::default(),
        )
        .unwrap();

        let error = host.create_scene(
            "main",
            context(800, 600),
            Box::new(GravityCubes),
            SceneConfig::default(),
        );
        assert!(matches!(error, Err(HostError::DuplicateScene(_))));
        assert_eq!(host.scene_count(), 1);
    }

    #[test]
    fn test_host_drives_independent_scenes() {
        let mut host = SceneHost::new();
        host.create_scene(
            "first",
            context(800, 600),
            Box::new(GravityCubes),
            SceneConfig::default(),
        )
        .unwrap();
        host.create_scene(
            "second",
            context(640, 480),
            Box::new(GravityCubes),
            SceneConfig::default(),
        )
        .unwrap();

        host.pump_all(5.0 / 60.0).unwrap();
        host.update_all().unwrap();
        host.resize_all().unwrap();

        host.destroy_all();
        assert_eq!(host.scene_count(), 0);
    }

    #[test]
    fn test_sweep_orientation_requires_subscription() {
        let mut sweep = SweepOrientation::new(0.1);
        assert!(sweep.latest().is_none());

        sweep.subscribe().unwrap();
        let sample = sweep.latest().unwrap();
        assert!(sample.beta.abs() <= 60.0);
        assert!(sample.gamma.abs() <= 90.0);

        sweep.unsubscribe();
        assert!(sweep.latest().is_none());
    }
}
