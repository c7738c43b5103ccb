//! Scene lifecycle and render/physics synchronization
//!
//! A [`Scene`] orchestrates one camera, one display surface, one physics
//! world, and a collection of visual bodies, keeping the render and physics
//! representations of every body consistent across creation, resize, update,
//! and disposal.
//!
//! Lifecycle is a three-state machine: `Constructing` builds the camera,
//! surface, world, and initial population and forces a first resize;
//! `Active` serves per-frame updates, resizes, orientation input, and body
//! add/remove; `Destroyed` is terminal and releases the physics driver,
//! every body pairing, and the render collaborator together.
//!
//! Two independent cadences drive an active scene: the host pumps the
//! physics driver through [`Scene::pump_physics`], and presents frames
//! through [`Scene::update`]. `update` never steps physics; it synchronizes
//! render transforms from the last completed step and issues one draw.

pub mod config;
pub mod population;
pub mod visual_body;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, SceneConfig};
pub use population::{BodySpawn, ScenePopulation, WallPlacement, WallSpec};
pub use visual_body::VisualBody;

use thiserror::Error;

use crate::display::{DisplayError, DisplaySurface, LayoutProbe};
use crate::foundation::logging::DebugSink;
use crate::foundation::math::utils::tilt_to_unit;
use crate::input::OrientationSource;
use crate::physics::{BodyHandle, PhysicsError, PhysicsWorld};
use crate::render::{MeshInstance, OrthographicCamera, RenderError, RenderSurface};

/// Scene lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    /// Camera, surface, world, and population are being built
    Constructing,
    /// Serving frames
    Active,
    /// Terminal; all resources released
    Destroyed,
}

/// Scene-level errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// Operation on a destroyed scene
    #[error("scene has been destroyed")]
    Destroyed,

    /// A visual body and the physics registry disagree
    ///
    /// This is a design-invariant failure: add/dispose are atomic, so a
    /// detected orphan means a code path bypassed them.
    #[error("orphaned body detected: {details}")]
    OrphanedBody {
        /// What was missing and where it was detected
        details: String,
    },

    /// Display surface error
    #[error(transparent)]
    Display(#[from] DisplayError),

    /// Physics layer error
    #[error(transparent)]
    Physics(#[from] PhysicsError),

    /// Render collaborator error
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Collaborators a scene depends on, injected at construction
///
/// No global context: everything the scene reaches outside itself for comes
/// through this struct.
pub struct SceneContext {
    /// Layout collaborator for the bound container
    pub layout: Box<dyn LayoutProbe>,
    /// Rendering collaborator
    pub render: Box<dyn RenderSurface>,
    /// Diagnostic sink
    pub debug: Box<dyn DebugSink>,
    /// Orientation source, if the host obtained one
    pub orientation: Option<Box<dyn OrientationSource>>,
}

impl SceneContext {
    /// Context with the default log-backed debug sink and no orientation
    pub fn new(layout: Box<dyn LayoutProbe>, render: Box<dyn RenderSurface>) -> Self {
        Self {
            layout,
            render,
            debug: Box::new(crate::foundation::logging::LogDebugSink),
            orientation: None,
        }
    }

    /// Replace the debug sink
    pub fn with_debug_sink(mut self, debug: Box<dyn DebugSink>) -> Self {
        self.debug = debug;
        self
    }

    /// Attach an orientation source (already subscribed by the host)
    pub fn with_orientation(mut self, orientation: Box<dyn OrientationSource>) -> Self {
        self.orientation = Some(orientation);
        self
    }
}

/// Physics-backed scene bound to one display surface
pub struct Scene {
    name: String,
    state: SceneState,
    config: SceneConfig,
    surface: DisplaySurface,
    render: Option<Box<dyn RenderSurface>>,
    debug: Box<dyn DebugSink>,
    orientation: Option<Box<dyn OrientationSource>>,
    camera: OrthographicCamera,
    world: PhysicsWorld,
    population: Box<dyn ScenePopulation>,
    walls: Vec<VisualBody>,
    bodies: Vec<VisualBody>,
}

impl Scene {
    /// Build a scene and bring it to the `Active` state
    ///
    /// Forces the first `resize` before returning so camera and wall metrics
    /// are consistent before the first frame, and starts the physics driver.
    /// Construction failures (unusable container, layout errors) surface
    /// immediately.
    pub fn new(
        name: impl Into<String>,
        context: SceneContext,
        population: Box<dyn ScenePopulation>,
        config: SceneConfig,
    ) -> Result<Self, SceneError> {
        let name = name.into();
        log::info!("constructing scene '{}'", name);

        let mut surface = DisplaySurface::new(context.layout);
        let metrics = surface.resize()?;

        let camera = OrthographicCamera::from_surface(
            metrics.width_f(),
            metrics.height_f(),
            config.camera_near,
            config.camera_far,
            config.camera_z,
        );

        let mut world = PhysicsWorld::with_fixed_dt(config.fixed_timestep);
        let gravity = world.gravity();
        world.set_gravity(config.gravity_scale, gravity.x, gravity.y);

        let walls = population
            .walls(&config)
            .iter()
            .map(|spec| VisualBody::new_static(&mut world, spec.color))
            .collect();

        let bodies = population
            .initial_bodies(&metrics, &config)
            .iter()
            .map(|spawn| {
                VisualBody::new_dynamic(&mut world, spawn.x, spawn.y, spawn.size, spawn.color)
            })
            .collect();

        world.run_continuous();

        let mut scene = Self {
            name,
            state: SceneState::Constructing,
            config,
            surface,
            render: Some(context.render),
            debug: context.debug,
            orientation: context.orientation,
            camera,
            world,
            population,
            walls,
            bodies,
        };

        // Establish camera frustum, output size, and wall layout before the
        // first frame
        scene.resize()?;
        scene.state = SceneState::Active;
        log::info!(
            "scene '{}' active with {} bodies",
            scene.name,
            scene.world.body_count()
        );
        Ok(scene)
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current lifecycle state
    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Scene configuration
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The physics world
    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    /// The camera
    pub fn camera(&self) -> &OrthographicCamera {
        &self.camera
    }

    /// Number of dynamic bodies currently in the scene
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Dynamic bodies currently in the scene
    pub fn bodies(&self) -> &[VisualBody] {
        &self.bodies
    }

    /// Static walls currently in the scene
    pub fn walls(&self) -> &[VisualBody] {
        &self.walls
    }

    /// Present one frame
    ///
    /// Polls orientation input, verifies the registry invariant, pulls every
    /// body's physics pose into its render transform, and issues one draw.
    /// Idempotent between physics steps; never steps the simulation itself.
    pub fn update(&mut self) -> Result<(), SceneError> {
        self.ensure_active()?;

        if let Some(sample) = self.orientation.as_mut().and_then(|source| source.latest()) {
            self.on_orientation_input(sample.beta, sample.gamma)?;
        }

        self.verify_registry()?;

        for body in self.walls.iter_mut().chain(self.bodies.iter_mut()) {
            body.sync_from_physics(&self.world)?;
        }

        let instances: Vec<MeshInstance> = self
            .walls
            .iter()
            .chain(self.bodies.iter())
            .map(|body| *body.mesh())
            .collect();

        let render = self.render.as_mut().ok_or(SceneError::Destroyed)?;
        render.draw(&instances, &self.camera)?;
        Ok(())
    }

    /// React to a container layout change
    ///
    /// Recomputes surface metrics, refits the camera frustum, resizes the
    /// render output, and re-derives every wall's position and size from the
    /// new metrics. Idempotent while the surface is unchanged.
    pub fn resize(&mut self) -> Result<(), SceneError> {
        if self.state == SceneState::Destroyed {
            return Err(SceneError::Destroyed);
        }

        let metrics = self.surface.resize()?;
        self.camera.set_viewport(metrics.width_f(), metrics.height_f());

        let render = self.render.as_mut().ok_or(SceneError::Destroyed)?;
        render.set_output_size(metrics.width, metrics.height, false);
        render.set_pixel_ratio(metrics.pixel_ratio);

        for (index, wall) in self.walls.iter_mut().enumerate() {
            let placement = self.population.wall_placement(index, &metrics, &self.config);
            wall.set_position(&mut self.world, placement.x, placement.y)?;
            wall.set_size(&mut self.world, placement.width, placement.height)?;
        }
        Ok(())
    }

    /// React to a scroll: refresh surface metrics only
    pub fn scroll(&mut self) -> Result<(), SceneError> {
        self.ensure_active()?;
        self.surface.resize()?;
        Ok(())
    }

    /// Feed elapsed wall time to the physics driver
    ///
    /// Returns the number of fixed steps taken. Separate from [`Self::update`]
    /// so the two cadences stay independent.
    pub fn pump_physics(&mut self, elapsed: f32) -> Result<u32, SceneError> {
        self.ensure_active()?;
        Ok(self.world.pump(elapsed))
    }

    /// Map device tilt to the gravity vector
    ///
    /// Each axis is normalized by 90 degrees and clamped to `[-1, 1]`: `beta`
    /// drives the horizontal component, `gamma` the vertical. Pure function
    /// of its inputs; the only retained state is the world's gravity vector,
    /// which takes effect on the next step.
    pub fn on_orientation_input(&mut self, beta: f32, gamma: f32) -> Result<(), SceneError> {
        self.ensure_active()?;

        let gx = tilt_to_unit(beta);
        let gy = tilt_to_unit(gamma);
        self.debug
            .report("orientation", &format!("{:.2}, {:.2}", gx, gy));

        let scale = self.world.gravity().scale;
        self.world.set_gravity(scale, gx, gy);
        Ok(())
    }

    /// Create a dynamic body at a render-space position
    ///
    /// The render mesh and the physics registration happen in one operation;
    /// returns the new body's handle.
    pub fn add_body(&mut self, x: f32, y: f32) -> Result<BodyHandle, SceneError> {
        self.ensure_active()?;

        let color = self.population.spawn_color(self.bodies.len());
        let body =
            VisualBody::new_dynamic(&mut self.world, x, y, self.config.body_size, color);
        let handle = body.handle();
        self.bodies.push(body);
        log::debug!(
            "scene '{}': body {:?} added at ({:.1}, {:.1})",
            self.name,
            handle,
            x,
            y
        );
        Ok(handle)
    }

    /// Remove a dynamic body, releasing both its halves
    ///
    /// Removing a handle that is not in the scene is a no-op.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<(), SceneError> {
        self.ensure_active()?;

        match self.bodies.iter().position(|body| body.handle() == handle) {
            Some(index) => {
                let body = self.bodies.remove(index);
                body.dispose(&mut self.world);
                log::debug!("scene '{}': body {:?} removed", self.name, handle);
            }
            None => {
                log::debug!(
                    "scene '{}': remove of unknown body {:?} ignored",
                    self.name,
                    handle
                );
            }
        }
        Ok(())
    }

    /// Change the global gravity strength multiplier
    pub fn set_gravity_scale(&mut self, scale: f32) -> Result<(), SceneError> {
        self.ensure_active()?;
        let gravity = self.world.gravity();
        self.world.set_gravity(scale, gravity.x, gravity.y);
        self.config.gravity_scale = scale;
        Ok(())
    }

    /// Change the rendered size of every dynamic body
    ///
    /// Physics geometry of dynamic bodies is fixed post-creation, so this
    /// affects the render half and future spawns only.
    pub fn set_body_size(&mut self, size: f32) -> Result<(), SceneError> {
        self.ensure_active()?;
        for body in &mut self.bodies {
            body.set_render_size(size);
        }
        self.config.body_size = size;
        Ok(())
    }

    /// Tear the scene down
    ///
    /// Stops the physics driver explicitly, unsubscribes the orientation
    /// source, disposes every body pairing, and releases the render
    /// collaborator. Idempotent; the `Destroyed` state is terminal.
    pub fn destroy(&mut self) {
        if self.state == SceneState::Destroyed {
            return;
        }

        self.world.stop();

        if let Some(mut orientation) = self.orientation.take() {
            orientation.unsubscribe();
        }

        for body in self.walls.drain(..).chain(self.bodies.drain(..)) {
            body.dispose(&mut self.world);
        }

        self.render = None;
        self.state = SceneState::Destroyed;
        log::info!("scene '{}' destroyed", self.name);
    }

    fn ensure_active(&self) -> Result<(), SceneError> {
        match self.state {
            SceneState::Destroyed => Err(SceneError::Destroyed),
            SceneState::Constructing | SceneState::Active => Ok(()),
        }
    }

    /// Check the registry invariant: every visual body has exactly one
    /// registered physics body and nothing else is registered
    fn verify_registry(&self) -> Result<(), SceneError> {
        let expected = self.walls.len() + self.bodies.len();
        let registered = self.world.body_count();
        if registered != expected {
            log::error!(
                "scene '{}': registry holds {} bodies, scene owns {}",
                self.name,
                registered,
                expected
            );
            return Err(SceneError::OrphanedBody {
                details: format!("registry holds {registered}, scene owns {expected}"),
            });
        }
        for body in self.walls.iter().chain(self.bodies.iter()) {
            if !self.world.contains(body.handle()) {
                return Err(SceneError::OrphanedBody {
                    details: format!("{:?} not registered", body.handle()),
                });
            }
        }
        Ok(())
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        // Teardown must be explicit even when a scene is dropped early
        self.destroy();
    }
}
