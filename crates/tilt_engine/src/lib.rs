//! # Tilt Engine
//!
//! A 2D physics scene engine that keeps a rigid-body simulation and its
//! render representation synchronized.
//!
//! ## Features
//!
//! - **Scene Lifecycle**: Explicit construct/active/destroy state machine
//! - **Dual Representation**: Every body pairs one physics shape with one
//!   render mesh, synchronized each frame
//! - **Fixed-Timestep Physics**: Accumulator-driven stepping decoupled from
//!   the frame cadence
//! - **Orientation Gravity**: Device tilt mapped to the gravity vector
//! - **Pluggable Collaborators**: Layout, rendering, and input arrive
//!   through narrow traits, so hosts decide the platform binding
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tilt_engine::prelude::*;
//!
//! fn run(context: SceneContext, population: Box<dyn ScenePopulation>)
//!     -> Result<(), SceneError>
//! {
//!     let mut scene = Scene::new("main", context, population, SceneConfig::default())?;
//!     scene.pump_physics(1.0 / 60.0)?;
//!     scene.update()?;
//!     scene.destroy();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod display;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        display::{DisplayError, DisplaySurface, LayoutProbe, SurfaceMetrics},
        foundation::{
            logging::DebugSink,
            math::{Vec2, Vec3},
            time::Timer,
        },
        input::{InputError, OrientationSample, OrientationSource},
        physics::{BodyHandle, BodyKind, Gravity, PhysicsWorld},
        render::{Color, MeshInstance, OrthographicCamera, RenderError, RenderSurface},
        scene::{
            BodySpawn, Scene, SceneConfig, SceneContext, SceneError, ScenePopulation,
            SceneState, VisualBody, WallPlacement, WallSpec,
        },
    };
}
