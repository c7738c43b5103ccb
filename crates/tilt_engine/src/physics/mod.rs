//! 2D rigid body simulation layer
//!
//! Wraps an intentionally minimal rectangle simulation behind the narrow
//! interface the scene layer consumes: body creation, position/size mutation,
//! a registry with set semantics, a gravity vector, and a fixed-step driver.
//! Broad-phase collision, constraint solving, and restitution are the domain
//! of a full physics collaborator and are not implemented here; the built-in
//! provider integrates gravity and resolves dynamic-versus-static contacts,
//! which is all the scene synchronization layer requires.
//!
//! Coordinate convention: physics space has its Y axis inverted relative to
//! render space. Every public mutator takes render-space input and performs
//! the negation internally; every render-facing read performs it again.

pub mod body;
pub mod runner;
pub mod world;

pub use body::{BodyKind, RigidBody};
pub use runner::StepRunner;
pub use world::{BodyHandle, Gravity, PhysicsWorld};

use thiserror::Error;

/// Physics layer errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsError {
    /// Operation not supported for the body's classification
    ///
    /// Static/dynamic classification is fixed at creation; in particular,
    /// dynamic bodies have fixed physics geometry after creation.
    #[error("unsupported operation for {0} body")]
    UnsupportedOperation(&'static str),
}
