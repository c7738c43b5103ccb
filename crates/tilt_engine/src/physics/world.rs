//! Physics world: body registry, gravity, and the step loop

use slotmap::SlotMap;

use crate::foundation::math::Vec2;
use crate::physics::body::{BodyKind, RigidBody};
use crate::physics::runner::StepRunner;

slotmap::new_key_type! {
    /// Opaque handle to a body stored in a [`PhysicsWorld`]
    ///
    /// Held exclusively by the paired visual body for that body's whole
    /// lifetime; the handle is the identity the registry's set semantics are
    /// defined over.
    pub struct BodyHandle;
}

/// Base gravitational acceleration in pixels per second squared, reached when
/// the gravity vector has magnitude 1 and scale 1
const GRAVITY_ACCEL: f32 = 980.0;

/// Gravity vector consumed by the step loop
///
/// `x` and `y` are normalized directions in `[-1, 1]` (physics space, so
/// positive `y` pulls render-space downward); `scale` is a global multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    /// Global strength multiplier
    pub scale: f32,
    /// Horizontal direction component
    pub x: f32,
    /// Vertical direction component (physics space)
    pub y: f32,
}

impl Default for Gravity {
    fn default() -> Self {
        // Straight down at full strength
        Self {
            scale: 1.0,
            x: 0.0,
            y: 1.0,
        }
    }
}

/// Owner of the simulation: body registry, gravity vector, and step driver
///
/// The registry has set semantics keyed by [`BodyHandle`]; insertion order is
/// irrelevant. Removal of an absent handle is a no-op. Stepping is driven by
/// the embedded [`StepRunner`]: `run_continuous` starts it, `pump` advances
/// it, and stopping is always explicit.
pub struct PhysicsWorld {
    bodies: SlotMap<BodyHandle, RigidBody>,
    gravity: Gravity,
    runner: StepRunner,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create an empty world with default gravity and a stopped driver
    pub fn new() -> Self {
        Self {
            bodies: SlotMap::with_key(),
            gravity: Gravity::default(),
            runner: StepRunner::default(),
        }
    }

    /// Create a world with a specific fixed timestep for the driver
    pub fn with_fixed_dt(fixed_dt: f32) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            gravity: Gravity::default(),
            runner: StepRunner::new(fixed_dt),
        }
    }

    /// Register a body and return its handle
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = self.bodies.insert(body);
        log::debug!("body {:?} added, {} registered", handle, self.bodies.len());
        handle
    }

    /// Remove a body from the registry
    ///
    /// Idempotent: removing a handle that is not present is a no-op.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let removed = self.bodies.remove(handle);
        if removed.is_some() {
            log::debug!("body {:?} removed, {} registered", handle, self.bodies.len());
        }
        removed
    }

    /// Whether a handle is currently registered
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains_key(handle)
    }

    /// Number of registered bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Shared access to a body
    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    /// Mutable access to a body
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    /// Current gravity vector
    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    /// Update the gravity vector consumed by the next step
    ///
    /// Takes effect on the following step; already-simulated motion is never
    /// revisited.
    pub fn set_gravity(&mut self, scale: f32, x: f32, y: f32) {
        self.gravity = Gravity { scale, x, y };
    }

    /// Start the continuous step driver
    pub fn run_continuous(&mut self) {
        self.runner.start();
        log::info!(
            "physics driver started at {:.1} Hz",
            1.0 / self.runner.fixed_dt()
        );
    }

    /// Stop the step driver, discarding accumulated time
    ///
    /// Must be called explicitly on teardown; nothing stops the driver
    /// implicitly.
    pub fn stop(&mut self) {
        if self.runner.is_running() {
            self.runner.stop();
            log::info!("physics driver stopped");
        }
    }

    /// Whether the step driver is running
    pub fn is_running(&self) -> bool {
        self.runner.is_running()
    }

    /// Feed elapsed wall time to the driver, advancing zero or more steps
    ///
    /// Returns the number of steps taken. Callers read body positions only
    /// between pumps; steps themselves are synchronous and bounded.
    pub fn pump(&mut self, elapsed: f32) -> u32 {
        let steps = self.runner.pump(elapsed);
        let dt = self.runner.fixed_dt();
        for _ in 0..steps {
            self.step(dt);
        }
        steps
    }

    /// Advance the simulation by one step of `dt` seconds
    ///
    /// Semi-implicit Euler over every dynamic body, then penetration
    /// resolution against every static body.
    pub fn step(&mut self, dt: f32) {
        let accel = Vec2::new(self.gravity.x, self.gravity.y) * (GRAVITY_ACCEL * self.gravity.scale);

        for body in self.bodies.values_mut() {
            if body.is_static() {
                continue;
            }
            body.velocity += accel * dt;
            body.position += body.velocity * dt;
            body.angle += body.angular_velocity * dt;
        }

        self.resolve_static_contacts();
    }

    /// Push dynamic bodies out of static geometry
    ///
    /// Axis-aligned minimum-penetration resolution; the velocity component
    /// driving the body into the surface is cancelled. Dynamic-versus-dynamic
    /// contacts are the collaborator engine's concern and are not handled.
    fn resolve_static_contacts(&mut self) {
        let statics: Vec<(Vec2, Vec2)> = self
            .bodies
            .values()
            .filter(|b| b.is_static())
            .map(|b| (b.physics_position(), b.half_extents()))
            .collect();

        for body in self.bodies.values_mut() {
            if body.is_static() {
                continue;
            }
            let half = body.half_extents();
            for &(center, extent) in &statics {
                let delta = body.position - center;
                let overlap_x = half.x + extent.x - delta.x.abs();
                let overlap_y = half.y + extent.y - delta.y.abs();
                if overlap_x <= 0.0 || overlap_y <= 0.0 {
                    continue;
                }
                if overlap_x < overlap_y {
                    let sign = delta.x.signum();
                    body.position.x += sign * overlap_x;
                    if body.velocity.x.signum() != sign {
                        body.velocity.x = 0.0;
                    }
                } else {
                    let sign = delta.y.signum();
                    body.position.y += sign * overlap_y;
                    if body.velocity.y.signum() != sign {
                        body.velocity.y = 0.0;
                    }
                }
            }
        }
    }
}
