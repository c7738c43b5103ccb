//! Visual body: one render mesh paired with one physics body
//!
//! Composition, not inheritance: a [`VisualBody`] holds a [`MeshInstance`]
//! and the exclusive [`BodyHandle`] of its physics half. Every operation that
//! touches one half touches the other in the same call, so no observable
//! state exists where the two disagree.

use crate::foundation::math::Vec3;
use crate::physics::{BodyHandle, BodyKind, PhysicsWorld, RigidBody};
use crate::render::{Color, MeshInstance};
use crate::scene::SceneError;

/// Renderable entity owning both halves of the render/physics pairing
///
/// The handle is exclusive: no other code path may remove or mutate the
/// underlying physics body, and [`VisualBody::dispose`] is the only way to
/// release either half.
#[derive(Debug)]
pub struct VisualBody {
    mesh: MeshInstance,
    handle: BodyHandle,
    kind: BodyKind,
}

impl VisualBody {
    /// Create a dynamic cube and register its physics body
    ///
    /// Mesh and body are created in one operation at the same render-space
    /// position.
    pub fn new_dynamic(
        world: &mut PhysicsWorld,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    ) -> Self {
        let handle = world.add_body(RigidBody::rectangle(x, y, size, size, BodyKind::Dynamic));
        let mut mesh = MeshInstance::cube(size, color);
        mesh.position = Vec3::new(x, y, 0.0);
        Self {
            mesh,
            handle,
            kind: BodyKind::Dynamic,
        }
    }

    /// Create a static wall as a unit box at the origin
    ///
    /// Walls take their real position and size from the population's layout
    /// on the first resize.
    pub fn new_static(world: &mut PhysicsWorld, color: Color) -> Self {
        let handle = world.add_body(RigidBody::rectangle(0.0, 0.0, 1.0, 1.0, BodyKind::Static));
        Self {
            mesh: MeshInstance::unit_box(color),
            handle,
            kind: BodyKind::Static,
        }
    }

    /// Physics handle of this body
    pub fn handle(&self) -> BodyHandle {
        self.handle
    }

    /// Whether this is a static (layout) body
    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    /// Render-side state for drawing
    pub fn mesh(&self) -> &MeshInstance {
        &self.mesh
    }

    /// Move both the render transform and the physics body
    ///
    /// Atomic with respect to observers: by the time this returns, both
    /// halves hold the new render-space position.
    pub fn set_position(
        &mut self,
        world: &mut PhysicsWorld,
        x: f32,
        y: f32,
    ) -> Result<(), SceneError> {
        let body = world
            .body_mut(self.handle)
            .ok_or_else(|| self.orphaned("set_position"))?;
        body.set_position(x, y);
        self.mesh.position.x = x;
        self.mesh.position.y = y;
        Ok(())
    }

    /// Resize both render scale and physics geometry (static bodies only)
    pub fn set_size(
        &mut self,
        world: &mut PhysicsWorld,
        width: f32,
        height: f32,
    ) -> Result<(), SceneError> {
        let body = world
            .body_mut(self.handle)
            .ok_or_else(|| self.orphaned("set_size"))?;
        body.set_size(width, height)?;
        self.mesh.scale = Vec3::new(width, height, 1.0);
        Ok(())
    }

    /// Rescale only the render geometry of a dynamic body
    ///
    /// Dynamic physics geometry is fixed post-creation, so runtime size
    /// tweaks affect the visual half only.
    pub fn set_render_size(&mut self, size: f32) {
        if self.kind == BodyKind::Dynamic {
            self.mesh.scale = Vec3::new(size, size, size);
        }
    }

    /// Pull the physics pose into the render transform
    ///
    /// Applies the Y negation and the rotation negation of the physics to
    /// render mapping. Called once per frame between physics steps.
    pub fn sync_from_physics(&mut self, world: &PhysicsWorld) -> Result<(), SceneError> {
        let body = world
            .body(self.handle)
            .ok_or_else(|| self.orphaned("sync_from_physics"))?;
        let position = body.render_position();
        self.mesh.position.x = position.x;
        self.mesh.position.y = position.y;
        self.mesh.rotation_z = body.render_rotation();
        Ok(())
    }

    /// Release both halves in one operation
    ///
    /// Removes the physics body from the world and consumes the render half,
    /// so neither an orphaned physics body nor a dangling render handle can
    /// remain.
    pub fn dispose(self, world: &mut PhysicsWorld) {
        world.remove_body(self.handle);
        // Mesh resources (geometry/material) are released with `self`
    }

    fn orphaned(&self, operation: &str) -> SceneError {
        log::error!(
            "orphaned body: {:?} missing from physics registry during {}",
            self.handle,
            operation
        );
        SceneError::OrphanedBody {
            details: format!("{:?} missing during {}", self.handle, operation),
        }
    }
}
