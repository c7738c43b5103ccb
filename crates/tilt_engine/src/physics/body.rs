//! Rectangular rigid body
//!
//! Pure data plus the coordinate-mapping and rescale operations whose
//! correctness the scene layer depends on. Stepping is owned by
//! [`crate::physics::PhysicsWorld`], never by the body itself.

use crate::foundation::math::Vec2;
use crate::physics::PhysicsError;

/// Static/dynamic classification, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Affected by gravity and contacts; physics geometry fixed post-creation
    Dynamic,
    /// Immovable; only its size is mutable
    Static,
}

/// Rectangular rigid body in physics space
///
/// Position and angle are stored in physics space (Y inverted relative to
/// render space). Geometry is modelled the way the underlying engine scales
/// rectangles: a unit rectangle with a multiplicative scale applied, so
/// rescaling must divide out the previous scale before applying the new one.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) angle: f32,
    pub(crate) angular_velocity: f32,
    /// Multiplicative scale currently applied to the unit rectangle
    applied_scale: Vec2,
    kind: BodyKind,
}

impl RigidBody {
    /// Create a rectangular body at a render-space position
    ///
    /// The Y coordinate is negated on the way in; this negation is applied at
    /// every crossing between render space and physics space.
    pub fn rectangle(x: f32, y: f32, width: f32, height: f32, kind: BodyKind) -> Self {
        Self {
            position: Vec2::new(x, -y),
            velocity: Vec2::zeros(),
            angle: 0.0,
            angular_velocity: 0.0,
            applied_scale: Vec2::new(width, height),
            kind,
        }
    }

    /// Body classification
    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Whether the body is static
    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    /// Set the body position from render-space coordinates
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, -y);
    }

    /// Position in physics space
    pub fn physics_position(&self) -> Vec2 {
        self.position
    }

    /// Position mapped back to render space
    pub fn render_position(&self) -> Vec2 {
        Vec2::new(self.position.x, -self.position.y)
    }

    /// Angle in physics space (radians)
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Rotation mapped back to render space (negated angle)
    pub fn render_rotation(&self) -> f32 {
        -self.angle
    }

    /// Current physics geometry (width, height)
    pub fn size(&self) -> Vec2 {
        self.applied_scale
    }

    /// Half extents of the rectangle, used by contact resolution
    pub fn half_extents(&self) -> Vec2 {
        self.applied_scale / 2.0
    }

    /// Rescale a static body's geometry
    ///
    /// Scaling is multiplicative, not absolute: the previous scale factor is
    /// divided out before the new one is applied, so successive rescales
    /// compose without drift. Dynamic bodies have fixed geometry and reject
    /// the call.
    pub fn set_size(&mut self, width: f32, height: f32) -> Result<(), PhysicsError> {
        if self.kind == BodyKind::Dynamic {
            return Err(PhysicsError::UnsupportedOperation("dynamic"));
        }
        let prev = self.applied_scale;
        self.scale(1.0 / prev.x, 1.0 / prev.y);
        self.scale(width, height);
        Ok(())
    }

    /// Apply a multiplicative scale factor to the geometry
    fn scale(&mut self, fx: f32, fy: f32) {
        self.applied_scale.x *= fx;
        self.applied_scale.y *= fy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_creation_negates_y() {
        let body = RigidBody::rectangle(10.0, 20.0, 30.0, 30.0, BodyKind::Dynamic);
        assert_relative_eq!(body.physics_position().y, -20.0);
        assert_relative_eq!(body.render_position().y, 20.0);
        assert_relative_eq!(body.render_position().x, 10.0);
    }

    #[test]
    fn test_position_mirroring_holds_across_updates() {
        let mut body = RigidBody::rectangle(0.0, 0.0, 10.0, 10.0, BodyKind::Dynamic);
        for (x, y) in [(1.0, 2.0), (-3.5, 7.25), (100.0, -40.0)] {
            body.set_position(x, y);
            assert_relative_eq!(body.physics_position().x, x);
            assert_relative_eq!(body.physics_position().y, -y);
            assert_relative_eq!(body.render_position().y, y);
        }
    }

    #[test]
    fn test_rotation_mirrors_negated() {
        let mut body = RigidBody::rectangle(0.0, 0.0, 10.0, 10.0, BodyKind::Dynamic);
        body.angle = 0.75;
        assert_relative_eq!(body.render_rotation(), -0.75);
    }

    #[test]
    fn test_successive_rescales_compose_without_drift() {
        let mut resized_twice = RigidBody::rectangle(0.0, 0.0, 1.0, 1.0, BodyKind::Static);
        resized_twice.set_size(40.0, 300.0).unwrap();
        resized_twice.set_size(15.0, 720.0).unwrap();

        let mut resized_once = RigidBody::rectangle(0.0, 0.0, 1.0, 1.0, BodyKind::Static);
        resized_once.set_size(15.0, 720.0).unwrap();

        assert_relative_eq!(resized_twice.size().x, resized_once.size().x, epsilon = 1e-4);
        assert_relative_eq!(resized_twice.size().y, resized_once.size().y, epsilon = 1e-4);
    }

    #[test]
    fn test_dynamic_rescale_rejected() {
        let mut body = RigidBody::rectangle(0.0, 0.0, 30.0, 30.0, BodyKind::Dynamic);
        assert_eq!(
            body.set_size(50.0, 50.0),
            Err(PhysicsError::UnsupportedOperation("dynamic"))
        );
        // Geometry untouched by the rejected call
        assert_relative_eq!(body.size().x, 30.0);
    }
}
