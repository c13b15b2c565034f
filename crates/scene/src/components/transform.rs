use foundation::math::{Quat, Vec3};

/// Pose of an entity in the overlay's scene-local frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f64,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn with_rotation(self, rotation: Quat) -> Self {
        Self { rotation, ..self }
    }

    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    /// Map a point from the entity's local space into the scene.
    pub fn apply(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation.rotate(local * self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
