//! Math utilities and types
//!
//! Provides fundamental math types for 3D simulation code.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Extension trait for `Mat4` with decomposition and transform helpers
pub trait Mat4Ext {
    /// Extract the translation column of the matrix
    fn translation_part(&self) -> Vec3;

    /// Overwrite the translation column of the matrix
    fn set_translation_part(&mut self, translation: Vec3);

    /// Extract the per-axis scale factors (column magnitudes)
    fn scale_part(&self) -> Vec3;

    /// Extract the rotation as a unit quaternion, with scale divided out
    ///
    /// Falls back to the identity rotation for degenerate (zero-scale)
    /// matrices.
    fn rotation_part(&self) -> Quat;

    /// Scale the matrix's local axes by a uniform factor
    fn scaled_local(&self, factor: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn translation_part(&self) -> Vec3 {
        Vec3::new(self.m14, self.m24, self.m34)
    }

    fn set_translation_part(&mut self, translation: Vec3) {
        self.m14 = translation.x;
        self.m24 = translation.y;
        self.m34 = translation.z;
    }

    fn scale_part(&self) -> Vec3 {
        let scale_x = Vec3::new(self.m11, self.m21, self.m31).magnitude();
        let scale_y = Vec3::new(self.m12, self.m22, self.m32).magnitude();
        let scale_z = Vec3::new(self.m13, self.m23, self.m33).magnitude();
        Vec3::new(scale_x, scale_y, scale_z)
    }

    fn rotation_part(&self) -> Quat {
        const EPSILON: f32 = 1e-6;

        let scale = self.scale_part();
        if scale.x < EPSILON || scale.y < EPSILON || scale.z < EPSILON {
            return Quat::identity();
        }

        // Remove scale from the upper 3x3 block, leaving pure rotation
        let rotation_matrix = Mat3::new(
            self.m11 / scale.x, self.m12 / scale.y, self.m13 / scale.z,
            self.m21 / scale.x, self.m22 / scale.y, self.m23 / scale.z,
            self.m31 / scale.x, self.m32 / scale.y, self.m33 / scale.z,
        );
        Quat::from_matrix(&rotation_matrix)
    }

    fn scaled_local(&self, factor: f32) -> Mat4 {
        self * Mat4::new_scaling(factor)
    }
}
