//! Oriented bounding boxes and intersection testing
//!
//! Boxes are stored in local (model) space and transformed to world space
//! on-demand at test time; nothing here is cached between frames.

use crate::foundation::math::{Mat4, Mat4Ext, Point3, Quat, Vec3};

const EPSILON: f32 = 1e-6;

/// An oriented bounding box: center, half-extents, and orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb {
    /// Box center
    pub center: Vec3,
    /// Half the box's edge length along each local axis
    pub half_extents: Vec3,
    /// Orientation of the local axes
    pub rotation: Quat,
}

impl Default for Obb {
    /// A degenerate zero-extent box at the origin
    fn default() -> Self {
        Self {
            center: Vec3::zeros(),
            half_extents: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

impl Obb {
    /// Creates a new oriented box
    #[must_use]
    pub fn new(center: Vec3, half_extents: Vec3, rotation: Quat) -> Self {
        Self {
            center,
            half_extents,
            rotation,
        }
    }

    /// Creates an axis-aligned box
    #[must_use]
    pub fn axis_aligned(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center, half_extents, Quat::identity())
    }

    /// The box's local axes in world space
    #[must_use]
    pub fn axes(&self) -> [Vec3; 3] {
        let rotation = self.rotation.to_rotation_matrix();
        [
            rotation * Vec3::x(),
            rotation * Vec3::y(),
            rotation * Vec3::z(),
        ]
    }

    /// Derive the world-space box for a local box under `matrix`
    ///
    /// Half-extents are scaled by the matrix's per-axis scale, the center is
    /// mapped through the full matrix, and the matrix's rotation composes
    /// onto the box's own orientation.
    #[must_use]
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            center: matrix.transform_point(&Point3::from(self.center)).coords,
            half_extents: self.half_extents.component_mul(&matrix.scale_part()),
            rotation: matrix.rotation_part() * self.rotation,
        }
    }

    /// Radius of this box's projection onto a unit axis
    fn projected_reach(&self, axis: &Vec3) -> f32 {
        let axes = self.axes();
        self.half_extents.x * axes[0].dot(axis).abs()
            + self.half_extents.y * axes[1].dot(axis).abs()
            + self.half_extents.z * axes[2].dot(axis).abs()
    }

    /// Separating-axis intersection test against another oriented box
    ///
    /// Tests the 15 candidate axes (3 + 3 face normals, 9 edge-edge cross
    /// products); near-zero cross products from parallel edge pairs are
    /// skipped. Symmetric: `a.intersects(&b) == b.intersects(&a)`. Touching
    /// boxes count as intersecting.
    #[must_use]
    pub fn intersects(&self, other: &Obb) -> bool {
        let axes_a = self.axes();
        let axes_b = other.axes();
        let delta = other.center - self.center;

        let mut candidates = [Vec3::zeros(); 15];
        candidates[..3].copy_from_slice(&axes_a);
        candidates[3..6].copy_from_slice(&axes_b);
        let mut index = 6;
        for axis_a in &axes_a {
            for axis_b in &axes_b {
                candidates[index] = axis_a.cross(axis_b);
                index += 1;
            }
        }

        for candidate in &candidates {
            let length_squared = candidate.magnitude_squared();
            if length_squared < EPSILON {
                continue; // Degenerate axis (parallel edges), skip
            }
            let axis = candidate / length_squared.sqrt();

            let distance = delta.dot(&axis).abs();
            if distance > self.projected_reach(&axis) + other.projected_reach(&axis) {
                return false; // Separating axis found
            }
        }

        // No separating axis = boxes intersect
        true
    }

    /// Closest point on (or in) the box to a world-space point
    ///
    /// Clamps the point into the box's local frame; a point inside the box
    /// maps to itself.
    #[must_use]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let offset = point - self.center;
        let mut closest = self.center;
        for (axis, extent) in self.axes().iter().zip([
            self.half_extents.x,
            self.half_extents.y,
            self.half_extents.z,
        ]) {
            closest += axis * offset.dot(axis).clamp(-extent, extent);
        }
        closest
    }
}
