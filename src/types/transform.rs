//! Object coordinate system (OCS) transforms
//!
//! Planar entities store some of their geometry in a frame derived from their
//! extrusion direction (code 210/220/230) by the arbitrary axis algorithm.

use crate::types::Vector3;
use std::ops::Mul;

/// Below this magnitude on both X and Y, a normal counts as parallel to Z.
pub const ARBITRARY_AXIS_THRESHOLD: f64 = 1.0 / 64.0;

/// The frame a point is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateFrame {
    /// World coordinate system
    World,
    /// Object coordinate system of a given normal
    Local,
}

/// 3x3 rotation matrix, row-major
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    pub m: [[f64; 3]; 3],
}

impl Matrix3 {
    pub fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// OCS to WCS rotation for an extrusion direction.
    ///
    /// The columns are the OCS X, Y and Z axes in world coordinates. A zero
    /// normal is treated as world Z.
    pub fn arbitrary_axis(normal: Vector3) -> Self {
        let normal = if normal.is_zero() {
            Vector3::UNIT_Z
        } else {
            normal.normalize()
        };

        let reference = if normal.x.abs() < ARBITRARY_AXIS_THRESHOLD
            && normal.y.abs() < ARBITRARY_AXIS_THRESHOLD
        {
            Vector3::UNIT_Y
        } else {
            Vector3::UNIT_Z
        };

        let x_dir = reference.cross(&normal).normalize();
        let y_dir = normal.cross(&x_dir).normalize();

        Self {
            m: [
                [x_dir.x, y_dir.x, normal.x],
                [x_dir.y, y_dir.y, normal.y],
                [x_dir.z, y_dir.z, normal.z],
            ],
        }
    }

    pub fn transpose(&self) -> Self {
        let m = &self.m;
        Self {
            m: [
                [m[0][0], m[1][0], m[2][0]],
                [m[0][1], m[1][1], m[2][1]],
                [m[0][2], m[1][2], m[2][2]],
            ],
        }
    }

    pub fn transform_point(&self, v: Vector3) -> Vector3 {
        let m = &self.m;
        Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Self::Output {
        self.transform_point(v)
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Convert a point between the world frame and the OCS of `normal`.
///
/// World to local applies the transpose of the local to world rotation, so
/// the two directions are exact inverses of each other.
pub fn transform(
    point: Vector3,
    normal: Vector3,
    from: CoordinateFrame,
    to: CoordinateFrame,
) -> Vector3 {
    match (from, to) {
        (CoordinateFrame::Local, CoordinateFrame::World) => {
            Matrix3::arbitrary_axis(normal) * point
        }
        (CoordinateFrame::World, CoordinateFrame::Local) => {
            Matrix3::arbitrary_axis(normal).transpose() * point
        }
        _ => point,
    }
}
