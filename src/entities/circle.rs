//! Circle entity

use super::EntityCommon;
use crate::types::{transform, CoordinateFrame, Vector3};

/// A circle entity
///
/// The center is stored in the object coordinate system of `normal`, as
/// written in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub common: EntityCommon,
    /// Center point (OCS)
    pub center: Vector3,
    pub radius: f64,
    pub thickness: f64,
    pub normal: Vector3,
}

impl Circle {
    pub fn new() -> Self {
        Circle {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            radius: 1.0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }

    /// Center point in world coordinates.
    pub fn world_center(&self) -> Vector3 {
        transform(self.center, self.normal, CoordinateFrame::Local, CoordinateFrame::World)
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Circle, "CIRCLE");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_center_flipped_normal() {
        let mut circle = Circle::new();
        circle.center = Vector3::new(1.0, 2.0, 3.0);
        circle.normal = Vector3::new(0.0, 0.0, -1.0);
        assert!(circle
            .world_center()
            .approx_eq(&Vector3::new(-1.0, 2.0, -3.0), 1e-12));
    }
}
