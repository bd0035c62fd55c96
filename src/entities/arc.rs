//! Arc entity

use super::EntityCommon;
use crate::types::{transform, CoordinateFrame, Vector3};

/// A circular arc
///
/// Like [`Circle`](super::Circle), the center is in the object coordinate
/// system. Angles are in degrees, counter-clockwise about `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub common: EntityCommon,
    /// Center point (OCS)
    pub center: Vector3,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub thickness: f64,
    pub normal: Vector3,
}

impl Arc {
    pub fn new() -> Self {
        Arc {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            radius: 1.0,
            start_angle: 0.0,
            end_angle: 360.0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }

    /// Center point in world coordinates.
    pub fn world_center(&self) -> Vector3 {
        transform(self.center, self.normal, CoordinateFrame::Local, CoordinateFrame::World)
    }

    /// Swept angle in degrees, in [0, 360).
    pub fn sweep(&self) -> f64 {
        (self.end_angle - self.start_angle).rem_euclid(360.0)
    }
}

impl Default for Arc {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Arc, "ARC");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_wraps() {
        let mut arc = Arc::new();
        arc.start_angle = 270.0;
        arc.end_angle = 90.0;
        assert_eq!(arc.sweep(), 180.0);
    }
}
