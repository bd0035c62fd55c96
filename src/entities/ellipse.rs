//! Ellipse entity

use super::EntityCommon;
use crate::types::{transform, CoordinateFrame, Vector3};

/// An ellipse or elliptical arc
///
/// Unlike circles and arcs, the center and major axis are stored in world
/// coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub common: EntityCommon,
    /// Center point (WCS)
    pub center: Vector3,
    /// Endpoint of the major axis relative to the center (WCS)
    pub major_axis: Vector3,
    pub normal: Vector3,
    /// Minor to major axis ratio, in (0, 1]
    pub minor_axis_ratio: f64,
    /// Start parameter in radians
    pub start_parameter: f64,
    /// End parameter in radians
    pub end_parameter: f64,
}

impl Ellipse {
    pub fn new() -> Self {
        Ellipse {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            major_axis: Vector3::UNIT_X,
            normal: Vector3::UNIT_Z,
            minor_axis_ratio: 1.0,
            start_parameter: 0.0,
            end_parameter: std::f64::consts::TAU,
        }
    }

    pub fn major_radius(&self) -> f64 {
        self.major_axis.length()
    }

    pub fn minor_radius(&self) -> f64 {
        self.major_radius() * self.minor_axis_ratio
    }

    /// Center point in the entity's object coordinate system.
    pub fn local_center(&self) -> Vector3 {
        transform(self.center, self.normal, CoordinateFrame::World, CoordinateFrame::Local)
    }
}

impl Default for Ellipse {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Ellipse, "ELLIPSE");
