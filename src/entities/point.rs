//! Point entity

use super::EntityCommon;
use crate::types::Vector3;

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub common: EntityCommon,
    /// Location (WCS)
    pub location: Vector3,
    pub thickness: f64,
    pub normal: Vector3,
    /// Angle of the OCS X axis for PDMODE symbols (code 50)
    pub x_axis_angle: f64,
}

impl Point {
    pub fn new() -> Self {
        Point {
            common: EntityCommon::new(),
            location: Vector3::ZERO,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
            x_axis_angle: 0.0,
        }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Point, "POINT");
