//! Line entity

use super::EntityCommon;
use crate::types::Vector3;

/// A line segment, endpoints in world coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub common: EntityCommon,
    pub start: Vector3,
    pub end: Vector3,
    pub thickness: f64,
    pub normal: Vector3,
}

impl Line {
    pub fn new() -> Self {
        Line {
            common: EntityCommon::new(),
            start: Vector3::ZERO,
            end: Vector3::ZERO,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Line, "LINE");
