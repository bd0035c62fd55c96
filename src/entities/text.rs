//! Single-line text entity

use super::EntityCommon;
use crate::types::Vector3;

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub common: EntityCommon,
    pub value: String,
    /// First alignment point (OCS), code 10
    pub insertion_point: Vector3,
    /// Second alignment point (OCS), code 11, for non-default alignments
    pub alignment_point: Option<Vector3>,
    pub height: f64,
    /// Rotation in degrees
    pub rotation: f64,
    pub width_factor: f64,
    /// Oblique angle in degrees
    pub oblique_angle: f64,
    pub style: String,
    /// Code 71
    pub generation_flags: i16,
    /// Code 72
    pub horizontal_alignment: i16,
    /// Code 73
    pub vertical_alignment: i16,
    pub thickness: f64,
    pub normal: Vector3,
}

impl Text {
    pub const DEFAULT_HEIGHT: f64 = 2.5;

    pub fn new() -> Self {
        Text {
            common: EntityCommon::new(),
            value: String::new(),
            insertion_point: Vector3::ZERO,
            alignment_point: None,
            height: Self::DEFAULT_HEIGHT,
            rotation: 0.0,
            width_factor: 1.0,
            oblique_angle: 0.0,
            style: "Standard".to_string(),
            generation_flags: 0,
            horizontal_alignment: 0,
            vertical_alignment: 0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Text, "TEXT");
