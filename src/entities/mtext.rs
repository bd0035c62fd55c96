//! Multi-line text entity

use super::EntityCommon;
use crate::types::Vector3;

#[derive(Debug, Clone, PartialEq)]
pub struct MText {
    pub common: EntityCommon,
    /// Text with its formatting codes; code 3 chunks followed by code 1
    pub value: String,
    /// Insertion point (WCS)
    pub insertion_point: Vector3,
    pub height: f64,
    /// Reference rectangle width (code 41)
    pub rectangle_width: f64,
    /// Code 46
    pub rectangle_height: f64,
    /// 1 top left ... 9 bottom right (code 71)
    pub attachment_point: i16,
    /// Code 72
    pub drawing_direction: i16,
    pub style: String,
    pub normal: Vector3,
    /// X axis direction (WCS), code 11
    pub x_direction: Vector3,
    /// Rotation in degrees (code 50)
    pub rotation: f64,
    pub line_spacing_style: i16,
    pub line_spacing_factor: f64,
}

impl MText {
    pub fn new() -> Self {
        MText {
            common: EntityCommon::new(),
            value: String::new(),
            insertion_point: Vector3::ZERO,
            height: 2.5,
            rectangle_width: 0.0,
            rectangle_height: 0.0,
            attachment_point: 1,
            drawing_direction: 1,
            style: "Standard".to_string(),
            normal: Vector3::UNIT_Z,
            x_direction: Vector3::UNIT_X,
            rotation: 0.0,
            line_spacing_style: 1,
            line_spacing_factor: 1.0,
        }
    }
}

impl Default for MText {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(MText, "MTEXT");
