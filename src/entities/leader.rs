//! Leader entity

use super::EntityCommon;
use crate::types::{Handle, Vector3};

#[derive(Debug, Clone, PartialEq)]
pub struct Leader {
    pub common: EntityCommon,
    /// Dimension style name (code 3)
    pub style_name: String,
    /// Code 71
    pub arrow_enabled: bool,
    /// 0 straight segments, 1 spline (code 72)
    pub path_type: i16,
    /// 0 text, 1 tolerance, 2 block reference, 3 none (code 73)
    pub creation_type: i16,
    /// Code 74
    pub hookline_direction: i16,
    /// Code 75
    pub has_hookline: bool,
    pub text_height: f64,
    pub text_width: f64,
    /// Vertices (WCS), code 10
    pub vertices: Vec<Vector3>,
    /// Code 77
    pub override_color: i16,
    /// Annotation entity (MTEXT, TOLERANCE or INSERT), set once the file
    /// has been read
    pub annotation: Option<Handle>,
    pub normal: Vector3,
    /// Code 211
    pub horizontal_direction: Vector3,
    /// Code 212
    pub block_offset: Vector3,
    /// Code 213
    pub annotation_offset: Vector3,
    /// DIMTAD override found in the `ACAD` extended data
    pub text_vertical_position: Option<i16>,
}

impl Leader {
    pub fn new() -> Self {
        Leader {
            common: EntityCommon::new(),
            style_name: "Standard".to_string(),
            arrow_enabled: true,
            path_type: 0,
            creation_type: 3,
            hookline_direction: 0,
            has_hookline: false,
            text_height: 0.0,
            text_width: 0.0,
            vertices: Vec::new(),
            override_color: 256,
            annotation: None,
            normal: Vector3::UNIT_Z,
            horizontal_direction: Vector3::UNIT_X,
            block_offset: Vector3::ZERO,
            annotation_offset: Vector3::ZERO,
            text_vertical_position: None,
        }
    }
}

impl Default for Leader {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Leader, "LEADER");
