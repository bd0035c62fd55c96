//! Multiline entity

use super::EntityCommon;
use crate::types::{Handle, Vector3};

/// Parameters of one style element at a vertex
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MLineSegment {
    /// Code 74 count, then code 41
    pub parameters: Vec<f64>,
    /// Code 75 count, then code 42
    pub area_fill_parameters: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MLineVertex {
    /// Code 11
    pub position: Vector3,
    /// Code 12
    pub direction: Vector3,
    /// Code 13
    pub miter: Vector3,
    pub segments: Vec<MLineSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MLine {
    pub common: EntityCommon,
    /// Code 2
    pub style_name: String,
    /// Multiline style object, set once the file has been read
    pub style: Option<Handle>,
    /// Code 40
    pub scale: f64,
    /// 0 top, 1 zero, 2 bottom (code 70)
    pub justification: i16,
    /// Code 71
    pub flags: i16,
    /// Code 73
    pub style_element_count: i16,
    /// Code 10
    pub start_point: Vector3,
    pub normal: Vector3,
    pub vertices: Vec<MLineVertex>,
}

impl MLine {
    pub fn new() -> Self {
        MLine {
            common: EntityCommon::new(),
            style_name: "Standard".to_string(),
            style: None,
            scale: 1.0,
            justification: 0,
            flags: 1,
            style_element_count: 0,
            start_point: Vector3::ZERO,
            normal: Vector3::UNIT_Z,
            vertices: Vec::new(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.flags & 2 != 0
    }
}

impl Default for MLine {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(MLine, "MLINE");
