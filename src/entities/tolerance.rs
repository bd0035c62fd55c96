//! Geometric tolerance entity

use super::EntityCommon;
use crate::types::Vector3;

#[derive(Debug, Clone, PartialEq)]
pub struct Tolerance {
    pub common: EntityCommon,
    /// Dimension style name (code 3)
    pub style_name: String,
    pub insertion_point: Vector3,
    /// X axis direction (code 11)
    pub direction: Vector3,
    pub normal: Vector3,
    /// Feature control frame string (code 1)
    pub text: String,
}

impl Tolerance {
    pub fn new() -> Self {
        Tolerance {
            common: EntityCommon::new(),
            style_name: "Standard".to_string(),
            insertion_point: Vector3::ZERO,
            direction: Vector3::UNIT_X,
            normal: Vector3::UNIT_Z,
            text: String::new(),
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Tolerance, "TOLERANCE");
