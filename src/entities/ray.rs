//! Ray and construction line entities

use super::EntityCommon;
use crate::types::Vector3;

/// A half-infinite line (RAY); XLINE records share the layout
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    pub common: EntityCommon,
    pub base_point: Vector3,
    /// Unit direction (WCS)
    pub direction: Vector3,
}

/// An infinite construction line
pub type XLine = Ray;

impl Ray {
    pub fn new() -> Self {
        Ray {
            common: EntityCommon::new(),
            base_point: Vector3::ZERO,
            direction: Vector3::UNIT_X,
        }
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Ray, "RAY");
