//! Solid and trace entities

use super::EntityCommon;
use crate::types::Vector3;

/// A filled quadrilateral, shared by SOLID and TRACE records
///
/// Corners are in the object coordinate system.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    pub common: EntityCommon,
    /// Corners (OCS), codes 10-13
    pub corners: [Vector3; 4],
    pub thickness: f64,
    pub normal: Vector3,
}

impl Solid {
    pub fn new() -> Self {
        Solid {
            common: EntityCommon::new(),
            corners: [Vector3::ZERO; 4],
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }
}

impl Default for Solid {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Solid, "SOLID");
