//! 3D face entity

use super::EntityCommon;
use crate::types::Vector3;
use bitflags::bitflags;

bitflags! {
    /// Edges that are not drawn (code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InvisibleEdgeFlags: i16 {
        const FIRST = 1;
        const SECOND = 2;
        const THIRD = 4;
        const FOURTH = 8;
    }
}

/// A three or four sided face; a triangle repeats its third corner
#[derive(Debug, Clone, PartialEq)]
pub struct Face3D {
    pub common: EntityCommon,
    /// Corners (WCS), codes 10-13
    pub corners: [Vector3; 4],
    pub invisible_edges: InvisibleEdgeFlags,
}

impl Face3D {
    pub fn new() -> Self {
        Face3D {
            common: EntityCommon::new(),
            corners: [Vector3::ZERO; 4],
            invisible_edges: InvisibleEdgeFlags::empty(),
        }
    }

    pub fn is_triangle(&self) -> bool {
        self.corners[2] == self.corners[3]
    }
}

impl Default for Face3D {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Face3D, "3DFACE");
