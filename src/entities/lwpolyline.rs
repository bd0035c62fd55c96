//! Lightweight polyline entity

use super::EntityCommon;
use crate::types::{Vector2, Vector3};

/// A vertex of a lightweight polyline (OCS)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LwVertex {
    pub location: Vector2,
    pub start_width: f64,
    pub end_width: f64,
    pub bulge: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LwPolyline {
    pub common: EntityCommon,
    /// Code 70; bit 1 closed, bit 128 continuous line type generation
    pub flags: i16,
    /// Code 43
    pub constant_width: f64,
    pub elevation: f64,
    pub thickness: f64,
    pub normal: Vector3,
    pub vertices: Vec<LwVertex>,
}

impl LwPolyline {
    pub fn new() -> Self {
        LwPolyline {
            common: EntityCommon::new(),
            flags: 0,
            constant_width: 0.0,
            elevation: 0.0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
            vertices: Vec::new(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.flags & 1 != 0
    }
}

impl Default for LwPolyline {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(LwPolyline, "LWPOLYLINE");
