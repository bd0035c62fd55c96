//! Block reference entity

use super::{Attribute, EntityCommon};
use crate::types::{Handle, Vector3};

/// A block reference (INSERT), optionally followed by ATTRIB records
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub common: EntityCommon,
    /// Code 2
    pub block_name: String,
    /// Referenced block record, set once the file has been read
    pub block: Option<Handle>,
    /// Insertion point (OCS)
    pub insert_point: Vector3,
    pub x_scale: f64,
    pub y_scale: f64,
    pub z_scale: f64,
    /// Rotation in degrees
    pub rotation: f64,
    pub normal: Vector3,
    pub column_count: i16,
    pub row_count: i16,
    pub column_spacing: f64,
    pub row_spacing: f64,
    pub attributes: Vec<Attribute>,
    /// Handle of the SEQEND closing the attribute list
    pub seqend_handle: Handle,
}

impl Insert {
    pub fn new() -> Self {
        Insert {
            common: EntityCommon::new(),
            block_name: String::new(),
            block: None,
            insert_point: Vector3::ZERO,
            x_scale: 1.0,
            y_scale: 1.0,
            z_scale: 1.0,
            rotation: 0.0,
            normal: Vector3::UNIT_Z,
            column_count: 1,
            row_count: 1,
            column_spacing: 0.0,
            row_spacing: 0.0,
            attributes: Vec::new(),
            seqend_handle: Handle::NULL,
        }
    }

    /// Multiply all three scale factors.
    pub fn scale_by(&mut self, factor: f64) {
        self.x_scale *= factor;
        self.y_scale *= factor;
        self.z_scale *= factor;
    }
}

impl Default for Insert {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Insert, "INSERT");
