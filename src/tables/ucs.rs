//! UCS table entry

use super::{TableEntry, TableKind};
use crate::types::{Handle, Vector3};

/// A user coordinate system
#[derive(Debug, Clone, PartialEq)]
pub struct Ucs {
    pub handle: Handle,
    pub owner: Handle,
    pub name: String,
    pub flags: i16,
    pub origin: Vector3,
    pub x_axis: Vector3,
    pub y_axis: Vector3,
    /// Code 146
    pub elevation: f64,
}

impl Ucs {
    pub fn new(name: impl Into<String>) -> Self {
        Ucs {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            flags: 0,
            origin: Vector3::ZERO,
            x_axis: Vector3::UNIT_X,
            y_axis: Vector3::UNIT_Y,
            elevation: 0.0,
        }
    }

    pub fn z_axis(&self) -> Vector3 {
        self.x_axis.cross(&self.y_axis).normalize()
    }
}

impl TableEntry for Ucs {
    const KIND: TableKind = TableKind::Ucs;

    fn handle(&self) -> Handle {
        self.handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }

    fn name(&self) -> &str {
        &self.name
    }
}
