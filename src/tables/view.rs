//! View table entry

use super::{TableEntry, TableKind};
use crate::types::{Handle, Vector2, Vector3};

/// A named view
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub handle: Handle,
    pub owner: Handle,
    pub name: String,
    pub flags: i16,
    pub height: f64,
    pub width: f64,
    pub center: Vector2,
    pub direction: Vector3,
    pub target: Vector3,
    pub lens_length: f64,
    pub front_clipping: f64,
    pub back_clipping: f64,
    /// Twist angle in degrees (code 50)
    pub twist_angle: f64,
    pub view_mode: i16,
}

impl View {
    pub fn new(name: impl Into<String>) -> Self {
        View {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            flags: 0,
            height: 1.0,
            width: 1.0,
            center: Vector2::ZERO,
            direction: Vector3::UNIT_Z,
            target: Vector3::ZERO,
            lens_length: 50.0,
            front_clipping: 0.0,
            back_clipping: 0.0,
            twist_angle: 0.0,
            view_mode: 0,
        }
    }
}

impl TableEntry for View {
    const KIND: TableKind = TableKind::View;

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
