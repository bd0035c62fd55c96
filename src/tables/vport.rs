//! Viewport configuration table entry

use super::{TableEntry, TableKind};
use crate::types::{Handle, Vector2, Vector3};

/// A viewport configuration (VPORT)
#[derive(Debug, Clone, PartialEq)]
pub struct VPort {
    pub handle: Handle,
    pub owner: Handle,
    pub name: String,
    pub flags: i16,
    pub lower_left: Vector2,
    pub upper_right: Vector2,
    pub center: Vector2,
    pub snap_base: Vector2,
    pub snap_spacing: Vector2,
    pub grid_spacing: Vector2,
    pub direction: Vector3,
    pub target: Vector3,
    /// Code 40
    pub view_height: f64,
    /// Code 41
    pub aspect_ratio: f64,
    pub lens_length: f64,
}

impl VPort {
    pub const ACTIVE: &'static str = "*Active";

    pub fn new(name: impl Into<String>) -> Self {
        VPort {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            flags: 0,
            lower_left: Vector2::ZERO,
            upper_right: Vector2::new(1.0, 1.0),
            center: Vector2::ZERO,
            snap_base: Vector2::ZERO,
            snap_spacing: Vector2::new(0.5, 0.5),
            grid_spacing: Vector2::new(0.5, 0.5),
            direction: Vector3::UNIT_Z,
            target: Vector3::ZERO,
            view_height: 10.0,
            aspect_ratio: 1.0,
            lens_length: 50.0,
        }
    }
}

impl TableEntry for VPort {
    const KIND: TableKind = TableKind::VPort;

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
