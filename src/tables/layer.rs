//! Layer table entry

use super::{TableEntry, TableKind};
use crate::types::{Color, Handle, LineWeight};
use bitflags::bitflags;

bitflags! {
    /// Layer state flags (code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LayerFlags: i16 {
        const FROZEN = 1;
        const FROZEN_IN_NEW_VIEWPORTS = 2;
        const LOCKED = 4;
        const XREF_DEPENDENT = 16;
        const XREF_RESOLVED = 32;
        const REFERENCED = 64;
    }
}

/// A layer table entry
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub handle: Handle,
    pub owner: Handle,
    pub name: String,
    pub flags: LayerFlags,
    pub color: Color,
    /// Set when the color index is written negative
    pub is_off: bool,
    pub line_type: String,
    pub line_weight: LineWeight,
    /// Plot flag (code 290)
    pub is_plottable: bool,
    /// Plot style name object (code 390)
    pub plot_style: Handle,
    /// Material object (code 347)
    pub material: Handle,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            flags: LayerFlags::empty(),
            color: Color::Index(7),
            is_off: false,
            line_type: "Continuous".to_string(),
            line_weight: LineWeight::Default,
            is_plottable: true,
            plot_style: Handle::NULL,
            material: Handle::NULL,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.flags.contains(LayerFlags::FROZEN)
    }

    pub fn is_locked(&self) -> bool {
        self.flags.contains(LayerFlags::LOCKED)
    }
}

impl TableEntry for Layer {
    const KIND: TableKind = TableKind::Layer;

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
