//! Line type table entry

use super::{TableEntry, TableKind};
use crate::types::{Handle, Vector2};

/// One dash, gap or dot of a line type pattern
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineTypeElement {
    /// Dash length (code 49); negative for gaps
    pub length: f64,
    /// Complex element type (code 74)
    pub shape_flag: i16,
    /// Shape number or text offset in the style (code 75)
    pub shape_number: i16,
    /// Style object of shapes and text (code 340)
    pub style: Handle,
    /// Scale (code 46)
    pub scale: f64,
    /// Rotation in radians (code 50)
    pub rotation: f64,
    /// Offset (codes 44/45)
    pub offset: Vector2,
    /// Text string (code 9)
    pub text: String,
}

/// A line type table entry
#[derive(Debug, Clone, PartialEq)]
pub struct LineType {
    pub handle: Handle,
    pub owner: Handle,
    pub name: String,
    pub flags: i16,
    pub description: String,
    /// Total pattern length (code 40)
    pub pattern_length: f64,
    /// Alignment code, always 'A' (code 72)
    pub alignment: u8,
    pub elements: Vec<LineTypeElement>,
}

impl LineType {
    pub const BY_LAYER: &'static str = "ByLayer";
    pub const BY_BLOCK: &'static str = "ByBlock";
    pub const CONTINUOUS: &'static str = "Continuous";

    pub fn new(name: impl Into<String>) -> Self {
        LineType {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            flags: 0,
            description: String::new(),
            pattern_length: 0.0,
            alignment: b'A',
            elements: Vec::new(),
        }
    }
}

impl TableEntry for LineType {
    const KIND: TableKind = TableKind::LineType;

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
