//! Text style table entry

use super::{TableEntry, TableKind};
use crate::types::Handle;
use bitflags::bitflags;

bitflags! {
    /// Text generation flags (code 71)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TextGenerationFlags: i16 {
        const BACKWARD = 2;
        const UPSIDE_DOWN = 4;
    }
}

/// A text style table entry (STYLE)
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub handle: Handle,
    pub owner: Handle,
    pub name: String,
    pub flags: i16,
    /// Fixed height, 0 when not fixed (code 40)
    pub height: f64,
    pub width_factor: f64,
    /// Oblique angle in degrees (code 50)
    pub oblique_angle: f64,
    pub generation_flags: TextGenerationFlags,
    pub last_height: f64,
    pub font_file: String,
    pub big_font_file: String,
}

impl TextStyle {
    pub const STANDARD: &'static str = "Standard";

    pub fn new(name: impl Into<String>) -> Self {
        TextStyle {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            flags: 0,
            height: 0.0,
            width_factor: 1.0,
            oblique_angle: 0.0,
            generation_flags: TextGenerationFlags::empty(),
            last_height: 2.5,
            font_file: "txt".to_string(),
            big_font_file: String::new(),
        }
    }

    /// Whether the style describes a shape file rather than a font (flag 1)
    pub fn is_shape_file(&self) -> bool {
        self.flags & 1 != 0
    }
}

impl TableEntry for TextStyle {
    const KIND: TableKind = TableKind::TextStyle;

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
