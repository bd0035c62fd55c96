//! Color representation for decoded entities

use std::fmt;

/// Entity or layer color
///
/// Read from the ACI index (code 62) and optionally overridden by a 24-bit
/// true color (code 420).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Color by layer (index 256)
    #[default]
    ByLayer,
    /// Color by block (index 0)
    ByBlock,
    /// AutoCAD Color Index (1-255)
    Index(u8),
    /// True color
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Create a color from a code 62 value.
    ///
    /// Layers store a negative index when they are switched off; the
    /// magnitude is the color.
    pub fn from_index(index: i16) -> Self {
        match index {
            0 => Color::ByBlock,
            256 => Color::ByLayer,
            1..=255 => Color::Index(index as u8),
            i if i < 0 => Color::Index(i.unsigned_abs().min(255) as u8),
            _ => Color::Index(7),
        }
    }

    /// Create a color from a code 420 value (0x00RRGGBB).
    pub fn from_true_color(value: i32) -> Self {
        let v = value as u32;
        Color::Rgb {
            r: ((v >> 16) & 0xFF) as u8,
            g: ((v >> 8) & 0xFF) as u8,
            b: (v & 0xFF) as u8,
        }
    }

    pub fn index(&self) -> Option<u16> {
        match self {
            Color::ByBlock => Some(0),
            Color::Index(i) => Some(*i as u16),
            Color::ByLayer => Some(256),
            Color::Rgb { .. } => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::ByLayer => write!(f, "ByLayer"),
            Color::ByBlock => write!(f, "ByBlock"),
            Color::Index(i) => write!(f, "ACI {}", i),
            Color::Rgb { r, g, b } => write!(f, "RGB({}, {}, {})", r, g, b),
        }
    }
}
