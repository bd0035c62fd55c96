//! Transparency (code 440)

/// Transparency as an alpha value: 0 is opaque, 255 fully transparent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transparency {
    #[default]
    ByLayer,
    ByBlock,
    Alpha(u8),
}

impl Transparency {
    pub const OPAQUE: Transparency = Transparency::Alpha(0);

    /// Decode a code 440 value.
    ///
    /// The high byte tags the kind: 0 by layer, 1 by block, 2 or 3 an explicit
    /// value whose low byte is the opacity.
    pub fn from_alpha_value(value: i32) -> Self {
        let value = value as u32;
        match value >> 24 {
            0 => Transparency::ByLayer,
            1 => Transparency::ByBlock,
            _ => Transparency::Alpha(255 - (value & 0xFF) as u8),
        }
    }

    pub fn alpha(&self) -> Option<u8> {
        match self {
            Transparency::Alpha(a) => Some(*a),
            _ => None,
        }
    }
}
