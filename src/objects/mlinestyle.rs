//! MLineStyle object - multiline style definition

use crate::objects::ObjectCommon;
use crate::types::Color;
use bitflags::bitflags;

bitflags! {
    /// Multiline style flags (code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MLineStyleFlags: i16 {
        const FILL_ON = 1;
        const DISPLAY_JOINTS = 2;
        const START_SQUARE_CAP = 16;
        const START_INNER_ARCS_CAP = 32;
        const START_ROUND_CAP = 64;
        const END_SQUARE_CAP = 256;
        const END_INNER_ARCS_CAP = 512;
        const END_ROUND_CAP = 1024;
    }
}

/// One line of the multiline
#[derive(Debug, Clone, PartialEq)]
pub struct MLineStyleElement {
    /// Offset from the centre line (code 49)
    pub offset: f64,
    /// Code 62
    pub color: Color,
    /// Code 6
    pub line_type: String,
}

impl MLineStyleElement {
    pub fn new(offset: f64) -> Self {
        Self {
            offset,
            color: Color::ByLayer,
            line_type: "BYLAYER".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MLineStyle {
    pub common: ObjectCommon,
    /// Code 2
    pub name: String,
    pub flags: MLineStyleFlags,
    /// Code 3
    pub description: String,
    /// Code 62
    pub fill_color: Color,
    /// Degrees (code 51)
    pub start_angle: f64,
    /// Degrees (code 52)
    pub end_angle: f64,
    pub elements: Vec<MLineStyleElement>,
}

impl MLineStyle {
    pub const STANDARD: &'static str = "Standard";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            common: ObjectCommon::default(),
            name: name.into(),
            flags: MLineStyleFlags::empty(),
            description: String::new(),
            fill_color: Color::ByLayer,
            start_angle: 90.0,
            end_angle: 90.0,
            elements: Vec::new(),
        }
    }

    /// The default style: two lines half a unit either side of the centre
    pub fn standard() -> Self {
        let mut style = Self::new(Self::STANDARD);
        style.elements.push(MLineStyleElement::new(0.5));
        style.elements.push(MLineStyleElement::new(-0.5));
        style
    }
}
