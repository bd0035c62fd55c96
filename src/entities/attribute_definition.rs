//! Attribute definitions (ATTDEF) and attribute values (ATTRIB)

use super::EntityCommon;
use crate::types::Vector3;
use bitflags::bitflags;

bitflags! {
    /// Attribute flags (code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AttributeFlags: i16 {
        const INVISIBLE = 1;
        const CONSTANT = 2;
        const VERIFY = 4;
        const PRESET = 8;
    }
}

/// Text and tag fields shared by ATTDEF and ATTRIB
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBase {
    /// Code 2
    pub tag: String,
    /// Default value (ATTDEF) or value (ATTRIB), code 1
    pub value: String,
    pub insertion_point: Vector3,
    pub alignment_point: Option<Vector3>,
    pub height: f64,
    pub rotation: f64,
    pub width_factor: f64,
    pub oblique_angle: f64,
    pub style: String,
    pub flags: AttributeFlags,
    /// Code 73
    pub field_length: i16,
    /// Code 72
    pub horizontal_alignment: i16,
    /// Code 74
    pub vertical_alignment: i16,
    /// Code 280
    pub lock_position: bool,
    pub thickness: f64,
    pub normal: Vector3,
}

impl AttributeBase {
    pub fn new() -> Self {
        AttributeBase {
            tag: String::new(),
            value: String::new(),
            insertion_point: Vector3::ZERO,
            alignment_point: None,
            height: 2.5,
            rotation: 0.0,
            width_factor: 1.0,
            oblique_angle: 0.0,
            style: "Standard".to_string(),
            flags: AttributeFlags::empty(),
            field_length: 0,
            horizontal_alignment: 0,
            vertical_alignment: 0,
            lock_position: false,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }
}

impl Default for AttributeBase {
    fn default() -> Self {
        Self::new()
    }
}

/// An attribute definition in a block body
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDefinition {
    pub common: EntityCommon,
    pub base: AttributeBase,
    /// Code 3
    pub prompt: String,
}

impl AttributeDefinition {
    pub fn new() -> Self {
        AttributeDefinition {
            common: EntityCommon::new(),
            base: AttributeBase::new(),
            prompt: String::new(),
        }
    }
}

impl Default for AttributeDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(AttributeDefinition, "ATTDEF");

/// An attribute value attached to an insert
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub common: EntityCommon,
    pub base: AttributeBase,
}

impl Attribute {
    pub fn new() -> Self {
        Attribute {
            common: EntityCommon::new(),
            base: AttributeBase::new(),
        }
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Attribute, "ATTRIB");
