//! PDF, DWF and DGN underlay entities

use super::EntityCommon;
use crate::types::{Handle, Vector2, Vector3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnderlayKind {
    Pdf,
    Dwf,
    Dgn,
}

impl UnderlayKind {
    /// Record name of the underlay entity
    pub fn entity_name(&self) -> &'static str {
        match self {
            UnderlayKind::Pdf => "PDFUNDERLAY",
            UnderlayKind::Dwf => "DWFUNDERLAY",
            UnderlayKind::Dgn => "DGNUNDERLAY",
        }
    }

    /// Record name of the matching definition object
    pub fn definition_name(&self) -> &'static str {
        match self {
            UnderlayKind::Pdf => "PDFDEFINITION",
            UnderlayKind::Dwf => "DWFDEFINITION",
            UnderlayKind::Dgn => "DGNDEFINITION",
        }
    }

    /// Root dictionary entry holding the definitions
    pub fn dictionary_name(&self) -> &'static str {
        match self {
            UnderlayKind::Pdf => "ACAD_PDFDEFINITIONS",
            UnderlayKind::Dwf => "ACAD_DWFDEFINITIONS",
            UnderlayKind::Dgn => "ACAD_DGNDEFINITIONS",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Underlay {
    pub common: EntityCommon,
    pub kind: UnderlayKind,
    /// Code 10
    pub insertion_point: Vector3,
    /// Codes 41, 42, 43
    pub scale: Vector3,
    /// Degrees (code 50)
    pub rotation: f64,
    pub normal: Vector3,
    /// Code 280
    pub flags: u8,
    /// Codes 281, 282
    pub contrast: u8,
    pub fade: u8,
    /// Clip boundary (code 11/21)
    pub clip_boundary: Vec<Vector2>,
    /// Definition object, set once the file has been read
    pub definition: Option<Handle>,
}

impl Underlay {
    pub fn new(kind: UnderlayKind) -> Self {
        Underlay {
            common: EntityCommon::new(),
            kind,
            insertion_point: Vector3::ZERO,
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: 0.0,
            normal: Vector3::UNIT_Z,
            flags: 0,
            contrast: 100,
            fade: 0,
            clip_boundary: Vec::new(),
            definition: None,
        }
    }
}

impl_entity!(Underlay, "UNDERLAY");
