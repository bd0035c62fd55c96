//! Dimension entity and its seven kinds

use super::EntityCommon;
use crate::types::{Handle, Vector3};

/// Flag bit: the anonymous block is referenced by this dimension only
pub const DIMENSION_BLOCK_REFERENCE_FLAG: i16 = 32;
/// Flag bit: ordinate dimension measures X
pub const DIMENSION_ORDINATE_X_FLAG: i16 = 64;
/// Flag bit: text is at a user-defined position
pub const DIMENSION_USER_TEXT_FLAG: i16 = 128;

/// Kind-specific dimension geometry
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionKind {
    Linear {
        /// Code 13
        first_point: Vector3,
        /// Code 14
        second_point: Vector3,
        /// Code 50, degrees
        rotation: f64,
        /// Code 52, degrees
        ext_line_rotation: f64,
    },
    Aligned {
        first_point: Vector3,
        second_point: Vector3,
        ext_line_rotation: f64,
    },
    Angular2Line {
        /// First line start (code 13)
        first_point: Vector3,
        /// First line end (code 14)
        second_point: Vector3,
        /// Second line start (code 15)
        angle_vertex: Vector3,
        /// Dimension arc location (code 16)
        arc_point: Vector3,
    },
    Diameter {
        /// Far chord point (code 15)
        angle_vertex: Vector3,
        /// Code 40
        leader_length: f64,
    },
    Radius {
        /// Chord point (code 15)
        angle_vertex: Vector3,
        leader_length: f64,
    },
    Angular3Point {
        first_point: Vector3,
        second_point: Vector3,
        /// Angle vertex (code 15)
        angle_vertex: Vector3,
    },
    Ordinate {
        /// Feature location (code 13)
        feature_location: Vector3,
        /// Leader end point (code 14)
        leader_endpoint: Vector3,
        is_x_type: bool,
    },
}

impl DimensionKind {
    /// Kind selected by the low bits of the dimension flags (code 70), with
    /// the block reference and user text position bits masked out.
    pub fn from_flags(flags: i16) -> Option<Self> {
        let kind = (flags & !(DIMENSION_BLOCK_REFERENCE_FLAG | DIMENSION_USER_TEXT_FLAG)) & 0x0F;
        let z = Vector3::ZERO;
        let value = match kind {
            0 => DimensionKind::Linear {
                first_point: z,
                second_point: z,
                rotation: 0.0,
                ext_line_rotation: 0.0,
            },
            1 => DimensionKind::Aligned {
                first_point: z,
                second_point: z,
                ext_line_rotation: 0.0,
            },
            2 => DimensionKind::Angular2Line {
                first_point: z,
                second_point: z,
                angle_vertex: z,
                arc_point: z,
            },
            3 => DimensionKind::Diameter {
                angle_vertex: z,
                leader_length: 0.0,
            },
            4 => DimensionKind::Radius {
                angle_vertex: z,
                leader_length: 0.0,
            },
            5 => DimensionKind::Angular3Point {
                first_point: z,
                second_point: z,
                angle_vertex: z,
            },
            6 => DimensionKind::Ordinate {
                feature_location: z,
                leader_endpoint: z,
                is_x_type: flags & DIMENSION_ORDINATE_X_FLAG != 0,
            },
            _ => return None,
        };
        Some(value)
    }

    /// Subclass marker (code 100) that opens the kind-specific fields
    pub fn subclass_marker(&self) -> &'static str {
        match self {
            DimensionKind::Linear { .. } => "AcDbRotatedDimension",
            DimensionKind::Aligned { .. } => "AcDbAlignedDimension",
            DimensionKind::Angular2Line { .. } => "AcDb2LineAngularDimension",
            DimensionKind::Diameter { .. } => "AcDbDiametricDimension",
            DimensionKind::Radius { .. } => "AcDbRadialDimension",
            DimensionKind::Angular3Point { .. } => "AcDb3PointAngularDimension",
            DimensionKind::Ordinate { .. } => "AcDbOrdinateDimension",
        }
    }

    /// Kind named by a subclass marker
    pub fn from_subclass_marker(marker: &str) -> Option<Self> {
        (0..=6)
            .filter_map(Self::from_flags)
            .find(|kind| kind.subclass_marker() == marker)
    }
}

/// Whether a code 100 value starts the kind-specific part of a dimension
pub fn is_dimension_subclass_marker(marker: &str) -> bool {
    matches!(
        marker,
        "AcDbAlignedDimension"
            | "AcDbRotatedDimension"
            | "AcDb2LineAngularDimension"
            | "AcDb3PointAngularDimension"
            | "AcDbDiametricDimension"
            | "AcDbRadialDimension"
            | "AcDbOrdinateDimension"
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub common: EntityCommon,
    /// Code 280
    pub version: u8,
    /// Anonymous block holding the rendered geometry (code 2)
    pub block_name: String,
    /// Resolved block record of `block_name`
    pub block: Option<Handle>,
    /// Dimension style name (code 3)
    pub style_name: String,
    /// Definition point (WCS), code 10
    pub definition_point: Vector3,
    /// Text middle point (OCS), code 11
    pub text_middle_point: Vector3,
    /// Clone insertion point (code 12)
    pub insertion_point: Vector3,
    /// Code 70
    pub flags: i16,
    /// Code 71
    pub attachment_point: i16,
    pub line_spacing_style: i16,
    pub line_spacing_factor: f64,
    /// Actual measurement (code 42)
    pub measurement: f64,
    /// User text override (code 1)
    pub text: String,
    /// Code 53
    pub text_rotation: f64,
    /// Code 51
    pub horizontal_direction: f64,
    pub normal: Vector3,
    pub kind: DimensionKind,
}

impl Dimension {
    pub fn new(kind: DimensionKind) -> Self {
        Dimension {
            common: EntityCommon::new(),
            version: 0,
            block_name: String::new(),
            block: None,
            style_name: "Standard".to_string(),
            definition_point: Vector3::ZERO,
            text_middle_point: Vector3::ZERO,
            insertion_point: Vector3::ZERO,
            flags: 0,
            attachment_point: 5,
            line_spacing_style: 1,
            line_spacing_factor: 1.0,
            measurement: 0.0,
            text: String::new(),
            text_rotation: 0.0,
            horizontal_direction: 0.0,
            normal: Vector3::UNIT_Z,
            kind,
        }
    }

    pub fn has_user_text_position(&self) -> bool {
        self.flags & DIMENSION_USER_TEXT_FLAG != 0
    }
}

impl_entity!(Dimension, "DIMENSION");
