//! Hatch entity and boundary path types

use super::EntityCommon;
use crate::types::{Handle, Vector2, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Boundary path type flags (code 92)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BoundaryPathFlags: i32 {
        const EXTERNAL = 1;
        const POLYLINE = 2;
        const DERIVED = 4;
        const TEXTBOX = 8;
        const OUTERMOST = 16;
        const NOT_CLOSED = 32;
        const SELF_INTERSECTING = 64;
        const TEXT_ISLAND = 128;
        const DUPLICATE = 256;
    }
}

/// One edge of a non-polyline boundary path
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryEdge {
    Line {
        start: Vector2,
        end: Vector2,
    },
    CircularArc {
        center: Vector2,
        radius: f64,
        /// Degrees
        start_angle: f64,
        end_angle: f64,
        counter_clockwise: bool,
    },
    EllipticArc {
        center: Vector2,
        /// Major axis end point relative to the centre
        major_axis: Vector2,
        minor_axis_ratio: f64,
        start_angle: f64,
        end_angle: f64,
        counter_clockwise: bool,
    },
    Spline {
        degree: i32,
        rational: bool,
        periodic: bool,
        knots: Vec<f64>,
        control_points: Vec<Vector2>,
        weights: Vec<f64>,
        fit_points: Vec<Vector2>,
        start_tangent: Option<Vector2>,
        end_tangent: Option<Vector2>,
    },
}

/// A hatch boundary loop
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundaryPath {
    pub flags: BoundaryPathFlags,
    /// Edges of a non-polyline path
    pub edges: Vec<BoundaryEdge>,
    /// Polyline path vertices as (x, y, bulge)
    pub polyline: Vec<Vector3>,
    pub polyline_closed: bool,
    /// Source boundary entities (code 330), resolved after the read
    pub contours: Vec<Handle>,
}

impl BoundaryPath {
    pub fn new(flags: BoundaryPathFlags) -> Self {
        BoundaryPath {
            flags,
            ..Default::default()
        }
    }

    pub fn is_polyline(&self) -> bool {
        self.flags.contains(BoundaryPathFlags::POLYLINE)
    }
}

/// Hatch pattern definition line
#[derive(Debug, Clone, PartialEq)]
pub struct HatchPatternLine {
    /// Degrees (code 53)
    pub angle: f64,
    pub base_point: Vector2,
    pub offset: Vector2,
    /// Positive dash, negative gap
    pub dash_lengths: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hatch {
    pub common: EntityCommon,
    /// Code 2
    pub pattern_name: String,
    /// Code 70
    pub is_solid: bool,
    /// Code 71
    pub is_associative: bool,
    pub paths: Vec<BoundaryPath>,
    /// Code 75
    pub style: i16,
    /// Code 76
    pub pattern_type: i16,
    /// Degrees (code 52)
    pub pattern_angle: f64,
    /// Code 41
    pub pattern_scale: f64,
    /// Code 77
    pub is_double: bool,
    pub pattern_lines: Vec<HatchPatternLine>,
    /// Code 47
    pub pixel_size: f64,
    /// Code 10, 20 of each seed point
    pub seed_points: Vec<Vector2>,
    /// Elevation point (code 10/20/30 before the pattern name)
    pub elevation: f64,
    pub normal: Vector3,
}

impl Hatch {
    pub fn new() -> Self {
        Hatch {
            common: EntityCommon::new(),
            pattern_name: "SOLID".to_string(),
            is_solid: true,
            is_associative: false,
            paths: Vec::new(),
            style: 0,
            pattern_type: 1,
            pattern_angle: 0.0,
            pattern_scale: 1.0,
            is_double: false,
            pattern_lines: Vec::new(),
            pixel_size: 0.0,
            seed_points: Vec::new(),
            elevation: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }
}

impl Default for Hatch {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Hatch, "HATCH");
