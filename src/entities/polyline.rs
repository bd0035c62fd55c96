//! Heavy polyline entity (POLYLINE ... VERTEX ... SEQEND)

use super::EntityCommon;
use crate::types::{Handle, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Polyline flags (code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PolylineFlags: i16 {
        const CLOSED = 1;
        const CURVE_FIT = 2;
        const SPLINE_FIT = 4;
        const POLYLINE_3D = 8;
        const POLYGON_MESH = 16;
        const CLOSED_N = 32;
        const POLYFACE_MESH = 64;
        const CONTINUOUS_LINETYPE = 128;
    }
}

/// The geometry a POLYLINE record describes, derived from its flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolylineKind {
    Polyline2D,
    Polyline3D,
    PolygonMesh,
    PolyfaceMesh,
}

impl PolylineKind {
    pub fn from_flags(flags: PolylineFlags) -> Self {
        if flags.contains(PolylineFlags::POLYFACE_MESH) {
            PolylineKind::PolyfaceMesh
        } else if flags.contains(PolylineFlags::POLYGON_MESH) {
            PolylineKind::PolygonMesh
        } else if flags.contains(PolylineFlags::POLYLINE_3D) {
            PolylineKind::Polyline3D
        } else {
            PolylineKind::Polyline2D
        }
    }
}

/// A VERTEX record
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub handle: Handle,
    pub layer: String,
    pub location: Vector3,
    pub start_width: f64,
    pub end_width: f64,
    pub bulge: f64,
    /// Code 70
    pub flags: i16,
    /// Curve fit tangent direction in degrees (code 50)
    pub curve_tangent: f64,
    /// Polyface face vertex indices (codes 71-74), 1-based, negative when
    /// the edge is invisible
    pub face_indices: [i16; 4],
}

impl Vertex {
    pub fn new() -> Self {
        Vertex {
            handle: Handle::NULL,
            layer: "0".to_string(),
            location: Vector3::ZERO,
            start_width: 0.0,
            end_width: 0.0,
            bulge: 0.0,
            flags: 0,
            curve_tangent: 0.0,
            face_indices: [0; 4],
        }
    }

    /// Whether this vertex record describes a polyface face rather than a point
    pub fn is_face_record(&self) -> bool {
        self.flags & 128 != 0 && self.flags & 64 == 0
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub common: EntityCommon,
    pub flags: PolylineFlags,
    /// Elevation point; only Z is meaningful for 2D polylines
    pub elevation: Vector3,
    pub default_start_width: f64,
    pub default_end_width: f64,
    /// Mesh M vertex count or polyface vertex count (code 71)
    pub m_count: i16,
    /// Mesh N vertex count or polyface face count (code 72)
    pub n_count: i16,
    /// Code 75
    pub smooth_surface: i16,
    pub thickness: f64,
    pub normal: Vector3,
    pub vertices: Vec<Vertex>,
    /// Handle of the closing SEQEND record
    pub seqend_handle: Handle,
}

impl Polyline {
    pub fn new() -> Self {
        Polyline {
            common: EntityCommon::new(),
            flags: PolylineFlags::empty(),
            elevation: Vector3::ZERO,
            default_start_width: 0.0,
            default_end_width: 0.0,
            m_count: 0,
            n_count: 0,
            smooth_surface: 0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
            vertices: Vec::new(),
            seqend_handle: Handle::NULL,
        }
    }

    pub fn kind(&self) -> PolylineKind {
        PolylineKind::from_flags(self.flags)
    }

    pub fn is_closed(&self) -> bool {
        self.flags.contains(PolylineFlags::CLOSED)
    }
}

impl Default for Polyline {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Polyline, "POLYLINE");
