//! Spline entity

use super::EntityCommon;
use crate::types::Vector3;
use bitflags::bitflags;

bitflags! {
    /// Spline flags (code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SplineFlags: i16 {
        const CLOSED = 1;
        const PERIODIC = 2;
        const RATIONAL = 4;
        const PLANAR = 8;
        const LINEAR = 16;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    pub common: EntityCommon,
    pub flags: SplineFlags,
    pub degree: i16,
    pub normal: Vector3,
    pub knots: Vec<f64>,
    pub control_points: Vec<Vector3>,
    /// Control point weights (code 41), present for rational splines
    pub weights: Vec<f64>,
    pub fit_points: Vec<Vector3>,
    pub start_tangent: Option<Vector3>,
    pub end_tangent: Option<Vector3>,
    pub knot_tolerance: f64,
    pub control_point_tolerance: f64,
    pub fit_tolerance: f64,
}

impl Spline {
    pub fn new() -> Self {
        Spline {
            common: EntityCommon::new(),
            flags: SplineFlags::empty(),
            degree: 3,
            normal: Vector3::UNIT_Z,
            knots: Vec::new(),
            control_points: Vec::new(),
            weights: Vec::new(),
            fit_points: Vec::new(),
            start_tangent: None,
            end_tangent: None,
            knot_tolerance: 1e-10,
            control_point_tolerance: 1e-10,
            fit_tolerance: 1e-10,
        }
    }
}

impl Default for Spline {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Spline, "SPLINE");
