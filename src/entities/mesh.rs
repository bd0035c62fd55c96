//! Subdivision mesh entity

use super::EntityCommon;
use crate::types::Vector3;

/// A crease value on a mesh edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshEdge {
    pub start: i32,
    pub end: i32,
    pub crease: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub common: EntityCommon,
    /// Code 71
    pub version: i16,
    /// Code 72
    pub blend_crease: bool,
    /// Code 91
    pub subdivision_level: i32,
    /// Code 92 count, then 10/20/30
    pub vertices: Vec<Vector3>,
    /// Vertex indices per face (code 93 list, each face prefixed by its size)
    pub faces: Vec<Vec<i32>>,
    /// Code 94 count, pairs of code 90; creases from code 95/140
    pub edges: Vec<MeshEdge>,
}

impl Mesh {
    pub fn new() -> Self {
        Mesh {
            common: EntityCommon::new(),
            version: 2,
            blend_crease: false,
            subdivision_level: 0,
            vertices: Vec::new(),
            faces: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Mesh, "MESH");
