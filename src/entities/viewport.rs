//! Paper space viewport entity

use super::EntityCommon;
use crate::types::{Handle, Vector2, Vector3};

/// Viewport id of the overall paper space view of a layout
pub const BASE_VIEWPORT_ID: i16 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub common: EntityCommon,
    /// Centre in paper space (code 10)
    pub center: Vector3,
    pub width: f64,
    pub height: f64,
    /// Code 68
    pub status: i16,
    /// Code 69
    pub id: i16,
    /// Code 12/22
    pub view_center: Vector2,
    pub snap_base: Vector2,
    pub snap_spacing: Vector2,
    pub grid_spacing: Vector2,
    /// Code 16
    pub view_direction: Vector3,
    /// Code 17
    pub view_target: Vector3,
    /// Code 42
    pub lens_length: f64,
    pub front_clip: f64,
    pub back_clip: f64,
    /// View height in model space (code 45)
    pub view_height: f64,
    /// Degrees (code 50)
    pub snap_angle: f64,
    /// Degrees (code 51)
    pub twist_angle: f64,
    /// Code 72
    pub circle_zoom: i16,
    /// Code 331
    pub frozen_layers: Vec<Handle>,
    /// Code 90
    pub status_flags: i32,
    /// Clip boundary entity, set once the file has been read
    pub boundary: Option<Handle>,
    /// Code 281
    pub render_mode: u8,
}

impl Viewport {
    pub fn new() -> Self {
        Viewport {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            width: 0.0,
            height: 0.0,
            status: 0,
            id: 0,
            view_center: Vector2::ZERO,
            snap_base: Vector2::ZERO,
            snap_spacing: Vector2::new(10.0, 10.0),
            grid_spacing: Vector2::new(10.0, 10.0),
            view_direction: Vector3::UNIT_Z,
            view_target: Vector3::ZERO,
            lens_length: 50.0,
            front_clip: 0.0,
            back_clip: 0.0,
            view_height: 0.0,
            snap_angle: 0.0,
            twist_angle: 0.0,
            circle_zoom: 1000,
            frozen_layers: Vec::new(),
            status_flags: 0,
            boundary: None,
            render_mode: 0,
        }
    }

    /// Whether this is the paper space view of its layout
    pub fn is_base_viewport(&self) -> bool {
        self.id == BASE_VIEWPORT_ID
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Viewport, "VIEWPORT");
