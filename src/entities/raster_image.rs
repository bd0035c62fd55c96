//! Raster image and wipeout entities

use super::EntityCommon;
use crate::types::{Handle, Vector2, Vector3};

/// A raster image reference (IMAGE); WIPEOUT shares the layout
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub common: EntityCommon,
    /// Code 90
    pub class_version: i32,
    /// Lower left corner (WCS), code 10
    pub insertion_point: Vector3,
    /// One pixel along U, code 11
    pub u_vector: Vector3,
    /// One pixel along V, code 12
    pub v_vector: Vector3,
    /// Image size in pixels (code 13/23)
    pub size: Vector2,
    /// Image definition object, set once the file has been read
    pub definition: Option<Handle>,
    /// Code 70
    pub display_flags: i16,
    /// Code 280
    pub clipping: bool,
    /// Codes 281, 282, 283
    pub brightness: u8,
    pub contrast: u8,
    pub fade: u8,
    /// Image definition reactor (code 360)
    pub definition_reactor: Handle,
    /// 1 rectangular, 2 polygonal (code 71)
    pub clip_type: i16,
    /// Clip boundary in pixel coordinates (code 14/24)
    pub clip_boundary: Vec<Vector2>,
    /// Extent in drawing units, derived from the definition
    pub world_size: Vector2,
}

impl RasterImage {
    pub fn new() -> Self {
        RasterImage {
            common: EntityCommon::new(),
            class_version: 0,
            insertion_point: Vector3::ZERO,
            u_vector: Vector3::UNIT_X,
            v_vector: Vector3::UNIT_Y,
            size: Vector2::ZERO,
            definition: None,
            display_flags: 7,
            clipping: false,
            brightness: 50,
            contrast: 50,
            fade: 0,
            definition_reactor: Handle::NULL,
            clip_type: 1,
            clip_boundary: Vec::new(),
            world_size: Vector2::ZERO,
        }
    }
}

impl Default for RasterImage {
    fn default() -> Self {
        Self::new()
    }
}

/// A WIPEOUT: an image-shaped mask with no definition
pub type Wipeout = RasterImage;

impl_entity!(RasterImage, "IMAGE");
