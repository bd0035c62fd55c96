//! Raster image definition and raster variables objects

use crate::objects::ObjectCommon;
use crate::types::{Units, Vector2};

/// Resolution unit of an image definition (code 281)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionUnit {
    #[default]
    None,
    Centimeters,
    Inches,
}

impl ResolutionUnit {
    pub fn from_code(code: u8) -> Self {
        match code {
            2 => ResolutionUnit::Centimeters,
            5 => ResolutionUnit::Inches,
            _ => ResolutionUnit::None,
        }
    }

    /// Drawing unit the pixel size is expressed in
    pub fn units(&self) -> Units {
        match self {
            ResolutionUnit::None => Units::Unitless,
            ResolutionUnit::Centimeters => Units::Centimeters,
            ResolutionUnit::Inches => Units::Inches,
        }
    }
}

/// IMAGEDEF
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDefinition {
    pub common: ObjectCommon,
    /// Code 90
    pub class_version: i32,
    /// Code 1
    pub file_name: String,
    /// Image size in pixels (code 10/20)
    pub size_in_pixels: Vector2,
    /// Size of one pixel (code 11/21)
    pub pixel_size: Vector2,
    /// Code 280
    pub is_loaded: bool,
    pub resolution_unit: ResolutionUnit,
}

impl ImageDefinition {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            common: ObjectCommon::default(),
            class_version: 0,
            file_name: file_name.into(),
            size_in_pixels: Vector2::ZERO,
            pixel_size: Vector2::new(1.0, 1.0),
            is_loaded: true,
            resolution_unit: ResolutionUnit::None,
        }
    }
}

/// RASTERVARIABLES
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RasterVariables {
    pub common: ObjectCommon,
    /// Code 90
    pub class_version: i32,
    /// Code 70
    pub display_image_frame: bool,
    /// Code 71
    pub high_quality: bool,
    /// Code 72
    pub units: i16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_units() {
        assert_eq!(ResolutionUnit::from_code(2).units(), Units::Centimeters);
        assert_eq!(ResolutionUnit::from_code(5).units(), Units::Inches);
        assert_eq!(ResolutionUnit::from_code(9), ResolutionUnit::None);
    }
}
