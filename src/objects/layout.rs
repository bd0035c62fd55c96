//! Layout object - a model or paper space tab

use crate::document::EntityId;
use crate::objects::ObjectCommon;
use crate::types::{Handle, Vector2, Vector3};

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub common: ObjectCommon,
    /// Page setup name from the plot settings part (code 1 before
    /// `AcDbLayout`)
    pub page_setup_name: String,
    /// Layout name (code 1 after `AcDbLayout`)
    pub name: String,
    /// Code 70
    pub flags: i16,
    /// Code 71
    pub tab_order: i16,
    /// Code 10/20
    pub min_limits: Vector2,
    /// Code 11/21
    pub max_limits: Vector2,
    /// Code 12
    pub insertion_base: Vector3,
    /// Code 14
    pub min_extents: Vector3,
    /// Code 15
    pub max_extents: Vector3,
    /// Code 146
    pub elevation: f64,
    /// Code 13
    pub ucs_origin: Vector3,
    /// Code 16
    pub ucs_x_axis: Vector3,
    /// Code 17
    pub ucs_y_axis: Vector3,
    /// Owning block record (code 330 after `AcDbLayout`)
    pub block_record: Handle,
    /// Last active viewport (code 331)
    pub last_viewport: Handle,
    /// The viewport with id 1 drawn on this layout
    pub base_viewport: Option<EntityId>,
}

impl Layout {
    pub const MODEL: &'static str = "Model";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            common: ObjectCommon::default(),
            page_setup_name: String::new(),
            name: name.into(),
            flags: 0,
            tab_order: 0,
            min_limits: Vector2::ZERO,
            max_limits: Vector2::new(12.0, 9.0),
            insertion_base: Vector3::ZERO,
            min_extents: Vector3::ZERO,
            max_extents: Vector3::ZERO,
            elevation: 0.0,
            ucs_origin: Vector3::ZERO,
            ucs_x_axis: Vector3::UNIT_X,
            ucs_y_axis: Vector3::UNIT_Y,
            block_record: Handle::NULL,
            last_viewport: Handle::NULL,
            base_viewport: None,
        }
    }

    pub fn is_model(&self) -> bool {
        self.name.eq_ignore_ascii_case(Self::MODEL)
    }
}
