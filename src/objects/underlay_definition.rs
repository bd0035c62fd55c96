//! PDF, DWF and DGN underlay definition objects

use crate::entities::UnderlayKind;
use crate::objects::ObjectCommon;

#[derive(Debug, Clone, PartialEq)]
pub struct UnderlayDefinition {
    pub common: ObjectCommon,
    pub kind: UnderlayKind,
    /// Code 1
    pub file_name: String,
    /// Page or sheet name (code 2)
    pub page: String,
}

impl UnderlayDefinition {
    pub fn new(kind: UnderlayKind) -> Self {
        Self {
            common: ObjectCommon::default(),
            kind,
            file_name: String::new(),
            page: String::new(),
        }
    }
}
