//! Block record table entry

use super::{TableEntry, TableKind};
use crate::document::EntityId;
use crate::types::{Handle, Units, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Block type flags (BLOCK code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BlockFlags: i16 {
        const ANONYMOUS = 1;
        const HAS_ATTRIBUTES = 2;
        const XREF = 4;
        const XREF_OVERLAY = 8;
        const EXTERNALLY_DEPENDENT = 16;
        const RESOLVED_XREF = 32;
        const REFERENCED = 64;
    }
}

/// A block record, merged with the BLOCK/ENDBLK pair that defines its body
#[derive(Debug, Clone, PartialEq)]
pub struct BlockRecord {
    pub handle: Handle,
    pub owner: Handle,
    pub name: String,
    pub flags: BlockFlags,
    /// Layout object of model and paper space records (code 340)
    pub layout: Handle,
    /// Insertion units (code 70)
    pub units: Units,
    /// Code 280
    pub explodable: bool,
    /// Code 281
    pub scale_uniformly: bool,
    /// Preview bitmap (code 310 chunks)
    pub preview: Vec<u8>,
    /// Handle of the BLOCK record
    pub block_entity_handle: Handle,
    /// Handle of the ENDBLK record
    pub block_end_handle: Handle,
    /// Layer of the BLOCK record
    pub layer: String,
    pub base_point: Vector3,
    pub description: String,
    /// External reference path (BLOCK code 1)
    pub xref_path: String,
    /// Drawable entities of the block body, or of the layout for model and
    /// paper space records
    pub entities: Vec<EntityId>,
    /// ATTDEF records of the block body
    pub attribute_definitions: Vec<EntityId>,
}

impl BlockRecord {
    pub const MODEL_SPACE: &'static str = "*Model_Space";
    pub const PAPER_SPACE: &'static str = "*Paper_Space";

    pub fn new(name: impl Into<String>) -> Self {
        BlockRecord {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            flags: BlockFlags::empty(),
            layout: Handle::NULL,
            units: Units::Unitless,
            explodable: true,
            scale_uniformly: false,
            preview: Vec::new(),
            block_entity_handle: Handle::NULL,
            block_end_handle: Handle::NULL,
            layer: "0".to_string(),
            base_point: Vector3::ZERO,
            description: String::new(),
            xref_path: String::new(),
            entities: Vec::new(),
            attribute_definitions: Vec::new(),
        }
    }

    pub fn is_model_space(&self) -> bool {
        self.name.eq_ignore_ascii_case(Self::MODEL_SPACE)
    }

    /// `*Paper_Space`, `*Paper_Space0`, `*Paper_Space1`, ...
    pub fn is_paper_space(&self) -> bool {
        is_paper_space_name(&self.name)
    }

    /// Whether the record is the body of a layout
    pub fn is_layout_block(&self) -> bool {
        self.is_model_space() || self.is_paper_space()
    }

    pub fn is_anonymous(&self) -> bool {
        self.flags.contains(BlockFlags::ANONYMOUS)
    }
}

/// Whether `name` follows the paper space block naming convention.
pub fn is_paper_space_name(name: &str) -> bool {
    name.len() >= BlockRecord::PAPER_SPACE.len()
        && name.is_char_boundary(BlockRecord::PAPER_SPACE.len())
        && name[..BlockRecord::PAPER_SPACE.len()].eq_ignore_ascii_case(BlockRecord::PAPER_SPACE)
}

impl TableEntry for BlockRecord {
    const KIND: TableKind = TableKind::BlockRecord;

    fn handle(&self) -> Handle {
        self.handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_names() {
        assert!(BlockRecord::new("*MODEL_SPACE").is_model_space());
        assert!(BlockRecord::new("*Paper_Space").is_paper_space());
        assert!(BlockRecord::new("*paper_space12").is_paper_space());
        assert!(!BlockRecord::new("*Paper").is_paper_space());
        assert!(!BlockRecord::new("Door").is_layout_block());
    }
}
