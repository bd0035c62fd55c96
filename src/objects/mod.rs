//! Non-graphical objects (OBJECTS section)
//!
//! Objects are non-graphical elements in a DXF file, such as dictionaries,
//! layouts, groups and the definitions referenced by image and underlay
//! entities.

mod collection;
mod group;
mod image_definition;
mod layout;
mod mlinestyle;
mod underlay_definition;

pub use collection::NamedObjectCollection;
pub use group::{Group, GroupCollection};
pub use image_definition::{ImageDefinition, RasterVariables, ResolutionUnit};
pub use layout::Layout;
pub use mlinestyle::{MLineStyle, MLineStyleElement, MLineStyleFlags};
pub use underlay_definition::UnderlayDefinition;

use crate::types::Handle;
use crate::xdata::ExtendedData;
use indexmap::IndexMap;

/// Fields shared by every object record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectCommon {
    /// Code 5
    pub handle: Handle,
    /// Code 330
    pub owner: Handle,
    /// Code 360 inside `{ACAD_XDICTIONARY`
    pub extension_dictionary: Handle,
    /// Codes 330 inside `{ACAD_REACTORS`
    pub reactors: Vec<Handle>,
    pub extended_data: ExtendedData,
}

/// Dictionary object - maps entry names to object handles
///
/// Also used for ACDBDICTIONARYWDFLT, which adds a default entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    pub common: ObjectCommon,
    /// Entry name (code 3) to owned (360) or soft (350) handle
    pub entries: IndexMap<String, Handle>,
    /// Code 280
    pub hard_owner: bool,
    /// Duplicate record cloning flag (code 281)
    pub cloning: i16,
    /// Default entry of ACDBDICTIONARYWDFLT (code 340)
    pub default_entry: Option<Handle>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            common: ObjectCommon::default(),
            entries: IndexMap::new(),
            hard_owner: false,
            cloning: 1,
            default_entry: None,
        }
    }

    /// Add or replace an entry
    pub fn add_entry(&mut self, key: impl Into<String>, handle: Handle) {
        self.entries.insert(key.into(), handle);
    }

    pub fn get(&self, key: &str) -> Option<Handle> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

/// A decoded object
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectType {
    Dictionary(Dictionary),
    /// ACDBDICTIONARYWDFLT
    DictionaryWithDefault(Dictionary),
    Layout(Layout),
    Group(Group),
    MLineStyle(MLineStyle),
    ImageDefinition(ImageDefinition),
    UnderlayDefinition(UnderlayDefinition),
    RasterVariables(RasterVariables),
}

macro_rules! dispatch_object {
    ($self:expr, $o:ident => $body:expr) => {
        match $self {
            ObjectType::Dictionary($o) => $body,
            ObjectType::DictionaryWithDefault($o) => $body,
            ObjectType::Layout($o) => $body,
            ObjectType::Group($o) => $body,
            ObjectType::MLineStyle($o) => $body,
            ObjectType::ImageDefinition($o) => $body,
            ObjectType::UnderlayDefinition($o) => $body,
            ObjectType::RasterVariables($o) => $body,
        }
    };
}

impl ObjectType {
    pub fn common(&self) -> &ObjectCommon {
        dispatch_object!(self, o => &o.common)
    }

    pub fn common_mut(&mut self) -> &mut ObjectCommon {
        dispatch_object!(self, o => &mut o.common)
    }

    pub fn handle(&self) -> Handle {
        self.common().handle
    }

    /// Record name as written after code 0
    pub fn object_type(&self) -> &'static str {
        match self {
            ObjectType::Dictionary(_) => "DICTIONARY",
            ObjectType::DictionaryWithDefault(_) => "ACDBDICTIONARYWDFLT",
            ObjectType::Layout(_) => "LAYOUT",
            ObjectType::Group(_) => "GROUP",
            ObjectType::MLineStyle(_) => "MLINESTYLE",
            ObjectType::ImageDefinition(_) => "IMAGEDEF",
            ObjectType::UnderlayDefinition(u) => u.kind.definition_name(),
            ObjectType::RasterVariables(_) => "RASTERVARIABLES",
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            ObjectType::Dictionary(d) | ObjectType::DictionaryWithDefault(d) => Some(d),
            _ => None,
        }
    }
}
