//! Symbol tables (TABLES section)

use crate::types::Handle;
use indexmap::IndexMap;

pub mod appid;
pub mod block_record;
pub mod dimstyle;
pub mod layer;
pub mod linetype;
pub mod textstyle;
pub mod ucs;
pub mod view;
pub mod vport;

pub use appid::AppId;
pub use block_record::{BlockFlags, BlockRecord};
pub use dimstyle::{DimStyle, DEFAULT_DIM_STYLE};
pub use layer::{Layer, LayerFlags};
pub use linetype::{LineType, LineTypeElement};
pub use textstyle::{TextGenerationFlags, TextStyle};
pub use ucs::Ucs;
pub use view::View;
pub use vport::VPort;

/// Characters that may not appear in a symbol table name
pub const INVALID_NAME_CHARS: &[char] = &['<', '>', '/', '\\', '"', ':', ';', '?', ',', '=', '|', '`'];

/// Whether `name` can name a table entry.
pub fn is_valid_symbol_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains(INVALID_NAME_CHARS)
}

/// The symbol tables of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    AppId,
    BlockRecord,
    DimStyle,
    Layer,
    LineType,
    TextStyle,
    Ucs,
    View,
    VPort,
}

impl TableKind {
    /// Table kind for the name written after `0 TABLE` / `2`.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "APPID" => TableKind::AppId,
            "BLOCK_RECORD" => TableKind::BlockRecord,
            "DIMSTYLE" => TableKind::DimStyle,
            "LAYER" => TableKind::Layer,
            "LTYPE" => TableKind::LineType,
            "STYLE" => TableKind::TextStyle,
            "UCS" => TableKind::Ucs,
            "VIEW" => TableKind::View,
            "VPORT" => TableKind::VPort,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TableKind::AppId => "APPID",
            TableKind::BlockRecord => "BLOCK_RECORD",
            TableKind::DimStyle => "DIMSTYLE",
            TableKind::Layer => "LAYER",
            TableKind::LineType => "LTYPE",
            TableKind::TextStyle => "STYLE",
            TableKind::Ucs => "UCS",
            TableKind::View => "VIEW",
            TableKind::VPort => "VPORT",
        }
    }
}

/// Base trait for all table entries
pub trait TableEntry {
    const KIND: TableKind;

    fn handle(&self) -> Handle;

    fn set_handle(&mut self, handle: Handle);

    fn name(&self) -> &str;
}

/// Table of named entries, looked up case-insensitively
#[derive(Debug, Clone)]
pub struct Table<T: TableEntry> {
    entries: IndexMap<String, T>,
    /// Handle of the `TABLE` record
    handle: Handle,
}

impl<T: TableEntry> Table<T> {
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
            handle: Handle::NULL,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }

    /// Reserve room for the entry count announced by the table header.
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
    }

    /// Insert an entry, replacing any entry of the same name.
    ///
    /// Returns the replaced entry.
    pub fn insert(&mut self, entry: T) -> Option<T> {
        let key = entry.name().to_uppercase();
        self.entries.insert(key, entry)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&name.to_uppercase())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(&name.to_uppercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_uppercase())
    }

    pub fn find_by_handle(&self, handle: Handle) -> Option<&T> {
        self.entries.values().find(|e| e.handle() == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.name())
    }
}

impl<T: TableEntry> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}
