//! Named object collections backed by a root dictionary entry

use crate::document::ObjectId;
use crate::types::Handle;
use indexmap::IndexMap;

/// Objects reachable by name through one dictionary, such as
/// `ACAD_LAYOUT` or `ACAD_MLINESTYLE`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedObjectCollection {
    /// The dictionary backing this collection
    pub dictionary: Handle,
    entries: IndexMap<String, ObjectId>,
}

impl NamedObjectCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object under `name`; names compare case-insensitively.
    ///
    /// Returns the object previously stored under the name.
    pub fn insert(&mut self, name: &str, id: ObjectId) -> Option<ObjectId> {
        self.entries.insert(name.to_uppercase(), id)
    }

    pub fn get(&self, name: &str) -> Option<ObjectId> {
        self.entries.get(&name.to_uppercase()).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.entries.values().copied()
    }
}
