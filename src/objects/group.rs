//! Group object - named collection of entities

use crate::document::{EntityId, ObjectId};
use crate::objects::ObjectCommon;
use indexmap::IndexMap;

/// Group object - a named selection set of entities
///
/// The name is not part of the GROUP record; it is the entry name under which
/// the `ACAD_GROUP` dictionary lists the group.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub common: ObjectCommon,
    pub name: String,
    /// Code 300
    pub description: String,
    /// Code 70
    pub is_unnamed: bool,
    /// Code 71
    pub selectable: bool,
    /// Member entities (code 340), filled once the file has been read
    pub entities: Vec<EntityId>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            common: ObjectCommon::default(),
            name: name.into(),
            description: String::new(),
            is_unnamed: false,
            selectable: true,
            entities: Vec::new(),
        }
    }

    pub fn add_entity(&mut self, id: EntityId) {
        if !self.entities.contains(&id) {
            self.entities.push(id);
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Prefix of generated names for unnamed groups
pub const UNNAMED_GROUP_PREFIX: &str = "*A";

/// The `ACAD_GROUP` collection
///
/// Tracks the highest `*A<n>` name seen so that new unnamed groups never
/// collide with groups read from the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupCollection {
    entries: IndexMap<String, ObjectId>,
    unnamed_counter: u64,
}

impl GroupCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group under `name`
    pub fn insert(&mut self, name: &str, id: ObjectId) -> Option<ObjectId> {
        if let Some(n) = unnamed_index(name) {
            self.unnamed_counter = self.unnamed_counter.max(n);
        }
        self.entries.insert(name.to_uppercase(), id)
    }

    pub fn get(&self, name: &str) -> Option<ObjectId> {
        self.entries.get(&name.to_uppercase()).copied()
    }

    /// Reserve the next unnamed group name
    pub fn next_unnamed_name(&mut self) -> String {
        self.unnamed_counter = self.unnamed_counter.saturating_add(1);
        format!("{}{}", UNNAMED_GROUP_PREFIX, self.unnamed_counter)
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

/// `n` for names of the form `*A<n>`
fn unnamed_index(name: &str) -> Option<u64> {
    let rest = name
        .strip_prefix(UNNAMED_GROUP_PREFIX)
        .or_else(|| name.strip_prefix("*a"))?;
    rest.parse().ok()
}
