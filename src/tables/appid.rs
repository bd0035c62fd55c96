//! Application id table entry

use super::{TableEntry, TableKind};
use crate::types::Handle;

/// A registered application name (APPID)
#[derive(Debug, Clone, PartialEq)]
pub struct AppId {
    pub handle: Handle,
    pub owner: Handle,
    pub name: String,
    pub flags: i16,
}

impl AppId {
    pub fn new(name: impl Into<String>) -> Self {
        AppId {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: name.into(),
            flags: 0,
        }
    }
}

impl TableEntry for AppId {
    const KIND: TableKind = TableKind::AppId;

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
