//! DXF class definitions (CLASSES section)

use indexmap::IndexMap;

/// Proxy capability flags (code 90)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProxyFlags(pub i32);

/// One `CLASS` record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DxfClass {
    /// Record name used in the ENTITIES/OBJECTS sections (code 1)
    pub dxf_name: String,
    /// C++ class name (code 2)
    pub cpp_class_name: String,
    /// Code 3
    pub application_name: String,
    pub proxy_flags: ProxyFlags,
    /// Code 91
    pub instance_count: i32,
    /// Code 280
    pub was_zombie: bool,
    /// Code 281
    pub is_an_entity: bool,
}

/// Class definitions keyed by DXF name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DxfClassCollection {
    classes: IndexMap<String, DxfClass>,
}

impl DxfClassCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class, replacing any class with the same DXF name
    pub fn add_or_update(&mut self, class: DxfClass) {
        self.classes.insert(class.dxf_name.to_uppercase(), class);
    }

    pub fn get(&self, dxf_name: &str) -> Option<&DxfClass> {
        self.classes.get(&dxf_name.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DxfClass> {
        self.classes.values()
    }
}
