//! CAD document structure

use crate::classes::DxfClassCollection;
use crate::entities::EntityType;
use crate::io::dxf::DeferredReferences;
use crate::notification::NotificationCollection;
use crate::objects::{Group, GroupCollection, NamedObjectCollection, ObjectType};
use crate::tables::*;
use crate::types::{DxfVersion, Handle, Units, Vector3};
use ahash::AHashMap;
use indexmap::IndexMap;

/// Index of an entity in the document arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Index of an object in the document arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// What a handle names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectRef {
    Entity(EntityId),
    Object(ObjectId),
    /// Table entry, by table and name
    TableEntry(TableKind, String),
    /// The `TABLE` record of a symbol table
    Table(TableKind),
}

/// One value of a header variable, as written in the file
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderValue {
    pub code: i16,
    pub value: String,
}

/// Header variables (HEADER section)
///
/// The variables the decoder itself depends on are typed; every variable read
/// from the file is also kept verbatim in [`HeaderVariables::variables`].
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderVariables {
    /// $ACADVER
    pub version_string: String,
    /// $DWGCODEPAGE
    pub code_page: String,
    /// $HANDSEED
    pub handle_seed: Handle,
    /// $INSUNITS
    pub insertion_units: Units,
    /// $TEXTSIZE
    pub text_height: f64,
    /// $DIMSCALE
    pub dim_scale: f64,
    /// $LTSCALE
    pub linetype_scale: f64,
    /// $EXTMIN
    pub extents_min: Vector3,
    /// $EXTMAX
    pub extents_max: Vector3,
    /// $CLAYER
    pub current_layer: String,
    /// $MEASUREMENT, 0 imperial, 1 metric
    pub measurement: i16,
    /// Every variable in file order, name including the `$`
    pub variables: IndexMap<String, Vec<HeaderValue>>,
}

impl Default for HeaderVariables {
    fn default() -> Self {
        Self {
            version_string: String::new(),
            code_page: String::new(),
            handle_seed: Handle::NULL,
            insertion_units: Units::Unitless,
            text_height: 2.5,
            dim_scale: 1.0,
            linetype_scale: 1.0,
            extents_min: Vector3::ZERO,
            extents_max: Vector3::ZERO,
            current_layer: "0".to_string(),
            measurement: 0,
            variables: IndexMap::new(),
        }
    }
}

impl HeaderVariables {
    /// First value of a variable, by name with or without the `$`
    pub fn get(&self, name: &str) -> Option<&str> {
        let key = if name.starts_with('$') {
            name.to_uppercase()
        } else {
            format!("${}", name.to_uppercase())
        };
        self.variables
            .get(&key)
            .and_then(|values| values.first())
            .map(|v| v.value.as_str())
    }
}

/// Table entry types stored in a [`CadDocument`]
pub trait DocumentTable: TableEntry + Sized {
    fn table(document: &CadDocument) -> &Table<Self>;

    fn table_mut(document: &mut CadDocument) -> &mut Table<Self>;
}

macro_rules! impl_document_table {
    ($ty:ty, $field:ident) => {
        impl DocumentTable for $ty {
            fn table(document: &CadDocument) -> &Table<Self> {
                &document.$field
            }

            fn table_mut(document: &mut CadDocument) -> &mut Table<Self> {
                &mut document.$field
            }
        }
    };
}

impl_document_table!(AppId, app_ids);
impl_document_table!(BlockRecord, block_records);
impl_document_table!(DimStyle, dim_styles);
impl_document_table!(Layer, layers);
impl_document_table!(LineType, line_types);
impl_document_table!(TextStyle, text_styles);
impl_document_table!(Ucs, ucss);
impl_document_table!(View, views);
impl_document_table!(VPort, vports);

/// A decoded drawing
///
/// Entities and objects live in arenas addressed by [`EntityId`] and
/// [`ObjectId`]; block records list the entities they own. Handles found in the
/// file map to arena slots or table entries through one global index.
#[derive(Debug)]
pub struct CadDocument {
    pub version: DxfVersion,
    pub header: HeaderVariables,
    pub classes: DxfClassCollection,

    pub layers: Table<Layer>,
    pub line_types: Table<LineType>,
    pub text_styles: Table<TextStyle>,
    pub block_records: Table<BlockRecord>,
    pub dim_styles: Table<DimStyle>,
    pub app_ids: Table<AppId>,
    pub views: Table<View>,
    pub vports: Table<VPort>,
    pub ucss: Table<Ucs>,

    /// The named object dictionary (first dictionary of the OBJECTS section)
    pub root_dictionary: Option<ObjectId>,
    /// `ACAD_GROUP`
    pub groups: GroupCollection,
    /// `ACAD_LAYOUT`
    pub layouts: NamedObjectCollection,
    /// `ACAD_MLINESTYLE`
    pub mline_styles: NamedObjectCollection,
    /// `ACAD_IMAGE_DICT`
    pub image_definitions: NamedObjectCollection,
    /// `ACAD_PDFDEFINITIONS`
    pub pdf_definitions: NamedObjectCollection,
    /// `ACAD_DWFDEFINITIONS`
    pub dwf_definitions: NamedObjectCollection,
    /// `ACAD_DGNDEFINITIONS`
    pub dgn_definitions: NamedObjectCollection,

    /// Preview bitmap (THUMBNAILIMAGE section)
    pub thumbnail: Vec<u8>,

    /// Notifications collected during the last read
    pub notifications: NotificationCollection,

    /// References left unresolved when reading without the fix-up pass
    pub pending_references: Option<DeferredReferences>,

    entities: Vec<EntityType>,
    objects: Vec<ObjectType>,
    handles: AHashMap<Handle, ObjectRef>,
    /// Highest handle value met so far
    max_handle: u64,
    next_handle: u64,
}

impl CadDocument {
    /// Create a document holding the standard table entries
    pub fn new() -> Self {
        let mut doc = Self::empty();
        doc.version = DxfVersion::AC1032;
        doc.ensure_defaults();
        doc
    }

    /// Create a document with no table entries at all
    pub(crate) fn empty() -> Self {
        CadDocument {
            version: DxfVersion::Unknown,
            header: HeaderVariables::default(),
            classes: DxfClassCollection::new(),
            layers: Table::new(),
            line_types: Table::new(),
            text_styles: Table::new(),
            block_records: Table::new(),
            dim_styles: Table::new(),
            app_ids: Table::new(),
            views: Table::new(),
            vports: Table::new(),
            ucss: Table::new(),
            root_dictionary: None,
            groups: GroupCollection::new(),
            layouts: NamedObjectCollection::new(),
            mline_styles: NamedObjectCollection::new(),
            image_definitions: NamedObjectCollection::new(),
            pdf_definitions: NamedObjectCollection::new(),
            dwf_definitions: NamedObjectCollection::new(),
            dgn_definitions: NamedObjectCollection::new(),
            thumbnail: Vec::new(),
            notifications: NotificationCollection::new(),
            pending_references: None,
            entities: Vec::new(),
            objects: Vec::new(),
            handles: AHashMap::new(),
            max_handle: 0,
            next_handle: 1,
        }
    }

    // ---------------------------------------------------------------------
    // Handles
    // ---------------------------------------------------------------------

    /// Record a handle value used by a record that is not indexed itself
    /// (vertices, attributes, SEQEND markers).
    pub fn note_handle(&mut self, handle: Handle) {
        self.max_handle = self.max_handle.max(handle.value());
    }

    /// Allocate a handle no record of the document uses
    pub fn allocate_handle(&mut self) -> Handle {
        let next = self
            .next_handle
            .max(self.max_handle.saturating_add(1))
            .max(self.header.handle_seed.value());
        self.next_handle = next.saturating_add(1);
        self.max_handle = self.max_handle.max(next);
        Handle::new(next)
    }

    /// Index `handle`; returns `false` when another record already owns it.
    fn index_handle(&mut self, handle: Handle, target: ObjectRef) -> bool {
        if handle.is_null() {
            return true;
        }
        self.note_handle(handle);
        match self.handles.get(&handle) {
            Some(existing) if *existing != target => false,
            _ => {
                self.handles.insert(handle, target);
                true
            }
        }
    }

    /// Look up what a handle names
    pub fn get_by_handle(&self, handle: Handle) -> Option<&ObjectRef> {
        if handle.is_null() {
            return None;
        }
        self.handles.get(&handle)
    }

    pub fn entity_id(&self, handle: Handle) -> Option<EntityId> {
        match self.get_by_handle(handle) {
            Some(ObjectRef::Entity(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn object_id(&self, handle: Handle) -> Option<ObjectId> {
        match self.get_by_handle(handle) {
            Some(ObjectRef::Object(id)) => Some(*id),
            _ => None,
        }
    }

    /// Name of the block record with `handle`
    pub fn block_record_name(&self, handle: Handle) -> Option<&str> {
        match self.get_by_handle(handle) {
            Some(ObjectRef::TableEntry(TableKind::BlockRecord, name)) => Some(name),
            _ => None,
        }
    }

    /// Table entry named by `handle`, if it belongs to `T`'s table
    pub fn table_entry_by_handle<T: DocumentTable>(&self, handle: Handle) -> Option<&T> {
        match self.get_by_handle(handle) {
            Some(ObjectRef::TableEntry(kind, name)) if *kind == T::KIND => {
                T::table(self).get(name)
            }
            _ => None,
        }
    }

    // ---------------------------------------------------------------------
    // Entities and objects
    // ---------------------------------------------------------------------

    /// Add an entity to the arena.
    ///
    /// An entity whose handle is already taken is stored under a fresh handle
    /// assigned by [`CadDocument::assign_missing_handles`].
    pub fn add_entity(&mut self, mut entity: EntityType) -> EntityId {
        let id = EntityId(self.entities.len() as u32);
        let handle = entity.handle();
        if !self.index_handle(handle, ObjectRef::Entity(id)) {
            self.notifications.notify(
                crate::notification::NotificationType::Warning,
                format!("duplicate handle {} on {}; a new handle is assigned", handle, entity.entity_type()),
            );
            entity.common_mut().handle = Handle::NULL;
        }
        self.entities.push(entity);
        id
    }

    /// Add an object to the arena
    pub fn add_object(&mut self, mut object: ObjectType) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        let handle = object.handle();
        if !self.index_handle(handle, ObjectRef::Object(id)) {
            self.notifications.notify(
                crate::notification::NotificationType::Warning,
                format!("duplicate handle {} on {}; a new handle is assigned", handle, object.object_type()),
            );
            object.common_mut().handle = Handle::NULL;
        }
        self.objects.push(object);
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntityType> {
        self.entities.get(id.0 as usize)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut EntityType> {
        self.entities.get_mut(id.0 as usize)
    }

    pub fn object(&self, id: ObjectId) -> Option<&ObjectType> {
        self.objects.get(id.0 as usize)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut ObjectType> {
        self.objects.get_mut(id.0 as usize)
    }

    pub fn entity_by_handle(&self, handle: Handle) -> Option<&EntityType> {
        self.entity_id(handle).and_then(|id| self.entity(id))
    }

    pub fn object_by_handle(&self, handle: Handle) -> Option<&ObjectType> {
        self.object_id(handle).and_then(|id| self.object(id))
    }

    /// All entities with their ids, including block bodies
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &EntityType)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, e)| (EntityId(i as u32), e))
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &ObjectType)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, o)| (ObjectId(i as u32), o))
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Entities owned by the model space block record
    pub fn model_space_entities(&self) -> impl Iterator<Item = &EntityType> {
        self.block_records
            .get(BlockRecord::MODEL_SPACE)
            .map(|br| br.entities.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|id| self.entity(*id))
    }

    // ---------------------------------------------------------------------
    // Tables
    // ---------------------------------------------------------------------

    /// Store a table entry, replacing any entry of the same name.
    ///
    /// Returns the replaced entry.
    pub fn add_table_entry<T: DocumentTable>(&mut self, entry: T) -> Option<T> {
        let handle = entry.handle();
        let name = entry.name().to_string();
        let replaced = T::table_mut(self).insert(entry);
        if let Some(old) = &replaced {
            if old.handle() != handle {
                self.handles.remove(&old.handle());
            }
        }
        if !self.index_handle(handle, ObjectRef::TableEntry(T::KIND, name.clone())) {
            self.notifications.notify(
                crate::notification::NotificationType::Warning,
                format!("duplicate handle {} on {} entry '{}'", handle, T::KIND.name(), name),
            );
            if let Some(entry) = T::table_mut(self).get_mut(&name) {
                entry.set_handle(Handle::NULL);
            }
        }
        replaced
    }

    /// Record the handle of a `TABLE` record
    pub fn set_table_handle(&mut self, kind: TableKind, handle: Handle) {
        match kind {
            TableKind::AppId => self.app_ids.set_handle(handle),
            TableKind::BlockRecord => self.block_records.set_handle(handle),
            TableKind::DimStyle => self.dim_styles.set_handle(handle),
            TableKind::Layer => self.layers.set_handle(handle),
            TableKind::LineType => self.line_types.set_handle(handle),
            TableKind::TextStyle => self.text_styles.set_handle(handle),
            TableKind::Ucs => self.ucss.set_handle(handle),
            TableKind::View => self.views.set_handle(handle),
            TableKind::VPort => self.vports.set_handle(handle),
        }
        self.index_handle(handle, ObjectRef::Table(kind));
    }

    fn entry_or_create<T: DocumentTable>(&mut self, name: &str, create: impl FnOnce(&str) -> T) -> Handle {
        if let Some(entry) = T::table(self).get(name) {
            return entry.handle();
        }
        tracing::debug!(table = T::KIND.name(), name, "creating referenced table entry");
        self.add_table_entry(create(name));
        T::table(self).get(name).map(|e| e.handle()).unwrap_or(Handle::NULL)
    }

    pub fn layer_or_create(&mut self, name: &str) -> Handle {
        self.entry_or_create(name, |n| Layer::new(n))
    }

    pub fn line_type_or_create(&mut self, name: &str) -> Handle {
        self.entry_or_create(name, |n| LineType::new(n))
    }

    pub fn text_style_or_create(&mut self, name: &str) -> Handle {
        self.entry_or_create(name, |n| TextStyle::new(n))
    }

    pub fn dim_style_or_create(&mut self, name: &str) -> Handle {
        self.entry_or_create(name, |n| DimStyle::new(n))
    }

    pub fn app_id_or_create(&mut self, name: &str) -> Handle {
        self.entry_or_create(name, |n| AppId::new(n))
    }

    pub fn block_record_or_create(&mut self, name: &str) -> Handle {
        self.entry_or_create(name, |n| BlockRecord::new(n))
    }

    /// Make sure the standard table entries exist
    pub fn ensure_defaults(&mut self) {
        self.layer_or_create("0");
        self.line_type_or_create(LineType::BY_LAYER);
        self.line_type_or_create(LineType::BY_BLOCK);
        self.line_type_or_create(LineType::CONTINUOUS);
        self.text_style_or_create(TextStyle::STANDARD);
        self.dim_style_or_create(DimStyle::STANDARD);
        self.app_id_or_create("ACAD");
        self.block_record_or_create(BlockRecord::MODEL_SPACE);
        self.block_record_or_create(BlockRecord::PAPER_SPACE);
        self.assign_missing_handles();
    }

    /// Create the table entries that records refer to by name but the file
    /// never defines.
    pub fn create_referenced_entries(&mut self) {
        let mut layers = Vec::new();
        let mut line_types = Vec::new();
        let mut text_styles = Vec::new();
        let mut dim_styles = Vec::new();
        let mut app_ids = Vec::new();

        for entity in &self.entities {
            let common = entity.common();
            layers.push(common.layer.clone());
            line_types.push(common.line_type.clone());
            for record in common.extended_data.records() {
                app_ids.push(record.application_name.clone());
            }
            match entity {
                EntityType::Text(t) => text_styles.push(t.style.clone()),
                EntityType::MText(t) => text_styles.push(t.style.clone()),
                EntityType::AttributeDefinition(a) => text_styles.push(a.base.style.clone()),
                EntityType::Dimension(d) => dim_styles.push(d.style_name.clone()),
                EntityType::Leader(l) => dim_styles.push(l.style_name.clone()),
                EntityType::Tolerance(t) => dim_styles.push(t.style_name.clone()),
                _ => {}
            }
        }

        for name in layers.iter().filter(|n| is_valid_symbol_name(n)) {
            self.layer_or_create(name);
        }
        for name in line_types.iter().filter(|n| is_valid_symbol_name(n)) {
            self.line_type_or_create(name);
        }
        for name in text_styles.iter().filter(|n| is_valid_symbol_name(n)) {
            self.text_style_or_create(name);
        }
        for name in dim_styles.iter().filter(|n| is_valid_symbol_name(n)) {
            self.dim_style_or_create(name);
        }
        for name in app_ids.iter().filter(|n| is_valid_symbol_name(n)) {
            self.app_id_or_create(name);
        }
    }

    /// Give every record without a handle a fresh one
    pub fn assign_missing_handles(&mut self) {
        for i in 0..self.entities.len() {
            if self.entities[i].handle().is_null() {
                let handle = self.allocate_handle();
                self.entities[i].common_mut().handle = handle;
                self.handles.insert(handle, ObjectRef::Entity(EntityId(i as u32)));
            }
        }
        for i in 0..self.objects.len() {
            if self.objects[i].handle().is_null() {
                let handle = self.allocate_handle();
                self.objects[i].common_mut().handle = handle;
                self.handles.insert(handle, ObjectRef::Object(ObjectId(i as u32)));
            }
        }
        self.assign_table_handles::<AppId>();
        self.assign_table_handles::<BlockRecord>();
        self.assign_table_handles::<DimStyle>();
        self.assign_table_handles::<Layer>();
        self.assign_table_handles::<LineType>();
        self.assign_table_handles::<TextStyle>();
        self.assign_table_handles::<Ucs>();
        self.assign_table_handles::<View>();
        self.assign_table_handles::<VPort>();
    }

    fn assign_table_handles<T: DocumentTable>(&mut self) {
        let missing: Vec<String> = T::table(self)
            .iter()
            .filter(|e| e.handle().is_null())
            .map(|e| e.name().to_string())
            .collect();
        for name in missing {
            let handle = self.allocate_handle();
            if let Some(entry) = T::table_mut(self).get_mut(&name) {
                entry.set_handle(handle);
            }
            self.handles
                .insert(handle, ObjectRef::TableEntry(T::KIND, name));
        }
    }

    // ---------------------------------------------------------------------
    // Groups
    // ---------------------------------------------------------------------

    /// Create an empty unnamed group (`*A<n>`) and register it in
    /// `ACAD_GROUP`.
    pub fn create_unnamed_group(&mut self) -> ObjectId {
        let name = self.groups.next_unnamed_name();
        let mut group = Group::new(name.clone());
        group.is_unnamed = true;
        group.common.handle = self.allocate_handle();
        let id = self.add_object(ObjectType::Group(group));
        self.groups.insert(&name, id);
        id
    }

    /// Named collection holding definitions of the given underlay kind
    pub fn underlay_definitions(
        &self,
        kind: crate::entities::UnderlayKind,
    ) -> &NamedObjectCollection {
        use crate::entities::UnderlayKind;
        match kind {
            UnderlayKind::Pdf => &self.pdf_definitions,
            UnderlayKind::Dwf => &self.dwf_definitions,
            UnderlayKind::Dgn => &self.dgn_definitions,
        }
    }
}

impl Default for CadDocument {
    fn default() -> Self {
        Self::new()
    }
}
