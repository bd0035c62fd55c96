//! Deferred reference resolution
//!
//! Records refer to each other by handle or by name, and the target is often
//! defined later in the file than the reference. Decoders therefore only
//! register what they point at; [`DeferredReferences::resolve_all`] links the
//! graph once the whole file has been read.

use crate::document::{CadDocument, EntityId, ObjectId, ObjectRef};
use crate::entities::EntityType;
use crate::notification::NotificationType;
use crate::objects::{Layout, MLineStyle, ObjectType};
use crate::tables::{BlockRecord, LineType, TableKind, TextStyle};
use crate::types::{conversion_factor, Handle, Vector2};
use crate::xdata::XDataValue;
use ahash::AHashMap;
use indexmap::IndexMap;

/// DIMTAD, the dimension text vertical position
const DIMTAD_CODE: i16 = 77;

/// A reference found while decoding an entity
#[derive(Debug, Clone, PartialEq)]
pub enum PendingReference {
    /// Owning block record (code 330)
    Owner(Handle),
    /// Owning block record by name, for records without an owner handle
    OwnerBlock(String),
    /// Block inserted by an INSERT or drawn by a DIMENSION
    BlockName(String),
    /// IMAGEDEF of an IMAGE
    ImageDefinition(Handle),
    /// Definition object of an underlay
    UnderlayDefinition(Handle),
    /// Multiline style, by name
    MLineStyle(String),
    /// Clip boundary entity of a VIEWPORT
    ViewportBoundary(Handle),
    /// Source entities of one hatch boundary path
    HatchContours { path: usize, handles: Vec<Handle> },
    /// MTEXT, TOLERANCE or INSERT annotating a LEADER
    LeaderAnnotation(Handle),
}

/// Satellite handles of a dimension style (codes 340 to 347)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DimStyleHandles {
    pub text_style: Option<Handle>,
    pub leader_arrow_block: Option<Handle>,
    pub arrow_block: Option<Handle>,
    pub arrow_block1: Option<Handle>,
    pub arrow_block2: Option<Handle>,
    pub line_type: Option<Handle>,
    pub ext_line_type1: Option<Handle>,
    pub ext_line_type2: Option<Handle>,
}

impl DimStyleHandles {
    /// Store the handle of code 340 to 347; other codes are ignored.
    pub fn set(&mut self, code: i16, handle: Handle) {
        let slot = match code {
            340 => &mut self.text_style,
            341 => &mut self.leader_arrow_block,
            342 => &mut self.arrow_block,
            343 => &mut self.arrow_block1,
            344 => &mut self.arrow_block2,
            345 => &mut self.line_type,
            346 => &mut self.ext_line_type1,
            347 => &mut self.ext_line_type2,
            _ => return,
        };
        *slot = Some(handle);
    }
}

/// Owner of an entity as found in the file
#[derive(Debug, Clone, PartialEq)]
enum OwnerRef {
    Handle(Handle),
    Block(String),
}

/// Pending references, one table per relation
#[derive(Debug, Default, Clone)]
pub struct DeferredReferences {
    dim_styles: IndexMap<String, DimStyleHandles>,
    image_definitions: IndexMap<EntityId, Handle>,
    underlay_definitions: IndexMap<EntityId, Handle>,
    mline_styles: IndexMap<EntityId, String>,
    block_names: IndexMap<EntityId, String>,
    /// Block whose body holds an entity
    containers: AHashMap<EntityId, String>,
    owners: IndexMap<EntityId, OwnerRef>,
    viewport_boundaries: IndexMap<EntityId, Handle>,
    hatch_contours: IndexMap<(EntityId, usize), Vec<Handle>>,
    leader_annotations: IndexMap<EntityId, Handle>,
    group_members: IndexMap<ObjectId, Vec<Handle>>,
}

impl DeferredReferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reference of `id`; the first registration of a relation
    /// wins.
    pub fn register(&mut self, id: EntityId, pending: PendingReference) {
        match pending {
            PendingReference::Owner(h) => {
                self.owners.entry(id).or_insert(OwnerRef::Handle(h));
            }
            PendingReference::OwnerBlock(name) => {
                self.owners.entry(id).or_insert(OwnerRef::Block(name));
            }
            PendingReference::BlockName(name) => {
                self.block_names.entry(id).or_insert(name);
            }
            PendingReference::ImageDefinition(h) => {
                self.image_definitions.entry(id).or_insert(h);
            }
            PendingReference::UnderlayDefinition(h) => {
                self.underlay_definitions.entry(id).or_insert(h);
            }
            PendingReference::MLineStyle(name) => {
                self.mline_styles.entry(id).or_insert(name);
            }
            PendingReference::ViewportBoundary(h) => {
                self.viewport_boundaries.entry(id).or_insert(h);
            }
            PendingReference::HatchContours { path, handles } => {
                self.hatch_contours
                    .entry((id, path))
                    .or_default()
                    .extend(handles);
            }
            PendingReference::LeaderAnnotation(h) => {
                self.leader_annotations.entry(id).or_insert(h);
            }
        }
    }

    /// Note that `id` belongs to the body of block `block_name`
    pub fn set_container(&mut self, id: EntityId, block_name: &str) {
        self.containers.insert(id, block_name.to_string());
    }

    pub fn register_dim_style(&mut self, name: &str, handles: DimStyleHandles) {
        self.dim_styles
            .entry(name.to_uppercase())
            .or_insert(handles);
    }

    pub fn register_group_members(&mut self, id: ObjectId, members: Vec<Handle>) {
        self.group_members.entry(id).or_default().extend(members);
    }

    /// Number of pending entries over all tables
    pub fn len(&self) -> usize {
        self.dim_styles.len()
            + self.image_definitions.len()
            + self.underlay_definitions.len()
            + self.mline_styles.len()
            + self.block_names.len()
            + self.owners.len()
            + self.viewport_boundaries.len()
            + self.hatch_contours.len()
            + self.leader_annotations.len()
            + self.group_members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Link every pending reference into `doc`, draining the tables.
    ///
    /// Block resolution runs before entities are placed in their owners.
    /// Unresolved references are left empty and reported as notifications.
    pub fn resolve_all(&mut self, doc: &mut CadDocument) {
        tracing::trace!(pending = self.len(), "resolving deferred references");
        self.resolve_dim_styles(doc);
        self.resolve_image_definitions(doc);
        self.resolve_underlay_definitions(doc);
        self.resolve_mline_styles(doc);
        self.resolve_block_names(doc);
        self.resolve_owners(doc);
        resolve_orphan_layouts(doc);
        self.resolve_viewport_boundaries(doc);
        self.resolve_hatch_contours(doc);
        self.resolve_leader_annotations(doc);
        self.resolve_group_members(doc);
        self.containers.clear();
    }

    fn resolve_dim_styles(&mut self, doc: &mut CadDocument) {
        let standard_text = doc.text_style_or_create(TextStyle::STANDARD);
        let by_block = doc.line_type_or_create(LineType::BY_BLOCK);

        for (name, handles) in self.dim_styles.drain(..) {
            let text_style = resolve_entry(doc, handles.text_style, TableKind::TextStyle)
                .unwrap_or(standard_text);
            let block = |h| resolve_entry(doc, h, TableKind::BlockRecord);
            let leader_arrow_block = block(handles.leader_arrow_block);
            let arrow_block = block(handles.arrow_block);
            let arrow_block1 = block(handles.arrow_block1);
            let arrow_block2 = block(handles.arrow_block2);
            let line_type = |h| resolve_entry(doc, h, TableKind::LineType).unwrap_or(by_block);
            let lt = line_type(handles.line_type);
            let lt1 = line_type(handles.ext_line_type1);
            let lt2 = line_type(handles.ext_line_type2);

            if let Some(style) = doc.dim_styles.get_mut(&name) {
                style.text_style = Some(text_style);
                style.leader_arrow_block = leader_arrow_block;
                style.arrow_block = arrow_block;
                style.arrow_block1 = arrow_block1;
                style.arrow_block2 = arrow_block2;
                style.line_type = Some(lt);
                style.ext_line_type1 = Some(lt1);
                style.ext_line_type2 = Some(lt2);
            }
        }
    }

    fn resolve_image_definitions(&mut self, doc: &mut CadDocument) {
        let drawing_units = doc.header.insertion_units;
        for (id, handle) in self.image_definitions.drain(..) {
            let definition = match doc.object_by_handle(handle) {
                Some(ObjectType::ImageDefinition(def)) => def.clone(),
                _ => {
                    unresolved(doc, "image definition", handle);
                    continue;
                }
            };
            if let Some(EntityType::RasterImage(image)) = doc.entity_mut(id) {
                image.definition = Some(handle);
                if image.size == Vector2::ZERO {
                    image.size = definition.size_in_pixels;
                }
                let factor =
                    conversion_factor(definition.resolution_unit.units(), drawing_units);
                image.world_size = Vector2::new(
                    image.size.x * definition.pixel_size.x * factor,
                    image.size.y * definition.pixel_size.y * factor,
                );
            }
        }
    }

    fn resolve_underlay_definitions(&mut self, doc: &mut CadDocument) {
        for (id, handle) in self.underlay_definitions.drain(..) {
            let kind = match doc.object_by_handle(handle) {
                Some(ObjectType::UnderlayDefinition(def)) => def.kind,
                _ => {
                    unresolved(doc, "underlay definition", handle);
                    continue;
                }
            };
            if let Some(EntityType::Underlay(underlay)) = doc.entity_mut(id) {
                if underlay.kind != kind {
                    tracing::warn!(%handle, "underlay refers to a definition of another kind");
                }
                underlay.definition = Some(handle);
            }
        }
    }

    fn resolve_mline_styles(&mut self, doc: &mut CadDocument) {
        for (id, name) in self.mline_styles.drain(..) {
            let style = doc
                .mline_styles
                .get(&name)
                .or_else(|| doc.mline_styles.get(MLineStyle::STANDARD))
                .and_then(|sid| doc.object(sid))
                .map(|o| o.handle());
            if style.is_none() {
                doc.notifications.notify(
                    NotificationType::Unresolved,
                    format!("multiline style '{}' not found", name),
                );
            }
            if let Some(EntityType::MLine(mline)) = doc.entity_mut(id) {
                mline.style = style;
            }
        }
    }

    fn resolve_block_names(&mut self, doc: &mut CadDocument) {
        for (id, name) in self.block_names.drain(..) {
            let (block_handle, block_units) = match doc.block_records.get(&name) {
                Some(br) => (br.handle, br.units),
                None => {
                    doc.notifications.notify(
                        NotificationType::Unresolved,
                        format!("block '{}' not found", name),
                    );
                    continue;
                }
            };
            let container_units = self
                .containers
                .get(&id)
                .and_then(|c| doc.block_records.get(c))
                .map(|br| br.units);

            match doc.entity_mut(id) {
                Some(EntityType::Insert(insert)) => {
                    insert.block = Some(block_handle);
                    if let Some(units) = container_units {
                        let factor = conversion_factor(block_units, units);
                        if factor != 1.0 {
                            insert.scale_by(factor);
                        }
                    }
                }
                Some(EntityType::Dimension(dim)) => dim.block = Some(block_handle),
                _ => {}
            }
        }
    }

    fn resolve_owners(&mut self, doc: &mut CadDocument) {
        for (id, owner) in self.owners.drain(..) {
            let found = match &owner {
                OwnerRef::Handle(h) => doc.block_record_name(*h).map(str::to_string),
                OwnerRef::Block(name) => doc.block_records.get(name).map(|br| br.name.clone()),
            };
            let block_name = match found {
                Some(name) => name,
                None => {
                    match owner {
                        OwnerRef::Handle(h) if h.is_valid() => unresolved(doc, "owner", h),
                        OwnerRef::Block(name) => doc.notifications.notify(
                            NotificationType::Unresolved,
                            format!("owner block '{}' not found", name),
                        ),
                        OwnerRef::Handle(_) => {}
                    }
                    let model = doc.block_record_or_create(BlockRecord::MODEL_SPACE);
                    if model.is_null() {
                        doc.assign_missing_handles();
                    }
                    BlockRecord::MODEL_SPACE.to_string()
                }
            };

            let (is_base_viewport, is_attdef) = match doc.entity(id) {
                Some(EntityType::Viewport(vp)) => (vp.is_base_viewport(), false),
                Some(EntityType::AttributeDefinition(_)) => (false, true),
                Some(_) => (false, false),
                None => continue,
            };

            if is_base_viewport {
                if let Some(layout_id) = layout_of_block(doc, &block_name) {
                    if let Some(ObjectType::Layout(layout)) = doc.object_mut(layout_id) {
                        layout.base_viewport = Some(id);
                        continue;
                    }
                }
            }

            let br_handle = match doc.block_records.get_mut(&block_name) {
                Some(br) => {
                    if is_attdef {
                        br.attribute_definitions.push(id);
                    } else {
                        br.entities.push(id);
                    }
                    br.handle
                }
                None => continue,
            };
            if let Some(entity) = doc.entity_mut(id) {
                entity.common_mut().owner = br_handle;
            }
        }
    }

    fn resolve_viewport_boundaries(&mut self, doc: &mut CadDocument) {
        for (id, handle) in self.viewport_boundaries.drain(..) {
            if doc.entity_id(handle).is_none() {
                unresolved(doc, "viewport boundary", handle);
                continue;
            }
            if let Some(EntityType::Viewport(vp)) = doc.entity_mut(id) {
                vp.boundary = Some(handle);
            }
        }
    }

    fn resolve_hatch_contours(&mut self, doc: &mut CadDocument) {
        for ((id, path), handles) in self.hatch_contours.drain(..) {
            let mut found = Vec::with_capacity(handles.len());
            for handle in handles {
                if doc.entity_id(handle).is_some() {
                    found.push(handle);
                } else {
                    unresolved(doc, "hatch contour", handle);
                }
            }
            if let Some(EntityType::Hatch(hatch)) = doc.entity_mut(id) {
                if let Some(p) = hatch.paths.get_mut(path) {
                    p.contours = found;
                }
            }
        }
    }

    fn resolve_leader_annotations(&mut self, doc: &mut CadDocument) {
        for (id, handle) in self.leader_annotations.drain(..) {
            let annotation = match doc.entity_by_handle(handle) {
                Some(EntityType::MText(_) | EntityType::Tolerance(_) | EntityType::Insert(_)) => {
                    Some(handle)
                }
                _ if handle.is_null() => None,
                _ => {
                    unresolved(doc, "leader annotation", handle);
                    None
                }
            };
            if let Some(EntityType::Leader(leader)) = doc.entity_mut(id) {
                leader.annotation = annotation;
                leader.text_vertical_position = leader
                    .common
                    .extended_data
                    .get_record("ACAD")
                    .and_then(|r| r.override_value("DSTYLE", DIMTAD_CODE))
                    .and_then(XDataValue::as_i16);
            }
        }
    }

    fn resolve_group_members(&mut self, doc: &mut CadDocument) {
        for (id, handles) in self.group_members.drain(..) {
            let mut members = Vec::with_capacity(handles.len());
            for handle in handles {
                match doc.entity_id(handle) {
                    Some(eid) => members.push(eid),
                    None => unresolved(doc, "group member", handle),
                }
            }
            if let Some(ObjectType::Group(group)) = doc.object_mut(id) {
                for member in members {
                    group.add_entity(member);
                }
            }
        }
    }
}

/// Handle of the table entry `handle` names, if it is in table `kind`
fn resolve_entry(doc: &CadDocument, handle: Option<Handle>, kind: TableKind) -> Option<Handle> {
    let handle = handle?;
    match doc.get_by_handle(handle) {
        Some(ObjectRef::TableEntry(k, _)) if *k == kind => Some(handle),
        _ => None,
    }
}

fn unresolved(doc: &mut CadDocument, what: &str, handle: Handle) {
    doc.notifications.notify(
        NotificationType::Unresolved,
        format!("{} {} not found", what, handle),
    );
}

/// Layout drawn by the block record `block_name`
fn layout_of_block(doc: &CadDocument, block_name: &str) -> Option<ObjectId> {
    let br = doc.block_records.get(block_name)?;
    if let Some(id) = doc.object_id(br.layout) {
        if matches!(doc.object(id), Some(ObjectType::Layout(_))) {
            return Some(id);
        }
    }
    doc.layouts.ids().find(|lid| {
        matches!(doc.object(*lid), Some(ObjectType::Layout(l)) if l.block_record == br.handle)
    })
}

/// Link layouts and their block records both ways, and give every model or
/// paper space block record without a layout a synthetic one.
fn resolve_orphan_layouts(doc: &mut CadDocument) {
    let layout_ids: Vec<ObjectId> = doc
        .objects()
        .filter(|(_, o)| matches!(o, ObjectType::Layout(_)))
        .map(|(id, _)| id)
        .collect();

    for id in layout_ids {
        let (handle, block_handle, name) = match doc.object(id) {
            Some(ObjectType::Layout(l)) => (l.common.handle, l.block_record, l.name.clone()),
            _ => continue,
        };
        if !doc.layouts.contains(&name) {
            doc.layouts.insert(&name, id);
        }
        let block_name = match doc.block_record_name(block_handle) {
            Some(n) => n.to_string(),
            None => continue,
        };
        let current = doc.block_records.get(&block_name).map(|br| br.layout);
        let linked = current
            .map(|h| matches!(doc.object_by_handle(h), Some(ObjectType::Layout(_))))
            .unwrap_or(false);
        if !linked {
            if let Some(br) = doc.block_records.get_mut(&block_name) {
                br.layout = handle;
            }
        }
    }

    let orphans: Vec<(String, Handle)> = doc
        .block_records
        .iter()
        .filter(|br| br.is_layout_block())
        .filter(|br| !matches!(doc.object_by_handle(br.layout), Some(ObjectType::Layout(_))))
        .map(|br| (br.name.clone(), br.handle))
        .collect();

    for (block_name, block_handle) in orphans {
        let name = if block_name.eq_ignore_ascii_case(BlockRecord::MODEL_SPACE) {
            Layout::MODEL.to_string()
        } else {
            let mut n = doc.layouts.len();
            loop {
                let candidate = format!("Layout{}", n);
                if !doc.layouts.contains(&candidate) {
                    break candidate;
                }
                n += 1;
            }
        };
        tracing::debug!(block = %block_name, layout = %name, "creating layout for block record");
        let mut layout = Layout::new(name.clone());
        layout.common.handle = doc.allocate_handle();
        layout.common.owner = doc.layouts.dictionary;
        layout.block_record = block_handle;
        layout.tab_order = doc.layouts.len() as i16;
        let layout_handle = layout.common.handle;
        let id = doc.add_object(ObjectType::Layout(layout));
        doc.layouts.insert(&name, id);
        if let Some(br) = doc.block_records.get_mut(&block_name) {
            br.layout = layout_handle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Insert, Line, Viewport};
    use crate::objects::Group;

    fn doc_with_blocks() -> CadDocument {
        let mut doc = CadDocument::new();
        let mut block = BlockRecord::new("Door");
        block.handle = Handle::new(0x80);
        doc.add_table_entry(block);
        doc
    }

    #[test]
    fn test_register_keeps_first() {
        let mut deferred = DeferredReferences::new();
        deferred.register(EntityId(0), PendingReference::Owner(Handle::new(1)));
        deferred.register(EntityId(0), PendingReference::Owner(Handle::new(2)));
        deferred.register(
            EntityId(1),
            PendingReference::HatchContours {
                path: 0,
                handles: vec![Handle::new(3)],
            },
        );
        deferred.register(
            EntityId(1),
            PendingReference::HatchContours {
                path: 0,
                handles: vec![Handle::new(4)],
            },
        );
        assert_eq!(deferred.len(), 2);
        assert_eq!(deferred.owners[&EntityId(0)], OwnerRef::Handle(Handle::new(1)));
        assert_eq!(deferred.hatch_contours[&(EntityId(1), 0)].len(), 2);
    }

    #[test]
    fn test_forward_owner_is_placed() {
        let mut doc = CadDocument::new();
        let mut line = Line::new();
        line.common.handle = Handle::new(0x200);
        let id = doc.add_entity(EntityType::Line(line));

        let mut deferred = DeferredReferences::new();
        deferred.register(id, PendingReference::Owner(Handle::new(0x90)));

        let mut block = BlockRecord::new("Late");
        block.handle = Handle::new(0x90);
        doc.add_table_entry(block);

        deferred.resolve_all(&mut doc);
        assert_eq!(doc.block_records.get("Late").unwrap().entities, vec![id]);
        assert_eq!(doc.entity(id).unwrap().common().owner, Handle::new(0x90));
        assert!(deferred.is_empty());
    }

    #[test]
    fn test_owner_by_block_name() {
        let mut doc = CadDocument::new();
        let id = doc.add_entity(EntityType::Line(Line::new()));
        let mut deferred = DeferredReferences::new();
        deferred.register(id, PendingReference::OwnerBlock("*paper_space".into()));
        deferred.resolve_all(&mut doc);

        let paper = doc.block_records.get(BlockRecord::PAPER_SPACE).unwrap();
        assert_eq!(paper.entities, vec![id]);
        assert_eq!(doc.entity(id).unwrap().common().owner, paper.handle);
        assert!(doc.block_records.get(BlockRecord::MODEL_SPACE).unwrap().entities.is_empty());
        assert!(!doc.notifications.has_type(NotificationType::Unresolved));
    }

    #[test]
    fn test_unknown_owner_goes_to_model_space() {
        let mut doc = CadDocument::new();
        let id = doc.add_entity(EntityType::Line(Line::new()));
        let mut deferred = DeferredReferences::new();
        deferred.register(id, PendingReference::Owner(Handle::new(0xDEAD)));
        deferred.resolve_all(&mut doc);
        let model = doc.block_records.get(BlockRecord::MODEL_SPACE).unwrap();
        assert_eq!(model.entities, vec![id]);
        assert!(doc.notifications.has_type(NotificationType::Unresolved));
    }

    #[test]
    fn test_insert_block_and_unit_correction() {
        let mut doc = doc_with_blocks();
        doc.block_records.get_mut("Door").unwrap().units = crate::types::Units::Meters;
        let mut frame = BlockRecord::new("Frame");
        frame.units = crate::types::Units::Millimeters;
        doc.add_table_entry(frame);

        let mut insert = Insert::new();
        insert.block_name = "Door".into();
        let id = doc.add_entity(EntityType::Insert(insert));

        let mut deferred = DeferredReferences::new();
        deferred.register(id, PendingReference::BlockName("Door".into()));
        deferred.set_container(id, "Frame");
        deferred.resolve_all(&mut doc);

        match doc.entity(id) {
            Some(EntityType::Insert(i)) => {
                assert_eq!(i.block, Some(Handle::new(0x80)));
                assert!((i.x_scale - 1000.0).abs() < 1e-9);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_base_viewport_goes_to_layout() {
        let mut doc = CadDocument::new();
        let paper = doc.block_records.get(BlockRecord::PAPER_SPACE).unwrap().handle;
        let mut layout = Layout::new("Layout1");
        layout.common.handle = doc.allocate_handle();
        layout.block_record = paper;
        let layout_id = doc.add_object(ObjectType::Layout(layout));
        doc.layouts.insert("Layout1", layout_id);

        let mut vp = Viewport::new();
        vp.id = 1;
        let id = doc.add_entity(EntityType::Viewport(vp));
        let mut deferred = DeferredReferences::new();
        deferred.register(id, PendingReference::Owner(paper));
        deferred.resolve_all(&mut doc);

        let paper_br = doc.block_records.get(BlockRecord::PAPER_SPACE).unwrap();
        assert!(paper_br.entities.is_empty());
        assert_eq!(doc.object_id(paper_br.layout), Some(layout_id));
        match doc.object(layout_id) {
            Some(ObjectType::Layout(l)) => assert_eq!(l.base_viewport, Some(id)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_orphan_layouts_are_synthesised() {
        let mut doc = CadDocument::new();
        DeferredReferences::new().resolve_all(&mut doc);
        assert!(doc.layouts.contains("Model"));
        assert_eq!(doc.layouts.len(), 2);
        for br in doc.block_records.iter().filter(|b| b.is_layout_block()) {
            assert!(matches!(doc.object_by_handle(br.layout), Some(ObjectType::Layout(_))));
        }
    }

    #[test]
    fn test_group_members_and_second_pass() {
        let mut doc = CadDocument::new();
        let mut line = Line::new();
        line.common.handle = Handle::new(0x300);
        let line_id = doc.add_entity(EntityType::Line(line));
        let mut group = Group::new("G");
        group.common.handle = Handle::new(0x301);
        let gid = doc.add_object(ObjectType::Group(group));

        let mut deferred = DeferredReferences::new();
        deferred.register_group_members(gid, vec![Handle::new(0x300), Handle::new(0x999)]);
        deferred.resolve_all(&mut doc);
        let notes = doc.notifications.len();
        let objects = doc.object_count();

        deferred.resolve_all(&mut doc);
        assert_eq!(doc.notifications.len(), notes);
        assert_eq!(doc.object_count(), objects);
        match doc.object(gid) {
            Some(ObjectType::Group(g)) => assert_eq!(g.entities, vec![line_id]),
            other => panic!("unexpected {:?}", other),
        }
    }
}
