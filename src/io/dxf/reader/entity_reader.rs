//! Entity record decoders
//!
//! Every entity type has one decoder, looked up by record name in
//! [`ENTITY_DECODERS`]. A decoder reads the fields of one record (and the
//! VERTEX, ATTRIB and SEQEND records that belong to it) and returns the entity
//! with the references it could not resolve yet.

use super::deferred::PendingReference;
use super::section_reader::SectionReader;
use super::stream_reader::DxfCodePair;
use crate::entities::dimension::is_dimension_subclass_marker;
use crate::entities::mesh::MeshEdge;
use crate::entities::*;
use crate::error::Result;
use crate::types::{Handle, Vector2, Vector3};
use ahash::AHashMap;
use once_cell::sync::Lazy;

/// A decoded entity and the references it holds
#[derive(Debug)]
pub struct DecodedEntity {
    pub entity: EntityType,
    pub pending: Vec<PendingReference>,
}

impl DecodedEntity {
    fn new(entity: EntityType) -> Self {
        Self {
            entity,
            pending: Vec::new(),
        }
    }

    fn with_pending(entity: EntityType, pending: Vec<PendingReference>) -> Self {
        Self { entity, pending }
    }
}

/// Reads the entity record `name` whose code 0 pair was just consumed
pub type EntityDecoder = fn(&mut SectionReader<'_>, &str) -> Result<DecodedEntity>;

static ENTITY_DECODERS: Lazy<AHashMap<&'static str, EntityDecoder>> = Lazy::new(|| {
    let mut map: AHashMap<&'static str, EntityDecoder> = AHashMap::new();
    map.insert("3DFACE", read_face3d);
    map.insert("ARC", read_arc);
    map.insert("ATTDEF", read_attribute_definition);
    map.insert("CIRCLE", read_circle);
    map.insert("DGNUNDERLAY", read_underlay);
    map.insert("DIMENSION", read_dimension);
    map.insert("DWFUNDERLAY", read_underlay);
    map.insert("ELLIPSE", read_ellipse);
    map.insert("HATCH", read_hatch);
    map.insert("IMAGE", read_raster_image);
    map.insert("INSERT", read_insert);
    map.insert("LEADER", read_leader);
    map.insert("LINE", read_line);
    map.insert("LWPOLYLINE", read_lwpolyline);
    map.insert("MESH", read_mesh);
    map.insert("MLINE", read_mline);
    map.insert("MTEXT", read_mtext);
    map.insert("PDFUNDERLAY", read_underlay);
    map.insert("POINT", read_point);
    map.insert("POLYLINE", read_polyline);
    map.insert("RAY", read_ray);
    map.insert("SOLID", read_solid);
    map.insert("SPLINE", read_spline);
    map.insert("TEXT", read_text);
    map.insert("TOLERANCE", read_tolerance);
    map.insert("TRACE", read_solid);
    map.insert("VIEWPORT", read_viewport);
    map.insert("WIPEOUT", read_raster_image);
    map.insert("XLINE", read_ray);
    map
});

/// Decoder for the entity record `name`
pub fn decoder(name: &str) -> Option<EntityDecoder> {
    ENTITY_DECODERS.get(name).copied()
}

fn read_line(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut line = Line::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            10 | 20 | 30 => pair.set_axis(&mut line.start)?,
            11 | 21 | 31 => pair.set_axis(&mut line.end)?,
            39 => line.thickness = pair.as_double()?,
            210 | 220 | 230 => pair.set_axis(&mut line.normal)?,
            _ => r.read_common_field(&pair, &mut line.common)?,
        }
    }
    Ok(DecodedEntity::new(EntityType::Line(line)))
}

/// Radius of an arc or circle; unusable values fall back to 1.
fn checked_radius(r: &mut SectionReader<'_>, pair: &DxfCodePair) -> Result<f64> {
    let radius = pair.as_double()?;
    if radius.is_nan() || radius < 0.0 {
        r.warn(format!("invalid radius {}, 1.0 used", radius), pair.position);
        return Ok(1.0);
    }
    Ok(radius)
}

fn read_arc(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut arc = Arc::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            10 | 20 | 30 => pair.set_axis(&mut arc.center)?,
            40 => arc.radius = checked_radius(r, &pair)?,
            50 => arc.start_angle = pair.as_double()?,
            51 => arc.end_angle = pair.as_double()?,
            39 => arc.thickness = pair.as_double()?,
            210 | 220 | 230 => pair.set_axis(&mut arc.normal)?,
            _ => r.read_common_field(&pair, &mut arc.common)?,
        }
    }
    Ok(DecodedEntity::new(EntityType::Arc(arc)))
}

fn read_circle(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut circle = Circle::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            10 | 20 | 30 => pair.set_axis(&mut circle.center)?,
            40 => circle.radius = checked_radius(r, &pair)?,
            39 => circle.thickness = pair.as_double()?,
            210 | 220 | 230 => pair.set_axis(&mut circle.normal)?,
            _ => r.read_common_field(&pair, &mut circle.common)?,
        }
    }
    Ok(DecodedEntity::new(EntityType::Circle(circle)))
}

fn read_ellipse(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut ellipse = Ellipse::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            10 | 20 | 30 => pair.set_axis(&mut ellipse.center)?,
            11 | 21 | 31 => pair.set_axis(&mut ellipse.major_axis)?,
            210 | 220 | 230 => pair.set_axis(&mut ellipse.normal)?,
            40 => {
                let ratio = pair.as_double()?;
                ellipse.minor_axis_ratio = if ratio > 0.0 && ratio <= 1.0 {
                    ratio
                } else {
                    r.warn(format!("invalid axis ratio {}, 1.0 used", ratio), pair.position);
                    1.0
                };
            }
            41 => ellipse.start_parameter = pair.as_double()?,
            42 => ellipse.end_parameter = pair.as_double()?,
            _ => r.read_common_field(&pair, &mut ellipse.common)?,
        }
    }
    Ok(DecodedEntity::new(EntityType::Ellipse(ellipse)))
}

fn read_point(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut point = Point::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            10 | 20 | 30 => pair.set_axis(&mut point.location)?,
            39 => point.thickness = pair.as_double()?,
            50 => point.x_axis_angle = pair.as_double()?,
            210 | 220 | 230 => pair.set_axis(&mut point.normal)?,
            _ => r.read_common_field(&pair, &mut point.common)?,
        }
    }
    Ok(DecodedEntity::new(EntityType::Point(point)))
}

fn read_face3d(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut face = Face3D::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            10..=13 | 20..=23 | 30..=33 => {
                pair.set_axis(&mut face.corners[(pair.code % 10) as usize])?
            }
            70 => face.invisible_edges = InvisibleEdgeFlags::from_bits_truncate(pair.as_i16()?),
            _ => r.read_common_field(&pair, &mut face.common)?,
        }
    }
    Ok(DecodedEntity::new(EntityType::Face3D(face)))
}

/// SOLID and TRACE
fn read_solid(r: &mut SectionReader<'_>, name: &str) -> Result<DecodedEntity> {
    let mut solid = Solid::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            10..=13 | 20..=23 | 30..=33 => {
                pair.set_axis(&mut solid.corners[(pair.code % 10) as usize])?
            }
            39 => solid.thickness = pair.as_double()?,
            210 | 220 | 230 => pair.set_axis(&mut solid.normal)?,
            _ => r.read_common_field(&pair, &mut solid.common)?,
        }
    }
    let entity = if name == "TRACE" {
        EntityType::Trace(solid)
    } else {
        EntityType::Solid(solid)
    };
    Ok(DecodedEntity::new(entity))
}

/// RAY and XLINE
fn read_ray(r: &mut SectionReader<'_>, name: &str) -> Result<DecodedEntity> {
    let mut ray = Ray::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            10 | 20 | 30 => pair.set_axis(&mut ray.base_point)?,
            11 | 21 | 31 => pair.set_axis(&mut ray.direction)?,
            _ => r.read_common_field(&pair, &mut ray.common)?,
        }
    }
    let entity = if name == "XLINE" {
        EntityType::XLine(ray)
    } else {
        EntityType::Ray(ray)
    };
    Ok(DecodedEntity::new(entity))
}

fn read_tolerance(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut tolerance = Tolerance::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            3 => tolerance.style_name = pair.as_string()?.to_string(),
            10 | 20 | 30 => pair.set_axis(&mut tolerance.insertion_point)?,
            11 | 21 | 31 => pair.set_axis(&mut tolerance.direction)?,
            210 | 220 | 230 => pair.set_axis(&mut tolerance.normal)?,
            1 => tolerance.text = pair.as_string()?.to_string(),
            _ => r.read_common_field(&pair, &mut tolerance.common)?,
        }
    }
    Ok(DecodedEntity::new(EntityType::Tolerance(tolerance)))
}

/// Text height, or the drawing's default when the value is not positive
fn checked_height(r: &SectionReader<'_>, height: f64) -> f64 {
    if height > 0.0 {
        height
    } else {
        r.document.header.text_height
    }
}

fn read_text(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut text = Text::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            1 => text.value = pair.as_string()?.to_string(),
            10 | 20 | 30 => pair.set_axis(&mut text.insertion_point)?,
            11 | 21 | 31 => {
                pair.set_axis(text.alignment_point.get_or_insert(Vector3::ZERO))?
            }
            40 => text.height = checked_height(r, pair.as_double()?),
            50 => text.rotation = pair.as_double()?,
            41 => text.width_factor = pair.as_double()?,
            51 => text.oblique_angle = pair.as_double()?,
            7 => text.style = pair.as_string()?.to_string(),
            71 => text.generation_flags = pair.as_i16()?,
            72 => text.horizontal_alignment = pair.as_i16()?,
            73 => text.vertical_alignment = pair.as_i16()?,
            39 => text.thickness = pair.as_double()?,
            210 | 220 | 230 => pair.set_axis(&mut text.normal)?,
            _ => r.read_common_field(&pair, &mut text.common)?,
        }
    }
    Ok(DecodedEntity::new(EntityType::Text(text)))
}

fn read_mtext(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut mtext = MText::new();
    let mut chunks = String::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            3 => chunks.push_str(pair.as_string()?),
            1 => {
                chunks.push_str(pair.as_string()?);
                mtext.value = std::mem::take(&mut chunks);
            }
            10 | 20 | 30 => pair.set_axis(&mut mtext.insertion_point)?,
            40 => mtext.height = checked_height(r, pair.as_double()?),
            41 => mtext.rectangle_width = pair.as_double()?,
            46 => mtext.rectangle_height = pair.as_double()?,
            71 => mtext.attachment_point = pair.as_i16()?,
            72 => mtext.drawing_direction = pair.as_i16()?,
            7 => mtext.style = pair.as_string()?.to_string(),
            210 | 220 | 230 => pair.set_axis(&mut mtext.normal)?,
            11 | 21 | 31 => pair.set_axis(&mut mtext.x_direction)?,
            50 => mtext.rotation = pair.as_double()?,
            73 => mtext.line_spacing_style = pair.as_i16()?,
            44 => mtext.line_spacing_factor = pair.as_double()?,
            _ => r.read_common_field(&pair, &mut mtext.common)?,
        }
    }
    if !chunks.is_empty() {
        mtext.value.push_str(&chunks);
    }
    Ok(DecodedEntity::new(EntityType::MText(mtext)))
}

/// Fields shared by ATTDEF and ATTRIB; false when `pair` is not one of them.
fn read_attribute_field(
    r: &mut SectionReader<'_>,
    pair: &DxfCodePair,
    base: &mut AttributeBase,
) -> Result<bool> {
    match pair.code {
        1 => base.value = pair.as_string()?.to_string(),
        2 => base.tag = pair.as_string()?.to_string(),
        10 | 20 | 30 => pair.set_axis(&mut base.insertion_point)?,
        11 | 21 | 31 => pair.set_axis(base.alignment_point.get_or_insert(Vector3::ZERO))?,
        40 => base.height = checked_height(r, pair.as_double()?),
        50 => base.rotation = pair.as_double()?,
        41 => base.width_factor = pair.as_double()?,
        51 => base.oblique_angle = pair.as_double()?,
        7 => base.style = pair.as_string()?.to_string(),
        70 => base.flags = AttributeFlags::from_bits_truncate(pair.as_i16()?),
        73 => base.field_length = pair.as_i16()?,
        72 => base.horizontal_alignment = pair.as_i16()?,
        74 => base.vertical_alignment = pair.as_i16()?,
        280 => base.lock_position = pair.as_byte()? != 0,
        39 => base.thickness = pair.as_double()?,
        210 | 220 | 230 => pair.set_axis(&mut base.normal)?,
        _ => return Ok(false),
    }
    Ok(true)
}

fn read_attribute_definition(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut attdef = AttributeDefinition::new();
    while let Some(pair) = r.next_field()? {
        if pair.code == 3 {
            attdef.prompt = pair.as_string()?.to_string();
        } else if !read_attribute_field(r, &pair, &mut attdef.base)? {
            r.read_common_field(&pair, &mut attdef.common)?;
        }
    }
    Ok(DecodedEntity::new(EntityType::AttributeDefinition(attdef)))
}

fn read_attribute(r: &mut SectionReader<'_>) -> Result<Attribute> {
    let mut attribute = Attribute::new();
    while let Some(pair) = r.next_field()? {
        if !read_attribute_field(r, &pair, &mut attribute.base)? {
            r.read_common_field(&pair, &mut attribute.common)?;
        }
    }
    r.document.note_handle(attribute.common.handle);
    Ok(attribute)
}

/// Read a trailing SEQEND record, returning its handle.
fn read_seqend(r: &mut SectionReader<'_>) -> Result<Handle> {
    if !r.next_record_is("SEQEND")? {
        return Ok(Handle::NULL);
    }
    let mut handle = Handle::NULL;
    while let Some(pair) = r.next_field()? {
        if pair.code == 5 {
            handle = pair.as_handle()?;
        }
    }
    r.document.note_handle(handle);
    Ok(handle)
}

fn read_insert(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut insert = Insert::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            2 => insert.block_name = pair.as_string()?.to_string(),
            10 | 20 | 30 => pair.set_axis(&mut insert.insert_point)?,
            41 => insert.x_scale = pair.as_double()?,
            42 => insert.y_scale = pair.as_double()?,
            43 => insert.z_scale = pair.as_double()?,
            50 => insert.rotation = pair.as_double()?,
            70 => insert.column_count = pair.as_i16()?,
            71 => insert.row_count = pair.as_i16()?,
            44 => insert.column_spacing = pair.as_double()?,
            45 => insert.row_spacing = pair.as_double()?,
            210 | 220 | 230 => pair.set_axis(&mut insert.normal)?,
            66 => {}
            _ => r.read_common_field(&pair, &mut insert.common)?,
        }
    }
    for scale in [&mut insert.x_scale, &mut insert.y_scale, &mut insert.z_scale] {
        if *scale == 0.0 || scale.is_nan() {
            *scale = 1.0;
        }
    }

    while r.next_record_is("ATTRIB")? {
        let mut attribute = read_attribute(r)?;
        attribute.common.owner = insert.common.handle;
        insert.attributes.push(attribute);
    }
    insert.seqend_handle = read_seqend(r)?;

    let mut pending = Vec::new();
    if !insert.block_name.is_empty() {
        pending.push(PendingReference::BlockName(insert.block_name.clone()));
    }
    Ok(DecodedEntity::with_pending(EntityType::Insert(insert), pending))
}

fn read_lwpolyline(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut pline = LwPolyline::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            70 => pline.flags = pair.as_i16()?,
            43 => pline.constant_width = pair.as_double()?,
            38 => pline.elevation = pair.as_double()?,
            39 => pline.thickness = pair.as_double()?,
            210 | 220 | 230 => pair.set_axis(&mut pline.normal)?,
            10 => pline.vertices.push(LwVertex {
                location: Vector2::new(pair.as_double()?, 0.0),
                start_width: 0.0,
                end_width: 0.0,
                bulge: 0.0,
            }),
            20 | 40 | 41 | 42 => {
                let value = pair.as_double()?;
                if let Some(v) = pline.vertices.last_mut() {
                    match pair.code {
                        20 => v.location.y = value,
                        40 => v.start_width = value,
                        41 => v.end_width = value,
                        _ => v.bulge = value,
                    }
                }
            }
            90 | 91 => {}
            _ => r.read_common_field(&pair, &mut pline.common)?,
        }
    }
    Ok(DecodedEntity::new(EntityType::LwPolyline(pline)))
}

fn read_vertex(r: &mut SectionReader<'_>) -> Result<Vertex> {
    let mut vertex = Vertex::new();
    let mut common = EntityCommon::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            10 | 20 | 30 => pair.set_axis(&mut vertex.location)?,
            40 => vertex.start_width = pair.as_double()?,
            41 => vertex.end_width = pair.as_double()?,
            42 => vertex.bulge = pair.as_double()?,
            70 => vertex.flags = pair.as_i16()?,
            50 => vertex.curve_tangent = pair.as_double()?,
            71..=74 => vertex.face_indices[(pair.code - 71) as usize] = pair.as_i16()?,
            _ => r.read_common_field(&pair, &mut common)?,
        }
    }
    r.document.note_handle(common.handle);
    vertex.handle = common.handle;
    vertex.layer = common.layer;
    Ok(vertex)
}

fn read_polyline(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut pline = Polyline::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            10 | 20 | 30 => pair.set_axis(&mut pline.elevation)?,
            70 => pline.flags = PolylineFlags::from_bits_truncate(pair.as_i16()?),
            40 => pline.default_start_width = pair.as_double()?,
            41 => pline.default_end_width = pair.as_double()?,
            71 => pline.m_count = pair.as_i16()?,
            72 => pline.n_count = pair.as_i16()?,
            75 => pline.smooth_surface = pair.as_i16()?,
            39 => pline.thickness = pair.as_double()?,
            210 | 220 | 230 => pair.set_axis(&mut pline.normal)?,
            66 | 73 | 74 => {}
            _ => r.read_common_field(&pair, &mut pline.common)?,
        }
    }
    while r.next_record_is("VERTEX")? {
        let vertex = read_vertex(r)?;
        pline.vertices.push(vertex);
    }
    pline.seqend_handle = read_seqend(r)?;
    Ok(DecodedEntity::new(EntityType::Polyline(pline)))
}

fn read_spline(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut spline = Spline::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            210 | 220 | 230 => pair.set_axis(&mut spline.normal)?,
            70 => spline.flags = SplineFlags::from_bits_truncate(pair.as_i16()?),
            71 => spline.degree = pair.as_i16()?,
            72..=74 => {}
            42 => spline.knot_tolerance = pair.as_double()?,
            43 => spline.control_point_tolerance = pair.as_double()?,
            44 => spline.fit_tolerance = pair.as_double()?,
            12 | 22 | 32 => {
                pair.set_axis(spline.start_tangent.get_or_insert(Vector3::ZERO))?
            }
            13 | 23 | 33 => pair.set_axis(spline.end_tangent.get_or_insert(Vector3::ZERO))?,
            40 => spline.knots.push(pair.as_double()?),
            41 => spline.weights.push(pair.as_double()?),
            10 => spline
                .control_points
                .push(Vector3::new(pair.as_double()?, 0.0, 0.0)),
            20 | 30 => {
                if let Some(p) = spline.control_points.last_mut() {
                    pair.set_axis(p)?;
                }
            }
            11 => spline.fit_points.push(Vector3::new(pair.as_double()?, 0.0, 0.0)),
            21 | 31 => {
                if let Some(p) = spline.fit_points.last_mut() {
                    pair.set_axis(p)?;
                }
            }
            _ => r.read_common_field(&pair, &mut spline.common)?,
        }
    }
    Ok(DecodedEntity::new(EntityType::Spline(spline)))
}

fn read_dimension(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut dim = Dimension::new(DimensionKind::Linear {
        first_point: Vector3::ZERO,
        second_point: Vector3::ZERO,
        rotation: 0.0,
        ext_line_rotation: 0.0,
    });
    let mut p13 = Vector3::ZERO;
    let mut p14 = Vector3::ZERO;
    let mut p15 = Vector3::ZERO;
    let mut p16 = Vector3::ZERO;
    let mut leader_length = 0.0;
    let mut rotation = 0.0;
    let mut ext_line_rotation = 0.0;
    let mut subclass = None;
    let position = r.reader.position();

    while let Some(pair) = r.next_field()? {
        match pair.code {
            280 => dim.version = pair.as_byte()?,
            2 => dim.block_name = pair.as_string()?.to_string(),
            3 => dim.style_name = pair.as_string()?.to_string(),
            10 | 20 | 30 => pair.set_axis(&mut dim.definition_point)?,
            11 | 21 | 31 => pair.set_axis(&mut dim.text_middle_point)?,
            12 | 22 | 32 => pair.set_axis(&mut dim.insertion_point)?,
            70 => dim.flags = pair.as_i16()?,
            71 => dim.attachment_point = pair.as_i16()?,
            72 => dim.line_spacing_style = pair.as_i16()?,
            41 => dim.line_spacing_factor = pair.as_double()?,
            42 => dim.measurement = pair.as_double()?,
            1 => dim.text = pair.as_string()?.to_string(),
            53 => dim.text_rotation = pair.as_double()?,
            51 => dim.horizontal_direction = pair.as_double()?,
            210 | 220 | 230 => pair.set_axis(&mut dim.normal)?,
            13 | 23 | 33 => pair.set_axis(&mut p13)?,
            14 | 24 | 34 => pair.set_axis(&mut p14)?,
            15 | 25 | 35 => pair.set_axis(&mut p15)?,
            16 | 26 | 36 => pair.set_axis(&mut p16)?,
            40 => leader_length = pair.as_double()?,
            50 => rotation = pair.as_double()?,
            52 => ext_line_rotation = pair.as_double()?,
            100 => {
                let marker = pair.as_string()?;
                if is_dimension_subclass_marker(marker) {
                    subclass = Some(marker.to_string());
                }
            }
            _ => r.read_common_field(&pair, &mut dim.common)?,
        }
    }

    let kind = match DimensionKind::from_flags(dim.flags)
        .or_else(|| subclass.as_deref().and_then(DimensionKind::from_subclass_marker))
    {
        Some(kind) => kind,
        None => {
            r.warn(
                format!("unknown dimension type {}, read as linear", dim.flags & 0x0F),
                position,
            );
            dim.kind.clone()
        }
    };
    dim.kind = match kind {
        DimensionKind::Linear { .. } => DimensionKind::Linear {
            first_point: p13,
            second_point: p14,
            rotation,
            ext_line_rotation,
        },
        DimensionKind::Aligned { .. } => DimensionKind::Aligned {
            first_point: p13,
            second_point: p14,
            ext_line_rotation,
        },
        DimensionKind::Angular2Line { .. } => DimensionKind::Angular2Line {
            first_point: p13,
            second_point: p14,
            angle_vertex: p15,
            arc_point: p16,
        },
        DimensionKind::Diameter { .. } => DimensionKind::Diameter {
            angle_vertex: p15,
            leader_length,
        },
        DimensionKind::Radius { .. } => DimensionKind::Radius {
            angle_vertex: p15,
            leader_length,
        },
        DimensionKind::Angular3Point { .. } => DimensionKind::Angular3Point {
            first_point: p13,
            second_point: p14,
            angle_vertex: p15,
        },
        DimensionKind::Ordinate { is_x_type, .. } => DimensionKind::Ordinate {
            feature_location: p13,
            leader_endpoint: p14,
            is_x_type,
        },
    };

    let mut pending = Vec::new();
    if !dim.block_name.is_empty() {
        pending.push(PendingReference::BlockName(dim.block_name.clone()));
    }
    Ok(DecodedEntity::with_pending(EntityType::Dimension(dim), pending))
}

fn read_leader(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut leader = Leader::new();
    let mut annotation = Handle::NULL;
    while let Some(pair) = r.next_field()? {
        match pair.code {
            3 => leader.style_name = pair.as_string()?.to_string(),
            71 => leader.arrow_enabled = pair.as_i16()? != 0,
            72 => leader.path_type = pair.as_i16()?,
            73 => leader.creation_type = pair.as_i16()?,
            74 => leader.hookline_direction = pair.as_i16()?,
            75 => leader.has_hookline = pair.as_i16()? != 0,
            40 => leader.text_height = pair.as_double()?,
            41 => leader.text_width = pair.as_double()?,
            76 => {}
            10 => leader
                .vertices
                .push(Vector3::new(pair.as_double()?, 0.0, 0.0)),
            20 | 30 => {
                if let Some(v) = leader.vertices.last_mut() {
                    pair.set_axis(v)?;
                }
            }
            77 => leader.override_color = pair.as_i16()?,
            340 => annotation = pair.as_handle()?,
            210 | 220 | 230 => pair.set_axis(&mut leader.normal)?,
            211 | 221 | 231 => pair.set_axis(&mut leader.horizontal_direction)?,
            212 | 222 | 232 => pair.set_axis(&mut leader.block_offset)?,
            213 | 223 | 233 => pair.set_axis(&mut leader.annotation_offset)?,
            _ => r.read_common_field(&pair, &mut leader.common)?,
        }
    }
    let pending = vec![PendingReference::LeaderAnnotation(annotation)];
    Ok(DecodedEntity::with_pending(EntityType::Leader(leader), pending))
}

fn read_hatch(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut hatch = Hatch::new();
    let mut pending = Vec::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            10 | 20 => {}
            30 => hatch.elevation = pair.as_double()?,
            210 | 220 | 230 => pair.set_axis(&mut hatch.normal)?,
            2 => hatch.pattern_name = pair.as_string()?.to_string(),
            70 => hatch.is_solid = pair.as_i16()? != 0,
            71 => hatch.is_associative = pair.as_i16()? != 0,
            91 => {
                let count = pair.as_int()?.max(0);
                for index in 0..count as usize {
                    if !r.at_code(92)? {
                        break;
                    }
                    let (path, contours) = read_boundary_path(r)?;
                    hatch.paths.push(path);
                    if !contours.is_empty() {
                        pending.push(PendingReference::HatchContours {
                            path: index,
                            handles: contours,
                        });
                    }
                }
            }
            75 => hatch.style = pair.as_i16()?,
            76 => hatch.pattern_type = pair.as_i16()?,
            52 => hatch.pattern_angle = pair.as_double()?,
            41 => hatch.pattern_scale = pair.as_double()?,
            77 => hatch.is_double = pair.as_i16()? != 0,
            78 => {
                for _ in 0..pair.as_int()?.max(0) {
                    if !r.at_code(53)? {
                        break;
                    }
                    let line = read_pattern_line(r)?;
                    hatch.pattern_lines.push(line);
                }
            }
            47 => hatch.pixel_size = pair.as_double()?,
            98 => {
                for _ in 0..pair.as_int()?.max(0) {
                    if !r.at_code(10)? {
                        break;
                    }
                    let seed = r.take_point_2d(10)?;
                    hatch.seed_points.push(seed);
                }
            }
            _ => r.read_common_field(&pair, &mut hatch.common)?,
        }
    }
    Ok(DecodedEntity::with_pending(EntityType::Hatch(hatch), pending))
}

/// One boundary path and the handles of its source entities
fn read_boundary_path(r: &mut SectionReader<'_>) -> Result<(BoundaryPath, Vec<Handle>)> {
    let flags = BoundaryPathFlags::from_bits_truncate(r.take_int(92)? as i32);
    let mut path = BoundaryPath::new(flags);
    let mut source_count = None;

    if flags.contains(BoundaryPathFlags::POLYLINE) {
        let has_bulge = r.take_int(72)? != 0;
        path.polyline_closed = r.take_int(73)? != 0;
        let count = r.take_int(93)?.max(0);
        for _ in 0..count {
            if !r.at_code(10)? {
                break;
            }
            let x = r.take_double(10)?;
            let y = r.take_double(20)?;
            let bulge = if has_bulge { r.take_double(42)? } else { 0.0 };
            path.polyline.push(Vector3::new(x, y, bulge));
        }
    } else {
        let count = r.take_int(93)?.max(0);
        for _ in 0..count {
            if !r.at_code(72)? {
                break;
            }
            let edge = match r.take_int(72)? {
                1 => BoundaryEdge::Line {
                    start: r.take_point_2d(10)?,
                    end: r.take_point_2d(11)?,
                },
                2 => BoundaryEdge::CircularArc {
                    center: r.take_point_2d(10)?,
                    radius: r.take_double(40)?,
                    start_angle: r.take_double(50)?,
                    end_angle: r.take_double(51)?,
                    counter_clockwise: r.take_int(73)? != 0,
                },
                3 => BoundaryEdge::EllipticArc {
                    center: r.take_point_2d(10)?,
                    major_axis: r.take_point_2d(11)?,
                    minor_axis_ratio: r.take_double(40)?,
                    start_angle: r.take_double(50)?,
                    end_angle: r.take_double(51)?,
                    counter_clockwise: r.take_int(73)? != 0,
                },
                4 => {
                    let (edge, count) = read_spline_edge(r)?;
                    source_count = count;
                    edge
                }
                other => {
                    let position = r.reader.position();
                    r.warn(format!("unknown hatch edge type {}", other), position);
                    continue;
                }
            };
            path.edges.push(edge);
        }
    }

    let count = match source_count {
        Some(count) => count,
        None => r.take_int(97)?,
    };
    let mut contours = Vec::new();
    for _ in 0..count.max(0) {
        match r.take(330)? {
            Some(pair) => contours.push(pair.as_handle()?),
            None => break,
        }
    }
    Ok((path, contours))
}

/// A spline edge; also returns the source boundary count when the code 97
/// after the control points turned out to be that count.
fn read_spline_edge(r: &mut SectionReader<'_>) -> Result<(BoundaryEdge, Option<i64>)> {
    let degree = r.take_int(94)? as i32;
    let rational = r.take_int(73)? != 0;
    let periodic = r.take_int(74)? != 0;
    let knot_count = r.take_int(95)?.max(0);
    let control_count = r.take_int(96)?.max(0);

    let mut knots = Vec::new();
    for _ in 0..knot_count {
        match r.take(40)? {
            Some(pair) => knots.push(pair.as_double()?),
            None => break,
        }
    }
    let mut control_points = Vec::new();
    let mut weights = Vec::new();
    for _ in 0..control_count {
        if !r.at_code(10)? {
            break;
        }
        control_points.push(r.take_point_2d(10)?);
        if let Some(weight) = r.take(42)? {
            weights.push(weight.as_double()?);
        }
    }

    let mut fit_points = Vec::new();
    let mut start_tangent = None;
    let mut end_tangent = None;
    let mut source_count = None;
    if let Some(pair) = r.take(97)? {
        let count = pair.as_int()?;
        match r.reader.peek_code()? {
            Some(11 | 12 | 13 | 97) => {
                for _ in 0..count.max(0) {
                    if !r.at_code(11)? {
                        break;
                    }
                    fit_points.push(r.take_point_2d(11)?);
                }
                if r.reader.peek_code()? == Some(12) {
                    start_tangent = Some(r.take_point_2d(12)?);
                }
                if r.reader.peek_code()? == Some(13) {
                    end_tangent = Some(r.take_point_2d(13)?);
                }
            }
            _ => source_count = Some(count),
        }
    }

    let edge = BoundaryEdge::Spline {
        degree,
        rational,
        periodic,
        knots,
        control_points,
        weights,
        fit_points,
        start_tangent,
        end_tangent,
    };
    Ok((edge, source_count))
}

fn read_pattern_line(r: &mut SectionReader<'_>) -> Result<HatchPatternLine> {
    let angle = r.take_double(53)?;
    let base_point = Vector2::new(r.take_double(43)?, r.take_double(44)?);
    let offset = Vector2::new(r.take_double(45)?, r.take_double(46)?);
    let count = r.take_int(79)?.max(0);
    let mut dash_lengths = Vec::new();
    for _ in 0..count {
        match r.take(49)? {
            Some(pair) => dash_lengths.push(pair.as_double()?),
            None => break,
        }
    }
    Ok(HatchPatternLine {
        angle,
        base_point,
        offset,
        dash_lengths,
    })
}

/// IMAGE and WIPEOUT
fn read_raster_image(r: &mut SectionReader<'_>, name: &str) -> Result<DecodedEntity> {
    let mut image = RasterImage::new();
    let mut definition = Handle::NULL;
    while let Some(pair) = r.next_field()? {
        match pair.code {
            90 => image.class_version = pair.as_i32()?,
            10 | 20 | 30 => pair.set_axis(&mut image.insertion_point)?,
            11 | 21 | 31 => pair.set_axis(&mut image.u_vector)?,
            12 | 22 | 32 => pair.set_axis(&mut image.v_vector)?,
            13 | 23 => pair.set_axis_2d(&mut image.size)?,
            340 => definition = pair.as_handle()?,
            70 => image.display_flags = pair.as_i16()?,
            280 => image.clipping = pair.as_byte()? != 0,
            281 => image.brightness = pair.as_byte()?,
            282 => image.contrast = pair.as_byte()?,
            283 => image.fade = pair.as_byte()?,
            360 => image.definition_reactor = pair.as_handle()?,
            71 => image.clip_type = pair.as_i16()?,
            91 => {}
            14 => image
                .clip_boundary
                .push(Vector2::new(pair.as_double()?, 0.0)),
            24 => {
                if let Some(v) = image.clip_boundary.last_mut() {
                    v.y = pair.as_double()?;
                }
            }
            _ => r.read_common_field(&pair, &mut image.common)?,
        }
    }

    if name == "WIPEOUT" {
        return Ok(DecodedEntity::new(EntityType::Wipeout(image)));
    }
    let mut pending = Vec::new();
    if definition.is_valid() {
        pending.push(PendingReference::ImageDefinition(definition));
    }
    Ok(DecodedEntity::with_pending(EntityType::RasterImage(image), pending))
}

/// PDFUNDERLAY, DWFUNDERLAY and DGNUNDERLAY
fn read_underlay(r: &mut SectionReader<'_>, name: &str) -> Result<DecodedEntity> {
    let kind = match name {
        "DWFUNDERLAY" => UnderlayKind::Dwf,
        "DGNUNDERLAY" => UnderlayKind::Dgn,
        _ => UnderlayKind::Pdf,
    };
    let mut underlay = Underlay::new(kind);
    let mut definition = Handle::NULL;
    while let Some(pair) = r.next_field()? {
        match pair.code {
            340 => definition = pair.as_handle()?,
            10 | 20 | 30 => pair.set_axis(&mut underlay.insertion_point)?,
            41 => underlay.scale.x = pair.as_double()?,
            42 => underlay.scale.y = pair.as_double()?,
            43 => underlay.scale.z = pair.as_double()?,
            50 => underlay.rotation = pair.as_double()?,
            210 | 220 | 230 => pair.set_axis(&mut underlay.normal)?,
            280 => underlay.flags = pair.as_byte()?,
            281 => underlay.contrast = pair.as_byte()?,
            282 => underlay.fade = pair.as_byte()?,
            11 => underlay
                .clip_boundary
                .push(Vector2::new(pair.as_double()?, 0.0)),
            21 => {
                if let Some(v) = underlay.clip_boundary.last_mut() {
                    v.y = pair.as_double()?;
                }
            }
            _ => r.read_common_field(&pair, &mut underlay.common)?,
        }
    }
    let mut pending = Vec::new();
    if definition.is_valid() {
        pending.push(PendingReference::UnderlayDefinition(definition));
    }
    Ok(DecodedEntity::with_pending(EntityType::Underlay(underlay), pending))
}

fn read_viewport(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut vp = Viewport::new();
    let mut boundary = Handle::NULL;
    while let Some(pair) = r.next_field()? {
        match pair.code {
            10 | 20 | 30 => pair.set_axis(&mut vp.center)?,
            40 => vp.width = pair.as_double()?,
            41 => vp.height = pair.as_double()?,
            68 => vp.status = pair.as_i16()?,
            69 => vp.id = pair.as_i16()?,
            12 | 22 => pair.set_axis_2d(&mut vp.view_center)?,
            13 | 23 => pair.set_axis_2d(&mut vp.snap_base)?,
            14 | 24 => pair.set_axis_2d(&mut vp.snap_spacing)?,
            15 | 25 => pair.set_axis_2d(&mut vp.grid_spacing)?,
            16 | 26 | 36 => pair.set_axis(&mut vp.view_direction)?,
            17 | 27 | 37 => pair.set_axis(&mut vp.view_target)?,
            42 => vp.lens_length = pair.as_double()?,
            43 => vp.front_clip = pair.as_double()?,
            44 => vp.back_clip = pair.as_double()?,
            45 => vp.view_height = pair.as_double()?,
            50 => vp.snap_angle = pair.as_double()?,
            51 => vp.twist_angle = pair.as_double()?,
            72 => vp.circle_zoom = pair.as_i16()?,
            331 => vp.frozen_layers.push(pair.as_handle()?),
            90 => vp.status_flags = pair.as_i32()?,
            340 => boundary = pair.as_handle()?,
            281 => vp.render_mode = pair.as_byte()?,
            _ => r.read_common_field(&pair, &mut vp.common)?,
        }
    }
    let mut pending = Vec::new();
    if boundary.is_valid() {
        pending.push(PendingReference::ViewportBoundary(boundary));
    }
    Ok(DecodedEntity::with_pending(EntityType::Viewport(vp), pending))
}

fn read_mesh(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut mesh = Mesh::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            71 => mesh.version = pair.as_i16()?,
            72 => mesh.blend_crease = pair.as_i16()? != 0,
            91 => mesh.subdivision_level = pair.as_i32()?,
            92 => {
                for _ in 0..pair.as_int()?.max(0) {
                    if !r.at_code(10)? {
                        break;
                    }
                    let mut vertex = Vector3::ZERO;
                    for code in [10, 20, 30] {
                        if let Some(axis) = r.take(code)? {
                            axis.set_axis(&mut vertex)?;
                        }
                    }
                    mesh.vertices.push(vertex);
                }
            }
            93 => {
                let mut remaining = pair.as_int()?.max(0);
                while remaining > 0 {
                    let Some(size) = r.take(90)? else { break };
                    let size = size.as_int()?.max(0);
                    remaining -= 1;
                    let mut face = Vec::new();
                    for _ in 0..size.min(remaining) {
                        match r.take(90)? {
                            Some(index) => face.push(index.as_int()? as i32),
                            None => break,
                        }
                    }
                    remaining -= face.len() as i64;
                    mesh.faces.push(face);
                }
            }
            94 => {
                for _ in 0..pair.as_int()?.max(0) {
                    if !r.at_code(90)? {
                        break;
                    }
                    let start = r.take_int(90)? as i32;
                    let end = r.take_int(90)? as i32;
                    mesh.edges.push(MeshEdge {
                        start,
                        end,
                        crease: 0.0,
                    });
                }
            }
            95 => {
                let count = pair.as_int()?.max(0) as usize;
                for edge in mesh.edges.iter_mut().take(count) {
                    match r.take(140)? {
                        Some(crease) => edge.crease = crease.as_double()?,
                        None => break,
                    }
                }
            }
            _ => r.read_common_field(&pair, &mut mesh.common)?,
        }
    }
    Ok(DecodedEntity::new(EntityType::Mesh(mesh)))
}

fn read_mline(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedEntity> {
    let mut mline = MLine::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            2 => mline.style_name = pair.as_string()?.to_string(),
            340 => mline.style = Some(pair.as_handle()?),
            40 => mline.scale = pair.as_double()?,
            70 => mline.justification = pair.as_i16()?,
            71 => mline.flags = pair.as_i16()?,
            72 => {}
            73 => mline.style_element_count = pair.as_i16()?,
            10 | 20 | 30 => pair.set_axis(&mut mline.start_point)?,
            210 | 220 | 230 => pair.set_axis(&mut mline.normal)?,
            11 => mline.vertices.push(MLineVertex {
                position: Vector3::new(pair.as_double()?, 0.0, 0.0),
                direction: Vector3::ZERO,
                miter: Vector3::ZERO,
                segments: Vec::new(),
            }),
            21 | 31 | 12 | 22 | 32 | 13 | 23 | 33 => {
                if let Some(v) = mline.vertices.last_mut() {
                    let point = match pair.code % 10 {
                        1 => &mut v.position,
                        2 => &mut v.direction,
                        _ => &mut v.miter,
                    };
                    pair.set_axis(point)?;
                }
            }
            74 => {
                let mut segment = MLineSegment {
                    parameters: Vec::new(),
                    area_fill_parameters: Vec::new(),
                };
                for _ in 0..pair.as_i16()?.max(0) {
                    match r.take(41)? {
                        Some(p) => segment.parameters.push(p.as_double()?),
                        None => break,
                    }
                }
                for _ in 0..r.take_int(75)?.max(0) {
                    match r.take(42)? {
                        Some(p) => segment.area_fill_parameters.push(p.as_double()?),
                        None => break,
                    }
                }
                if let Some(v) = mline.vertices.last_mut() {
                    v.segments.push(segment);
                }
            }
            _ => r.read_common_field(&pair, &mut mline.common)?,
        }
    }
    let pending = vec![PendingReference::MLineStyle(mline.style_name.clone())];
    Ok(DecodedEntity::with_pending(EntityType::MLine(mline), pending))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CadDocument;
    use crate::io::dxf::reader::deferred::DeferredReferences;
    use crate::io::dxf::reader::DxfTextReader;
    use crate::notification::NotificationType;
    use std::io::Cursor;

    fn decode(record: &str, body: &str) -> (DecodedEntity, CadDocument) {
        let data = format!("{}0\nEOF\n", body);
        let mut stream = DxfTextReader::new(Cursor::new(data.into_bytes()));
        let mut document = CadDocument::empty();
        let mut deferred = DeferredReferences::new();
        let decoded = {
            let mut reader = SectionReader::new(&mut stream, &mut document, &mut deferred);
            let decode = decoder(record).expect("decoder");
            decode(&mut reader, record).unwrap()
        };
        (decoded, document)
    }

    #[test]
    fn test_every_supported_record_has_a_decoder() {
        for name in [
            "LINE", "ARC", "CIRCLE", "ELLIPSE", "POINT", "3DFACE", "SOLID", "TRACE", "RAY",
            "XLINE", "TEXT", "MTEXT", "ATTDEF", "INSERT", "POLYLINE", "LWPOLYLINE", "SPLINE",
            "DIMENSION", "LEADER", "HATCH", "IMAGE", "WIPEOUT", "PDFUNDERLAY", "DWFUNDERLAY",
            "DGNUNDERLAY", "VIEWPORT", "MESH", "MLINE", "TOLERANCE",
        ] {
            assert!(decoder(name).is_some(), "{}", name);
        }
        assert!(decoder("3DSOLID").is_none());
    }

    #[test]
    fn test_line() {
        let (decoded, _) = decode(
            "LINE",
            "5\n1A\n330\n1F\n100\nAcDbEntity\n8\nWalls\n10\n1.0\n20\n2.0\n30\n0.0\n11\n4.0\n21\n6.0\n31\n0.0\n",
        );
        match decoded.entity {
            EntityType::Line(line) => {
                assert_eq!(line.common.handle, Handle::new(0x1A));
                assert_eq!(line.common.owner, Handle::new(0x1F));
                assert_eq!(line.common.layer, "Walls");
                assert_eq!(line.start, Vector3::new(1.0, 2.0, 0.0));
                assert_eq!(line.end, Vector3::new(4.0, 6.0, 0.0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_negative_radius_falls_back() {
        let (decoded, doc) = decode("CIRCLE", "10\n0.0\n20\n0.0\n40\n-2.0\n");
        match decoded.entity {
            EntityType::Circle(circle) => assert_eq!(circle.radius, 1.0),
            other => panic!("unexpected {:?}", other),
        }
        assert!(doc.notifications.has_type(NotificationType::Warning));
    }

    #[test]
    fn test_text_height_defaults_to_header() {
        let (decoded, _) = decode("TEXT", "1\nHello\n40\n0.0\n10\n1.0\n20\n1.0\n");
        match decoded.entity {
            EntityType::Text(text) => {
                assert_eq!(text.value, "Hello");
                assert_eq!(text.height, 2.5);
                assert!(text.alignment_point.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_mtext_chunks() {
        let (decoded, _) = decode("MTEXT", "3\nfirst \n3\nsecond \n1\nlast\n40\n3.5\n");
        match decoded.entity {
            EntityType::MText(mtext) => {
                assert_eq!(mtext.value, "first second last");
                assert_eq!(mtext.height, 3.5);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_insert_with_attributes() {
        let (decoded, _) = decode(
            "INSERT",
            "5\n40\n66\n1\n2\nDoor\n10\n5.0\n20\n5.0\n41\n0.0\n\
             0\nATTRIB\n5\n41\n2\nNUMBER\n1\n12\n\
             0\nATTRIB\n5\n42\n2\nWIDTH\n1\n900\n\
             0\nSEQEND\n5\n43\n",
        );
        assert_eq!(
            decoded.pending,
            vec![PendingReference::BlockName("Door".to_string())]
        );
        match decoded.entity {
            EntityType::Insert(insert) => {
                assert_eq!(insert.x_scale, 1.0);
                assert_eq!(insert.attributes.len(), 2);
                assert_eq!(insert.attributes[1].base.tag, "WIDTH");
                assert_eq!(insert.attributes[1].base.value, "900");
                assert_eq!(insert.attributes[0].common.owner, Handle::new(0x40));
                assert_eq!(insert.seqend_handle, Handle::new(0x43));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_polyline_vertices() {
        let (decoded, doc) = decode(
            "POLYLINE",
            "5\n50\n66\n1\n70\n1\n\
             0\nVERTEX\n5\n51\n10\n0.0\n20\n0.0\n42\n0.5\n\
             0\nVERTEX\n5\n52\n10\n1.0\n20\n0.0\n\
             0\nSEQEND\n5\n53\n",
        );
        match decoded.entity {
            EntityType::Polyline(pline) => {
                assert!(pline.flags.contains(PolylineFlags::CLOSED));
                assert_eq!(pline.vertices.len(), 2);
                assert_eq!(pline.vertices[0].bulge, 0.5);
                assert_eq!(pline.vertices[1].handle, Handle::new(0x52));
                assert_eq!(pline.seqend_handle, Handle::new(0x53));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(doc.entity_count(), 0);
    }

    #[test]
    fn test_lwpolyline() {
        let (decoded, _) = decode(
            "LWPOLYLINE",
            "90\n2\n70\n1\n10\n0.0\n20\n0.0\n42\n1.0\n10\n2.0\n20\n3.0\n",
        );
        match decoded.entity {
            EntityType::LwPolyline(pline) => {
                assert_eq!(pline.vertices.len(), 2);
                assert_eq!(pline.vertices[0].bulge, 1.0);
                assert_eq!(pline.vertices[1].location, Vector2::new(2.0, 3.0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_radius_dimension() {
        let (decoded, _) = decode(
            "DIMENSION",
            "2\n*D1\n10\n5.0\n20\n0.0\n70\n36\n100\nAcDbRadialDimension\n15\n1.0\n25\n2.0\n40\n0.5\n",
        );
        match decoded.entity {
            EntityType::Dimension(dim) => {
                assert_eq!(
                    dim.kind,
                    DimensionKind::Radius {
                        angle_vertex: Vector3::new(1.0, 2.0, 0.0),
                        leader_length: 0.5,
                    }
                );
                assert_eq!(dim.definition_point, Vector3::new(5.0, 0.0, 0.0));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            decoded.pending,
            vec![PendingReference::BlockName("*D1".to_string())]
        );
    }

    #[test]
    fn test_unknown_dimension_type_reads_as_linear() {
        let (decoded, doc) = decode("DIMENSION", "70\n9\n13\n1.0\n14\n2.0\n");
        match decoded.entity {
            EntityType::Dimension(dim) => {
                assert!(matches!(dim.kind, DimensionKind::Linear { .. }));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(doc.notifications.has_type(NotificationType::Warning));
    }

    #[test]
    fn test_dimension_kind_from_subclass_marker() {
        let body = "70\n9\n100\nAcDbDimension\n100\nAcDbAlignedDimension\n13\n1.0\n14\n3.0\n";
        let (decoded, doc) = decode("DIMENSION", body);
        match decoded.entity {
            EntityType::Dimension(dim) => match dim.kind {
                DimensionKind::Aligned { first_point, second_point, .. } => {
                    assert_eq!(first_point.x, 1.0);
                    assert_eq!(second_point.x, 3.0);
                }
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
        assert!(!doc.notifications.has_type(NotificationType::Warning));
    }

    #[test]
    fn test_hatch_paths_and_contours() {
        let body = "2\nANSI31\n70\n0\n71\n1\n91\n2\n\
                    92\n7\n72\n1\n73\n1\n93\n2\n10\n0.0\n20\n0.0\n42\n0.0\n10\n1.0\n20\n0.0\n42\n0.0\n97\n0\n\
                    92\n1\n93\n1\n72\n1\n10\n0.0\n20\n0.0\n11\n1.0\n21\n1.0\n97\n1\n330\n2F\n\
                    75\n0\n76\n1\n52\n0.0\n41\n1.0\n77\n0\n78\n1\n53\n45.0\n43\n0.0\n44\n0.0\n45\n-0.1\n46\n0.1\n79\n0\n\
                    98\n1\n10\n0.5\n20\n0.5\n";
        let (decoded, _) = decode("HATCH", body);
        assert_eq!(
            decoded.pending,
            vec![PendingReference::HatchContours {
                path: 1,
                handles: vec![Handle::new(0x2F)],
            }]
        );
        match decoded.entity {
            EntityType::Hatch(hatch) => {
                assert_eq!(hatch.pattern_name, "ANSI31");
                assert!(hatch.is_associative);
                assert_eq!(hatch.paths.len(), 2);
                assert_eq!(hatch.paths[0].polyline.len(), 2);
                assert!(hatch.paths[0].polyline_closed);
                assert_eq!(hatch.paths[1].edges.len(), 1);
                assert_eq!(hatch.pattern_lines.len(), 1);
                assert_eq!(hatch.pattern_lines[0].angle, 45.0);
                assert_eq!(hatch.seed_points, vec![Vector2::new(0.5, 0.5)]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_hatch_spline_edge_followed_by_sources() {
        let body = "91\n1\n92\n1\n93\n1\n72\n4\n94\n3\n73\n0\n74\n0\n95\n2\n96\n1\n\
                    40\n0.0\n40\n1.0\n10\n1.0\n20\n2.0\n97\n1\n330\n3A\n75\n0\n";
        let (decoded, _) = decode("HATCH", body);
        assert_eq!(
            decoded.pending,
            vec![PendingReference::HatchContours {
                path: 0,
                handles: vec![Handle::new(0x3A)],
            }]
        );
        match decoded.entity {
            EntityType::Hatch(hatch) => match &hatch.paths[0].edges[0] {
                BoundaryEdge::Spline {
                    degree,
                    knots,
                    control_points,
                    fit_points,
                    ..
                } => {
                    assert_eq!(*degree, 3);
                    assert_eq!(knots.len(), 2);
                    assert_eq!(control_points, &vec![Vector2::new(1.0, 2.0)]);
                    assert!(fit_points.is_empty());
                }
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_image_and_wipeout() {
        let (decoded, _) = decode("IMAGE", "10\n0.0\n20\n0.0\n13\n640.0\n23\n480.0\n340\n2C\n");
        assert_eq!(
            decoded.pending,
            vec![PendingReference::ImageDefinition(Handle::new(0x2C))]
        );
        let (decoded, _) = decode("WIPEOUT", "14\n0.0\n24\n0.0\n14\n1.0\n24\n1.0\n");
        match decoded.entity {
            EntityType::Wipeout(w) => assert_eq!(w.clip_boundary.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
        assert!(decoded.pending.is_empty());
    }

    #[test]
    fn test_mesh_lists() {
        let body = "71\n2\n72\n0\n91\n0\n92\n3\n10\n0.0\n20\n0.0\n30\n0.0\n10\n1.0\n20\n0.0\n30\n0.0\n\
                    10\n0.0\n20\n1.0\n30\n0.0\n93\n4\n90\n3\n90\n0\n90\n1\n90\n2\n\
                    94\n1\n90\n0\n90\n1\n95\n1\n140\n0.5\n";
        let (decoded, _) = decode("MESH", body);
        match decoded.entity {
            EntityType::Mesh(mesh) => {
                assert_eq!(mesh.vertices.len(), 3);
                assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
                assert_eq!(mesh.edges.len(), 1);
                assert_eq!(mesh.edges[0].crease, 0.5);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_mline_segments() {
        let body = "2\nSTANDARD\n40\n1.0\n72\n1\n73\n2\n10\n0.0\n20\n0.0\n30\n0.0\n\
                    11\n0.0\n21\n0.0\n31\n0.0\n12\n1.0\n22\n0.0\n32\n0.0\n13\n0.0\n23\n1.0\n33\n0.0\n\
                    74\n2\n41\n0.0\n41\n0.0\n75\n0\n74\n1\n41\n0.5\n75\n0\n";
        let (decoded, _) = decode("MLINE", body);
        assert_eq!(
            decoded.pending,
            vec![PendingReference::MLineStyle("STANDARD".to_string())]
        );
        match decoded.entity {
            EntityType::MLine(mline) => {
                assert_eq!(mline.vertices.len(), 1);
                assert_eq!(mline.vertices[0].segments.len(), 2);
                assert_eq!(mline.vertices[0].segments[1].parameters, vec![0.5]);
                assert_eq!(mline.vertices[0].miter, Vector3::new(0.0, 1.0, 0.0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_leader_always_registers_annotation() {
        let (decoded, _) = decode("LEADER", "3\nStandard\n76\n2\n10\n0.0\n20\n0.0\n10\n1.0\n20\n1.0\n");
        assert_eq!(
            decoded.pending,
            vec![PendingReference::LeaderAnnotation(Handle::NULL)]
        );
        match decoded.entity {
            EntityType::Leader(leader) => assert_eq!(leader.vertices.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_arc_and_circle() {
        let (decoded, _) = decode(
            "ARC",
            "10\n1.0\n20\n2.0\n30\n0.0\n40\n3.0\n50\n0.0\n51\n90.0\n39\n0.5\n",
        );
        match decoded.entity {
            EntityType::Arc(arc) => {
                assert_eq!(arc.center, Vector3::new(1.0, 2.0, 0.0));
                assert_eq!(arc.radius, 3.0);
                assert_eq!(arc.end_angle, 90.0);
                assert_eq!(arc.thickness, 0.5);
                assert_eq!(arc.normal, Vector3::UNIT_Z);
            }
            other => panic!("unexpected {:?}", other),
        }
        let (decoded, doc) = decode("CIRCLE", "10\n0.0\n20\n0.0\n40\n2.0\n230\n-1.0\n");
        match decoded.entity {
            EntityType::Circle(circle) => {
                assert_eq!(circle.radius, 2.0);
                assert_eq!(circle.normal.z, -1.0);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(!doc.notifications.has_type(NotificationType::Warning));
    }

    #[test]
    fn test_ellipse_ratio_outside_unit_range() {
        let (decoded, doc) = decode(
            "ELLIPSE",
            "10\n0.0\n20\n0.0\n11\n4.0\n21\n0.0\n40\n1.5\n41\n0.0\n42\n6.283185307179586\n",
        );
        match decoded.entity {
            EntityType::Ellipse(ellipse) => {
                assert_eq!(ellipse.major_axis, Vector3::new(4.0, 0.0, 0.0));
                assert_eq!(ellipse.minor_axis_ratio, 1.0);
                assert_eq!(ellipse.end_parameter, 6.283185307179586);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(doc.notifications.has_type(NotificationType::Warning));

        let (decoded, _) = decode("ELLIPSE", "11\n2.0\n21\n0.0\n40\n0.25\n");
        match decoded.entity {
            EntityType::Ellipse(ellipse) => assert_eq!(ellipse.minor_axis_ratio, 0.25),
            other => panic!("unexpected {:?}", other),
        }
        let (decoded, _) = decode("ELLIPSE", "11\n2.0\n21\n0.0\n40\n0.0\n");
        match decoded.entity {
            EntityType::Ellipse(ellipse) => assert_eq!(ellipse.minor_axis_ratio, 1.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_point() {
        let (decoded, _) = decode("POINT", "10\n1.0\n20\n2.0\n30\n3.0\n50\n15.0\n");
        match decoded.entity {
            EntityType::Point(point) => {
                assert_eq!(point.location, Vector3::new(1.0, 2.0, 3.0));
                assert_eq!(point.x_axis_angle, 15.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_face3d_corners_and_edges() {
        let body = "10\n0.0\n20\n0.0\n30\n0.0\n11\n1.0\n21\n0.0\n31\n0.0\n\
                    12\n1.0\n22\n1.0\n32\n1.0\n13\n0.0\n23\n1.0\n33\n1.0\n70\n5\n";
        let (decoded, _) = decode("3DFACE", body);
        match decoded.entity {
            EntityType::Face3D(face) => {
                assert_eq!(face.corners[1], Vector3::new(1.0, 0.0, 0.0));
                assert_eq!(face.corners[3], Vector3::new(0.0, 1.0, 1.0));
                assert_eq!(
                    face.invisible_edges,
                    InvisibleEdgeFlags::FIRST | InvisibleEdgeFlags::THIRD
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_solid_and_trace_share_a_decoder() {
        let body = "10\n0.0\n20\n0.0\n11\n2.0\n21\n0.0\n12\n0.0\n22\n1.0\n13\n2.0\n23\n1.0\n39\n0.25\n";
        let (decoded, _) = decode("SOLID", body);
        match decoded.entity {
            EntityType::Solid(solid) => {
                assert_eq!(solid.corners[2], Vector3::new(0.0, 1.0, 0.0));
                assert_eq!(solid.thickness, 0.25);
            }
            other => panic!("unexpected {:?}", other),
        }
        let (decoded, _) = decode("TRACE", body);
        match decoded.entity {
            EntityType::Trace(trace) => assert_eq!(trace.corners[3], Vector3::new(2.0, 1.0, 0.0)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_ray_and_xline() {
        let body = "10\n1.0\n20\n1.0\n30\n0.0\n11\n0.0\n21\n1.0\n31\n0.0\n";
        let (decoded, _) = decode("RAY", body);
        match decoded.entity {
            EntityType::Ray(ray) => {
                assert_eq!(ray.base_point, Vector3::new(1.0, 1.0, 0.0));
                assert_eq!(ray.direction, Vector3::new(0.0, 1.0, 0.0));
            }
            other => panic!("unexpected {:?}", other),
        }
        let (decoded, _) = decode("XLINE", body);
        match decoded.entity {
            EntityType::XLine(xline) => assert_eq!(xline.direction, Vector3::new(0.0, 1.0, 0.0)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_tolerance() {
        let body = "3\nStandard\n10\n5.0\n20\n5.0\n30\n0.0\n1\n{\\Fgdt;j}%%v0.1\n11\n1.0\n21\n0.0\n31\n0.0\n";
        let (decoded, _) = decode("TOLERANCE", body);
        match decoded.entity {
            EntityType::Tolerance(tolerance) => {
                assert_eq!(tolerance.style_name, "Standard");
                assert_eq!(tolerance.text, "{\\Fgdt;j}%%v0.1");
                assert_eq!(tolerance.insertion_point, Vector3::new(5.0, 5.0, 0.0));
                assert_eq!(tolerance.direction, Vector3::new(1.0, 0.0, 0.0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_spline_control_and_fit_points() {
        let body = "70\n12\n71\n3\n72\n8\n73\n4\n74\n2\n\
                    40\n0.0\n40\n0.0\n40\n0.0\n40\n0.0\n40\n1.0\n40\n1.0\n40\n1.0\n40\n1.0\n\
                    41\n1.0\n41\n0.5\n41\n0.5\n41\n1.0\n\
                    10\n0.0\n20\n0.0\n30\n0.0\n10\n1.0\n20\n2.0\n30\n0.0\n\
                    10\n3.0\n20\n2.0\n30\n0.0\n10\n4.0\n20\n0.0\n30\n0.0\n\
                    11\n0.0\n21\n0.0\n31\n0.0\n11\n4.0\n21\n0.0\n31\n0.0\n\
                    12\n1.0\n22\n0.0\n32\n0.0\n";
        let (decoded, _) = decode("SPLINE", body);
        match decoded.entity {
            EntityType::Spline(spline) => {
                assert_eq!(spline.degree, 3);
                assert!(spline.flags.contains(SplineFlags::PLANAR | SplineFlags::RATIONAL));
                assert_eq!(spline.knots.len(), 8);
                assert_eq!(spline.weights, vec![1.0, 0.5, 0.5, 1.0]);
                assert_eq!(spline.control_points.len(), 4);
                assert_eq!(spline.control_points[1], Vector3::new(1.0, 2.0, 0.0));
                assert_eq!(spline.fit_points[1], Vector3::new(4.0, 0.0, 0.0));
                assert_eq!(spline.start_tangent, Some(Vector3::new(1.0, 0.0, 0.0)));
                assert!(spline.end_tangent.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_underlay_kinds() {
        let body = "340\n4D\n10\n1.0\n20\n2.0\n30\n0.0\n41\n2.0\n42\n2.0\n43\n1.0\n\
                    280\n2\n281\n50\n282\n25\n11\n0.0\n21\n0.0\n11\n10.0\n21\n10.0\n";
        for (name, kind) in [
            ("PDFUNDERLAY", UnderlayKind::Pdf),
            ("DWFUNDERLAY", UnderlayKind::Dwf),
            ("DGNUNDERLAY", UnderlayKind::Dgn),
        ] {
            let (decoded, _) = decode(name, body);
            assert_eq!(
                decoded.pending,
                vec![PendingReference::UnderlayDefinition(Handle::new(0x4D))]
            );
            match decoded.entity {
                EntityType::Underlay(underlay) => {
                    assert_eq!(underlay.kind, kind);
                    assert_eq!(underlay.scale, Vector3::new(2.0, 2.0, 1.0));
                    assert_eq!((underlay.contrast, underlay.fade), (50, 25));
                    assert_eq!(underlay.clip_boundary[1], Vector2::new(10.0, 10.0));
                    assert!(underlay.definition.is_none());
                }
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_viewport_fields_and_boundary() {
        let body = "10\n5.0\n20\n4.0\n30\n0.0\n40\n10.0\n41\n8.0\n68\n1\n69\n2\n\
                    12\n50.0\n22\n40.0\n16\n0.0\n26\n0.0\n36\n1.0\n45\n100.0\n\
                    331\n2A\n331\n2B\n90\n32864\n340\n5E\n";
        let (decoded, _) = decode("VIEWPORT", body);
        assert_eq!(
            decoded.pending,
            vec![PendingReference::ViewportBoundary(Handle::new(0x5E))]
        );
        match decoded.entity {
            EntityType::Viewport(vp) => {
                assert_eq!(vp.center, Vector3::new(5.0, 4.0, 0.0));
                assert_eq!((vp.width, vp.height), (10.0, 8.0));
                assert_eq!(vp.id, 2);
                assert_eq!(vp.view_center, Vector2::new(50.0, 40.0));
                assert_eq!(vp.view_height, 100.0);
                assert_eq!(vp.frozen_layers, vec![Handle::new(0x2A), Handle::new(0x2B)]);
                assert_eq!(vp.status_flags, 32864);
            }
            other => panic!("unexpected {:?}", other),
        }

        let (decoded, _) = decode("VIEWPORT", "10\n0.0\n20\n0.0\n69\n1\n");
        assert!(decoded.pending.is_empty());
    }

    #[test]
    fn test_attribute_definition() {
        let body = "1\nDefault\n2\nPART_NO\n3\nPart number?\n10\n1.0\n20\n1.0\n30\n0.0\n\
                    40\n0.5\n70\n9\n73\n12\n280\n1\n";
        let (decoded, _) = decode("ATTDEF", body);
        match decoded.entity {
            EntityType::AttributeDefinition(attdef) => {
                assert_eq!(attdef.prompt, "Part number?");
                assert_eq!(attdef.base.tag, "PART_NO");
                assert_eq!(attdef.base.value, "Default");
                assert_eq!(attdef.base.height, 0.5);
                assert_eq!(
                    attdef.base.flags,
                    AttributeFlags::INVISIBLE | AttributeFlags::PRESET
                );
                assert_eq!(attdef.base.field_length, 12);
                assert!(attdef.base.lock_position);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_counts_larger_than_the_data() {
        let body = "71\n2\n92\n5000000\n10\n0.0\n20\n0.0\n30\n0.0\n93\n9000000\n90\n3\n90\n0\n\
                    94\n7000000\n95\n6000000\n8\nMesh\n";
        let (decoded, _) = decode("MESH", body);
        match decoded.entity {
            EntityType::Mesh(mesh) => {
                assert_eq!(mesh.vertices.len(), 1);
                assert_eq!(mesh.faces, vec![vec![0]]);
                assert!(mesh.edges.is_empty());
                assert_eq!(mesh.common.layer, "Mesh");
            }
            other => panic!("unexpected {:?}", other),
        }

        let (decoded, _) = decode("HATCH", "2\nSOLID\n70\n1\n91\n1000000\n75\n1\n98\n4000000\n");
        match decoded.entity {
            EntityType::Hatch(hatch) => {
                assert!(hatch.paths.is_empty());
                assert_eq!(hatch.style, 1);
                assert!(hatch.seed_points.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
