//! Object record decoders

use super::section_reader::SectionReader;
use crate::entities::UnderlayKind;
use crate::error::Result;
use crate::objects::*;
use crate::types::{Color, Handle};
use ahash::AHashMap;
use once_cell::sync::Lazy;

/// A decoded object; groups also return the handles of their members
#[derive(Debug)]
pub struct DecodedObject {
    pub object: ObjectType,
    pub members: Vec<Handle>,
}

impl From<ObjectType> for DecodedObject {
    fn from(object: ObjectType) -> Self {
        Self {
            object,
            members: Vec::new(),
        }
    }
}

pub type ObjectDecoder = fn(&mut SectionReader<'_>, &str) -> Result<DecodedObject>;

static OBJECT_DECODERS: Lazy<AHashMap<&'static str, ObjectDecoder>> = Lazy::new(|| {
    let mut map: AHashMap<&'static str, ObjectDecoder> = AHashMap::new();
    map.insert("ACDBDICTIONARYWDFLT", read_dictionary);
    map.insert("DGNDEFINITION", read_underlay_definition);
    map.insert("DICTIONARY", read_dictionary);
    map.insert("DWFDEFINITION", read_underlay_definition);
    map.insert("GROUP", read_group);
    map.insert("IMAGEDEF", read_image_definition);
    map.insert("LAYOUT", read_layout);
    map.insert("MLINESTYLE", read_mline_style);
    map.insert("PDFDEFINITION", read_underlay_definition);
    map.insert("RASTERVARIABLES", read_raster_variables);
    map
});

/// Decoder for the object record `name`
pub fn decoder(name: &str) -> Option<ObjectDecoder> {
    OBJECT_DECODERS.get(name).copied()
}

/// DICTIONARY and ACDBDICTIONARYWDFLT
fn read_dictionary(r: &mut SectionReader<'_>, name: &str) -> Result<DecodedObject> {
    let mut dict = Dictionary::new();
    let mut key: Option<String> = None;
    while let Some(pair) = r.next_field()? {
        match pair.code {
            280 => dict.hard_owner = pair.as_byte()? != 0,
            281 => dict.cloning = pair.as_byte()? as i16,
            3 => key = Some(pair.as_string()?.to_string()),
            350 | 360 => {
                if let Some(k) = key.take() {
                    dict.add_entry(k, pair.as_handle()?);
                }
            }
            340 => dict.default_entry = Some(pair.as_handle()?),
            _ => r.read_common_object_field(&pair, &mut dict.common)?,
        }
    }
    let object = if name == "ACDBDICTIONARYWDFLT" {
        ObjectType::DictionaryWithDefault(dict)
    } else {
        ObjectType::Dictionary(dict)
    };
    Ok(object.into())
}

fn read_layout(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedObject> {
    let mut layout = Layout::new("");
    let mut in_layout = false;
    while let Some(pair) = r.next_field()? {
        if pair.code == 100 {
            in_layout = pair.as_string()? == "AcDbLayout";
            continue;
        }
        if !in_layout {
            match pair.code {
                1 => layout.page_setup_name = pair.as_string()?.to_string(),
                _ => r.read_common_object_field(&pair, &mut layout.common)?,
            }
            continue;
        }
        match pair.code {
            1 => layout.name = pair.as_string()?.to_string(),
            70 => layout.flags = pair.as_i16()?,
            71 => layout.tab_order = pair.as_i16()?,
            10 | 20 => pair.set_axis_2d(&mut layout.min_limits)?,
            11 | 21 => pair.set_axis_2d(&mut layout.max_limits)?,
            12 | 22 | 32 => pair.set_axis(&mut layout.insertion_base)?,
            14 | 24 | 34 => pair.set_axis(&mut layout.min_extents)?,
            15 | 25 | 35 => pair.set_axis(&mut layout.max_extents)?,
            146 => layout.elevation = pair.as_double()?,
            13 | 23 | 33 => pair.set_axis(&mut layout.ucs_origin)?,
            16 | 26 | 36 => pair.set_axis(&mut layout.ucs_x_axis)?,
            17 | 27 | 37 => pair.set_axis(&mut layout.ucs_y_axis)?,
            330 => layout.block_record = pair.as_handle()?,
            331 => layout.last_viewport = pair.as_handle()?,
            _ => r.read_common_object_field(&pair, &mut layout.common)?,
        }
    }
    Ok(ObjectType::Layout(layout).into())
}

fn read_group(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedObject> {
    let mut group = Group::new("");
    let mut members = Vec::new();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            300 => group.description = pair.as_string()?.to_string(),
            70 => group.is_unnamed = pair.as_i16()? != 0,
            71 => group.selectable = pair.as_i16()? != 0,
            340 => members.push(pair.as_handle()?),
            _ => r.read_common_object_field(&pair, &mut group.common)?,
        }
    }
    Ok(DecodedObject {
        object: ObjectType::Group(group),
        members,
    })
}

fn read_mline_style(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedObject> {
    let mut style = MLineStyle::new("");
    while let Some(pair) = r.next_field()? {
        match pair.code {
            2 => style.name = pair.as_string()?.to_string(),
            70 => style.flags = MLineStyleFlags::from_bits_truncate(pair.as_i16()?),
            3 => style.description = pair.as_string()?.to_string(),
            51 => style.start_angle = pair.as_double()?,
            52 => style.end_angle = pair.as_double()?,
            71 => {}
            49 => style.elements.push(MLineStyleElement::new(pair.as_double()?)),
            62 | 420 | 6 => {
                let color = match pair.code {
                    62 => Some(Color::from_index(pair.as_i16()?)),
                    420 => Some(Color::from_true_color(pair.as_i32()?)),
                    _ => None,
                };
                match style.elements.last_mut() {
                    Some(element) => match color {
                        Some(c) => element.color = c,
                        None => element.line_type = pair.as_string()?.to_string(),
                    },
                    None => {
                        if let Some(c) = color {
                            style.fill_color = c;
                        }
                    }
                }
            }
            _ => r.read_common_object_field(&pair, &mut style.common)?,
        }
    }
    Ok(ObjectType::MLineStyle(style).into())
}

fn read_image_definition(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedObject> {
    let mut definition = ImageDefinition::new("");
    while let Some(pair) = r.next_field()? {
        match pair.code {
            90 => definition.class_version = pair.as_i32()?,
            1 => definition.file_name = pair.as_string()?.to_string(),
            10 | 20 => pair.set_axis_2d(&mut definition.size_in_pixels)?,
            11 | 21 => pair.set_axis_2d(&mut definition.pixel_size)?,
            280 => definition.is_loaded = pair.as_byte()? != 0,
            281 => definition.resolution_unit = ResolutionUnit::from_code(pair.as_byte()?),
            _ => r.read_common_object_field(&pair, &mut definition.common)?,
        }
    }
    Ok(ObjectType::ImageDefinition(definition).into())
}

fn read_raster_variables(r: &mut SectionReader<'_>, _: &str) -> Result<DecodedObject> {
    let mut vars = RasterVariables::default();
    while let Some(pair) = r.next_field()? {
        match pair.code {
            90 => vars.class_version = pair.as_i32()?,
            70 => vars.display_image_frame = pair.as_i16()? != 0,
            71 => vars.high_quality = pair.as_i16()? != 0,
            72 => vars.units = pair.as_i16()?,
            _ => r.read_common_object_field(&pair, &mut vars.common)?,
        }
    }
    Ok(ObjectType::RasterVariables(vars).into())
}

/// PDFDEFINITION, DWFDEFINITION and DGNDEFINITION
fn read_underlay_definition(r: &mut SectionReader<'_>, name: &str) -> Result<DecodedObject> {
    let kind = match name {
        "DWFDEFINITION" => UnderlayKind::Dwf,
        "DGNDEFINITION" => UnderlayKind::Dgn,
        _ => UnderlayKind::Pdf,
    };
    let mut definition = UnderlayDefinition::new(kind);
    while let Some(pair) = r.next_field()? {
        match pair.code {
            1 => definition.file_name = pair.as_string()?.to_string(),
            2 => definition.page = pair.as_string()?.to_string(),
            _ => r.read_common_object_field(&pair, &mut definition.common)?,
        }
    }
    Ok(ObjectType::UnderlayDefinition(definition).into())
}
