//! Property tests for value typing and coordinate transforms

mod common;

use common::BinaryDxf;
use dxfgraph::io::dxf::{
    DxfBinaryReader, DxfStreamReader, DxfTextReader, GroupCodeValueType,
};
use dxfgraph::{transform, CoordinateFrame, Vector3};
use proptest::prelude::*;
use std::io::Cursor;

/// Every code in the defined ranges except the text-only comment code.
fn valid_code() -> impl Strategy<Value = i16> {
    (0i16..=1071).prop_filter("code with a value type", |code| {
        *code != 999 && GroupCodeValueType::from_code(*code as i32).is_some()
    })
}

/// Write `seed` as a value of `code` in both encodings.
fn encode_pair(code: i16, seed: u16) -> (String, BinaryDxf) {
    let ty = GroupCodeValueType::from_code(code as i32).unwrap();
    let binary = BinaryDxf::new();
    match ty {
        GroupCodeValueType::String | GroupCodeValueType::Comment => {
            let s = format!(" value {} ", seed);
            (s.clone(), binary.string(code, &s))
        }
        GroupCodeValueType::Handle | GroupCodeValueType::ObjectId => {
            let s = format!("{:X}", seed as u32 + 1);
            (s.clone(), binary.string(code, &s))
        }
        GroupCodeValueType::Double => {
            let v = seed as f64 + 0.5;
            (v.to_string(), binary.double(code, v))
        }
        GroupCodeValueType::Int16 => {
            let v = (seed % 30000) as i16;
            (v.to_string(), binary.int16(code, v))
        }
        GroupCodeValueType::Int32 => (seed.to_string(), binary.int32(code, seed as i32)),
        GroupCodeValueType::Int64 => (seed.to_string(), binary.int64(code, seed as i64)),
        GroupCodeValueType::Byte => {
            let v = (seed % 256) as i16;
            (v.to_string(), binary.int16(code, v))
        }
        GroupCodeValueType::Bool => {
            let v = seed % 2 == 1;
            ((v as u8).to_string(), binary.boolean(code, v))
        }
        GroupCodeValueType::Chunk => {
            let bytes = seed.to_be_bytes();
            (
                format!("{:02X}{:02X}", bytes[0], bytes[1]),
                binary.chunk(code, &bytes),
            )
        }
    }
}

proptest! {
    #[test]
    fn text_and_binary_cursors_type_codes_identically(code in valid_code(), seed in any::<u16>()) {
        let (text_value, binary) = encode_pair(code, seed);
        let text = format!("{}\n{}\n", code, text_value);

        let mut text_reader = DxfTextReader::new(Cursor::new(text.into_bytes()));
        let mut binary_reader = DxfBinaryReader::new(Cursor::new(binary.into_bytes())).unwrap();

        let from_text = text_reader.read_pair().unwrap().unwrap();
        let from_binary = binary_reader.read_pair().unwrap().unwrap();

        prop_assert_eq!(from_text.code, from_binary.code);
        prop_assert_eq!(from_text.value.type_name(), from_binary.value.type_name());
        prop_assert_eq!(from_text.value, from_binary.value);
    }

    #[test]
    fn transform_round_trips(
        x in -1.0e4f64..1.0e4,
        y in -1.0e4f64..1.0e4,
        z in -1.0e4f64..1.0e4,
        nx in -1.0f64..1.0,
        ny in -1.0f64..1.0,
        nz in -1.0f64..1.0,
    ) {
        let normal = Vector3::new(nx, ny, nz);
        prop_assume!(normal.length() > 1e-3);
        let p = Vector3::new(x, y, z);

        let local = transform(p, normal, CoordinateFrame::World, CoordinateFrame::Local);
        let back = transform(local, normal, CoordinateFrame::Local, CoordinateFrame::World);
        prop_assert!(back.approx_eq(&p, 1e-6), "{:?} != {:?}", back, p);
    }

    #[test]
    fn transform_round_trips_near_negative_z(
        x in -1.0e3f64..1.0e3,
        y in -1.0e3f64..1.0e3,
        z in -1.0e3f64..1.0e3,
        dx in -1.0e-3f64..1.0e-3,
        dy in -1.0e-3f64..1.0e-3,
    ) {
        let normal = Vector3::new(dx, dy, -1.0);
        let p = Vector3::new(x, y, z);

        let local = transform(p, normal, CoordinateFrame::World, CoordinateFrame::Local);
        let back = transform(local, normal, CoordinateFrame::Local, CoordinateFrame::World);
        prop_assert!(back.approx_eq(&p, 1e-6), "{:?} != {:?}", back, p);
        prop_assert!((local.length() - p.length()).abs() < 1e-6);
    }
}
