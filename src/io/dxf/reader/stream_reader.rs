//! DXF stream reader trait and common types

use crate::error::{DxfError, Result};
use crate::io::dxf::GroupCodeValueType;
use crate::types::{Handle, Vector2, Vector3};
use encoding_rs::Encoding;

/// Code reported for a code line that is not an integer
pub(crate) const INVALID_CODE: i32 = -9999;

/// A typed DXF value
#[derive(Debug, Clone, PartialEq)]
pub enum DxfValue {
    String(String),
    Double(f64),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Bool(bool),
    Byte(u8),
    Bytes(Vec<u8>),
    /// Normalised uppercase hexadecimal handle
    Hex(String),
}

impl DxfValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            DxfValue::String(_) => "string",
            DxfValue::Double(_) => "double",
            DxfValue::Int16(_) => "int16",
            DxfValue::Int32(_) => "int32",
            DxfValue::Int64(_) => "int64",
            DxfValue::Bool(_) => "bool",
            DxfValue::Byte(_) => "byte",
            DxfValue::Bytes(_) => "bytes",
            DxfValue::Hex(_) => "hex",
        }
    }
}

/// A DXF code/value pair
#[derive(Debug, Clone, PartialEq)]
pub struct DxfCodePair {
    pub code: i16,
    pub value: DxfValue,
    /// Byte offset (binary) or line number (text) of the pair
    pub position: u64,
}

impl DxfCodePair {
    pub fn new(code: i16, value: DxfValue, position: u64) -> Self {
        Self {
            code,
            value,
            position,
        }
    }

    fn mismatch(&self, expected: &'static str) -> DxfError {
        DxfError::TypeMismatch {
            code: self.code,
            expected,
            found: self.value.type_name(),
            position: self.position,
        }
    }

    pub fn as_string(&self) -> Result<&str> {
        match &self.value {
            DxfValue::String(s) => Ok(s),
            _ => Err(self.mismatch("string")),
        }
    }

    pub fn as_double(&self) -> Result<f64> {
        match self.value {
            DxfValue::Double(v) => Ok(v),
            _ => Err(self.mismatch("double")),
        }
    }

    pub fn as_i16(&self) -> Result<i16> {
        match self.value {
            DxfValue::Int16(v) => Ok(v),
            _ => Err(self.mismatch("int16")),
        }
    }

    pub fn as_i32(&self) -> Result<i32> {
        match self.value {
            DxfValue::Int32(v) => Ok(v),
            _ => Err(self.mismatch("int32")),
        }
    }

    pub fn as_i64(&self) -> Result<i64> {
        match self.value {
            DxfValue::Int64(v) => Ok(v),
            _ => Err(self.mismatch("int64")),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self.value {
            DxfValue::Bool(v) => Ok(v),
            _ => Err(self.mismatch("bool")),
        }
    }

    pub fn as_byte(&self) -> Result<u8> {
        match self.value {
            DxfValue::Byte(v) => Ok(v),
            _ => Err(self.mismatch("byte")),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8]> {
        match &self.value {
            DxfValue::Bytes(v) => Ok(v),
            _ => Err(self.mismatch("bytes")),
        }
    }

    pub fn as_hex(&self) -> Result<&str> {
        match &self.value {
            DxfValue::Hex(v) => Ok(v),
            _ => Err(self.mismatch("hex")),
        }
    }

    /// Hex value parsed as a [`Handle`].
    pub fn as_handle(&self) -> Result<Handle> {
        let hex = self.as_hex()?;
        Handle::parse_hex(hex).ok_or_else(|| DxfError::InvalidHandleFormat {
            code: self.code,
            value: hex.to_string(),
            position: self.position,
        })
    }

    /// Any integer-typed value widened to i64.
    ///
    /// Header variables are written under whichever integer code the
    /// producing application chose; this accepts all of them.
    pub fn as_int(&self) -> Result<i64> {
        match self.value {
            DxfValue::Int16(v) => Ok(v as i64),
            DxfValue::Int32(v) => Ok(v as i64),
            DxfValue::Int64(v) => Ok(v),
            DxfValue::Byte(v) => Ok(v as i64),
            DxfValue::Bool(v) => Ok(v as i64),
            _ => Err(self.mismatch("integer")),
        }
    }

    /// Value rendered as text, for header variables and diagnostics.
    pub fn value_string(&self) -> String {
        match &self.value {
            DxfValue::String(s) | DxfValue::Hex(s) => s.clone(),
            DxfValue::Double(v) => v.to_string(),
            DxfValue::Int16(v) => v.to_string(),
            DxfValue::Int32(v) => v.to_string(),
            DxfValue::Int64(v) => v.to_string(),
            DxfValue::Bool(v) => (*v as u8).to_string(),
            DxfValue::Byte(v) => v.to_string(),
            DxfValue::Bytes(v) => v.iter().map(|b| format!("{:02X}", b)).collect(),
        }
    }

    /// Store a coordinate into the axis of `point` its code selects.
    ///
    /// X, Y and Z share the last digit of their codes and differ in the tens
    /// digit (10/20/30, 11/21/31, 210/220/230, 1010/1020/1030, ...).
    pub fn set_axis(&self, point: &mut Vector3) -> Result<()> {
        let value = self.as_double()?;
        match (self.code % 100) / 10 {
            1 => point.x = value,
            2 => point.y = value,
            _ => point.z = value,
        }
        Ok(())
    }

    /// Two-dimensional form of [`DxfCodePair::set_axis`]; Z values are
    /// ignored.
    pub fn set_axis_2d(&self, point: &mut Vector2) -> Result<()> {
        let value = self.as_double()?;
        match (self.code % 100) / 10 {
            1 => point.x = value,
            2 => point.y = value,
            _ => {}
        }
        Ok(())
    }

    /// Whether this is the `0`-coded pair with the given marker text.
    pub fn is_marker(&self, marker: &str) -> bool {
        self.code == 0 && matches!(&self.value, DxfValue::String(s) if s == marker)
    }
}

/// Trait for reading DXF code/value pairs from a stream
///
/// Implemented by the text and the binary reader; both type values through
/// [`GroupCodeValueType::from_code`] and report errors the same way.
pub trait DxfStreamReader {
    /// Read the next code/value pair, `None` at a clean end of input.
    fn read_pair(&mut self) -> Result<Option<DxfCodePair>>;

    /// Peek at the next code without consuming it
    fn peek_code(&mut self) -> Result<Option<i16>>;

    /// Push a pair back to be read again on next read_pair call
    fn push_back(&mut self, pair: DxfCodePair);

    /// Rewind to the first pair
    fn reset(&mut self) -> Result<()>;

    /// Encoding used for subsequent string values
    fn set_encoding(&mut self, encoding: &'static Encoding);

    /// Diagnostic position of the next pair
    fn position(&self) -> u64;

    fn is_binary(&self) -> bool;

    /// Read the next pair, failing when the input is exhausted.
    fn advance(&mut self) -> Result<DxfCodePair> {
        match self.read_pair()? {
            Some(pair) => Ok(pair),
            None => Err(DxfError::UnexpectedEof {
                position: self.position(),
            }),
        }
    }
}

/// Type of `code`, or `MalformedToken` when no range covers it.
pub(crate) fn value_type_of(code: i32, position: u64) -> Result<(i16, GroupCodeValueType)> {
    match GroupCodeValueType::from_code(code) {
        Some(ty) => Ok((code as i16, ty)),
        None => Err(DxfError::MalformedToken {
            code,
            value: String::new(),
            position,
        }),
    }
}

/// Normalise a handle numeral to uppercase hex.
///
/// An empty value stands for the null handle.
pub(crate) fn normalize_handle(code: i16, raw: &str, position: u64) -> Result<String> {
    match Handle::parse_hex(raw) {
        Some(handle) => Ok(handle.to_hex()),
        None => Err(DxfError::InvalidHandleFormat {
            code,
            value: raw.to_string(),
            position,
        }),
    }
}

/// Decode raw string bytes with the active encoding.
///
/// UTF-8 input that is not valid UTF-8 is read as Latin-1, byte for char.
pub(crate) fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> String {
    if encoding == encoding_rs::UTF_8 {
        match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => bytes.iter().map(|&b| b as char).collect(),
        }
    } else {
        let (decoded, _) = encoding.decode_without_bom_handling(bytes);
        decoded.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let pair = DxfCodePair::new(40, DxfValue::Double(2.5), 7);
        assert_eq!(pair.as_double().unwrap(), 2.5);
        match pair.as_i16() {
            Err(DxfError::TypeMismatch {
                code,
                expected,
                found,
                position,
            }) => {
                assert_eq!(code, 40);
                assert_eq!(expected, "int16");
                assert_eq!(found, "double");
                assert_eq!(position, 7);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_handle_getter() {
        let pair = DxfCodePair::new(330, DxfValue::Hex("1F".into()), 1);
        assert_eq!(pair.as_handle().unwrap(), Handle::new(0x1F));
        assert!(pair.as_string().is_err());
    }

    #[test]
    fn test_as_int_widens() {
        assert_eq!(DxfCodePair::new(70, DxfValue::Int16(-3), 0).as_int().unwrap(), -3);
        assert_eq!(DxfCodePair::new(280, DxfValue::Byte(4), 0).as_int().unwrap(), 4);
        assert!(DxfCodePair::new(1, DxfValue::String("4".into()), 0).as_int().is_err());
    }

    #[test]
    fn test_set_axis() {
        let mut p = Vector3::ZERO;
        DxfCodePair::new(11, DxfValue::Double(1.0), 0).set_axis(&mut p).unwrap();
        DxfCodePair::new(21, DxfValue::Double(2.0), 0).set_axis(&mut p).unwrap();
        DxfCodePair::new(31, DxfValue::Double(3.0), 0).set_axis(&mut p).unwrap();
        assert_eq!(p, Vector3::new(1.0, 2.0, 3.0));
        let mut n = Vector3::ZERO;
        DxfCodePair::new(230, DxfValue::Double(-1.0), 0).set_axis(&mut n).unwrap();
        DxfCodePair::new(1020, DxfValue::Double(4.0), 0).set_axis(&mut n).unwrap();
        assert_eq!(n, Vector3::new(0.0, 4.0, -1.0));
    }

    #[test]
    fn test_normalize_handle() {
        assert_eq!(normalize_handle(5, "1f", 0).unwrap(), "1F");
        assert_eq!(normalize_handle(5, "", 0).unwrap(), "0");
        assert!(matches!(
            normalize_handle(5, "G1", 3),
            Err(DxfError::InvalidHandleFormat { position: 3, .. })
        ));
    }

    #[test]
    fn test_value_type_of_rejects_gaps() {
        assert!(value_type_of(9999, 4).is_err());
        assert_eq!(value_type_of(8, 0).unwrap().1, GroupCodeValueType::String);
    }

    #[test]
    fn test_decode_bytes() {
        assert_eq!(decode_bytes("é".as_bytes(), encoding_rs::UTF_8), "é");
        assert_eq!(decode_bytes(&[0xE9], encoding_rs::UTF_8), "é");
        assert_eq!(decode_bytes(&[0xE9], encoding_rs::WINDOWS_1252), "é");
    }
}
