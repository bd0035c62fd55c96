//! DXF ASCII text reader

use super::stream_reader::{
    decode_bytes, normalize_handle, value_type_of, DxfCodePair, DxfStreamReader, DxfValue,
    INVALID_CODE,
};
use crate::error::{DxfError, Result};
use crate::io::dxf::GroupCodeValueType;
use encoding_rs::Encoding;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// DXF ASCII text file reader
///
/// Each pair is two lines: the group code, then the value. Positions are
/// 1-based line numbers of the code line.
pub struct DxfTextReader<R: Read + Seek> {
    reader: BufReader<R>,
    line_number: u64,
    peeked_pair: Option<DxfCodePair>,
    encoding: &'static Encoding,
}

impl<R: Read + Seek> DxfTextReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            peeked_pair: None,
            encoding: encoding_rs::UTF_8,
        }
    }

    /// Read one line as raw bytes without the line terminator.
    fn read_line_bytes(&mut self) -> Result<Option<Vec<u8>>> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        if self.line_number == 1 && bytes.starts_with(UTF8_BOM) {
            bytes.drain(..UTF8_BOM.len());
        }
        while matches!(bytes.last(), Some(b'\n' | b'\r')) {
            bytes.pop();
        }
        Ok(Some(bytes))
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self
            .read_line_bytes()?
            .map(|bytes| decode_bytes(&bytes, self.encoding)))
    }

    /// Read a code/value pair from the stream
    fn read_pair_internal(&mut self) -> Result<Option<DxfCodePair>> {
        let code_line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(None),
        };
        let position = self.line_number;

        let raw_code = code_line.trim().parse::<i32>().map_err(|_| DxfError::MalformedToken {
            code: INVALID_CODE,
            value: code_line.clone(),
            position,
        })?;
        let (code, value_type) = value_type_of(raw_code, position)?;

        let value_line = match self.read_line()? {
            Some(line) => line,
            None => return Err(DxfError::UnexpectedEof { position }),
        };

        let value = parse_value(code, value_type, &value_line, position)?;
        Ok(Some(DxfCodePair::new(code, value, position)))
    }
}

/// Type a value line according to its group code.
fn parse_value(
    code: i16,
    value_type: GroupCodeValueType,
    text: &str,
    position: u64,
) -> Result<DxfValue> {
    let malformed = || DxfError::MalformedToken {
        code: code as i32,
        value: text.to_string(),
        position,
    };

    // String values keep their surrounding blanks; everything else is trimmed.
    let raw = text;
    let text = text.trim();
    let value = match value_type {
        GroupCodeValueType::String | GroupCodeValueType::Comment => {
            DxfValue::String(process_string_value(raw))
        }
        GroupCodeValueType::Handle | GroupCodeValueType::ObjectId => {
            DxfValue::Hex(normalize_handle(code, text, position)?)
        }
        GroupCodeValueType::Double => DxfValue::Double(text.parse().map_err(|_| malformed())?),
        GroupCodeValueType::Int16 => {
            let v = parse_int(text).ok_or_else(malformed)?;
            DxfValue::Int16(i16::try_from(v).map_err(|_| malformed())?)
        }
        GroupCodeValueType::Int32 => {
            let v = parse_int(text).ok_or_else(malformed)?;
            DxfValue::Int32(i32::try_from(v).map_err(|_| malformed())?)
        }
        GroupCodeValueType::Int64 => DxfValue::Int64(parse_int(text).ok_or_else(malformed)?),
        GroupCodeValueType::Byte => {
            let v = parse_int(text).ok_or_else(malformed)?;
            DxfValue::Byte(u8::try_from(v).map_err(|_| malformed())?)
        }
        GroupCodeValueType::Bool => DxfValue::Bool(parse_int(text).ok_or_else(malformed)? != 0),
        GroupCodeValueType::Chunk => DxfValue::Bytes(decode_hex(text).ok_or_else(malformed)?),
    };
    Ok(value)
}

/// Integers are sometimes written with a fractional part; truncate them.
fn parse_int(text: &str) -> Option<i64> {
    text.parse::<i64>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v as i64))
}

fn decode_hex(text: &str) -> Option<Vec<u8>> {
    if text.len() % 2 != 0 {
        return None;
    }
    (0..text.len())
        .step_by(2)
        .map(|i| text.get(i..i + 2).and_then(|b| u8::from_str_radix(b, 16).ok()))
        .collect()
}

/// Expand the caret escapes used in text DXF strings.
fn process_string_value(value: &str) -> String {
    if !value.contains('^') {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '^' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('J') => out.push('\n'),
            Some('M') => out.push('\r'),
            Some('I') => out.push('\t'),
            Some(' ') => out.push('^'),
            _ => {
                out.push('^');
                continue;
            }
        }
        chars.next();
    }
    out
}

impl<R: Read + Seek> DxfStreamReader for DxfTextReader<R> {
    fn read_pair(&mut self) -> Result<Option<DxfCodePair>> {
        if let Some(pair) = self.peeked_pair.take() {
            return Ok(Some(pair));
        }
        self.read_pair_internal()
    }

    fn peek_code(&mut self) -> Result<Option<i16>> {
        if let Some(ref pair) = self.peeked_pair {
            return Ok(Some(pair.code));
        }
        if let Some(pair) = self.read_pair_internal()? {
            let code = pair.code;
            self.peeked_pair = Some(pair);
            Ok(Some(code))
        } else {
            Ok(None)
        }
    }

    fn push_back(&mut self, pair: DxfCodePair) {
        self.peeked_pair = Some(pair);
    }

    fn reset(&mut self) -> Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        self.line_number = 0;
        self.peeked_pair = None;
        Ok(())
    }

    fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = encoding;
    }

    fn position(&self) -> u64 {
        match &self.peeked_pair {
            Some(pair) => pair.position,
            None => self.line_number + 1,
        }
    }

    fn is_binary(&self) -> bool {
        false
    }
}
