//! DXF binary reader

use super::stream_reader::{
    decode_bytes, normalize_handle, value_type_of, DxfCodePair, DxfStreamReader, DxfValue,
};
use crate::error::{DxfError, Result};
use crate::io::dxf::GroupCodeValueType;
use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::Encoding;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};

/// Full binary DXF preamble
pub const BINARY_SENTINEL: &[u8; 22] = b"AutoCAD Binary DXF\r\n\x1a\0";

/// Bytes of the preamble that identify a binary file
pub const SENTINEL_SIGNATURE_LEN: usize = 18;

/// DXF binary file reader
///
/// Group codes are little-endian 16-bit integers; positions are byte offsets
/// from the start of the file.
pub struct DxfBinaryReader<R: Read + Seek> {
    reader: BufReader<R>,
    /// Stream offset of the first pair, just past the preamble
    body_start: u64,
    offset: u64,
    peeked_pair: Option<DxfCodePair>,
    encoding: &'static Encoding,
}

impl<R: Read + Seek> DxfBinaryReader<R> {
    /// Create a reader, validating the sentinel at the current position.
    pub fn new(mut reader: R) -> Result<Self> {
        let start = reader.stream_position()?;
        let mut reader = BufReader::new(reader);
        let mut sentinel = [0u8; 22];
        match reader.read_exact(&mut sentinel) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(DxfError::NotBinaryFormat)
            }
            Err(e) => return Err(e.into()),
        }
        if sentinel[..SENTINEL_SIGNATURE_LEN] != BINARY_SENTINEL[..SENTINEL_SIGNATURE_LEN] {
            return Err(DxfError::NotBinaryFormat);
        }
        Ok(Self {
            reader,
            body_start: start + BINARY_SENTINEL.len() as u64,
            offset: BINARY_SENTINEL.len() as u64,
            peeked_pair: None,
            encoding: encoding_rs::UTF_8,
        })
    }

    fn eof(&self) -> DxfError {
        DxfError::UnexpectedEof {
            position: self.offset,
        }
    }

    fn map_eof(&self, e: io::Error) -> DxfError {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            self.eof()
        } else {
            e.into()
        }
    }

    /// Read the group code; `None` when the input ends before it.
    fn read_code(&mut self) -> Result<Option<i16>> {
        let mut buf = [0u8; 2];
        let first = self.reader.read(&mut buf[..1])?;
        if first == 0 {
            return Ok(None);
        }
        self.reader
            .read_exact(&mut buf[1..])
            .map_err(|e| self.map_eof(e))?;
        self.offset += 2;
        Ok(Some(i16::from_le_bytes(buf)))
    }

    fn read_i16(&mut self) -> Result<i16> {
        let v = self
            .reader
            .read_i16::<LittleEndian>()
            .map_err(|e| self.map_eof(e))?;
        self.offset += 2;
        Ok(v)
    }

    fn read_i32(&mut self) -> Result<i32> {
        let v = self
            .reader
            .read_i32::<LittleEndian>()
            .map_err(|e| self.map_eof(e))?;
        self.offset += 4;
        Ok(v)
    }

    fn read_i64(&mut self) -> Result<i64> {
        let v = self
            .reader
            .read_i64::<LittleEndian>()
            .map_err(|e| self.map_eof(e))?;
        self.offset += 8;
        Ok(v)
    }

    fn read_f64(&mut self) -> Result<f64> {
        let v = self
            .reader
            .read_f64::<LittleEndian>()
            .map_err(|e| self.map_eof(e))?;
        self.offset += 8;
        Ok(v)
    }

    fn read_u8(&mut self) -> Result<u8> {
        let v = self.reader.read_u8().map_err(|e| self.map_eof(e))?;
        self.offset += 1;
        Ok(v)
    }

    /// Read a NUL-terminated byte run.
    fn read_cstring(&mut self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let n = self.reader.read_until(0, &mut bytes)?;
        self.offset += n as u64;
        if bytes.pop() != Some(0) {
            return Err(self.eof());
        }
        Ok(bytes)
    }

    fn read_chunk(&mut self) -> Result<Vec<u8>> {
        let len = self.read_u8()? as usize;
        let mut data = vec![0u8; len];
        self.reader
            .read_exact(&mut data)
            .map_err(|e| self.map_eof(e))?;
        self.offset += len as u64;
        Ok(data)
    }

    fn read_pair_internal(&mut self) -> Result<Option<DxfCodePair>> {
        let position = self.offset;
        let code = match self.read_code()? {
            Some(code) => code,
            None => return Ok(None),
        };
        let (code, value_type) = value_type_of(code as i32, position)?;

        let value = match value_type {
            GroupCodeValueType::Comment => return Err(DxfError::CommentInBinary { position }),
            GroupCodeValueType::String => {
                let bytes = self.read_cstring()?;
                DxfValue::String(decode_bytes(&bytes, self.encoding))
            }
            GroupCodeValueType::Handle | GroupCodeValueType::ObjectId => {
                let bytes = self.read_cstring()?;
                let raw = decode_bytes(&bytes, self.encoding);
                DxfValue::Hex(normalize_handle(code, &raw, position)?)
            }
            GroupCodeValueType::Double => DxfValue::Double(self.read_f64()?),
            GroupCodeValueType::Int16 => DxfValue::Int16(self.read_i16()?),
            GroupCodeValueType::Int32 => DxfValue::Int32(self.read_i32()?),
            GroupCodeValueType::Int64 => DxfValue::Int64(self.read_i64()?),
            GroupCodeValueType::Byte => {
                let v = self.read_i16()?;
                DxfValue::Byte(u8::try_from(v).map_err(|_| DxfError::MalformedToken {
                    code: code as i32,
                    value: v.to_string(),
                    position,
                })?)
            }
            GroupCodeValueType::Bool => DxfValue::Bool(self.read_u8()? != 0),
            GroupCodeValueType::Chunk => DxfValue::Bytes(self.read_chunk()?),
        };

        Ok(Some(DxfCodePair::new(code, value, position)))
    }
}

impl<R: Read + Seek> DxfStreamReader for DxfBinaryReader<R> {
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
        self.reader.seek(SeekFrom::Start(self.body_start))?;
        self.offset = BINARY_SENTINEL.len() as u64;
        self.peeked_pair = None;
        Ok(())
    }

    fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = encoding;
    }

    fn position(&self) -> u64 {
        match &self.peeked_pair {
            Some(pair) => pair.position,
            None => self.offset,
        }
    }

    fn is_binary(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use std::io::{Cursor, Write};

    fn binary(body: impl FnOnce(&mut Vec<u8>)) -> DxfBinaryReader<Cursor<Vec<u8>>> {
        let mut data = BINARY_SENTINEL.to_vec();
        body(&mut data);
        DxfBinaryReader::new(Cursor::new(data)).unwrap()
    }

    fn string_pair(out: &mut Vec<u8>, code: i16, value: &str) {
        out.write_i16::<LittleEndian>(code).unwrap();
        out.write_all(value.as_bytes()).unwrap();
        out.push(0);
    }

    #[test]
    fn test_missing_sentinel() {
        let result = DxfBinaryReader::new(Cursor::new(b"0\nSECTION\n2\nHEADER\n0\nENDSEC\n".to_vec()));
        assert!(matches!(result, Err(DxfError::NotBinaryFormat)));
        let result = DxfBinaryReader::new(Cursor::new(b"AutoCAD".to_vec()));
        assert!(matches!(result, Err(DxfError::NotBinaryFormat)));
    }

    #[test]
    fn test_read_typed_pairs() {
        let mut r = binary(|out| {
            string_pair(out, 0, "SECTION");
            out.write_i16::<LittleEndian>(40).unwrap();
            out.write_f64::<LittleEndian>(2.5).unwrap();
            out.write_i16::<LittleEndian>(70).unwrap();
            out.write_i16::<LittleEndian>(-4).unwrap();
            out.write_i16::<LittleEndian>(90).unwrap();
            out.write_i32::<LittleEndian>(100_000).unwrap();
            out.write_i16::<LittleEndian>(280).unwrap();
            out.write_i16::<LittleEndian>(3).unwrap();
            out.write_i16::<LittleEndian>(290).unwrap();
            out.write_u8(1).unwrap();
            out.write_i16::<LittleEndian>(310).unwrap();
            out.write_u8(2).unwrap();
            out.write_all(&[0xAB, 0xCD]).unwrap();
            string_pair(out, 330, "1f");
        });

        let pair = r.read_pair().unwrap().unwrap();
        assert!(pair.is_marker("SECTION"));
        assert_eq!(pair.position, 22);
        assert_eq!(r.read_pair().unwrap().unwrap().as_double().unwrap(), 2.5);
        assert_eq!(r.read_pair().unwrap().unwrap().as_i16().unwrap(), -4);
        assert_eq!(r.read_pair().unwrap().unwrap().as_i32().unwrap(), 100_000);
        assert_eq!(r.read_pair().unwrap().unwrap().as_byte().unwrap(), 3);
        assert!(r.read_pair().unwrap().unwrap().as_bool().unwrap());
        assert_eq!(r.read_pair().unwrap().unwrap().as_bytes().unwrap(), &[0xAB, 0xCD]);
        assert_eq!(r.read_pair().unwrap().unwrap().as_hex().unwrap(), "1F");
        assert!(r.read_pair().unwrap().is_none());
    }

    #[test]
    fn test_comment_is_rejected() {
        let mut r = binary(|out| string_pair(out, 999, "comment"));
        assert!(matches!(
            r.read_pair(),
            Err(DxfError::CommentInBinary { position: 22 })
        ));
    }

    #[test]
    fn test_unknown_code_is_malformed() {
        let mut r = binary(|out| string_pair(out, 9999, "x"));
        assert!(matches!(
            r.read_pair(),
            Err(DxfError::MalformedToken { code: 9999, .. })
        ));
    }

    #[test]
    fn test_truncated_value() {
        let mut r = binary(|out| {
            out.write_i16::<LittleEndian>(40).unwrap();
            out.write_all(&[0, 0, 0]).unwrap();
        });
        assert!(matches!(r.read_pair(), Err(DxfError::UnexpectedEof { .. })));
        let mut r = binary(|out| out.write_all(b"\x00\x00SECT").unwrap());
        assert!(matches!(r.read_pair(), Err(DxfError::UnexpectedEof { .. })));
    }

    #[test]
    fn test_invalid_handle() {
        let mut r = binary(|out| string_pair(out, 5, "ZZ"));
        assert!(matches!(
            r.read_pair(),
            Err(DxfError::InvalidHandleFormat { code: 5, .. })
        ));
    }

    #[test]
    fn test_reset_skips_sentinel() {
        let mut r = binary(|out| string_pair(out, 0, "EOF"));
        assert!(r.read_pair().unwrap().unwrap().is_marker("EOF"));
        r.reset().unwrap();
        assert_eq!(r.position(), 22);
        assert!(r.read_pair().unwrap().unwrap().is_marker("EOF"));
    }

    #[test]
    fn test_reset_returns_to_body_of_embedded_file() {
        let mut data = b"prefix".to_vec();
        data.extend_from_slice(BINARY_SENTINEL);
        string_pair(&mut data, 0, "EOF");
        let mut cursor = Cursor::new(data);
        cursor.seek(SeekFrom::Start(6)).unwrap();

        let mut r = DxfBinaryReader::new(cursor).unwrap();
        assert!(r.read_pair().unwrap().unwrap().is_marker("EOF"));
        r.reset().unwrap();
        let pair = r.read_pair().unwrap().unwrap();
        assert!(pair.is_marker("EOF"));
        assert_eq!(pair.position, 22);
    }

    #[test]
    fn test_byte_out_of_range_is_malformed() {
        let mut r = binary(|out| {
            out.write_i16::<LittleEndian>(280).unwrap();
            out.write_i16::<LittleEndian>(300).unwrap();
        });
        assert!(matches!(
            r.read_pair(),
            Err(DxfError::MalformedToken { code: 280, position: 22, .. })
        ));
    }
}
