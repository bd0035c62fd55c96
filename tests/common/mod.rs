//! Shared test utilities for dxfgraph integration tests.
//!
//! Builders for small in-memory DXF files, text and binary, so every test
//! states exactly the group codes it feeds the reader.

#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};
use dxfgraph::io::dxf::{DxfReader, DxfReaderConfiguration, BINARY_SENTINEL};
use dxfgraph::{CadDocument, Result};
use std::io::Cursor;

// ===========================================================================
// Text files
// ===========================================================================

/// Builds an ASCII DXF file one group at a time.
#[derive(Debug, Default, Clone)]
pub struct TextDxf {
    out: String,
}

impl TextDxf {
    pub fn new() -> Self {
        Self::default()
    }

    /// A file starting with a HEADER section that declares `version`.
    pub fn with_version(version: &str) -> Self {
        Self::new()
            .section("HEADER")
            .pair(9, "$ACADVER")
            .pair(1, version)
            .end_section()
    }

    pub fn pair(mut self, code: i16, value: impl std::fmt::Display) -> Self {
        self.out.push_str(&format!("{:>3}\n{}\n", code, value));
        self
    }

    /// Append `10/20/30` style coordinates starting at `x_code`.
    pub fn point(self, x_code: i16, x: f64, y: f64, z: f64) -> Self {
        self.pair(x_code, x).pair(x_code + 10, y).pair(x_code + 20, z)
    }

    pub fn record(self, name: &str) -> Self {
        self.pair(0, name)
    }

    pub fn section(self, name: &str) -> Self {
        self.pair(0, "SECTION").pair(2, name)
    }

    pub fn end_section(self) -> Self {
        self.pair(0, "ENDSEC")
    }

    /// Append `EOF` and return the file bytes.
    pub fn finish(self) -> Vec<u8> {
        self.pair(0, "EOF").out.into_bytes()
    }

    /// Raw text without an `EOF` marker.
    pub fn into_string(self) -> String {
        self.out
    }
}

// ===========================================================================
// Binary files
// ===========================================================================

/// Builds a binary DXF file one group at a time.
#[derive(Debug, Clone)]
pub struct BinaryDxf {
    out: Vec<u8>,
}

impl BinaryDxf {
    pub fn new() -> Self {
        Self {
            out: BINARY_SENTINEL.to_vec(),
        }
    }

    /// A body without the sentinel.
    pub fn without_sentinel() -> Self {
        Self { out: Vec::new() }
    }

    fn code(&mut self, code: i16) {
        self.out.write_i16::<LittleEndian>(code).unwrap();
    }

    pub fn string(mut self, code: i16, value: &str) -> Self {
        self.code(code);
        self.out.extend_from_slice(value.as_bytes());
        self.out.push(0);
        self
    }

    pub fn double(mut self, code: i16, value: f64) -> Self {
        self.code(code);
        self.out.write_f64::<LittleEndian>(value).unwrap();
        self
    }

    pub fn int16(mut self, code: i16, value: i16) -> Self {
        self.code(code);
        self.out.write_i16::<LittleEndian>(value).unwrap();
        self
    }

    pub fn int32(mut self, code: i16, value: i32) -> Self {
        self.code(code);
        self.out.write_i32::<LittleEndian>(value).unwrap();
        self
    }

    pub fn int64(mut self, code: i16, value: i64) -> Self {
        self.code(code);
        self.out.write_i64::<LittleEndian>(value).unwrap();
        self
    }

    pub fn boolean(mut self, code: i16, value: bool) -> Self {
        self.code(code);
        self.out.push(value as u8);
        self
    }

    pub fn chunk(mut self, code: i16, data: &[u8]) -> Self {
        self.code(code);
        self.out.push(data.len() as u8);
        self.out.extend_from_slice(data);
        self
    }

    pub fn section(self, name: &str) -> Self {
        self.string(0, "SECTION").string(2, name)
    }

    pub fn end_section(self) -> Self {
        self.string(0, "ENDSEC")
    }

    pub fn finish(self) -> Vec<u8> {
        self.string(0, "EOF").out
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.out
    }
}

impl Default for BinaryDxf {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Read helpers
// ===========================================================================

pub fn read_bytes(bytes: Vec<u8>) -> Result<CadDocument> {
    DxfReader::from_reader(Cursor::new(bytes))?.read()
}

pub fn read_bytes_with(bytes: Vec<u8>, config: DxfReaderConfiguration) -> Result<CadDocument> {
    DxfReader::from_reader(Cursor::new(bytes))?
        .with_configuration(config)
        .read()
}

/// Read a file that is expected to decode.
pub fn read_ok(bytes: Vec<u8>) -> CadDocument {
    match read_bytes(bytes) {
        Ok(doc) => doc,
        Err(e) => panic!("failed to read DXF: {e}"),
    }
}
