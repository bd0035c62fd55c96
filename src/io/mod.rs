//! I/O module for reading CAD files in DXF format

pub mod dxf;

pub use dxf::{DxfReader, DxfReaderConfiguration};
