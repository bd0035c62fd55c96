//! DXF (Drawing Exchange Format) reading

mod code_page;
mod group_code_value;
mod reader;

pub use code_page::{encoding_from_code_page, select_encoding};
pub use group_code_value::GroupCodeValueType;
pub use reader::{
    probe_header_variable, probe_is_binary, read_dxf, DeferredReferences, DimStyleHandles,
    DxfBinaryReader, DxfCodePair, DxfReader, DxfReaderConfiguration, DxfStreamReader,
    DxfTextReader, DxfValue, PendingReference, BINARY_SENTINEL, SENTINEL_SIGNATURE_LEN,
};
