//! Error types for the dxfgraph decoder

use std::io;
use thiserror::Error;

/// Main error type for DXF decoding
///
/// Every variant produced by the cursor or the record decoder carries the
/// diagnostic position of the cursor: a byte offset for binary input and a
/// 1-based line number for text input.
#[derive(Debug, Error)]
pub enum DxfError {
    /// IO error occurred while reading the source
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The source does not start with the binary DXF sentinel
    #[error("Not a binary DXF file: sentinel missing")]
    NotBinaryFormat,

    /// A group code outside every known range, or a value that cannot be parsed
    /// as the type its code demands
    #[error("Malformed token at {position}: code {code}, value {value:?}")]
    MalformedToken {
        code: i32,
        value: String,
        position: u64,
    },

    /// The source ended in the middle of a pair or record
    #[error("Unexpected end of file at {position}")]
    UnexpectedEof { position: u64 },

    /// A typed getter was called on a value of another type
    #[error("Type mismatch for code {code} at {position}: expected {expected}, found {found}")]
    TypeMismatch {
        code: i16,
        expected: &'static str,
        found: &'static str,
        position: u64,
    },

    /// A handle code whose value is not a hexadecimal numeral
    #[error("Invalid handle {value:?} for code {code} at {position}")]
    InvalidHandleFormat {
        code: i16,
        value: String,
        position: u64,
    },

    /// Extended data values not introduced by an application name (code 1001)
    #[error("Extended data code {code} at {position} is not preceded by an application name")]
    InvalidExtendedDataOrder { code: i16, position: u64 },

    /// A record or section ended before its closing marker
    #[error("Premature terminator at {position}: expected {expected}, found {found}")]
    PrematureTerminator {
        expected: &'static str,
        found: String,
        position: u64,
    },

    /// Unsupported DXF version
    #[error("Unsupported CAD version: {0:?}")]
    UnsupportedVersion(String),

    /// Comment code 999 inside binary input
    #[error("Comment code 999 is not allowed in binary DXF (at {position})")]
    CommentInBinary { position: u64 },

    /// A table entry with an empty or invalid name
    #[error("Invalid symbol name {name:?} in table {table}")]
    InvalidSymbolName { table: &'static str, name: String },
}

/// Result type alias for dxfgraph operations
pub type Result<T> = std::result::Result<T, DxfError>;

impl DxfError {
    /// Failures raised by the value cursor itself.
    ///
    /// These always abort a read, failsafe mode or not.
    pub fn is_cursor_error(&self) -> bool {
        matches!(
            self,
            DxfError::Io(_)
                | DxfError::NotBinaryFormat
                | DxfError::MalformedToken { .. }
                | DxfError::UnexpectedEof { .. }
                | DxfError::TypeMismatch { .. }
                | DxfError::InvalidHandleFormat { .. }
                | DxfError::CommentInBinary { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DxfError::UnsupportedVersion("AC1009".to_string());
        assert_eq!(err.to_string(), "Unsupported CAD version: \"AC1009\"");
    }

    #[test]
    fn test_malformed_token_display() {
        let err = DxfError::MalformedToken {
            code: 9999,
            value: "X".to_string(),
            position: 12,
        };
        let text = err.to_string();
        assert!(text.contains("9999"));
        assert!(text.contains("12"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let dxf_err: DxfError = io_err.into();
        assert!(matches!(dxf_err, DxfError::Io(_)));
        assert!(dxf_err.is_cursor_error());
    }

    #[test]
    fn test_record_errors_are_not_cursor_errors() {
        let err = DxfError::InvalidExtendedDataOrder {
            code: 1040,
            position: 3,
        };
        assert!(!err.is_cursor_error());
        let err = DxfError::PrematureTerminator {
            expected: "ENDBLK",
            found: "ENDSEC".to_string(),
            position: 40,
        };
        assert!(!err.is_cursor_error());
    }
}
