//! Handle type for DXF objects
//!
//! Handles are the only cross-object linkage in a DXF file: hexadecimal
//! identifiers written as strings under handle codes (5, 105, 320-369, ...).

use std::fmt;

/// A unique identifier for an object in a document
///
/// Handle 0 is reserved and means "no reference".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    /// The null handle (0)
    pub const NULL: Handle = Handle(0);

    #[inline]
    pub const fn new(value: u64) -> Self {
        Handle(value)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }

    /// Parse a hexadecimal handle string such as `"1F"` or `"0x1f"`.
    ///
    /// Surrounding whitespace is ignored; an empty string is the null handle.
    pub fn parse_hex(text: &str) -> Option<Handle> {
        let text = text.trim();
        if text.is_empty() {
            return Some(Handle::NULL);
        }
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        u64::from_str_radix(digits, 16).ok().map(Handle)
    }

    /// Uppercase hexadecimal form without prefix, as written in DXF.
    pub fn to_hex(&self) -> String {
        format!("{:X}", self.0)
    }
}

impl Default for Handle {
    fn default() -> Self {
        Handle::NULL
    }
}

impl From<u64> for Handle {
    fn from(value: u64) -> Self {
        Handle(value)
    }
}

impl From<Handle> for u64 {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

impl fmt::UpperHex for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_handle() {
        let null = Handle::NULL;
        assert!(null.is_null());
        assert!(!null.is_valid());
        assert_eq!(null.value(), 0);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Handle::parse_hex("1F"), Some(Handle::new(0x1F)));
        assert_eq!(Handle::parse_hex("  1f "), Some(Handle::new(0x1F)));
        assert_eq!(Handle::parse_hex("0x2A"), Some(Handle::new(0x2A)));
        assert_eq!(Handle::parse_hex(""), Some(Handle::NULL));
        assert_eq!(Handle::parse_hex("XYZ"), None);
    }

    #[test]
    fn test_handle_display() {
        let handle = Handle::new(0xABCD);
        assert_eq!(format!("{}", handle), "ABCD");
        assert_eq!(handle.to_hex(), "ABCD");
    }

    #[test]
    fn test_handle_ordering() {
        assert!(Handle::new(100) < Handle::new(200));
    }
}
