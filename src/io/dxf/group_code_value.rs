//! Group code to value type mapping
//!
//! The type of every value in a DXF file is determined by its group code
//! alone. Both the text and the binary reader type values through
//! [`GroupCodeValueType::from_code`].

/// The value type carried by a group code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupCodeValueType {
    /// Text
    String,
    /// Text that only appears in text files (code 999)
    Comment,
    /// Hexadecimal handle of the record itself (5, 105, 1005)
    Handle,
    /// Hexadecimal reference to another record (320-369, 390-399, 480-481)
    ObjectId,
    /// 64-bit float
    Double,
    /// 16-bit integer
    Int16,
    /// 32-bit integer
    Int32,
    /// 64-bit integer
    Int64,
    /// 8-bit integer, stored as a 16-bit integer in binary files
    Byte,
    /// Boolean, one byte in binary files
    Bool,
    /// Binary data: hex digits in text files, length-prefixed in binary files
    Chunk,
}

impl GroupCodeValueType {
    /// Type of the value carried by `code`, `None` outside every known range.
    pub fn from_code(code: i32) -> Option<Self> {
        use GroupCodeValueType::*;
        let ty = match code {
            0..=4 | 6..=9 => String,
            5 | 105 => Handle,
            10..=59 => Double,
            60..=79 => Int16,
            90..=99 => Int32,
            100..=102 => String,
            110..=149 => Double,
            160..=169 => Int64,
            170..=179 => Int16,
            210..=239 => Double,
            270..=279 => Int16,
            280..=289 => Byte,
            290..=299 => Bool,
            300..=309 => String,
            310..=319 => Chunk,
            320..=369 => ObjectId,
            370..=389 => Int16,
            390..=399 => ObjectId,
            400..=409 => Int16,
            410..=419 => String,
            420..=429 => Int32,
            430..=439 => String,
            440..=459 => Int32,
            460..=469 => Double,
            470..=479 => String,
            480..=481 => ObjectId,
            999 => Comment,
            1000..=1003 => String,
            1004 => Chunk,
            1005 => Handle,
            1006..=1009 => String,
            1010..=1059 => Double,
            1060..=1070 => Int16,
            1071 => Int32,
            _ => return None,
        };
        Some(ty)
    }

    /// Whether values of this type are hexadecimal handles.
    pub fn is_handle(&self) -> bool {
        matches!(self, GroupCodeValueType::Handle | GroupCodeValueType::ObjectId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert_eq!(GroupCodeValueType::from_code(0), Some(GroupCodeValueType::String));
        assert_eq!(GroupCodeValueType::from_code(5), Some(GroupCodeValueType::Handle));
        assert_eq!(GroupCodeValueType::from_code(10), Some(GroupCodeValueType::Double));
        assert_eq!(GroupCodeValueType::from_code(70), Some(GroupCodeValueType::Int16));
        assert_eq!(GroupCodeValueType::from_code(90), Some(GroupCodeValueType::Int32));
        assert_eq!(GroupCodeValueType::from_code(160), Some(GroupCodeValueType::Int64));
        assert_eq!(GroupCodeValueType::from_code(280), Some(GroupCodeValueType::Byte));
        assert_eq!(GroupCodeValueType::from_code(290), Some(GroupCodeValueType::Bool));
        assert_eq!(GroupCodeValueType::from_code(310), Some(GroupCodeValueType::Chunk));
        assert_eq!(GroupCodeValueType::from_code(330), Some(GroupCodeValueType::ObjectId));
        assert_eq!(GroupCodeValueType::from_code(999), Some(GroupCodeValueType::Comment));
        assert_eq!(GroupCodeValueType::from_code(1071), Some(GroupCodeValueType::Int32));
    }

    #[test]
    fn test_gaps_are_rejected() {
        for code in [-1, 80, 89, 103, 104, 106, 150, 180, 209, 240, 482, 998, 1072, 9999] {
            assert_eq!(GroupCodeValueType::from_code(code), None, "code {}", code);
        }
    }
}
