//! Extended data (XDATA)
//!
//! Application-tagged values trailing a record, codes 1000-1071. Every run
//! starts with a 1001 application name.

use crate::types::{Handle, Vector3};

/// A single extended data value
#[derive(Debug, Clone, PartialEq)]
pub enum XDataValue {
    /// 1000 and 1006-1009
    String(String),
    /// 1002, `{` or `}`
    ControlString(String),
    /// 1003
    LayerName(String),
    /// 1004
    BinaryData(Vec<u8>),
    /// 1005
    Handle(Handle),
    /// 1010
    Point3D(Vector3),
    /// 1011
    Position3D(Vector3),
    /// 1012
    Displacement3D(Vector3),
    /// 1013
    Direction3D(Vector3),
    /// 1040, and doubles outside the point and distance codes
    Real(f64),
    /// 1041
    Distance(f64),
    /// 1042
    ScaleFactor(f64),
    /// 1060-1070
    Integer16(i16),
    /// 1071
    Integer32(i32),
}

impl XDataValue {
    pub fn as_i16(&self) -> Option<i16> {
        match self {
            XDataValue::Integer16(v) => Some(*v),
            _ => None,
        }
    }
}

/// The values attached by one application
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedDataRecord {
    pub application_name: String,
    pub values: Vec<XDataValue>,
}

impl ExtendedDataRecord {
    pub fn new(application_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
            values: Vec::new(),
        }
    }

    /// Value stored for `code` in a named override list.
    ///
    /// Override lists are written as
    /// `1000 <list>`, `1002 {`, then `1070 <code>` followed by its value,
    /// and closed by `1002 }`. Dimension style overrides use the `DSTYLE`
    /// list of the `ACAD` record.
    pub fn override_value(&self, list: &str, code: i16) -> Option<&XDataValue> {
        let start = self
            .values
            .iter()
            .position(|v| matches!(v, XDataValue::String(s) if s == list))?;
        let mut iter = self.values[start + 1..].iter();
        if !matches!(iter.next(), Some(XDataValue::ControlString(s)) if s == "{") {
            return None;
        }
        while let Some(key) = iter.next() {
            match key {
                XDataValue::ControlString(s) if s == "}" => return None,
                XDataValue::Integer16(k) if *k == code => return iter.next(),
                _ => {
                    iter.next();
                }
            }
        }
        None
    }
}

/// All extended data of a record, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtendedData {
    records: Vec<ExtendedDataRecord>,
}

impl ExtendedData {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn add_record(&mut self, record: ExtendedDataRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ExtendedDataRecord] {
        &self.records
    }

    pub fn get_record(&self, application_name: &str) -> Option<&ExtendedDataRecord> {
        self.records
            .iter()
            .find(|r| r.application_name.eq_ignore_ascii_case(application_name))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dstyle_record() -> ExtendedDataRecord {
        let mut record = ExtendedDataRecord::new("ACAD");
        record.values = vec![
            XDataValue::String("DSTYLE".into()),
            XDataValue::ControlString("{".into()),
            XDataValue::Integer16(41),
            XDataValue::Real(2.5),
            XDataValue::Integer16(77),
            XDataValue::Integer16(1),
            XDataValue::ControlString("}".into()),
        ];
        record
    }

    #[test]
    fn test_override_value() {
        let record = dstyle_record();
        assert_eq!(record.override_value("DSTYLE", 77), Some(&XDataValue::Integer16(1)));
        assert_eq!(record.override_value("DSTYLE", 41), Some(&XDataValue::Real(2.5)));
        assert_eq!(record.override_value("DSTYLE", 40), None);
        assert_eq!(record.override_value("OTHER", 77), None);
    }

    #[test]
    fn test_get_record_ignores_case() {
        let mut xdata = ExtendedData::new();
        xdata.add_record(dstyle_record());
        assert!(xdata.get_record("acad").is_some());
        assert!(xdata.get_record("APP2").is_none());
    }
}
