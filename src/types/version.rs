//! DXF file versions ($ACADVER)

use std::fmt;

/// DXF version, ordered by release
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DxfVersion {
    /// Version string missing or not recognised
    #[default]
    Unknown,
    /// Any release before R12 (AC1006 and older)
    Legacy,
    /// R12
    AC1009,
    /// R13
    AC1012,
    /// R14
    AC1014,
    /// 2000
    AC1015,
    /// 2004
    AC1018,
    /// 2007
    AC1021,
    /// 2010
    AC1024,
    /// 2013
    AC1027,
    /// 2018
    AC1032,
}

impl DxfVersion {
    /// Oldest version the decoder accepts
    pub const MINIMUM: DxfVersion = DxfVersion::AC1012;

    pub fn from_version_string(s: &str) -> Self {
        match s.trim() {
            "AC1009" => DxfVersion::AC1009,
            "AC1012" => DxfVersion::AC1012,
            "AC1014" => DxfVersion::AC1014,
            "AC1015" => DxfVersion::AC1015,
            "AC1018" => DxfVersion::AC1018,
            "AC1021" => DxfVersion::AC1021,
            "AC1024" => DxfVersion::AC1024,
            "AC1027" => DxfVersion::AC1027,
            "AC1032" => DxfVersion::AC1032,
            "AC1.2" | "AC1.40" | "AC1.50" | "AC2.10" => DxfVersion::Legacy,
            other => match other.strip_prefix("AC").and_then(|n| n.parse::<u32>().ok()) {
                Some(n) if n < 1009 => DxfVersion::Legacy,
                _ => DxfVersion::Unknown,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DxfVersion::Unknown => "Unknown",
            DxfVersion::Legacy => "Legacy",
            DxfVersion::AC1009 => "AC1009",
            DxfVersion::AC1012 => "AC1012",
            DxfVersion::AC1014 => "AC1014",
            DxfVersion::AC1015 => "AC1015",
            DxfVersion::AC1018 => "AC1018",
            DxfVersion::AC1021 => "AC1021",
            DxfVersion::AC1024 => "AC1024",
            DxfVersion::AC1027 => "AC1027",
            DxfVersion::AC1032 => "AC1032",
        }
    }

    /// Whether strings are stored as UTF-8 rather than in $DWGCODEPAGE.
    pub fn is_unicode(&self) -> bool {
        *self >= DxfVersion::AC1021
    }

    /// Whether files of this version can be decoded.
    ///
    /// Unknown versions are accepted; only versions known to predate
    /// [`DxfVersion::MINIMUM`] are refused.
    pub fn is_supported(&self) -> bool {
        *self == DxfVersion::Unknown || *self >= DxfVersion::MINIMUM
    }
}

impl fmt::Display for DxfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
