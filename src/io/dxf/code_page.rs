//! DXF code page ($DWGCODEPAGE) to encoding mapping.

use crate::types::DxfVersion;
use encoding_rs::Encoding;

/// Get the `encoding_rs` encoding for a DXF code page string.
///
/// Returns `None` for names that denote UTF-8 or plain ASCII and for names
/// that are not recognised. Matching is case-insensitive.
pub fn encoding_from_code_page(code_page: &str) -> Option<&'static Encoding> {
    let enc = match code_page.trim().to_ascii_lowercase().as_str() {
        "gb2312" | "ansi_936" => encoding_rs::GBK,
        "big5" | "ansi_950" => encoding_rs::BIG5,
        "korean" | "ansi_949" | "johab" => encoding_rs::EUC_KR,
        "ansi_932" | "dos932" => encoding_rs::SHIFT_JIS,

        "dos437" | "dos850" | "dos860" | "dos861" | "dos863" | "dos865" => {
            encoding_rs::WINDOWS_1252
        }
        "dos852" => encoding_rs::WINDOWS_1250,
        "dos855" | "dos866" => encoding_rs::IBM866,
        "dos857" => encoding_rs::WINDOWS_1254,
        "dos864" => encoding_rs::WINDOWS_1256,
        "dos869" => encoding_rs::WINDOWS_1253,

        "ansi_874" => encoding_rs::WINDOWS_874,
        "ansi_1250" => encoding_rs::WINDOWS_1250,
        "ansi_1251" => encoding_rs::WINDOWS_1251,
        "ansi_1252" => encoding_rs::WINDOWS_1252,
        "ansi_1253" => encoding_rs::WINDOWS_1253,
        "ansi_1254" => encoding_rs::WINDOWS_1254,
        "ansi_1255" => encoding_rs::WINDOWS_1255,
        "ansi_1256" => encoding_rs::WINDOWS_1256,
        "ansi_1257" => encoding_rs::WINDOWS_1257,
        "ansi_1258" => encoding_rs::WINDOWS_1258,

        "iso8859-1" => encoding_rs::WINDOWS_1252,
        "iso8859-2" => encoding_rs::ISO_8859_2,
        "iso8859-3" => encoding_rs::ISO_8859_3,
        "iso8859-4" => encoding_rs::ISO_8859_4,
        "iso8859-5" => encoding_rs::ISO_8859_5,
        "iso8859-6" => encoding_rs::ISO_8859_6,
        "iso8859-7" => encoding_rs::ISO_8859_7,
        "iso8859-8" => encoding_rs::ISO_8859_8,
        "iso8859-9" => encoding_rs::WINDOWS_1254,
        "iso8859-15" => encoding_rs::ISO_8859_15,

        "koi8-r" => encoding_rs::KOI8_R,
        "koi8-u" => encoding_rs::KOI8_U,

        _ => return None,
    };
    Some(enc)
}

/// Choose the string encoding for a file.
///
/// Files from AC1021 on are always UTF-8. Older files use $DWGCODEPAGE when
/// it names a known code page, UTF-8 when the text starts with a byte order
/// mark, and `fallback` otherwise.
pub fn select_encoding(
    version: DxfVersion,
    code_page: Option<&str>,
    has_bom: bool,
    fallback: &'static Encoding,
) -> &'static Encoding {
    if version.is_unicode() {
        return encoding_rs::UTF_8;
    }
    if let Some(enc) = code_page.and_then(encoding_from_code_page) {
        return enc;
    }
    if has_bom {
        return encoding_rs::UTF_8;
    }
    fallback
}
