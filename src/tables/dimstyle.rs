//! Dimension style table entry

use super::{TableEntry, TableKind};
use crate::types::Handle;
use once_cell::sync::Lazy;

/// Fallback values for out-of-range dimension style variables
pub static DEFAULT_DIM_STYLE: Lazy<DimStyle> = Lazy::new(DimStyle::standard);

/// A dimension style table entry
///
/// Scalar fields carry the DIMxxx variable of the same name. The text style,
/// line type and arrow block references are only known once the whole file
/// has been read and are filled in by deferred resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct DimStyle {
    pub handle: Handle,
    pub owner: Handle,
    pub name: String,
    pub flags: i16,

    /// DIMPOST (code 3)
    pub dimpost: String,
    /// DIMAPOST (code 4)
    pub dimapost: String,

    /// DIMSCALE (code 40)
    pub dimscale: f64,
    /// DIMASZ (code 41)
    pub dimasz: f64,
    /// DIMEXO (code 42)
    pub dimexo: f64,
    /// DIMDLI (code 43)
    pub dimdli: f64,
    /// DIMEXE (code 44)
    pub dimexe: f64,
    /// DIMRND (code 45)
    pub dimrnd: f64,
    /// DIMDLE (code 46)
    pub dimdle: f64,
    /// DIMTP (code 47)
    pub dimtp: f64,
    /// DIMTM (code 48)
    pub dimtm: f64,
    /// DIMFXL (code 49)
    pub dimfxl: f64,
    /// DIMTXT (code 140)
    pub dimtxt: f64,
    /// DIMCEN (code 141)
    pub dimcen: f64,
    /// DIMTSZ (code 142)
    pub dimtsz: f64,
    /// DIMALTF (code 143)
    pub dimaltf: f64,
    /// DIMLFAC (code 144)
    pub dimlfac: f64,
    /// DIMTVP (code 145)
    pub dimtvp: f64,
    /// DIMTFAC (code 146)
    pub dimtfac: f64,
    /// DIMGAP (code 147)
    pub dimgap: f64,
    /// DIMALTRND (code 148)
    pub dimaltrnd: f64,

    /// DIMTFILL (code 69)
    pub dimtfill: i16,
    /// DIMTOL (code 71)
    pub dimtol: bool,
    /// DIMLIM (code 72)
    pub dimlim: bool,
    /// DIMTIH (code 73)
    pub dimtih: bool,
    /// DIMTOH (code 74)
    pub dimtoh: bool,
    /// DIMSE1 (code 75)
    pub dimse1: bool,
    /// DIMSE2 (code 76)
    pub dimse2: bool,
    /// DIMTAD (code 77)
    pub dimtad: i16,
    /// DIMZIN (code 78)
    pub dimzin: i16,
    /// DIMAZIN (code 79)
    pub dimazin: i16,
    /// DIMALT (code 170)
    pub dimalt: bool,
    /// DIMALTD (code 171)
    pub dimaltd: i16,
    /// DIMTOFL (code 172)
    pub dimtofl: bool,
    /// DIMSAH (code 173)
    pub dimsah: bool,
    /// DIMTIX (code 174)
    pub dimtix: bool,
    /// DIMSOXD (code 175)
    pub dimsoxd: bool,
    /// DIMCLRD (code 176)
    pub dimclrd: i16,
    /// DIMCLRE (code 177)
    pub dimclre: i16,
    /// DIMCLRT (code 178)
    pub dimclrt: i16,
    /// DIMADEC (code 179)
    pub dimadec: i16,
    /// DIMDEC (code 271)
    pub dimdec: i16,
    /// DIMTDEC (code 272)
    pub dimtdec: i16,
    /// DIMALTU (code 273)
    pub dimaltu: i16,
    /// DIMALTTD (code 274)
    pub dimalttd: i16,
    /// DIMAUNIT (code 275)
    pub dimaunit: i16,
    /// DIMFRAC (code 276)
    pub dimfrac: i16,
    /// DIMLUNIT (code 277)
    pub dimlunit: i16,
    /// DIMDSEP (code 278)
    pub dimdsep: char,
    /// DIMTMOVE (code 279)
    pub dimtmove: i16,
    /// DIMJUST (code 280)
    pub dimjust: u8,
    /// DIMSD1 (code 281)
    pub dimsd1: bool,
    /// DIMSD2 (code 282)
    pub dimsd2: bool,
    /// DIMTOLJ (code 283)
    pub dimtolj: u8,
    /// DIMTZIN (code 284)
    pub dimtzin: u8,
    /// DIMALTZ (code 285)
    pub dimaltz: u8,
    /// DIMALTTZ (code 286)
    pub dimalttz: u8,
    /// DIMATFIT (code 289)
    pub dimatfit: u8,
    /// DIMFXLON (code 290)
    pub dimfxlon: bool,
    /// DIMTXTDIRECTION (code 294)
    pub dimtxtdirection: bool,
    /// DIMLWD (code 371)
    pub dimlwd: i16,
    /// DIMLWE (code 372)
    pub dimlwe: i16,

    /// DIMTXSTY, text style entry (code 340)
    pub text_style: Option<Handle>,
    /// DIMLDRBLK, leader arrow block record (code 341)
    pub leader_arrow_block: Option<Handle>,
    /// DIMBLK, arrow block record (code 342)
    pub arrow_block: Option<Handle>,
    /// DIMBLK1 (code 343)
    pub arrow_block1: Option<Handle>,
    /// DIMBLK2 (code 344)
    pub arrow_block2: Option<Handle>,
    /// DIMLTYPE (code 345)
    pub line_type: Option<Handle>,
    /// DIMLTEX1 (code 346)
    pub ext_line_type1: Option<Handle>,
    /// DIMLTEX2 (code 347)
    pub ext_line_type2: Option<Handle>,
}

impl DimStyle {
    pub const STANDARD: &'static str = "Standard";

    pub fn new(name: impl Into<String>) -> Self {
        DimStyle {
            name: name.into(),
            ..Self::standard()
        }
    }

    /// The `Standard` style with the documented default of every variable.
    pub fn standard() -> Self {
        DimStyle {
            handle: Handle::NULL,
            owner: Handle::NULL,
            name: Self::STANDARD.to_string(),
            flags: 0,
            dimpost: String::new(),
            dimapost: String::new(),
            dimscale: 1.0,
            dimasz: 0.18,
            dimexo: 0.0625,
            dimdli: 0.38,
            dimexe: 0.18,
            dimrnd: 0.0,
            dimdle: 0.0,
            dimtp: 0.0,
            dimtm: 0.0,
            dimfxl: 1.0,
            dimtxt: 0.18,
            dimcen: 0.09,
            dimtsz: 0.0,
            dimaltf: 25.4,
            dimlfac: 1.0,
            dimtvp: 0.0,
            dimtfac: 1.0,
            dimgap: 0.09,
            dimaltrnd: 0.0,
            dimtfill: 0,
            dimtol: false,
            dimlim: false,
            dimtih: true,
            dimtoh: true,
            dimse1: false,
            dimse2: false,
            dimtad: 0,
            dimzin: 0,
            dimazin: 0,
            dimalt: false,
            dimaltd: 2,
            dimtofl: false,
            dimsah: false,
            dimtix: false,
            dimsoxd: false,
            dimclrd: 0,
            dimclre: 0,
            dimclrt: 0,
            dimadec: 0,
            dimdec: 4,
            dimtdec: 4,
            dimaltu: 2,
            dimalttd: 2,
            dimaunit: 0,
            dimfrac: 0,
            dimlunit: 2,
            dimdsep: '.',
            dimtmove: 0,
            dimjust: 0,
            dimsd1: false,
            dimsd2: false,
            dimtolj: 1,
            dimtzin: 0,
            dimaltz: 0,
            dimalttz: 0,
            dimatfit: 3,
            dimfxlon: false,
            dimtxtdirection: false,
            dimlwd: -2,
            dimlwe: -2,
            text_style: None,
            leader_arrow_block: None,
            arrow_block: None,
            arrow_block1: None,
            arrow_block2: None,
            line_type: None,
            ext_line_type1: None,
            ext_line_type2: None,
        }
    }

    /// Replace out-of-range variables with the values of
    /// [`DEFAULT_DIM_STYLE`].
    ///
    /// Returns the names of the variables that were replaced.
    pub fn apply_fallbacks(&mut self) -> Vec<&'static str> {
        let defaults = &*DEFAULT_DIM_STYLE;
        let mut replaced = Vec::new();

        let mut check = |value: &mut f64, valid: fn(f64) -> bool, default: f64, name: &'static str| {
            if value.is_nan() || !valid(*value) {
                *value = default;
                replaced.push(name);
            }
        };

        check(&mut self.dimscale, |v| v > 0.0, defaults.dimscale, "DIMSCALE");
        check(&mut self.dimasz, |v| v >= 0.0, defaults.dimasz, "DIMASZ");
        check(&mut self.dimexo, |v| v >= 0.0, defaults.dimexo, "DIMEXO");
        check(&mut self.dimexe, |v| v >= 0.0, defaults.dimexe, "DIMEXE");
        check(&mut self.dimgap, |v| v >= 0.0, defaults.dimgap, "DIMGAP");
        check(&mut self.dimtsz, |v| v >= 0.0, defaults.dimtsz, "DIMTSZ");
        check(&mut self.dimtxt, |v| v > 0.0, defaults.dimtxt, "DIMTXT");
        check(&mut self.dimlfac, |v| v > 0.0, defaults.dimlfac, "DIMLFAC");
        check(&mut self.dimtfac, |v| v > 0.0, defaults.dimtfac, "DIMTFAC");
        check(&mut self.dimaltf, |v| v > 0.0, defaults.dimaltf, "DIMALTF");

        replaced
    }
}

impl Default for DimStyle {
    fn default() -> Self {
        Self::standard()
    }
}

impl TableEntry for DimStyle {
    const KIND: TableKind = TableKind::DimStyle;

    fn handle(&self) -> Handle {
        self.handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }

    fn name(&self) -> &str {
        &self.name
    }
}
