//! DXF section readers

use super::deferred::{DeferredReferences, DimStyleHandles, PendingReference};
use super::entity_reader::{self, DecodedEntity};
use super::object_reader;
use super::stream_reader::{DxfCodePair, DxfStreamReader};
use crate::classes::{DxfClass, ProxyFlags};
use crate::document::{CadDocument, DocumentTable, EntityId, HeaderValue};
use crate::entities::{EntityCommon, EntityType};
use crate::error::{DxfError, Result};
use crate::notification::NotificationType;
use crate::objects::{ObjectCommon, ObjectType};
use crate::tables::block_record::is_paper_space_name;
use crate::tables::*;
use crate::types::*;
use crate::xdata::{ExtendedData, ExtendedDataRecord, XDataValue};

/// Reads the sections of one file into a document
///
/// Decoders consume the fields of the current record and stop in front of the
/// next code 0 pair. References to other records are registered with the
/// [`DeferredReferences`] shared by all sections of the file.
pub struct SectionReader<'a> {
    pub(super) reader: &'a mut dyn DxfStreamReader,
    pub(super) document: &'a mut CadDocument,
    pub(super) deferred: &'a mut DeferredReferences,
}

impl<'a> SectionReader<'a> {
    pub fn new(
        reader: &'a mut dyn DxfStreamReader,
        document: &'a mut CadDocument,
        deferred: &'a mut DeferredReferences,
    ) -> Self {
        Self {
            reader,
            document,
            deferred,
        }
    }

    // ---------------------------------------------------------------------
    // Record helpers
    // ---------------------------------------------------------------------

    /// Next pair of the current record, `None` in front of the next code 0
    /// pair or at the end of input.
    pub(super) fn next_field(&mut self) -> Result<Option<DxfCodePair>> {
        match self.reader.read_pair()? {
            Some(pair) if pair.code == 0 => {
                self.reader.push_back(pair);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Consume the next pair when it has `code`.
    pub(super) fn take(&mut self, code: i16) -> Result<Option<DxfCodePair>> {
        match self.reader.read_pair()? {
            Some(pair) if pair.code == code => Ok(Some(pair)),
            Some(pair) => {
                self.reader.push_back(pair);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Whether the next pair has `code`, without consuming it.
    ///
    /// Count-driven loops check this before each element so that a count
    /// larger than the data stops at the end of the data.
    pub(super) fn at_code(&mut self, code: i16) -> Result<bool> {
        Ok(self.reader.peek_code()? == Some(code))
    }

    pub(super) fn take_double(&mut self, code: i16) -> Result<f64> {
        match self.take(code)? {
            Some(pair) => pair.as_double(),
            None => Ok(0.0),
        }
    }

    /// Integer of any width, 0 when the pair is absent
    pub(super) fn take_int(&mut self, code: i16) -> Result<i64> {
        match self.take(code)? {
            Some(pair) => pair.as_int(),
            None => Ok(0),
        }
    }

    pub(super) fn take_point_2d(&mut self, x_code: i16) -> Result<Vector2> {
        let x = self.take_double(x_code)?;
        let y = self.take_double(x_code + 10)?;
        Ok(Vector2::new(x, y))
    }

    /// Consume the next record marker when it is `name`.
    pub(super) fn next_record_is(&mut self, name: &str) -> Result<bool> {
        match self.reader.read_pair()? {
            Some(pair) if pair.is_marker(name) => Ok(true),
            Some(pair) => {
                self.reader.push_back(pair);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    /// Skip the remaining fields of the current record.
    pub(super) fn skip_record(&mut self) -> Result<()> {
        while self.next_field()?.is_some() {}
        Ok(())
    }

    /// Skip to the end of the current section.
    pub fn skip_section(&mut self) -> Result<()> {
        loop {
            let pair = self.reader.advance()?;
            if pair.is_marker("ENDSEC") {
                return Ok(());
            }
        }
    }

    pub(super) fn warn(&mut self, message: String, position: u64) {
        self.document
            .notifications
            .notify_at(NotificationType::Warning, message, position);
    }

    /// Fields shared by every entity record: handle, owner, layer, color,
    /// line type, visibility and the application groups.
    ///
    /// Codes the common part does not know are ignored.
    pub(super) fn read_common_field(
        &mut self,
        pair: &DxfCodePair,
        common: &mut EntityCommon,
    ) -> Result<()> {
        match pair.code {
            5 => common.handle = pair.as_handle()?,
            330 if common.owner.is_null() => common.owner = pair.as_handle()?,
            102 => self.read_application_group(
                pair,
                &mut common.extension_dictionary,
                &mut common.reactors,
            )?,
            8 => common.layer = pair.as_string()?.to_string(),
            6 => common.line_type = pair.as_string()?.to_string(),
            62 => {
                if !matches!(common.color, Color::Rgb { .. }) {
                    common.color = Color::from_index(pair.as_i16()?);
                }
            }
            420 => common.color = Color::from_true_color(pair.as_i32()?),
            370 => common.line_weight = LineWeight::from_value(pair.as_i16()?),
            440 => common.transparency = Transparency::from_alpha_value(pair.as_i32()?),
            48 => common.line_type_scale = pair.as_double()?,
            60 => common.invisible = pair.as_i16()? != 0,
            67 => common.paper_space = pair.as_i16()? != 0,
            410 => common.layout_tab = pair.as_string()?.to_string(),
            1001 => {
                let data = self.read_extended_data(pair)?;
                for record in data.records() {
                    common.extended_data.add_record(record.clone());
                }
            }
            1000..=1071 => {
                return Err(DxfError::InvalidExtendedDataOrder {
                    code: pair.code,
                    position: pair.position,
                })
            }
            _ => {}
        }
        Ok(())
    }

    /// Object form of [`SectionReader::read_common_field`]
    pub(super) fn read_common_object_field(
        &mut self,
        pair: &DxfCodePair,
        common: &mut ObjectCommon,
    ) -> Result<()> {
        match pair.code {
            5 => common.handle = pair.as_handle()?,
            330 if common.owner.is_null() => common.owner = pair.as_handle()?,
            102 => self.read_application_group(
                pair,
                &mut common.extension_dictionary,
                &mut common.reactors,
            )?,
            1001 => {
                let data = self.read_extended_data(pair)?;
                for record in data.records() {
                    common.extended_data.add_record(record.clone());
                }
            }
            1000..=1071 => {
                return Err(DxfError::InvalidExtendedDataOrder {
                    code: pair.code,
                    position: pair.position,
                })
            }
            _ => {}
        }
        Ok(())
    }

    /// Read a `102 {NAME ... 102 }` group.
    ///
    /// `{ACAD_XDICTIONARY` holds the extension dictionary (360) and
    /// `{ACAD_REACTORS` the reactors (330); other groups are skipped.
    fn read_application_group(
        &mut self,
        open: &DxfCodePair,
        extension_dictionary: &mut Handle,
        reactors: &mut Vec<Handle>,
    ) -> Result<()> {
        let name = open.as_string()?;
        if !name.starts_with('{') {
            return Ok(());
        }
        let name = name.to_string();
        loop {
            let pair = self.reader.advance()?;
            if pair.code == 0 {
                return Err(DxfError::PrematureTerminator {
                    expected: "}",
                    found: pair.value_string(),
                    position: pair.position,
                });
            }
            if pair.code == 102 {
                break;
            }
            match (name.as_str(), pair.code) {
                ("{ACAD_XDICTIONARY", 360) => *extension_dictionary = pair.as_handle()?,
                ("{ACAD_REACTORS", 330) => reactors.push(pair.as_handle()?),
                _ => {}
            }
        }
        Ok(())
    }

    /// Read extended data starting at the 1001 pair `first`.
    ///
    /// Stops in front of the first pair below code 1000.
    pub(super) fn read_extended_data(&mut self, first: &DxfCodePair) -> Result<ExtendedData> {
        let mut data = ExtendedData::new();
        let mut record = ExtendedDataRecord::new(first.as_string()?);

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code < 1000 {
                self.reader.push_back(pair);
                break;
            }
            let value = match pair.code {
                1001 => {
                    let next = ExtendedDataRecord::new(pair.as_string()?);
                    data.add_record(std::mem::replace(&mut record, next));
                    continue;
                }
                1002 => XDataValue::ControlString(pair.as_string()?.to_string()),
                1003 => XDataValue::LayerName(pair.as_string()?.to_string()),
                1004 => XDataValue::BinaryData(pair.as_bytes()?.to_vec()),
                1005 => XDataValue::Handle(pair.as_handle()?),
                1010 => XDataValue::Point3D(Vector3::new(pair.as_double()?, 0.0, 0.0)),
                1011 => XDataValue::Position3D(Vector3::new(pair.as_double()?, 0.0, 0.0)),
                1012 => XDataValue::Displacement3D(Vector3::new(pair.as_double()?, 0.0, 0.0)),
                1013 => XDataValue::Direction3D(Vector3::new(pair.as_double()?, 0.0, 0.0)),
                1020..=1023 | 1030..=1033 => {
                    if let Some(point) = record.values.last_mut().and_then(xdata_point_mut) {
                        pair.set_axis(point)?;
                    }
                    continue;
                }
                1040 => XDataValue::Real(pair.as_double()?),
                1041 => XDataValue::Distance(pair.as_double()?),
                1042 => XDataValue::ScaleFactor(pair.as_double()?),
                1014..=1019 | 1024..=1029 | 1034..=1039 | 1043..=1059 => {
                    XDataValue::Real(pair.as_double()?)
                }
                1060..=1070 => XDataValue::Integer16(pair.as_i16()?),
                1071 => XDataValue::Integer32(pair.as_i32()?),
                _ => XDataValue::String(pair.as_string()?.to_string()),
            };
            record.values.push(value);
        }

        data.add_record(record);
        Ok(data)
    }

    // ---------------------------------------------------------------------
    // HEADER
    // ---------------------------------------------------------------------

    /// Read the HEADER section
    pub fn read_header(&mut self) -> Result<()> {
        loop {
            let pair = self.reader.advance()?;
            if pair.code == 0 {
                return self.end_of_section(pair);
            }
            if pair.code != 9 {
                continue;
            }

            let name = pair.as_string()?.to_uppercase();
            let mut values = Vec::new();
            while let Some(value) = self.reader.read_pair()? {
                if value.code == 9 || value.code == 0 {
                    self.reader.push_back(value);
                    break;
                }
                self.apply_header_value(&name, &value);
                values.push(HeaderValue {
                    code: value.code,
                    value: value.value_string(),
                });
            }
            self.document.header.variables.insert(name, values);
        }
    }

    fn apply_header_value(&mut self, name: &str, pair: &DxfCodePair) {
        let doc = &mut *self.document;
        let header = &mut doc.header;
        match name {
            "$ACADVER" => {
                if let Ok(s) = pair.as_string() {
                    header.version_string = s.to_string();
                    doc.version = DxfVersion::from_version_string(s);
                }
            }
            "$DWGCODEPAGE" => {
                if let Ok(s) = pair.as_string() {
                    header.code_page = s.to_string();
                }
            }
            "$HANDSEED" => {
                if let Ok(h) = pair.as_handle() {
                    header.handle_seed = h;
                }
            }
            "$INSUNITS" => {
                if let Ok(v) = pair.as_int() {
                    header.insertion_units = Units::from_code(v as i16);
                }
            }
            "$TEXTSIZE" => {
                if let Ok(v) = pair.as_double() {
                    header.text_height = v;
                }
            }
            "$DIMSCALE" => {
                if let Ok(v) = pair.as_double() {
                    header.dim_scale = v;
                }
            }
            "$LTSCALE" => {
                if let Ok(v) = pair.as_double() {
                    header.linetype_scale = v;
                }
            }
            "$EXTMIN" => {
                let _ = pair.set_axis(&mut header.extents_min);
            }
            "$EXTMAX" => {
                let _ = pair.set_axis(&mut header.extents_max);
            }
            "$CLAYER" => {
                if let Ok(s) = pair.as_string() {
                    header.current_layer = s.to_string();
                }
            }
            "$MEASUREMENT" => {
                if let Ok(v) = pair.as_int() {
                    header.measurement = v as i16;
                }
            }
            _ => {}
        }
    }

    /// Check that a section ends with ENDSEC.
    fn end_of_section(&self, pair: DxfCodePair) -> Result<()> {
        if pair.is_marker("ENDSEC") {
            Ok(())
        } else {
            Err(DxfError::PrematureTerminator {
                expected: "ENDSEC",
                found: pair.value_string(),
                position: pair.position,
            })
        }
    }

    // ---------------------------------------------------------------------
    // CLASSES
    // ---------------------------------------------------------------------

    /// Read the CLASSES section
    pub fn read_classes(&mut self) -> Result<()> {
        loop {
            let pair = self.reader.advance()?;
            if !pair.is_marker("CLASS") {
                if pair.code == 0 {
                    return self.end_of_section(pair);
                }
                continue;
            }

            let mut class = DxfClass::default();
            while let Some(field) = self.next_field()? {
                match field.code {
                    1 => class.dxf_name = field.as_string()?.to_string(),
                    2 => class.cpp_class_name = field.as_string()?.to_string(),
                    3 => class.application_name = field.as_string()?.to_string(),
                    90 => class.proxy_flags = ProxyFlags(field.as_i32()?),
                    91 => class.instance_count = field.as_i32()?,
                    280 => class.was_zombie = field.as_byte()? != 0,
                    281 => class.is_an_entity = field.as_byte()? != 0,
                    _ => {}
                }
            }
            self.document.classes.add_or_update(class);
        }
    }

    // ---------------------------------------------------------------------
    // THUMBNAILIMAGE
    // ---------------------------------------------------------------------

    /// Read the THUMBNAILIMAGE section
    pub fn read_thumbnail(&mut self) -> Result<()> {
        let mut data = Vec::new();
        loop {
            let pair = self.reader.advance()?;
            match pair.code {
                0 => {
                    self.document.thumbnail = data;
                    return self.end_of_section(pair);
                }
                310 => data.extend_from_slice(pair.as_bytes()?),
                _ => {}
            }
        }
    }

    // ---------------------------------------------------------------------
    // TABLES
    // ---------------------------------------------------------------------

    /// Read the TABLES section
    pub fn read_tables(&mut self) -> Result<()> {
        loop {
            let pair = self.reader.advance()?;
            if pair.is_marker("TABLE") {
                self.read_table()?;
            } else if pair.code == 0 {
                return self.end_of_section(pair);
            }
        }
    }

    fn read_table(&mut self) -> Result<()> {
        let mut name = String::new();
        let mut handle = Handle::NULL;
        let mut count = 0usize;
        while let Some(pair) = self.next_field()? {
            match pair.code {
                2 => name = pair.as_string()?.to_string(),
                5 => handle = pair.as_handle()?,
                70 => count = pair.as_i16()?.max(0) as usize,
                _ => {
                    let mut ignored = Handle::NULL;
                    let mut owner = Handle::NULL;
                    self.read_entry_prefix_field(&pair, &mut ignored, &mut owner)?;
                }
            }
        }

        let kind = match TableKind::from_name(&name) {
            Some(kind) => kind,
            None => {
                self.document.notifications.notify_at(
                    NotificationType::NotImplemented,
                    format!("table {} skipped", name),
                    self.reader.position(),
                );
                return self.skip_to_endtab();
            }
        };
        tracing::debug!(table = %name, count, "reading table");
        self.document.set_table_handle(kind, handle);

        loop {
            let pair = self.reader.advance()?;
            if pair.is_marker("ENDTAB") {
                return Ok(());
            }
            if pair.is_marker("ENDSEC") {
                return Err(DxfError::PrematureTerminator {
                    expected: "ENDTAB",
                    found: pair.value_string(),
                    position: pair.position,
                });
            }
            if pair.code != 0 {
                continue;
            }
            let entry_type = pair.as_string()?.to_string();
            if entry_type != kind.name() {
                self.warn(
                    format!("unexpected {} record in table {}", entry_type, kind.name()),
                    pair.position,
                );
                self.skip_record()?;
                continue;
            }
            match kind {
                TableKind::AppId => {
                    let entry = self.read_appid_entry()?;
                    self.add_table_entry(entry, pair.position);
                }
                TableKind::BlockRecord => {
                    let entry = self.read_block_record_entry()?;
                    self.add_table_entry(entry, pair.position);
                }
                TableKind::DimStyle => {
                    let (entry, handles) = self.read_dimstyle_entry()?;
                    let name = entry.name.clone();
                    if self.add_table_entry(entry, pair.position) {
                        self.deferred.register_dim_style(&name, handles);
                    }
                }
                TableKind::Layer => {
                    let entry = self.read_layer_entry()?;
                    self.add_table_entry(entry, pair.position);
                }
                TableKind::LineType => {
                    let entry = self.read_linetype_entry()?;
                    self.add_table_entry(entry, pair.position);
                }
                TableKind::TextStyle => {
                    let entry = self.read_textstyle_entry()?;
                    self.add_table_entry(entry, pair.position);
                }
                TableKind::Ucs => {
                    let entry = self.read_ucs_entry()?;
                    self.add_table_entry(entry, pair.position);
                }
                TableKind::View => {
                    let entry = self.read_view_entry()?;
                    self.add_table_entry(entry, pair.position);
                }
                TableKind::VPort => {
                    let entry = self.read_vport_entry()?;
                    self.add_table_entry(entry, pair.position);
                }
            }
        }
    }

    fn skip_to_endtab(&mut self) -> Result<()> {
        loop {
            let pair = self.reader.advance()?;
            if pair.is_marker("ENDTAB") {
                return Ok(());
            }
            if pair.is_marker("ENDSEC") {
                return Err(DxfError::PrematureTerminator {
                    expected: "ENDTAB",
                    found: pair.value_string(),
                    position: pair.position,
                });
            }
        }
    }

    /// Store a decoded entry; entries with an invalid name are dropped.
    fn add_table_entry<T: DocumentTable>(&mut self, entry: T, position: u64) -> bool {
        if !is_valid_symbol_name(entry.name()) {
            let error = DxfError::InvalidSymbolName {
                table: T::KIND.name(),
                name: entry.name().to_string(),
            };
            self.warn(format!("{}; entry dropped", error), position);
            return false;
        }
        self.document.add_table_entry(entry);
        true
    }

    /// Prefix shared by table entries: handle, owner, application groups
    /// and extended data, which entries do not keep.
    fn read_entry_prefix_field(
        &mut self,
        pair: &DxfCodePair,
        handle: &mut Handle,
        owner: &mut Handle,
    ) -> Result<()> {
        match pair.code {
            5 | 105 => *handle = pair.as_handle()?,
            330 if owner.is_null() => *owner = pair.as_handle()?,
            102 => {
                let mut xdict = Handle::NULL;
                let mut reactors = Vec::new();
                self.read_application_group(pair, &mut xdict, &mut reactors)?;
            }
            1001 => {
                self.read_extended_data(pair)?;
            }
            1000..=1071 => {
                return Err(DxfError::InvalidExtendedDataOrder {
                    code: pair.code,
                    position: pair.position,
                })
            }
            _ => {}
        }
        Ok(())
    }

    fn read_appid_entry(&mut self) -> Result<AppId> {
        let mut entry = AppId::new("");
        while let Some(pair) = self.next_field()? {
            match pair.code {
                2 => entry.name = pair.as_string()?.to_string(),
                70 => entry.flags = pair.as_i16()?,
                _ => self.read_entry_prefix_field(&pair, &mut entry.handle, &mut entry.owner)?,
            }
        }
        Ok(entry)
    }

    fn read_block_record_entry(&mut self) -> Result<BlockRecord> {
        let mut entry = BlockRecord::new("");
        while let Some(pair) = self.next_field()? {
            match pair.code {
                2 => entry.name = pair.as_string()?.to_string(),
                340 => entry.layout = pair.as_handle()?,
                70 => entry.units = Units::from_code(pair.as_i16()?),
                280 => entry.explodable = pair.as_byte()? != 0,
                281 => entry.scale_uniformly = pair.as_byte()? != 0,
                310 => entry.preview.extend_from_slice(pair.as_bytes()?),
                _ => self.read_entry_prefix_field(&pair, &mut entry.handle, &mut entry.owner)?,
            }
        }
        Ok(entry)
    }

    fn read_dimstyle_entry(&mut self) -> Result<(DimStyle, DimStyleHandles)> {
        let mut style = DimStyle::new("");
        let mut handles = DimStyleHandles::default();
        let position = self.reader.position();

        while let Some(pair) = self.next_field()? {
            match pair.code {
                2 => style.name = pair.as_string()?.to_string(),
                70 => style.flags = pair.as_i16()?,
                3 => style.dimpost = pair.as_string()?.to_string(),
                4 => style.dimapost = pair.as_string()?.to_string(),
                40 => style.dimscale = pair.as_double()?,
                41 => style.dimasz = pair.as_double()?,
                42 => style.dimexo = pair.as_double()?,
                43 => style.dimdli = pair.as_double()?,
                44 => style.dimexe = pair.as_double()?,
                45 => style.dimrnd = pair.as_double()?,
                46 => style.dimdle = pair.as_double()?,
                47 => style.dimtp = pair.as_double()?,
                48 => style.dimtm = pair.as_double()?,
                49 => style.dimfxl = pair.as_double()?,
                140 => style.dimtxt = pair.as_double()?,
                141 => style.dimcen = pair.as_double()?,
                142 => style.dimtsz = pair.as_double()?,
                143 => style.dimaltf = pair.as_double()?,
                144 => style.dimlfac = pair.as_double()?,
                145 => style.dimtvp = pair.as_double()?,
                146 => style.dimtfac = pair.as_double()?,
                147 => style.dimgap = pair.as_double()?,
                148 => style.dimaltrnd = pair.as_double()?,
                69 => style.dimtfill = pair.as_i16()?,
                71 => style.dimtol = pair.as_i16()? != 0,
                72 => style.dimlim = pair.as_i16()? != 0,
                73 => style.dimtih = pair.as_i16()? != 0,
                74 => style.dimtoh = pair.as_i16()? != 0,
                75 => style.dimse1 = pair.as_i16()? != 0,
                76 => style.dimse2 = pair.as_i16()? != 0,
                77 => style.dimtad = pair.as_i16()?,
                78 => style.dimzin = pair.as_i16()?,
                79 => style.dimazin = pair.as_i16()?,
                170 => style.dimalt = pair.as_i16()? != 0,
                171 => style.dimaltd = pair.as_i16()?,
                172 => style.dimtofl = pair.as_i16()? != 0,
                173 => style.dimsah = pair.as_i16()? != 0,
                174 => style.dimtix = pair.as_i16()? != 0,
                175 => style.dimsoxd = pair.as_i16()? != 0,
                176 => style.dimclrd = pair.as_i16()?,
                177 => style.dimclre = pair.as_i16()?,
                178 => style.dimclrt = pair.as_i16()?,
                179 => style.dimadec = pair.as_i16()?,
                271 => style.dimdec = pair.as_i16()?,
                272 => style.dimtdec = pair.as_i16()?,
                273 => style.dimaltu = pair.as_i16()?,
                274 => style.dimalttd = pair.as_i16()?,
                275 => style.dimaunit = pair.as_i16()?,
                276 => style.dimfrac = pair.as_i16()?,
                277 => style.dimlunit = pair.as_i16()?,
                278 => {
                    let code = pair.as_i16()?;
                    style.dimdsep = u8::try_from(code).map(char::from).unwrap_or('.');
                }
                279 => style.dimtmove = pair.as_i16()?,
                280 => style.dimjust = pair.as_byte()?,
                281 => style.dimsd1 = pair.as_byte()? != 0,
                282 => style.dimsd2 = pair.as_byte()? != 0,
                283 => style.dimtolj = pair.as_byte()?,
                284 => style.dimtzin = pair.as_byte()?,
                285 => style.dimaltz = pair.as_byte()?,
                286 => style.dimalttz = pair.as_byte()?,
                289 => style.dimatfit = pair.as_byte()?,
                290 => style.dimfxlon = pair.as_bool()?,
                294 => style.dimtxtdirection = pair.as_bool()?,
                371 => style.dimlwd = pair.as_i16()?,
                372 => style.dimlwe = pair.as_i16()?,
                340..=347 => handles.set(pair.code, pair.as_handle()?),
                _ => self.read_entry_prefix_field(&pair, &mut style.handle, &mut style.owner)?,
            }
        }

        let replaced = style.apply_fallbacks();
        if !replaced.is_empty() {
            self.warn(
                format!(
                    "dimension style '{}': {} out of range, default used",
                    style.name,
                    replaced.join(", ")
                ),
                position,
            );
        }
        Ok((style, handles))
    }

    fn read_layer_entry(&mut self) -> Result<Layer> {
        let mut layer = Layer::new("");
        while let Some(pair) = self.next_field()? {
            match pair.code {
                2 => layer.name = pair.as_string()?.to_string(),
                70 => layer.flags = LayerFlags::from_bits_truncate(pair.as_i16()?),
                62 => {
                    let index = pair.as_i16()?;
                    layer.is_off = index < 0;
                    if !matches!(layer.color, Color::Rgb { .. }) {
                        layer.color = Color::from_index(index);
                    }
                }
                420 => layer.color = Color::from_true_color(pair.as_i32()?),
                6 => layer.line_type = pair.as_string()?.to_string(),
                290 => layer.is_plottable = pair.as_bool()?,
                370 => layer.line_weight = LineWeight::from_value(pair.as_i16()?),
                390 => layer.plot_style = pair.as_handle()?,
                347 => layer.material = pair.as_handle()?,
                _ => self.read_entry_prefix_field(&pair, &mut layer.handle, &mut layer.owner)?,
            }
        }
        Ok(layer)
    }

    fn read_linetype_entry(&mut self) -> Result<LineType> {
        let mut line_type = LineType::new("");
        while let Some(pair) = self.next_field()? {
            match pair.code {
                2 => line_type.name = pair.as_string()?.to_string(),
                70 => line_type.flags = pair.as_i16()?,
                3 => line_type.description = pair.as_string()?.to_string(),
                72 => line_type.alignment = pair.as_i16()? as u8,
                73 => {}
                40 => line_type.pattern_length = pair.as_double()?,
                49 => line_type.elements.push(LineTypeElement {
                    length: pair.as_double()?,
                    ..LineTypeElement::default()
                }),
                74 | 75 | 340 | 46 | 50 | 44 | 45 | 9 if !line_type.elements.is_empty() => {
                    if let Some(e) = line_type.elements.last_mut() {
                        match pair.code {
                            74 => e.shape_flag = pair.as_i16()?,
                            75 => e.shape_number = pair.as_i16()?,
                            340 => e.style = pair.as_handle()?,
                            46 => e.scale = pair.as_double()?,
                            50 => e.rotation = pair.as_double()?,
                            44 => e.offset.x = pair.as_double()?,
                            45 => e.offset.y = pair.as_double()?,
                            _ => e.text = pair.as_string()?.to_string(),
                        }
                    }
                }
                _ => self.read_entry_prefix_field(
                    &pair,
                    &mut line_type.handle,
                    &mut line_type.owner,
                )?,
            }
        }
        Ok(line_type)
    }

    fn read_textstyle_entry(&mut self) -> Result<TextStyle> {
        let mut style = TextStyle::new("");
        while let Some(pair) = self.next_field()? {
            match pair.code {
                2 => style.name = pair.as_string()?.to_string(),
                70 => style.flags = pair.as_i16()?,
                40 => style.height = pair.as_double()?,
                41 => style.width_factor = pair.as_double()?,
                50 => style.oblique_angle = pair.as_double()?,
                71 => {
                    style.generation_flags = TextGenerationFlags::from_bits_truncate(pair.as_i16()?)
                }
                42 => style.last_height = pair.as_double()?,
                3 => style.font_file = pair.as_string()?.to_string(),
                4 => style.big_font_file = pair.as_string()?.to_string(),
                _ => self.read_entry_prefix_field(&pair, &mut style.handle, &mut style.owner)?,
            }
        }
        Ok(style)
    }

    fn read_ucs_entry(&mut self) -> Result<Ucs> {
        let mut ucs = Ucs::new("");
        while let Some(pair) = self.next_field()? {
            match pair.code {
                2 => ucs.name = pair.as_string()?.to_string(),
                70 => ucs.flags = pair.as_i16()?,
                10 | 20 | 30 => pair.set_axis(&mut ucs.origin)?,
                11 | 21 | 31 => pair.set_axis(&mut ucs.x_axis)?,
                12 | 22 | 32 => pair.set_axis(&mut ucs.y_axis)?,
                146 => ucs.elevation = pair.as_double()?,
                _ => self.read_entry_prefix_field(&pair, &mut ucs.handle, &mut ucs.owner)?,
            }
        }
        Ok(ucs)
    }

    fn read_view_entry(&mut self) -> Result<View> {
        let mut view = View::new("");
        while let Some(pair) = self.next_field()? {
            match pair.code {
                2 => view.name = pair.as_string()?.to_string(),
                70 => view.flags = pair.as_i16()?,
                40 => view.height = pair.as_double()?,
                41 => view.width = pair.as_double()?,
                10 | 20 => pair.set_axis_2d(&mut view.center)?,
                11 | 21 | 31 => pair.set_axis(&mut view.direction)?,
                12 | 22 | 32 => pair.set_axis(&mut view.target)?,
                42 => view.lens_length = pair.as_double()?,
                43 => view.front_clipping = pair.as_double()?,
                44 => view.back_clipping = pair.as_double()?,
                50 => view.twist_angle = pair.as_double()?,
                71 => view.view_mode = pair.as_i16()?,
                _ => self.read_entry_prefix_field(&pair, &mut view.handle, &mut view.owner)?,
            }
        }
        Ok(view)
    }

    fn read_vport_entry(&mut self) -> Result<VPort> {
        let mut vport = VPort::new("");
        while let Some(pair) = self.next_field()? {
            match pair.code {
                2 => vport.name = pair.as_string()?.to_string(),
                70 => vport.flags = pair.as_i16()?,
                10 | 20 => pair.set_axis_2d(&mut vport.lower_left)?,
                11 | 21 => pair.set_axis_2d(&mut vport.upper_right)?,
                12 | 22 => pair.set_axis_2d(&mut vport.center)?,
                13 | 23 => pair.set_axis_2d(&mut vport.snap_base)?,
                14 | 24 => pair.set_axis_2d(&mut vport.snap_spacing)?,
                15 | 25 => pair.set_axis_2d(&mut vport.grid_spacing)?,
                16 | 26 | 36 => pair.set_axis(&mut vport.direction)?,
                17 | 27 | 37 => pair.set_axis(&mut vport.target)?,
                40 => vport.view_height = pair.as_double()?,
                41 => vport.aspect_ratio = pair.as_double()?,
                42 => vport.lens_length = pair.as_double()?,
                _ => self.read_entry_prefix_field(&pair, &mut vport.handle, &mut vport.owner)?,
            }
        }
        Ok(vport)
    }

    // ---------------------------------------------------------------------
    // BLOCKS
    // ---------------------------------------------------------------------

    /// Read the BLOCKS section
    pub fn read_blocks(&mut self) -> Result<()> {
        loop {
            let pair = self.reader.advance()?;
            if pair.is_marker("BLOCK") {
                self.read_block()?;
            } else if pair.code == 0 {
                return self.end_of_section(pair);
            }
        }
    }

    /// Read one BLOCK ... ENDBLK definition
    fn read_block(&mut self) -> Result<()> {
        let mut common = EntityCommon::new();
        let mut name = String::new();
        let mut flags = 0i16;
        let mut base_point = Vector3::ZERO;
        let mut description = String::new();
        let mut xref_path = String::new();

        while let Some(pair) = self.next_field()? {
            match pair.code {
                2 => name = pair.as_string()?.to_string(),
                3 if name.is_empty() => name = pair.as_string()?.to_string(),
                70 => flags = pair.as_i16()?,
                10 | 20 | 30 => pair.set_axis(&mut base_point)?,
                1 => xref_path = pair.as_string()?.to_string(),
                4 => description = pair.as_string()?.to_string(),
                _ => self.read_common_field(&pair, &mut common)?,
            }
        }

        self.document.note_handle(common.handle);
        if !self.document.block_records.contains(&name) {
            tracing::debug!(block = %name, "creating block record for BLOCK without entry");
            let mut record = BlockRecord::new(name.clone());
            record.handle = self.document.allocate_handle();
            self.document.add_table_entry(record);
        }
        let layout_block = is_paper_space_name(&name)
            || name.eq_ignore_ascii_case(BlockRecord::MODEL_SPACE);
        let block_handle = match self.document.block_records.get_mut(&name) {
            Some(br) => {
                br.flags = BlockFlags::from_bits_truncate(flags);
                br.block_entity_handle = common.handle;
                br.layer = common.layer.clone();
                br.base_point = base_point;
                br.description = description;
                br.xref_path = xref_path;
                br.handle
            }
            None => Handle::NULL,
        };

        loop {
            let pair = self.reader.advance()?;
            if pair.is_marker("ENDBLK") {
                return self.read_block_end(&name);
            }
            if pair.code != 0 {
                continue;
            }
            let record = pair.as_string()?.to_string();
            if record == "ENDSEC" || record == "BLOCK" || record == "EOF" {
                return Err(DxfError::PrematureTerminator {
                    expected: "ENDBLK",
                    found: record,
                    position: pair.position,
                });
            }

            let Some(mut decoded) = self.read_entity_record(&record, pair.position)? else {
                continue;
            };
            if layout_block {
                let owner = match decoded.entity.common().owner {
                    h if h.is_null() => PendingReference::OwnerBlock(name.clone()),
                    h => PendingReference::Owner(h),
                };
                decoded.pending.push(owner);
                self.add_entity(decoded);
                continue;
            }

            decoded.entity.common_mut().owner = block_handle;
            let is_attdef = matches!(decoded.entity, EntityType::AttributeDefinition(_));
            let id = self.add_entity(decoded);
            self.deferred.set_container(id, &name);
            if let Some(br) = self.document.block_records.get_mut(&name) {
                if is_attdef {
                    br.attribute_definitions.push(id);
                } else {
                    br.entities.push(id);
                }
            }
        }
    }

    fn read_block_end(&mut self, name: &str) -> Result<()> {
        let mut common = EntityCommon::new();
        while let Some(pair) = self.next_field()? {
            self.read_common_field(&pair, &mut common)?;
        }
        self.document.note_handle(common.handle);
        if let Some(br) = self.document.block_records.get_mut(name) {
            br.block_end_handle = common.handle;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // ENTITIES
    // ---------------------------------------------------------------------

    /// Read the ENTITIES section
    pub fn read_entities(&mut self) -> Result<()> {
        loop {
            let pair = self.reader.advance()?;
            if pair.code != 0 {
                continue;
            }
            let record = pair.as_string()?.to_string();
            if record == "ENDSEC" {
                return Ok(());
            }
            if record == "EOF" {
                return self.end_of_section(pair);
            }

            let Some(mut decoded) = self.read_entity_record(&record, pair.position)? else {
                continue;
            };
            let common = decoded.entity.common();
            let owner = if common.owner.is_valid() {
                PendingReference::Owner(common.owner)
            } else if common.paper_space {
                PendingReference::OwnerBlock(BlockRecord::PAPER_SPACE.to_string())
            } else {
                PendingReference::OwnerBlock(BlockRecord::MODEL_SPACE.to_string())
            };
            decoded.pending.push(owner);
            self.add_entity(decoded);
        }
    }

    /// Decode the entity record `name`, or skip it when no decoder exists.
    fn read_entity_record(&mut self, name: &str, position: u64) -> Result<Option<DecodedEntity>> {
        match entity_reader::decoder(name) {
            Some(decode) => decode(self, name).map(Some),
            None => {
                self.document.notifications.notify_at(
                    NotificationType::NotImplemented,
                    format!("entity {} skipped", name),
                    position,
                );
                self.skip_record()?;
                Ok(None)
            }
        }
    }

    fn add_entity(&mut self, decoded: DecodedEntity) -> EntityId {
        let DecodedEntity { entity, pending } = decoded;
        let id = self.document.add_entity(entity);
        for reference in pending {
            self.deferred.register(id, reference);
        }
        id
    }

    // ---------------------------------------------------------------------
    // OBJECTS
    // ---------------------------------------------------------------------

    /// Read the OBJECTS section, then seed the named collections from the
    /// root dictionary.
    pub fn read_objects(&mut self) -> Result<()> {
        loop {
            let pair = self.reader.advance()?;
            if pair.code != 0 {
                continue;
            }
            let record = pair.as_string()?.to_string();
            if record == "ENDSEC" {
                break;
            }
            if record == "EOF" {
                return self.end_of_section(pair);
            }

            let decoded = match object_reader::decoder(&record) {
                Some(decode) => decode(self, &record)?,
                None => {
                    self.document.notifications.notify_at(
                        NotificationType::NotImplemented,
                        format!("object {} skipped", record),
                        pair.position,
                    );
                    self.skip_record()?;
                    continue;
                }
            };

            let is_dictionary = decoded.object.as_dictionary().is_some();
            let id = self.document.add_object(decoded.object);
            if is_dictionary && self.document.root_dictionary.is_none() {
                self.document.root_dictionary = Some(id);
            }
            if !decoded.members.is_empty() {
                self.deferred.register_group_members(id, decoded.members);
            }
        }

        self.seed_named_collections();
        Ok(())
    }

    fn seed_named_collections(&mut self) {
        let root = match self
            .document
            .root_dictionary
            .and_then(|id| self.document.object(id))
            .and_then(ObjectType::as_dictionary)
        {
            Some(dict) => dict.entries.clone(),
            None => return,
        };

        for (key, dict_handle) in root {
            let entries = match self
                .document
                .object_by_handle(dict_handle)
                .and_then(ObjectType::as_dictionary)
            {
                Some(dict) => dict.entries.clone(),
                None => continue,
            };
            let doc = &mut *self.document;
            for (name, handle) in entries {
                let Some(id) = doc.object_id(handle) else {
                    continue;
                };
                let collection = match key.as_str() {
                    "ACAD_GROUP" => {
                        if let Some(ObjectType::Group(group)) = doc.object_mut(id) {
                            group.name = name.clone();
                            group.is_unnamed = name.starts_with('*');
                        }
                        doc.groups.insert(&name, id);
                        continue;
                    }
                    "ACAD_LAYOUT" => &mut doc.layouts,
                    "ACAD_MLINESTYLE" => &mut doc.mline_styles,
                    "ACAD_IMAGE_DICT" => &mut doc.image_definitions,
                    "ACAD_PDFDEFINITIONS" => &mut doc.pdf_definitions,
                    "ACAD_DWFDEFINITIONS" => &mut doc.dwf_definitions,
                    "ACAD_DGNDEFINITIONS" => &mut doc.dgn_definitions,
                    _ => break,
                };
                collection.dictionary = dict_handle;
                collection.insert(&name, id);
            }
        }
    }
}

fn xdata_point_mut(value: &mut XDataValue) -> Option<&mut Vector3> {
    match value {
        XDataValue::Point3D(p)
        | XDataValue::Position3D(p)
        | XDataValue::Displacement3D(p)
        | XDataValue::Direction3D(p) => Some(p),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::reader::DxfTextReader;
    use std::io::Cursor;

    fn with_reader<T>(
        data: &str,
        f: impl FnOnce(&mut SectionReader<'_>) -> T,
    ) -> (T, CadDocument, DeferredReferences) {
        let mut stream = DxfTextReader::new(Cursor::new(data.as_bytes().to_vec()));
        let mut document = CadDocument::empty();
        let mut deferred = DeferredReferences::new();
        let result = {
            let mut reader = SectionReader::new(&mut stream, &mut document, &mut deferred);
            f(&mut reader)
        };
        (result, document, deferred)
    }

    #[test]
    fn test_header_collects_multi_value_variables() {
        let data = "9\n$ACADVER\n1\nAC1015\n9\n$EXTMIN\n10\n1.0\n20\n2.0\n30\n3.0\n\
                    9\n$UNKNOWNVAR\n70\n5\n9\n$INSUNITS\n70\n4\n0\nENDSEC\n";
        let (result, doc, _) = with_reader(data, |r| r.read_header());
        result.unwrap();
        assert_eq!(doc.version, DxfVersion::AC1015);
        assert_eq!(doc.header.extents_min, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(doc.header.variables["$EXTMIN"].len(), 3);
        assert_eq!(doc.header.get("UNKNOWNVAR"), Some("5"));
        assert_eq!(doc.header.insertion_units, Units::Millimeters);
    }

    #[test]
    fn test_xdata_without_application_fails() {
        let data = "8\n0\n1040\n1.5\n0\nENDSEC\n";
        let (result, _, _) = with_reader(data, |r| {
            let mut common = EntityCommon::new();
            while let Some(pair) = r.next_field()? {
                r.read_common_field(&pair, &mut common)?;
            }
            Ok::<_, DxfError>(common)
        });
        assert!(matches!(
            result,
            Err(DxfError::InvalidExtendedDataOrder { code: 1040, position: 3 })
        ));
    }

    #[test]
    fn test_common_fields_and_groups() {
        let data = "5\n2A\n102\n{ACAD_REACTORS\n330\n1F\n102\n}\n330\n1E\n\
                    102\n{ACAD_XDICTIONARY\n360\n2B\n102\n}\n8\nWalls\n62\n3\n\
                    1001\nAPP\n1000\nhello\n1010\n1.0\n1020\n2.0\n1030\n3.0\n1001\nAPP2\n1070\n7\n0\nLINE\n";
        let (result, _, _) = with_reader(data, |r| {
            let mut common = EntityCommon::new();
            while let Some(pair) = r.next_field()? {
                r.read_common_field(&pair, &mut common)?;
            }
            Ok::<_, DxfError>(common)
        });
        let common = result.unwrap();
        assert_eq!(common.handle, Handle::new(0x2A));
        assert_eq!(common.owner, Handle::new(0x1E));
        assert_eq!(common.reactors, vec![Handle::new(0x1F)]);
        assert_eq!(common.extension_dictionary, Handle::new(0x2B));
        assert_eq!(common.layer, "Walls");
        assert_eq!(common.color, Color::Index(3));
        let records = common.extended_data.records();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].values[1],
            XDataValue::Point3D(Vector3::new(1.0, 2.0, 3.0))
        );
        assert_eq!(records[1].values, vec![XDataValue::Integer16(7)]);
    }

    #[test]
    fn test_xdata_numeric_ranges() {
        let data = "1001\nAPP\n1060\n12\n1014\n0.5\n1043\n2.5\n1000\ntag\n0\nLINE\n";
        let (result, _, _) = with_reader(data, |r| {
            let mut common = EntityCommon::new();
            while let Some(pair) = r.next_field()? {
                r.read_common_field(&pair, &mut common)?;
            }
            Ok::<_, DxfError>(common)
        });
        let common = result.unwrap();
        let record = common.extended_data.get_record("APP").unwrap();
        assert_eq!(
            record.values,
            vec![
                XDataValue::Integer16(12),
                XDataValue::Real(0.5),
                XDataValue::Real(2.5),
                XDataValue::String("tag".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_layer_name_is_dropped() {
        let data = "0\nTABLE\n2\nLAYER\n70\n2\n\
                    0\nLAYER\n5\n10\n2\nbad<name\n70\n0\n\
                    0\nLAYER\n5\n11\n2\nGood\n62\n-5\n\
                    0\nENDTAB\n0\nENDSEC\n";
        let (result, doc, _) = with_reader(data, |r| r.read_tables());
        result.unwrap();
        assert_eq!(doc.layers.len(), 1);
        let layer = doc.layers.get("Good").unwrap();
        assert!(layer.is_off);
        assert_eq!(layer.color, Color::Index(5));
        assert_eq!(doc.notifications.of_type(NotificationType::Warning).len(), 1);
    }

    #[test]
    fn test_dimstyle_fallbacks() {
        let data = "0\nTABLE\n2\nDIMSTYLE\n\
                    0\nDIMSTYLE\n105\n27\n2\nNarrow\n41\n-5.0\n140\n0.25\n340\n11\n\
                    0\nENDTAB\n0\nENDSEC\n";
        let (result, doc, deferred) = with_reader(data, |r| r.read_tables());
        result.unwrap();
        let style = doc.dim_styles.get("Narrow").unwrap();
        assert!((style.dimasz - 0.18).abs() < 1e-10);
        assert!((style.dimtxt - 0.25).abs() < 1e-10);
        assert_eq!(style.handle, Handle::new(0x27));
        assert!(doc.notifications.has_type(NotificationType::Warning));
        assert_eq!(deferred.len(), 1);
    }

    #[test]
    fn test_premature_endsec_in_block() {
        let data = "0\nBLOCK\n2\nB1\n0\nLINE\n8\n0\n0\nENDSEC\n";
        let (result, _, _) = with_reader(data, |r| r.read_blocks());
        match result {
            Err(DxfError::PrematureTerminator { expected, found, .. }) => {
                assert_eq!(expected, "ENDBLK");
                assert_eq!(found, "ENDSEC");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_block_body_entities() {
        let data = "0\nBLOCK\n5\n20\n2\nDoor\n70\n2\n10\n1.0\n20\n0.0\n30\n0.0\n\
                    0\nLINE\n5\n1C\n8\n0\n0\nATTDEF\n5\n22\n2\nTAG\n\
                    0\nENDBLK\n5\n23\n0\nENDSEC\n";
        let (result, doc, _) = with_reader(data, |r| r.read_blocks());
        result.unwrap();
        let br = doc.block_records.get("Door").unwrap();
        assert_eq!(br.entities.len(), 1);
        assert!(br.handle.is_valid());
        let line = doc.entity(br.entities[0]).unwrap();
        assert_eq!(line.common().owner, br.handle);
        assert_eq!(line.handle(), Handle::new(0x1C));
        assert_eq!(br.attribute_definitions.len(), 1);
        assert_eq!(br.base_point, Vector3::new(1.0, 0.0, 0.0));
        assert!(br.flags.contains(BlockFlags::HAS_ATTRIBUTES));
        assert_eq!(br.block_end_handle, Handle::new(0x23));
    }

    #[test]
    fn test_unknown_entity_is_skipped() {
        let data = "0\nSHAPE\n8\n0\n40\n1.0\n0\nLINE\n5\n30\n0\nENDSEC\n";
        let (result, doc, deferred) = with_reader(data, |r| r.read_entities());
        result.unwrap();
        assert_eq!(doc.entity_count(), 1);
        assert!(doc.notifications.has_type(NotificationType::NotImplemented));
        assert_eq!(deferred.len(), 1);
    }

    #[test]
    fn test_classes_and_thumbnail() {
        let data = "0\nCLASS\n1\nACDBDICTIONARYWDFLT\n2\nAcDbDictionaryWithDefault\n3\nObjectDBX Classes\n\
                    90\n0\n91\n1\n280\n0\n281\n0\n0\nENDSEC\n";
        let (result, doc, _) = with_reader(data, |r| r.read_classes());
        result.unwrap();
        let class = doc.classes.get("ACDBDICTIONARYWDFLT").unwrap();
        assert_eq!(class.instance_count, 1);

        let data = "90\n3\n310\n0A0B\n310\n0C\n0\nENDSEC\n";
        let (result, doc, _) = with_reader(data, |r| r.read_thumbnail());
        result.unwrap();
        assert_eq!(doc.thumbnail, vec![0x0A, 0x0B, 0x0C]);
    }
}
