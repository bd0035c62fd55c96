//! DXF file reader

mod binary_reader;
mod deferred;
mod entity_reader;
mod object_reader;
mod section_reader;
mod stream_reader;
mod text_reader;

pub use binary_reader::{DxfBinaryReader, BINARY_SENTINEL, SENTINEL_SIGNATURE_LEN};
pub use deferred::{DeferredReferences, DimStyleHandles, PendingReference};
pub use stream_reader::{DxfCodePair, DxfStreamReader, DxfValue};
pub use text_reader::DxfTextReader;

use section_reader::SectionReader;

use crate::document::CadDocument;
use crate::error::{DxfError, Result};
use crate::io::dxf::code_page::select_encoding;
use crate::notification::NotificationType;
use crate::types::DxfVersion;
use encoding_rs::Encoding;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Configuration for the DXF reader.
#[derive(Debug, Clone)]
pub struct DxfReaderConfiguration {
    /// When `true`, record-level failures inside a section are reported as
    /// `Error` notifications and the rest of the section is skipped.
    ///
    /// Cursor failures (malformed tokens, truncated input, I/O) always abort.
    /// Default: `false`.
    pub failsafe: bool,
    /// Encoding of pre-AC1021 files without a known `$DWGCODEPAGE` or byte
    /// order mark. Default: Windows-1252.
    pub fallback_encoding: &'static Encoding,
    /// Run the reference fix-up pass after decoding. When `false` the pending
    /// references are left in [`CadDocument::pending_references`].
    /// Default: `true`.
    pub resolve_references: bool,
}

impl Default for DxfReaderConfiguration {
    fn default() -> Self {
        Self {
            failsafe: false,
            fallback_encoding: encoding_rs::WINDOWS_1252,
            resolve_references: true,
        }
    }
}

impl DxfReaderConfiguration {
    pub fn failsafe(mut self, failsafe: bool) -> Self {
        self.failsafe = failsafe;
        self
    }

    pub fn fallback_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.fallback_encoding = encoding;
        self
    }

    pub fn resolve_references(mut self, resolve: bool) -> Self {
        self.resolve_references = resolve;
        self
    }
}

/// DXF file reader
///
/// Picks the text or binary cursor from the first bytes of the input, then
/// decodes every section into a [`CadDocument`] and links the references
/// between its records.
pub struct DxfReader {
    reader: Box<dyn DxfStreamReader>,
    has_bom: bool,
    config: DxfReaderConfiguration,
}

impl DxfReader {
    /// Create a new DXF reader from any reader positioned at the start of the
    /// file
    pub fn from_reader<R: Read + Seek + 'static>(mut reader: R) -> Result<Self> {
        let mut has_bom = false;
        let reader: Box<dyn DxfStreamReader> = if probe_is_binary(&mut reader)? {
            Box::new(DxfBinaryReader::new(reader)?)
        } else {
            let mut prefix = [0u8; 3];
            has_bom = read_prefix(&mut reader, &mut prefix)? == UTF8_BOM.len() && prefix == UTF8_BOM;
            Box::new(DxfTextReader::new(reader))
        };

        Ok(Self {
            reader,
            has_bom,
            config: DxfReaderConfiguration::default(),
        })
    }

    /// Create a new DXF reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: DxfReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Whether the input is a binary DXF file
    pub fn is_binary(&self) -> bool {
        self.reader.is_binary()
    }

    /// Read the file into a document
    pub fn read(mut self) -> Result<CadDocument> {
        let (version_string, code_page) = self.read_version()?;
        let version = version_string
            .as_deref()
            .map(DxfVersion::from_version_string)
            .unwrap_or(DxfVersion::Unknown);
        if !version.is_supported() {
            return Err(DxfError::UnsupportedVersion(
                version_string.unwrap_or_default(),
            ));
        }

        let encoding = select_encoding(
            version,
            code_page.as_deref(),
            self.has_bom,
            self.config.fallback_encoding,
        );
        tracing::debug!(?version, encoding = encoding.name(), "reading DXF");
        self.reader.set_encoding(encoding);
        self.reader.reset()?;

        let mut document = CadDocument::empty();
        document.version = version;
        let mut deferred = DeferredReferences::new();

        self.read_sections(&mut document, &mut deferred)?;

        document.create_referenced_entries();
        document.ensure_defaults();
        if self.config.resolve_references {
            deferred.resolve_all(&mut document);
        } else {
            document.pending_references = Some(deferred);
        }
        Ok(document)
    }

    fn read_sections(
        &mut self,
        document: &mut CadDocument,
        deferred: &mut DeferredReferences,
    ) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.code != 0 {
                continue;
            }
            if pair.is_marker("EOF") {
                break;
            }
            if !pair.is_marker("SECTION") {
                document.notifications.notify_at(
                    NotificationType::Warning,
                    format!("record {} outside of a section", pair.value_string()),
                    pair.position,
                );
                continue;
            }

            let name = match self.reader.read_pair()? {
                Some(p) if p.code == 2 => p.as_string()?.to_string(),
                Some(p) => {
                    return Err(DxfError::PrematureTerminator {
                        expected: "section name",
                        found: p.value_string(),
                        position: p.position,
                    })
                }
                None => {
                    return Err(DxfError::UnexpectedEof {
                        position: self.reader.position(),
                    })
                }
            };

            tracing::debug!(section = %name, "reading section");
            let result = {
                let mut section = SectionReader::new(self.reader.as_mut(), document, deferred);
                match name.as_str() {
                    "HEADER" => section.read_header(),
                    "CLASSES" => section.read_classes(),
                    "TABLES" => section.read_tables(),
                    "BLOCKS" => section.read_blocks(),
                    "ENTITIES" => section.read_entities(),
                    "OBJECTS" => section.read_objects(),
                    "THUMBNAILIMAGE" => section.read_thumbnail(),
                    _ => {
                        section.document.notifications.notify(
                            NotificationType::NotImplemented,
                            format!("{} section skipped", name),
                        );
                        section.skip_section()
                    }
                }
            };

            if let Err(e) = result {
                if !self.config.failsafe || e.is_cursor_error() {
                    return Err(e);
                }
                document.notifications.notify_at(
                    NotificationType::Error,
                    format!("error reading {} section: {}", name, e),
                    self.reader.position(),
                );
                let at_section_end = matches!(
                    &e,
                    DxfError::PrematureTerminator { found, .. } if found == "ENDSEC" || found == "EOF"
                );
                if !at_section_end {
                    SectionReader::new(self.reader.as_mut(), document, deferred).skip_section()?;
                }
            }
        }
        Ok(())
    }

    /// Pre-scan the HEADER section for $ACADVER and $DWGCODEPAGE.
    ///
    /// The cursor is reset to the start of the file afterwards.
    fn read_version(&mut self) -> Result<(Option<String>, Option<String>)> {
        let mut version = None;
        let mut code_page = None;
        self.scan_header(|name, value| {
            match name {
                "$ACADVER" => version = value.as_string().ok().map(str::to_string),
                "$DWGCODEPAGE" => code_page = value.as_string().ok().map(str::to_string),
                _ => {}
            }
            version.is_some() && code_page.is_some()
        })?;
        self.reader.reset()?;
        Ok((version, code_page))
    }

    /// Call `visit` with each header variable name and its first value until
    /// it returns `true` or the HEADER section ends.
    fn scan_header(&mut self, mut visit: impl FnMut(&str, &DxfCodePair) -> bool) -> Result<()> {
        let mut in_header = false;
        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                if in_header || !pair.is_marker("SECTION") {
                    break;
                }
                match self.reader.read_pair()? {
                    Some(name) if name.code == 2 && name.as_string()? == "HEADER" => {
                        in_header = true;
                        continue;
                    }
                    _ => break,
                }
            }
            if !in_header || pair.code != 9 {
                continue;
            }
            let name = pair.as_string()?.to_uppercase();
            if let Some(value) = self.reader.read_pair()? {
                if value.code == 0 {
                    break;
                }
                if visit(&name, &value) {
                    break;
                }
            }
        }
        Ok(())
    }
}

/// Read a DXF file from disk
pub fn read_dxf<P: AsRef<Path>>(path: P) -> Result<CadDocument> {
    DxfReader::from_file(path)?.read()
}

/// Whether `reader` starts with the binary DXF sentinel.
///
/// The reader's position is restored.
pub fn probe_is_binary<R: Read + Seek>(reader: &mut R) -> Result<bool> {
    let mut buffer = [0u8; SENTINEL_SIGNATURE_LEN];
    let n = read_prefix(reader, &mut buffer)?;
    Ok(n == SENTINEL_SIGNATURE_LEN && buffer[..] == BINARY_SENTINEL[..SENTINEL_SIGNATURE_LEN])
}

/// First value of one header variable, decoding only the HEADER section.
///
/// `name` may be given with or without the leading `$`.
pub fn probe_header_variable<R: Read + Seek + 'static>(
    source: R,
    name: &str,
) -> Result<Option<String>> {
    let wanted = if name.starts_with('$') {
        name.to_uppercase()
    } else {
        format!("${}", name.to_uppercase())
    };
    let mut reader = DxfReader::from_reader(source)?;
    let mut found = None;
    reader.scan_header(|name, value| {
        if name == wanted {
            found = Some(value.value_string());
            true
        } else {
            false
        }
    })?;
    Ok(found)
}

/// Fill `buffer` from the current position, then seek back to it.
fn read_prefix<R: Read + Seek>(reader: &mut R, buffer: &mut [u8]) -> Result<usize> {
    let start = reader.stream_position()?;
    let mut filled = 0;
    while filled < buffer.len() {
        let n = reader.read(&mut buffer[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    reader.seek(SeekFrom::Start(start))?;
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn text(data: &str) -> DxfReader {
        DxfReader::from_reader(Cursor::new(data.as_bytes().to_vec())).unwrap()
    }

    #[test]
    fn test_probe_is_binary_restores_position() {
        let mut data = BINARY_SENTINEL.to_vec();
        data.extend_from_slice(b"\0\0EOF\0");
        let mut cursor = Cursor::new(data);
        assert!(probe_is_binary(&mut cursor).unwrap());
        assert_eq!(cursor.position(), 0);

        let mut cursor = Cursor::new(b"0\nEOF\n".to_vec());
        assert!(!probe_is_binary(&mut cursor).unwrap());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_probe_header_variable() {
        let data = "0\nSECTION\n2\nHEADER\n9\n$ACADVER\n1\nAC1015\n9\n$INSUNITS\n70\n4\n0\nENDSEC\n0\nEOF\n";
        let cursor = Cursor::new(data.as_bytes().to_vec());
        assert_eq!(
            probe_header_variable(cursor, "insunits").unwrap(),
            Some("4".to_string())
        );
        let cursor = Cursor::new(data.as_bytes().to_vec());
        assert_eq!(probe_header_variable(cursor, "$CLAYER").unwrap(), None);
    }

    #[test]
    fn test_empty_input_reads_default_document() {
        let doc = text("").read().unwrap();
        assert!(doc.layers.contains("0"));
        assert!(doc.block_records.contains("*Model_Space"));
    }

    #[test]
    fn test_unsupported_version() {
        let data = "0\nSECTION\n2\nHEADER\n9\n$ACADVER\n1\nAC1009\n0\nENDSEC\n0\nEOF\n";
        match text(data).read() {
            Err(DxfError::UnsupportedVersion(v)) => assert_eq!(v, "AC1009"),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_pre_r12_version_is_rejected() {
        let data = "0\nSECTION\n2\nHEADER\n9\n$ACADVER\n1\nAC1006\n0\nENDSEC\n0\nEOF\n";
        match text(data).read() {
            Err(DxfError::UnsupportedVersion(v)) => assert_eq!(v, "AC1006"),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_section_name() {
        let data = "0\nSECTION\n0\nENDSEC\n0\nEOF\n";
        assert!(matches!(
            text(data).read(),
            Err(DxfError::PrematureTerminator { expected: "section name", .. })
        ));
    }

    #[test]
    fn test_failsafe_skips_broken_section() {
        let data = "0\nSECTION\n2\nENTITIES\n0\nLINE\n8\n0\n1040\n1.0\n0\nENDSEC\n\
                    0\nSECTION\n2\nOBJECTS\n0\nDICTIONARY\n5\nC\n0\nENDSEC\n0\nEOF\n";
        assert!(matches!(
            text(data).read(),
            Err(DxfError::InvalidExtendedDataOrder { code: 1040, .. })
        ));

        let config = DxfReaderConfiguration::default().failsafe(true);
        let doc = text(data).with_configuration(config).read().unwrap();
        assert!(doc.notifications.has_type(NotificationType::Error));
        assert!(doc.root_dictionary.is_some());
    }

    #[test]
    fn test_cursor_errors_abort_in_failsafe_mode() {
        let data = "0\nSECTION\n2\nENTITIES\n0\nLINE\n9999\nx\n0\nENDSEC\n0\nEOF\n";
        let config = DxfReaderConfiguration::default().failsafe(true);
        assert!(matches!(
            text(data).with_configuration(config).read(),
            Err(DxfError::MalformedToken { code: 9999, position: 7, .. })
        ));
    }

    #[test]
    fn test_unknown_section_is_skipped() {
        let data = "999\ncomment\n0\nSECTION\n2\nACDSDATA\n70\n2\n0\nACDSSCHEMA\n0\nENDSEC\n0\nEOF\n";
        let doc = text(data).read().unwrap();
        assert!(doc.notifications.has_type(NotificationType::NotImplemented));
    }
}
