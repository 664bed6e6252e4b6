//! Producer-origin classification.
//!
//! The two producers write the same manifest structure with incompatible
//! naming conventions, and the convention determines which decryption
//! strategy applies. Classification is purely structural: it keys off the
//! shape of the `encryption-data` markers, never a self-declared generator
//! field, so a hostile or corrupted file cannot talk its way past checksum
//! verification.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::OdfDecryptError;

/// Which application produced an encrypted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOfficeOrigin {
    /// Modern producer: URI-style manifest names, AES-256-GCM + Argon2id.
    LibreOffice,
    /// Legacy producer: plain manifest names, Blowfish CFB + PBKDF2.
    ApacheOpenOffice,
}

impl OpenOfficeOrigin {
    pub(crate) fn decryptor_name(self) -> &'static str {
        match self {
            OpenOfficeOrigin::LibreOffice => "LibreOfficeDecryptor",
            OpenOfficeOrigin::ApacheOpenOffice => "AooDecryptor",
        }
    }
}

/// Classifies a manifest document as [`OpenOfficeOrigin::LibreOffice`] or
/// [`OpenOfficeOrigin::ApacheOpenOffice`].
#[derive(Debug, Default, Clone, Copy)]
pub struct OdfOriginDetector;

#[derive(Debug, Default)]
struct Markers {
    saw_encryption_data: bool,
    uri_names: bool,
    argon2: bool,
    plain_names: bool,
}

impl OdfOriginDetector {
    pub fn new() -> Self {
        OdfOriginDetector
    }

    /// Detect the origin from raw `META-INF/manifest.xml` bytes.
    ///
    /// Pure classification: the input is never mutated and repeated calls
    /// return the same result. Fails with
    /// [`OdfDecryptError::InvalidOdfFile`] when the manifest carries no
    /// encryption markers, or markers matching neither dialect.
    pub fn detect(&self, manifest: &[u8]) -> Result<OpenOfficeOrigin, OdfDecryptError> {
        let markers = scan_markers(manifest)?;

        if !markers.saw_encryption_data {
            return Err(OdfDecryptError::InvalidOdfFile(
                "manifest carries no encryption-data markers".into(),
            ));
        }
        if markers.argon2 || markers.uri_names {
            return Ok(OpenOfficeOrigin::LibreOffice);
        }
        if markers.plain_names {
            return Ok(OpenOfficeOrigin::ApacheOpenOffice);
        }
        Err(OdfDecryptError::InvalidOdfFile(
            "encryption markers match neither known producer dialect".into(),
        ))
    }
}

fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|b| *b == b':')
        .map(|idx| &name[idx + 1..])
        .unwrap_or(name)
}

fn scan_markers(manifest: &[u8]) -> Result<Markers, OdfDecryptError> {
    let mut reader = Reader::from_reader(manifest);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut markers = Markers::default();
    let mut depth_in_encryption_data = 0usize;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            OdfDecryptError::InvalidOdfFile(format!("manifest XML parse error: {e}"))
        })?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let name = e.name();
                let local = local_name(name.as_ref());

                if local == b"encryption-data" {
                    markers.saw_encryption_data = true;
                    if !is_empty {
                        depth_in_encryption_data += 1;
                    }
                    classify_attrs(e, &mut markers)?;
                } else if depth_in_encryption_data > 0 {
                    classify_attrs(e, &mut markers)?;
                    if !is_empty {
                        depth_in_encryption_data += 1;
                    }
                }
            }
            Event::End(_) => {
                depth_in_encryption_data = depth_in_encryption_data.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    Ok(markers)
}

fn classify_attrs(
    e: &quick_xml::events::BytesStart<'_>,
    markers: &mut Markers,
) -> Result<(), OdfDecryptError> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr
            .map_err(|_| OdfDecryptError::InvalidOdfFile("invalid XML attribute".into()))?;
        let key = local_name(attr.key.as_ref());
        let value = attr.value.as_ref();

        match key {
            b"argon2-iteration-count" | b"argon2-memory" | b"argon2-lanes" => {
                markers.argon2 = true;
            }
            b"algorithm-name" | b"checksum-type" | b"start-key-generation-name"
            | b"key-derivation-name" => {
                let lower = String::from_utf8_lossy(value).to_ascii_lowercase();
                if lower.contains("argon2id") {
                    markers.argon2 = true;
                } else if lower.contains('#') {
                    markers.uri_names = true;
                } else if !lower.is_empty() {
                    markers.plain_names = true;
                }
            }
            _ => {}
        }
    }
    Ok(())
}
