//! ODF container plumbing.
//!
//! An ODF document is a ZIP archive. Encrypted parts are STORED (their
//! payload is already compressed before encryption, so ZIP-level compression
//! would be wasted), and consumers expect `mimetype` to be the first entry
//! and uncompressed. The container type here buffers every entry in archive
//! order so the decryption loop can replace payloads in place and the
//! rebuild can preserve ordering.

use std::io::{Cursor, Read, Write};

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::OdfDecryptError;

pub(crate) const MANIFEST_PATH: &str = "META-INF/manifest.xml";
pub(crate) const MIMETYPE_PATH: &str = "mimetype";

#[derive(Debug, Clone)]
pub(crate) struct ContainerEntry {
    pub(crate) name: String,
    pub(crate) data: Vec<u8>,
    pub(crate) is_dir: bool,
}

/// In-memory image of a ZIP/ODF container, entries in archive order.
#[derive(Debug, Clone)]
pub(crate) struct OdfContainer {
    entries: Vec<ContainerEntry>,
}

impl OdfContainer {
    pub(crate) fn from_bytes(bytes: &[u8]) -> Result<Self, OdfDecryptError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            OdfDecryptError::InvalidOdfFile(format!("not a readable ZIP container: {e}"))
        })?;

        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            let name = file.name().to_string();
            let is_dir = file.is_dir();
            let mut data = Vec::with_capacity(file.size() as usize);
            if !is_dir {
                file.read_to_end(&mut data)?;
            }
            entries.push(ContainerEntry { name, data, is_dir });
        }

        Ok(OdfContainer { entries })
    }

    pub(crate) fn entry(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| !e.is_dir && e.name == name)
            .map(|e| e.data.as_slice())
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| !e.is_dir && e.name == name)
    }

    pub(crate) fn replace(&mut self, name: &str, data: Vec<u8>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| !e.is_dir && e.name == name) {
            entry.data = data;
        }
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = &ContainerEntry> {
        self.entries.iter()
    }

    /// Serialize back into ZIP bytes. `mimetype` goes first and STORED;
    /// everything else is DEFLATE-compressed.
    pub(crate) fn to_bytes(&self) -> Result<Vec<u8>, OdfDecryptError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let deflated =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        if let Some(mimetype) = self
            .entries
            .iter()
            .find(|e| !e.is_dir && e.name == MIMETYPE_PATH)
        {
            writer.start_file(mimetype.name.clone(), stored)?;
            writer.write_all(&mimetype.data)?;
        }

        for entry in &self.entries {
            if entry.name == MIMETYPE_PATH {
                continue;
            }
            if entry.is_dir {
                writer.add_directory(entry.name.clone(), SimpleFileOptions::default())?;
            } else {
                writer.start_file(entry.name.clone(), deflated)?;
                writer.write_all(&entry.data)?;
            }
        }

        Ok(writer.finish()?.into_inner())
    }
}

/// Rewrite manifest bytes with every `encryption-data` subtree removed, so a
/// decrypted container no longer advertises encryption parameters for
/// entries that are now plaintext.
pub(crate) fn scrub_manifest(manifest: &[u8]) -> Result<Vec<u8>, OdfDecryptError> {
    let mut reader = Reader::from_reader(manifest);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut buf = Vec::new();
    let mut skip_depth = 0usize;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            OdfDecryptError::ManifestParse(format!("manifest XML parse error: {e}"))
        })?;

        match event {
            Event::Eof => break,
            Event::Start(ref e) => {
                if skip_depth > 0 || is_encryption_data(e.name().as_ref()) {
                    skip_depth += 1;
                } else {
                    writer.write_event(event).map_err(write_err)?;
                }
            }
            Event::Empty(ref e) => {
                if skip_depth == 0 && !is_encryption_data(e.name().as_ref()) {
                    writer.write_event(event).map_err(write_err)?;
                }
            }
            Event::End(_) => {
                if skip_depth > 0 {
                    skip_depth -= 1;
                } else {
                    writer.write_event(event).map_err(write_err)?;
                }
            }
            other => {
                if skip_depth == 0 {
                    writer.write_event(other).map_err(write_err)?;
                }
            }
        }

        buf.clear();
    }

    Ok(writer.into_inner().into_inner())
}

fn write_err(e: impl std::fmt::Display) -> OdfDecryptError {
    OdfDecryptError::ManifestParse(format!("manifest rewrite error: {e}"))
}

fn is_encryption_data(name: &[u8]) -> bool {
    let local = name
        .iter()
        .rposition(|b| *b == b':')
        .map(|idx| &name[idx + 1..])
        .unwrap_or(name);
    local == b"encryption-data"
}
