//! Decryption of password-protected OpenDocument (ODF) containers.
//!
//! This crate supports the two encryption schemes found in the wild:
//! - LibreOffice "modern" encryption: AES-256-GCM with Argon2id key
//!   derivation, declared with URI-style manifest names
//! - Apache OpenOffice "legacy" encryption: Blowfish CFB with
//!   PBKDF2-HMAC-SHA1 key derivation, declared with plain manifest names
//!
//! The decrypted output is the plaintext ODF ZIP container (starts with
//! `PK`), ready for any downstream ODF reader. Use [`is_encrypted`] to gate,
//! [`OdfOriginDetector`] to classify a document, and the matching decryptor
//! ([`LibreOfficeDecryptor`] / [`AooDecryptor`]), or [`decrypt_odf`] to let
//! the crate dispatch on the detected origin.

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

mod checksum;
mod cipher;
mod container;
mod decryptor;
mod error;
mod inflate;
mod kdf;
mod manifest;
mod origin;


pub use crate::decryptor::{AooDecryptor, LibreOfficeDecryptor};
pub use crate::error::OdfDecryptError;
pub use crate::manifest::{
    parse_manifest, ChecksumKind, EncryptionAlgorithm, EncryptionManifest, EntryChecksum,
    EntryCryptoParams, KeyDerivation, StartKeyGeneration,
};
pub use crate::origin::{OdfOriginDetector, OpenOfficeOrigin};

use crate::container::{OdfContainer, MANIFEST_PATH};

/// Returns true if the bytes look like an ODF container whose manifest
/// declares at least one encrypted entry.
///
/// Anything unreadable (not a ZIP, no manifest, malformed XML) is reported
/// as not encrypted; this is a gate, not a validator.
pub fn is_encrypted_bytes(bytes: &[u8]) -> bool {
    let Ok(container) = OdfContainer::from_bytes(bytes) else {
        return false;
    };
    let Some(manifest) = container.entry(MANIFEST_PATH) else {
        return false;
    };
    manifest_has_encryption_marker(manifest)
}

/// [`is_encrypted_bytes`] for a document on disk.
pub fn is_encrypted(path: impl AsRef<Path>) -> Result<bool, OdfDecryptError> {
    let bytes = std::fs::read(path)?;
    Ok(is_encrypted_bytes(&bytes))
}

/// Decrypt an in-memory ODF document, detecting the producer and dispatching
/// to the matching strategy. An unencrypted document is returned unchanged.
pub fn decrypt_odf(bytes: &[u8], password: &str) -> Result<Vec<u8>, OdfDecryptError> {
    let container = OdfContainer::from_bytes(bytes)?;
    let manifest_bytes = container.entry(MANIFEST_PATH).ok_or_else(|| {
        OdfDecryptError::InvalidOdfFile("container has no META-INF/manifest.xml".into())
    })?;
    if parse_manifest(manifest_bytes)?.is_empty() {
        return Ok(bytes.to_vec());
    }
    let detected = OdfOriginDetector::new().detect(manifest_bytes)?;
    crate::decryptor::decrypt_with_origin(bytes, password, detected)
}

fn manifest_has_encryption_marker(manifest: &[u8]) -> bool {
    let mut reader = Reader::from_reader(manifest);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name = e.name();
                let raw = name.as_ref();
                let local = raw
                    .iter()
                    .rposition(|b| *b == b':')
                    .map(|idx| &raw[idx + 1..])
                    .unwrap_or(raw);
                if local == b"encryption-data" {
                    return true;
                }
            }
            Ok(Event::Eof) | Err(_) => return false,
            _ => {}
        }
        buf.clear();
    }
}
