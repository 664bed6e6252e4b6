//! Decryption orchestrators, one per producer.
//!
//! Both strategies run the same sequential pipeline (derive key, decrypt,
//! verify, inflate, fold back into the container) with the per-entry
//! parameters carrying every scheme difference. The strategy types pin the
//! expected origin, so calling the wrong one on a document fails with a
//! clear [`OdfDecryptError::InvalidOdfFile`] instead of a misleading
//! password error.
//!
//! Entries are processed strictly in archive order: the first verification
//! outcome decides wrong-password vs. corruption for the rest of the call,
//! so the loop must not be reordered or parallelized.

use std::path::Path;

use crate::checksum::{checksum_matches, PasswordGate};
use crate::cipher::{decrypt_entry, CipherError};
use crate::container::{scrub_manifest, OdfContainer, MANIFEST_PATH};
use crate::error::OdfDecryptError;
use crate::inflate::inflate_entry;
use crate::kdf::derive_entry_key;
use crate::manifest::{parse_manifest, EncryptionAlgorithm, EncryptionManifest, EntryCryptoParams};
use crate::origin::{OdfOriginDetector, OpenOfficeOrigin};

/// Decrypts documents produced by LibreOffice (AES-256-GCM + Argon2id).
#[derive(Debug, Default, Clone, Copy)]
pub struct LibreOfficeDecryptor;

/// Decrypts documents produced by Apache OpenOffice (Blowfish CFB + PBKDF2).
#[derive(Debug, Default, Clone, Copy)]
pub struct AooDecryptor;

impl LibreOfficeDecryptor {
    pub fn new() -> Self {
        LibreOfficeDecryptor
    }

    /// Decrypt the document at `path`, returning the plaintext container
    /// bytes.
    pub fn decrypt(
        &self,
        path: impl AsRef<Path>,
        password: &str,
    ) -> Result<Vec<u8>, OdfDecryptError> {
        let bytes = std::fs::read(path)?;
        self.decrypt_bytes(&bytes, password)
    }

    /// Decrypt an in-memory document.
    pub fn decrypt_bytes(
        &self,
        bytes: &[u8],
        password: &str,
    ) -> Result<Vec<u8>, OdfDecryptError> {
        decrypt_with_origin(bytes, password, OpenOfficeOrigin::LibreOffice)
    }
}

impl AooDecryptor {
    pub fn new() -> Self {
        AooDecryptor
    }

    /// Decrypt the document at `path`, returning the plaintext container
    /// bytes.
    pub fn decrypt(
        &self,
        path: impl AsRef<Path>,
        password: &str,
    ) -> Result<Vec<u8>, OdfDecryptError> {
        let bytes = std::fs::read(path)?;
        self.decrypt_bytes(&bytes, password)
    }

    /// Decrypt an in-memory document.
    pub fn decrypt_bytes(
        &self,
        bytes: &[u8],
        password: &str,
    ) -> Result<Vec<u8>, OdfDecryptError> {
        decrypt_with_origin(bytes, password, OpenOfficeOrigin::ApacheOpenOffice)
    }
}

pub(crate) fn decrypt_with_origin(
    bytes: &[u8],
    password: &str,
    expected: OpenOfficeOrigin,
) -> Result<Vec<u8>, OdfDecryptError> {
    let container = OdfContainer::from_bytes(bytes)?;
    let manifest_bytes = container.entry(MANIFEST_PATH).ok_or_else(|| {
        OdfDecryptError::InvalidOdfFile("container has no META-INF/manifest.xml".into())
    })?;
    let manifest = parse_manifest(manifest_bytes)?;

    // Callers are expected to check `is_encrypted` first, but an unencrypted
    // document is not an error: it passes through untouched.
    if manifest.is_empty() {
        return Ok(bytes.to_vec());
    }

    let detected = OdfOriginDetector::new().detect(manifest_bytes)?;
    if detected != expected {
        return Err(OdfDecryptError::InvalidOdfFile(format!(
            "document was produced by {detected:?}; use {}",
            detected.decryptor_name()
        )));
    }

    for path in manifest.paths() {
        if !container.contains(path) {
            return Err(OdfDecryptError::InvalidOdfFile(format!(
                "manifest lists encrypted entry missing from container: {path:?}"
            )));
        }
    }

    decrypt_container(container, &manifest, password)
}

fn decrypt_container(
    mut container: OdfContainer,
    manifest: &EncryptionManifest,
    password: &str,
) -> Result<Vec<u8>, OdfDecryptError> {
    let mut gate = PasswordGate::new();

    let names: Vec<String> = container
        .entries()
        .filter(|e| !e.is_dir)
        .map(|e| e.name.clone())
        .collect();

    for name in names {
        let Some(params) = manifest.get(&name) else {
            continue;
        };
        let ciphertext = container.entry(&name).ok_or_else(|| {
            OdfDecryptError::InvalidOdfFile(format!("container entry {name:?} vanished"))
        })?;
        let plaintext = decrypt_one(&name, params, ciphertext, password, &mut gate)?;
        container.replace(&name, plaintext);
    }

    let scrubbed = {
        let manifest_bytes = container.entry(MANIFEST_PATH).ok_or_else(|| {
            OdfDecryptError::InvalidOdfFile("container has no META-INF/manifest.xml".into())
        })?;
        scrub_manifest(manifest_bytes)?
    };
    container.replace(MANIFEST_PATH, scrubbed);

    container.to_bytes()
}

fn decrypt_one(
    name: &str,
    params: &EntryCryptoParams,
    ciphertext: &[u8],
    password: &str,
    gate: &mut PasswordGate,
) -> Result<Vec<u8>, OdfDecryptError> {
    // Key material lives exactly as long as this call; `Zeroizing` wipes it
    // on every exit path.
    let key = derive_entry_key(params, password)?;

    let decrypted = match decrypt_entry(params.algorithm, &key, &params.iv, ciphertext) {
        Ok(plaintext) => plaintext,
        Err(CipherError::Authentication) => return Err(gate.mismatch(name)),
        Err(CipherError::Malformed(msg)) => return Err(OdfDecryptError::Decryption(msg)),
    };

    match params.algorithm {
        // The GCM tag already authenticated key and data.
        EncryptionAlgorithm::Aes256Gcm => gate.confirm(),
        EncryptionAlgorithm::BlowfishCfb => {
            let checksum = params.checksum.as_ref().ok_or_else(|| {
                OdfDecryptError::ManifestParse(format!("entry {name:?}: missing checksum"))
            })?;
            if !checksum_matches(checksum, &decrypted) {
                return Err(gate.mismatch(name));
            }
            gate.confirm();
        }
    }

    if params.compressed {
        inflate_entry(name, &decrypted, params.uncompressed_size)
    } else {
        Ok(decrypted)
    }
}
