//! Encryption-manifest model and parser.
//!
//! An ODF container lists its parts in `META-INF/manifest.xml`. Encrypted
//! parts carry an `encryption-data` child holding the cipher parameters:
//!
//! ```xml
//! <manifest:file-entry manifest:full-path="content.xml" manifest:size="1234">
//!   <manifest:encryption-data manifest:checksum-type="SHA1/1K" manifest:checksum="...">
//!     <manifest:algorithm manifest:algorithm-name="Blowfish CFB"
//!         manifest:initialisation-vector="..."/>
//!     <manifest:key-derivation manifest:key-derivation-name="PBKDF2"
//!         manifest:salt="..." manifest:iteration-count="1024"/>
//!     <manifest:start-key-generation manifest:start-key-generation-name="SHA1"/>
//!   </manifest:encryption-data>
//! </manifest:file-entry>
//! ```
//!
//! Two naming dialects are in circulation: Apache OpenOffice writes plain
//! names (`Blowfish CFB`, `PBKDF2`, `SHA1/1K`) while LibreOffice writes URIs
//! (`http://www.w3.org/2009/xmlenc11#aes256-gcm`) and, for Argon2id, cost
//! parameters in `loext:`-prefixed attributes. The parser matches elements
//! and attributes by XML local name and accepts both dialects; it performs no
//! cryptographic computation.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::OdfDecryptError;

/// Key length required by AES-256-GCM.
pub const AES256_GCM_KEY_LEN: usize = 32;
/// Nonce length used by the AES-256-GCM dialect.
pub const AES256_GCM_IV_LEN: usize = 12;
/// Blowfish CFB block / IV length.
pub const BLOWFISH_IV_LEN: usize = 8;
/// Legacy `key-derivation` key size when the manifest omits `key-size`
/// (ODF schema default).
pub const DEFAULT_LEGACY_KEY_LEN: usize = 16;

/// Symmetric cipher declared for one encrypted entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionAlgorithm {
    /// Modern scheme: AES-256 in GCM mode, authentication tag appended to the
    /// ciphertext.
    Aes256Gcm,
    /// Legacy scheme: Blowfish in 8-bit CFB mode, unauthenticated.
    BlowfishCfb,
}

impl EncryptionAlgorithm {
    fn parse_manifest_name(name: &str) -> Result<Self, OdfDecryptError> {
        let lower = name.trim().to_ascii_lowercase();
        if lower == "blowfish cfb" || lower.ends_with("#blowfish") {
            return Ok(EncryptionAlgorithm::BlowfishCfb);
        }
        if lower == "aes-256-gcm" || lower == "aes256-gcm" || lower.ends_with("#aes256-gcm") {
            return Ok(EncryptionAlgorithm::Aes256Gcm);
        }
        Err(OdfDecryptError::UnsupportedEncryption(format!(
            "algorithm {name:?}"
        )))
    }

    /// Initialisation-vector length the algorithm requires; a manifest
    /// declaring any other length is structurally invalid.
    pub fn iv_len(self) -> usize {
        match self {
            EncryptionAlgorithm::Aes256Gcm => AES256_GCM_IV_LEN,
            EncryptionAlgorithm::BlowfishCfb => BLOWFISH_IV_LEN,
        }
    }
}

/// Hash applied to the UTF-8 password bytes before key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartKeyGeneration {
    Sha1,
    Sha256,
}

impl StartKeyGeneration {
    fn parse_manifest_name(name: &str) -> Result<Self, OdfDecryptError> {
        let lower = name.trim().to_ascii_lowercase();
        match lower.as_str() {
            "sha1" | "sha-1" => Ok(StartKeyGeneration::Sha1),
            "sha256" | "sha-256" => Ok(StartKeyGeneration::Sha256),
            _ if lower.ends_with("#sha1") => Ok(StartKeyGeneration::Sha1),
            _ if lower.ends_with("#sha256") => Ok(StartKeyGeneration::Sha256),
            _ => Err(OdfDecryptError::UnsupportedEncryption(format!(
                "start-key generation {name:?}"
            ))),
        }
    }

    pub fn digest_len(self) -> usize {
        match self {
            StartKeyGeneration::Sha1 => 20,
            StartKeyGeneration::Sha256 => 32,
        }
    }
}

/// Digest declared in `checksum-type`. The `…1k` kinds hash only the first
/// 1024 bytes of the decrypted (still-compressed) entry data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumKind {
    Sha1,
    Sha1First1k,
    Sha256,
    Sha256First1k,
}

impl ChecksumKind {
    fn parse_manifest_name(name: &str) -> Result<Self, OdfDecryptError> {
        let lower = name.trim().to_ascii_lowercase();
        match lower.as_str() {
            "sha1/1k" => Ok(ChecksumKind::Sha1First1k),
            "sha1" | "sha-1" => Ok(ChecksumKind::Sha1),
            "sha256/1k" => Ok(ChecksumKind::Sha256First1k),
            "sha256" | "sha-256" => Ok(ChecksumKind::Sha256),
            _ if lower.ends_with("#sha1-1k") => Ok(ChecksumKind::Sha1First1k),
            _ if lower.ends_with("#sha1") => Ok(ChecksumKind::Sha1),
            _ if lower.ends_with("#sha256-1k") => Ok(ChecksumKind::Sha256First1k),
            _ if lower.ends_with("#sha256") => Ok(ChecksumKind::Sha256),
            _ => Err(OdfDecryptError::UnsupportedEncryption(format!(
                "checksum type {name:?}"
            ))),
        }
    }

    pub fn digest_len(self) -> usize {
        match self {
            ChecksumKind::Sha1 | ChecksumKind::Sha1First1k => 20,
            ChecksumKind::Sha256 | ChecksumKind::Sha256First1k => 32,
        }
    }
}

/// Declared integrity digest for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryChecksum {
    pub kind: ChecksumKind,
    pub value: Vec<u8>,
}

/// Password-to-key derivation declared for one entry.
///
/// All parameters come from the manifest; the Argon2id variant has no
/// defaults, the PBKDF2 variant only the schema-default key length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyDerivation {
    Argon2id {
        salt: Vec<u8>,
        iterations: u32,
        memory_kib: u32,
        lanes: u32,
        key_len: usize,
    },
    Pbkdf2 {
        salt: Vec<u8>,
        iterations: u32,
        key_len: usize,
    },
}

impl KeyDerivation {
    pub fn key_len(&self) -> usize {
        match self {
            KeyDerivation::Argon2id { key_len, .. } => *key_len,
            KeyDerivation::Pbkdf2 { key_len, .. } => *key_len,
        }
    }
}

/// Everything the pipeline needs to decrypt one container entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCryptoParams {
    pub algorithm: EncryptionAlgorithm,
    pub iv: Vec<u8>,
    pub key_derivation: KeyDerivation,
    pub start_key: StartKeyGeneration,
    /// Declared digest; required for the legacy scheme, normally absent for
    /// AES-256-GCM where the authentication tag is the verification
    /// authority.
    pub checksum: Option<EntryChecksum>,
    /// Whether the plaintext was DEFLATE-compressed before encryption. The
    /// dialects in scope signal this by declaring the plain size.
    pub compressed: bool,
    /// Plaintext size declared via `manifest:size`.
    pub uncompressed_size: Option<u64>,
}

/// Ordered mapping from entry path to its crypto parameters, one per
/// container. Constructed once per decrypt call and used read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncryptionManifest {
    entries: Vec<(String, EntryCryptoParams)>,
}

impl EncryptionManifest {
    pub fn get(&self, path: &str) -> Option<&EntryCryptoParams> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, params)| params)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntryCryptoParams)> {
        self.entries.iter().map(|(p, params)| (p.as_str(), params))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }
}

#[derive(Debug, Default)]
struct PendingEncryption {
    checksum_type: Option<String>,
    checksum: Option<Vec<u8>>,
    algorithm_name: Option<String>,
    iv: Option<Vec<u8>>,
    kdf_name: Option<String>,
    salt: Option<Vec<u8>>,
    iteration_count: Option<u32>,
    key_size: Option<usize>,
    argon2_iterations: Option<u32>,
    argon2_memory: Option<u32>,
    argon2_lanes: Option<u32>,
    start_key_name: Option<String>,
    start_key_size: Option<usize>,
}

#[derive(Debug, Default)]
struct PendingEntry {
    full_path: Option<String>,
    size: Option<u64>,
    enc: Option<PendingEncryption>,
}

fn mp(msg: impl Into<String>) -> OdfDecryptError {
    OdfDecryptError::ManifestParse(msg.into())
}

fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|b| *b == b':')
        .map(|idx| &name[idx + 1..])
        .unwrap_or(name)
}

fn attr_text(attr: &Attribute<'_>) -> Result<String, OdfDecryptError> {
    attr.unescape_value()
        .map(|v| v.into_owned())
        .map_err(|_| mp("invalid attribute value"))
}

/// Decode a base64 attribute value. Some producers pretty-print the manifest
/// and wrap long values, and some omit `=` padding; be permissive about both.
fn decode_base64_attr(value: &str) -> Result<Vec<u8>, OdfDecryptError> {
    let cleaned: Vec<u8> = value
        .bytes()
        .filter(|b| !matches!(b, b'\r' | b'\n' | b'\t' | b' '))
        .collect();
    STANDARD
        .decode(&cleaned)
        .or_else(|_| STANDARD_NO_PAD.decode(&cleaned))
        .map_err(|_| mp("invalid base64 attribute value"))
}

fn parse_u32_attr(value: &str, what: &str) -> Result<u32, OdfDecryptError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| mp(format!("invalid {what} value {value:?}")))
}

fn parse_u64_attr(value: &str, what: &str) -> Result<u64, OdfDecryptError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| mp(format!("invalid {what} value {value:?}")))
}

fn parse_usize_attr(value: &str, what: &str) -> Result<usize, OdfDecryptError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| mp(format!("invalid {what} value {value:?}")))
}

/// Parse the raw bytes of `META-INF/manifest.xml` into an
/// [`EncryptionManifest`].
///
/// Entries without `encryption-data` are not recorded; a container whose
/// manifest yields an empty result simply has nothing to decrypt.
pub fn parse_manifest(bytes: &[u8]) -> Result<EncryptionManifest, OdfDecryptError> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut entries: Vec<(String, EntryCryptoParams)> = Vec::new();
    let mut current: Option<PendingEntry> = None;
    let mut saw_root = false;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| mp(format!("manifest XML parse error: {e}")))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let name = e.name();
                let local = local_name(name.as_ref());

                if !saw_root {
                    if local != b"manifest" {
                        return Err(mp("root element is not an ODF manifest"));
                    }
                    saw_root = true;
                } else {
                    match local {
                        b"file-entry" => {
                            let mut pending = PendingEntry::default();
                            parse_file_entry_attrs(e, &mut pending)?;
                            // An empty element has no children and therefore
                            // no encryption-data.
                            if !is_empty {
                                current = Some(pending);
                            }
                        }
                        b"encryption-data" => {
                            if let Some(entry) = current.as_mut() {
                                let mut enc = PendingEncryption::default();
                                parse_encryption_data_attrs(e, &mut enc)?;
                                entry.enc = Some(enc);
                            }
                        }
                        b"algorithm" => {
                            if let Some(enc) = current.as_mut().and_then(|c| c.enc.as_mut()) {
                                parse_algorithm_attrs(e, enc)?;
                            }
                        }
                        b"key-derivation" => {
                            if let Some(enc) = current.as_mut().and_then(|c| c.enc.as_mut()) {
                                parse_key_derivation_attrs(e, enc)?;
                            }
                        }
                        b"start-key-generation" => {
                            if let Some(enc) = current.as_mut().and_then(|c| c.enc.as_mut()) {
                                parse_start_key_attrs(e, enc)?;
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::End(ref e) => {
                if local_name(e.name().as_ref()) == b"file-entry" {
                    if let Some(pending) = current.take() {
                        if let Some(record) = finish_entry(pending)? {
                            entries.push(record);
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    if !saw_root {
        return Err(mp("manifest document has no root element"));
    }

    Ok(EncryptionManifest { entries })
}

fn each_attr(
    e: &BytesStart<'_>,
    mut f: impl FnMut(&[u8], &Attribute<'_>) -> Result<(), OdfDecryptError>,
) -> Result<(), OdfDecryptError> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|_| mp("invalid XML attribute"))?;
        let key = attr.key;
        let local = local_name(key.as_ref()).to_vec();
        f(&local, &attr)?;
    }
    Ok(())
}

fn parse_file_entry_attrs(
    e: &BytesStart<'_>,
    pending: &mut PendingEntry,
) -> Result<(), OdfDecryptError> {
    each_attr(e, |local, attr| {
        match local {
            b"full-path" => pending.full_path = Some(attr_text(attr)?),
            b"size" => pending.size = Some(parse_u64_attr(&attr_text(attr)?, "size")?),
            _ => {}
        }
        Ok(())
    })
}

fn parse_encryption_data_attrs(
    e: &BytesStart<'_>,
    enc: &mut PendingEncryption,
) -> Result<(), OdfDecryptError> {
    each_attr(e, |local, attr| {
        match local {
            b"checksum-type" => enc.checksum_type = Some(attr_text(attr)?),
            b"checksum" => enc.checksum = Some(decode_base64_attr(&attr_text(attr)?)?),
            _ => {}
        }
        Ok(())
    })
}

fn parse_algorithm_attrs(
    e: &BytesStart<'_>,
    enc: &mut PendingEncryption,
) -> Result<(), OdfDecryptError> {
    each_attr(e, |local, attr| {
        match local {
            b"algorithm-name" => enc.algorithm_name = Some(attr_text(attr)?),
            // ODF uses the British spelling; tolerate both.
            b"initialisation-vector" | b"initialization-vector" => {
                enc.iv = Some(decode_base64_attr(&attr_text(attr)?)?)
            }
            _ => {}
        }
        Ok(())
    })
}

fn parse_key_derivation_attrs(
    e: &BytesStart<'_>,
    enc: &mut PendingEncryption,
) -> Result<(), OdfDecryptError> {
    each_attr(e, |local, attr| {
        match local {
            b"key-derivation-name" => enc.kdf_name = Some(attr_text(attr)?),
            b"salt" => enc.salt = Some(decode_base64_attr(&attr_text(attr)?)?),
            b"iteration-count" => {
                enc.iteration_count =
                    Some(parse_u32_attr(&attr_text(attr)?, "iteration-count")?)
            }
            b"key-size" => {
                enc.key_size = Some(parse_usize_attr(&attr_text(attr)?, "key-size")?)
            }
            b"argon2-iteration-count" => {
                enc.argon2_iterations =
                    Some(parse_u32_attr(&attr_text(attr)?, "argon2-iteration-count")?)
            }
            b"argon2-memory" => {
                enc.argon2_memory = Some(parse_u32_attr(&attr_text(attr)?, "argon2-memory")?)
            }
            b"argon2-lanes" => {
                enc.argon2_lanes = Some(parse_u32_attr(&attr_text(attr)?, "argon2-lanes")?)
            }
            _ => {}
        }
        Ok(())
    })
}

fn parse_start_key_attrs(
    e: &BytesStart<'_>,
    enc: &mut PendingEncryption,
) -> Result<(), OdfDecryptError> {
    each_attr(e, |local, attr| {
        match local {
            b"start-key-generation-name" => enc.start_key_name = Some(attr_text(attr)?),
            b"key-size" => {
                enc.start_key_size = Some(parse_usize_attr(&attr_text(attr)?, "key-size")?)
            }
            _ => {}
        }
        Ok(())
    })
}

fn finish_entry(
    pending: PendingEntry,
) -> Result<Option<(String, EntryCryptoParams)>, OdfDecryptError> {
    let Some(enc) = pending.enc else {
        return Ok(None);
    };
    let path = pending
        .full_path
        .ok_or_else(|| mp("encrypted file entry is missing full-path"))?;

    let algorithm_name = enc
        .algorithm_name
        .as_deref()
        .ok_or_else(|| mp(format!("entry {path:?}: missing algorithm-name")))?;
    let algorithm = EncryptionAlgorithm::parse_manifest_name(algorithm_name)?;

    let iv = enc
        .iv
        .clone()
        .ok_or_else(|| mp(format!("entry {path:?}: missing initialisation-vector")))?;
    if iv.len() != algorithm.iv_len() {
        return Err(mp(format!(
            "entry {path:?}: initialisation-vector must be {} bytes, got {}",
            algorithm.iv_len(),
            iv.len()
        )));
    }

    let kdf_name = enc
        .kdf_name
        .as_deref()
        .ok_or_else(|| mp(format!("entry {path:?}: missing key-derivation-name")))?;
    let key_derivation = build_key_derivation(&path, kdf_name, &enc, algorithm)?;

    match algorithm {
        EncryptionAlgorithm::Aes256Gcm if key_derivation.key_len() != AES256_GCM_KEY_LEN => {
            return Err(mp(format!(
                "entry {path:?}: AES-256-GCM requires a {AES256_GCM_KEY_LEN}-byte key, got {}",
                key_derivation.key_len()
            )));
        }
        EncryptionAlgorithm::BlowfishCfb if !(4..=56).contains(&key_derivation.key_len()) => {
            return Err(mp(format!(
                "entry {path:?}: Blowfish key length {} out of range",
                key_derivation.key_len()
            )));
        }
        _ => {}
    }

    let start_key = match enc.start_key_name.as_deref() {
        Some(name) => StartKeyGeneration::parse_manifest_name(name)?,
        // Element absent: the legacy schema default.
        None => StartKeyGeneration::Sha1,
    };
    if let Some(declared) = enc.start_key_size {
        if declared != start_key.digest_len() {
            return Err(mp(format!(
                "entry {path:?}: start-key key-size {declared} does not match the generation hash"
            )));
        }
    }

    let checksum = match (enc.checksum_type, enc.checksum) {
        (Some(kind_name), Some(value)) => {
            let kind = ChecksumKind::parse_manifest_name(&kind_name)?;
            if value.len() != kind.digest_len() {
                return Err(mp(format!(
                    "entry {path:?}: checksum must be {} bytes, got {}",
                    kind.digest_len(),
                    value.len()
                )));
            }
            Some(EntryChecksum { kind, value })
        }
        (None, None) => None,
        _ => {
            return Err(mp(format!(
                "entry {path:?}: checksum and checksum-type must appear together"
            )));
        }
    };

    // The unauthenticated cipher has no other verification signal.
    if algorithm == EncryptionAlgorithm::BlowfishCfb && checksum.is_none() {
        return Err(mp(format!(
            "entry {path:?}: missing checksum for Blowfish CFB entry"
        )));
    }

    Ok(Some((
        path,
        EntryCryptoParams {
            algorithm,
            iv,
            key_derivation,
            start_key,
            checksum,
            compressed: pending.size.is_some(),
            uncompressed_size: pending.size,
        },
    )))
}

fn build_key_derivation(
    path: &str,
    kdf_name: &str,
    enc: &PendingEncryption,
    algorithm: EncryptionAlgorithm,
) -> Result<KeyDerivation, OdfDecryptError> {
    let lower = kdf_name.trim().to_ascii_lowercase();
    let salt = enc
        .salt
        .clone()
        .ok_or_else(|| mp(format!("entry {path:?}: missing key-derivation salt")))?;

    if lower == "pbkdf2" || lower.ends_with("#pbkdf2") {
        let iterations = enc
            .iteration_count
            .ok_or_else(|| mp(format!("entry {path:?}: missing iteration-count")))?;
        if iterations == 0 {
            return Err(mp(format!("entry {path:?}: iteration-count must be positive")));
        }
        return Ok(KeyDerivation::Pbkdf2 {
            salt,
            iterations,
            key_len: enc.key_size.unwrap_or(DEFAULT_LEGACY_KEY_LEN),
        });
    }

    if lower.contains("argon2id") {
        let iterations = enc.argon2_iterations.ok_or_else(|| {
            mp(format!("entry {path:?}: missing argon2-iteration-count"))
        })?;
        let memory_kib = enc
            .argon2_memory
            .ok_or_else(|| mp(format!("entry {path:?}: missing argon2-memory")))?;
        let lanes = enc
            .argon2_lanes
            .ok_or_else(|| mp(format!("entry {path:?}: missing argon2-lanes")))?;
        if iterations == 0 || memory_kib == 0 || lanes == 0 {
            return Err(mp(format!(
                "entry {path:?}: Argon2id cost parameters must be positive"
            )));
        }
        let key_len = enc.key_size.unwrap_or(match algorithm {
            EncryptionAlgorithm::Aes256Gcm => AES256_GCM_KEY_LEN,
            EncryptionAlgorithm::BlowfishCfb => DEFAULT_LEGACY_KEY_LEN,
        });
        return Ok(KeyDerivation::Argon2id {
            salt,
            iterations,
            memory_kib,
            lanes,
            key_len,
        });
    }

    Err(OdfDecryptError::UnsupportedEncryption(format!(
        "key derivation {kdf_name:?}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_base64_attr_padded() {
        assert_eq!(decode_base64_attr("AQIDBA==").expect("decode"), vec![1, 2, 3, 4]);
    }

    #[test]
    fn decode_base64_attr_unpadded_with_whitespace() {
        assert_eq!(
            decode_base64_attr("AQ ID\r\nBA\t").expect("decode"),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn algorithm_names_cover_both_dialects() {
        assert_eq!(
            EncryptionAlgorithm::parse_manifest_name("Blowfish CFB").expect("legacy"),
            EncryptionAlgorithm::BlowfishCfb
        );
        assert_eq!(
            EncryptionAlgorithm::parse_manifest_name(
                "urn:oasis:names:tc:opendocument:xmlns:manifest:1.0#blowfish"
            )
            .expect("urn"),
            EncryptionAlgorithm::BlowfishCfb
        );
        assert_eq!(
            EncryptionAlgorithm::parse_manifest_name("http://www.w3.org/2009/xmlenc11#aes256-gcm")
                .expect("uri"),
            EncryptionAlgorithm::Aes256Gcm
        );
    }

    #[test]
    fn aes_cbc_is_recognized_but_unsupported() {
        let err = EncryptionAlgorithm::parse_manifest_name(
            "http://www.w3.org/2001/04/xmlenc#aes256-cbc",
        )
        .expect_err("aes-cbc is not implemented");
        assert!(matches!(err, OdfDecryptError::UnsupportedEncryption(_)));
    }

    #[test]
    fn checksum_kind_names() {
        assert_eq!(
            ChecksumKind::parse_manifest_name("SHA1/1K").expect("parse"),
            ChecksumKind::Sha1First1k
        );
        assert_eq!(
            ChecksumKind::parse_manifest_name(
                "urn:oasis:names:tc:opendocument:xmlns:manifest:1.0#sha256-1k"
            )
            .expect("parse"),
            ChecksumKind::Sha256First1k
        );
        assert!(ChecksumKind::parse_manifest_name("MD5/1K").is_err());
    }

    #[test]
    fn non_manifest_root_is_rejected() {
        let err = parse_manifest(b"<root/>").expect_err("not a manifest");
        assert!(matches!(err, OdfDecryptError::ManifestParse(_)));
    }
}
