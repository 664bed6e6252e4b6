//! Manifest parser coverage across the two producer dialects and their
//! failure modes.

use odf_decrypt::{
    parse_manifest, ChecksumKind, EncryptionAlgorithm, KeyDerivation, OdfDecryptError,
    StartKeyGeneration,
};

const SALT_B64: &str = "AAECAwQFBgcICQoLDA0ODw=="; // 16 bytes
const IV8_B64: &str = "QUFBQUFBQUE="; // 8 bytes
const IV12_B64: &str = "AAAAAAAAAAAAAAAA"; // 12 bytes
const SHA1_B64: &str = "KioqKioqKioqKioqKioqKioqKio="; // 20 bytes

fn wrap(entries: &str) -> Vec<u8> {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <manifest:manifest xmlns:manifest=\"urn:oasis:names:tc:opendocument:xmlns:manifest:1.0\" \
         xmlns:loext=\"urn:org:documentfoundation:names:experimental:office:xmlns:loext:1.0\">\n\
         {entries}</manifest:manifest>"
    )
    .into_bytes()
}

fn legacy_entry() -> String {
    format!(
        "<manifest:file-entry manifest:full-path=\"content.xml\" manifest:size=\"512\">\
         <manifest:encryption-data manifest:checksum-type=\"SHA1/1K\" manifest:checksum=\"{SHA1_B64}\">\
         <manifest:algorithm manifest:algorithm-name=\"Blowfish CFB\" manifest:initialisation-vector=\"{IV8_B64}\"/>\
         <manifest:key-derivation manifest:key-derivation-name=\"PBKDF2\" manifest:salt=\"{SALT_B64}\" manifest:iteration-count=\"1024\"/>\
         <manifest:start-key-generation manifest:start-key-generation-name=\"SHA1\" manifest:key-size=\"20\"/>\
         </manifest:encryption-data></manifest:file-entry>\n"
    )
}

fn modern_entry() -> String {
    format!(
        "<manifest:file-entry manifest:full-path=\"content.xml\" manifest:size=\"2048\">\
         <manifest:encryption-data>\
         <manifest:algorithm manifest:algorithm-name=\"http://www.w3.org/2009/xmlenc11#aes256-gcm\" manifest:initialisation-vector=\"{IV12_B64}\"/>\
         <manifest:key-derivation manifest:key-derivation-name=\"urn:org:documentfoundation:names:experimental:office:manifest:argon2id\" manifest:salt=\"{SALT_B64}\" loext:argon2-iteration-count=\"3\" loext:argon2-memory=\"65536\" loext:argon2-lanes=\"4\"/>\
         <manifest:start-key-generation manifest:start-key-generation-name=\"http://www.w3.org/2001/04/xmlenc#sha256\" manifest:key-size=\"32\"/>\
         </manifest:encryption-data></manifest:file-entry>\n"
    )
}

#[test]
fn legacy_dialect_parses() {
    let manifest = parse_manifest(&wrap(&legacy_entry())).expect("parse");
    assert_eq!(manifest.len(), 1);

    let params = manifest.get("content.xml").expect("entry");
    assert_eq!(params.algorithm, EncryptionAlgorithm::BlowfishCfb);
    assert_eq!(params.iv.len(), 8);
    assert_eq!(params.start_key, StartKeyGeneration::Sha1);
    assert!(params.compressed);
    assert_eq!(params.uncompressed_size, Some(512));

    match &params.key_derivation {
        KeyDerivation::Pbkdf2 {
            salt,
            iterations,
            key_len,
        } => {
            assert_eq!(salt.len(), 16);
            assert_eq!(*iterations, 1024);
            // key-size was omitted: the schema default applies.
            assert_eq!(*key_len, 16);
        }
        other => panic!("expected PBKDF2 derivation, got {other:?}"),
    }

    let checksum = params.checksum.as_ref().expect("checksum");
    assert_eq!(checksum.kind, ChecksumKind::Sha1First1k);
    assert_eq!(checksum.value.len(), 20);
}

#[test]
fn modern_dialect_parses() {
    let manifest = parse_manifest(&wrap(&modern_entry())).expect("parse");
    let params = manifest.get("content.xml").expect("entry");

    assert_eq!(params.algorithm, EncryptionAlgorithm::Aes256Gcm);
    assert_eq!(params.iv.len(), 12);
    assert_eq!(params.start_key, StartKeyGeneration::Sha256);
    assert!(params.checksum.is_none());

    match &params.key_derivation {
        KeyDerivation::Argon2id {
            salt,
            iterations,
            memory_kib,
            lanes,
            key_len,
        } => {
            assert_eq!(salt.len(), 16);
            assert_eq!(*iterations, 3);
            assert_eq!(*memory_kib, 65536);
            assert_eq!(*lanes, 4);
            assert_eq!(*key_len, 32);
        }
        other => panic!("expected Argon2id derivation, got {other:?}"),
    }
}

#[test]
fn entries_without_encryption_data_are_not_recorded() {
    let manifest = parse_manifest(&wrap(
        "<manifest:file-entry manifest:full-path=\"content.xml\" manifest:media-type=\"text/xml\"/>\n\
         <manifest:file-entry manifest:full-path=\"styles.xml\" manifest:media-type=\"text/xml\"></manifest:file-entry>\n",
    ))
    .expect("parse");
    assert!(manifest.is_empty());
}

#[test]
fn missing_salt_is_a_manifest_error() {
    let entry = legacy_entry().replace(&format!(" manifest:salt=\"{SALT_B64}\""), "");
    let err = parse_manifest(&wrap(&entry)).expect_err("missing salt");
    assert!(
        matches!(err, OdfDecryptError::ManifestParse(_)),
        "expected ManifestParse, got {err:?}"
    );
}

#[test]
fn missing_iteration_count_is_a_manifest_error() {
    let entry = legacy_entry().replace(" manifest:iteration-count=\"1024\"", "");
    let err = parse_manifest(&wrap(&entry)).expect_err("missing iteration-count");
    assert!(matches!(err, OdfDecryptError::ManifestParse(_)));
}

#[test]
fn zero_iteration_count_is_a_manifest_error() {
    let entry = legacy_entry().replace(
        " manifest:iteration-count=\"1024\"",
        " manifest:iteration-count=\"0\"",
    );
    let err = parse_manifest(&wrap(&entry)).expect_err("zero iterations");
    assert!(matches!(err, OdfDecryptError::ManifestParse(_)));
}

#[test]
fn missing_argon2_memory_is_a_manifest_error() {
    let entry = modern_entry().replace(" loext:argon2-memory=\"65536\"", "");
    let err = parse_manifest(&wrap(&entry)).expect_err("missing argon2-memory");
    assert!(matches!(err, OdfDecryptError::ManifestParse(_)));
}

#[test]
fn aes_cbc_is_unsupported_not_a_parse_error() {
    let entry = modern_entry().replace(
        "http://www.w3.org/2009/xmlenc11#aes256-gcm",
        "http://www.w3.org/2001/04/xmlenc#aes256-cbc",
    );
    let err = parse_manifest(&wrap(&entry)).expect_err("aes-cbc");
    assert!(
        matches!(err, OdfDecryptError::UnsupportedEncryption(_)),
        "expected UnsupportedEncryption, got {err:?}"
    );
}

#[test]
fn unknown_key_derivation_is_unsupported() {
    let entry = legacy_entry().replace(
        "manifest:key-derivation-name=\"PBKDF2\"",
        "manifest:key-derivation-name=\"scrypt\"",
    );
    let err = parse_manifest(&wrap(&entry)).expect_err("scrypt");
    assert!(matches!(err, OdfDecryptError::UnsupportedEncryption(_)));
}

#[test]
fn unknown_checksum_type_is_unsupported() {
    let entry = legacy_entry().replace(
        "manifest:checksum-type=\"SHA1/1K\"",
        "manifest:checksum-type=\"MD5/1K\"",
    );
    let err = parse_manifest(&wrap(&entry)).expect_err("md5 checksum");
    assert!(matches!(err, OdfDecryptError::UnsupportedEncryption(_)));
}

#[test]
fn wrong_iv_length_is_a_manifest_error() {
    // An 8-byte IV on an AES-256-GCM entry violates the algorithm's nonce
    // size; this is structural, never a password problem.
    let entry = modern_entry().replace(IV12_B64, IV8_B64);
    let err = parse_manifest(&wrap(&entry)).expect_err("short iv");
    assert!(matches!(err, OdfDecryptError::ManifestParse(_)));
}

#[test]
fn checksum_without_type_is_a_manifest_error() {
    let entry = legacy_entry().replace(" manifest:checksum-type=\"SHA1/1K\"", "");
    let err = parse_manifest(&wrap(&entry)).expect_err("orphan checksum");
    assert!(matches!(err, OdfDecryptError::ManifestParse(_)));
}

#[test]
fn blowfish_without_checksum_is_a_manifest_error() {
    // Without a checksum the unauthenticated cipher has no verification
    // signal at all.
    let entry = legacy_entry().replace(
        &format!(
            " manifest:checksum-type=\"SHA1/1K\" manifest:checksum=\"{SHA1_B64}\""
        ),
        "",
    );
    let err = parse_manifest(&wrap(&entry)).expect_err("no checksum");
    assert!(matches!(err, OdfDecryptError::ManifestParse(_)));
}

#[test]
fn truncated_checksum_is_a_manifest_error() {
    let entry = legacy_entry().replace(SHA1_B64, "AQIDBA==");
    let err = parse_manifest(&wrap(&entry)).expect_err("short checksum");
    assert!(matches!(err, OdfDecryptError::ManifestParse(_)));
}

#[test]
fn invalid_base64_is_a_manifest_error() {
    let entry = legacy_entry().replace(SALT_B64, "!!!not-base64!!!");
    let err = parse_manifest(&wrap(&entry)).expect_err("bad base64");
    assert!(matches!(err, OdfDecryptError::ManifestParse(_)));
}

#[test]
fn unsupported_entry_fails_even_when_others_are_fine() {
    let bad = modern_entry()
        .replace("content.xml", "Pictures/image.bin")
        .replace(
            "http://www.w3.org/2009/xmlenc11#aes256-gcm",
            "http://www.w3.org/2001/04/xmlenc#tripledes-cbc",
        );
    let both = format!("{}{}", modern_entry(), bad);
    let err = parse_manifest(&wrap(&both)).expect_err("one bad entry");
    assert!(matches!(err, OdfDecryptError::UnsupportedEncryption(_)));
}
