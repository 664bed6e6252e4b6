//! Password-based key derivation.
//!
//! Both schemes first hash the UTF-8 password bytes into a fixed-length
//! *start key* (SHA-1 for the legacy producer, SHA-256 for the modern one)
//! and then stretch that digest with the manifest-declared derivation:
//!
//! - Argon2id (modern): `Argon2id(start_key, salt; t, m, p) -> key_len`
//! - PBKDF2 (legacy): `PBKDF2-HMAC-SHA1(start_key, salt, iterations) -> key_len`
//!
//! Derivation is deterministic and the password never leaves this module in
//! any form other than the derived key. Outputs are [`Zeroizing`] so the key
//! material is wiped on every exit path of the caller.

use argon2::{Algorithm, Argon2, Params, Version};
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::{Digest as _, Sha256};
use zeroize::Zeroizing;

use crate::error::OdfDecryptError;
use crate::manifest::{EntryCryptoParams, KeyDerivation, StartKeyGeneration};

/// Hash the password into the scheme's start key.
pub(crate) fn start_key(
    generation: StartKeyGeneration,
    password: &str,
) -> Zeroizing<Vec<u8>> {
    match generation {
        StartKeyGeneration::Sha1 => {
            Zeroizing::new(sha1::Sha1::digest(password.as_bytes()).to_vec())
        }
        StartKeyGeneration::Sha256 => {
            Zeroizing::new(Sha256::digest(password.as_bytes()).to_vec())
        }
    }
}

/// Derive the symmetric key for one entry.
///
/// Parameter validation beyond what the manifest parser already enforced
/// (e.g. Argon2 memory floors) surfaces as [`OdfDecryptError::ManifestParse`]:
/// out-of-range values mean the manifest is corrupt, not that decryption
/// failed at runtime.
pub(crate) fn derive_entry_key(
    params: &EntryCryptoParams,
    password: &str,
) -> Result<Zeroizing<Vec<u8>>, OdfDecryptError> {
    let start = start_key(params.start_key, password);

    match &params.key_derivation {
        KeyDerivation::Pbkdf2 {
            salt,
            iterations,
            key_len,
        } => {
            let mut key = Zeroizing::new(vec![0u8; *key_len]);
            pbkdf2_hmac::<Sha1>(start.as_slice(), salt, *iterations, &mut key);
            Ok(key)
        }
        KeyDerivation::Argon2id {
            salt,
            iterations,
            memory_kib,
            lanes,
            key_len,
        } => {
            let argon_params = Params::new(*memory_kib, *iterations, *lanes, Some(*key_len))
                .map_err(|e| {
                    OdfDecryptError::ManifestParse(format!("invalid Argon2id parameters: {e}"))
                })?;
            let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);
            let mut key = Zeroizing::new(vec![0u8; *key_len]);
            argon
                .hash_password_into(start.as_slice(), salt, &mut key)
                .map_err(|e| {
                    OdfDecryptError::ManifestParse(format!("invalid Argon2id parameters: {e}"))
                })?;
            Ok(key)
        }
    }
}
