//! Per-entry symmetric decryption.
//!
//! AES-256-GCM carries its own authentication: the 16-byte tag trails the
//! ciphertext, and a tag mismatch is the scheme's password-verification
//! signal. Blowfish CFB-8 is an unauthenticated stream mode: any key
//! "succeeds" here and correctness is entirely the checksum verifier's
//! business. Neither path strips padding or interprets plaintext boundaries;
//! both modes are length-preserving (modulo the GCM tag).

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use blowfish::Blowfish;
use cipher::{AsyncStreamCipher, InnerIvInit, KeyInit as _};

use crate::manifest::EncryptionAlgorithm;

const GCM_TAG_LEN: usize = 16;

/// Cipher-layer outcome, before the orchestrator applies the
/// password-vs-corruption classification.
#[derive(Debug)]
pub(crate) enum CipherError {
    /// AES-GCM authentication tag mismatch: the key (and therefore the
    /// password) is wrong, or this entry's ciphertext was tampered with.
    Authentication,
    /// Structurally bad ciphertext or key material.
    Malformed(String),
}

pub(crate) fn decrypt_entry(
    algorithm: EncryptionAlgorithm,
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CipherError> {
    match algorithm {
        EncryptionAlgorithm::Aes256Gcm => decrypt_aes256_gcm(key, iv, ciphertext),
        EncryptionAlgorithm::BlowfishCfb => decrypt_blowfish_cfb8(key, iv, ciphertext),
    }
}

fn decrypt_aes256_gcm(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
    if ciphertext.len() < GCM_TAG_LEN {
        return Err(CipherError::Malformed(format!(
            "AES-GCM ciphertext of {} bytes cannot hold an authentication tag",
            ciphertext.len()
        )));
    }
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|_| CipherError::Malformed(format!("invalid AES-256 key length {}", key.len())))?;
    cipher
        .decrypt(Nonce::from_slice(iv), ciphertext)
        .map_err(|_| CipherError::Authentication)
}

fn decrypt_blowfish_cfb8(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = Blowfish::new_from_slice(key)
        .map_err(|_| CipherError::Malformed(format!("invalid Blowfish key length {}", key.len())))?;
    let decryptor = cfb8::Decryptor::<Blowfish>::inner_iv_slice_init(cipher, iv)
        .map_err(|_| CipherError::Malformed(format!("invalid Blowfish IV length {}", iv.len())))?;
    let mut buf = ciphertext.to_vec();
    decryptor.decrypt(&mut buf);
    Ok(buf)
}
