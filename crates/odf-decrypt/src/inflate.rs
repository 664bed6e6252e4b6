//! Post-decryption decompression.
//!
//! Both producers DEFLATE-compress an entry's plaintext before encrypting it
//! (raw stream, no zlib framing). The manifest declares the plain size per
//! encrypted entry, which gives the only cross-check that inflation produced
//! what the producer wrote.

use crate::error::OdfDecryptError;

/// Inflate a raw DEFLATE stream, checking the declared plaintext size when
/// the manifest carries one.
pub(crate) fn inflate_entry(
    entry: &str,
    data: &[u8],
    declared_size: Option<u64>,
) -> Result<Vec<u8>, OdfDecryptError> {
    let inflated = inflate::inflate_bytes(data).map_err(|e| {
        OdfDecryptError::Decompression(format!("entry {entry:?}: malformed deflate stream: {e}"))
    })?;

    if let Some(expected) = declared_size {
        if inflated.len() as u64 != expected {
            return Err(OdfDecryptError::Decompression(format!(
                "entry {entry:?}: inflated to {} bytes but the manifest declares {expected}",
                inflated.len()
            )));
        }
    }

    Ok(inflated)
}
