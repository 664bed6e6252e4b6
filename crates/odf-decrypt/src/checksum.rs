//! Checksum verification and wrong-password classification.
//!
//! A checksum mismatch means one of two very different things depending on
//! *when* it happens. A single password unlocks every entry of a document, so
//! a mismatch on the first entry verified means the password is wrong for the
//! whole document; a mismatch after some entry already verified means that
//! particular entry is corrupt. [`PasswordGate`] carries that one bit of
//! per-call state explicitly so the classification survives any reordering of
//! the surrounding loop.

use sha1::Sha1;
use sha2::{Digest as _, Sha256};
use subtle::ConstantTimeEq;

use crate::error::OdfDecryptError;
use crate::manifest::{ChecksumKind, EntryChecksum};

/// Number of leading bytes the `…/1K` checksum kinds digest.
const ONE_K: usize = 1024;

/// Tracks whether the password has verified on any entry of the current
/// decrypt call. One gate per call; never shared across calls.
#[derive(Debug, Default)]
pub(crate) struct PasswordGate {
    verified: bool,
}

impl PasswordGate {
    pub(crate) fn new() -> Self {
        PasswordGate { verified: false }
    }

    /// Record a successful verification (checksum match or GCM tag success).
    pub(crate) fn confirm(&mut self) {
        self.verified = true;
    }

    /// Classify a verification failure on `entry`.
    pub(crate) fn mismatch(&self, entry: &str) -> OdfDecryptError {
        if self.verified {
            OdfDecryptError::Checksum {
                entry: entry.to_string(),
            }
        } else {
            OdfDecryptError::IncorrectPassword
        }
    }
}

/// Recompute the declared digest over the decrypted (still-compressed) entry
/// data and compare in constant time.
pub(crate) fn checksum_matches(declared: &EntryChecksum, data: &[u8]) -> bool {
    let prefix = match declared.kind {
        ChecksumKind::Sha1First1k | ChecksumKind::Sha256First1k => {
            &data[..data.len().min(ONE_K)]
        }
        ChecksumKind::Sha1 | ChecksumKind::Sha256 => data,
    };
    let computed: Vec<u8> = match declared.kind {
        ChecksumKind::Sha1 | ChecksumKind::Sha1First1k => Sha1::digest(prefix).to_vec(),
        ChecksumKind::Sha256 | ChecksumKind::Sha256First1k => Sha256::digest(prefix).to_vec(),
    };
    bool::from(computed.as_slice().ct_eq(declared.value.as_slice()))
}
