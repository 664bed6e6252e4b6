use thiserror::Error;

/// Errors returned by this crate.
///
/// `IncorrectPassword` and `Checksum` both mean a verification digest did not
/// match; which one is raised depends on whether the password already
/// verified on an earlier entry of the same document.
#[derive(Debug, Error)]
pub enum OdfDecryptError {
    /// Input is not a readable ODF container, or its origin cannot be
    /// determined from the manifest.
    #[error("invalid ODF file: {0}")]
    InvalidOdfFile(String),
    /// The encryption manifest is structurally malformed or missing a
    /// required field for a listed encrypted entry.
    #[error("invalid encryption manifest: {0}")]
    ManifestParse(String),
    /// The manifest is well-formed but names an algorithm or derivation
    /// scheme this implementation does not support.
    #[error("unsupported encryption: {0}")]
    UnsupportedEncryption(String),
    /// Verification failed on the first entry checked; the password is wrong
    /// for the whole document.
    #[error("incorrect password")]
    IncorrectPassword,
    /// Verification failed on a later entry after the password already
    /// verified; the entry's data is corrupt.
    #[error("checksum mismatch on entry {entry:?}")]
    Checksum { entry: String },
    /// Cipher-layer failure not otherwise classified.
    #[error("decryption failed: {0}")]
    Decryption(String),
    /// Post-decryption inflate failure or declared-size mismatch.
    #[error("decompression failed: {0}")]
    Decompression(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}
