use core::fmt;

/// Recoverable failures from the SIV/AEAD core.
///
/// Programmer errors (an unknown algorithm name or a nonce of the wrong
/// size at the AEAD facade) are contract violations, not data-dependent
/// failures, and are reported by panicking instead of through this type —
/// see [`crate::aead::Aead`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Key material was not 32, 48, or 64 bytes long.
    BadKeySize,
    /// More than 126 associated-data strings were passed to `seal`/`open`.
    TooManyAssociatedDataItems,
    /// Tag verification failed, or the ciphertext was shorter than one
    /// block. The caller receives no plaintext.
    NotAuthentic,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::BadKeySize => "aes-siv: bad key size",
            Error::TooManyAssociatedDataItems => "aes-siv: too many associated data items",
            Error::NotAuthentic => "aes-siv: authentication failed",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for Error {}

/// Maximum number of associated-data strings accepted by `Seal`/`Open`.
pub const MAX_ASSOCIATED_DATA_ITEMS: usize = 126;
