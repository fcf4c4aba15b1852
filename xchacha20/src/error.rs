//! Error types.

use thiserror::Error;

/// Result type with the `xchacha20` crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while validating cipher inputs.
///
/// Every variant is detected before any keystream is generated: inputs are
/// never truncated or padded to make them fit.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// The key is not exactly [`KEY_SIZE`](crate::KEY_SIZE) bytes long.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Required key length in bytes.
        expected: usize,
        /// Length of the key that was supplied.
        actual: usize,
    },

    /// The nonce does not have the length required by the cipher.
    #[error("invalid nonce length: expected {expected} bytes, got {actual}")]
    InvalidNonceLength {
        /// Required nonce length in bytes.
        expected: usize,
        /// Length of the nonce that was supplied.
        actual: usize,
    },

    /// The encrypted payload could not be decoded or is too short.
    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(MalformedReason),

    /// The secure random number generator could not supply nonce bytes.
    #[error("secure random source unavailable")]
    RandomSourceUnavailable,

    /// The decrypted message is not valid UTF-8.
    #[error("decrypted message is not valid UTF-8")]
    InvalidUtf8,
}

/// Reason an encrypted payload was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum MalformedReason {
    /// The transport encoding (base64) failed to decode.
    #[error("invalid base64 encoding")]
    Encoding,

    /// The decoded payload cannot hold the trailing nonce.
    #[error("payload of {len} bytes is shorter than the nonce")]
    TooShort {
        /// Length of the decoded payload.
        len: usize,
    },
}

impl From<MalformedReason> for Error {
    fn from(reason: MalformedReason) -> Self {
        Error::MalformedCiphertext(reason)
    }
}
