//! Implementation of the [XChaCha20] stream cipher, the extended-nonce
//! variant of the [ChaCha20] stream cipher defined in [RFC 8439].
//!
//! XChaCha20 takes a 256-bit key and a 192-bit nonce. The first 128 bits of
//! the nonce are fed into the HChaCha20 function together with the key to
//! derive a per-message subkey; the subkey and the remaining 64 bits of the
//! nonce then drive an ordinary ChaCha20 keystream in counter mode.
//!
//! # ⚠️ Security Warning: Hazmat!
//!
//! This crate does not ensure ciphertexts are authentic! Thus ciphertext
//! integrity is not verified, which can lead to serious vulnerabilities!
//! It provides encryption only. Never reuse a (key, nonce) pair.
//!
//! USE AT YOUR OWN RISK!
//!
//! # Usage
//!
//! The caller-facing payload format appends a random nonce to the ciphertext
//! and encodes the result as base64:
//!
#![cfg_attr(all(feature = "alloc", feature = "getrandom"), doc = "```")]
#![cfg_attr(not(all(feature = "alloc", feature = "getrandom")), doc = "```ignore")]
//! let key = [0x42; 32];
//!
//! let encoded = xchacha20::encrypt(b"hello world", &key)?;
//! let message = xchacha20::decrypt(&encoded, &key)?;
//! assert_eq!(message, b"hello world");
//! # Ok::<(), xchacha20::Error>(())
//! ```
//!
//! The keystream functions are pure and can be used directly:
//!
//! ```
//! use xchacha20::xchacha20_in_place;
//!
//! let key = [0x42; 32];
//! let nonce = [0x24; 24];
//! let mut buffer = *b"attack at dawn";
//!
//! xchacha20_in_place(&key, &nonce, 0, &mut buffer);
//! assert_ne!(&buffer, b"attack at dawn");
//!
//! xchacha20_in_place(&key, &nonce, 0, &mut buffer);
//! assert_eq!(&buffer, b"attack at dawn");
//! ```
//!
//! [XChaCha20]: https://datatracker.ietf.org/doc/html/draft-irtf-cfrg-xchacha
//! [ChaCha20]: https://tools.ietf.org/html/rfc8439
//! [RFC 8439]: https://tools.ietf.org/html/rfc8439

#![cfg_attr(not(test), no_std)]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg"
)]
#![warn(missing_docs, rust_2018_idioms, trivial_casts, unused_qualifications)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod block;
mod ctr;
mod error;
mod rand;
mod xchacha;

#[cfg(feature = "alloc")]
mod payload;
#[cfg(feature = "cipher")]
mod stream;

pub use crate::block::{chacha20_block, quarter_round};
pub use crate::ctr::apply_keystream;
pub use crate::error::{Error, MalformedReason, Result};
pub use crate::rand::RandomSource;
pub use crate::xchacha::{hchacha20, xchacha20_in_place};

#[cfg(feature = "alloc")]
pub use crate::{
    ctr::chacha20,
    payload::{decrypt, decrypt_to_string, encrypt_with, open, seal},
    xchacha::xchacha20,
};

#[cfg(all(feature = "alloc", feature = "getrandom"))]
pub use crate::payload::encrypt;

#[cfg(feature = "getrandom")]
pub use crate::rand::OsRng;

#[cfg(feature = "cipher")]
pub use cipher;
#[cfg(feature = "cipher")]
pub use crate::stream::{ChaCha20, ChaCha20Core, XChaCha20, XChaChaCore};

/// Size of a ChaCha20 or XChaCha20 key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of an IETF ChaCha20 nonce in bytes.
pub const NONCE_SIZE: usize = 12;

/// Size of an XChaCha20 nonce in bytes.
pub const XNONCE_SIZE: usize = 24;

/// Size of the HChaCha20 input in bytes.
pub const HNONCE_SIZE: usize = 16;

/// Size of a keystream block in bytes.
pub const BLOCK_SIZE: usize = 64;

/// Number of 32-bit words in the ChaCha state
const STATE_WORDS: usize = 16;

/// State initialization constant ("expand 32-byte k")
const CONSTANTS: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

/// Key type used by ChaCha20 and XChaCha20.
pub type Key = [u8; KEY_SIZE];

/// Nonce type used by IETF ChaCha20.
pub type Nonce = [u8; NONCE_SIZE];

/// Nonce type used by XChaCha20.
pub type XNonce = [u8; XNONCE_SIZE];

/// A single serialized keystream block.
pub type Block = [u8; BLOCK_SIZE];

/// Copy a caller-supplied key into a fixed-size array.
#[cfg(feature = "alloc")]
pub(crate) fn parse_key(key: &[u8]) -> Result<Key> {
    Key::try_from(key).map_err(|_| Error::InvalidKeyLength {
        expected: KEY_SIZE,
        actual: key.len(),
    })
}

/// Copy a caller-supplied nonce into a fixed-size array.
#[cfg(feature = "alloc")]
pub(crate) fn parse_nonce<const N: usize>(nonce: &[u8]) -> Result<[u8; N]> {
    <[u8; N]>::try_from(nonce).map_err(|_| Error::InvalidNonceLength {
        expected: N,
        actual: nonce.len(),
    })
}

/// Clear a key copied out by [`parse_key`].
#[cfg(feature = "alloc")]
#[inline]
#[cfg_attr(not(feature = "zeroize"), allow(unused_variables))]
pub(crate) fn wipe_key(key: &mut Key) {
    #[cfg(feature = "zeroize")]
    zeroize::Zeroize::zeroize(key);
}
