//! Nonce-carrying payload format.
//!
//! An encrypted payload is the XChaCha20 ciphertext followed by the 24-byte
//! nonce it was produced with:
//!
//! ```text
//! ciphertext (len = message len) || nonce (24 bytes)
//! ```
//!
//! [`encrypt`] and [`decrypt`] additionally wrap the payload in standard,
//! padded base64 so it can be carried as text. There is no version tag or
//! algorithm identifier; callers track that out of band.

use alloc::{string::String, vec::Vec};
use base64ct::{Base64, Encoding};

use crate::{
    Error, MalformedReason, Result, XNONCE_SIZE, XNonce, parse_key, parse_nonce,
    rand::RandomSource, wipe_key, xchacha::xchacha20_in_place,
};

/// Encrypt `message` under a freshly generated nonce and return the raw
/// payload: ciphertext followed by the nonce.
///
/// # Errors
///
/// Returns [`Error::InvalidKeyLength`] unless `key` is 32 bytes, and
/// [`Error::RandomSourceUnavailable`] if `rng` fails to produce a nonce.
pub fn seal<R: RandomSource + ?Sized>(rng: &mut R, message: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let mut key = parse_key(key)?;

    let mut nonce: XNonce = [0u8; XNONCE_SIZE];
    let payload = rng.fill_random(&mut nonce).map(|()| {
        let mut payload = Vec::with_capacity(message.len() + XNONCE_SIZE);
        payload.extend_from_slice(message);
        xchacha20_in_place(&key, &nonce, 0, &mut payload);
        payload.extend_from_slice(&nonce);
        payload
    });

    wipe_key(&mut key);
    payload
}

/// Recover the message from a raw payload produced by [`seal`].
///
/// # Errors
///
/// Returns [`Error::InvalidKeyLength`] unless `key` is 32 bytes, and
/// [`Error::MalformedCiphertext`] if `payload` is shorter than a nonce.
pub fn open(payload: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let mut key = parse_key(key)?;

    let message = split_payload(payload).map(|(ciphertext, nonce)| {
        let mut message = ciphertext.to_vec();
        xchacha20_in_place(&key, &nonce, 0, &mut message);
        message
    });

    wipe_key(&mut key);
    message
}

/// Separate a raw payload into its ciphertext and trailing nonce.
fn split_payload(payload: &[u8]) -> Result<(&[u8], XNonce)> {
    let split = payload
        .len()
        .checked_sub(XNONCE_SIZE)
        .ok_or(MalformedReason::TooShort { len: payload.len() })?;
    let (ciphertext, nonce) = payload.split_at(split);
    Ok((ciphertext, parse_nonce::<XNONCE_SIZE>(nonce)?))
}

/// Encrypt `message` with a nonce drawn from `rng` and return the
/// base64-encoded payload.
///
/// # Errors
///
/// See [`seal`].
pub fn encrypt_with<R: RandomSource + ?Sized>(
    rng: &mut R,
    message: impl AsRef<[u8]>,
    key: &[u8],
) -> Result<String> {
    let payload = seal(rng, message.as_ref(), key)?;
    Ok(Base64::encode_string(&payload))
}

/// Encrypt `message` with a nonce from the operating system's CSPRNG and
/// return the base64-encoded payload.
///
/// Text messages are encrypted as their UTF-8 bytes.
///
/// # Errors
///
/// Returns [`Error::InvalidKeyLength`] unless `key` is 32 bytes, and
/// [`Error::RandomSourceUnavailable`] if the OS cannot supply a nonce.
#[cfg(feature = "getrandom")]
pub fn encrypt(message: impl AsRef<[u8]>, key: &[u8]) -> Result<String> {
    encrypt_with(&mut crate::OsRng, message, key)
}

/// Decode a base64 payload produced by [`encrypt`] and recover the message.
///
/// # Errors
///
/// Returns [`Error::InvalidKeyLength`] unless `key` is 32 bytes, and
/// [`Error::MalformedCiphertext`] if `encoded` is not valid base64 or
/// decodes to fewer bytes than a nonce.
pub fn decrypt(encoded: &str, key: &[u8]) -> Result<Vec<u8>> {
    parse_key(key)?;
    let payload = Base64::decode_vec(encoded).map_err(|_| MalformedReason::Encoding)?;
    open(&payload, key)
}

/// Like [`decrypt`], but interprets the recovered message as UTF-8 text.
///
/// # Errors
///
/// Everything [`decrypt`] returns, plus [`Error::InvalidUtf8`] when the
/// message is not valid UTF-8 (e.g. when decrypting under the wrong key).
pub fn decrypt_to_string(encoded: &str, key: &[u8]) -> Result<String> {
    let message = decrypt(encoded, key)?;
    String::from_utf8(message).map_err(|_| Error::InvalidUtf8)
}
