//! XChaCha is an extended nonce variant of ChaCha

use crate::{
    HNONCE_SIZE, Key, NONCE_SIZE, XNonce,
    block::{init_state, le_word, permute},
    ctr::apply_keystream,
};

#[cfg(feature = "alloc")]
use crate::{Result, XNONCE_SIZE, parse_key, parse_nonce, wipe_key};
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Derive a 256-bit subkey from `key` and a 128-bit `input`.
///
/// The input takes the place of the counter and nonce words. After the
/// twenty rounds, words 0-3 and 12-15 are returned as the subkey with no
/// feed-forward addition, the same way HSalsa20 extends Salsa20:
///
/// <http://cr.yp.to/snuffle/xsalsa-20110204.pdf>
#[must_use]
pub fn hchacha20(key: &Key, input: &[u8; HNONCE_SIZE]) -> Key {
    let row = [
        le_word(&input[0..4]),
        le_word(&input[4..8]),
        le_word(&input[8..12]),
        le_word(&input[12..16]),
    ];
    let mut state = init_state(key, row);
    permute(&mut state);

    let mut output = [0u8; 32];

    for (chunk, val) in output[..16].chunks_exact_mut(4).zip(&state[..4]) {
        chunk.copy_from_slice(&val.to_le_bytes());
    }

    for (chunk, val) in output[16..].chunks_exact_mut(4).zip(&state[12..]) {
        chunk.copy_from_slice(&val.to_le_bytes());
    }

    #[cfg(feature = "zeroize")]
    {
        use zeroize::Zeroize;
        state.zeroize();
    }

    output
}

/// Split an extended nonce into the HChaCha20 input and the 96-bit
/// ChaCha20 nonce: four zero bytes followed by the last 8 nonce bytes,
/// according to draft-arciszewski-xchacha-03.
#[inline]
pub(crate) fn split_nonce(nonce: &XNonce) -> ([u8; HNONCE_SIZE], [u8; NONCE_SIZE]) {
    let mut input = [0u8; HNONCE_SIZE];
    input.copy_from_slice(&nonce[..16]);

    let mut iv = [0u8; NONCE_SIZE];
    iv[4..].copy_from_slice(&nonce[16..]);

    (input, iv)
}

/// Derive the per-nonce subkey and ChaCha20 nonce for XChaCha20.
#[inline]
pub(crate) fn derive(key: &Key, nonce: &XNonce) -> (Key, [u8; NONCE_SIZE]) {
    let (input, iv) = split_nonce(nonce);
    (hchacha20(key, &input), iv)
}

/// XOR `data` in place with the XChaCha20 keystream, starting at block
/// `counter`. Encryption and decryption are the same operation.
pub fn xchacha20_in_place(key: &Key, nonce: &XNonce, counter: u32, data: &mut [u8]) {
    #[allow(unused_mut)]
    let (mut subkey, iv) = derive(key, nonce);
    apply_keystream(&subkey, &iv, counter, data);

    #[cfg(feature = "zeroize")]
    {
        use zeroize::Zeroize;
        subkey.zeroize();
    }
}

/// Encrypt or decrypt `data` with XChaCha20, returning a fresh buffer of
/// the same length.
///
/// `counter` is the initial block counter; pass `0` to start at the
/// beginning of the keystream.
///
/// # Errors
///
/// Returns [`Error::InvalidKeyLength`] unless `key` is 32 bytes, and
/// [`Error::InvalidNonceLength`] unless `nonce` is 24 bytes.
#[cfg(feature = "alloc")]
pub fn xchacha20(key: &[u8], nonce: &[u8], data: &[u8], counter: u32) -> Result<Vec<u8>> {
    let mut key = parse_key(key)?;
    let nonce = parse_nonce::<XNONCE_SIZE>(nonce)?;

    let mut output = data.to_vec();
    xchacha20_in_place(&key, &nonce, counter, &mut output);
    wipe_key(&mut key);
    Ok(output)
}
