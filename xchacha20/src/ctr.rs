//! ChaCha20 as a counter mode stream cipher.
//!
//! Each 64-byte slice of the input is XORed with the block function output
//! for the next counter value. The same function encrypts and decrypts.

use crate::{
    BLOCK_SIZE, Key, Nonce,
    block::{ietf_row, init_state, run_rounds, serialize},
};

#[cfg(feature = "alloc")]
use crate::{NONCE_SIZE, Result, parse_key, parse_nonce, wipe_key};
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// XOR `data` in place with the ChaCha20 keystream for `key` and `nonce`,
/// starting at block `counter`.
///
/// The block counter advances by one for every 64 bytes of input and wraps
/// modulo 2^32. Unused keystream bytes of the final block are discarded.
pub fn apply_keystream(key: &Key, nonce: &Nonce, counter: u32, data: &mut [u8]) {
    let mut state = init_state(key, ietf_row(nonce, counter));
    let mut block = [0u8; BLOCK_SIZE];

    for chunk in data.chunks_mut(BLOCK_SIZE) {
        serialize(&run_rounds(&state), &mut block);
        xor(chunk, &block[..chunk.len()]);
        state[12] = state[12].wrapping_add(1);
    }

    #[cfg(feature = "zeroize")]
    {
        use zeroize::Zeroize;
        state.zeroize();
        block.zeroize();
    }
}

/// Encrypt or decrypt `data` with IETF ChaCha20, returning a fresh buffer.
///
/// # Errors
///
/// Returns [`Error::InvalidKeyLength`] unless `key` is 32 bytes, and
/// [`Error::InvalidNonceLength`] unless `nonce` is 12 bytes.
#[cfg(feature = "alloc")]
pub fn chacha20(key: &[u8], nonce: &[u8], counter: u32, data: &[u8]) -> Result<Vec<u8>> {
    let mut key = parse_key(key)?;
    let nonce = parse_nonce::<NONCE_SIZE>(nonce)?;

    let mut output = data.to_vec();
    apply_keystream(&key, &nonce, counter, &mut output);
    wipe_key(&mut key);
    Ok(output)
}

#[inline(always)]
fn xor(buf: &mut [u8], key: &[u8]) {
    debug_assert_eq!(buf.len(), key.len());
    for (a, b) in buf.iter_mut().zip(key) {
        *a ^= *b;
    }
}
