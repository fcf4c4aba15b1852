//! The ChaCha20 block function. Defined in RFC 8439 Section 2.3.
//!
//! <https://tools.ietf.org/html/rfc8439#section-2.3>
//!
//! Portable implementation which does not rely on architecture-specific
//! intrinsics.

use crate::{Block, CONSTANTS, Key, Nonce, STATE_WORDS};

/// Number of double rounds (column round + diagonal round) in ChaCha20.
const DOUBLE_ROUNDS: usize = 10;

/// The ChaCha quarter round function, applied in place to the words at
/// indices `a`, `b`, `c` and `d` of `state`.
///
/// All additions wrap modulo 2^32.
///
/// # Panics
///
/// Panics if any index is out of bounds (i.e. not below 16).
#[inline(always)]
pub fn quarter_round(a: usize, b: usize, c: usize, d: usize, state: &mut [u32; STATE_WORDS]) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(7);
}

/// Run the 20 rounds (i.e. 10 double rounds) of ChaCha20 over `state`.
#[inline(always)]
pub(crate) fn permute(state: &mut [u32; STATE_WORDS]) {
    for _ in 0..DOUBLE_ROUNDS {
        // column rounds
        quarter_round(0, 4, 8, 12, state);
        quarter_round(1, 5, 9, 13, state);
        quarter_round(2, 6, 10, 14, state);
        quarter_round(3, 7, 11, 15, state);

        // diagonal rounds
        quarter_round(0, 5, 10, 15, state);
        quarter_round(1, 6, 11, 12, state);
        quarter_round(2, 7, 8, 13, state);
        quarter_round(3, 4, 9, 14, state);
    }
}

/// Lay out the initial state: constants, key words, and the last row.
///
/// The last row holds the block counter and the 96-bit nonce for ChaCha20,
/// or the 128-bit input for HChaCha20.
#[inline]
pub(crate) fn init_state(key: &Key, row: [u32; 4]) -> [u32; STATE_WORDS] {
    let mut state = [0u32; STATE_WORDS];
    state[..4].copy_from_slice(&CONSTANTS);
    for (word, chunk) in state[4..12].iter_mut().zip(key.chunks_exact(4)) {
        *word = le_word(chunk);
    }
    state[12..].copy_from_slice(&row);
    state
}

/// The state row for an IETF ChaCha20 block: counter followed by the nonce.
#[inline]
pub(crate) fn ietf_row(nonce: &Nonce, counter: u32) -> [u32; 4] {
    [
        counter,
        le_word(&nonce[0..4]),
        le_word(&nonce[4..8]),
        le_word(&nonce[8..12]),
    ]
}

/// Generate the keystream words of one block: permute a copy of `state`
/// and add the original back onto it.
#[inline]
pub(crate) fn run_rounds(state: &[u32; STATE_WORDS]) -> [u32; STATE_WORDS] {
    let mut res = *state;
    permute(&mut res);

    for (s1, s0) in res.iter_mut().zip(state.iter()) {
        *s1 = s1.wrapping_add(*s0);
    }
    res
}

/// Serialize the 16 state words little-endian.
#[inline]
pub(crate) fn serialize(words: &[u32; STATE_WORDS], block: &mut Block) {
    for (chunk, val) in block.chunks_exact_mut(4).zip(words.iter()) {
        chunk.copy_from_slice(&val.to_le_bytes());
    }
}

/// The ChaCha20 block function: returns the 64 keystream bytes for the
/// given key, 96-bit nonce and 32-bit block counter.
#[must_use]
pub fn chacha20_block(key: &Key, nonce: &Nonce, counter: u32) -> Block {
    #[allow(unused_mut)]
    let mut state = init_state(key, ietf_row(nonce, counter));
    #[allow(unused_mut)]
    let mut res = run_rounds(&state);

    let mut block = [0u8; 64];
    serialize(&res, &mut block);

    #[cfg(feature = "zeroize")]
    {
        use zeroize::Zeroize;
        state.zeroize();
        res.zeroize();
    }

    block
}

/// Interpret exactly four bytes as a little-endian word.
#[inline(always)]
pub(crate) fn le_word(chunk: &[u8]) -> u32 {
    u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
}
