//! Stateful ChaCha20 and XChaCha20 ciphers implementing the RustCrypto
//! [`cipher`] stream cipher traits.
//!
//! These support incremental keystream application and seeking. Like the
//! pure [`apply_keystream`](crate::apply_keystream) function, the 32-bit
//! block counter wraps to zero after its last value.

use core::fmt;

use cipher::{
    BlockSizeUser, IvSizeUser, KeyIvInit, KeySizeUser, ParBlocksSizeUser, StreamCipherBackend,
    StreamCipherClosure, StreamCipherCore, StreamCipherCoreWrapper, StreamCipherSeekCore,
    array::Array,
    consts::{U1, U12, U24, U32, U64},
};

use crate::{
    Key, Nonce, STATE_WORDS, XNonce,
    block::{ietf_row, init_state, run_rounds},
    xchacha::derive,
};

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Block type used by the backend.
type Block = Array<u8, U64>;

/// ChaCha20 stream cipher (RFC 8439 version with 96-bit nonce)
pub type ChaCha20 = StreamCipherCoreWrapper<ChaCha20Core>;

/// XChaCha20 stream cipher (extended 192-bit nonce).
///
/// The first 16 nonce bytes feed HChaCha20 to derive a subkey, the last 8
/// form the tail of an IETF nonce. Counter and seek behave as in
/// [`ChaCha20`], including the wrap of the 32-bit block counter.
///
/// <https://datatracker.ietf.org/doc/html/draft-irtf-cfrg-xchacha>
pub type XChaCha20 = StreamCipherCoreWrapper<XChaChaCore>;

/// The ChaCha20 core function.
pub struct ChaCha20Core {
    /// Initial state with the block counter in word 12
    state: [u32; STATE_WORDS],
}

impl ChaCha20Core {
    fn from_parts(key: &Key, nonce: &Nonce) -> Self {
        Self {
            state: init_state(key, ietf_row(nonce, 0)),
        }
    }
}

impl KeySizeUser for ChaCha20Core {
    type KeySize = U32;
}

impl IvSizeUser for ChaCha20Core {
    type IvSize = U12;
}

impl BlockSizeUser for ChaCha20Core {
    type BlockSize = U64;
}

impl KeyIvInit for ChaCha20Core {
    #[inline]
    fn new(key: &Array<u8, U32>, iv: &Array<u8, U12>) -> Self {
        let mut k: Key = [0u8; 32];
        k.copy_from_slice(key);
        let mut n: Nonce = [0u8; 12];
        n.copy_from_slice(iv);

        let core = Self::from_parts(&k, &n);

        #[cfg(feature = "zeroize")]
        k.zeroize();

        core
    }
}

impl StreamCipherCore for ChaCha20Core {
    #[inline(always)]
    fn remaining_blocks(&self) -> Option<usize> {
        // The block counter wraps modulo 2^32 instead of running out
        None
    }

    #[inline(always)]
    fn process_with_backend(&mut self, f: impl StreamCipherClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut Backend(self));
    }
}

impl StreamCipherSeekCore for ChaCha20Core {
    type Counter = u32;

    #[inline(always)]
    fn get_block_pos(&self) -> u32 {
        self.state[12]
    }

    #[inline(always)]
    fn set_block_pos(&mut self, pos: u32) {
        self.state[12] = pos;
    }
}

impl fmt::Debug for ChaCha20Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChaCha20Core { .. }")
    }
}

#[cfg(feature = "zeroize")]
impl Drop for ChaCha20Core {
    fn drop(&mut self) {
        self.state.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for ChaCha20Core {}

/// The XChaCha20 core function: ChaCha20 keyed with the HChaCha20 subkey.
pub struct XChaChaCore(ChaCha20Core);

impl KeySizeUser for XChaChaCore {
    type KeySize = U32;
}

impl IvSizeUser for XChaChaCore {
    type IvSize = U24;
}

impl BlockSizeUser for XChaChaCore {
    type BlockSize = U64;
}

impl KeyIvInit for XChaChaCore {
    fn new(key: &Array<u8, U32>, iv: &Array<u8, U24>) -> Self {
        let mut k: Key = [0u8; 32];
        k.copy_from_slice(key);
        let mut n: XNonce = [0u8; 24];
        n.copy_from_slice(iv);

        #[allow(unused_mut)]
        let (mut subkey, nonce) = derive(&k, &n);
        let core = Self(ChaCha20Core::from_parts(&subkey, &nonce));

        #[cfg(feature = "zeroize")]
        {
            k.zeroize();
            subkey.zeroize();
        }

        core
    }
}

impl StreamCipherCore for XChaChaCore {
    #[inline(always)]
    fn remaining_blocks(&self) -> Option<usize> {
        self.0.remaining_blocks()
    }

    #[inline(always)]
    fn process_with_backend(&mut self, f: impl StreamCipherClosure<BlockSize = Self::BlockSize>) {
        self.0.process_with_backend(f);
    }
}

impl StreamCipherSeekCore for XChaChaCore {
    type Counter = u32;

    #[inline(always)]
    fn get_block_pos(&self) -> u32 {
        self.0.get_block_pos()
    }

    #[inline(always)]
    fn set_block_pos(&mut self, pos: u32) {
        self.0.set_block_pos(pos);
    }
}

impl fmt::Debug for XChaChaCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("XChaChaCore { .. }")
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for XChaChaCore {}

/// Portable backend generating one block per call.
struct Backend<'a>(&'a mut ChaCha20Core);

impl BlockSizeUser for Backend<'_> {
    type BlockSize = U64;
}

impl ParBlocksSizeUser for Backend<'_> {
    type ParBlocksSize = U1;
}

impl StreamCipherBackend for Backend<'_> {
    #[inline(always)]
    fn gen_ks_block(&mut self, block: &mut Block) {
        let res = run_rounds(&self.0.state);
        self.0.state[12] = self.0.state[12].wrapping_add(1);

        for (chunk, val) in block.chunks_exact_mut(4).zip(res.iter()) {
            chunk.copy_from_slice(&val.to_le_bytes());
        }
    }
}
