//! Random number sources used to generate nonces.

use crate::Result;

/// Source of cryptographically secure random bytes.
///
/// Implementations must be backed by a CSPRNG suitable for generating
/// nonces. An implementation that cannot produce bytes returns
/// [`Error::RandomSourceUnavailable`](crate::Error::RandomSourceUnavailable)
/// and must never fall back to a non-cryptographic generator.
pub trait RandomSource {
    /// Fill `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomSourceUnavailable`](crate::Error::RandomSourceUnavailable)
    /// if the source cannot supply random data.
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<()>;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_random(dest)
    }
}

/// The operating system's random number generator, accessed via
/// [`getrandom`](https://docs.rs/getrandom).
///
/// Stateless and safe to use from many threads at once.
#[cfg(feature = "getrandom")]
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRng;

#[cfg(feature = "getrandom")]
impl RandomSource for OsRng {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<()> {
        getrandom::fill(dest).map_err(|_| crate::Error::RandomSourceUnavailable)
    }
}
