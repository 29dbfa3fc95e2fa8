//! The single entropy source this crate trusts.
//!
//! Every operation that needs randomness (key generation, ephemeral ECDH
//! keys, IVs) takes a `&mut impl RngCore + CryptoRng` rather than reaching
//! for a global; [`OsRng`] is the process-wide CSPRNG handle the rest of the
//! crate defaults to, initialized lazily at first use the way the original
//! C++ source's `BigInt::random` draws straight from the OS.

use crate::error::Error;
use rand_core::{CryptoRng, RngCore};

/// The operating system's cryptographically secure random number generator.
///
/// A thin wrapper around [`getrandom`] so the rest of the crate can depend
/// on [`rand_core::RngCore`] instead of a concrete entropy backend.
#[derive(Copy, Clone, Debug, Default)]
pub struct OsRng;

impl RngCore for OsRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.try_fill_bytes(dest).expect("OS entropy source failed");
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        getrandom::getrandom(dest).map_err(|_| {
            // rand_core::Error requires a nonzero code; the concrete
            // getrandom failure reason isn't preserved, matching this
            // crate's policy of not distinguishing entropy sub-causes.
            rand_core::Error::from(core::num::NonZeroU32::new(u32::MAX).unwrap())
        })
    }
}

impl CryptoRng for OsRng {}

/// Fill `dest` with cryptographically strong random octets.
///
/// Surfaces [`Error::EntropyFailure`] rather than panicking, unlike
/// [`OsRng`]'s `RngCore` impl (which cannot fail by that trait's contract).
pub fn fill_random(dest: &mut [u8]) -> Result<(), Error> {
    getrandom::getrandom(dest).map_err(|_| Error::EntropyFailure)
}

/// Draw `len` bytes from [`OsRng`] into a freshly allocated buffer.
#[cfg(feature = "alloc")]
pub fn random_bytes(len: usize) -> Result<alloc::vec::Vec<u8>, Error> {
    let mut buf = alloc::vec![0u8; len];
    fill_random(&mut buf)?;
    Ok(buf)
}
