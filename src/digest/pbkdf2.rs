//! PBKDF2-HMAC-SHA256 (RFC 2898).

use super::hmac::hmac_sha256;
use super::sha256::OUTPUT_LEN;
use crate::error::Error;
use alloc::vec::Vec;

/// Derive `dk_len` octets from `password` and `salt` using `iterations`
/// rounds of HMAC-SHA256 as the pseudorandom function.
///
/// Fails with [`Error::InvalidInput`] if `iterations == 0` or `dk_len`
/// would require more than `(2^32 - 1)` PRF blocks, per RFC 2898 §5.2.
pub fn pbkdf2(password: &[u8], salt: &[u8], iterations: u32, dk_len: usize) -> Result<Vec<u8>, Error> {
    if iterations == 0 {
        return Err(Error::InvalidInput);
    }
    let num_blocks = dk_len.div_ceil(OUTPUT_LEN);
    if num_blocks > u32::MAX as usize {
        return Err(Error::InvalidInput);
    }

    let mut derived = Vec::with_capacity(num_blocks * OUTPUT_LEN);
    for block_index in 1..=num_blocks as u32 {
        let mut salt_block = Vec::with_capacity(salt.len() + 4);
        salt_block.extend_from_slice(salt);
        salt_block.extend_from_slice(&block_index.to_be_bytes());

        let mut u = hmac_sha256(password, &salt_block);
        let mut t = u;
        for _ in 1..iterations {
            u = hmac_sha256(password, &u);
            for (t_byte, u_byte) in t.iter_mut().zip(u.iter()) {
                *t_byte ^= u_byte;
            }
        }
        derived.extend_from_slice(&t);
    }

    derived.truncate(dk_len);
    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> alloc::string::String {
        bytes.iter().map(|b| alloc::format!("{b:02x}")).collect()
    }

    // RFC 7914 test vector (HMAC-SHA256 variant, widely used as a PBKDF2-HMAC-SHA256 KAT).
    #[test]
    fn single_iteration() {
        let dk = pbkdf2(b"password", b"salt", 1, 32).unwrap();
        assert_eq!(
            hex(&dk),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
    }

    #[test]
    fn two_iterations() {
        let dk = pbkdf2(b"password", b"salt", 2, 32).unwrap();
        assert_eq!(
            hex(&dk),
            "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43"
        );
    }

    #[test]
    fn zero_iterations_rejected() {
        assert_eq!(pbkdf2(b"password", b"salt", 0, 32), Err(Error::InvalidInput));
    }

    #[test]
    fn odd_length_truncates_last_block() {
        let dk = pbkdf2(b"password", b"salt", 1, 20).unwrap();
        assert_eq!(dk.len(), 20);
    }
}
