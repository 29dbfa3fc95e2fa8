//! The symmetric primitive backing hybrid encryption: an HMAC-SHA256-driven
//! keystream plus an encrypt-then-MAC authentication tag. See the design
//! resolution for why this replaces the original source's AES stub.

use crate::digest::{hmac_sha256, OUTPUT_LEN};
use alloc::vec::Vec;
use subtle::ConstantTimeEq;

/// Length of the authentication tag, in octets.
pub const TAG_LEN: usize = OUTPUT_LEN;

/// XOR `data` against the keystream `HMAC-SHA256(key, iv || counter_be32)`,
/// one block per 32 octets of output, in place.
pub fn apply_keystream(key: &[u8], iv: &[u8], data: &mut [u8]) {
    for (counter, chunk) in (0u32..).zip(data.chunks_mut(OUTPUT_LEN)) {
        let mut block_input = Vec::with_capacity(iv.len() + 4);
        block_input.extend_from_slice(iv);
        block_input.extend_from_slice(&counter.to_be_bytes());
        let block = hmac_sha256(key, &block_input);
        for (byte, pad) in chunk.iter_mut().zip(block.iter()) {
            *byte ^= pad;
        }
    }
}

/// `HMAC-SHA256(mac_key, associated_data || iv || ciphertext)`.
pub fn compute_tag(mac_key: &[u8], associated_data: &[u8], iv: &[u8], ciphertext: &[u8]) -> [u8; TAG_LEN] {
    let mut input = Vec::with_capacity(associated_data.len() + iv.len() + ciphertext.len());
    input.extend_from_slice(associated_data);
    input.extend_from_slice(iv);
    input.extend_from_slice(ciphertext);
    hmac_sha256(mac_key, &input)
}

/// Constant-time tag comparison.
pub fn verify_tag(expected: &[u8], actual: &[u8]) -> bool {
    expected.len() == actual.len() && bool::from(expected.ct_eq(actual))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keystream_is_involution() {
        let key = b"0123456789abcdef0123456789abcdef";
        let iv = b"unique-iv-12";
        let mut data = b"attack at dawn, repeated twice for a multi-block test".to_vec();
        let original = data.clone();
        apply_keystream(key, iv, &mut data);
        assert_ne!(data, original);
        apply_keystream(key, iv, &mut data);
        assert_eq!(data, original);
    }

    #[test]
    fn tag_detects_tamper() {
        let mac_key = b"mac-key";
        let tag = compute_tag(mac_key, b"ad", b"iv", b"ciphertext");
        let other_tag = compute_tag(mac_key, b"ad", b"iv", b"ciphertexu");
        assert!(!verify_tag(&tag, &other_tag));
        assert!(verify_tag(&tag, &compute_tag(mac_key, b"ad", b"iv", b"ciphertext")));
    }
}
