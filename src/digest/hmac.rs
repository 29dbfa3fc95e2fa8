//! HMAC-SHA256 (RFC 2104).

use super::sha256::{sha256, OUTPUT_LEN};
use alloc::vec::Vec;

const BLOCK_LEN: usize = 64;
const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

fn block_sized_key(key: &[u8]) -> [u8; BLOCK_LEN] {
    let mut block = [0u8; BLOCK_LEN];
    if key.len() > BLOCK_LEN {
        let hashed = sha256(key);
        block[..OUTPUT_LEN].copy_from_slice(&hashed);
    } else {
        block[..key.len()].copy_from_slice(key);
    }
    block
}

/// HMAC-SHA256 over `data`, keyed by `key`. Keys longer than the SHA-256
/// block length (64 octets) are first hashed down to 32 octets.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; OUTPUT_LEN] {
    let block = block_sized_key(key);

    let mut inner_pad = Vec::with_capacity(BLOCK_LEN + data.len());
    inner_pad.extend(block.iter().map(|b| b ^ IPAD));
    inner_pad.extend_from_slice(data);
    let inner_hash = sha256(&inner_pad);

    let mut outer_pad = Vec::with_capacity(BLOCK_LEN + OUTPUT_LEN);
    outer_pad.extend(block.iter().map(|b| b ^ OPAD));
    outer_pad.extend_from_slice(&inner_hash);
    sha256(&outer_pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> alloc::string::String {
        bytes.iter().map(|b| alloc::format!("{b:02x}")).collect()
    }

    // RFC 4231 test case 1.
    #[test]
    fn rfc4231_case_1() {
        let key = [0x0bu8; 20];
        let data = b"Hi There";
        assert_eq!(
            hex(&hmac_sha256(&key, data)),
            "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7"
        );
    }

    // RFC 4231 test case 2.
    #[test]
    fn rfc4231_case_2() {
        let key = b"Jefe";
        let data = b"what do ya want for nothing?";
        assert_eq!(
            hex(&hmac_sha256(key, data)),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }
}
