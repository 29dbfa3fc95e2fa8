//! Wire-format helpers: hex and base64, grounded on the original source's
//! `utils::toHex`/`fromHex`/`base64Encode`/`base64Decode`.

use crate::error::Error;
use alloc::{string::String, vec::Vec};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Lower-case hex encoding, no separators, no `0x` prefix.
pub fn to_hex(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for byte in data {
        out.push(core::char::from_digit((byte >> 4) as u32, 16).expect("nibble"));
        out.push(core::char::from_digit((byte & 0xF) as u32, 16).expect("nibble"));
    }
    out
}

/// Decode a hex string (even length, optional `0x`/`0X` prefix, mixed case).
pub fn from_hex(s: &str) -> Result<Vec<u8>, Error> {
    let s = s.trim();
    let rest = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if rest.len() % 2 != 0 || !rest.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidInput);
    }
    let mut out = Vec::with_capacity(rest.len() / 2);
    let bytes = rest.as_bytes();
    for chunk in bytes.chunks(2) {
        let hi = (chunk[0] as char).to_digit(16).ok_or(Error::InvalidInput)?;
        let lo = (chunk[1] as char).to_digit(16).ok_or(Error::InvalidInput)?;
        out.push(((hi << 4) | lo) as u8);
    }
    Ok(out)
}

/// Standard (RFC 4648) base64 encoding, with padding.
pub fn to_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode standard (RFC 4648) base64, with padding required.
pub fn from_base64(s: &str) -> Result<Vec<u8>, Error> {
    STANDARD.decode(s.trim()).map_err(|_| Error::InvalidInput)
}
