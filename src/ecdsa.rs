//! ECDSA signatures (layer L4c): deterministic nonce derivation (RFC 6979),
//! DER and `<hex(r)>:<hex(s)>` signature encodings.

use crate::bignat::BigNat;
use crate::curve::CurveParams;
use crate::digest::{hmac_sha256, sha256};
use crate::error::Error;
use crate::field;
use crate::keypair::KeyPair;
use alloc::{format, string::String, vec::Vec};

/// An ECDSA signature: a pair of scalars `(r, s)`, both in `[1, n)`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    /// First signature component.
    pub r: BigNat,
    /// Second signature component.
    pub s: BigNat,
}

impl Signature {
    /// DER `SEQUENCE { INTEGER r, INTEGER s }`.
    pub fn to_der(&self) -> Vec<u8> {
        let r_bytes = der_integer(&self.r);
        let s_bytes = der_integer(&self.s);
        let mut body = Vec::with_capacity(r_bytes.len() + s_bytes.len());
        body.extend_from_slice(&r_bytes);
        body.extend_from_slice(&s_bytes);

        let mut out = Vec::with_capacity(body.len() + 4);
        out.push(0x30);
        out.extend(der_length(body.len()));
        out.extend(body);
        out
    }

    /// Parse a strict DER `SEQUENCE { INTEGER r, INTEGER s }`, rejecting any
    /// trailing bytes or non-minimal length encoding.
    pub fn from_der(der: &[u8]) -> Result<Self, Error> {
        let mut cursor = der;
        expect_tag(&mut cursor, 0x30)?;
        let body = take_der_length_prefixed(&mut cursor)?;
        if !cursor.is_empty() {
            return Err(Error::InvalidInput);
        }
        let mut body_cursor = body;
        let r = parse_der_integer(&mut body_cursor)?;
        let s = parse_der_integer(&mut body_cursor)?;
        if !body_cursor.is_empty() {
            return Err(Error::InvalidInput);
        }
        Ok(Signature { r, s })
    }

    /// `<hex(r)>:<hex(s)>`.
    pub fn to_hex(&self) -> String {
        format!("{}:{}", self.r.to_hex(), self.s.to_hex())
    }

    /// Parse the `<hex(r)>:<hex(s)>` form.
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let (r_hex, s_hex) = s.split_once(':').ok_or(Error::InvalidInput)?;
        Ok(Signature {
            r: BigNat::from_hex(r_hex)?,
            s: BigNat::from_hex(s_hex)?,
        })
    }
}

fn der_integer(value: &BigNat) -> Vec<u8> {
    let mut bytes = if value.is_zero() {
        alloc::vec![0u8]
    } else {
        value.to_bytes(0, false).expect("minimal length always fits")
    };
    if bytes[0] & 0x80 != 0 {
        bytes.insert(0, 0);
    }
    let mut out = Vec::with_capacity(bytes.len() + 2);
    out.push(0x02);
    out.extend(der_length(bytes.len()));
    out.extend(bytes);
    out
}

fn der_length(len: usize) -> Vec<u8> {
    if len < 0x80 {
        alloc::vec![len as u8]
    } else {
        let be = len.to_be_bytes();
        let significant: Vec<u8> = be
            .iter()
            .copied()
            .skip_while(|&b| b == 0)
            .collect();
        let mut out = alloc::vec![0x80 | significant.len() as u8];
        out.extend(significant);
        out
    }
}

fn expect_tag(cursor: &mut &[u8], tag: u8) -> Result<(), Error> {
    match cursor.split_first() {
        Some((&t, rest)) if t == tag => {
            *cursor = rest;
            Ok(())
        }
        _ => Err(Error::InvalidInput),
    }
}

fn take_der_length_prefixed<'a>(cursor: &mut &'a [u8]) -> Result<&'a [u8], Error> {
    let (&first, rest) = cursor.split_first().ok_or(Error::InvalidInput)?;
    let (len, rest) = if first & 0x80 == 0 {
        (first as usize, rest)
    } else {
        let nbytes = (first & 0x7F) as usize;
        if nbytes == 0 || nbytes > core::mem::size_of::<usize>() {
            return Err(Error::InvalidInput);
        }
        if rest.len() < nbytes {
            return Err(Error::InvalidInput);
        }
        let (len_bytes, rest) = rest.split_at(nbytes);
        if len_bytes[0] == 0 {
            return Err(Error::InvalidInput); // non-minimal
        }
        let mut len = 0usize;
        for &b in len_bytes {
            len = (len << 8) | b as usize;
        }
        if len < 0x80 {
            return Err(Error::InvalidInput); // should have used short form
        }
        (len, rest)
    };
    if rest.len() < len {
        return Err(Error::InvalidInput);
    }
    let (body, rest) = rest.split_at(len);
    *cursor = rest;
    Ok(body)
}

fn parse_der_integer(cursor: &mut &[u8]) -> Result<BigNat, Error> {
    expect_tag(cursor, 0x02)?;
    let body = take_der_length_prefixed(cursor)?;
    if body.is_empty() {
        return Err(Error::InvalidInput);
    }
    if body.len() > 1 && body[0] == 0 && body[1] & 0x80 == 0 {
        return Err(Error::InvalidInput); // non-minimal leading zero
    }
    if body[0] & 0x80 != 0 {
        return Err(Error::InvalidInput); // negative: unsupported for r/s
    }
    Ok(BigNat::from_bytes_be(body))
}

/// RFC 6979 deterministic nonce generator: an HMAC-DRBG seeded once from
/// the private scalar and the message hash. [`KGenerator::next`] draws
/// successive candidate `k` values from the same DRBG state, so a
/// signing attempt that must restart (an out-of-range candidate, or the
/// vanishing-probability `r == 0 || s == 0` case) continues the chain
/// rather than reseeding from scratch.
struct KGenerator<'a> {
    v: Vec<u8>,
    k: Vec<u8>,
    qlen: usize,
    n: &'a BigNat,
}

impl<'a> KGenerator<'a> {
    fn new(private_key: &BigNat, message_hash: &[u8; 32], curve: &'a CurveParams) -> Self {
        let qlen = curve.n.byte_length();
        let x_octets = private_key.to_bytes(qlen, false).expect("private_key < n");
        let h1_int = BigNat::from_bytes_be(message_hash)
            .rem(&curve.n)
            .expect("n != 0");
        let h1_octets = h1_int.to_bytes(qlen, false).expect("reduced mod n");

        let mut v = alloc::vec![0x01u8; 32];
        let mut k = alloc::vec![0x00u8; 32];

        let mut seed = Vec::with_capacity(v.len() + 1 + x_octets.len() + h1_octets.len());
        seed.extend_from_slice(&v);
        seed.push(0x00);
        seed.extend_from_slice(&x_octets);
        seed.extend_from_slice(&h1_octets);
        k = hmac_sha256(&k, &seed).to_vec();
        v = hmac_sha256(&k, &v).to_vec();

        let mut seed = Vec::with_capacity(v.len() + 1 + x_octets.len() + h1_octets.len());
        seed.extend_from_slice(&v);
        seed.push(0x01);
        seed.extend_from_slice(&x_octets);
        seed.extend_from_slice(&h1_octets);
        k = hmac_sha256(&k, &seed).to_vec();
        v = hmac_sha256(&k, &v).to_vec();

        KGenerator { v, k, qlen, n: &curve.n }
    }

    /// Draw the next candidate `k`, advancing the DRBG state.
    fn next(&mut self) -> BigNat {
        loop {
            let mut t = Vec::with_capacity(self.qlen);
            while t.len() < self.qlen {
                self.v = hmac_sha256(&self.k, &self.v).to_vec();
                t.extend_from_slice(&self.v);
            }
            t.truncate(self.qlen);
            let candidate = BigNat::from_bytes_be(&t);
            if !candidate.is_zero() && &candidate < self.n {
                return candidate;
            }
            self.reseed();
        }
    }

    /// Advance past a candidate that produced `r == 0` or `s == 0`.
    fn reject(&mut self) {
        self.reseed();
    }

    fn reseed(&mut self) {
        let mut reseed = Vec::with_capacity(self.v.len() + 1);
        reseed.extend_from_slice(&self.v);
        reseed.push(0x00);
        self.k = hmac_sha256(&self.k, &reseed).to_vec();
        self.v = hmac_sha256(&self.k, &self.v).to_vec();
    }
}

fn hash_to_scalar(message_hash: &[u8; 32], curve: &CurveParams) -> BigNat {
    BigNat::from_bytes_be(message_hash)
        .rem(&curve.n)
        .expect("n != 0")
}

/// Sign `message` (which is hashed with SHA-256 internally) with
/// `private_key`, retrying with a re-derived `k` on the vanishing-probability
/// `r == 0 || s == 0` case.
pub fn sign(message: &[u8], private_key: &BigNat, curve: &CurveParams) -> Result<Signature, Error> {
    let digest = sha256(message);
    sign_prehashed(&digest, private_key, curve)
}

/// As [`sign`], taking an already-computed 32-octet message digest.
pub fn sign_prehashed(message_hash: &[u8; 32], private_key: &BigNat, curve: &CurveParams) -> Result<Signature, Error> {
    if private_key.is_zero() || private_key >= &curve.n {
        return Err(Error::InvalidInput);
    }
    let e = hash_to_scalar(message_hash, curve);
    let mut k_gen = KGenerator::new(private_key, message_hash, curve);
    loop {
        let k = k_gen.next();
        let point = curve.scalar_mul_base(&k);
        let (x, _) = match point.coordinates() {
            Some(xy) => xy,
            None => {
                k_gen.reject();
                continue;
            }
        };
        let r = x.rem(&curve.n).expect("n != 0");
        if r.is_zero() {
            k_gen.reject();
            continue;
        }
        let k_inv = field::invert(&k, &curve.n).expect("k in (0, n)");
        let rd = field::mul(&r, private_key, &curve.n);
        let s = field::mul(&k_inv, &field::add(&e, &rd, &curve.n), &curve.n);
        if s.is_zero() {
            k_gen.reject();
            continue;
        }
        return Ok(Signature { r, s });
    }
}

/// Verify `signature` over `message` (hashed with SHA-256 internally)
/// against `public_key`.
pub fn verify(message: &[u8], signature: &Signature, public_key: &crate::curve::AffinePoint, curve: &CurveParams) -> bool {
    let digest = sha256(message);
    verify_prehashed(&digest, signature, public_key, curve)
}

/// As [`verify`], taking an already-computed 32-octet message digest.
pub fn verify_prehashed(
    message_hash: &[u8; 32],
    signature: &Signature,
    public_key: &crate::curve::AffinePoint,
    curve: &CurveParams,
) -> bool {
    if signature.r.is_zero()
        || signature.r >= curve.n
        || signature.s.is_zero()
        || signature.s >= curve.n
    {
        return false;
    }
    if !curve.is_on_curve(public_key) || public_key.is_identity() {
        return false;
    }
    let e = hash_to_scalar(message_hash, curve);
    let s_inv = match field::invert(&signature.s, &curve.n) {
        Ok(inv) => inv,
        Err(_) => return false,
    };
    let u1 = field::mul(&e, &s_inv, &curve.n);
    let u2 = field::mul(&signature.r, &s_inv, &curve.n);
    let point = curve.add(&curve.scalar_mul_base(&u1), &curve.scalar_mul(&u2, public_key));
    match point.coordinates() {
        None => false,
        Some((x, _)) => x.rem(&curve.n).expect("n != 0") == signature.r,
    }
}

/// Sign a UTF-8 message, returning the `<hex(r)>:<hex(s)>` form.
pub fn sign_str(message: &str, private_key: &BigNat, curve: &CurveParams) -> Result<String, Error> {
    Ok(sign(message.as_bytes(), private_key, curve)?.to_hex())
}

/// Verify a UTF-8 message against a `<hex(r)>:<hex(s)>` signature.
pub fn verify_str(message: &str, signature_hex: &str, public_key: &crate::curve::AffinePoint, curve: &CurveParams) -> bool {
    match Signature::from_hex(signature_hex) {
        Ok(signature) => verify(message.as_bytes(), &signature, public_key, curve),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_verify_round_trip() {
        let curve = CurveParams::secp256r1();
        let kp = KeyPair::generate(curve.clone()).unwrap();
        let signature = sign(b"hello, world", kp.private_key(), &curve).unwrap();
        assert!(verify(b"hello, world", &signature, kp.public_key(), &curve));
    }

    #[test]
    fn signing_is_deterministic() {
        let curve = CurveParams::secp256r1();
        let kp = KeyPair::generate(curve.clone()).unwrap();
        let a = sign(b"message", kp.private_key(), &curve).unwrap();
        let b = sign(b"message", kp.private_key(), &curve).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tampered_message_fails() {
        let curve = CurveParams::secp256r1();
        let kp = KeyPair::generate(curve.clone()).unwrap();
        let signature = sign(b"hello, world", kp.private_key(), &curve).unwrap();
        assert!(!verify(b"goodbye, world", &signature, kp.public_key(), &curve));
    }

    #[test]
    fn wrong_key_fails() {
        let curve = CurveParams::secp256r1();
        let kp = KeyPair::generate(curve.clone()).unwrap();
        let other = KeyPair::generate(curve.clone()).unwrap();
        let signature = sign(b"hello, world", kp.private_key(), &curve).unwrap();
        assert!(!verify(b"hello, world", &signature, other.public_key(), &curve));
    }

    #[test]
    fn der_round_trip() {
        let curve = CurveParams::secp256r1();
        let kp = KeyPair::generate(curve.clone()).unwrap();
        let signature = sign(b"hello, world", kp.private_key(), &curve).unwrap();
        let der = signature.to_der();
        assert_eq!(Signature::from_der(&der).unwrap(), signature);
    }

    #[test]
    fn hex_round_trip() {
        let curve = CurveParams::secp256r1();
        let kp = KeyPair::generate(curve.clone()).unwrap();
        let signature = sign(b"hello, world", kp.private_key(), &curve).unwrap();
        let hex = signature.to_hex();
        assert_eq!(Signature::from_hex(&hex).unwrap(), signature);
    }

    #[test]
    fn der_rejects_trailing_bytes() {
        let curve = CurveParams::secp256r1();
        let kp = KeyPair::generate(curve.clone()).unwrap();
        let signature = sign(b"hello, world", kp.private_key(), &curve).unwrap();
        let mut der = signature.to_der();
        der.push(0xFF);
        assert_eq!(Signature::from_der(&der), Err(Error::InvalidInput));
    }

    #[test]
    fn string_round_trip() {
        let curve = CurveParams::secp256r1();
        let kp = KeyPair::generate(curve.clone()).unwrap();
        let hex = sign_str("hello, world", kp.private_key(), &curve).unwrap();
        assert!(verify_str("hello, world", &hex, kp.public_key(), &curve));
    }
}
