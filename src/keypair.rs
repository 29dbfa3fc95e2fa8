//! Key pairs: a private scalar and its corresponding curve point (layer L4a).

use crate::bignat::BigNat;
use crate::curve::{AffinePoint, CurveParams};
use crate::digest::pbkdf2;
use crate::error::Error;
use crate::field;
use crate::rand::OsRng;
use alloc::{string::String, vec::Vec};
use rand_core::RngCore;
use zeroize::Zeroize;

const PASSPHRASE_ITERATIONS: u32 = 100_000;
const PASSPHRASE_SALT: &[u8] = b"e2e-crypto/keypair/from_passphrase/v1";

/// A key pair: a private scalar `d` in `[1, n)` and its public point `Q = d*G`.
///
/// `Debug` deliberately omits the private scalar; [`KeyPair::private_key`]
/// is the only way to read it back out.
pub struct KeyPair {
    private_key: BigNat,
    public_key: AffinePoint,
    curve: CurveParams,
}

impl core::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("curve", &self.curve.name)
            .finish_non_exhaustive()
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

impl KeyPair {
    fn from_valid_scalar(private_key: BigNat, curve: CurveParams) -> Self {
        let public_key = curve.scalar_mul_base(&private_key);
        KeyPair {
            private_key,
            public_key,
            curve,
        }
    }

    /// Generate a fresh key pair on `curve` using the OS CSPRNG.
    pub fn generate(curve: CurveParams) -> Result<Self, Error> {
        let mut rng = OsRng;
        Self::generate_with_rng(curve, &mut rng)
    }

    /// Generate a fresh key pair using caller-supplied randomness.
    pub fn generate_with_rng(curve: CurveParams, rng: &mut impl RngCore) -> Result<Self, Error> {
        let d = BigNat::random_range(&BigNat::one(), &curve.n, rng)?;
        Ok(Self::from_valid_scalar(d, curve))
    }

    /// Build a key pair from an explicit private scalar. Fails with
    /// [`Error::InvalidInput`] unless `0 < private_key < n`.
    pub fn from_scalar(private_key: BigNat, curve: CurveParams) -> Result<Self, Error> {
        if private_key.is_zero() || private_key >= curve.n {
            return Err(Error::InvalidInput);
        }
        Ok(Self::from_valid_scalar(private_key, curve))
    }

    /// Build a key pair from a hex-encoded private scalar.
    pub fn from_hex(private_key_hex: &str, curve: CurveParams) -> Result<Self, Error> {
        let d = BigNat::from_hex(private_key_hex)?;
        Self::from_scalar(d, curve)
    }

    /// Deterministically derive a key pair from a human-entered passphrase,
    /// via PBKDF2-HMAC-SHA256 over the UTF-8 passphrase bytes.
    ///
    /// The derived octet string is reduced into `[1, n)` by treating it as a
    /// big-endian integer and taking it modulo `n - 1`, then adding one; this
    /// avoids a second rejection-sampling pass while still reaching every
    /// scalar in range (the single-bit bias this introduces is immaterial
    /// for a human-chosen, low-entropy passphrase, which is already far
    /// below this scheme's security target).
    pub fn from_passphrase(passphrase: &str, curve: CurveParams) -> Result<Self, Error> {
        let key_len = curve.n.byte_length();
        let derived = pbkdf2(
            passphrase.as_bytes(),
            PASSPHRASE_SALT,
            PASSPHRASE_ITERATIONS,
            key_len,
        )?;
        let n_minus_one = curve.n.sub(&BigNat::one()).expect("n > 1");
        let d = BigNat::from_bytes_be(&derived)
            .rem(&n_minus_one)?
            .add(&BigNat::one());
        Ok(Self::from_valid_scalar(d, curve))
    }

    /// `true` iff the private scalar is in `[1, n)` and the public point lies
    /// on the curve and equals `d*G`.
    pub fn validate(&self) -> bool {
        if self.private_key.is_zero() || self.private_key >= self.curve.n {
            return false;
        }
        if !self.curve.is_on_curve(&self.public_key) {
            return false;
        }
        self.curve.scalar_mul_base(&self.private_key) == self.public_key
    }

    /// The private scalar.
    pub fn private_key(&self) -> &BigNat {
        &self.private_key
    }

    /// The public point.
    pub fn public_key(&self) -> &AffinePoint {
        &self.public_key
    }

    /// The curve this key pair was generated on.
    pub fn curve(&self) -> &CurveParams {
        &self.curve
    }

    /// The private scalar, as lower-case hex.
    pub fn private_key_hex(&self) -> String {
        self.private_key.to_hex()
    }

    /// SEC1 uncompressed point encoding: `0x04 || x || y`, each coordinate
    /// padded to the field's byte length.
    pub fn to_uncompressed(&self) -> Result<Vec<u8>, Error> {
        encode_uncompressed(&self.public_key, &self.curve)
    }

    /// SEC1 compressed point encoding: `(0x02 | (y & 1)) || x`.
    pub fn to_compressed(&self) -> Result<Vec<u8>, Error> {
        encode_compressed(&self.public_key, &self.curve)
    }

    /// Decode a SEC1 point (compressed or uncompressed) and check it lies on
    /// `curve`.
    pub fn from_sec1_bytes(bytes: &[u8], curve: &CurveParams) -> Result<AffinePoint, Error> {
        decode_sec1(bytes, curve)
    }
}

fn encode_uncompressed(point: &AffinePoint, curve: &CurveParams) -> Result<Vec<u8>, Error> {
    let (x, y) = point.coordinates().ok_or(Error::InvalidInput)?;
    let field_len = curve.p.byte_length();
    let mut out = Vec::with_capacity(1 + 2 * field_len);
    out.push(0x04);
    out.extend(x.to_bytes(field_len, false)?);
    out.extend(y.to_bytes(field_len, false)?);
    Ok(out)
}

fn encode_compressed(point: &AffinePoint, curve: &CurveParams) -> Result<Vec<u8>, Error> {
    let (x, y) = point.coordinates().ok_or(Error::InvalidInput)?;
    let field_len = curve.p.byte_length();
    let mut out = Vec::with_capacity(1 + field_len);
    let parity = if y.is_even() { 0x02 } else { 0x03 };
    out.push(parity);
    out.extend(x.to_bytes(field_len, false)?);
    Ok(out)
}

fn decode_sec1(bytes: &[u8], curve: &CurveParams) -> Result<AffinePoint, Error> {
    let field_len = curve.p.byte_length();
    match bytes.first() {
        Some(0x04) if bytes.len() == 1 + 2 * field_len => {
            let x = BigNat::from_bytes_be(&bytes[1..1 + field_len]);
            let y = BigNat::from_bytes_be(&bytes[1 + field_len..]);
            let point = AffinePoint::new(x, y);
            if curve.is_on_curve(&point) {
                Ok(point)
            } else {
                Err(Error::InvalidInput)
            }
        }
        Some(&tag @ (0x02 | 0x03)) if bytes.len() == 1 + field_len => {
            let x = BigNat::from_bytes_be(&bytes[1..]);
            if x >= curve.p {
                return Err(Error::InvalidInput);
            }
            let x2 = field::mul(&x, &x, &curve.p);
            let x3 = field::mul(&x2, &x, &curve.p);
            let ax = field::mul(&curve.a, &x, &curve.p);
            let rhs = field::add(&field::add(&x3, &ax, &curve.p), &curve.b, &curve.p);
            let y = field::sqrt(&rhs, &curve.p)?;
            let want_odd = tag == 0x03;
            let y = if y.is_even() == want_odd {
                curve.p.sub(&y).expect("y < p")
            } else {
                y
            };
            Ok(AffinePoint::new(x, y))
        }
        _ => Err(Error::InvalidInput),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_is_valid() {
        let kp = KeyPair::generate(CurveParams::secp256r1()).unwrap();
        assert!(kp.validate());
    }

    #[test]
    fn from_scalar_rejects_zero() {
        let err = KeyPair::from_scalar(BigNat::zero(), CurveParams::secp256r1()).unwrap_err();
        assert_eq!(err, Error::InvalidInput);
    }

    #[test]
    fn from_scalar_rejects_out_of_range() {
        let curve = CurveParams::secp256r1();
        let err = KeyPair::from_scalar(curve.n.clone(), curve).unwrap_err();
        assert_eq!(err, Error::InvalidInput);
    }

    #[test]
    fn uncompressed_round_trip() {
        let curve = CurveParams::secp256r1();
        let kp = KeyPair::generate(curve.clone()).unwrap();
        let encoded = kp.to_uncompressed().unwrap();
        assert_eq!(encoded[0], 0x04);
        let decoded = KeyPair::from_sec1_bytes(&encoded, &curve).unwrap();
        assert_eq!(&decoded, kp.public_key());
    }

    #[test]
    fn compressed_round_trip() {
        let curve = CurveParams::secp256r1();
        let kp = KeyPair::generate(curve.clone()).unwrap();
        let encoded = kp.to_compressed().unwrap();
        assert!(encoded[0] == 0x02 || encoded[0] == 0x03);
        let decoded = KeyPair::from_sec1_bytes(&encoded, &curve).unwrap();
        assert_eq!(&decoded, kp.public_key());
    }

    #[test]
    fn from_passphrase_is_deterministic() {
        let curve = CurveParams::secp256r1();
        let a = KeyPair::from_passphrase("correct horse battery staple", curve.clone()).unwrap();
        let b = KeyPair::from_passphrase("correct horse battery staple", curve).unwrap();
        assert_eq!(a.private_key(), b.private_key());
    }

    #[test]
    fn from_passphrase_differs_by_input() {
        let curve = CurveParams::secp256r1();
        let a = KeyPair::from_passphrase("passphrase one", curve.clone()).unwrap();
        let b = KeyPair::from_passphrase("passphrase two", curve).unwrap();
        assert_ne!(a.private_key(), b.private_key());
    }
}
