//! ECIES-style hybrid encryption (layer L4b): an ephemeral ECDH exchange
//! feeds a counter-extended SHA-256 KDF, which in turn keys the keystream
//! cipher and MAC in `cipher.rs`.

use crate::bignat::BigNat;
use crate::cipher::{self, TAG_LEN};
use crate::curve::{AffinePoint, CurveParams};
use crate::digest::sha256;
use crate::error::Error;
use crate::keypair::KeyPair;
use crate::rand::OsRng;
use alloc::{string::String, vec::Vec};
use rand_core::RngCore;

/// Default symmetric key length, in octets (AES-256-equivalent strength).
pub const KEY_LENGTH: usize = 32;
/// IV length, in octets.
pub const IV_LENGTH: usize = 12;

const UNCOMPRESSED_POINT_LEN: usize = 65;

/// `sha256(ikm || salt || counter_be32)`, concatenated over `counter = 0, 1,
/// ...` until `length` octets have been produced, then truncated.
fn kdf(ikm: &[u8], salt: &[u8], length: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(length + 32);
    let mut counter: u32 = 0;
    while out.len() < length {
        let mut block = Vec::with_capacity(ikm.len() + salt.len() + 4);
        block.extend_from_slice(ikm);
        block.extend_from_slice(salt);
        block.extend_from_slice(&counter.to_be_bytes());
        out.extend_from_slice(&sha256(&block));
        counter += 1;
    }
    out.truncate(length);
    out
}

fn shared_secret_bytes(scalar: &BigNat, point: &AffinePoint, curve: &CurveParams) -> Result<Vec<u8>, Error> {
    let shared = curve.scalar_mul(scalar, point);
    let (x, _) = shared.coordinates().ok_or(Error::ArithmeticFailure)?;
    x.to_bytes(curve.p.byte_length(), false)
}

fn derive_session_keys(shared_secret: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let derived = kdf(shared_secret, &[], 2 * KEY_LENGTH);
    let (enc_key, mac_key) = derived.split_at(KEY_LENGTH);
    (enc_key.to_vec(), mac_key.to_vec())
}

/// Encrypt `plaintext` for `recipient_public_key`, producing
/// `Q_e(65) || iv(12) || ciphertext(|pt|) || tag(32)`.
pub fn encrypt(plaintext: &[u8], recipient_public_key: &AffinePoint, curve: &CurveParams) -> Result<Vec<u8>, Error> {
    let mut rng = OsRng;
    encrypt_with_rng(plaintext, recipient_public_key, curve, &mut rng)
}

/// As [`encrypt`], with caller-supplied randomness for the ephemeral key and IV.
pub fn encrypt_with_rng(
    plaintext: &[u8],
    recipient_public_key: &AffinePoint,
    curve: &CurveParams,
    rng: &mut impl RngCore,
) -> Result<Vec<u8>, Error> {
    let ephemeral = KeyPair::generate_with_rng(curve.clone(), rng)?;
    let shared = shared_secret_bytes(ephemeral.private_key(), recipient_public_key, curve)?;
    let (enc_key, mac_key) = derive_session_keys(&shared);

    let mut iv = alloc::vec![0u8; IV_LENGTH];
    rng.fill_bytes(&mut iv);

    let mut ciphertext = plaintext.to_vec();
    cipher::apply_keystream(&enc_key, &iv, &mut ciphertext);

    let ephemeral_point = ephemeral.to_uncompressed()?;
    let tag = cipher::compute_tag(&mac_key, &ephemeral_point, &iv, &ciphertext);

    let mut out = Vec::with_capacity(ephemeral_point.len() + iv.len() + ciphertext.len() + TAG_LEN);
    out.extend_from_slice(&ephemeral_point);
    out.extend_from_slice(&iv);
    out.extend_from_slice(&ciphertext);
    out.extend_from_slice(&tag);
    Ok(out)
}

/// Decrypt `ciphertext` with `recipient_private_key`.
///
/// Fails with [`Error::DecryptionFailure`] for any malformed envelope or
/// bad authentication tag; sub-causes are deliberately not distinguished
/// (see the crate's decryption-oracle policy).
pub fn decrypt(ciphertext: &[u8], recipient_private_key: &BigNat, curve: &CurveParams) -> Result<Vec<u8>, Error> {
    let min_len = UNCOMPRESSED_POINT_LEN + IV_LENGTH + TAG_LEN;
    if ciphertext.len() < min_len {
        return Err(Error::DecryptionFailure);
    }

    let (ephemeral_point_bytes, rest) = ciphertext.split_at(UNCOMPRESSED_POINT_LEN);
    let (iv, rest) = rest.split_at(IV_LENGTH);
    let (body, tag) = rest.split_at(rest.len() - TAG_LEN);

    let ephemeral_point =
        KeyPair::from_sec1_bytes(ephemeral_point_bytes, curve).map_err(|_| Error::DecryptionFailure)?;
    let shared = shared_secret_bytes(recipient_private_key, &ephemeral_point, curve)
        .map_err(|_| Error::DecryptionFailure)?;
    let (enc_key, mac_key) = derive_session_keys(&shared);

    let expected_tag = cipher::compute_tag(&mac_key, ephemeral_point_bytes, iv, body);
    if !cipher::verify_tag(&expected_tag, tag) {
        return Err(Error::DecryptionFailure);
    }

    let mut plaintext = body.to_vec();
    cipher::apply_keystream(&enc_key, iv, &mut plaintext);
    Ok(plaintext)
}

/// Encrypt a UTF-8 string, returning the envelope as lower-case hex.
pub fn encrypt_str(plaintext: &str, recipient_public_key: &AffinePoint, curve: &CurveParams) -> Result<String, Error> {
    let envelope = encrypt(plaintext.as_bytes(), recipient_public_key, curve)?;
    Ok(crate::encoding::to_hex(&envelope))
}

/// Decrypt a hex-encoded envelope produced by [`encrypt_str`] back to a
/// UTF-8 string. Fails with [`Error::DecryptionFailure`] if the hex is
/// malformed, the envelope fails to authenticate, or the plaintext is not
/// valid UTF-8.
pub fn decrypt_str(ciphertext_hex: &str, recipient_private_key: &BigNat, curve: &CurveParams) -> Result<String, Error> {
    let envelope = crate::encoding::from_hex(ciphertext_hex).map_err(|_| Error::DecryptionFailure)?;
    let plaintext = decrypt(&envelope, recipient_private_key, curve)?;
    String::from_utf8(plaintext).map_err(|_| Error::DecryptionFailure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let curve = CurveParams::secp256r1();
        let recipient = KeyPair::generate(curve.clone()).unwrap();
        let plaintext = b"the quick brown fox jumps over the lazy dog";
        let envelope = encrypt(plaintext, recipient.public_key(), &curve).unwrap();
        let decrypted = decrypt(&envelope, recipient.private_key(), &curve).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn round_trip_empty_plaintext() {
        let curve = CurveParams::secp256r1();
        let recipient = KeyPair::generate(curve.clone()).unwrap();
        let envelope = encrypt(b"", recipient.public_key(), &curve).unwrap();
        let decrypted = decrypt(&envelope, recipient.private_key(), &curve).unwrap();
        assert_eq!(decrypted, b"");
    }

    #[test]
    fn round_trip_multi_block_plaintext() {
        let curve = CurveParams::secp256r1();
        let recipient = KeyPair::generate(curve.clone()).unwrap();
        let plaintext = alloc::vec![0x42u8; 10_000];
        let envelope = encrypt(&plaintext, recipient.public_key(), &curve).unwrap();
        let decrypted = decrypt(&envelope, recipient.private_key(), &curve).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let curve = CurveParams::secp256r1();
        let recipient = KeyPair::generate(curve.clone()).unwrap();
        let mut envelope = encrypt(b"secret", recipient.public_key(), &curve).unwrap();
        let last = envelope.len() - 1;
        envelope[last] ^= 0x01;
        assert_eq!(
            decrypt(&envelope, recipient.private_key(), &curve),
            Err(Error::DecryptionFailure)
        );
    }

    #[test]
    fn wrong_recipient_fails() {
        let curve = CurveParams::secp256r1();
        let recipient = KeyPair::generate(curve.clone()).unwrap();
        let other = KeyPair::generate(curve.clone()).unwrap();
        let envelope = encrypt(b"secret", recipient.public_key(), &curve).unwrap();
        assert_eq!(
            decrypt(&envelope, other.private_key(), &curve),
            Err(Error::DecryptionFailure)
        );
    }

    #[test]
    fn truncated_envelope_fails() {
        let curve = CurveParams::secp256r1();
        assert_eq!(
            decrypt(&[0u8; 10], &BigNat::one(), &curve),
            Err(Error::DecryptionFailure)
        );
    }

    #[test]
    fn string_round_trip() {
        let curve = CurveParams::secp256r1();
        let recipient = KeyPair::generate(curve.clone()).unwrap();
        let envelope = encrypt_str("hello, world", recipient.public_key(), &curve).unwrap();
        let decrypted = decrypt_str(&envelope, recipient.private_key(), &curve).unwrap();
        assert_eq!(decrypted, "hello, world");
    }
}
