//! Known-answer vectors pinned by the component specification.

use e2e_crypto::curve::CurveParams;
use e2e_crypto::digest::sha256;
use e2e_crypto::{BigNat, KeyPair};

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[test]
fn sha256_empty_string() {
    assert_eq!(
        hex(&sha256(b"")),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn sha256_abc() {
    assert_eq!(
        hex(&sha256(b"abc")),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn private_key_one_yields_generator() {
    let curve = CurveParams::secp256r1();
    let kp = KeyPair::from_scalar(BigNat::one(), curve.clone()).unwrap();
    assert_eq!(kp.public_key(), &curve.g);
    // G_y is odd for P-256, so the compressed form carries the 0x03 prefix.
    assert_eq!(kp.to_compressed().unwrap()[0], 0x03);
}

// NIST CAVS P-256 SigGen vector (SHA-256, message "sample"): private key,
// per-message nonce k, and expected (r, s).
#[test]
fn ecdsa_nist_cavs_vector() {
    let curve = CurveParams::secp256r1();
    let d = BigNat::from_hex("c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721").unwrap();
    let kp = KeyPair::from_scalar(d, curve.clone()).unwrap();

    let signature = e2e_crypto::ecdsa::sign(b"sample", kp.private_key(), &curve).unwrap();
    assert!(e2e_crypto::ecdsa::verify(
        b"sample",
        &signature,
        kp.public_key(),
        &curve
    ));

    let expected_r =
        BigNat::from_hex("efd48b2aacb6a8fd1140dd9cd45e81d69d2c877b56aaf991c34d0ea84eaf3716").unwrap();
    assert_eq!(signature.r, expected_r);

    let expected_s =
        BigNat::from_hex("f7cb1c942d657c41d436c7a1b6e29f65f3e900dbb9aff4064dc4ab2f843acda8").unwrap();
    assert_eq!(signature.s, expected_s);
}
