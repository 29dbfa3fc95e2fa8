//! Hybrid-encryption benchmarks.

use criterion::{criterion_group, criterion_main, Criterion};
use e2e_crypto::curve::CurveParams;
use e2e_crypto::encrypt;
use e2e_crypto::KeyPair;

const PLAINTEXT: &[u8] = &[0x5au8; 4096];

fn bench_encrypt(c: &mut Criterion) {
    let curve = CurveParams::secp256r1();
    let recipient = KeyPair::generate(curve.clone()).unwrap();
    c.bench_function("hybrid_encrypt_4kib", |b| {
        b.iter(|| encrypt::encrypt(PLAINTEXT, recipient.public_key(), &curve).unwrap());
    });
}

fn bench_decrypt(c: &mut Criterion) {
    let curve = CurveParams::secp256r1();
    let recipient = KeyPair::generate(curve.clone()).unwrap();
    let envelope = encrypt::encrypt(PLAINTEXT, recipient.public_key(), &curve).unwrap();
    c.bench_function("hybrid_decrypt_4kib", |b| {
        b.iter(|| encrypt::decrypt(&envelope, recipient.private_key(), &curve).unwrap());
    });
}

criterion_group!(benches, bench_encrypt, bench_decrypt);
criterion_main!(benches);
