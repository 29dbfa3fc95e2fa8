//! ECDSA sign/verify benchmarks.

use criterion::{criterion_group, criterion_main, Criterion};
use e2e_crypto::curve::CurveParams;
use e2e_crypto::ecdsa;
use e2e_crypto::KeyPair;

const MESSAGE: &[u8] = b"the quick brown fox jumps over the lazy dog";

fn bench_sign(c: &mut Criterion) {
    let curve = CurveParams::secp256r1();
    let kp = KeyPair::generate(curve.clone()).unwrap();
    c.bench_function("ecdsa_sign", |b| {
        b.iter(|| ecdsa::sign(MESSAGE, kp.private_key(), &curve).unwrap());
    });
}

fn bench_verify(c: &mut Criterion) {
    let curve = CurveParams::secp256r1();
    let kp = KeyPair::generate(curve.clone()).unwrap();
    let signature = ecdsa::sign(MESSAGE, kp.private_key(), &curve).unwrap();
    c.bench_function("ecdsa_verify", |b| {
        b.iter(|| ecdsa::verify(MESSAGE, &signature, kp.public_key(), &curve));
    });
}

criterion_group!(benches, bench_sign, bench_verify);
criterion_main!(benches);
