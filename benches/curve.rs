//! Scalar multiplication benchmarks.

use criterion::{criterion_group, criterion_main, Criterion};
use e2e_crypto::curve::CurveParams;
use e2e_crypto::rand::OsRng;
use e2e_crypto::BigNat;
use rand_core::RngCore;

fn random_scalar(curve: &CurveParams) -> BigNat {
    let mut rng = OsRng;
    BigNat::random_range(&BigNat::one(), &curve.n, &mut rng).unwrap()
}

fn bench_scalar_mul_base(c: &mut Criterion) {
    let curve = CurveParams::secp256r1();
    let k = random_scalar(&curve);
    c.bench_function("scalar_mul_base", |b| {
        b.iter(|| curve.scalar_mul_base(&k));
    });
}

fn bench_scalar_mul(c: &mut Criterion) {
    let curve = CurveParams::secp256r1();
    let k = random_scalar(&curve);
    let mut rng = OsRng;
    let mut bytes = [0u8; 4];
    rng.fill_bytes(&mut bytes);
    let point = curve.scalar_mul_base(&BigNat::from_u64(u32::from_le_bytes(bytes) as u64 + 2));
    c.bench_function("scalar_mul_arbitrary_point", |b| {
        b.iter(|| curve.scalar_mul(&k, &point));
    });
}

criterion_group!(benches, bench_scalar_mul_base, bench_scalar_mul);
criterion_main!(benches);
