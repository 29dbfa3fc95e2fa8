//! Modular arithmetic pinned to a field prime (layer L1).
//!
//! Per the data model, a field element is simply a [`BigNat`] known to lie
//! in `[0, p)`; no distinct runtime type is introduced; every function here
//! is a thin specialization of the corresponding `BigNat` modular operation
//! bound to the prime `p` the caller supplies (normally [`crate::curve::CurveParams::p`]).

use crate::bignat::BigNat;
use crate::error::Error;

/// `(a + b) mod p`.
pub fn add(a: &BigNat, b: &BigNat, p: &BigNat) -> BigNat {
    a.mod_add(b, p).expect("p != 0")
}

/// `(a - b) mod p`.
pub fn sub(a: &BigNat, b: &BigNat, p: &BigNat) -> BigNat {
    a.mod_sub(b, p).expect("p != 0")
}

/// `(a * b) mod p`.
pub fn mul(a: &BigNat, b: &BigNat, p: &BigNat) -> BigNat {
    a.mod_mul(b, p).expect("p != 0")
}

/// `a^e mod p`.
pub fn pow(a: &BigNat, e: &BigNat, p: &BigNat) -> BigNat {
    a.mod_pow(e, p).expect("p != 0")
}

/// `a^-1 mod p`. Fails with [`Error::ArithmeticFailure`] for `a == 0`
/// (the only non-invertible element of a prime field).
pub fn invert(a: &BigNat, p: &BigNat) -> Result<BigNat, Error> {
    a.mod_inverse(p)
}

/// `a / b mod p = a * b^-1 mod p`.
pub fn div(a: &BigNat, b: &BigNat, p: &BigNat) -> Result<BigNat, Error> {
    let inv = invert(b, p)?;
    Ok(mul(a, &inv, p))
}

/// Modular square root for primes with `p ≡ 3 (mod 4)`, via
/// `w = a^((p+1)/4) mod p`. Fails with [`Error::ArithmeticFailure`] if `a`
/// is not a quadratic residue mod `p`.
///
/// Generalizing to arbitrary primes needs Tonelli-Shanks; out of scope,
/// since the supported curve family fixes `p ≡ 3 (mod 4)`.
pub fn sqrt(a: &BigNat, p: &BigNat) -> Result<BigNat, Error> {
    let exponent = p.add(&BigNat::one()).shr(2);
    let candidate = pow(a, &exponent, p);
    if mul(&candidate, &candidate, p) == a.rem(p)? {
        Ok(candidate)
    } else {
        Err(Error::ArithmeticFailure)
    }
}
