#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_lifetimes, unused_qualifications)]
#![doc = include_str!("../README.md")]

//! Self-contained elliptic-curve cryptography over NIST P-256: key-pair
//! generation, ECIES-style hybrid encryption, and ECDSA signatures, with
//! every arithmetic layer built from first principles on top of nothing
//! but a CSPRNG.
//!
//! ## Layers
//!
//! - [`bignat`] — arbitrary-precision unsigned integers (L0).
//! - [`field`] — modular arithmetic pinned to a field prime (L1).
//! - [`curve`] — the elliptic-curve group law and [`curve::CurveParams::secp256r1`] (L2).
//! - [`digest`] — SHA-256, HMAC-SHA256, PBKDF2 (L3).
//! - [`keypair`] — [`keypair::KeyPair`] generation and SEC1 point encoding (L4a).
//! - [`encrypt`] — hybrid ECIES-style encryption (L4b).
//! - [`ecdsa`] — digital signatures (L4c).

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod bignat;
pub mod cipher;
pub mod curve;
pub mod digest;
pub mod ecdsa;
pub mod encoding;
pub mod encrypt;
pub mod error;
pub mod field;
pub mod keypair;
pub mod rand;

pub use bignat::BigNat;
pub use curve::{AffinePoint, CurveParams};
pub use ecdsa::Signature;
pub use error::{Error, Result};
pub use keypair::KeyPair;
