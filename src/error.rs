//! Crate-wide error type.

use core::fmt::{self, Display};

/// The error type returned by every fallible operation in this crate.
///
/// Variants intentionally carry no payload beyond their kind: per the
/// decryption policy below, callers must not be able to distinguish *why*
/// an operation failed beyond this coarse classification.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Malformed hex/DER/wire input, a wrong-length octet string, a scalar
    /// or coordinate out of range, or a point that fails curve membership.
    InvalidInput,

    /// Division by zero, a modular inverse of a non-coprime element, or a
    /// nonexistent square root in the field.
    ArithmeticFailure,

    /// The random source failed or produced insufficient bytes.
    EntropyFailure,

    /// Decryption failed for any reason, including a tag mismatch.
    ///
    /// Sub-causes are deliberately folded into this single variant: letting
    /// callers tell a bad tag apart from a malformed envelope opens a
    /// decryption oracle.
    DecryptionFailure,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidInput => "invalid input",
            Error::ArithmeticFailure => "arithmetic failure",
            Error::EntropyFailure => "entropy source failure",
            Error::DecryptionFailure => "decryption failure",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;
