//! Hash-based primitives (layer L3): SHA-256, HMAC-SHA256, PBKDF2.

mod hmac;
mod pbkdf2;
mod sha256;

pub use hmac::hmac_sha256;
pub use pbkdf2::pbkdf2;
pub use sha256::{sha256, OUTPUT_LEN};
