//! Cryptographic primitives for hashing.
//!
//! Provides PBKDF2 key derivation, constant-time digest comparison, and OS randomness.

pub mod kdf;
pub mod random;

pub use kdf::{KdfParams, derive_key, digests_match};
pub use random::{generate_salt, random_bytes};

/// Upper bound on the derived key length (1 MiB).
pub const MAX_KEY_LEN: usize = 1 << 20;
/// Upper bound on the salt length, in hex characters.
pub const MAX_SALT_LEN: usize = 1 << 16;
/// Upper bound on the random placeholder text length (1 MiB).
pub const MAX_PLAIN_TEXT_LEN: usize = 1 << 20;
