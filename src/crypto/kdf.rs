use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::MAX_KEY_LEN;
use crate::error::SafeguardError;

/// Validated PBKDF2 work parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    iterations: u32,
    key_len: usize,
}

impl KdfParams {
    /// Checks raw (possibly negative) configuration values before they reach the primitive.
    pub fn new(iterations: i64, key_length: i64) -> Result<Self, SafeguardError> {
        let iterations = u32::try_from(iterations)
            .ok()
            .filter(|&i| i >= 1)
            .ok_or_else(|| {
                SafeguardError::Derivation(format!(
                    "iterations must be between 1 and {}, got {iterations}",
                    u32::MAX
                ))
            })?;

        let key_len = usize::try_from(key_length)
            .ok()
            .filter(|&len| (1..=MAX_KEY_LEN).contains(&len))
            .ok_or_else(|| {
                SafeguardError::Derivation(format!(
                    "key length must be between 1 and {MAX_KEY_LEN} bytes, got {key_length}"
                ))
            })?;

        Ok(Self {
            iterations,
            key_len,
        })
    }
}

/// Stretch `text` with `salt` into a key of the configured length using PBKDF2-HMAC-SHA256.
pub fn derive_key(text: &[u8], salt: &[u8], params: KdfParams) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; params.key_len]);
    pbkdf2_hmac::<Sha256>(text, salt, params.iterations, &mut key);
    key
}

/// Compare two hex digests without short-circuiting on the first differing byte.
pub fn digests_match(derived_hex: &str, stored_hex: &str) -> bool {
    derived_hex.as_bytes().ct_eq(stored_hex.as_bytes()).into()
}
