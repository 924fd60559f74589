use getrandom::fill;
use zeroize::Zeroizing;

use super::MAX_SALT_LEN;
use crate::error::SafeguardError;

/// Fill buffer with cryptographically secure random bytes
fn secure_random(buf: &mut [u8]) -> Result<(), SafeguardError> {
    fill(buf).map_err(|e| SafeguardError::Random(e.to_string()))
}

/// Random bytes used as stand-in text when a caller has no secret yet.
pub fn random_bytes(len: usize) -> Result<Zeroizing<Vec<u8>>, SafeguardError> {
    let mut buf = Zeroizing::new(vec![0u8; len]);
    secure_random(&mut buf)?;
    Ok(buf)
}

/// Generate a fresh hex salt that is exactly `salt_length` characters long.
///
/// `salt_length` counts hex characters, so it must be positive, even and at
/// most [`MAX_SALT_LEN`]; `salt_length / 2` raw bytes are drawn from the OS.
pub fn generate_salt(salt_length: i64) -> Result<String, SafeguardError> {
    let hex_len = usize::try_from(salt_length)
        .ok()
        .filter(|&len| len > 0 && len % 2 == 0 && len <= MAX_SALT_LEN)
        .ok_or_else(|| {
            SafeguardError::Derivation(format!(
                "salt length must be a positive, even number of hex characters \
                 no greater than {MAX_SALT_LEN}, got {salt_length}"
            ))
        })?;

    let mut salt = vec![0u8; hex_len / 2];
    secure_random(&mut salt)?;
    Ok(hex::encode(salt))
}
