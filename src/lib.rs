//! Salted, iterated password hashing with self-describing hash packets.
//!
//! [`Safeguard::hash`] turns plain text into a packet string carrying the KDF
//! parameters, salt and derived key. [`Safeguard::verify`] checks a candidate
//! against such a packet using the parameters stored in it, so packets created
//! under an older configuration keep verifying.

pub mod config;
mod crypto;
mod error;
pub mod packet;

pub use crate::config::{Config, CryptoConfig, CryptoOverrides};
pub use crate::error::{DEFAULT_STATUS, SafeguardError};
pub use crate::packet::HashRecord;

use zeroize::Zeroizing;

use crate::crypto::{KdfParams, MAX_PLAIN_TEXT_LEN};

pub type Result<T> = std::result::Result<T, SafeguardError>;

/// Hashes and verifies plain text.
///
/// The configuration can only change through `&mut self`, so it is never
/// updated while a `hash` call is running on a shared reference.
#[derive(Debug, Clone, Default)]
pub struct Safeguard {
    config: CryptoConfig,
    max_iterations: Option<u32>,
}

impl Safeguard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CryptoConfig) -> Self {
        Self {
            config,
            max_iterations: None,
        }
    }

    /// Refuse to verify packets that ask for more than `max` iterations.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = Some(max);
        self
    }

    pub fn config(&self) -> &CryptoConfig {
        &self.config
    }

    /// Merge `overrides` into the current configuration.
    pub fn set_config(&mut self, overrides: &CryptoOverrides) {
        self.config.merge(overrides);
    }

    pub fn reset_config(&mut self) {
        self.config = CryptoConfig::default();
    }

    /// Record with the configured parameters and no salt or key.
    pub fn default_record(&self) -> HashRecord {
        HashRecord::from_config(&self.config)
    }

    /// Hash `text` with the current configuration.
    pub fn hash(&self, text: Option<&str>) -> Result<String> {
        self.hash_with(text, &CryptoOverrides::default())
    }

    /// Hash `text`, with `options` taking precedence over the configuration for this call only.
    ///
    /// Missing or empty text is replaced by random bytes when
    /// `default_plain_text_length` is positive; otherwise it is an
    /// [`SafeguardError::InvalidInput`].
    pub fn hash_with(&self, text: Option<&str>, options: &CryptoOverrides) -> Result<String> {
        let config = self.config.merged(options);
        let text = resolve_text(text, &config)?;

        let params = KdfParams::new(config.iterations, config.key_length)?;
        let salt = crypto::generate_salt(config.salt_length)?;
        let key = crypto::derive_key(&text, salt.as_bytes(), params);

        let record = HashRecord::new(
            config.key_length,
            config.iterations,
            config.salt_length,
            salt,
            hex::encode(&*key),
        );
        packet::encode(&record)
    }

    /// Check `text` against a packet produced by [`Safeguard::hash`].
    ///
    /// Missing or empty text never matches and is not an error. Packet and
    /// derivation errors are returned as-is.
    ///
    /// The work factor comes from the packet itself: up to `u32::MAX`
    /// iterations and a 1 MiB key. When packets are not trusted, bound the
    /// cost with [`Safeguard::with_max_iterations`].
    pub fn verify(&self, text: Option<&str>, packet: Option<&str>) -> Result<bool> {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return Ok(false);
        };

        let record = packet::decode(packet)?;
        if let Some(max) = self.max_iterations {
            if record.iterations() > i64::from(max) {
                return Err(SafeguardError::Derivation(format!(
                    "packet asks for {} iterations, limit is {max}",
                    record.iterations()
                )));
            }
        }
        let params = KdfParams::new(record.iterations(), record.key_length())?;
        let key = crypto::derive_key(text.as_bytes(), record.salt().as_bytes(), params);
        let derived = Zeroizing::new(hex::encode(&*key));

        Ok(crypto::digests_match(&derived, record.derived_key()))
    }
}

fn resolve_text(text: Option<&str>, config: &CryptoConfig) -> Result<Zeroizing<Vec<u8>>> {
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        return Ok(Zeroizing::new(text.as_bytes().to_vec()));
    }

    let placeholder_len = config
        .default_plain_text_length
        .and_then(|len| usize::try_from(len).ok())
        .filter(|&len| len > 0);

    match placeholder_len {
        Some(len) if len > MAX_PLAIN_TEXT_LEN => {
            log::error!(
                "placeholder text length {len} exceeds the limit of {MAX_PLAIN_TEXT_LEN} bytes"
            );
            Err(SafeguardError::InvalidInput(
                text.unwrap_or_default().to_string(),
            ))
        }
        Some(len) => {
            log::warn!(
                "text value {:?} is invalid, hashing {len} random bytes instead",
                text.unwrap_or_default()
            );
            crypto::random_bytes(len)
        }
        None => Err(SafeguardError::InvalidInput(
            text.unwrap_or_default().to_string(),
        )),
    }
}
