//! Hash packet encoding.
//!
//! Packet format:
//! ```text
//! <keyLength>,<iterations>,<saltLength>,<salt_hex><derivedKey_hex>
//! ```
//! `keyLength` counts derived key bytes (the key is stored as `2 * keyLength` hex
//! characters). `saltLength` counts salt hex characters. Salt and key share the
//! fourth segment with no separator; the header lengths tell them apart.

use serde::Serialize;

use crate::config::CryptoConfig;
use crate::error::SafeguardError;

/// Number of comma-terminated numeric fields before the payload.
const HEADER_FIELDS: usize = 3;
/// Segments a packet must split into: the header fields plus the payload.
const MIN_SEGMENTS: usize = HEADER_FIELDS + 1;

/// Parameters, salt and derived key of a single hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HashRecord {
    key_length: i64,
    iterations: i64,
    salt_length: i64,
    salt: String,
    derived_key: String,
}

impl HashRecord {
    pub fn new(
        key_length: i64,
        iterations: i64,
        salt_length: i64,
        salt: String,
        derived_key: String,
    ) -> Self {
        Self {
            key_length,
            iterations,
            salt_length,
            salt,
            derived_key,
        }
    }

    /// Record carrying the configured parameters and no salt or key yet.
    pub fn from_config(config: &CryptoConfig) -> Self {
        Self::new(
            config.key_length,
            config.iterations,
            config.salt_length,
            String::new(),
            String::new(),
        )
    }

    pub fn key_length(&self) -> i64 {
        self.key_length
    }

    pub fn iterations(&self) -> i64 {
        self.iterations
    }

    pub fn salt_length(&self) -> i64 {
        self.salt_length
    }

    /// Hex salt, as stored in the packet.
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Hex derived key, as stored in the packet.
    pub fn derived_key(&self) -> &str {
        &self.derived_key
    }
}

/// Serialize a record into its packet string.
///
/// # Errors
///
/// Returns [`SafeguardError::Encoding`] if the salt or key is missing, or if
/// their lengths disagree with the header, since such a packet could not be
/// split back apart.
pub fn encode(record: &HashRecord) -> Result<String, SafeguardError> {
    if record.salt.is_empty() || record.derived_key.is_empty() {
        return Err(SafeguardError::Encoding(
            "salt and derived key must both be present".into(),
        ));
    }

    let salt_chars = record.salt.chars().count();
    if i64::try_from(salt_chars).ok() != Some(record.salt_length) {
        return Err(SafeguardError::Encoding(format!(
            "salt is {salt_chars} characters but the header declares {}",
            record.salt_length
        )));
    }

    let key_chars = record.derived_key.chars().count();
    if i64::try_from(key_chars).ok() != record.key_length.checked_mul(2) {
        return Err(SafeguardError::Encoding(format!(
            "derived key is {key_chars} hex characters but the header declares {} bytes",
            record.key_length
        )));
    }

    Ok(format!(
        "{},{},{},{}{}",
        record.key_length, record.iterations, record.salt_length, record.salt, record.derived_key
    ))
}

/// Parse a packet string back into a record.
///
/// Only a missing/empty packet or fewer than four comma-separated segments is an
/// error. Extra commas are tolerated, and a payload shorter than the declared
/// salt simply yields a truncated salt and an empty key.
pub fn decode(packet: Option<&str>) -> Result<HashRecord, SafeguardError> {
    let packet = match packet {
        Some(p) if !p.is_empty() => p,
        _ => {
            return Err(SafeguardError::InvalidPacket(
                "must be a defined string".into(),
            ));
        }
    };

    let items: Vec<&str> = packet.split(',').collect();
    if items.len() < MIN_SEGMENTS {
        return Err(SafeguardError::InvalidPacket(format!(
            "expected {MIN_SEGMENTS} items, found {}",
            items.len()
        )));
    }

    // Header length starts at the three commas and grows by the printed width of each field.
    let mut header_len = HEADER_FIELDS;

    let key_length = parse_header_field("keyLength", items[0]);
    header_len += items[0].len();

    let iterations = parse_header_field("iterations", items[1]);
    header_len += items[1].len();

    let salt_length = parse_header_field("saltLength", items[2]);
    header_len += items[2].len();

    let (salt, derived_key) = split_payload(&packet[header_len..], salt_length);

    Ok(HashRecord::new(
        key_length,
        iterations,
        salt_length,
        salt.to_string(),
        derived_key.to_string(),
    ))
}

fn parse_header_field(name: &str, field: &str) -> i64 {
    match field.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            log::debug!("hash packet header field {name} is not a number: {field:?}");
            0
        }
    }
}

/// First `salt_length` characters are the salt, the rest is the key.
fn split_payload(payload: &str, salt_length: i64) -> (&str, &str) {
    let salt_chars = usize::try_from(salt_length).unwrap_or(0);
    let split = payload
        .char_indices()
        .nth(salt_chars)
        .map_or(payload.len(), |(idx, _)| idx);
    payload.split_at(split)
}
