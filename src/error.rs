use thiserror::Error;

/// Status code attached to every error unless a variant says otherwise.
pub const DEFAULT_STATUS: u16 = 500;

/// Errors produced while hashing, verifying, or (de)serializing hash packets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SafeguardError {
    /// The text to hash is missing and no placeholder length is configured.
    #[error("the text value \"{0}\" is invalid and cannot be hashed")]
    InvalidInput(String),

    /// The packet string is absent or has too few segments.
    #[error("invalid hash packet: {0}")]
    InvalidPacket(String),

    /// The KDF rejected its parameters.
    #[error("key derivation failed: {0}")]
    Derivation(String),

    /// A record could not be turned into a packet string.
    #[error("cannot encode hash packet: {0}")]
    Encoding(String),

    #[error("OS random generator unavailable: {0}")]
    Random(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SafeguardError {
    /// HTTP-style status code for callers that surface errors over a service boundary.
    pub fn status(&self) -> u16 {
        match self {
            SafeguardError::InvalidInput(_)
            | SafeguardError::InvalidPacket(_)
            | SafeguardError::Derivation(_)
            | SafeguardError::Encoding(_)
            | SafeguardError::Random(_)
            | SafeguardError::Config(_) => DEFAULT_STATUS,
        }
    }
}
