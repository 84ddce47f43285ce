//! # Validator Public Keys
//!
//! The external identity of a validator as handed over by the signing API:
//! raw compressed public-key bytes, or the hex encoding of those bytes.
//!
//! The engine never interprets the key cryptographically. It is an opaque,
//! globally unique byte string mapped to a [`ValidatorId`] by the registry.
//!
//! [`ValidatorId`]: crate::ValidatorId

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from parsing an externally supplied public key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublicKeyParseError {
    /// The hex string contained a non-hex character or had odd length.
    #[error("invalid hex encoding: {reason}")]
    InvalidHex { reason: String },

    /// An empty key can never identify a validator.
    #[error("public key must not be empty")]
    Empty,
}

/// Raw public-key bytes identifying a validator.
///
/// Compared, hashed, and stored as an opaque byte string. Construction is
/// the only place any validation happens; a constructed key is always
/// non-empty.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublicKey(Vec<u8>);

impl PublicKey {
    /// Wrap raw key bytes.
    ///
    /// ## Errors
    ///
    /// Returns [`PublicKeyParseError::Empty`] for an empty byte string.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, PublicKeyParseError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(PublicKeyParseError::Empty);
        }
        Ok(Self(bytes))
    }

    /// Parse a hex-encoded key, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, PublicKeyParseError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|e| PublicKeyParseError::InvalidHex {
            reason: e.to_string(),
        })?;
        Self::from_bytes(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PublicKey {
    /// Abbreviated hex form for log lines: `0x` + first 8 bytes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() <= 8 {
            write!(f, "0x{}", hex::encode(&self.0))
        } else {
            write!(f, "0x{}..", hex::encode(&self.0[..8]))
        }
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self)
    }
}
