//! # Primitive Identifiers
//!
//! Slot, epoch, signing-root, and validator-id primitives used across the
//! engine and its adapters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Consensus slot number.
pub type Slot = u64;

/// Consensus epoch number.
pub type Epoch = u64;

/// 32-byte hash identifying the exact content that was signed.
pub type SigningRoot = [u8; 32];

/// Surrogate key for a registered validator.
///
/// Assigned once at registration, monotonically increasing with insertion
/// order, never reused and never deleted. All signing history is keyed by
/// this id rather than by the raw public key.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ValidatorId(pub u64);

impl ValidatorId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ValidatorId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
