//! # Domain Entities
//!
//! The three persisted record types: validator identities, signed block
//! proposals, and signed attestations.
//!
//! All entities are immutable value types constructed fully at creation.
//! The store adapter owns marshalling; nothing here knows how records are
//! laid out on disk.

use serde::{Deserialize, Serialize};
use signguard_types::{Epoch, PublicKey, SigningRoot, Slot, ValidatorId};

/// A registered validator identity.
///
/// A public key maps to exactly one id for the lifetime of the store.
/// Identities are never mutated and never deleted; signing history must
/// outlive the validator's active duty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub id: ValidatorId,
    pub public_key: PublicKey,
}

impl Validator {
    pub fn new(id: ValidatorId, public_key: PublicKey) -> Self {
        Self { id, public_key }
    }
}

/// A durably recorded block-proposal signature.
///
/// At most one distinct signing root is ever associated with a given
/// `(validator_id, slot)` pair. Re-recording the identical root is a
/// no-op; a different root at the same slot is the double-proposal
/// slashing condition and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBlockRecord {
    pub validator_id: ValidatorId,
    pub slot: Slot,
    pub signing_root: SigningRoot,
}

impl SignedBlockRecord {
    pub fn new(validator_id: ValidatorId, slot: Slot, signing_root: SigningRoot) -> Self {
        Self {
            validator_id,
            slot,
            signing_root,
        }
    }
}

/// A durably recorded attestation signature.
///
/// Keyed by `(validator_id, target_epoch)`; carries the source epoch so
/// surround-vote conflicts can be evaluated against the full vote span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedAttestationRecord {
    pub validator_id: ValidatorId,
    pub source_epoch: Epoch,
    pub target_epoch: Epoch,
    pub signing_root: SigningRoot,
}

impl SignedAttestationRecord {
    pub fn new(
        validator_id: ValidatorId,
        source_epoch: Epoch,
        target_epoch: Epoch,
        signing_root: SigningRoot,
    ) -> Self {
        Self {
            validator_id,
            source_epoch,
            target_epoch,
            signing_root,
        }
    }

    /// Whether this vote's epoch span strictly contains `other`'s.
    ///
    /// Strict on both ends: sharing a source or target epoch is not a
    /// surround.
    pub fn surrounds(&self, other: &SignedAttestationRecord) -> bool {
        self.source_epoch < other.source_epoch && self.target_epoch > other.target_epoch
    }
}
