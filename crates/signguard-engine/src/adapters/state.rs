//! # Committed State and Staged Writes
//!
//! The marshalling core shared by the in-memory and file-backed adapters:
//! a snapshot of committed history plus the write set staged by one open
//! unit of work.
//!
//! Isolation model: reads take the state lock briefly; commit takes it
//! once, re-validates every staged insert against the then-current state
//! (composite-key and span conflicts), and applies all-or-nothing. A
//! losing writer gets `StoreError::Conflict` and must re-run its unit of
//! work.

use crate::domain::entities::{SignedAttestationRecord, SignedBlockRecord, Validator};
use crate::domain::errors::StoreError;
use serde::{Deserialize, Serialize};
use signguard_types::{Epoch, PublicKey, SigningRoot, Slot, ValidatorId};
use std::collections::{BTreeMap, HashMap};

/// Committed history: validator identities and both ledger tables.
///
/// Append-only by construction — nothing here ever removes or rewrites an
/// entry. The attestation table is keyed by `(validator, target epoch)`
/// because the double-vote rule admits at most one record per key.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct MemoryState {
    /// Highest validator id handed out so far; ids start at 1.
    last_validator_id: u64,
    validators: HashMap<PublicKey, ValidatorId>,
    blocks: BTreeMap<(ValidatorId, Slot), SigningRoot>,
    attestations: BTreeMap<(ValidatorId, Epoch), SignedAttestationRecord>,
}

impl MemoryState {
    /// Registered identities for the given keys, ascending id order.
    pub(crate) fn find_validators(&self, keys: &[PublicKey]) -> Vec<Validator> {
        let mut found: Vec<Validator> = keys
            .iter()
            .filter_map(|key| {
                self.validators
                    .get(key)
                    .map(|id| Validator::new(*id, key.clone()))
            })
            .collect();
        found.sort_by_key(|v| v.id);
        found.dedup_by_key(|v| v.id);
        found
    }

    pub(crate) fn find_block(
        &self,
        validator: ValidatorId,
        slot: Slot,
    ) -> Option<SignedBlockRecord> {
        self.blocks
            .get(&(validator, slot))
            .map(|root| SignedBlockRecord::new(validator, slot, *root))
    }

    pub(crate) fn attestations_from(
        &self,
        validator: ValidatorId,
        lowest_target: Epoch,
    ) -> Vec<SignedAttestationRecord> {
        self.attestations
            .range((validator, lowest_target)..=(validator, Epoch::MAX))
            .map(|(_, record)| *record)
            .collect()
    }

    fn all_attestations_for(
        &self,
        validator: ValidatorId,
    ) -> impl Iterator<Item = &SignedAttestationRecord> + '_ {
        self.attestations
            .range((validator, 0)..=(validator, Epoch::MAX))
            .map(|(_, record)| record)
    }
}

/// Write set staged by one unit of work, applied on commit.
#[derive(Debug, Default)]
pub(crate) struct StagedWrites {
    /// Keys to register, in insertion order. Ids are assigned at commit.
    validators: Vec<PublicKey>,
    blocks: Vec<SignedBlockRecord>,
    attestations: Vec<SignedAttestationRecord>,
}

impl StagedWrites {
    pub(crate) fn stage_validators(&mut self, keys: &[PublicKey]) {
        for key in keys {
            if !self.validators.contains(key) {
                self.validators.push(key.clone());
            }
        }
    }

    pub(crate) fn stage_block(&mut self, record: SignedBlockRecord) {
        self.blocks.push(record);
    }

    pub(crate) fn stage_attestation(&mut self, record: SignedAttestationRecord) {
        self.attestations.push(record);
    }

    /// Read-your-writes lookup: staged records shadow committed ones.
    pub(crate) fn find_block(
        &self,
        state: &MemoryState,
        validator: ValidatorId,
        slot: Slot,
    ) -> Option<SignedBlockRecord> {
        self.blocks
            .iter()
            .find(|r| r.validator_id == validator && r.slot == slot)
            .copied()
            .or_else(|| state.find_block(validator, slot))
    }

    /// Committed plus staged records, ordered by target epoch ascending.
    pub(crate) fn find_attestations(
        &self,
        state: &MemoryState,
        validator: ValidatorId,
        lowest_target: Epoch,
    ) -> Vec<SignedAttestationRecord> {
        let mut out = state.attestations_from(validator, lowest_target);
        for record in &self.attestations {
            if record.validator_id == validator
                && record.target_epoch >= lowest_target
                && !out.iter().any(|r| r.target_epoch == record.target_epoch)
            {
                out.push(*record);
            }
        }
        out.sort_by_key(|r| r.target_epoch);
        out
    }

    /// Re-validate every staged insert against the current committed
    /// state. Run under the state lock, immediately before [`apply`].
    ///
    /// A block or attestation staged against a key that meanwhile gained a
    /// different root is a lost race; so is an attestation whose span now
    /// surrounds or is surrounded by a committed record. Validator inserts
    /// never conflict — registration is upsert-on-conflict-ignore.
    ///
    /// [`apply`]: StagedWrites::apply
    pub(crate) fn check_conflicts(&self, state: &MemoryState) -> Result<(), StoreError> {
        for record in &self.blocks {
            if let Some(existing) = state.blocks.get(&(record.validator_id, record.slot)) {
                if *existing != record.signing_root {
                    return Err(StoreError::Conflict {
                        key: format!(
                            "signed_blocks({}, {})",
                            record.validator_id, record.slot
                        ),
                    });
                }
            }
        }

        for record in &self.attestations {
            if let Some(existing) = state
                .attestations
                .get(&(record.validator_id, record.target_epoch))
            {
                if existing.signing_root != record.signing_root
                    || existing.source_epoch != record.source_epoch
                {
                    return Err(StoreError::Conflict {
                        key: format!(
                            "signed_attestations({}, {})",
                            record.validator_id, record.target_epoch
                        ),
                    });
                }
            }
            for prior in state.all_attestations_for(record.validator_id) {
                if record.surrounds(prior) || prior.surrounds(record) {
                    return Err(StoreError::Conflict {
                        key: format!(
                            "signed_attestations({}, {}..{})",
                            record.validator_id, record.source_epoch, record.target_epoch
                        ),
                    });
                }
            }
        }

        Ok(())
    }

    /// Apply the write set. Only call after [`check_conflicts`] passed
    /// under the same lock acquisition.
    ///
    /// [`check_conflicts`]: StagedWrites::check_conflicts
    pub(crate) fn apply(&self, state: &mut MemoryState) {
        for key in &self.validators {
            if !state.validators.contains_key(key) {
                state.last_validator_id += 1;
                state
                    .validators
                    .insert(key.clone(), ValidatorId::new(state.last_validator_id));
            }
        }
        for record in &self.blocks {
            state
                .blocks
                .entry((record.validator_id, record.slot))
                .or_insert(record.signing_root);
        }
        for record in &self.attestations {
            state
                .attestations
                .entry((record.validator_id, record.target_epoch))
                .or_insert(*record);
        }
    }
}
