//! # Signing History Ledger
//!
//! Two parallel append-only stores: block proposals keyed by
//! `(validator, slot)`, attestations keyed by `(validator, target epoch)`.
//!
//! The ledger performs no policy evaluation; it is a pure read/append view
//! over an open unit of work. Appends must only be issued by the decision
//! engine after policy approval, inside the same unit of work as the read
//! that produced the verdict.

use crate::domain::entities::{SignedAttestationRecord, SignedBlockRecord};
use crate::domain::errors::StoreError;
use crate::ports::outbound::UnitOfWork;
use signguard_types::{Epoch, Slot, ValidatorId};

/// Ledger operations over an open unit of work.
pub struct SigningHistoryLedger<'a, U: UnitOfWork> {
    uow: &'a mut U,
}

impl<'a, U: UnitOfWork> SigningHistoryLedger<'a, U> {
    pub fn new(uow: &'a mut U) -> Self {
        Self { uow }
    }

    /// The proposal record for `(validator, slot)`, if one was ever
    /// approved.
    pub fn find_block(
        &mut self,
        validator: ValidatorId,
        slot: Slot,
    ) -> Result<Option<SignedBlockRecord>, StoreError> {
        self.uow.find_block(validator, slot)
    }

    /// Append an approved proposal record.
    pub fn append_block(&mut self, record: SignedBlockRecord) -> Result<(), StoreError> {
        self.uow.insert_block(record)
    }

    /// Every attestation record for `validator` whose target epoch is at
    /// or above `lowest_target`, ordered by target epoch ascending.
    ///
    /// Used by the decision engine to evaluate double-vote and
    /// surround-vote conditions against the requested span.
    pub fn find_attestations(
        &mut self,
        validator: ValidatorId,
        lowest_target: Epoch,
    ) -> Result<Vec<SignedAttestationRecord>, StoreError> {
        self.uow.find_attestations(validator, lowest_target)
    }

    /// Append an approved attestation record.
    pub fn append_attestation(
        &mut self,
        record: SignedAttestationRecord,
    ) -> Result<(), StoreError> {
        self.uow.insert_attestation(record)
    }
}
