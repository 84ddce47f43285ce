//! # In-Memory Store Adapter
//!
//! Reference implementation of the transactional store contract and the
//! default test double. Optimistic units of work: reads observe committed
//! state, writes are staged, and commit re-validates under the state lock
//! before applying all-or-nothing.
//!
//! Clones share the same underlying state, so a store handle can be handed
//! to concurrently running services in tests.

use crate::adapters::state::{MemoryState, StagedWrites};
use crate::domain::entities::{SignedAttestationRecord, SignedBlockRecord, Validator};
use crate::domain::errors::StoreError;
use crate::ports::outbound::{TransactionalStore, UnitOfWork};
use parking_lot::Mutex;
use signguard_types::{Epoch, PublicKey, Slot, ValidatorId};
use std::sync::Arc;

/// In-memory transactional store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionalStore for InMemoryStore {
    type Uow<'a> = MemoryUnitOfWork<'a>;

    fn begin(&self) -> Result<Self::Uow<'_>, StoreError> {
        Ok(MemoryUnitOfWork {
            state: &self.state,
            staged: StagedWrites::default(),
        })
    }
}

/// An open unit of work against an [`InMemoryStore`].
///
/// Dropping without commit discards the staged writes.
pub struct MemoryUnitOfWork<'a> {
    state: &'a Mutex<MemoryState>,
    staged: StagedWrites,
}

impl UnitOfWork for MemoryUnitOfWork<'_> {
    fn find_validators(&mut self, keys: &[PublicKey]) -> Result<Vec<Validator>, StoreError> {
        Ok(self.state.lock().find_validators(keys))
    }

    fn insert_missing_validators(&mut self, keys: &[PublicKey]) -> Result<(), StoreError> {
        self.staged.stage_validators(keys);
        Ok(())
    }

    fn find_block(
        &mut self,
        validator: ValidatorId,
        slot: Slot,
    ) -> Result<Option<SignedBlockRecord>, StoreError> {
        let state = self.state.lock();
        Ok(self.staged.find_block(&state, validator, slot))
    }

    fn insert_block(&mut self, record: SignedBlockRecord) -> Result<(), StoreError> {
        self.staged.stage_block(record);
        Ok(())
    }

    fn find_attestations(
        &mut self,
        validator: ValidatorId,
        lowest_target: Epoch,
    ) -> Result<Vec<SignedAttestationRecord>, StoreError> {
        let state = self.state.lock();
        Ok(self.staged.find_attestations(&state, validator, lowest_target))
    }

    fn insert_attestation(&mut self, record: SignedAttestationRecord) -> Result<(), StoreError> {
        self.staged.stage_attestation(record);
        Ok(())
    }

    fn commit(self) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        self.staged.check_conflicts(&state)?;
        self.staged.apply(&mut state);
        Ok(())
    }
}
