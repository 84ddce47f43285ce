//! # Store Test Doubles
//!
//! Fault-injecting implementations of the outbound store port, used by
//! unit tests here and by the workspace test suite.

use crate::adapters::memory::{InMemoryStore, MemoryUnitOfWork};
use crate::domain::entities::{SignedAttestationRecord, SignedBlockRecord, Validator};
use crate::domain::errors::StoreError;
use crate::ports::outbound::{TransactionalStore, UnitOfWork};
use signguard_types::{Epoch, PublicKey, Slot, ValidatorId};

fn injected_fault() -> StoreError {
    StoreError::Unavailable {
        reason: "injected fault".into(),
    }
}

/// A store whose every operation fails, for fail-closed tests.
pub struct FailingStore;

impl TransactionalStore for FailingStore {
    type Uow<'a> = FailingUnitOfWork;

    fn begin(&self) -> Result<Self::Uow<'_>, StoreError> {
        Err(injected_fault())
    }
}

/// Unit of work handed out by [`FailingStore`] — never actually issued,
/// but every operation fails anyway.
pub struct FailingUnitOfWork;

impl UnitOfWork for FailingUnitOfWork {
    fn find_validators(&mut self, _keys: &[PublicKey]) -> Result<Vec<Validator>, StoreError> {
        Err(injected_fault())
    }

    fn insert_missing_validators(&mut self, _keys: &[PublicKey]) -> Result<(), StoreError> {
        Err(injected_fault())
    }

    fn find_block(
        &mut self,
        _validator: ValidatorId,
        _slot: Slot,
    ) -> Result<Option<SignedBlockRecord>, StoreError> {
        Err(injected_fault())
    }

    fn insert_block(&mut self, _record: SignedBlockRecord) -> Result<(), StoreError> {
        Err(injected_fault())
    }

    fn find_attestations(
        &mut self,
        _validator: ValidatorId,
        _lowest_target: Epoch,
    ) -> Result<Vec<SignedAttestationRecord>, StoreError> {
        Err(injected_fault())
    }

    fn insert_attestation(&mut self, _record: SignedAttestationRecord) -> Result<(), StoreError> {
        Err(injected_fault())
    }

    fn commit(self) -> Result<(), StoreError> {
        Err(injected_fault())
    }
}

/// A store whose reads work but whose every commit loses the race, for
/// retry-budget tests.
pub struct ContendedStore {
    inner: InMemoryStore,
}

impl ContendedStore {
    pub fn new(inner: InMemoryStore) -> Self {
        Self { inner }
    }
}

impl TransactionalStore for ContendedStore {
    type Uow<'a> = ContendedUnitOfWork<'a>;

    fn begin(&self) -> Result<Self::Uow<'_>, StoreError> {
        Ok(ContendedUnitOfWork {
            inner: self.inner.begin()?,
        })
    }
}

/// Unit of work that delegates everything except commit, which always
/// reports a lost race.
pub struct ContendedUnitOfWork<'a> {
    inner: MemoryUnitOfWork<'a>,
}

impl UnitOfWork for ContendedUnitOfWork<'_> {
    fn find_validators(&mut self, keys: &[PublicKey]) -> Result<Vec<Validator>, StoreError> {
        self.inner.find_validators(keys)
    }

    fn insert_missing_validators(&mut self, keys: &[PublicKey]) -> Result<(), StoreError> {
        self.inner.insert_missing_validators(keys)
    }

    fn find_block(
        &mut self,
        validator: ValidatorId,
        slot: Slot,
    ) -> Result<Option<SignedBlockRecord>, StoreError> {
        self.inner.find_block(validator, slot)
    }

    fn insert_block(&mut self, record: SignedBlockRecord) -> Result<(), StoreError> {
        self.inner.insert_block(record)
    }

    fn find_attestations(
        &mut self,
        validator: ValidatorId,
        lowest_target: Epoch,
    ) -> Result<Vec<SignedAttestationRecord>, StoreError> {
        self.inner.find_attestations(validator, lowest_target)
    }

    fn insert_attestation(&mut self, record: SignedAttestationRecord) -> Result<(), StoreError> {
        self.inner.insert_attestation(record)
    }

    fn commit(self) -> Result<(), StoreError> {
        Err(StoreError::Conflict {
            key: "contended".into(),
        })
    }
}
