//! # Validator Registry
//!
//! Maps external public keys to stable internal identities. The unit of
//! persistence keying all signing history: ledger records reference the
//! surrogate id, never the raw key.

use crate::domain::entities::Validator;
use crate::domain::errors::StoreError;
use crate::ports::outbound::UnitOfWork;
use signguard_types::PublicKey;
use std::collections::HashMap;

/// Registry operations over an open unit of work.
///
/// Borrows the unit of work for as long as the registry view is alive, so
/// every lookup and registration is serialized within the same atomic
/// scope as the decision that needs it.
pub struct ValidatorRegistry<'a, U: UnitOfWork> {
    uow: &'a mut U,
}

impl<'a, U: UnitOfWork> ValidatorRegistry<'a, U> {
    pub fn new(uow: &'a mut U) -> Self {
        Self { uow }
    }

    /// Resolve a batch of keys to their registered identities.
    ///
    /// Unknown keys are absent from the returned map, not an error.
    pub fn resolve(
        &mut self,
        keys: &[PublicKey],
    ) -> Result<HashMap<PublicKey, Validator>, StoreError> {
        let found = self.uow.find_validators(keys)?;
        Ok(found
            .into_iter()
            .map(|v| (v.public_key.clone(), v))
            .collect())
    }

    /// Resolve a single key.
    pub fn resolve_one(&mut self, key: &PublicKey) -> Result<Option<Validator>, StoreError> {
        let found = self.uow.find_validators(std::slice::from_ref(key))?;
        Ok(found.into_iter().find(|v| v.public_key == *key))
    }

    /// Assign fresh identities to every key not already registered.
    ///
    /// Idempotent across overlapping batches: re-registering a known key
    /// is a no-op, never a duplicate and never an error. Does not touch
    /// ledger entries.
    pub fn register_missing(&mut self, keys: &[PublicKey]) -> Result<(), StoreError> {
        self.uow.insert_missing_validators(keys)
    }
}
