//! # Outbound Ports (Driven Ports)
//!
//! The storage dependency required by the decision engine: a transactional
//! store giving atomic read-then-write access to validator identities and
//! both ledger tables.
//!
//! The engine only requires isolation guarantees from an implementation —
//! either serializable isolation around each unit of work, or commit-time
//! conflict detection on the composite keys. It never cares what the
//! backing store actually is.

use crate::domain::entities::{SignedAttestationRecord, SignedBlockRecord, Validator};
use crate::domain::errors::StoreError;
use signguard_types::{Epoch, PublicKey, Slot, ValidatorId};

/// One atomic unit of work against the store.
///
/// All reads observe a state at least as fresh as the moment the unit was
/// opened; all inserts are staged and become durable only on [`commit`].
/// Dropping an uncommitted unit of work discards every staged write, on
/// every exit path.
///
/// [`commit`]: UnitOfWork::commit
pub trait UnitOfWork {
    /// Look up already-registered validators for the given keys.
    ///
    /// Unknown keys are simply absent from the result, not an error.
    /// Returned in ascending id order.
    fn find_validators(&mut self, keys: &[PublicKey]) -> Result<Vec<Validator>, StoreError>;

    /// Stage identity creation for every key not already registered.
    ///
    /// Idempotent: keys that exist by commit time are skipped. Ids are
    /// assigned at commit, monotonically, in the staged insertion order.
    fn insert_missing_validators(&mut self, keys: &[PublicKey]) -> Result<(), StoreError>;

    /// The block-proposal record for `(validator, slot)`, if any.
    fn find_block(
        &mut self,
        validator: ValidatorId,
        slot: Slot,
    ) -> Result<Option<SignedBlockRecord>, StoreError>;

    /// Stage a block-proposal record for insert.
    fn insert_block(&mut self, record: SignedBlockRecord) -> Result<(), StoreError>;

    /// All attestation records for `validator` with target epoch at or
    /// above `lowest_target`, ordered by target epoch ascending.
    fn find_attestations(
        &mut self,
        validator: ValidatorId,
        lowest_target: Epoch,
    ) -> Result<Vec<SignedAttestationRecord>, StoreError>;

    /// Stage an attestation record for insert.
    fn insert_attestation(&mut self, record: SignedAttestationRecord) -> Result<(), StoreError>;

    /// Make every staged write durable, atomically.
    ///
    /// ## Errors
    ///
    /// [`StoreError::Conflict`] when a staged insert lost a race on its
    /// composite key since it was staged. The caller must re-run the whole
    /// unit of work and re-evaluate — a losing request must never report
    /// an unchecked ALLOW.
    fn commit(self) -> Result<(), StoreError>
    where
        Self: Sized;
}

/// A store capable of opening units of work.
///
/// Injected into the decision engine at construction; tests substitute an
/// in-memory implementation.
pub trait TransactionalStore: Send + Sync {
    type Uow<'a>: UnitOfWork
    where
        Self: 'a;

    /// Open a unit of work.
    fn begin(&self) -> Result<Self::Uow<'_>, StoreError>;
}
