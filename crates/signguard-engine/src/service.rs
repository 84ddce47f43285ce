//! # Slashing Protection Service
//!
//! The decision engine: composes the validator registry, the signing
//! history ledger, and the equivocation policy inside one atomic unit of
//! work per request.
//!
//! ## Decide-and-Record
//!
//! Every decision runs read → assess → conditional append → commit, and
//! the commit completes before the verdict is returned. A commit conflict
//! means a concurrent request won the race on the same composite key; the
//! whole unit of work is re-run from the top, so the loser re-reads the
//! winner's record and re-evaluates — it never blindly reports ALLOW.
//! The retry budget is bounded; exhaustion surfaces as a hard error
//! distinguishable from a policy denial.

use crate::domain::config::ProtectionConfig;
use crate::domain::entities::{SignedAttestationRecord, SignedBlockRecord};
use crate::domain::errors::{ProtectionError, StoreError};
use crate::domain::ledger::SigningHistoryLedger;
use crate::domain::policy::{self, AttestationAssessment, BlockAssessment};
use crate::domain::registry::ValidatorRegistry;
use crate::ports::inbound::{DenialReason, SlashingProtection, Verdict};
use crate::ports::outbound::{TransactionalStore, UnitOfWork};
use signguard_types::{Epoch, PublicKey, SigningRoot, Slot};

/// The slashing-protection decision engine.
///
/// Generic over the store so tests can substitute an in-memory or faulty
/// implementation; the engine itself holds no mutable state and is safe
/// to share across threads.
pub struct SlashingProtectionService<S: TransactionalStore> {
    store: S,
    config: ProtectionConfig,
}

impl<S: TransactionalStore> SlashingProtectionService<S> {
    /// Create a service over `store`.
    ///
    /// ## Errors
    ///
    /// `InvalidConfig` if the configuration fails eager validation.
    pub fn new(store: S, config: ProtectionConfig) -> Result<Self, ProtectionError> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Create a service with the default configuration.
    pub fn with_defaults(store: S) -> Self {
        Self {
            store,
            config: ProtectionConfig::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decide a block-proposal request inside the open unit of work.
    ///
    /// Appends the history record when the assessment allows a new
    /// proposal; the caller owns the commit.
    fn assess_block_request<U: UnitOfWork>(
        uow: &mut U,
        public_key: &PublicKey,
        signing_root: &SigningRoot,
        slot: Slot,
    ) -> Result<Verdict, StoreError> {
        let Some(validator) = ValidatorRegistry::new(uow).resolve_one(public_key)? else {
            return Ok(Verdict::Denied(DenialReason::UnknownValidator));
        };

        let mut ledger = SigningHistoryLedger::new(uow);
        let existing = ledger.find_block(validator.id, slot)?;
        match policy::assess_block_proposal(existing.as_ref(), signing_root) {
            BlockAssessment::NewProposal => {
                ledger.append_block(SignedBlockRecord::new(validator.id, slot, *signing_root))?;
                Ok(Verdict::Approved)
            }
            BlockAssessment::Rebroadcast => Ok(Verdict::Approved),
            BlockAssessment::DoubleProposal { existing_root } => {
                Ok(Verdict::Denied(DenialReason::DoubleProposal {
                    slot,
                    existing_root,
                }))
            }
        }
    }

    /// Decide an attestation request inside the open unit of work.
    fn assess_attestation_request<U: UnitOfWork>(
        uow: &mut U,
        public_key: &PublicKey,
        signing_root: &SigningRoot,
        source_epoch: Epoch,
        target_epoch: Epoch,
    ) -> Result<Verdict, StoreError> {
        let Some(validator) = ValidatorRegistry::new(uow).resolve_one(public_key)? else {
            return Ok(Verdict::Denied(DenialReason::UnknownValidator));
        };

        let mut ledger = SigningHistoryLedger::new(uow);
        // Every record that can conflict has a target epoch at or above
        // the requested span's lower bound.
        let lowest_target = source_epoch.min(target_epoch);
        let prior = ledger.find_attestations(validator.id, lowest_target)?;

        match policy::assess_attestation(&prior, source_epoch, target_epoch, signing_root) {
            AttestationAssessment::NewVote => {
                ledger.append_attestation(SignedAttestationRecord::new(
                    validator.id,
                    source_epoch,
                    target_epoch,
                    *signing_root,
                ))?;
                Ok(Verdict::Approved)
            }
            AttestationAssessment::Repeat => Ok(Verdict::Approved),
            AttestationAssessment::MalformedSpan => {
                Ok(Verdict::Denied(DenialReason::MalformedEpochSpan {
                    source: source_epoch,
                    target: target_epoch,
                }))
            }
            AttestationAssessment::DoubleVote { existing_root } => {
                Ok(Verdict::Denied(DenialReason::DoubleVote {
                    target_epoch,
                    existing_root,
                }))
            }
            AttestationAssessment::SurroundsPrior {
                prior_source,
                prior_target,
            } => Ok(Verdict::Denied(DenialReason::SurroundsPriorVote {
                prior_source,
                prior_target,
            })),
            AttestationAssessment::SurroundedByPrior {
                prior_source,
                prior_target,
            } => Ok(Verdict::Denied(DenialReason::SurroundedByPriorVote {
                prior_source,
                prior_target,
            })),
        }
    }

    fn log_verdict(operation: &str, public_key: &PublicKey, verdict: &Verdict) {
        match verdict {
            Verdict::Approved => {
                tracing::debug!("approved {} for {}", operation, public_key);
            }
            Verdict::Denied(reason) => {
                tracing::warn!("denied {} for {}: {}", operation, public_key, reason);
            }
        }
    }
}

impl<S: TransactionalStore> SlashingProtection for SlashingProtectionService<S> {
    fn may_sign_block(
        &self,
        public_key: &PublicKey,
        signing_root: &SigningRoot,
        slot: Slot,
    ) -> Result<Verdict, ProtectionError> {
        let attempts = self.config.max_signing_attempts;
        for attempt in 1..=attempts {
            let mut uow = self.store.begin()?;
            let verdict = Self::assess_block_request(&mut uow, public_key, signing_root, slot)?;
            match uow.commit() {
                Ok(()) => {
                    Self::log_verdict("block proposal", public_key, &verdict);
                    return Ok(verdict);
                }
                Err(StoreError::Conflict { key }) => {
                    tracing::warn!(
                        "block proposal lost a commit race on {} (attempt {}/{}), re-evaluating",
                        key,
                        attempt,
                        attempts
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(ProtectionError::ConflictRetryExceeded { attempts })
    }

    fn may_sign_attestation(
        &self,
        public_key: &PublicKey,
        signing_root: &SigningRoot,
        source_epoch: Epoch,
        target_epoch: Epoch,
    ) -> Result<Verdict, ProtectionError> {
        let attempts = self.config.max_signing_attempts;
        for attempt in 1..=attempts {
            let mut uow = self.store.begin()?;
            let verdict = Self::assess_attestation_request(
                &mut uow,
                public_key,
                signing_root,
                source_epoch,
                target_epoch,
            )?;
            match uow.commit() {
                Ok(()) => {
                    Self::log_verdict("attestation", public_key, &verdict);
                    return Ok(verdict);
                }
                Err(StoreError::Conflict { key }) => {
                    tracing::warn!(
                        "attestation lost a commit race on {} (attempt {}/{}), re-evaluating",
                        key,
                        attempt,
                        attempts
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(ProtectionError::ConflictRetryExceeded { attempts })
    }

    fn register_validators(&self, public_keys: &[PublicKey]) -> Result<(), ProtectionError> {
        let attempts = self.config.max_signing_attempts;
        for attempt in 1..=attempts {
            let mut uow = self.store.begin()?;
            ValidatorRegistry::new(&mut uow).register_missing(public_keys)?;
            match uow.commit() {
                Ok(()) => {
                    tracing::debug!("registered {} validator key(s)", public_keys.len());
                    return Ok(());
                }
                Err(StoreError::Conflict { key }) => {
                    tracing::warn!(
                        "registration lost a commit race on {} (attempt {}/{}), re-evaluating",
                        key,
                        attempt,
                        attempts
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(ProtectionError::ConflictRetryExceeded { attempts })
    }
}
