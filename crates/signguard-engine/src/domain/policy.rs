//! # Equivocation Policy
//!
//! Pure assessment of a signing request against the ledger slice already
//! read for the validator. No I/O, no mutation: the service decides what
//! to append based on the assessment.
//!
//! ## The Two Equivocation Rules
//!
//! 1. No double proposal / double vote: never two distinct signing roots
//!    at the same slot (blocks) or the same target epoch (attestations).
//! 2. No surround vote: a new vote span must not strictly contain, nor be
//!    strictly contained by, any previously signed span.

use crate::domain::entities::{SignedAttestationRecord, SignedBlockRecord};
use signguard_types::{Epoch, SigningRoot};

/// Outcome of assessing a block-proposal request against the one record
/// that can conflict with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAssessment {
    /// No prior record at this slot. Safe to sign; must be recorded in
    /// the same unit of work.
    NewProposal,

    /// The identical root is already recorded at this slot. Safe to sign
    /// again (client retry or rebroadcast); nothing to record.
    Rebroadcast,

    /// A different root is already recorded at this slot. Signing would
    /// be a double proposal.
    DoubleProposal { existing_root: SigningRoot },
}

/// Assess a block-proposal request.
///
/// `existing` is the record previously approved for the same
/// `(validator, slot)`, if any.
pub fn assess_block_proposal(
    existing: Option<&SignedBlockRecord>,
    signing_root: &SigningRoot,
) -> BlockAssessment {
    match existing {
        None => BlockAssessment::NewProposal,
        Some(record) if record.signing_root == *signing_root => BlockAssessment::Rebroadcast,
        Some(record) => BlockAssessment::DoubleProposal {
            existing_root: record.signing_root,
        },
    }
}

/// Outcome of assessing an attestation request against every prior record
/// whose epoch span could conflict with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttestationAssessment {
    /// No conflicting history. Safe to sign; must be recorded in the same
    /// unit of work.
    NewVote,

    /// The identical vote is already recorded. Safe to sign again;
    /// nothing to record.
    Repeat,

    /// Source epoch exceeds target epoch. The request cannot describe a
    /// valid vote span and is refused outright.
    MalformedSpan,

    /// A different root is already recorded at this target epoch.
    DoubleVote { existing_root: SigningRoot },

    /// The requested span strictly contains a previously signed span.
    SurroundsPrior {
        prior_source: Epoch,
        prior_target: Epoch,
    },

    /// The requested span is strictly contained by a previously signed
    /// span.
    SurroundedByPrior {
        prior_source: Epoch,
        prior_target: Epoch,
    },
}

/// Assess an attestation request.
///
/// `prior` is the slice of records for the same validator whose spans
/// could conflict, ordered by target epoch ascending. The double-vote
/// check runs before the surround checks so an exact repeat is recognized
/// as idempotent rather than re-litigated.
pub fn assess_attestation(
    prior: &[SignedAttestationRecord],
    source_epoch: Epoch,
    target_epoch: Epoch,
    signing_root: &SigningRoot,
) -> AttestationAssessment {
    if source_epoch > target_epoch {
        return AttestationAssessment::MalformedSpan;
    }

    if let Some(record) = prior.iter().find(|r| r.target_epoch == target_epoch) {
        return if record.signing_root == *signing_root
            && record.source_epoch == source_epoch
        {
            AttestationAssessment::Repeat
        } else {
            AttestationAssessment::DoubleVote {
                existing_root: record.signing_root,
            }
        };
    }

    for record in prior {
        if source_epoch < record.source_epoch && target_epoch > record.target_epoch {
            return AttestationAssessment::SurroundsPrior {
                prior_source: record.source_epoch,
                prior_target: record.target_epoch,
            };
        }
        if source_epoch > record.source_epoch && target_epoch < record.target_epoch {
            return AttestationAssessment::SurroundedByPrior {
                prior_source: record.source_epoch,
                prior_target: record.target_epoch,
            };
        }
    }

    AttestationAssessment::NewVote
}
