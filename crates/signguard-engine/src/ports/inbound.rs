//! # Inbound Port (Driving Port)
//!
//! The primary API for the slashing-protection engine, consumed by the
//! signing transport layer.
//!
//! Every decision commits its history record before the verdict is
//! returned; nothing may still be pending when the caller releases a
//! signature.

use crate::domain::errors::ProtectionError;
use signguard_types::{Epoch, PublicKey, SigningRoot, Slot};
use std::fmt;

/// Why a structurally sound request was refused.
///
/// A denial is a policy outcome, not a fault: the engine evaluated the
/// request against recorded history and decided signing would be unsafe
/// (or the validator is not under this signer's protection).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The public key has never been registered. An unprotected validator
    /// must never be signed for.
    UnknownValidator,

    /// A different block was already signed at this slot.
    DoubleProposal {
        slot: Slot,
        existing_root: SigningRoot,
    },

    /// A different attestation already targets this epoch.
    DoubleVote {
        target_epoch: Epoch,
        existing_root: SigningRoot,
    },

    /// The requested vote span strictly contains a previously signed span.
    SurroundsPriorVote {
        prior_source: Epoch,
        prior_target: Epoch,
    },

    /// The requested vote span is strictly contained by a previously
    /// signed span.
    SurroundedByPriorVote {
        prior_source: Epoch,
        prior_target: Epoch,
    },

    /// Source epoch exceeds target epoch; not a plausible vote span.
    MalformedEpochSpan { source: Epoch, target: Epoch },
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::UnknownValidator => write!(f, "validator not registered"),
            DenialReason::DoubleProposal {
                slot,
                existing_root,
            } => {
                write!(
                    f,
                    "conflicting block proposal at slot {} (recorded root 0x{}..)",
                    slot,
                    hex::encode(&existing_root[..8])
                )
            }
            DenialReason::DoubleVote {
                target_epoch,
                existing_root,
            } => {
                write!(
                    f,
                    "conflicting attestation at target epoch {} (recorded root 0x{}..)",
                    target_epoch,
                    hex::encode(&existing_root[..8])
                )
            }
            DenialReason::SurroundsPriorVote {
                prior_source,
                prior_target,
            } => write!(
                f,
                "vote would surround prior vote {}->{}",
                prior_source, prior_target
            ),
            DenialReason::SurroundedByPriorVote {
                prior_source,
                prior_target,
            } => write!(
                f,
                "vote would be surrounded by prior vote {}->{}",
                prior_source, prior_target
            ),
            DenialReason::MalformedEpochSpan { source, target } => {
                write!(f, "malformed epoch span {}->{}", source, target)
            }
        }
    }
}

/// The engine's answer to a signing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Signing is safe; any required history record is already durable.
    Approved,
    /// Signing was refused; no history was recorded.
    Denied(DenialReason),
}

impl Verdict {
    /// The boolean the transport layer forwards to the signer.
    pub fn is_approved(&self) -> bool {
        matches!(self, Verdict::Approved)
    }
}

/// Primary API for the slashing-protection engine.
///
/// Implementations must be safe to call concurrently: any number of
/// in-flight requests, including for the same validator and the same
/// slot or epoch.
pub trait SlashingProtection {
    /// Decide whether signing a block proposal is safe, and record the
    /// decision durably before returning it.
    ///
    /// ## Errors
    ///
    /// Store faults and retry exhaustion surface as errors; the caller
    /// must treat any error as "signing not authorized".
    fn may_sign_block(
        &self,
        public_key: &PublicKey,
        signing_root: &SigningRoot,
        slot: Slot,
    ) -> Result<Verdict, ProtectionError>;

    /// Decide whether signing an attestation is safe, and record the
    /// decision durably before returning it.
    ///
    /// ## Errors
    ///
    /// As for [`may_sign_block`](SlashingProtection::may_sign_block).
    fn may_sign_attestation(
        &self,
        public_key: &PublicKey,
        signing_root: &SigningRoot,
        source_epoch: Epoch,
        target_epoch: Epoch,
    ) -> Result<Verdict, ProtectionError>;

    /// Batch-register public keys with the validator registry.
    ///
    /// Pure passthrough, tolerant of keys that are already registered.
    fn register_validators(&self, public_keys: &[PublicKey]) -> Result<(), ProtectionError>;
}
