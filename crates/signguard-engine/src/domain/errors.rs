//! # Domain Errors
//!
//! Two layers: `StoreError` for faults raised by a store adapter, and
//! `ProtectionError` for the engine's caller-facing surface.
//!
//! A policy denial is NOT an error. Denials are first-class verdict values
//! so the transport layer can always distinguish "refused to sign" from
//! "could not determine".

use thiserror::Error;

/// Faults raised by a transactional store adapter.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Backend could not serve a read or write.
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },

    /// A staged append lost a race on its composite key. The unit of work
    /// must be re-run from the top; the loser must never report an
    /// unchecked ALLOW.
    #[error("commit conflict on {key}")]
    Conflict { key: String },

    /// Record (de)serialization failed.
    #[error("store serialization failed: {reason}")]
    Serialization { reason: String },

    /// I/O failure in a file-backed adapter.
    #[error("store i/o failed: {reason}")]
    Io { reason: String },

    /// The history file is held by another live signer process.
    #[error("signing history locked by another process (pid {pid:?})")]
    Locked { pid: Option<u32> },
}

/// Caller-facing errors from the decision engine.
///
/// Every variant means "signing not authorized"; none of them may ever be
/// interpreted as an implicit ALLOW.
#[derive(Debug, Clone, Error)]
pub enum ProtectionError {
    /// Rejected at construction, before any request is served.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The bounded optimistic-retry budget was exhausted under contention.
    #[error("conflict retry budget exhausted after {attempts} attempts")]
    ConflictRetryExceeded { attempts: u32 },

    /// A store fault that survived the retry budget.
    #[error(transparent)]
    Store(#[from] StoreError),
}
