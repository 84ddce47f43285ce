//! # Domain Layer
//!
//! Pure domain logic: entities, the equivocation policy, and the registry
//! and ledger services that operate through an open unit of work. Nothing
//! in this module performs I/O of its own.

pub mod config;
pub mod entities;
pub mod errors;
pub mod ledger;
pub mod policy;
pub mod registry;

pub use config::ProtectionConfig;
pub use entities::{SignedAttestationRecord, SignedBlockRecord, Validator};
pub use errors::{ProtectionError, StoreError};
pub use ledger::SigningHistoryLedger;
pub use policy::{AttestationAssessment, BlockAssessment};
pub use registry::ValidatorRegistry;
