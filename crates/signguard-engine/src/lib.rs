//! # Slashing Protection Engine
//!
//! Decision engine for a remote validator signer: given a request to sign
//! a block proposal or an attestation, decide whether signing is safe and
//! durably record the decision before the signature is released.
//!
//! ## Architecture
//!
//! ```text
//! signing transport ──request──→ SlashingProtectionService
//!                                     │ one atomic unit of work
//!                                     ├── ValidatorRegistry   (key → id)
//!                                     ├── SigningHistoryLedger (read slice)
//!                                     ├── policy               (pure assess)
//!                                     └── conditional append + commit
//!                                     ↓
//!                                verdict (after commit)
//! ```
//!
//! ## Domain Invariants
//!
//! | # | Invariant | Description |
//! |---|-----------|-------------|
//! | 1 | One Root Per Slot | At most one signing root per (validator, slot) |
//! | 2 | One Root Per Target | At most one signing root per (validator, target epoch) |
//! | 3 | No Surround Votes | No stored span strictly contains another |
//! | 4 | Fail Closed | Unknown validators and store faults never yield ALLOW |
//! | 5 | Record Before Release | History commits before the verdict returns |
//! | 6 | Identities Are Forever | Ids never reused, records never deleted |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - entities, pure policy, registry and ledger services
//! - `ports/` - port traits (inbound API, outbound store SPI)
//! - `adapters/` - in-memory and file-backed store implementations
//! - `service.rs` - application service implementing the API
//!
//! ## Usage
//!
//! ```ignore
//! use signguard_engine::{InMemoryStore, SlashingProtection, SlashingProtectionService};
//!
//! let service = SlashingProtectionService::with_defaults(InMemoryStore::new());
//! service.register_validators(&[public_key.clone()])?;
//!
//! let verdict = service.may_sign_block(&public_key, &signing_root, slot)?;
//! if verdict.is_approved() {
//!     // release the signature
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
pub mod test_utils;

// Re-export key types for convenience
pub use adapters::file::FileBackedStore;
pub use adapters::lock::HistoryLock;
pub use adapters::memory::InMemoryStore;
pub use domain::config::ProtectionConfig;
pub use domain::entities::{SignedAttestationRecord, SignedBlockRecord, Validator};
pub use domain::errors::{ProtectionError, StoreError};
pub use domain::ledger::SigningHistoryLedger;
pub use domain::registry::ValidatorRegistry;
pub use ports::inbound::{DenialReason, SlashingProtection, Verdict};
pub use ports::outbound::{TransactionalStore, UnitOfWork};
pub use service::SlashingProtectionService;
