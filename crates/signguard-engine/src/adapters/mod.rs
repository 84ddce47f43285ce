//! # Store Adapters
//!
//! Implementations of the outbound store port:
//!
//! - `memory`: optimistic in-memory store; reference implementation and
//!   default test double.
//! - `file`: durable single-process store snapshotting to disk on commit.
//! - `lock`: process-level exclusivity for a history directory.

pub mod file;
pub mod lock;
pub mod memory;

pub(crate) mod state;

pub use file::{FileBackedStore, FileUnitOfWork};
pub use lock::HistoryLock;
pub use memory::{InMemoryStore, MemoryUnitOfWork};
