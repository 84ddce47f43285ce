//! # Shared Types Crate
//!
//! Primitive identifiers shared by the slashing-protection engine and its
//! store adapters.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every crate in the workspace names a
//!   validator, slot, epoch, or signing root through this crate.
//! - **Immutable Values**: all types here are plain values constructed
//!   fully at creation; there are no setters and no partially-built states.

pub mod keys;
pub mod primitives;

pub use keys::{PublicKey, PublicKeyParseError};
pub use primitives::{Epoch, SigningRoot, Slot, ValidatorId};
