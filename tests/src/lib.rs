//! # signguard Test Suite
//!
//! Unified test crate for cross-component scenarios.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── lifecycle.rs     # End-to-end signing scenarios
//!     ├── registration.rs  # Registry batch semantics
//!     ├── concurrency.rs   # Racing requests on shared keys
//!     └── persistence.rs   # File-backed history across restarts
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p signguard-tests
//!
//! # By category
//! cargo test -p signguard-tests integration::concurrency::
//! ```

#![allow(dead_code)]

pub mod integration;
