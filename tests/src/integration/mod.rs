//! # Integration Tests
//!
//! Cross-component scenarios exercising the engine through its public
//! API, over real store adapters.

pub mod concurrency;
pub mod lifecycle;
pub mod persistence;
pub mod registration;

use signguard_types::PublicKey;

/// Install the env-filtered log subscriber once for the whole suite.
///
/// `RUST_LOG=signguard_engine=debug` shows every verdict while a test
/// runs; repeated calls are no-ops.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// A one-byte test key, mirroring how short keys flow through the
/// registry unchanged.
pub fn key(byte: u8) -> PublicKey {
    PublicKey::from_bytes(vec![byte]).unwrap()
}

/// A 48-byte compressed-key-sized test key.
pub fn long_key(byte: u8) -> PublicKey {
    PublicKey::from_bytes(vec![byte; 48]).unwrap()
}
