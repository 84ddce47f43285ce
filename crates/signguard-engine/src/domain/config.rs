//! # Engine Configuration
//!
//! Value-object configuration for the decision engine, validated eagerly
//! at service construction rather than discovered mid-request.

use crate::domain::errors::ProtectionError;

/// Tuning knobs for the decision engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectionConfig {
    /// Total attempts for one decision, first try included. Each retry
    /// re-runs the whole unit of work after a commit conflict. Must be at
    /// least 1.
    pub max_signing_attempts: u32,
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            max_signing_attempts: 4,
        }
    }
}

impl ProtectionConfig {
    /// Validate the configuration.
    ///
    /// ## Errors
    ///
    /// `InvalidConfig` if the attempt budget is zero — an engine that can
    /// never open a unit of work cannot produce a verdict.
    pub fn validate(&self) -> Result<(), ProtectionError> {
        if self.max_signing_attempts == 0 {
            return Err(ProtectionError::InvalidConfig {
                reason: "max_signing_attempts must be at least 1".into(),
            });
        }
        Ok(())
    }
}
