//! Error types for obsignal.
//!
//! Only construction paths can fail: building a registry from a bad
//! configuration, or creating a channel for a name the registry refuses.
//! Connect, disconnect and emit on an existing channel never fail, and
//! observer failures are never wrapped in these types.

use thiserror::Error;

/// Validation errors raised before any state is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The empty string is not a signal name.
    #[error("Signal name cannot be empty")]
    EmptySignalName,

    /// Name longer than the configured `max_name_len`.
    #[error("Signal name '{name}' exceeds maximum length of {max_length}")]
    SignalNameTooLong {
        /// Rejected name.
        name: String,
        /// Configured limit.
        max_length: usize,
    },

    /// Configuration that could never register a signal.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong.
        reason: String,
    },
}

/// Errors raised by the registry while resolving a channel.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Creating the signal would exceed `max_signals`.
    #[error("Signal limit reached: cannot register '{name}' (max: {max_signals})")]
    SignalLimitReached {
        /// Name that could not be created.
        name: String,
        /// Configured limit.
        max_signals: usize,
    },
}

/// Top-level error type for obsignal.
#[derive(Debug, Error)]
pub enum SignalError {
    /// Input rejected before any state changed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The registry refused to create a channel.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl SignalError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a registry error.
    #[must_use]
    pub const fn is_registry(&self) -> bool {
        matches!(self, Self::Registry(_))
    }

    /// Builds an invalid-configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::Validation(ValidationError::InvalidConfig {
            reason: reason.into(),
        })
    }
}

/// Result type alias for obsignal operations.
pub type SignalResult<T> = Result<T, SignalError>;
