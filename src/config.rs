//! Registry configuration.

use serde::{Deserialize, Serialize};

use crate::error::{SignalError, SignalResult};

/// Tunables for a [`SignalHandler`](crate::SignalHandler).
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use obsignal::SignalHandlerConfig;
///
/// let cfg = SignalHandlerConfig::from_json(r#"{ "max_signals": 64 }"#).unwrap();
/// assert_eq!(cfg.max_signals, Some(64));
/// assert_eq!(cfg.max_name_len, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalHandlerConfig {
    /// Cap on distinct signal names. `None` means unbounded.
    pub max_signals: Option<usize>,
    /// Longest accepted signal name, in bytes.
    pub max_name_len: usize,
    /// Initial observer-list capacity for each new channel.
    pub observer_capacity: usize,
}

impl Default for SignalHandlerConfig {
    fn default() -> Self {
        Self {
            max_signals: None,
            max_name_len: 256,
            observer_capacity: 4,
        }
    }
}

impl SignalHandlerConfig {
    /// Parses a configuration from JSON and validates it.
    pub fn from_json(json: &str) -> SignalResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| SignalError::invalid_config(format!("malformed config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects configurations under which no signal could ever be registered.
    pub fn validate(&self) -> SignalResult<()> {
        if self.max_name_len == 0 {
            return Err(SignalError::invalid_config("max_name_len must be non-zero"));
        }
        if self.max_signals == Some(0) {
            return Err(SignalError::invalid_config("max_signals must be non-zero when set"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SignalHandlerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_name_len_rejected() {
        let cfg = SignalHandlerConfig {
            max_name_len: 0,
            ..SignalHandlerConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_zero_signal_cap_rejected() {
        let cfg = SignalHandlerConfig {
            max_signals: Some(0),
            ..SignalHandlerConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let cfg = SignalHandlerConfig::from_json(r#"{ "observer_capacity": 16 }"#).unwrap();
        assert_eq!(cfg.observer_capacity, 16);
        assert_eq!(cfg.max_signals, None);
    }

    #[test]
    fn test_from_json_malformed() {
        let err = SignalHandlerConfig::from_json("{ not json").unwrap_err();
        assert!(format!("{err}").contains("malformed config"));
    }

    #[test]
    fn test_from_json_invalid_values() {
        assert!(SignalHandlerConfig::from_json(r#"{ "max_name_len": 0 }"#).is_err());
    }
}
