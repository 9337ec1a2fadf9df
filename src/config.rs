//! # Session Configuration
//!
//! The three delays of the lifecycle protocol, exposed as configuration
//! instead of magic constants. Field names deserialize from the camelCase
//! options the presentation layer knows (`activationDelayMs`,
//! `closeDelayMs`).

use serde::Deserialize;
use std::time::Duration;

/// Timing configuration of a tab session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Simulated handshake latency when activating a tab, in milliseconds.
    pub activation_delay_ms: u64,
    /// Latency when deactivating. Defaults to the activation delay.
    pub deactivation_delay_ms: Option<u64>,
    /// Grace period between a settled close request and the tab's removal.
    pub close_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            activation_delay_ms: 1000,
            deactivation_delay_ms: None,
            close_delay_ms: 500,
        }
    }
}

impl SessionConfig {
    pub fn activation_delay(&self) -> Duration {
        Duration::from_millis(self.activation_delay_ms)
    }

    pub fn deactivation_delay(&self) -> Duration {
        Duration::from_millis(
            self.deactivation_delay_ms
                .unwrap_or(self.activation_delay_ms),
        )
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }

    /// Uniformly scaled delays, handy for fast tests and demos.
    pub fn with_delays_ms(activation: u64, close: u64) -> Self {
        Self {
            activation_delay_ms: activation,
            deactivation_delay_ms: None,
            close_delay_ms: close,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_protocol_constants() {
        let config = SessionConfig::default();
        assert_eq!(config.activation_delay(), Duration::from_millis(1000));
        assert_eq!(config.deactivation_delay(), Duration::from_millis(1000));
        assert_eq!(config.close_delay(), Duration::from_millis(500));
    }

    #[test]
    fn deserializes_recognized_options() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"activationDelayMs": 20, "closeDelayMs": 10}"#).unwrap();
        assert_eq!(config.activation_delay(), Duration::from_millis(20));
        assert_eq!(config.deactivation_delay(), Duration::from_millis(20));
        assert_eq!(config.close_delay(), Duration::from_millis(10));
    }

    #[test]
    fn deactivation_can_differ_from_activation() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"activationDelayMs": 20, "deactivationDelayMs": 5}"#).unwrap();
        assert_eq!(config.deactivation_delay(), Duration::from_millis(5));
    }
}
