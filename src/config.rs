//! Engine configuration
//!
//! Settings that apply to the registry as a whole rather than to a single
//! notification: the visible-capacity limit and the default auto-dismiss
//! durations. Per-notification settings live in
//! [`NotificationConfig`](crate::notifications::types::NotificationConfig).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Registry-wide configuration.
///
/// Durations are stored in milliseconds so the struct round-trips cleanly
/// through serde without a custom `Duration` representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of simultaneously visible notifications. Inserting
    /// beyond this evicts the oldest visible entry.
    pub max_visible: usize,

    /// Auto-dismiss duration applied when a notification does not specify
    /// its own.
    pub default_duration_ms: u64,

    /// Auto-dismiss duration applied to error notifications without an
    /// explicit duration. Errors get longer to be read.
    pub error_duration_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_visible: 3,
            default_duration_ms: 4000,
            error_duration_ms: 6000,
        }
    }
}

impl EngineConfig {
    /// Override the visible-capacity limit.
    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = max_visible;
        self
    }

    /// Default auto-dismiss duration as a [`Duration`].
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    /// Error auto-dismiss duration as a [`Duration`].
    pub fn error_duration(&self) -> Duration {
        Duration::from_millis(self.error_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = EngineConfig::default();
        assert_eq!(config.max_visible, 3);
        assert_eq!(config.default_duration(), Duration::from_millis(4000));
        assert_eq!(config.error_duration(), Duration::from_millis(6000));
    }

    #[test]
    fn test_with_max_visible() {
        let config = EngineConfig::default().with_max_visible(5);
        assert_eq!(config.max_visible, 5);
    }

    #[test]
    fn test_partial_deserialization_falls_back_to_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"max_visible": 1}"#)
            .expect("partial config should deserialize");
        assert_eq!(config.max_visible, 1);
        assert_eq!(config.default_duration_ms, 4000);
    }
}
