//! Demo configuration.
//!
//! Every field has a default matching the published page, so an empty JSON object is a complete
//! configuration. [`DemoConfig::from_json`] parses and validates an override document.

use device_host::KNOWN_PERMISSION_NAMES;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest threshold `IdleDetector.start` accepts.
pub const MIN_IDLE_THRESHOLD_MS: u32 = 60_000;

#[derive(Debug, Error)]
/// Failure to load a [`DemoConfig`].
pub enum ConfigError {
    /// The document is not valid JSON for [`DemoConfig`].
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value the demo cannot use.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        /// Offending field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Tunables for the service worker boot and the handlers.
pub struct DemoConfig {
    /// Service worker script URL.
    pub service_worker_script: String,
    /// Service worker registration scope.
    pub service_worker_scope: String,
    /// Icon shown on the come-back notification.
    pub notification_icon: String,
    /// Count set by the `Set App Badge` button.
    pub badge_count: u32,
    /// Duration of the single vibration.
    pub single_vibration_ms: u32,
    /// On/off pattern of the multiple vibration.
    pub vibration_sequence_ms: Vec<u32>,
    /// Idle detector threshold.
    pub idle_threshold_ms: u32,
    /// Tick period of the idle demo clock.
    pub clock_period_ms: u32,
    /// Permission names offered by the permissions demo.
    pub permission_names: Vec<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            service_worker_script: "/pwa-devices/service-worker.js".to_string(),
            service_worker_scope: "/pwa-devices/".to_string(),
            notification_icon: "/pwa-devices/images/logo.png".to_string(),
            badge_count: 12,
            single_vibration_ms: 200,
            vibration_sequence_ms: vec![200, 100, 200, 300, 600],
            idle_threshold_ms: MIN_IDLE_THRESHOLD_MS,
            clock_period_ms: 1_000,
            permission_names: KNOWN_PERMISSION_NAMES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl DemoConfig {
    /// Parses a JSON override document and validates the result.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the browser APIs would reject or the demo cannot render.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.idle_threshold_ms < MIN_IDLE_THRESHOLD_MS {
            return Err(ConfigError::Invalid {
                field: "idle_threshold_ms",
                reason: format!(
                    "{} is below the {MIN_IDLE_THRESHOLD_MS} ms minimum",
                    self.idle_threshold_ms
                ),
            });
        }
        if self.vibration_sequence_ms.is_empty() {
            return Err(ConfigError::Invalid {
                field: "vibration_sequence_ms",
                reason: "pattern is empty".to_string(),
            });
        }
        if self.clock_period_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "clock_period_ms",
                reason: "period must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}
