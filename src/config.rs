//! Bridge and monitor configuration
//!
//! [`BridgeSettings`] tunes the normalization constants. The defaults are the values existing
//! consumers were built against, so changing them changes what a compiled module observes.
//! [`MonitorConfig`] only affects the desktop monitor binary.

use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_JOYSTICK_DEADZONE: f32 = 0.04;
pub const DEFAULT_TRIGGER_REST_THRESHOLD: f32 = 0.05;

/// Where the trigger hysteresis remembers the last output
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriggerMemory {
    /// Read the previous value back from the destination buffer
    #[default]
    Buffer,
    /// Keep the previous value per slot inside the encoder and copy it out every poll
    Slot,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BridgeSettings {
    /// Radial deadzone for stick channels, also used to snap released triggers to 0.0.
    /// The default is an approximation carried over from existing consumers.
    pub joystick_deadzone: f32,

    /// Raw and previous trigger values below this are treated as "still at rest"
    pub trigger_rest_threshold: f32,

    pub trigger_memory: TriggerMemory,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            joystick_deadzone: DEFAULT_JOYSTICK_DEADZONE,
            trigger_rest_threshold: DEFAULT_TRIGGER_REST_THRESHOLD,
            trigger_memory: TriggerMemory::Buffer,
        }
    }
}

impl BridgeSettings {
    pub fn validate(&self) -> Result<(), BridgeError> {
        if !(0.0..1.0).contains(&self.joystick_deadzone) {
            return Err(BridgeError::ConfigError(format!(
                "joystick_deadzone must be in [0, 1), got {}",
                self.joystick_deadzone
            )));
        }
        if !self.trigger_rest_threshold.is_finite() || self.trigger_rest_threshold < 0.0 {
            return Err(BridgeError::ConfigError(format!(
                "trigger_rest_threshold must be a finite non-negative number, got {}",
                self.trigger_rest_threshold
            )));
        }
        Ok(())
    }

    pub fn from_toml(source: &str) -> Result<Self, BridgeError> {
        let settings: Self = toml::from_str(source)?;
        settings.validate()?;
        debug!("Parsed bridge settings: {:?}", settings);
        Ok(settings)
    }
}

/// Settings for the `padbridge-monitor` binary
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    pub poll_interval_ms: u64,
    pub stats_interval_s: i64,
    /// Rumble a pad briefly whenever its Mode button is pressed
    pub rumble_on_mode: bool,
    pub bridge: BridgeSettings,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 16, // ~60 Hz
            stats_interval_s: 10,
            rumble_on_mode: true,
            bridge: BridgeSettings::default(),
        }
    }
}

impl MonitorConfig {
    pub fn from_toml(source: &str) -> Result<Self, BridgeError> {
        let config: Self = toml::from_str(source)?;
        config.bridge.validate()?;
        if config.poll_interval_ms == 0 {
            return Err(BridgeError::ConfigError(
                "poll_interval_ms must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, BridgeError> {
        toml::to_string_pretty(self).map_err(|e| BridgeError::ConfigError(e.to_string()))
    }

    /// `<config_dir>/padbridge/config.toml`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|dir| dir.join("padbridge").join("config.toml"))
    }

    /// Load from `path`, falling back to defaults when the file does not exist
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, BridgeError> {
        match std::fs::read_to_string(path) {
            Ok(source) => {
                tracing::info!("Loading monitor configuration from {}", path.display());
                Self::from_toml(&source)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    "No configuration at {}, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(BridgeError::ConfigError(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Write the defaults to `path` unless a file is already there
    #[cfg(not(target_arch = "wasm32"))]
    pub fn ensure_default(path: &std::path::Path) -> Result<(), BridgeError> {
        if path.exists() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BridgeError::ConfigError(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, Self::default().to_toml()?).map_err(|e| {
            BridgeError::ConfigError(format!("Failed to write {}: {}", path.display(), e))
        })?;
        tracing::info!("Wrote default configuration to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_preserve_wire_constants() {
        let settings = BridgeSettings::default();
        assert_eq!(settings.joystick_deadzone, 0.04);
        assert_eq!(settings.trigger_rest_threshold, 0.05);
        assert_eq!(settings.trigger_memory, TriggerMemory::Buffer);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let settings = BridgeSettings::from_toml("trigger_memory = \"slot\"").unwrap();
        assert_eq!(settings.trigger_memory, TriggerMemory::Slot);
        assert_eq!(settings.joystick_deadzone, DEFAULT_JOYSTICK_DEADZONE);
    }

    #[test]
    fn rejects_out_of_range_deadzone() {
        let err = BridgeSettings::from_toml("joystick_deadzone = 1.0").unwrap_err();
        assert!(matches!(err, BridgeError::ConfigError(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = BridgeSettings::from_toml("joystick_deadzone = ").unwrap_err();
        assert!(matches!(err, BridgeError::ConfigParseError(_)));
    }

    #[test]
    fn monitor_config_survives_toml_round_trip() {
        let mut config = MonitorConfig::default();
        config.poll_interval_ms = 8;
        config.bridge.joystick_deadzone = 0.1;
        let text = config.to_toml().unwrap();
        assert_eq!(MonitorConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn monitor_config_reads_nested_bridge_table() {
        let config = MonitorConfig::from_toml(
            "poll_interval_ms = 4\n[bridge]\njoystick_deadzone = 0.08\n",
        )
        .unwrap();
        assert_eq!(config.poll_interval_ms, 4);
        assert_eq!(config.bridge.joystick_deadzone, 0.08);
        assert!(config.rumble_on_mode);
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        assert!(MonitorConfig::from_toml("poll_interval_ms = 0").is_err());
    }
}
