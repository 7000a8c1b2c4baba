// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Configuration file support for morse-tx.
//!
//! Config is loaded from the `[morse-tx]` section of `morse-rs.toml`.
//! Default search order:
//! 1. Path specified via `--config` CLI argument
//! 2. `./morse-rs.toml`
//! 3. `~/.config/morse-rs/morse-rs.toml`
//! 4. `/etc/morse-rs/morse-rs.toml`

use serde::{Deserialize, Serialize};

use morse_app::{validate_log_level, ConfigFile};
use morse_core::Timing;

/// Top-level transmitter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TxConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Output line
    pub gpio: GpioConfig,
    /// Keying speed
    pub timing: Timing,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: Option<String>,
}

/// GPIO output line driving the lamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GpioConfig {
    /// BCM pin number
    pub pin: u8,
    /// Drive the pin low to turn the lamp on
    pub active_low: bool,
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            pin: 17,
            active_low: false,
        }
    }
}

impl TxConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_log_level(self.general.log_level.as_deref())?;
        self.timing
            .validate()
            .map_err(|e| format!("[timing] {}", e))?;
        Ok(())
    }

    /// Generate an example configuration wrapped under the `[morse-tx]`
    /// section header.
    pub fn example_toml() -> String {
        #[derive(serde::Serialize)]
        struct Wrapper {
            #[serde(rename = "morse-tx")]
            inner: TxConfig,
        }
        let example = TxConfig {
            general: GeneralConfig {
                log_level: Some("info".to_string()),
            },
            gpio: GpioConfig::default(),
            timing: Timing::default(),
        };
        toml::to_string_pretty(&Wrapper { inner: example }).unwrap_or_default()
    }
}

impl ConfigFile for TxConfig {
    fn section_key() -> &'static str {
        "morse-tx"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TxConfig::default();
        assert_eq!(config.gpio.pin, 17);
        assert!(!config.gpio.active_low);
        assert_eq!(config.timing.unit_ms, 200);
        assert!(config.general.log_level.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[general]
log_level = "debug"

[gpio]
pin = 22
active_low = true

[timing]
unit_ms = 100
dash_threshold_ms = 300
letter_gap_ms = 400
word_gap_ms = 700
"#;

        let config: TxConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, Some("debug".to_string()));
        assert_eq!(config.gpio.pin, 22);
        assert!(config.gpio.active_low);
        assert_eq!(config.timing.unit_ms, 100);
        assert_eq!(config.timing.sample_interval_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_example_toml_parses() {
        let example = TxConfig::example_toml();
        let table: toml::Table = toml::from_str(&example).unwrap();
        let section = toml::to_string(table.get("morse-tx").unwrap()).unwrap();
        let config: TxConfig = toml::from_str(&section).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_timing() {
        let mut config = TxConfig::default();
        config.timing.letter_gap_ms = 500;
        let err = config.validate().unwrap_err();
        assert!(err.starts_with("[timing]"), "{}", err);
    }

    #[test]
    fn test_validate_rejects_bad_log_level() {
        let mut config = TxConfig::default();
        config.general.log_level = Some("chatty".to_string());
        assert!(config.validate().is_err());
    }
}
