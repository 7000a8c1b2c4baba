// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Configuration file support for morse-rx.
//!
//! Config is loaded from the `[morse-rx]` section of `morse-rs.toml`.
//! Default search order:
//! 1. Path specified via `--config` CLI argument
//! 2. `./morse-rs.toml`
//! 3. `~/.config/morse-rs/morse-rs.toml`
//! 4. `/etc/morse-rs/morse-rs.toml`

use serde::{Deserialize, Serialize};

use morse_app::{validate_log_level, ConfigFile};
use morse_core::word::DEFAULT_WORD_CAPACITY;
use morse_core::{CalibrationConfig, Timing};

/// Top-level receiver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RxConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Sample feed from the sensor board
    pub input: InputConfig,
    /// Keying speed
    pub timing: Timing,
    /// Readings above this many millivolts count as light on
    pub threshold_mv: i32,
    /// Raw reading to millivolt conversion
    pub calibration: CalibrationConfig,
    /// Word assembly
    pub word: WordConfig,
}

impl Default for RxConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            input: InputConfig::default(),
            timing: Timing::default(),
            threshold_mv: 110,
            calibration: CalibrationConfig::default(),
            word: WordConfig::default(),
        }
    }
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: Option<String>,
}

/// Where raw ADC readings come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Serial port path, or "-" for stdin
    pub path: String,
    /// Baud rate (serial only)
    pub baud: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: "-".to_string(),
            baud: 115_200,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordConfig {
    /// Maximum characters per word
    pub capacity: usize,
    /// Start a new word when full instead of stopping
    pub restart_when_full: bool,
}

impl Default for WordConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_WORD_CAPACITY,
            restart_when_full: false,
        }
    }
}

impl RxConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_log_level(self.general.log_level.as_deref())?;
        self.timing
            .validate()
            .map_err(|e| format!("[timing] {}", e))?;
        self.calibration.validate()?;

        if self.input.path.trim().is_empty() {
            return Err("[input].path must be a serial port path or '-'".to_string());
        }
        if self.input.path != "-" && self.input.baud == 0 {
            return Err("[input].baud must be > 0 for serial input".to_string());
        }
        if self.word.capacity == 0 {
            return Err("[word].capacity must be > 0".to_string());
        }
        Ok(())
    }

    /// Generate an example configuration wrapped under the `[morse-rx]`
    /// section header.
    pub fn example_toml() -> String {
        #[derive(serde::Serialize)]
        struct Wrapper {
            #[serde(rename = "morse-rx")]
            inner: RxConfig,
        }
        let example = RxConfig {
            general: GeneralConfig {
                log_level: Some("info".to_string()),
            },
            input: InputConfig {
                path: "/dev/ttyUSB0".to_string(),
                baud: 115_200,
            },
            ..RxConfig::default()
        };
        toml::to_string_pretty(&Wrapper { inner: example }).unwrap_or_default()
    }
}

impl ConfigFile for RxConfig {
    fn section_key() -> &'static str {
        "morse-rx"
    }
}
