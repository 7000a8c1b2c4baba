// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Raw ADC reading to millivolt conversion.
//!
//! Scheme selection falls back from curve fitting to line fitting. When no
//! scheme has usable parameters the sampler keeps running on raw readings.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::io::{AdcChannel, SampleError, SignalSampler};

const MIN_BITWIDTH: u8 = 9;
const MAX_BITWIDTH: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationScheme {
    #[default]
    CurveFitting,
    LineFitting,
    None,
}

/// Calibration parameters for the sensor channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Preferred scheme
    pub scheme: CalibrationScheme,
    /// Curve-fitting polynomial, lowest order first, in raw ADC counts
    pub coefficients: Vec<f64>,
    /// Line fitting: millivolts at full-scale reading
    pub full_scale_mv: u32,
    /// Line fitting: ADC resolution in bits
    pub bitwidth: u8,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            scheme: CalibrationScheme::CurveFitting,
            coefficients: Vec::new(),
            full_scale_mv: 3100,
            bitwidth: 12,
        }
    }
}

impl CalibrationConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("[calibration].coefficients must be finite numbers".to_string());
        }
        if !(MIN_BITWIDTH..=MAX_BITWIDTH).contains(&self.bitwidth) {
            return Err(format!(
                "[calibration].bitwidth must be in range {}..={}",
                MIN_BITWIDTH, MAX_BITWIDTH
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Calibration {
    CurveFitting { coefficients: Vec<f64> },
    LineFitting { full_scale_mv: u32, max_raw: u32 },
    /// Degraded mode: readings pass through uncalibrated
    Raw,
}

impl Calibration {
    /// Pick the best scheme the config supports.
    pub fn select(config: &CalibrationConfig) -> Self {
        if config.scheme == CalibrationScheme::CurveFitting {
            info!("calibration scheme version is Curve Fitting");
            if let Some(calibration) = Self::curve_fitting(config) {
                info!("calibration success");
                return calibration;
            }
        }
        if config.scheme != CalibrationScheme::None {
            info!("calibration scheme version is Line Fitting");
            if let Some(calibration) = Self::line_fitting(config) {
                info!("calibration success");
                return calibration;
            }
        }
        warn!("calibration not available, continuing on raw ADC readings");
        Calibration::Raw
    }

    fn curve_fitting(config: &CalibrationConfig) -> Option<Self> {
        if config.coefficients.is_empty() || config.coefficients.iter().any(|c| !c.is_finite()) {
            return None;
        }
        Some(Calibration::CurveFitting {
            coefficients: config.coefficients.clone(),
        })
    }

    fn line_fitting(config: &CalibrationConfig) -> Option<Self> {
        if config.full_scale_mv == 0 || !(MIN_BITWIDTH..=MAX_BITWIDTH).contains(&config.bitwidth) {
            return None;
        }
        Some(Calibration::LineFitting {
            full_scale_mv: config.full_scale_mv,
            max_raw: (1u32 << config.bitwidth) - 1,
        })
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Calibration::Raw)
    }

    pub fn to_millivolts(&self, raw: u16) -> i32 {
        match self {
            Calibration::CurveFitting { coefficients } => {
                let x = f64::from(raw);
                let mv = coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c);
                mv.round() as i32
            }
            Calibration::LineFitting {
                full_scale_mv,
                max_raw,
            } => {
                let raw = u64::from(u32::from(raw).min(*max_raw));
                let (full_scale_mv, max_raw) = (u64::from(*full_scale_mv), u64::from(*max_raw));
                let mv = (raw * full_scale_mv + max_raw / 2) / max_raw;
                i32::try_from(mv).unwrap_or(i32::MAX)
            }
            Calibration::Raw => i32::from(raw),
        }
    }
}

/// [`SignalSampler`] over a raw ADC channel.
pub struct CalibratedSampler<A> {
    adc: A,
    calibration: Calibration,
}

impl<A: AdcChannel> CalibratedSampler<A> {
    pub fn new(adc: A, calibration: Calibration) -> Self {
        Self { adc, calibration }
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }
}

impl<A: AdcChannel> SignalSampler for CalibratedSampler<A> {
    fn read(&mut self) -> Result<i32, SampleError> {
        let raw = self.adc.read_raw()?;
        Ok(self.calibration.to_millivolts(raw))
    }
}
