// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Fixed-speed timing shared by the encoder and decoder.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimingError {
    #[error("unit_ms must be > 0")]
    ZeroUnit,

    #[error("sample_interval_ms must be > 0")]
    ZeroSampleInterval,

    #[error(
        "thresholds must satisfy unit ({unit_ms} ms) < dash_threshold ({dash_threshold_ms} ms) \
         < letter_gap ({letter_gap_ms} ms) < word_gap ({word_gap_ms} ms)"
    )]
    OutOfOrder {
        unit_ms: u64,
        dash_threshold_ms: u64,
        letter_gap_ms: u64,
        word_gap_ms: u64,
    },
}

/// Pulse and gap durations, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Base quantum; a dot lasts one unit
    pub unit_ms: u64,
    /// Key-down periods shorter than this are dots, the rest dashes
    pub dash_threshold_ms: u64,
    /// Key-up period after which pending symbols are decoded as a letter
    pub letter_gap_ms: u64,
    /// Inter-word pause; validated but not used by the decoder
    pub word_gap_ms: u64,
    /// Delay between sensor polls
    pub sample_interval_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            unit_ms: 200,
            dash_threshold_ms: 600,
            letter_gap_ms: 800,
            word_gap_ms: 1400,
            sample_interval_ms: 100,
        }
    }
}

impl Timing {
    /// Duration of `n` units.
    pub fn units(&self, n: u64) -> u64 {
        self.unit_ms.saturating_mul(n)
    }

    pub fn validate(&self) -> Result<(), TimingError> {
        if self.unit_ms == 0 {
            return Err(TimingError::ZeroUnit);
        }
        if self.sample_interval_ms == 0 {
            return Err(TimingError::ZeroSampleInterval);
        }
        let ordered = self.unit_ms < self.dash_threshold_ms
            && self.dash_threshold_ms < self.letter_gap_ms
            && self.letter_gap_ms < self.word_gap_ms;
        if !ordered {
            return Err(TimingError::OutOfOrder {
                unit_ms: self.unit_ms,
                dash_threshold_ms: self.dash_threshold_ms,
                letter_gap_ms: self.letter_gap_ms,
                word_gap_ms: self.word_gap_ms,
            });
        }
        Ok(())
    }
}
