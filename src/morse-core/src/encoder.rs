// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Text to keying schedule.
//!
//! The encoder only produces [`Pulse`]s; playing them against a real line is
//! the job of [`crate::keyer::Keyer`].

use crate::io::Level;
use crate::table;
use crate::timing::Timing;

const INTER_SYMBOL_UNITS: u64 = 1;
// Added after the inter-symbol gap that follows the last symbol.
const INTER_LETTER_UNITS: u64 = 3;
const WORD_GAP_UNITS: u64 = 7;
const REPEAT_GAP_UNITS: u64 = 7;

/// Hold the line at `level` for `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub level: Level,
    pub duration_ms: u64,
}

impl Pulse {
    pub const fn high(duration_ms: u64) -> Self {
        Self {
            level: Level::High,
            duration_ms,
        }
    }

    pub const fn low(duration_ms: u64) -> Self {
        Self {
            level: Level::Low,
            duration_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    timing: Timing,
}

impl Encoder {
    pub fn new(timing: Timing) -> Self {
        Self { timing }
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Schedule for a single character, including its trailing gap.
    /// Characters outside the table yield an empty schedule.
    pub fn encode_char(&self, c: char) -> Vec<Pulse> {
        let mut pulses = Vec::new();
        self.push_char(c, &mut pulses);
        pulses
    }

    /// Schedule for `message` sent `repeat` times.
    pub fn encode(&self, message: &str, repeat: u32) -> Vec<Pulse> {
        let mut pulses = Vec::new();
        for r in 0..repeat {
            for c in message.chars() {
                self.push_char(c, &mut pulses);
            }
            if r + 1 < repeat {
                pulses.push(Pulse::low(self.timing.units(REPEAT_GAP_UNITS)));
            }
        }
        pulses
    }

    fn push_char(&self, c: char, pulses: &mut Vec<Pulse>) {
        let Some(code) = table::encode(c) else {
            return;
        };

        if code.is_word_separator() {
            pulses.push(Pulse::low(self.timing.units(WORD_GAP_UNITS)));
            return;
        }

        for symbol in code.symbols() {
            pulses.push(Pulse::high(self.timing.units(symbol.units())));
            pulses.push(Pulse::low(self.timing.units(INTER_SYMBOL_UNITS)));
        }
        pulses.push(Pulse::low(self.timing.units(INTER_LETTER_UNITS)));
    }
}

/// Total time a schedule takes to play.
pub fn schedule_duration_ms(pulses: &[Pulse]) -> u64 {
    pulses
        .iter()
        .fold(0, |total, p| total.saturating_add(p.duration_ms))
}

/// Total key-down time of a schedule.
pub fn on_time_ms(pulses: &[Pulse]) -> u64 {
    pulses
        .iter()
        .filter(|p| p.level.is_high())
        .map(|p| p.duration_ms)
        .sum()
}
