// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Timing-based Morse decoder for a binary light channel.
//!
//! The decoder is fed timestamped on/off observations. A falling edge closes
//! a key-down period, which is classified as a dot or a dash by its length.
//! Once the line has stayed dark for longer than the letter gap, the pending
//! symbols are looked up and one character is returned.
//!
//! Word gaps are not detected: callers assemble words by concatenating the
//! letters they receive.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::io::{Clock, Level, SampleError, SignalSampler};
use crate::symbol::{format_symbols, MorseSymbol};
use crate::table;
use crate::timing::Timing;

/// Pending symbols kept per letter; longer runs are dropped.
pub const SYMBOL_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// No symbols pending
    Idle,
    /// At least one symbol recorded for the current letter
    Accumulating,
}

#[derive(Debug, Clone, Copy)]
struct SymbolBuffer {
    symbols: [MorseSymbol; SYMBOL_CAPACITY],
    len: usize,
}

impl SymbolBuffer {
    const fn new() -> Self {
        Self {
            symbols: [MorseSymbol::Dot; SYMBOL_CAPACITY],
            len: 0,
        }
    }

    fn push(&mut self, symbol: MorseSymbol) -> bool {
        if self.len == SYMBOL_CAPACITY {
            return false;
        }
        self.symbols[self.len] = symbol;
        self.len += 1;
        true
    }

    fn as_slice(&self) -> &[MorseSymbol] {
        &self.symbols[..self.len]
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn clear(&mut self) {
        self.len = 0;
    }
}

pub struct Decoder {
    timing: Timing,
    last_level: Level,
    last_transition_ms: u64,
    pending: SymbolBuffer,
}

impl Decoder {
    /// Start a session with the line assumed dark since `now_ms`.
    pub fn new(timing: Timing, now_ms: u64) -> Self {
        Self {
            timing,
            last_level: Level::Low,
            last_transition_ms: now_ms,
            pending: SymbolBuffer::new(),
        }
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn state(&self) -> DecoderState {
        if self.pending.is_empty() {
            DecoderState::Idle
        } else {
            DecoderState::Accumulating
        }
    }

    pub fn pending(&self) -> &[MorseSymbol] {
        self.pending.as_slice()
    }

    /// Feed one observation. Returns a character once a letter gap closes a
    /// non-empty symbol run.
    pub fn poll(&mut self, now_ms: u64, level: Level) -> Option<char> {
        if level != self.last_level {
            if self.last_level == Level::High {
                let duration = now_ms.saturating_sub(self.last_transition_ms);
                self.record(self.classify(duration), duration);
            }
            self.last_transition_ms = now_ms;
            self.last_level = level;
        }

        let dark_for = now_ms.saturating_sub(self.last_transition_ms);
        if level == Level::Low && dark_for > self.timing.letter_gap_ms && !self.pending.is_empty() {
            let letter = table::decode(self.pending.as_slice());
            debug!(
                "decoded {} as '{}' after {} ms dark",
                format_symbols(self.pending.as_slice()),
                letter,
                dark_for
            );
            self.pending.clear();
            return Some(letter);
        }
        None
    }

    /// Poll `sampler` until one letter is decoded.
    ///
    /// Readings above `threshold` count as light on. Returns `Ok(None)` if
    /// `stop` is raised before a letter completes.
    pub fn next_letter<S, C>(
        &mut self,
        sampler: &mut S,
        clock: &mut C,
        threshold: i32,
        stop: &AtomicBool,
    ) -> Result<Option<char>, SampleError>
    where
        S: SignalSampler + ?Sized,
        C: Clock + ?Sized,
    {
        loop {
            if stop.load(Ordering::Relaxed) {
                return Ok(None);
            }
            let level = Level::from_threshold(sampler.read()?, threshold);
            if let Some(letter) = self.poll(clock.now_ms(), level) {
                return Ok(Some(letter));
            }
            clock.sleep_ms(self.timing.sample_interval_ms);
        }
    }

    fn classify(&self, duration_ms: u64) -> MorseSymbol {
        if duration_ms < self.timing.dash_threshold_ms {
            MorseSymbol::Dot
        } else {
            MorseSymbol::Dash
        }
    }

    fn record(&mut self, symbol: MorseSymbol, duration_ms: u64) {
        match symbol {
            MorseSymbol::Dot => debug!("dot detected ({} ms)", duration_ms),
            MorseSymbol::Dash => debug!("dash detected ({} ms)", duration_ms),
        }
        if !self.pending.push(symbol) {
            warn!(
                "symbol buffer full ({} symbols), dropping {}",
                SYMBOL_CAPACITY, symbol
            );
        }
    }
}
