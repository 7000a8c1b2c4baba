// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Collaborators the codec runs against: a clock, a sampled input and a
//! binary output line.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Binary state of the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    /// `High` when `value` is strictly above `threshold`.
    pub fn from_threshold(value: i32, threshold: i32) -> Self {
        if value > threshold {
            Level::High
        } else {
            Level::Low
        }
    }

    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Monotonic millisecond time source that can also block for a while.
pub trait Clock {
    fn now_ms(&self) -> u64;
    fn sleep_ms(&mut self, ms: u64);
}

/// Wall-clock implementation backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn sleep_ms(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Clock whose time only moves when slept on or advanced.
///
/// Clones share the same time, so a fake sampler can follow the clock that
/// drives the loop.
#[derive(Debug, Clone, Default)]
pub struct SimulatedClock {
    now: Arc<AtomicU64>,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for SimulatedClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }

    fn sleep_ms(&mut self, ms: u64) {
        self.advance(ms);
    }
}

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("sample feed closed")]
    Closed,

    #[error("ADC read failed: {0}")]
    Read(String),
}

/// Source of analog readings (millivolts once calibrated).
pub trait SignalSampler {
    fn read(&mut self) -> Result<i32, SampleError>;
}

/// Raw, uncalibrated ADC channel.
pub trait AdcChannel {
    fn read_raw(&mut self) -> Result<u16, SampleError>;
}

#[derive(Debug, Error)]
pub enum ActuatorError {
    #[error("failed to drive output line: {0}")]
    Write(String),
}

/// Binary output line.
pub trait Actuator {
    fn set(&mut self, level: Level) -> Result<(), ActuatorError>;
}
