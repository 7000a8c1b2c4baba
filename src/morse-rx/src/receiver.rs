// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Letter-by-letter receive loop.

use std::sync::atomic::AtomicBool;

use thiserror::Error;
use tracing::info;

use morse_core::{Clock, Decoder, SampleError, SignalSampler, Timing, WordBuffer, WordOverflow};

use crate::config::RxConfig;

#[derive(Debug, Error)]
pub enum ReceiveError {
    #[error(transparent)]
    Sample(#[from] SampleError),

    #[error(transparent)]
    Overflow(#[from] WordOverflow),
}

#[derive(Debug, Clone, Copy)]
pub struct ReceiverSettings {
    pub timing: Timing,
    pub threshold_mv: i32,
    pub restart_when_full: bool,
}

impl From<&RxConfig> for ReceiverSettings {
    fn from(cfg: &RxConfig) -> Self {
        Self {
            timing: cfg.timing,
            threshold_mv: cfg.threshold_mv,
            restart_when_full: cfg.word.restart_when_full,
        }
    }
}

/// Decode letters into `word` until `stop` is raised or an error ends the run.
///
/// Each letter gets a fresh decoder session. A full word either ends the run
/// with [`WordOverflow`] or, with `restart_when_full`, is logged and replaced
/// by an empty one.
pub fn run_receiver<S, C>(
    sampler: &mut S,
    clock: &mut C,
    word: &mut WordBuffer,
    settings: &ReceiverSettings,
    stop: &AtomicBool,
) -> Result<(), ReceiveError>
where
    S: SignalSampler + ?Sized,
    C: Clock + ?Sized,
{
    loop {
        let mut decoder = Decoder::new(settings.timing, clock.now_ms());
        let Some(letter) = decoder.next_letter(sampler, clock, settings.threshold_mv, stop)? else {
            return Ok(());
        };
        info!("letter: {}", letter);

        if word.is_full() && settings.restart_when_full {
            let finished = word.take();
            info!("word complete: {}", finished);
        }
        word.append(letter)?;
        info!("word: {}", word.as_str());

        clock.sleep_ms(settings.timing.sample_interval_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morse_core::{Encoder, Level, Pulse, SimulatedClock};
    use std::sync::atomic::Ordering;

    const CLOSE_AFTER_MS: u64 = 3_000;

    /// Light sensor following a keying schedule; closes once it has been
    /// dark for a while after the schedule ends.
    struct Lamp {
        clock: SimulatedClock,
        edges: Vec<(u64, Level)>,
        end_ms: u64,
    }

    impl Lamp {
        fn new(clock: &SimulatedClock, pulses: &[Pulse]) -> Self {
            let mut edges = Vec::new();
            let mut t = clock.now_ms();
            for pulse in pulses {
                edges.push((t, pulse.level));
                t += pulse.duration_ms;
            }
            Self {
                clock: clock.clone(),
                edges,
                end_ms: t,
            }
        }
    }

    impl SignalSampler for Lamp {
        fn read(&mut self) -> Result<i32, SampleError> {
            let now = self.clock.now_ms();
            if now > self.end_ms + CLOSE_AFTER_MS {
                return Err(SampleError::Closed);
            }
            let lit = self
                .edges
                .iter()
                .take_while(|(t, _)| *t <= now && now < self.end_ms)
                .last()
                .is_some_and(|(_, level)| level.is_high());
            Ok(if lit { 480 } else { 35 })
        }
    }

    /// Letters separated by more than the letter gap.
    fn spaced(text: &str) -> Vec<Pulse> {
        let encoder = Encoder::default();
        let mut pulses = Vec::new();
        for c in text.chars() {
            pulses.extend(encoder.encode_char(c));
            pulses.push(Pulse::low(600));
        }
        pulses
    }

    fn settings(restart_when_full: bool) -> ReceiverSettings {
        ReceiverSettings {
            timing: Timing::default(),
            threshold_mv: 110,
            restart_when_full,
        }
    }

    #[test]
    fn test_receives_word_until_feed_closes() {
        let mut clock = SimulatedClock::new();
        let mut lamp = Lamp::new(&clock, &spaced("SOS"));
        let mut word = WordBuffer::new();
        let stop = AtomicBool::new(false);

        let result = run_receiver(&mut lamp, &mut clock, &mut word, &settings(false), &stop);
        assert!(matches!(result, Err(ReceiveError::Sample(SampleError::Closed))));
        assert_eq!(word.as_str(), "SOS");
    }

    #[test]
    fn test_full_word_is_an_error() {
        let mut clock = SimulatedClock::new();
        let mut lamp = Lamp::new(&clock, &spaced("HEY"));
        let mut word = WordBuffer::with_capacity(2);
        let stop = AtomicBool::new(false);

        let result = run_receiver(&mut lamp, &mut clock, &mut word, &settings(false), &stop);
        match result {
            Err(ReceiveError::Overflow(overflow)) => {
                assert_eq!(overflow.capacity, 2);
                assert_eq!(overflow.rejected, 'Y');
            }
            other => panic!("expected overflow, got {:?}", other),
        }
        assert_eq!(word.as_str(), "HE");
    }

    #[test]
    fn test_restart_when_full() {
        let mut clock = SimulatedClock::new();
        let mut lamp = Lamp::new(&clock, &spaced("HEY"));
        let mut word = WordBuffer::with_capacity(2);
        let stop = AtomicBool::new(false);

        let result = run_receiver(&mut lamp, &mut clock, &mut word, &settings(true), &stop);
        assert!(matches!(result, Err(ReceiveError::Sample(SampleError::Closed))));
        assert_eq!(word.as_str(), "Y");
    }

    #[test]
    fn test_restart_when_full_with_info_disabled() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let mut clock = SimulatedClock::new();
            let mut lamp = Lamp::new(&clock, &spaced("HEY"));
            let mut word = WordBuffer::with_capacity(2);
            let stop = AtomicBool::new(false);

            let result = run_receiver(&mut lamp, &mut clock, &mut word, &settings(true), &stop);
            assert!(matches!(result, Err(ReceiveError::Sample(SampleError::Closed))));
            assert_eq!(word.as_str(), "Y");
        });
    }

    #[test]
    fn test_stop_before_first_letter() {
        let mut clock = SimulatedClock::new();
        let mut lamp = Lamp::new(&clock, &spaced("E"));
        let mut word = WordBuffer::new();
        let stop = AtomicBool::new(false);
        stop.store(true, Ordering::Relaxed);

        run_receiver(&mut lamp, &mut clock, &mut word, &settings(false), &stop).unwrap();
        assert!(word.is_empty());
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn test_unknown_letters_are_kept() {
        let mut clock = SimulatedClock::new();
        // dot-dot-dash-dash has no entry in the table
        let mut pulses = Vec::new();
        for units in [1, 1, 3, 3] {
            pulses.push(Pulse::high(units * 200));
            pulses.push(Pulse::low(200));
        }
        pulses.push(Pulse::low(1000));
        pulses.extend(spaced("E"));
        let mut lamp = Lamp::new(&clock, &pulses);
        let mut word = WordBuffer::new();
        let stop = AtomicBool::new(false);

        let _ = run_receiver(&mut lamp, &mut clock, &mut word, &settings(false), &stop);
        assert_eq!(word.as_str(), "?E");
    }

    #[test]
    fn test_settings_from_config() {
        let mut cfg = RxConfig::default();
        cfg.threshold_mv = 300;
        cfg.word.restart_when_full = true;
        let settings = ReceiverSettings::from(&cfg);
        assert_eq!(settings.threshold_mv, 300);
        assert!(settings.restart_when_full);
        assert_eq!(settings.timing, Timing::default());
    }
}
