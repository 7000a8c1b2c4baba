// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Plays a pulse schedule on an output line.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::encoder::Pulse;
use crate::io::{Actuator, ActuatorError, Clock, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitOutcome {
    Completed,
    /// Stopped between pulses
    Interrupted,
}

pub struct Keyer<A, C> {
    actuator: A,
    clock: C,
}

impl<A: Actuator, C: Clock> Keyer<A, C> {
    pub fn new(actuator: A, clock: C) -> Self {
        Self { actuator, clock }
    }

    /// Drive each pulse in order, then leave the line low.
    ///
    /// `stop` is checked before every pulse; timing is only as good as the
    /// clock's sleep granularity.
    pub fn transmit(
        &mut self,
        schedule: &[Pulse],
        stop: &AtomicBool,
    ) -> Result<TransmitOutcome, ActuatorError> {
        for pulse in schedule {
            if stop.load(Ordering::Relaxed) {
                self.actuator.set(Level::Low)?;
                return Ok(TransmitOutcome::Interrupted);
            }
            self.actuator.set(pulse.level)?;
            self.clock.sleep_ms(pulse.duration_ms);
        }
        self.actuator.set(Level::Low)?;
        Ok(TransmitOutcome::Completed)
    }

    pub fn into_inner(self) -> (A, C) {
        (self.actuator, self.clock)
    }
}
