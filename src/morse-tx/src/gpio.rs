// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! GPIO output line for the lamp.

use rppal::gpio::{Gpio, OutputPin};
use tracing::info;

use morse_core::{Actuator, ActuatorError, DynResult, Level};

pub struct GpioLine {
    pin: OutputPin,
    active_low: bool,
}

impl GpioLine {
    /// Acquire BCM pin `bcm` as an output with the lamp off.
    pub fn open(bcm: u8, active_low: bool) -> DynResult<Self> {
        info!("Initializing GPIO {}", bcm);

        let gpio = Gpio::new().map_err(|e| format!("Open GPIO chip failed: {}", e))?;
        let pin = gpio
            .get(bcm)
            .map_err(|e| format!("Get GPIO line {} failed: {}", bcm, e))?;
        let pin = if active_low {
            pin.into_output_high()
        } else {
            pin.into_output_low()
        };

        Ok(Self { pin, active_low })
    }
}

impl Actuator for GpioLine {
    fn set(&mut self, level: Level) -> Result<(), ActuatorError> {
        if level.is_high() != self.active_low {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
        Ok(())
    }
}
