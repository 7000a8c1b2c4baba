// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

pub mod calibration;
pub mod decoder;
pub mod encoder;
pub mod io;
pub mod keyer;
pub mod symbol;
pub mod table;
pub mod timing;
pub mod word;

pub type DynResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub use calibration::{CalibratedSampler, Calibration, CalibrationConfig, CalibrationScheme};
pub use decoder::{Decoder, DecoderState};
pub use encoder::{Encoder, Pulse};
pub use io::{
    Actuator, ActuatorError, AdcChannel, Clock, Level, SampleError, SignalSampler,
    SimulatedClock, SystemClock,
};
pub use keyer::{Keyer, TransmitOutcome};
pub use symbol::{MorseCode, MorseSymbol};
pub use timing::{Timing, TimingError};
pub use word::{WordBuffer, WordOverflow};
