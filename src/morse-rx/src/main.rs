// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

mod config;
mod feed;
mod receiver;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::{error, info};

use morse_app::{init_logging, ConfigFile};
use morse_core::{CalibratedSampler, Calibration, DynResult, SampleError, SystemClock, WordBuffer};

use config::RxConfig;
use feed::{spawn_feed, FeedSource};
use receiver::{run_receiver, ReceiveError, ReceiverSettings};

const PKG_DESCRIPTION: &str = concat!(env!("CARGO_PKG_NAME"), " - Morse light receiver");

#[derive(Debug, Parser)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = PKG_DESCRIPTION,
)]
struct Cli {
    /// Path to configuration file
    #[arg(long = "config", short = 'C', value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print example configuration and exit
    #[arg(long = "print-config")]
    print_config: bool,
    /// Sample feed: serial port path, or "-" for stdin
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    input: Option<String>,
    /// Serial baud rate
    #[arg(short = 'b', long = "baud")]
    baud: Option<u32>,
}

#[tokio::main]
async fn main() -> DynResult<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", RxConfig::example_toml());
        return Ok(());
    }

    let (mut cfg, config_path) = if let Some(ref path) = cli.config {
        let cfg = RxConfig::load_from_file(path)?;
        (cfg, Some(path.clone()))
    } else {
        RxConfig::load_from_default_paths()?
    };
    if let Some(input) = cli.input {
        cfg.input.path = input;
    }
    if let Some(baud) = cli.baud {
        cfg.input.baud = baud;
    }
    cfg.validate()
        .map_err(|e| format!("Invalid receiver configuration: {}", e))?;

    init_logging(cfg.general.log_level.as_deref());

    if let Some(ref path) = config_path {
        info!("Loaded configuration from {}", path.display());
    }

    let source = FeedSource::from_path(&cfg.input.path, cfg.input.baud);
    info!("Reading samples from {}", source);
    let (adc, feed_task) = spawn_feed(source)?;

    let calibration = Calibration::select(&cfg.calibration);
    let mut sampler = CalibratedSampler::new(adc, calibration);

    let settings = ReceiverSettings::from(&cfg);
    let capacity = cfg.word.capacity;
    info!(
        "Listening: threshold {} mV, dash >= {} ms, letter gap > {} ms",
        settings.threshold_mv, settings.timing.dash_threshold_ms, settings.timing.letter_gap_ms
    );

    let stop = Arc::new(AtomicBool::new(false));
    let loop_stop = stop.clone();
    let mut task = tokio::task::spawn_blocking(move || {
        let mut clock = SystemClock::new();
        let mut word = WordBuffer::with_capacity(capacity);
        let result = run_receiver(&mut sampler, &mut clock, &mut word, &settings, &loop_stop);
        (word, result)
    });

    let (word, result) = tokio::select! {
        res = &mut task => res?,
        _ = signal::ctrl_c() => {
            info!("Ctrl+C received, shutting down");
            stop.store(true, Ordering::Relaxed);
            // a replay read may be parked on the queue; closing it wakes the loop
            feed_task.abort();
            task.await?
        }
    };
    feed_task.abort();

    if !word.is_empty() {
        info!("Received: {}", word.as_str());
    }

    match result {
        Ok(()) => Ok(()),
        Err(ReceiveError::Sample(SampleError::Closed)) => {
            info!("Sample feed closed");
            Ok(())
        }
        Err(e) => {
            error!("Receiver stopped: {}", e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["morse-rx"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.input.is_none());
        assert!(cli.baud.is_none());
        assert!(!cli.print_config);
    }

    #[test]
    fn test_cli_overrides() {
        let cli =
            Cli::try_parse_from(["morse-rx", "-i", "/dev/ttyACM0", "--baud", "9600"]).unwrap();
        assert_eq!(cli.input.as_deref(), Some("/dev/ttyACM0"));
        assert_eq!(cli.baud, Some(9600));
    }

    #[test]
    fn test_cli_rejects_bad_baud() {
        assert!(Cli::try_parse_from(["morse-rx", "--baud", "fast"]).is_err());
    }
}
