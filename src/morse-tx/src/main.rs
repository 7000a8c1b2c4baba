// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

mod config;
mod gpio;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::{debug, info, warn};

use morse_app::{init_logging, ConfigFile};
use morse_core::encoder::schedule_duration_ms;
use morse_core::{table, DynResult, Encoder, Keyer, SystemClock, TransmitOutcome};

use config::TxConfig;
use gpio::GpioLine;

const PKG_DESCRIPTION: &str = concat!(env!("CARGO_PKG_NAME"), " - Morse light transmitter");

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
    /// BCM number of the output line
    #[arg(short = 'p', long = "pin")]
    pin: Option<u8>,
    /// How many times to send the message
    #[arg(
        value_name = "REPEAT",
        allow_negative_numbers = true,
        required_unless_present = "print_config"
    )]
    repeat: Option<String>,
    /// Text to send; characters outside A-Z, 0-9 and space are skipped
    #[arg(value_name = "MESSAGE", required_unless_present = "print_config")]
    message: Option<String>,
}

/// Parse a repeat count the way `atoi` does: leading whitespace, an optional
/// sign, then digits up to the first non-digit. Negative or digit-less input
/// counts as zero; values past `u32::MAX` saturate.
fn parse_repeat(raw: &str) -> u32 {
    let s = raw.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if negative || digits.is_empty() {
        return 0;
    }
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

#[tokio::main]
async fn main() -> DynResult<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", TxConfig::example_toml());
        return Ok(());
    }

    let (cfg, config_path) = if let Some(ref path) = cli.config {
        let cfg = TxConfig::load_from_file(path)?;
        (cfg, Some(path.clone()))
    } else {
        TxConfig::load_from_default_paths()?
    };
    cfg.validate()
        .map_err(|e| format!("Invalid transmitter configuration: {}", e))?;

    init_logging(cfg.general.log_level.as_deref());

    if let Some(ref path) = config_path {
        info!("Loaded configuration from {}", path.display());
    }

    let raw_repeat = cli.repeat.unwrap_or_default();
    let message = cli.message.unwrap_or_default();
    let repeat = parse_repeat(&raw_repeat);
    if raw_repeat.trim().parse::<u32>().ok() != Some(repeat) {
        warn!("Repeat count '{}' is not a non-negative integer, using {}", raw_repeat, repeat);
    }

    let skipped: String = message
        .chars()
        .filter(|&c| table::encode(c).is_none())
        .collect();
    if !skipped.is_empty() {
        debug!("Skipping unsupported characters: {:?}", skipped);
    }

    let pin = cli.pin.unwrap_or(cfg.gpio.pin);
    let line = GpioLine::open(pin, cfg.gpio.active_low)?;

    let schedule = Encoder::new(cfg.timing).encode(&message, repeat);
    info!(
        "Sending {:?} x{} on GPIO {} ({} pulses, {} ms)",
        message,
        repeat,
        pin,
        schedule.len(),
        schedule_duration_ms(&schedule)
    );

    let stop = Arc::new(AtomicBool::new(false));
    let keyer_stop = stop.clone();
    let mut keyer = Keyer::new(line, SystemClock::new());
    let mut task = tokio::task::spawn_blocking(move || keyer.transmit(&schedule, &keyer_stop));

    let outcome = tokio::select! {
        res = &mut task => res??,
        _ = signal::ctrl_c() => {
            info!("Ctrl+C received, stopping after the current pulse");
            stop.store(true, Ordering::Relaxed);
            task.await??
        }
    };

    match outcome {
        TransmitOutcome::Completed => info!("Transmission complete"),
        TransmitOutcome::Interrupted => warn!("Transmission interrupted"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeat_plain() {
        assert_eq!(parse_repeat("3"), 3);
        assert_eq!(parse_repeat("0"), 0);
        assert_eq!(parse_repeat("  12"), 12);
        assert_eq!(parse_repeat("+4"), 4);
    }

    #[test]
    fn test_parse_repeat_like_atoi() {
        assert_eq!(parse_repeat("5x"), 5);
        assert_eq!(parse_repeat("2 times"), 2);
        assert_eq!(parse_repeat("abc"), 0);
        assert_eq!(parse_repeat(""), 0);
        assert_eq!(parse_repeat("-2"), 0);
        assert_eq!(parse_repeat("99999999999"), u32::MAX);
    }

    #[test]
    fn test_cli_parses_positionals() {
        let cli = Cli::try_parse_from(["morse-tx", "2", "hello world"]).unwrap();
        assert_eq!(cli.repeat.as_deref(), Some("2"));
        assert_eq!(cli.message.as_deref(), Some("hello world"));
        assert!(cli.pin.is_none());
    }

    #[test]
    fn test_cli_accepts_negative_repeat() {
        let cli = Cli::try_parse_from(["morse-tx", "-1", "SOS"]).unwrap();
        assert_eq!(parse_repeat(cli.repeat.as_deref().unwrap()), 0);
    }

    #[test]
    fn test_cli_requires_message() {
        assert!(Cli::try_parse_from(["morse-tx", "2"]).is_err());
        assert!(Cli::try_parse_from(["morse-tx", "--print-config"]).is_ok());
    }
}
