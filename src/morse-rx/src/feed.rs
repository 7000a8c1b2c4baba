// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Raw ADC sample feed.
//!
//! The sensor board streams one reading per line, either as a bare number or
//! as a log line ending in the number (`... Raw Data: 1234`).
//!
//! A serial port is live: the reader task keeps only the latest reading in a
//! `watch` channel and the decode loop samples it. Stdin is treated as a
//! recorded capture: lines are queued and each poll consumes exactly one, so
//! a capture replays at the rate it was recorded.

use std::fmt;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, error, info, warn};

use morse_core::{AdcChannel, DynResult, SampleError};

/// Queued lines a capture may run ahead of the decode loop.
const REPLAY_QUEUE_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Stdin,
    Serial { path: String, baud: u32 },
}

impl FeedSource {
    /// `"-"` selects stdin, anything else is a serial port path.
    pub fn from_path(path: &str, baud: u32) -> Self {
        if path == "-" {
            FeedSource::Stdin
        } else {
            FeedSource::Serial {
                path: path.to_string(),
                baud,
            }
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Stdin => write!(f, "stdin"),
            FeedSource::Serial { path, baud } => write!(f, "serial {} @ {} baud", path, baud),
        }
    }
}

/// What the reader task hands to the decode loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    Sample(u16),
    /// The underlying reader failed; no more samples follow.
    Failed(String),
}

/// Extract the reading from one feed line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<u16>, String> {
    let Some(token) = line.split_whitespace().last() else {
        return Ok(None);
    };
    let token = token.trim_end_matches(|c: char| c == ',' || c == ';');
    token
        .parse::<u16>()
        .map(Some)
        .map_err(|e| format!("invalid reading '{}': {}", token, e))
}

/// Open `source` and start forwarding readings. Failing to open the port is
/// reported to the caller; later read errors reach the decode loop as
/// [`SampleError::Read`].
pub fn spawn_feed(source: FeedSource) -> DynResult<(FeedAdc, JoinHandle<()>)> {
    let label = source.to_string();
    match source {
        FeedSource::Stdin => Ok(spawn_replay(tokio::io::stdin(), label)),
        FeedSource::Serial { path, baud } => {
            let port = tokio_serial::new(&path, baud)
                .open_native_async()
                .map_err(|e| format!("Open serial port {} failed: {}", path, e))?;
            Ok(spawn_live(port, label))
        }
    }
}

/// Forward the latest reading from `reader`, dropping any the loop misses.
pub fn spawn_live<R>(reader: R, label: String) -> (FeedAdc, JoinHandle<()>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = watch::channel(None);
    let handle = tokio::spawn(pump(reader, FeedSink::Live(tx), label));
    (FeedAdc::Live(WatchAdc::new(rx)), handle)
}

/// Queue every reading from `reader`; one is consumed per ADC read.
pub fn spawn_replay<R>(reader: R, label: String) -> (FeedAdc, JoinHandle<()>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(REPLAY_QUEUE_LEN);
    let handle = tokio::spawn(pump(reader, FeedSink::Replay(tx), label));
    (FeedAdc::Replay(QueueAdc::new(rx)), handle)
}

enum FeedSink {
    Live(watch::Sender<Option<FeedEvent>>),
    Replay(mpsc::Sender<FeedEvent>),
}

impl FeedSink {
    /// Returns `false` once the decode side has gone away.
    async fn send(&self, event: FeedEvent) -> bool {
        match self {
            FeedSink::Live(tx) => tx.send(Some(event)).is_ok(),
            FeedSink::Replay(tx) => tx.send(event).await.is_ok(),
        }
    }
}

async fn pump<R>(reader: R, sink: FeedSink, label: String)
where
    R: AsyncRead + Unpin,
{
    info!("Sample feed started ({})", label);
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => {
                warn!("Sample feed closed ({})", label);
                break;
            }
            Ok(_) => {
                // Line noise at boot or a wrong baud rate is not valid UTF-8
                let line = String::from_utf8_lossy(&buf);
                match parse_line(&line) {
                    Ok(Some(raw)) => {
                        if !sink.send(FeedEvent::Sample(raw)).await {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => debug!("Ignoring feed line: {}", e),
                }
            }
            Err(e) => {
                error!("Sample feed read error ({}): {}", label, e);
                sink.send(FeedEvent::Failed(e.to_string())).await;
                break;
            }
        }
    }
}

fn event_to_raw(event: FeedEvent) -> Result<u16, SampleError> {
    match event {
        FeedEvent::Sample(raw) => Ok(raw),
        FeedEvent::Failed(e) => Err(SampleError::Read(e)),
    }
}

/// [`AdcChannel`] reading the latest value published by a live feed.
///
/// Reads as 0 until the first sample arrives. After the feed closes the last
/// value is returned once more, then [`SampleError::Closed`].
pub struct WatchAdc {
    rx: watch::Receiver<Option<FeedEvent>>,
    drained: bool,
}

impl WatchAdc {
    pub fn new(rx: watch::Receiver<Option<FeedEvent>>) -> Self {
        Self { rx, drained: false }
    }
}

impl AdcChannel for WatchAdc {
    fn read_raw(&mut self) -> Result<u16, SampleError> {
        if self.rx.has_changed().is_err() {
            if self.drained {
                return Err(SampleError::Closed);
            }
            self.drained = true;
        }
        match self.rx.borrow_and_update().clone() {
            None => Ok(0),
            Some(event) => event_to_raw(event),
        }
    }
}

/// [`AdcChannel`] consuming one queued reading per call.
///
/// Blocks until the next line is available, so it must run off the async
/// runtime (the decode loop lives on a blocking task).
pub struct QueueAdc {
    rx: mpsc::Receiver<FeedEvent>,
}

impl QueueAdc {
    pub fn new(rx: mpsc::Receiver<FeedEvent>) -> Self {
        Self { rx }
    }
}

impl AdcChannel for QueueAdc {
    fn read_raw(&mut self) -> Result<u16, SampleError> {
        match self.rx.blocking_recv() {
            Some(event) => event_to_raw(event),
            None => Err(SampleError::Closed),
        }
    }
}

pub enum FeedAdc {
    Live(WatchAdc),
    Replay(QueueAdc),
}

impl AdcChannel for FeedAdc {
    fn read_raw(&mut self) -> Result<u16, SampleError> {
        match self {
            FeedAdc::Live(adc) => adc.read_raw(),
            FeedAdc::Replay(adc) => adc.read_raw(),
        }
    }
}
