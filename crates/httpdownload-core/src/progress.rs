//! Progress reporting for a download (bytes done, rate, ETA).
//!
//! The downloader owns a [`TransferState`] and hands it to a [`ProgressSink`]
//! after every chunk it writes. [`TerminalProgress`] draws it with indicatif.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

const BAR_TEMPLATE: &str =
    "{msg:.bold.blue} {wide_bar} {bytes}/{total_bytes} {bytes_per_sec} {eta}";
const SPINNER_TEMPLATE: &str = "{spinner} {msg:.bold.blue} {bytes} {bytes_per_sec}";

/// Cumulative state of one transfer. Created when response headers arrive.
#[derive(Debug, Clone)]
pub struct TransferState {
    /// Expected size from `Content-Length`, if known and non-zero.
    pub total_bytes: Option<u64>,
    /// Bytes written to the destination so far.
    pub bytes_done: u64,
    /// When the response headers arrived.
    pub started: Instant,
}

impl TransferState {
    pub fn new(total_bytes: Option<u64>) -> Self {
        Self {
            total_bytes,
            bytes_done: 0,
            started: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Transfer rate in bytes per second (0 if no time has elapsed).
    pub fn bytes_per_sec(&self) -> f64 {
        let elapsed = self.elapsed_secs();
        if elapsed <= 0.0 {
            return 0.0;
        }
        self.bytes_done as f64 / elapsed
    }
}

/// Receives progress from the write loop. Every call happens synchronously
/// on the downloading thread.
pub trait ProgressSink {
    /// Response headers arrived; `total` is None when the size is unknown.
    fn begin(&mut self, label: &str, total: Option<u64>);
    /// A chunk of `chunk_len` bytes was written; `state` already includes it.
    fn advance(&mut self, state: &TransferState, chunk_len: u64);
    /// The body was fully received.
    fn finish(&mut self, state: &TransferState);
    /// The transfer failed after `begin`.
    fn abandon(&mut self, state: &TransferState);
}

/// Progress bar on stderr. Falls back to a spinner when the total is unknown.
#[derive(Default)]
pub struct TerminalProgress {
    bar: Option<ProgressBar>,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes shown on the bar, or None before `begin` and after it ends.
    pub fn position(&self) -> Option<u64> {
        self.bar.as_ref().map(|b| b.position())
    }
}

impl ProgressSink for TerminalProgress {
    fn begin(&mut self, label: &str, total: Option<u64>) {
        let bar = match total {
            Some(len) => {
                let bar = ProgressBar::new(len);
                let style = ProgressStyle::with_template(BAR_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("━╸ ");
                bar.set_style(style);
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                let style = ProgressStyle::with_template(SPINNER_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_spinner());
                bar.set_style(style);
                bar.enable_steady_tick(Duration::from_millis(100));
                bar
            }
        };
        bar.set_message(format!("Downloading {}", label));
        self.bar = Some(bar);
    }

    fn advance(&mut self, state: &TransferState, _chunk_len: u64) {
        if let Some(ref bar) = self.bar {
            bar.set_position(state.bytes_done);
        }
    }

    fn finish(&mut self, state: &TransferState) {
        if let Some(bar) = self.bar.take() {
            bar.set_position(state.bytes_done);
            bar.finish();
        }
    }

    fn abandon(&mut self, state: &TransferState) {
        if let Some(bar) = self.bar.take() {
            bar.set_position(state.bytes_done);
            bar.abandon();
        }
    }
}
