//! Easy2 handler: tracks the final response's headers, starts the transfer
//! state once a 2xx header block ends, and writes each body chunk to the
//! destination, which is opened on the first body byte.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str;

use crate::progress::{ProgressSink, TransferState};

/// Handler state for one streaming GET.
pub(super) struct StreamHandler<P> {
    dest: PathBuf,
    label: String,
    chunk_size: usize,
    pub(super) progress: P,
    /// Status and reason phrase of the most recent `HTTP/` line.
    pub(super) status: Option<u32>,
    pub(super) reason: String,
    pub(super) content_length: Option<u64>,
    file: Option<File>,
    pub(super) state: Option<TransferState>,
    pub(super) storage_error: Option<io::Error>,
}

impl<P: ProgressSink> StreamHandler<P> {
    pub(super) fn new(dest: PathBuf, label: String, chunk_size: usize, progress: P) -> Self {
        Self {
            dest,
            label,
            chunk_size: chunk_size.max(1),
            progress,
            status: None,
            reason: String::new(),
            content_length: None,
            file: None,
            state: None,
            storage_error: None,
        }
    }

    /// Creates (truncating) the destination and starts progress. Idempotent.
    /// Returns false if the file could not be created.
    pub(super) fn open_destination(&mut self) -> bool {
        if self.file.is_some() {
            return true;
        }
        match File::create(&self.dest) {
            Ok(f) => {
                let content_length = self.content_length;
                let state = self
                    .state
                    .get_or_insert_with(|| TransferState::new(content_length.filter(|&n| n > 0)));
                let total = state.total_bytes;
                tracing::debug!(dest = %self.dest.display(), ?total, "destination opened");
                self.file = Some(f);
                self.progress.begin(&self.label, total);
                true
            }
            Err(e) => {
                tracing::warn!("cannot create {}: {}", self.dest.display(), e);
                self.storage_error = Some(e);
                false
            }
        }
    }

    pub(super) fn is_open(&self) -> bool {
        self.file.is_some()
    }

    pub(super) fn bytes_written(&self) -> u64 {
        self.state.as_ref().map_or(0, |s| s.bytes_done)
    }

    fn is_success_status(&self) -> bool {
        matches!(self.status, Some(200..=299))
    }
}

/// Splits `HTTP/1.1 404 Not Found` into (404, "Not Found").
pub(super) fn parse_status_line(line: &str) -> (Option<u32>, String) {
    let mut parts = line.splitn(3, ' ');
    let _version = parts.next();
    let status = parts.next().and_then(|s| s.trim().parse::<u32>().ok());
    let reason = parts.next().unwrap_or("").trim().to_string();
    (status, reason)
}

impl<P: ProgressSink> curl::easy::Handler for StreamHandler<P> {
    fn header(&mut self, data: &[u8]) -> bool {
        let line = match str::from_utf8(data) {
            Ok(s) => s.trim_end(),
            Err(_) => return true,
        };
        if line.starts_with("HTTP/") {
            let (status, reason) = parse_status_line(line);
            self.status = status;
            self.reason = reason;
            self.content_length = None;
            tracing::debug!(status = ?self.status, "response status");
            return true;
        }
        if line.is_empty() {
            // End of one header block; redirects and 1xx blocks are skipped.
            // Trailers after the body must not restart the state.
            if self.is_success_status() && self.file.is_none() {
                let total = self.content_length.filter(|&n| n > 0);
                self.state = Some(TransferState::new(total));
            }
            return true;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                self.content_length = value.trim().parse::<u64>().ok();
            }
        }
        true
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, curl::easy::WriteError> {
        if data.is_empty() {
            return Ok(0);
        }
        if !self.open_destination() {
            return Ok(0);
        }
        // curl's buffer size is a hint; chunk here so progress moves in fixed steps.
        for chunk in data.chunks(self.chunk_size) {
            let file = match self.file.as_mut() {
                Some(f) => f,
                None => return Ok(0),
            };
            if let Err(e) = file.write_all(chunk) {
                tracing::warn!("write to {} failed: {}", self.dest.display(), e);
                self.storage_error = Some(e);
                return Ok(0);
            }
            let n = chunk.len() as u64;
            if let Some(ref mut state) = self.state {
                state.bytes_done += n;
                self.progress.advance(state, n);
            }
        }
        Ok(data.len())
    }
}
