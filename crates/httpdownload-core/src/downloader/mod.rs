//! Streaming single-file downloader.
//!
//! Issues one GET through libcurl, follows redirects, and streams the body to
//! the destination in chunks of at most `chunk_size` bytes. Progress is pushed
//! to a [`ProgressSink`] after every chunk. Nothing is retried and a partial
//! file is left in place when the transfer fails.

mod error;
mod handler;

pub use error::DownloadError;

use crate::config::DownloadConfig;
use crate::progress::{ProgressSink, TransferState};
use curl::easy::Easy2;
use handler::StreamHandler;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of a completed download.
#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub path: PathBuf,
    pub bytes_written: u64,
    /// Size announced by `Content-Length`, if any. Not checked against `bytes_written`.
    pub total_bytes: Option<u64>,
    pub elapsed: Duration,
}

/// Downloads `url` to `dest`, truncating any existing file.
///
/// The destination is only created once a 2xx response starts its body (or
/// ends without one), so an HTTP error leaves nothing behind. A failure mid-body leaves the partial file.
pub fn download_to_path<P: ProgressSink>(
    url: &str,
    dest: &Path,
    cfg: &DownloadConfig,
    progress: P,
) -> Result<DownloadReport, DownloadError> {
    let label = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut easy = Easy2::new(StreamHandler::new(
        dest.to_path_buf(),
        label,
        cfg.chunk_size,
        progress,
    ));
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(cfg.max_redirections)?;
    easy.fail_on_error(true)?;
    easy.suppress_connect_headers(true)?;
    easy.buffer_size(cfg.chunk_size)?;
    easy.useragent(&cfg.user_agent)?;
    easy.verbose(cfg.verbose)?;

    tracing::debug!(url, dest = %dest.display(), "starting GET");
    if let Err(e) = easy.perform() {
        let response_code = easy.response_code().unwrap_or(0);
        let h = easy.get_mut();
        if h.is_open() {
            if let Some(ref state) = h.state {
                h.progress.abandon(state);
            }
        }
        if let Some(source) = h.storage_error.take() {
            return Err(DownloadError::Storage {
                path: dest.to_path_buf(),
                source,
            });
        }
        if e.is_http_returned_error() {
            let status = h.status.unwrap_or(response_code);
            let reason = if h.reason.is_empty() {
                "Error".to_string()
            } else {
                h.reason.clone()
            };
            return Err(DownloadError::Http {
                status,
                reason,
                url: url.to_string(),
            });
        }
        return Err(DownloadError::Transport(e));
    }

    let h = easy.get_mut();
    // Empty bodies never reach `write`; make sure the file still exists.
    if !h.open_destination() {
        let source = h
            .storage_error
            .take()
            .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "open failed"));
        return Err(DownloadError::Storage {
            path: dest.to_path_buf(),
            source,
        });
    }

    let state = h.state.clone().unwrap_or_else(|| TransferState::new(None));
    h.progress.finish(&state);

    let report = DownloadReport {
        path: dest.to_path_buf(),
        bytes_written: h.bytes_written(),
        total_bytes: state.total_bytes,
        elapsed: state.started.elapsed(),
    };
    tracing::info!(
        bytes = report.bytes_written,
        rate_bytes_per_sec = state.bytes_per_sec() as u64,
        "download finished: {}",
        dest.display()
    );
    Ok(report)
}
