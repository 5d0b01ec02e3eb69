//! Download error type.

use std::path::PathBuf;

/// Why a download did not complete. Any bytes already written stay on disk.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The final response had a status of 400 or above.
    #[error("HTTP {status} {reason} for url: {url}")]
    Http {
        status: u32,
        reason: String,
        url: String,
    },
    /// Curl reported a failure (bad URL, DNS, connect, TLS, timeout, redirect loop).
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// The destination file could not be created or written.
    #[error("cannot write {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    pub fn is_http(&self) -> bool {
        matches!(self, DownloadError::Http { .. })
    }

    /// HTTP status of the failed response, if the failure was an HTTP error.
    pub fn status(&self) -> Option<u32> {
        match self {
            DownloadError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
