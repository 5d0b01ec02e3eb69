//! HTTP client settings for a single download.

/// Body chunk size in bytes; also the curl receive buffer size.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Redirect hops followed before giving up.
pub const DEFAULT_MAX_REDIRECTIONS: u32 = 30;

/// Settings applied to the curl handle. Nothing here is read from disk.
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Maximum bytes delivered per body callback.
    pub chunk_size: usize,
    /// Maximum redirects to follow.
    pub max_redirections: u32,
    /// Value of the `User-Agent` request header.
    pub user_agent: String,
    /// Let libcurl print its own diagnostics to stderr.
    pub verbose: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_redirections: DEFAULT_MAX_REDIRECTIONS,
            user_agent: format!("httpdownload/{}", env!("CARGO_PKG_VERSION")),
            verbose: false,
        }
    }
}
