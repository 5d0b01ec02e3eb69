//! Rewrite of `/blob/` view pages to `/raw/` content URLs.

use super::path::raw_path_span;

/// Host whose `/blob/` pages have a `/raw/` counterpart.
pub const SOURCE_HOST: &str = "github.com";

const VIEW_SEGMENT: &str = "/blob/";
const RAW_SEGMENT: &str = "/raw/";

/// Rewrites a source-hosting view URL to its raw-content equivalent.
///
/// Only URLs on [`SOURCE_HOST`] whose path contains `/blob/` are touched, and
/// only the first `/blob/` is replaced. The rest of the input is kept byte for
/// byte. Anything else, including input that does not parse, is returned
/// unchanged.
///
/// `https://github.com/user/repo/blob/main/file.txt` becomes
/// `https://github.com/user/repo/raw/main/file.txt`.
pub fn normalize_view_url(url: &str) -> String {
    let parsed = match url::Url::parse(url) {
        Ok(u) => u,
        Err(_) => return url.to_string(),
    };
    if parsed.host_str() != Some(SOURCE_HOST) {
        return url.to_string();
    }
    let span = raw_path_span(url);
    let path = &url[span.clone()];
    if !path.contains(VIEW_SEGMENT) {
        return url.to_string();
    }
    let mut rewritten = String::with_capacity(url.len());
    rewritten.push_str(&url[..span.start]);
    rewritten.push_str(&path.replacen(VIEW_SEGMENT, RAW_SEGMENT, 1));
    rewritten.push_str(&url[span.end..]);
    tracing::debug!(from = url, to = %rewritten, "rewrote view URL");
    rewritten
}
