//! Filename extraction from URL path.

use std::ops::Range;

/// Name used when the URL path has no final segment.
pub const DEFAULT_FILENAME: &str = "downloaded_file";

/// Byte range of the path as written in `url`: after the authority, before
/// the first `?` or `#`. Empty when there is no path.
pub(super) fn raw_path_span(url: &str) -> Range<usize> {
    let end = url.find(|c: char| c == '?' || c == '#').unwrap_or(url.len());
    let head = &url[..end];
    let start = match head.find("://") {
        Some(i) => {
            let authority = i + 3;
            head[authority..].find('/').map_or(end, |p| authority + p)
        }
        None => head.find(':').map_or(0, |i| i + 1),
    };
    start..end
}

/// Returns the text after the last `/` of the URL path, exactly as written.
///
/// Returns `None` if the URL cannot be parsed or the final segment is empty.
/// Percent-escapes are neither decoded nor added.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    url::Url::parse(url).ok()?;
    let segment = url[raw_path_span(url)].rsplit('/').next()?;
    if segment.is_empty() {
        return None;
    }
    Some(segment.to_string())
}

/// Derives the local filename for a download, falling back to [`DEFAULT_FILENAME`].
///
/// - `https://example.com/a/b/file.tar.gz` → `file.tar.gz`
/// - `https://example.com/a/b/` → `downloaded_file`
pub fn derive_filename(url: &str) -> String {
    filename_from_url_path(url).unwrap_or_else(|| DEFAULT_FILENAME.to_string())
}
