//! URL rewriting and filename derivation.
//!
//! Turns source-hosting "view" URLs into raw-content URLs and picks the local
//! filename a download is saved under.

mod normalize;
mod path;

pub use normalize::{normalize_view_url, SOURCE_HOST};
pub use path::{derive_filename, filename_from_url_path, DEFAULT_FILENAME};
