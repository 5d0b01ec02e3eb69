//! CLI for httpdownload: one URL in, one file out.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use httpdownload_core::config::DownloadConfig;
use httpdownload_core::downloader::{download_to_path, DownloadReport};
use httpdownload_core::progress::TerminalProgress;
use httpdownload_core::url_model::{derive_filename, normalize_view_url};
use std::ffi::OsString;
use std::path::Path;

pub const USAGE: &str = "Usage: httpdownload <URL>";

/// Download a single file over HTTP(S) with live progress.
#[derive(Debug, Parser)]
#[command(name = "httpdownload", version)]
#[command(about = "Download a single file over HTTP(S) with live progress", long_about = None)]
pub struct Cli {
    /// HTTP/HTTPS URL to download. GitHub `/blob/` pages are fetched raw.
    pub url: String,
}

/// Parses arguments, runs the download and returns the process exit code.
///
/// Wrong argument count prints the usage line to stdout and returns 1 before
/// any network activity.
pub fn run_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return 0;
        }
        Err(e) => {
            tracing::debug!("argument error: {}", e);
            println!("{}", USAGE);
            return 1;
        }
    };

    let cwd = match std::env::current_dir() {
        Ok(d) => d,
        Err(e) => {
            println!("Failed to download file: cannot determine current directory: {}", e);
            return 1;
        }
    };

    match download(&cli.url, &cwd) {
        Ok((filename, report)) => {
            println!(
                "\nFile '{}' downloaded successfully to '{}'.",
                filename,
                report.path.display()
            );
            0
        }
        Err(e) => {
            println!("Failed to download file: {}", e);
            1
        }
    }
}

/// Normalizes `url`, derives the filename and downloads into `dir`.
pub fn download(url: &str, dir: &Path) -> Result<(String, DownloadReport)> {
    let url = normalize_view_url(url);
    let filename = derive_filename(&url);
    let dest = dir.join(&filename);
    tracing::debug!(%url, dest = %dest.display(), "resolved download target");

    let report = download_to_path(&url, &dest, &DownloadConfig::default(), TerminalProgress::new())?;
    Ok((filename, report))
}
