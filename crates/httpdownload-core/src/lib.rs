pub mod config;
pub mod logging;

pub mod downloader;
pub mod progress;
pub mod url_model;
