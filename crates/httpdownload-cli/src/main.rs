use httpdownload_core::logging;

mod cli;

fn main() {
    // Logging is best-effort; a failed init must not stop the download.
    let _ = logging::init_logging();

    std::process::exit(cli::run_from_args(std::env::args_os()));
}
