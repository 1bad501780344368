// Utility functions for privilege checks, environment reads and logging

use libc; // For geteuid

/// Utility: Effective user id of this process
pub fn effective_uid() -> u32 {
    unsafe { libc::geteuid() }
}

/// Utility: Read an environment variable, treating unset and non-UTF-8 values alike
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Utility: Initialize the process-wide logger.
///
/// `RUST_LOG` takes precedence over the level picked from `debug`.
pub fn init_logging(debug: bool) {
    env_logger::Builder::new()
        .filter_level(if debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();
}
