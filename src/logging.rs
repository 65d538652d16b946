//! Logging setup
//!
//! Installs a `tracing` subscriber with two layers: human-readable output on
//! stderr (quiet by default) and an append-only log file without colours.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Stderr filter directive for a `-v` count
///
/// Without `-v`, `RUST_LOG` is honoured and falls back to `warn`.
pub fn stderr_filter(verbosity: u8) -> EnvFilter {
    match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    }
}

/// Install the global subscriber
///
/// A log file that cannot be opened disables the file layer only. Calling
/// this twice is harmless; the second call does nothing.
pub fn init(verbosity: u8, log_file: Option<&Path>) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_filter(verbosity));

    let mut open_error = None;
    let file_layer = log_file.and_then(|path| match open_log_file(path) {
        Ok(file) => Some(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_filter(LevelFilter::INFO),
        ),
        Err(e) => {
            open_error = Some((path.display().to_string(), e));
            None
        }
    });

    let installed = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if let (true, Some((path, e))) = (installed, open_error) {
        warn!(path = %path, error = %e, "Cannot open log file; logging to stderr only");
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
