//! Tracing setup: a compact stderr layer and a plain-text file layer in the
//! data directory, each with its own filter.
//!
//! `SNIPZ_LOG`, when set, drives both. Otherwise `-v` picks the stderr level and
//! the file always records at least `info`.

use std::fs::{self, OpenOptions};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

pub const LOG_ENV: &str = "SNIPZ_LOG";

pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

pub fn file_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 | 1 => "info",
        _ => "debug",
    }
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber. The returned guard must live until exit so
/// buffered file output is flushed. If the log file cannot be opened, only the
/// stderr layer is installed.
pub fn init(verbosity: u8, log_file: &Path) -> Option<WorkerGuard> {
    let file = log_file
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|_| OpenOptions::new().create(true).append(true).open(log_file));

    let (file_layer, guard) = match file {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .with_filter(filter(file_directive(verbosity)));
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {}", log_file.display(), e);
            (None, None)
        }
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .with_filter(filter(default_directive(verbosity)));

    // A second init (tests) is harmless.
    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    guard
}
