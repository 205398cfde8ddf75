//! Logging Infrastructure
//!
//! Console output goes to stderr so command output on stdout stays clean.
//! With a log directory, a daily rotating file gets the same events.

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

/// Log file prefix inside the log directory
pub const LOG_FILE_PREFIX: &str = "barber-desk";

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug"); `RUST_LOG` takes precedence
/// * `json_format` - JSON console output instead of the pretty format
/// * `log_dir` - Optional directory for daily rotating log files
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let json_layer = json_format.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
    });

    let pretty_layer = (!json_format).then(|| {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_writer(std::io::stderr)
    });

    let file_layer = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(appender))
                    .with_filter(EnvFilter::new(level)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_logging_creates_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs");

        // Another test may have installed a global subscriber already
        let _ = init_logger("debug", false, Some(&log_dir));
        assert!(log_dir.is_dir());
    }
}
