//! Tracing subscriber setup for the binary.
//!
//! Filtering follows `RUST_LOG`, falling back to [`DEFAULT_FILTER`].

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// No subscriber is installed.
    Off,
    /// Human-readable lines on stderr.
    Stderr,
    /// Plain lines appended to a file (truncated on start).
    File(PathBuf),
}

/// Failure to install the subscriber.
#[derive(Debug, Error)]
pub enum LogInitError {
    /// The log file could not be created.
    #[error("cannot create log file \"{}\": {source}", .path.display())]
    Io {
        /// Log file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A global subscriber is already installed.
    #[error("cannot install log subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Installs the global subscriber for `target`.
///
/// # Errors
///
/// Returns a [`LogInitError`] if the log file cannot be created or a global
/// subscriber already exists.
pub fn init(target: &LogTarget) -> Result<(), LogInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match target {
        LogTarget::Off => Ok(()),
        LogTarget::Stderr => {
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()?;
            Ok(())
        }
        LogTarget::File(path) => {
            let file = File::create(path).map_err(|source| LogInitError::Io {
                path: path.clone(),
                source,
            })?;
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_installs_nothing() {
        assert!(init(&LogTarget::Off).is_ok());
    }

    #[test]
    fn unwritable_log_file_is_io_error() {
        let target = LogTarget::File(PathBuf::from("no/such/dir/gridshed.log"));
        assert!(matches!(init(&target), Err(LogInitError::Io { .. })));
    }
}
