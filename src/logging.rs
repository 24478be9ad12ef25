//! Log subscriber setup for the CLI.
//!
//! Library code only emits `tracing` events; the binary decides where they
//! go. By default log lines are written to a file that is truncated on each
//! run, and `--debug` lowers the level so mesh sizes are recorded too.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{DecalError, Result};

/// Default log file, relative to the working directory.
pub const DEFAULT_LOGFILE: &str = "process.log";

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the level chosen by `debug`. Passing no log file
/// sends log lines to stderr instead.
pub fn init(debug: bool, logfile: Option<&Path>) -> Result<()> {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match logfile {
        Some(path) => {
            let file = File::create(path).map_err(|e| DecalError::Io {
                path: path.to_path_buf(),
                message: format!("Failed to create log file: {}", e),
            })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| DecalError::Logging {
        message: e.to_string(),
    })
}
