//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

const LOG_ENV_VAR: &str = "OPEN_ATOM_LOG";
const LOG_FILE_NAME: &str = "open-atom.log";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/nautilus-open-atom/logs/`.
/// Log level is controlled by the `OPEN_ATOM_LOG` environment variable.
///
/// The file manager may already have a global subscriber installed when the
/// extension is loaded; in that case ours is skipped and events flow into the
/// host's subscriber instead.
///
/// # Examples
/// ```bash
/// OPEN_ATOM_LOG=debug nautilus
/// OPEN_ATOM_LOG=trace open-atom menu file:///tmp
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new("nautilus_open_atom=info,open_atom_app=info,warn"));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init();

    match installed {
        Ok(()) => tracing::debug!("Log directory: {}", log_dir.display()),
        Err(e) => tracing::debug!("Keeping existing subscriber: {}", e),
    }

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("nautilus-open-atom").join("logs"))
}

/// Get the log file path for the current day
pub fn get_current_log_file() -> Result<PathBuf> {
    let dir = get_log_directory()?;
    Ok(dir.join(LOG_FILE_NAME))
}
