//! Opt-in file logging.
//!
//! The terminal belongs to the clock, so nothing is ever logged to stdout or
//! stderr. Setting `COUNTDOWN_LOG` to an `EnvFilter` directive (for example
//! `info` or `countdown_tui=debug`) writes events to
//! `${COUNTDOWN_HOME}/countdown.log`.

use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LOG_FILE_NAME, paths};

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "COUNTDOWN_LOG";

/// Initializes file logging when `COUNTDOWN_LOG` is set.
///
/// Returns a `WorkerGuard` that must be held until exit so buffered events
/// are flushed. Returns `None` when logging is disabled.
///
/// # Errors
/// Returns an error if the directive is invalid, the log directory cannot be
/// created, or a global subscriber is already installed.
pub fn init() -> Result<Option<WorkerGuard>> {
    let Ok(directive) = std::env::var(LOG_ENV) else {
        return Ok(None);
    };

    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid {LOG_ENV} filter '{directive}'"))?;

    let log_dir = paths::countdown_home()?;
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(
        log_file = ?log_dir.join(LOG_FILE_NAME),
        %directive,
        "countdown logging initialized"
    );

    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    // One test drives both paths so the env mutations never race.
    #[test]
    fn test_init_disabled_and_invalid_directive() {
        let home = tempdir().unwrap();
        unsafe {
            std::env::set_var("COUNTDOWN_HOME", home.path());
            std::env::remove_var(LOG_ENV);
        }
        assert!(init().unwrap().is_none());

        unsafe {
            std::env::set_var(LOG_ENV, "countdown=loud");
        }
        let err = init().unwrap_err();
        assert!(format!("{err:#}").contains("Invalid COUNTDOWN_LOG filter 'countdown=loud'"));

        unsafe {
            std::env::remove_var(LOG_ENV);
        }
        assert!(!home.path().join(LOG_FILE_NAME).exists());
    }
}
