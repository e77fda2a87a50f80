//! Full-screen block-digit clock.

pub mod effects;
pub mod events;
pub mod glyphs;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::{Context, Result};
use chrono::TimeDelta;
use countdown_core::config::Config;
pub use runtime::ClockRuntime;
pub use state::{Mode, Outcome};

use crate::state::{CountdownState, Session, Theme};
use crate::terminal::CrosstermSurface;

/// What to show and how to count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockOptions {
    pub duration: TimeDelta,
    pub mode: Mode,
    pub title: String,
}

/// Runs the clock on the real terminal until it completes or the user quits.
///
/// # Errors
/// Returns an error if stdout is not a terminal, the configured colors are
/// invalid, or the terminal cannot be set up or restored.
pub async fn run_clock(config: &Config, options: ClockOptions) -> Result<Outcome> {
    // The clock draws full-screen on stdout
    if !stdout().is_terminal() {
        anyhow::bail!("countdown requires a terminal on stdout.");
    }

    let theme = Theme::from_config(config)?;
    let session = Session::new(
        CountdownState::new(options.duration, options.mode),
        &options.title,
        config.keys,
        theme,
    );

    let surface = CrosstermSurface::acquire().context("Failed to setup terminal")?;

    let (input_tx, input_rx) = runtime::input_channel();
    runtime::spawn_input_forwarder(input_tx)?;

    let mut runtime = ClockRuntime::new(surface, session, input_rx);
    runtime.run().await
}
