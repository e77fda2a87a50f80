//! Terminal lifecycle management.
//!
//! This module handles terminal setup, restore, and panic hooks.
//! Terminal state is guaranteed to be restored on:
//! - Normal exit (via `Surface::release`)
//! - Drop of the surface
//! - Panic

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

/// The terminal capability the clock draws on.
///
/// The runtime only needs a ratatui `Terminal` to size and flush frames, and
/// a way to hand the terminal back when the session ends.
pub trait Surface {
    type Backend: Backend;

    fn terminal(&mut self) -> &mut Terminal<Self::Backend>;

    /// Restores the terminal. Must be idempotent.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be restored.
    fn release(&mut self) -> Result<()>;
}

/// Real terminal: raw mode + alternate screen on stdout.
pub struct CrosstermSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    released: bool,
}

impl CrosstermSurface {
    /// Installs the panic hook, then enters raw mode and the alternate screen.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be switched into raw mode.
    pub fn acquire() -> Result<Self> {
        install_panic_hook();
        let terminal = setup_terminal()?;
        Ok(Self {
            terminal,
            released: false,
        })
    }
}

impl Surface for CrosstermSurface {
    type Backend = CrosstermBackend<Stdout>;

    fn terminal(&mut self) -> &mut Terminal<Self::Backend> {
        &mut self.terminal
    }

    fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        restore_terminal()
    }
}

impl Drop for CrosstermSurface {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

/// Sets up the terminal for the clock.
///
/// - Enables raw mode
/// - Enters alternate screen
/// - Creates the terminal instance
///
/// Call `install_panic_hook()` before this to ensure terminal restore on panic.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restores terminal state.
///
/// - Shows the cursor
/// - Leaves alternate screen
/// - Disables raw mode
///
/// This function is idempotent and safe to call multiple times.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn restore_terminal() -> Result<()> {
    let _ = execute!(io::stdout(), Show);

    // Leave alternate screen (while still in raw mode)
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
///
/// Call this BEFORE `setup_terminal()` to ensure terminal restore on panic.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
