use std::thread;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tokio::sync::mpsc;

/// Sender side of the terminal input channel.
pub type InputSender = mpsc::UnboundedSender<Event>;

/// Receiver side of the terminal input channel, drained by the event loop.
pub type InputReceiver = mpsc::UnboundedReceiver<Event>;

pub fn input_channel() -> (InputSender, InputReceiver) {
    mpsc::unbounded_channel()
}

/// Spawns the thread that blocks on terminal input and forwards every event.
///
/// The thread is detached: it lives until the process exits, the receiver is
/// dropped, or reading from the terminal fails. In the last case the sender
/// is dropped and the event loop sees the channel close.
///
/// # Errors
/// Returns an error if the thread cannot be spawned.
pub fn spawn_input_forwarder(tx: InputSender) -> Result<()> {
    thread::Builder::new()
        .name("countdown-input".to_string())
        .spawn(move || forward_events(&tx))
        .context("Failed to spawn input thread")?;
    Ok(())
}

fn forward_events(tx: &InputSender) {
    loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    return;
                }
            }
            Err(err) => {
                tracing::warn!(%err, "terminal input polling failed");
                return;
            }
        }
    }
}
