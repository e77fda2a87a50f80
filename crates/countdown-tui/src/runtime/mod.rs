//! Clock runtime - owns the surface, runs the event loop, executes effects.
//!
//! This is the side-effect boundary: the reducer in `update` stays pure and
//! returns effects; this module draws, manages timers and exits.
//!
//! ## Event sources
//!
//! Each iteration blocks on three sources and handles exactly one event:
//! - terminal input, forwarded by a detached thread over an unbounded channel
//! - the tick emitter, a `tokio::time::Interval` first firing one tick after start
//! - the deadline emitter, a one-shot `Sleep` (count-down only)
//!
//! Emitters live in `Option`s owned by the runtime. Pausing drops them;
//! resuming builds fresh ones from the current time.

mod input;


use std::future;
use std::pin::Pin;

use anyhow::{Context, Result, anyhow};
use chrono::TimeDelta;
pub use input::{InputReceiver, InputSender, input_channel, spawn_input_forwarder};
use tokio::time::{self, Instant, Interval, MissedTickBehavior, Sleep};

use crate::effects::ClockEffect;
use crate::events::ClockEvent;
use crate::glyphs::GlyphBlock;
use crate::state::{Outcome, Session, TICK};
use crate::terminal::Surface;
use crate::{render, update};

/// Full-screen clock runtime.
///
/// Owns the terminal surface, the session and both emitters. The surface is
/// released on every exit path of `run`.
pub struct ClockRuntime<S: Surface> {
    surface: S,
    /// Session state, mutated only by the reducer.
    pub session: Session,
    input_rx: InputReceiver,
    ticker: Option<Interval>,
    deadline: Option<Pin<Box<Sleep>>>,
}

impl<S: Surface> ClockRuntime<S> {
    pub fn new(surface: S, session: Session, input_rx: InputReceiver) -> Self {
        Self {
            surface,
            session,
            input_rx,
            ticker: None,
            deadline: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Runs the session until the deadline fires or the user quits.
    ///
    /// # Errors
    /// Returns an error if drawing fails or the terminal cannot be restored.
    pub async fn run(&mut self) -> Result<Outcome> {
        let result = self.event_loop().await;

        self.stop_emitters();
        let released = self
            .surface
            .release()
            .context("Failed to restore terminal");

        let outcome = result?;
        released?;
        Ok(outcome)
    }

    async fn event_loop(&mut self) -> Result<Outcome> {
        tracing::info!(
            time = %self.session.countdown.time(),
            mode = ?self.session.countdown.mode(),
            "session started"
        );

        let mut effects = update::start(&self.session);
        loop {
            for effect in effects {
                if let Some(outcome) = self.execute_effect(effect)? {
                    return Ok(outcome);
                }
            }

            let event = self.next_event().await;
            effects = update::update(&mut self.session, event);
        }
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Waits for the next event from any source.
    ///
    /// Input wins ties so a quit key is never starved; a tick due at the same
    /// instant as the deadline is handled before it, so the final frame shows
    /// the clock reaching zero.
    async fn next_event(&mut self) -> ClockEvent {
        tokio::select! {
            biased;
            input = self.input_rx.recv() => match input {
                Some(ev) => ClockEvent::Terminal(ev),
                None => ClockEvent::InputClosed,
            },
            () = next_tick(&mut self.ticker) => ClockEvent::Tick,
            () = deadline_reached(&mut self.deadline) => ClockEvent::Deadline,
        }
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    /// Executes one effect. Returns the outcome once the session should end.
    fn execute_effect(&mut self, effect: ClockEffect) -> Result<Option<Outcome>> {
        match effect {
            ClockEffect::Redraw => self.redraw()?,
            ClockEffect::StartEmitters { deadline } => self.start_emitters(deadline),
            ClockEffect::StopEmitters => self.stop_emitters(),
            ClockEffect::Exit(outcome) => {
                tracing::info!(
                    ?outcome,
                    time = %self.session.countdown.time(),
                    "session ended"
                );
                return Ok(Some(outcome));
            }
        }
        Ok(None)
    }

    fn start_emitters(&mut self, deadline: Option<TimeDelta>) {
        let start = Instant::now();

        let mut ticker = time::interval_at(start + TICK, TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.ticker = Some(ticker);

        // A deadline already in the past fires immediately.
        self.deadline = deadline.map(|remaining| {
            Box::pin(time::sleep_until(start + remaining.to_std().unwrap_or_default()))
        });
    }

    fn stop_emitters(&mut self) {
        self.ticker = None;
        self.deadline = None;
    }

    /// Formats the current time, lays out on first use, and flushes a frame.
    fn redraw(&mut self) -> Result<()> {
        let clock = GlyphBlock::render(&countdown_core::duration::format(
            self.session.countdown.time(),
        ));

        let terminal = self.surface.terminal();
        let size = terminal
            .size()
            .map_err(|err| anyhow!("Failed to query terminal size: {err}"))?;
        let origin = self.session.origin(size.width, size.height, &clock);

        let session = &self.session;
        terminal
            .draw(|frame| render::render(frame, session, &clock, origin))
            .map_err(|err| anyhow!("Failed to draw clock: {err}"))?;
        Ok(())
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => future::pending().await,
    }
}

async fn deadline_reached(deadline: &mut Option<Pin<Box<Sleep>>>) {
    match deadline {
        Some(sleep) => sleep.as_mut().await,
        None => future::pending().await,
    }
}
