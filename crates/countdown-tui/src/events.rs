//! Clock event types.
//!
//! Every wake-up of the event loop produces exactly one `ClockEvent`. The
//! runtime tags each event with its source and hands it to the reducer.

use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockEvent {
    /// The periodic tick emitter fired.
    Tick,

    /// The one-shot deadline emitter fired.
    Deadline,

    /// The input producer forwarded a terminal event.
    Terminal(CrosstermEvent),

    /// The input producer stopped; no further terminal events will arrive.
    InputClosed,
}
