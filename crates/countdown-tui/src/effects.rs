//! Clock effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes:
//! drawing, emitter management and exit. The reducer itself never touches
//! the terminal or the timers.

use chrono::TimeDelta;

use crate::state::Outcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockEffect {
    /// Draw the current time and flush.
    Redraw,

    /// Replace both emitters with fresh ones.
    ///
    /// The tick phase restarts from now. `deadline` is `None` in count-up mode.
    StartEmitters { deadline: Option<TimeDelta> },

    /// Drop both emitters so nothing fires until they are started again.
    StopEmitters,

    /// Release the terminal and end the session.
    Exit(Outcome),
}
