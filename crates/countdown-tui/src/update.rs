//! Clock reducer (update function).
//!
//! All session mutations happen here. The runtime calls `update(session, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::ClockEffect;
use crate::events::ClockEvent;
use crate::state::{Outcome, Phase, Session};

/// Effects that start a fresh session: arm the emitters, then draw once.
pub fn start(session: &Session) -> Vec<ClockEffect> {
    vec![
        ClockEffect::StartEmitters {
            deadline: session.countdown.deadline(),
        },
        ClockEffect::Redraw,
    ]
}

/// The main reducer function.
///
/// Takes the session and one event, mutates the session, and returns effects
/// for the runtime to execute. A terminated session ignores further events.
pub fn update(session: &mut Session, event: ClockEvent) -> Vec<ClockEffect> {
    if matches!(session.phase(), Phase::Terminated(_)) {
        return vec![];
    }

    match event {
        ClockEvent::Tick => {
            if !session.countdown.is_running() {
                return vec![];
            }
            session.countdown.advance();
            vec![ClockEffect::Redraw]
        }
        ClockEvent::Deadline => terminate(session, Outcome::Completed),
        ClockEvent::Terminal(Event::Key(key)) => handle_key(session, key),
        ClockEvent::Terminal(_) => vec![],
        ClockEvent::InputClosed => {
            tracing::warn!("terminal input closed, ending session");
            terminate(session, Outcome::Quit)
        }
    }
}

fn handle_key(session: &mut Session, key: KeyEvent) -> Vec<ClockEffect> {
    if key.kind != KeyEventKind::Press {
        return vec![];
    }

    if is_quit_key(key) {
        return terminate(session, Outcome::Quit);
    }

    let KeyCode::Char(ch) = key.code else {
        return vec![];
    };

    if ch.eq_ignore_ascii_case(&session.keys.pause) {
        session.countdown.pause();
        tracing::info!(time = %session.countdown.time(), "paused");
        vec![ClockEffect::StopEmitters]
    } else if ch.eq_ignore_ascii_case(&session.keys.resume) {
        session.countdown.resume();
        tracing::info!(time = %session.countdown.time(), "resumed");
        vec![ClockEffect::StartEmitters {
            deadline: session.countdown.deadline(),
        }]
    } else {
        vec![]
    }
}

fn is_quit_key(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char(ch) => {
            key.modifiers.contains(KeyModifiers::CONTROL) && ch.eq_ignore_ascii_case(&'c')
        }
        _ => false,
    }
}

fn terminate(session: &mut Session, outcome: Outcome) -> Vec<ClockEffect> {
    session.terminate(outcome);
    vec![ClockEffect::Exit(outcome)]
}
