//! Session state.
//!
//! ```text
//! Session
//! ├── countdown: CountdownState  (time, mode, running)
//! ├── title: GlyphBlock          (built once)
//! ├── layout: Option<LayoutOrigin> (set on first draw, never reset)
//! ├── keys: KeysConfig
//! ├── theme: Theme
//! └── outcome: Option<Outcome>   (set once the session terminates)
//! ```

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::TimeDelta;
use countdown_core::config::{Config, KeysConfig};
use ratatui::style::{Color, Style};

use crate::glyphs::GlyphBlock;
use crate::layout::LayoutOrigin;

/// Interval between clock ticks.
pub const TICK: Duration = Duration::from_secs(1);

/// Amount the clock moves per tick.
const TICK_STEP: TimeDelta = TimeDelta::seconds(TICK.as_secs() as i64);

/// Direction the clock runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    CountDown,
    CountUp,
}

/// Time shown on the clock plus whether it is moving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownState {
    /// Remaining time when counting down, elapsed time when counting up.
    time: TimeDelta,
    mode: Mode,
    running: bool,
}

impl CountdownState {
    pub fn new(duration: TimeDelta, mode: Mode) -> Self {
        let time = match mode {
            Mode::CountDown => duration,
            Mode::CountUp => TimeDelta::zero(),
        };
        Self {
            time,
            mode,
            running: true,
        }
    }

    pub fn time(&self) -> TimeDelta {
        self.time
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Moves the clock one tick. Count-down is not clamped at zero.
    pub fn advance(&mut self) {
        match self.mode {
            Mode::CountDown => self.time -= TICK_STEP,
            Mode::CountUp => self.time += TICK_STEP,
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Time left before the deadline emitter should fire.
    ///
    /// Count-up has no deadline and runs until the user quits.
    pub fn deadline(&self) -> Option<TimeDelta> {
        match self.mode {
            Mode::CountDown => Some(self.time),
            Mode::CountUp => None,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The deadline was reached.
    Completed,
    /// The user pressed Esc or Ctrl+C.
    Quit,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Completed => 0,
            Outcome::Quit => 1,
        }
    }
}

/// Externally visible session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Terminated(Outcome),
}

/// Styles for the clock and title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Theme {
    pub clock: Style,
    pub title: Style,
}

impl Theme {
    /// Builds the theme from configured color names.
    ///
    /// # Errors
    /// Returns an error naming the first color that does not parse.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            clock: Style::default().fg(parse_color(&config.clock_color)?),
            title: Style::default().fg(parse_color(&config.title_color)?),
        })
    }
}

fn parse_color(name: &str) -> Result<Color> {
    Color::from_str(name)
        .ok()
        .with_context(|| format!("Unknown color '{name}'"))
}

/// Everything the session driver owns for one run of the clock.
#[derive(Debug)]
pub struct Session {
    pub countdown: CountdownState,
    title: GlyphBlock,
    /// Set on first draw and never reset: the clock does not re-center on resize.
    layout: Option<LayoutOrigin>,
    pub keys: KeysConfig,
    pub theme: Theme,
    outcome: Option<Outcome>,
}

impl Session {
    pub fn new(countdown: CountdownState, title: &str, keys: KeysConfig, theme: Theme) -> Self {
        Self {
            countdown,
            title: GlyphBlock::title(title),
            layout: None,
            keys,
            theme,
            outcome: None,
        }
    }

    pub fn title(&self) -> &GlyphBlock {
        &self.title
    }

    /// The layout computed by the first draw, if any.
    pub fn layout(&self) -> Option<LayoutOrigin> {
        self.layout
    }

    /// Returns the draw origin, computing it from the given size on first use.
    ///
    /// Later calls return the stored origin whatever size they pass.
    pub fn origin(&mut self, width: u16, height: u16, clock: &GlyphBlock) -> LayoutOrigin {
        *self
            .layout
            .get_or_insert_with(|| LayoutOrigin::compute(width, height, clock, &self.title))
    }

    pub fn phase(&self) -> Phase {
        match self.outcome {
            Some(outcome) => Phase::Terminated(outcome),
            None if self.countdown.is_running() => Phase::Running,
            None => Phase::Paused,
        }
    }

    pub fn terminate(&mut self, outcome: Outcome) {
        if self.outcome.is_none() {
            self.outcome = Some(outcome);
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(seconds: i64, mode: Mode) -> Session {
        Session::new(
            CountdownState::new(TimeDelta::seconds(seconds), mode),
            "title",
            KeysConfig::default(),
            Theme::default(),
        )
    }

    #[test]
    fn test_count_up_starts_at_zero() {
        let state = CountdownState::new(TimeDelta::seconds(90), Mode::CountUp);
        assert_eq!(state.time(), TimeDelta::zero());
        assert_eq!(state.deadline(), None);
    }

    #[test]
    fn test_advance_goes_negative_when_counting_down() {
        let mut state = CountdownState::new(TimeDelta::seconds(1), Mode::CountDown);
        state.advance();
        state.advance();
        assert_eq!(state.time(), TimeDelta::seconds(-1));
        assert_eq!(state.deadline(), Some(TimeDelta::seconds(-1)));
    }

    #[test]
    fn test_origin_is_computed_once() {
        let mut session = session(25, Mode::CountDown);
        let clock = GlyphBlock::render("00:25");

        assert_eq!(session.layout(), None);
        let first = session.origin(80, 24, &clock);
        let second = session.origin(200, 60, &GlyphBlock::render("100:00:00"));

        assert_eq!(first, second);
        assert_eq!(session.layout(), Some(first));
    }

    #[test]
    fn test_phase_transitions() {
        let mut session = session(5, Mode::CountDown);
        assert_eq!(session.phase(), Phase::Running);

        session.countdown.pause();
        assert_eq!(session.phase(), Phase::Paused);

        session.terminate(Outcome::Quit);
        session.terminate(Outcome::Completed);
        assert_eq!(session.phase(), Phase::Terminated(Outcome::Quit));
        assert_eq!(Outcome::Quit.exit_code(), 1);
        assert_eq!(Outcome::Completed.exit_code(), 0);
    }

    #[test]
    fn test_theme_from_config() {
        let config = Config {
            clock_color: "green".to_string(),
            title_color: "#ff8800".to_string(),
            ..Config::default()
        };
        let theme = Theme::from_config(&config).unwrap();
        assert_eq!(theme.clock.fg, Some(Color::Green));
        assert_eq!(theme.title.fg, Some(Color::Rgb(0xff, 0x88, 0x00)));

        let bad = Config {
            clock_color: "sparkly".to_string(),
            ..Config::default()
        };
        let err = Theme::from_config(&bad).unwrap_err();
        assert!(err.to_string().contains("sparkly"));
    }
}
