//! CLI entry and dispatch.

use anyhow::{Context, Result};
use chrono::TimeDelta;
use clap::Parser;
use clap::error::ErrorKind;
use countdown_core::{config, duration, logging};
use countdown_tui::{ClockOptions, Mode, Outcome};

const USAGE: &str = "countdown 25s [-up] [title]
       countdown 1m50s [-up] [title]
       countdown 2h45m50s [-up] [title]";

/// Positional marker selecting count-up mode.
const UP_FLAG: &str = "-up";

#[derive(Parser, Debug)]
#[command(name = "countdown")]
#[command(version)]
#[command(about = "Big block-digit countdown timer for the terminal")]
#[command(override_usage = USAGE)]
#[command(after_help = "Keys: p pause, c resume, Esc or Ctrl+C quit")]
struct Cli {
    /// How long to count, e.g. 25s, 1m50s, 2h45m50s
    #[arg(value_name = "DURATION", value_parser = duration::parse, allow_hyphen_values = true)]
    duration: TimeDelta,

    /// `-up` to count up from zero, then an optional title shown above the clock
    #[arg(value_name = "ARGS", num_args = 0..=2, allow_hyphen_values = true)]
    rest: Vec<String>,
}

impl Cli {
    fn into_options(self) -> ClockOptions {
        let (mode, title) = match self.rest.as_slice() {
            [] => (Mode::CountDown, String::new()),
            [only] if only == UP_FLAG => (Mode::CountUp, String::new()),
            [title] => (Mode::CountDown, title.clone()),
            [first, title, ..] => {
                let mode = if first == UP_FLAG {
                    Mode::CountUp
                } else {
                    Mode::CountDown
                };
                (mode, title.clone())
            }
        };

        ClockOptions {
            duration: self.duration,
            mode,
            title,
        }
    }
}

/// Parses arguments, exiting with status 2 on any usage error.
///
/// Clap omits the usage banner for rejected values, so it is appended here.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::ValueValidation => {
            let _ = err.print();
            eprintln!("\nUsage: {USAGE}");
            std::process::exit(2);
        }
        Err(err) => err.exit(),
    }
}

pub fn run() -> Result<Outcome> {
    let options = parse_args().into_options();

    let config = config::Config::load().context("load config")?;
    let _log_guard = logging::init().context("init logging")?;
    tracing::debug!(?options, "parsed arguments");

    // one tokio runtime for the clock
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(countdown_tui::run_clock(&config, options))
}
