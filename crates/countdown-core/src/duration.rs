//! Signed duration literals and clock formatting.
//!
//! Literals use the compact `25s`, `1m50s`, `2h45m50s` grammar: an optional
//! sign followed by one or more `<number><unit>` terms, where the number may
//! carry a decimal fraction (`1.5h`, `.5s`).

use std::fmt;

use chrono::TimeDelta;

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Accepted units and their length in nanoseconds.
const UNITS: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("\u{b5}s", 1_000),
    ("\u{3bc}s", 1_000),
    ("ms", 1_000_000),
    ("s", NANOS_PER_SECOND),
    ("m", 60 * NANOS_PER_SECOND),
    ("h", 3_600 * NANOS_PER_SECOND),
];

/// Fraction digits past this point are below nanosecond resolution for every unit.
const MAX_FRACTION_DIGITS: usize = 18;

/// Largest magnitude a literal may reach (a negative literal may reach one more).
const MAX_NANOS: u128 = i64::MAX as u128;

/// Error returned when a duration literal cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseDurationError {
    /// Malformed literal (empty, stray characters, a term without digits).
    Invalid { input: String },
    /// A number was not followed by a unit.
    MissingUnit { input: String },
    /// A term used a unit outside `ns`, `us`, `ms`, `s`, `m`, `h`.
    UnknownUnit { unit: String, input: String },
    /// The literal does not fit in a signed 64-bit nanosecond count.
    Overflow { input: String },
}

impl fmt::Display for ParseDurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { input } => write!(f, "invalid duration {input:?}"),
            Self::MissingUnit { input } => write!(f, "missing unit in duration {input:?}"),
            Self::UnknownUnit { unit, input } => {
                write!(f, "unknown unit {unit:?} in duration {input:?}")
            }
            Self::Overflow { input } => write!(f, "duration {input:?} is out of range"),
        }
    }
}

impl std::error::Error for ParseDurationError {}

/// Parses a signed duration literal such as `25s`, `1m50s` or `-1.5h`.
///
/// A bare `0` is accepted without a unit.
///
/// # Errors
/// Returns a [`ParseDurationError`] describing the first problem found.
pub fn parse(input: &str) -> Result<TimeDelta, ParseDurationError> {
    let invalid = || ParseDurationError::Invalid {
        input: input.to_string(),
    };
    let overflow = || ParseDurationError::Overflow {
        input: input.to_string(),
    };

    let (negative, mut rest) = if let Some(stripped) = input.strip_prefix('-') {
        (true, stripped)
    } else if let Some(stripped) = input.strip_prefix('+') {
        (false, stripped)
    } else {
        (false, input)
    };

    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let int_len = leading_digits(rest);
        let (int_digits, after) = rest.split_at(int_len);
        rest = after;
        let whole = accumulate(int_digits).ok_or_else(overflow)?;

        let mut fraction: u128 = 0;
        let mut scale: u128 = 1;
        let mut frac_len = 0;
        if let Some(after_dot) = rest.strip_prefix('.') {
            frac_len = leading_digits(after_dot);
            let (frac_digits, after) = after_dot.split_at(frac_len);
            for digit in frac_digits.bytes().take(MAX_FRACTION_DIGITS) {
                fraction = fraction * 10 + u128::from(digit - b'0');
                scale *= 10;
            }
            rest = after;
        }
        if int_len == 0 && frac_len == 0 {
            return Err(invalid());
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (unit, after) = rest.split_at(unit_len);
        rest = after;
        if unit.is_empty() {
            return Err(ParseDurationError::MissingUnit {
                input: input.to_string(),
            });
        }
        let Some(&(_, unit_nanos)) = UNITS.iter().find(|(name, _)| *name == unit) else {
            return Err(ParseDurationError::UnknownUnit {
                unit: unit.to_string(),
                input: input.to_string(),
            });
        };

        total += whole * unit_nanos + fraction * unit_nanos / scale;
        if total > MAX_NANOS + 1 {
            return Err(overflow());
        }
    }

    let limit = if negative { MAX_NANOS + 1 } else { MAX_NANOS };
    if total > limit {
        return Err(overflow());
    }
    let magnitude = total as i128;
    let signed = if negative { -magnitude } else { magnitude };
    let nanos = i64::try_from(signed).ok().ok_or_else(overflow)?;
    Ok(TimeDelta::nanoseconds(nanos))
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Folds ASCII digits into a value, failing once it exceeds the nanosecond range.
fn accumulate(digits: &str) -> Option<u128> {
    let mut value: u128 = 0;
    for digit in digits.bytes() {
        value = value * 10 + u128::from(digit - b'0');
        if value > MAX_NANOS + 1 {
            return None;
        }
    }
    Some(value)
}

/// Rounds to whole seconds, halfway values away from zero.
pub fn round_to_seconds(d: TimeDelta) -> i64 {
    let seconds = d.num_seconds();
    let subsec = d.subsec_nanos();
    if subsec.abs() >= 500_000_000 {
        seconds + i64::from(subsec.signum())
    } else {
        seconds
    }
}

/// Formats a duration as `MM:SS`, or `HH:MM:SS` once it reaches an hour.
///
/// Fields come from truncating division of the rounded second count and are
/// zero-padded to two columns. Hours are unbounded. Negative durations are
/// not clamped, so `-61s` formats as `-1:-1`.
pub fn format(d: TimeDelta) -> String {
    let total = round_to_seconds(d);
    let hours = total / 3_600;
    let rest = total - hours * 3_600;
    let minutes = rest / 60;
    let seconds = rest - minutes * 60;

    if hours < 1 {
        format!("{minutes:02}:{seconds:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::*;

    fn secs(n: i64) -> TimeDelta {
        TimeDelta::seconds(n)
    }

    #[test]
    fn test_parse_simple_literals() {
        assert_eq!(parse("25s").unwrap(), secs(25));
        assert_eq!(parse("1m50s").unwrap(), secs(110));
        assert_eq!(parse("2h45m50s").unwrap(), secs(2 * 3600 + 45 * 60 + 50));
        assert_eq!(parse("300ms").unwrap(), TimeDelta::milliseconds(300));
        assert_eq!(parse("7us").unwrap(), TimeDelta::microseconds(7));
        assert_eq!(parse("7\u{b5}s").unwrap(), TimeDelta::microseconds(7));
        assert_eq!(parse("12ns").unwrap(), TimeDelta::nanoseconds(12));
    }

    #[test]
    fn test_parse_signs_and_zero() {
        assert_eq!(parse("-3s").unwrap(), secs(-3));
        assert_eq!(parse("+3s").unwrap(), secs(3));
        assert_eq!(parse("0").unwrap(), TimeDelta::zero());
        assert_eq!(parse("-0").unwrap(), TimeDelta::zero());
        assert_eq!(parse("0s").unwrap(), TimeDelta::zero());
    }

    #[test]
    fn test_parse_fractions() {
        assert_eq!(parse("1.5h").unwrap(), secs(5400));
        assert_eq!(parse(".5s").unwrap(), TimeDelta::milliseconds(500));
        assert_eq!(parse("1.s").unwrap(), secs(1));
        assert_eq!(parse("1h0.5m").unwrap(), secs(3630));
    }

    #[test]
    fn test_parse_unknown_unit() {
        assert_eq!(
            parse("5x"),
            Err(ParseDurationError::UnknownUnit {
                unit: "x".to_string(),
                input: "5x".to_string(),
            })
        );
        assert_eq!(
            parse("5x").unwrap_err().to_string(),
            "unknown unit \"x\" in duration \"5x\""
        );
    }

    #[test]
    fn test_parse_missing_unit() {
        assert!(matches!(
            parse("5"),
            Err(ParseDurationError::MissingUnit { .. })
        ));
        assert!(matches!(
            parse("1m30"),
            Err(ParseDurationError::MissingUnit { .. })
        ));
    }

    #[test]
    fn test_parse_malformed() {
        for input in ["", "-", "+", ".", ".s", "s", "m5s", "--1s"] {
            assert!(
                matches!(parse(input), Err(ParseDurationError::Invalid { .. })),
                "expected {input:?} to be invalid"
            );
        }
    }

    #[test]
    fn test_parse_space_is_part_of_unit() {
        let err = parse("1s 2s").unwrap_err();
        assert_eq!(
            err,
            ParseDurationError::UnknownUnit {
                unit: "s ".to_string(),
                input: "1s 2s".to_string(),
            }
        );
        assert_eq!(err.to_string(), r#"unknown unit "s " in duration "1s 2s""#);
    }

    #[test]
    fn test_parse_overflow() {
        assert!(matches!(
            parse("99999999999999999999s"),
            Err(ParseDurationError::Overflow { .. })
        ));
        assert!(matches!(
            parse("3000000h"),
            Err(ParseDurationError::Overflow { .. })
        ));
        assert_eq!(
            parse("-9223372036854775808ns").unwrap(),
            TimeDelta::nanoseconds(i64::MIN)
        );
        assert!(parse("9223372036854775808ns").is_err());
    }

    #[test]
    fn test_format_known_values() {
        assert_eq!(format(secs(25)), "00:25");
        assert_eq!(format(secs(110)), "01:50");
        assert_eq!(format(secs(2 * 3600 + 45 * 60 + 50)), "02:45:50");
        assert_eq!(format(TimeDelta::zero()), "00:00");
        assert_eq!(format(secs(3600)), "01:00:00");
    }

    #[test]
    fn test_format_hours_are_unbounded() {
        assert_eq!(format(secs(100 * 3600 + 1)), "100:00:01");
        assert_eq!(format(secs(1234 * 3600)), "1234:00:00");
    }

    #[test]
    fn test_format_rounds_to_nearest_second() {
        assert_eq!(format(TimeDelta::milliseconds(1499)), "00:01");
        assert_eq!(format(TimeDelta::milliseconds(1500)), "00:02");
        assert_eq!(format(TimeDelta::milliseconds(59_600)), "01:00");
        assert_eq!(format(TimeDelta::milliseconds(-1500)), "00:-2");
    }

    #[test]
    fn test_format_negative_is_not_clamped() {
        assert_eq!(format(secs(-1)), "00:-1");
        assert_eq!(format(secs(-10)), "00:-10");
        assert_eq!(format(secs(-61)), "-1:-1");
        // Negative hours still take the short branch.
        assert_eq!(format(secs(-7200)), "00:00");
    }

    #[test]
    fn test_format_under_an_hour_decomposes_exactly() {
        let short = Regex::new(r"^[0-5][0-9]:[0-5][0-9]$").unwrap();
        for total in 0..3600 {
            for extra_ms in [0, 250, 499] {
                let d = secs(total) + TimeDelta::milliseconds(extra_ms);
                if round_to_seconds(d) >= 3600 {
                    continue;
                }
                let out = format(d);
                assert!(short.is_match(&out), "{out} for {d}");
                let (m, s) = out.split_once(':').unwrap();
                let m: i64 = m.parse().unwrap();
                let s: i64 = s.parse().unwrap();
                assert_eq!(m * 60 + s, round_to_seconds(d));
            }
        }
    }

    #[test]
    fn test_format_over_an_hour_shape() {
        let long = Regex::new(r"^\d+:[0-5][0-9]:[0-5][0-9]$").unwrap();
        for total in (3600..400_000).step_by(997) {
            let out = format(secs(total));
            assert!(long.is_match(&out), "{out} for {total}s");
        }
    }
}
