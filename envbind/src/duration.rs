//! Compound duration strings such as `1h30m`, `-1.5s` or `250ms`.
//!
//! The grammar is a sequence of `<number><unit>` segments with an optional
//! leading sign. Numbers may carry a fractional part, and the unit is one of
//! `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`. The bare string `0` is accepted
//! without a unit.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const NANOSECOND: u128 = 1;
const MICROSECOND: u128 = 1_000 * NANOSECOND;
const MILLISECOND: u128 = 1_000 * MICROSECOND;
const SECOND: u128 = 1_000 * MILLISECOND;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;

/// Magnitude of `i64::MIN`, the largest value a negative duration may reach.
const LIMIT: u128 = 1 << 63;

/// Fractional digits beyond this scale cannot change the result.
const MAX_FRACTION_SCALE: u128 = 100_000_000_000_000_000_000;

/// Error returned when a duration string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDurationError {
    /// The input does not follow the `<number><unit>` grammar.
    #[error("invalid duration {0:?}")]
    Invalid(String),

    /// A number was not followed by a unit.
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    /// A unit other than `ns`, `us`, `µs`, `ms`, `s`, `m`, `h` was used.
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit {
        /// The unrecognized unit text
        unit: String,
        /// The full input
        input: String,
    },

    /// The duration does not fit in 64 bits of nanoseconds.
    #[error("duration {0:?} is out of range")]
    Overflow(String),
}

/// A duration that may be negative, stored as signed nanoseconds.
///
/// [`std::time::Duration`] cannot represent negative spans, so fields that
/// need to accept values like `-5m` should use this type instead.
///
/// ```
/// use envbind::SignedDuration;
///
/// let d: SignedDuration = "-1h30m".parse().unwrap();
/// assert!(d.is_negative());
/// assert_eq!(d.to_string(), "-1h30m0s");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignedDuration {
    nanos: i64,
}

impl SignedDuration {
    /// The zero duration.
    pub const ZERO: Self = Self { nanos: 0 };

    /// Create a duration from signed nanoseconds.
    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    /// Signed nanoseconds held by this duration.
    pub const fn as_nanos(&self) -> i64 {
        self.nanos
    }

    /// Whether the duration is strictly below zero.
    pub const fn is_negative(&self) -> bool {
        self.nanos < 0
    }

    /// Magnitude of the duration, dropping the sign.
    pub const fn unsigned_abs(&self) -> Duration {
        Duration::from_nanos(self.nanos.unsigned_abs())
    }
}

impl FromStr for SignedDuration {
    type Err = ParseDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s).map(Self::from_nanos)
    }
}

impl TryFrom<SignedDuration> for Duration {
    type Error = NegativeDurationError;

    fn try_from(value: SignedDuration) -> Result<Self, Self::Error> {
        if value.is_negative() {
            return Err(NegativeDurationError(value));
        }
        Ok(value.unsigned_abs())
    }
}

impl From<Duration> for SignedDuration {
    /// Saturates at `i64::MAX` nanoseconds.
    fn from(value: Duration) -> Self {
        Self::from_nanos(i64::try_from(value.as_nanos()).unwrap_or(i64::MAX))
    }
}

/// Error returned when converting a negative [`SignedDuration`] into a
/// [`std::time::Duration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("negative duration {0} cannot be represented as std::time::Duration")]
pub struct NegativeDurationError(pub SignedDuration);

impl fmt::Display for SignedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        let nanos = u128::from(self.nanos.unsigned_abs());

        if nanos == 0 {
            return f.write_str("0s");
        }
        if nanos < MICROSECOND {
            return write!(f, "{nanos}ns");
        }
        if nanos < MILLISECOND {
            write_fraction(f, nanos, MICROSECOND, 3)?;
            return f.write_str("µs");
        }
        if nanos < SECOND {
            write_fraction(f, nanos, MILLISECOND, 6)?;
            return f.write_str("ms");
        }

        let hours = nanos / HOUR;
        let minutes = (nanos % HOUR) / MINUTE;
        let rest = nanos % MINUTE;
        if hours > 0 {
            write!(f, "{hours}h{minutes}m")?;
        } else if minutes > 0 {
            write!(f, "{minutes}m")?;
        }
        write_fraction(f, rest, SECOND, 9)?;
        f.write_str("s")
    }
}

/// Write `value / unit` with up to `digits` fractional digits, trailing zeros
/// removed.
fn write_fraction(f: &mut fmt::Formatter<'_>, value: u128, unit: u128, digits: usize) -> fmt::Result {
    let whole = value / unit;
    let frac = value % unit;
    write!(f, "{whole}")?;
    if frac > 0 {
        let text = format!("{frac:0digits$}");
        write!(f, ".{}", text.trim_end_matches('0'))?;
    }
    Ok(())
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(NANOSECOND),
        // U+00B5 micro sign and U+03BC greek small letter mu
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Parse a compound duration string into signed nanoseconds.
pub fn parse_duration(input: &str) -> Result<i64, ParseDurationError> {
    let invalid = || ParseDurationError::Invalid(input.to_string());
    let overflow = || ParseDurationError::Overflow(input.to_string());

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let first = rest.as_bytes()[0];
        if !(first == b'.' || first.is_ascii_digit()) {
            return Err(invalid());
        }

        // Integer part
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        let mut whole: u128 = 0;
        for b in rest[..digits].bytes() {
            whole = whole * 10 + u128::from(b - b'0');
            if whole > LIMIT {
                return Err(overflow());
            }
        }
        rest = &rest[digits..];

        // Fractional part
        let mut frac: u128 = 0;
        let mut scale: u128 = 1;
        let mut frac_digits = 0;
        if let Some(after_dot) = rest.strip_prefix('.') {
            frac_digits = after_dot.bytes().take_while(u8::is_ascii_digit).count();
            for b in after_dot[..frac_digits].bytes() {
                if scale < MAX_FRACTION_SCALE {
                    frac = frac * 10 + u128::from(b - b'0');
                    scale *= 10;
                }
            }
            rest = &after_dot[frac_digits..];
        }
        if digits == 0 && frac_digits == 0 {
            return Err(invalid());
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(ParseDurationError::MissingUnit(input.to_string()));
        }
        let unit_text = &rest[..unit_len];
        rest = &rest[unit_len..];
        let unit = unit_nanos(unit_text).ok_or_else(|| ParseDurationError::UnknownUnit {
            unit: unit_text.to_string(),
            input: input.to_string(),
        })?;

        total += whole * unit + frac * unit / scale;
        if total > LIMIT {
            return Err(overflow());
        }
    }

    if negative {
        // LIMIT itself is i64::MIN
        Ok((total as i128).wrapping_neg() as i64)
    } else {
        i64::try_from(total).map_err(|_| overflow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: i64 = 1_000_000_000;

    #[test]
    fn test_parse_compound() {
        assert_eq!(parse_duration("1h30m").unwrap(), 90 * 60 * S);
        assert_eq!(parse_duration("2h45m30s").unwrap(), (2 * 3600 + 45 * 60 + 30) * S);
        assert_eq!(parse_duration("1m1ms").unwrap(), 60 * S + 1_000_000);
    }

    #[test]
    fn test_parse_small_units() {
        assert_eq!(parse_duration("300ms").unwrap(), 300_000_000);
        assert_eq!(parse_duration("15us").unwrap(), 15_000);
        assert_eq!(parse_duration("15µs").unwrap(), 15_000);
        assert_eq!(parse_duration("15μs").unwrap(), 15_000);
        assert_eq!(parse_duration("7ns").unwrap(), 7);
    }

    #[test]
    fn test_parse_fraction_and_sign() {
        assert_eq!(parse_duration("1.5h").unwrap(), 90 * 60 * S);
        assert_eq!(parse_duration(".5s").unwrap(), S / 2);
        assert_eq!(parse_duration("1.s").unwrap(), S);
        assert_eq!(parse_duration("-1.5s").unwrap(), -(S + S / 2));
        assert_eq!(parse_duration("+10s").unwrap(), 10 * S);
    }

    #[test]
    fn test_parse_zero() {
        assert_eq!(parse_duration("0").unwrap(), 0);
        assert_eq!(parse_duration("-0").unwrap(), 0);
        assert_eq!(parse_duration("0s").unwrap(), 0);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(parse_duration("xyz"), Err(ParseDurationError::Invalid(_))));
        assert!(matches!(parse_duration(""), Err(ParseDurationError::Invalid(_))));
        assert!(matches!(parse_duration("-"), Err(ParseDurationError::Invalid(_))));
        assert!(matches!(parse_duration(".s"), Err(ParseDurationError::Invalid(_))));
        assert!(matches!(parse_duration("10"), Err(ParseDurationError::MissingUnit(_))));
        assert!(matches!(parse_duration("1h30"), Err(ParseDurationError::MissingUnit(_))));
        assert!(matches!(
            parse_duration("3d"),
            Err(ParseDurationError::UnknownUnit { ref unit, .. }) if unit == "d"
        ));
        assert!(matches!(parse_duration("1h 30m"), Err(ParseDurationError::UnknownUnit { .. })));
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_duration("9223372036854775807ns").unwrap(), i64::MAX);
        assert_eq!(parse_duration("-9223372036854775808ns").unwrap(), i64::MIN);
        assert!(matches!(
            parse_duration("9223372036854775808ns"),
            Err(ParseDurationError::Overflow(_))
        ));
        assert!(matches!(
            parse_duration("3000000h"),
            Err(ParseDurationError::Overflow(_))
        ));
    }

    #[test]
    fn test_display() {
        let cases = [
            (0, "0s"),
            (1, "1ns"),
            (1_100, "1.1µs"),
            (2_200_000, "2.2ms"),
            (S + S / 2, "1.5s"),
            (90 * 60 * S, "1h30m0s"),
            (61 * S, "1m1s"),
            (-90 * 60 * S, "-1h30m0s"),
            (i64::MIN, "-2562047h47m16.854775808s"),
        ];
        for (nanos, expected) in cases {
            assert_eq!(SignedDuration::from_nanos(nanos).to_string(), expected);
        }
    }

    #[test]
    fn test_std_conversion() {
        let positive: SignedDuration = "1m".parse().unwrap();
        assert_eq!(Duration::try_from(positive).unwrap(), Duration::from_secs(60));

        let negative: SignedDuration = "-1m".parse().unwrap();
        assert!(Duration::try_from(negative).is_err());
        assert_eq!(negative.unsigned_abs(), Duration::from_secs(60));

        assert_eq!(
            SignedDuration::from(Duration::from_millis(5)).as_nanos(),
            5_000_000
        );
    }
}
