//! Typed form of a template's start/end adjustment.
//!
//! Templates store adjustments the way the editor produced them: an
//! adjustment type (`"+duration"`, `"-duration"`, `"+fraction"`,
//! `"-fraction"`) and a free-form offset value string. [`Offset::parse`]
//! converts that pair once, so the resolver never looks at strings.

use std::fmt;

use chrono::{Duration, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Add,
    Subtract,
}

impl Sign {
    fn symbol(&self) -> char {
        match self {
            Sign::Add => '+',
            Sign::Subtract => '-',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offset {
    /// Fixed number of minutes
    Duration { minutes: i64, sign: Sign },
    /// `1/denominator` of some interval. Applies no shift (see `apply`).
    Fraction { denominator: i64, sign: Sign },
}

impl Default for Offset {
    fn default() -> Self {
        Offset::Duration {
            minutes: 0,
            sign: Sign::Add,
        }
    }
}

impl Offset {
    /// Build an offset from the stored adjustment type and value.
    ///
    /// Unknown or missing types become a zero duration. Values are read as a
    /// leading integer; anything unparseable counts as zero.
    pub fn parse(adjustment_type: Option<&str>, value: Option<&str>) -> Offset {
        let magnitude = value.map(leading_integer).unwrap_or(0);

        match adjustment_type.map(str::trim) {
            Some("+duration") => Offset::Duration {
                minutes: magnitude,
                sign: Sign::Add,
            },
            Some("-duration") => Offset::Duration {
                minutes: magnitude,
                sign: Sign::Subtract,
            },
            Some("+fraction") => Offset::Fraction {
                denominator: magnitude,
                sign: Sign::Add,
            },
            Some("-fraction") => Offset::Fraction {
                denominator: magnitude,
                sign: Sign::Subtract,
            },
            other => {
                if let Some(t) = other
                    && !t.is_empty()
                {
                    tracing::debug!(adjustment = %t, "unknown adjustment type, using zero offset");
                }
                Offset::default()
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Offset::Duration { minutes, .. } => *minutes == 0,
            Offset::Fraction { denominator, .. } => *denominator == 0,
        }
    }

    /// A non-zero duration counted backwards.
    pub fn is_subtractive_duration(&self) -> bool {
        matches!(self, Offset::Duration { minutes, sign: Sign::Subtract } if *minutes != 0)
    }

    /// A non-zero duration counted forwards.
    pub fn is_additive_duration(&self) -> bool {
        matches!(self, Offset::Duration { minutes, sign: Sign::Add } if *minutes != 0)
    }

    /// Shift `base` by this offset. Fractions leave `base` unchanged.
    ///
    /// `None` when the shift falls outside the representable date range.
    pub fn apply(&self, base: NaiveDateTime) -> Option<NaiveDateTime> {
        match *self {
            Offset::Duration {
                minutes,
                sign: Sign::Add,
            } => base.checked_add_signed(Duration::try_minutes(minutes)?),
            Offset::Duration {
                minutes,
                sign: Sign::Subtract,
            } => base.checked_sub_signed(Duration::try_minutes(minutes)?),
            Offset::Fraction { .. } => Some(base),
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::Duration { minutes, sign } => write!(f, "{}{}min", sign.symbol(), minutes),
            Offset::Fraction { denominator, sign } => write!(f, "{}1/{}", sign.symbol(), denominator),
        }
    }
}

/// Leading optionally-signed integer of `s`, ignoring trailing text; 0 if none.
fn leading_integer(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(5, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_duration_variants() {
        assert_eq!(
            Offset::parse(Some("+duration"), Some("30")),
            Offset::Duration { minutes: 30, sign: Sign::Add }
        );
        assert_eq!(
            Offset::parse(Some("-duration"), Some("15")),
            Offset::Duration { minutes: 15, sign: Sign::Subtract }
        );
    }

    #[test]
    fn test_parse_fraction_variants() {
        assert_eq!(
            Offset::parse(Some("-fraction"), Some("3")),
            Offset::Fraction { denominator: 3, sign: Sign::Subtract }
        );
    }

    #[test]
    fn test_malformed_values_are_zero() {
        assert!(Offset::parse(Some("+duration"), Some("abc")).is_zero());
        assert!(Offset::parse(Some("+duration"), Some("")).is_zero());
        assert!(Offset::parse(Some("-duration"), None).is_zero());
        assert!(!Offset::parse(Some("-duration"), None).is_subtractive_duration());
    }

    #[test]
    fn test_leading_integer_ignores_trailing_text() {
        assert_eq!(leading_integer("20min"), 20);
        assert_eq!(leading_integer("  7 "), 7);
        assert_eq!(leading_integer("-5"), -5);
        assert_eq!(leading_integer("x5"), 0);
    }

    #[test]
    fn test_unknown_type_is_zero_duration() {
        assert_eq!(Offset::parse(Some("*duration"), Some("10")), Offset::default());
        assert_eq!(Offset::parse(None, Some("10")), Offset::default());
    }

    #[test]
    fn test_apply() {
        let plus = Offset::parse(Some("+duration"), Some("10"));
        let minus = Offset::parse(Some("-duration"), Some("15"));
        let frac = Offset::parse(Some("+fraction"), Some("2"));

        assert_eq!(plus.apply(base()), Some(base() + Duration::minutes(10)));
        assert_eq!(minus.apply(base()), Some(base() - Duration::minutes(15)));
        assert_eq!(frac.apply(base()), Some(base()));
    }

    #[test]
    fn test_apply_out_of_range_is_none() {
        let huge = Offset::parse(Some("+duration"), Some("999999999999"));
        assert_eq!(huge.apply(base()), None);

        let huge_back = Offset::parse(Some("-duration"), Some("999999999999"));
        assert_eq!(huge_back.apply(base()), None);

        let max = Offset::parse(Some("+duration"), Some("9223372036854775807"));
        assert_eq!(max.apply(base()), None);
    }

    #[test]
    fn test_fraction_is_never_a_duration_for_base_selection() {
        let frac = Offset::parse(Some("-fraction"), Some("4"));
        assert!(!frac.is_subtractive_duration());
        assert!(!frac.is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Offset::parse(Some("-duration"), Some("15")).to_string(), "-15min");
        assert_eq!(Offset::parse(Some("+fraction"), Some("3")).to_string(), "+1/3");
    }
}
