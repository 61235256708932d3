//! # Durations
//!
//! Defines `DurationValue`, a non-negative elapsed time with millisecond
//! precision, parsed from strings such as `"70ms"`, `"5s"` or `"3d"`.
//!
//! ## Grammar
//!
//! `^(0|[1-9][0-9]*)(ms|s|m|h|d|w|M|Y)$`. Units are case-sensitive: `m` is
//! minutes, `M` is months (30 days), `Y` is years (365 days). A string that
//! does not match the grammar but reads as a plain number is taken as a
//! millisecond count (`"1500"` is 1.5 seconds).

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValueError;
use crate::MAX_SAFE_INTEGER;

const SECOND: u64 = 1_000;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Time units accepted in duration strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    /// `ms`
    Milliseconds,
    /// `s`
    Seconds,
    /// `m`
    Minutes,
    /// `h`
    Hours,
    /// `d`
    Days,
    /// `w`
    Weeks,
    /// `M`, 30 days.
    Months,
    /// `Y`, 365 days.
    Years,
}

impl DurationUnit {
    /// All units, shortest first.
    pub const ALL: [DurationUnit; 8] = [
        Self::Milliseconds,
        Self::Seconds,
        Self::Minutes,
        Self::Hours,
        Self::Days,
        Self::Weeks,
        Self::Months,
        Self::Years,
    ];

    /// Units used when rendering; calendar approximations are never chosen.
    const DISPLAY: [DurationUnit; 6] = [
        Self::Weeks,
        Self::Days,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
        Self::Milliseconds,
    ];

    /// Number of milliseconds in one of this unit.
    pub fn millis(self) -> u64 {
        match self {
            Self::Milliseconds => 1,
            Self::Seconds => SECOND,
            Self::Minutes => MINUTE,
            Self::Hours => HOUR,
            Self::Days => DAY,
            Self::Weeks => 7 * DAY,
            Self::Months => 30 * DAY,
            Self::Years => 365 * DAY,
        }
    }

    /// Unit suffix as written in duration strings.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "m",
            Self::Hours => "h",
            Self::Days => "d",
            Self::Weeks => "w",
            Self::Months => "M",
            Self::Years => "Y",
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for DurationUnit {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.suffix() == s)
            .ok_or_else(|| ValueError::InvalidDuration(s.to_string()))
    }
}

/// An immutable, non-negative elapsed time in whole milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DurationValue(u64);

impl DurationValue {
    /// Create a value from a millisecond count.
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Create a value from a raw numeric millisecond count.
    ///
    /// # Errors
    ///
    /// Rejects negative, fractional, non-finite, and unsafe-integer numbers.
    pub fn from_number(millis: f64) -> Result<Self, ValueError> {
        if !millis.is_finite() || millis < 0.0 || millis.fract() != 0.0 || millis > MAX_SAFE_INTEGER as f64 {
            return Err(ValueError::InvalidDurationCount(millis.to_string()));
        }
        Ok(Self(millis as u64))
    }

    /// Parse a duration string (`"70ms"`, `"5s"`, `"1Y"`, `"1500"`).
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidDuration` naming the input if it matches
    /// neither the grammar nor a plain number, `ValueError::InvalidDurationCount`
    /// for plain numbers that are not safe non-negative integers, and
    /// `ValueError::Overflow` if the result does not fit in 64 bits.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        if let Some((count, unit)) = split_count_and_unit(text) {
            return count
                .checked_mul(unit.millis())
                .map(Self)
                .ok_or_else(|| ValueError::Overflow(text.to_string()));
        }

        match text.trim().parse::<f64>() {
            Ok(millis) => Self::from_number(millis),
            Err(_) => Err(ValueError::InvalidDuration(text.to_string())),
        }
    }

    /// Milliseconds in this duration.
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Convert to a standard library duration.
    pub fn as_std(&self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Returns true if this duration is strictly shorter than `other`.
    pub fn is_less_than(&self, other: &DurationValue) -> bool {
        self.0 < other.0
    }

    /// Returns true if this duration is strictly longer than `other`.
    pub fn is_greater_than(&self, other: &DurationValue) -> bool {
        self.0 > other.0
    }

    /// Render in the given unit, or in the largest of `w`/`d`/`h`/`m`/`s`/`ms`
    /// that divides the duration evenly.
    pub fn to_string_in(&self, unit: Option<DurationUnit>) -> String {
        let unit = unit.unwrap_or_else(|| {
            DurationUnit::DISPLAY
                .into_iter()
                .find(|unit| self.0 >= unit.millis() && self.0 % unit.millis() == 0)
                .unwrap_or(DurationUnit::Milliseconds)
        });
        if self.0 % unit.millis() == 0 {
            format!("{}{unit}", self.0 / unit.millis())
        } else {
            format!("{}{unit}", self.0 as f64 / unit.millis() as f64)
        }
    }
}

/// Split `<count><unit>` where count has no leading zeros.
fn split_count_and_unit(text: &str) -> Option<(u64, DurationUnit)> {
    let split = text.find(|c: char| !c.is_ascii_digit())?;
    let (count, unit) = text.split_at(split);
    if count.is_empty() || (count.len() > 1 && count.starts_with('0')) {
        return None;
    }
    let unit = unit.parse::<DurationUnit>().ok()?;
    // A count too large for u64 still matched the grammar; report overflow
    // rather than falling through to the plain-number path.
    let count = count.parse::<u64>().unwrap_or(u64::MAX);
    Some((count, unit))
}

impl fmt::Display for DurationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_in(None))
    }
}

impl FromStr for DurationValue {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Duration> for DurationValue {
    type Error = ValueError;

    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        u64::try_from(duration.as_millis())
            .map(Self)
            .map_err(|_| ValueError::Overflow(format!("{duration:?}")))
    }
}

impl Serialize for DurationValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for DurationValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DurationVisitor)
    }
}

struct DurationVisitor;

impl Visitor<'_> for DurationVisitor {
    type Value = DurationValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a millisecond count or a duration string such as \"5s\"")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(DurationValue(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(DurationValue)
            .map_err(|_| E::custom(ValueError::InvalidDurationCount(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        DurationValue::from_number(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        DurationValue::parse(v).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_unit() {
        assert_eq!(DurationValue::parse("70ms").unwrap().as_millis(), 70);
        assert_eq!(DurationValue::parse("5s").unwrap().as_millis(), 5_000);
        assert_eq!(DurationValue::parse("10m").unwrap().as_millis(), 600_000);
        assert_eq!(DurationValue::parse("2h").unwrap().as_millis(), 7_200_000);
        assert_eq!(DurationValue::parse("3d").unwrap().as_millis(), 3 * DAY);
        assert_eq!(DurationValue::parse("1w").unwrap().as_millis(), 7 * DAY);
        assert_eq!(DurationValue::parse("1M").unwrap().as_millis(), 30 * DAY);
        assert_eq!(DurationValue::parse("1Y").unwrap().as_millis(), 365 * DAY);
    }

    #[test]
    fn test_units_are_case_sensitive() {
        assert_ne!(DurationValue::parse("1m").unwrap(), DurationValue::parse("1M").unwrap());
        assert!(DurationValue::parse("1S").is_err());
        assert!(DurationValue::parse("1MS").is_err());
    }

    #[test]
    fn test_plain_number_is_milliseconds() {
        assert_eq!(DurationValue::parse("1500").unwrap().as_millis(), 1_500);
        assert_eq!(DurationValue::parse("0").unwrap().as_millis(), 0);
    }

    #[test]
    fn test_plain_fraction_rejected() {
        let err = DurationValue::parse("1.5").unwrap_err();
        assert!(matches!(err, ValueError::InvalidDurationCount(_)));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for input in ["", "s", "5 s", "05s", "-5s", "5sec", "1.5s", "five"] {
            let err = DurationValue::parse(input).unwrap_err();
            assert_eq!(err, ValueError::InvalidDuration(input.to_string()), "input {input:?}");
        }
    }

    #[test]
    fn test_parse_error_names_input_and_format() {
        let err = DurationValue::parse("5sec").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("[5sec]"));
        assert!(message.contains("<count>[ms|s|m|h|d|w|M|Y]"));
    }

    #[test]
    fn test_parse_overflow() {
        let err = DurationValue::parse("99999999999999999999Y").unwrap_err();
        assert!(matches!(err, ValueError::Overflow(_)));
    }

    #[test]
    fn test_from_number() {
        assert_eq!(DurationValue::from_number(250.0).unwrap().as_millis(), 250);
        assert!(DurationValue::from_number(-1.0).is_err());
        assert!(DurationValue::from_number(0.5).is_err());
    }

    #[test]
    fn test_ordering() {
        let five_seconds = DurationValue::parse("5s").unwrap();
        assert!(five_seconds.is_greater_than(&DurationValue::from_millis(4_999)));
        assert!(five_seconds.is_less_than(&DurationValue::parse("1m").unwrap()));
        assert_eq!(five_seconds, DurationValue::from_millis(5_000));
    }

    #[test]
    fn test_display_uses_largest_even_unit() {
        assert_eq!(DurationValue::from_millis(0).to_string(), "0ms");
        assert_eq!(DurationValue::from_millis(1_500).to_string(), "1500ms");
        assert_eq!(DurationValue::from_millis(5_000).to_string(), "5s");
        assert_eq!(DurationValue::from_millis(90 * SECOND).to_string(), "90s");
        assert_eq!(DurationValue::from_millis(2 * HOUR).to_string(), "2h");
        assert_eq!(DurationValue::from_millis(14 * DAY).to_string(), "2w");
        assert_eq!(DurationValue::from_millis(30 * DAY).to_string(), "30d");
    }

    #[test]
    fn test_to_string_in_explicit_unit() {
        let value = DurationValue::from_millis(1_500);
        assert_eq!(value.to_string_in(Some(DurationUnit::Milliseconds)), "1500ms");
        assert_eq!(value.to_string_in(Some(DurationUnit::Seconds)), "1.5s");
    }

    #[test]
    fn test_std_conversion() {
        let value = DurationValue::parse("2s").unwrap();
        assert_eq!(value.as_std(), Duration::from_secs(2));
        assert_eq!(DurationValue::try_from(Duration::from_millis(750)).unwrap(), DurationValue::from_millis(750));
    }

    #[test]
    fn test_serde_roundtrip() {
        let value = DurationValue::parse("5s").unwrap();
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "5000");
        let from_string: DurationValue = serde_json::from_str("\"5s\"").unwrap();
        assert_eq!(from_string, value);
        assert!(serde_json::from_str::<DurationValue>("\"5 seconds\"").is_err());
    }
}
