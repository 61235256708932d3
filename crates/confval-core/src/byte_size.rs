//! # Byte Sizes
//!
//! Defines `ByteSizeValue`, a non-negative byte count parsed from
//! human-readable strings such as `"10mb"` or `"1.5 GB"`, and `ByteSizeUnit`,
//! the binary units those strings may carry.
//!
//! ## Grammar
//!
//! `^\d+(\.\d+)?\s*(b|kb|mb|gb)?$`, case-insensitive, surrounding whitespace
//! ignored. A missing unit means bytes. Units are binary multiples
//! (`1kb` = 1024 bytes); fractional magnitudes are floored to whole bytes.
//!
//! ## Ordering
//!
//! Values compare by byte count only. `"1kb"`, `"1024b"` and `1024` are
//! the same value.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValueError;
use crate::MAX_SAFE_INTEGER;

/// Binary byte-size units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteSizeUnit {
    /// `b`
    Bytes,
    /// `kb`, 2^10 bytes.
    Kilobytes,
    /// `mb`, 2^20 bytes.
    Megabytes,
    /// `gb`, 2^30 bytes.
    Gigabytes,
}

impl ByteSizeUnit {
    /// All units, smallest first.
    pub const ALL: [ByteSizeUnit; 4] = [
        Self::Bytes,
        Self::Kilobytes,
        Self::Megabytes,
        Self::Gigabytes,
    ];

    /// Number of bytes in one of this unit.
    pub fn multiplier(self) -> u64 {
        match self {
            Self::Bytes => 1,
            Self::Kilobytes => 1 << 10,
            Self::Megabytes => 1 << 20,
            Self::Gigabytes => 1 << 30,
        }
    }

    /// Lowercase unit suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Bytes => "b",
            Self::Kilobytes => "kb",
            Self::Megabytes => "mb",
            Self::Gigabytes => "gb",
        }
    }
}

impl fmt::Display for ByteSizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for ByteSizeUnit {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.suffix().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValueError::InvalidByteSize(s.to_string()))
    }
}

/// An immutable, non-negative count of bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteSizeValue(u64);

impl ByteSizeValue {
    /// Create a value from a raw byte count.
    pub fn new(bytes: u64) -> Self {
        Self(bytes)
    }

    /// Create a value from a raw numeric byte count.
    ///
    /// # Errors
    ///
    /// Rejects negative, fractional, non-finite, and unsafe-integer numbers.
    pub fn from_number(bytes: f64) -> Result<Self, ValueError> {
        if !bytes.is_finite() || bytes < 0.0 || bytes.fract() != 0.0 || bytes > MAX_SAFE_INTEGER as f64 {
            return Err(ValueError::InvalidByteCount(bytes.to_string()));
        }
        Ok(Self(bytes as u64))
    }

    /// Parse a human-readable byte size (`"512"`, `"10kb"`, `"1.5 GB"`).
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidByteSize` naming the input if it does not
    /// match the grammar, or `ValueError::Overflow` if the magnitude does not
    /// fit in 64 bits.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        let invalid = || ValueError::InvalidByteSize(text.to_string());

        let trimmed = text.trim_end();
        let split = trimmed
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(trimmed.len());
        let (magnitude, unit) = trimmed.split_at(split);

        let (whole, fraction) = match magnitude.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (magnitude, None),
        };
        if !is_digits(whole) || fraction.is_some_and(|f| !is_digits(f)) {
            return Err(invalid());
        }

        let unit = match unit.trim_start() {
            "" => ByteSizeUnit::Bytes,
            suffix => suffix.parse().map_err(|_| invalid())?,
        };

        let bytes = match fraction {
            None => whole
                .parse::<u64>()
                .ok()
                .and_then(|n| n.checked_mul(unit.multiplier()))
                .ok_or_else(|| ValueError::Overflow(text.to_string()))?,
            Some(_) => {
                let scaled = magnitude.parse::<f64>().map_err(|_| invalid())?
                    * unit.multiplier() as f64;
                if scaled >= u64::MAX as f64 {
                    return Err(ValueError::Overflow(text.to_string()));
                }
                scaled.floor() as u64
            }
        };

        Ok(Self(bytes))
    }

    /// The raw byte count.
    pub fn bytes(&self) -> u64 {
        self.0
    }

    /// Returns true if this value is strictly smaller than `other`.
    pub fn is_less_than(&self, other: &ByteSizeValue) -> bool {
        self.0 < other.0
    }

    /// Returns true if this value is strictly greater than `other`.
    pub fn is_greater_than(&self, other: &ByteSizeValue) -> bool {
        self.0 > other.0
    }

    /// Returns true if both values hold the same byte count.
    pub fn is_equal_to(&self, other: &ByteSizeValue) -> bool {
        self.0 == other.0
    }

    /// Sum of two sizes, or `None` on overflow.
    pub fn checked_add(self, other: ByteSizeValue) -> Option<ByteSizeValue> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Difference of two sizes, or `None` if `other` is larger.
    pub fn checked_sub(self, other: ByteSizeValue) -> Option<ByteSizeValue> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Render the value with a unit suffix.
    ///
    /// With `None`, uses the largest unit that divides the byte count evenly
    /// (`2048` renders as `2kb`, `1536` as `1536b`). With an explicit unit the
    /// magnitude may be fractional (`1536` in `kb` renders as `1.5kb`).
    pub fn to_string_in(&self, unit: Option<ByteSizeUnit>) -> String {
        let unit = unit.unwrap_or_else(|| self.largest_even_unit());
        let multiplier = unit.multiplier();
        if self.0 % multiplier == 0 {
            format!("{}{unit}", self.0 / multiplier)
        } else {
            format!("{}{unit}", self.0 as f64 / multiplier as f64)
        }
    }

    fn largest_even_unit(&self) -> ByteSizeUnit {
        ByteSizeUnit::ALL
            .into_iter()
            .rev()
            .find(|unit| self.0 >= unit.multiplier() && self.0 % unit.multiplier() == 0)
            .unwrap_or(ByteSizeUnit::Bytes)
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for ByteSizeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_in(None))
    }
}

impl FromStr for ByteSizeValue {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for ByteSizeValue {
    fn from(bytes: u64) -> Self {
        Self(bytes)
    }
}

impl Serialize for ByteSizeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for ByteSizeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ByteSizeVisitor)
    }
}

struct ByteSizeVisitor;

impl Visitor<'_> for ByteSizeVisitor {
    type Value = ByteSizeValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a byte count or a byte size string such as \"10kb\"")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(ByteSizeValue(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(ByteSizeValue)
            .map_err(|_| E::custom(ValueError::InvalidByteCount(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        ByteSizeValue::from_number(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        ByteSizeValue::parse(v).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_bytes() {
        assert_eq!(ByteSizeValue::parse("123").unwrap().bytes(), 123);
        assert_eq!(ByteSizeValue::parse("123b").unwrap().bytes(), 123);
    }

    #[test]
    fn test_parse_units_are_binary() {
        assert_eq!(ByteSizeValue::parse("1kb").unwrap().bytes(), 1024);
        assert_eq!(ByteSizeValue::parse("2mb").unwrap().bytes(), 2 * 1024 * 1024);
        assert_eq!(ByteSizeValue::parse("1gb").unwrap().bytes(), 1 << 30);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(ByteSizeValue::parse("1KB").unwrap(), ByteSizeValue::parse("1kb").unwrap());
        assert_eq!(ByteSizeValue::parse("3Mb").unwrap().bytes(), 3 << 20);
    }

    #[test]
    fn test_parse_allows_whitespace_before_unit() {
        assert_eq!(ByteSizeValue::parse("10 kb").unwrap().bytes(), 10 * 1024);
        assert_eq!(ByteSizeValue::parse("10kb ").unwrap().bytes(), 10 * 1024);
    }

    #[test]
    fn test_parse_rejects_leading_whitespace() {
        for input in [" 10kb", "\t512", " 1 mb"] {
            assert_eq!(
                ByteSizeValue::parse(input),
                Err(ValueError::InvalidByteSize(input.to_string())),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_fraction_is_floored() {
        assert_eq!(ByteSizeValue::parse("1.5kb").unwrap().bytes(), 1536);
        assert_eq!(ByteSizeValue::parse("0.3kb").unwrap().bytes(), 307);
        assert_eq!(ByteSizeValue::parse("1.9").unwrap().bytes(), 1);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for input in ["", "kb", "-1kb", "1..5kb", "1.kb", ".5kb", "10tb", "10 k b", "ten"] {
            let err = ByteSizeValue::parse(input).unwrap_err();
            assert_eq!(err, ValueError::InvalidByteSize(input.to_string()), "input {input:?}");
        }
    }

    #[test]
    fn test_parse_error_names_input() {
        let err = ByteSizeValue::parse("12zb").unwrap_err();
        assert!(err.to_string().contains("[12zb]"));
    }

    #[test]
    fn test_parse_overflow() {
        let err = ByteSizeValue::parse("99999999999999999999gb").unwrap_err();
        assert!(matches!(err, ValueError::Overflow(_)));
    }

    #[test]
    fn test_from_number() {
        assert_eq!(ByteSizeValue::from_number(2048.0).unwrap().bytes(), 2048);
        assert!(ByteSizeValue::from_number(-1.0).is_err());
        assert!(ByteSizeValue::from_number(1.5).is_err());
        assert!(ByteSizeValue::from_number(f64::NAN).is_err());
        assert!(ByteSizeValue::from_number(1e300).is_err());
    }

    #[test]
    fn test_from_number_error_message() {
        let err = ByteSizeValue::from_number(-1.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Value in bytes is expected to be a safe positive integer, but provided [-1]"
        );
    }

    #[test]
    fn test_ordering_ignores_construction_unit() {
        let kb = ByteSizeValue::parse("1kb").unwrap();
        assert!(kb.is_greater_than(&ByteSizeValue::new(1000)));
        assert!(ByteSizeValue::new(1000).is_less_than(&kb));
        assert!(kb.is_equal_to(&ByteSizeValue::new(1024)));
        assert!(!kb.is_less_than(&ByteSizeValue::parse("1024b").unwrap()));
    }

    #[test]
    fn test_display_uses_largest_even_unit() {
        assert_eq!(ByteSizeValue::new(0).to_string(), "0b");
        assert_eq!(ByteSizeValue::new(500).to_string(), "500b");
        assert_eq!(ByteSizeValue::new(1024).to_string(), "1kb");
        assert_eq!(ByteSizeValue::new(2048).to_string(), "2kb");
        assert_eq!(ByteSizeValue::new(1536).to_string(), "1536b");
        assert_eq!(ByteSizeValue::new(3 << 20).to_string(), "3mb");
        assert_eq!(ByteSizeValue::new(1 << 30).to_string(), "1gb");
    }

    #[test]
    fn test_to_string_in_explicit_unit() {
        let value = ByteSizeValue::new(1536);
        assert_eq!(value.to_string_in(Some(ByteSizeUnit::Bytes)), "1536b");
        assert_eq!(value.to_string_in(Some(ByteSizeUnit::Kilobytes)), "1.5kb");
        assert_eq!(ByteSizeValue::new(2048).to_string_in(Some(ByteSizeUnit::Bytes)), "2048b");
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = ByteSizeValue::parse("1kb").unwrap();
        let b = ByteSizeValue::new(24);
        assert_eq!(a.checked_add(b), Some(ByteSizeValue::new(1048)));
        assert_eq!(a.checked_sub(b), Some(ByteSizeValue::new(1000)));
        assert_eq!(b.checked_sub(a), None);
        assert_eq!(ByteSizeValue::new(u64::MAX).checked_add(b), None);
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!("KB".parse::<ByteSizeUnit>().unwrap(), ByteSizeUnit::Kilobytes);
        assert!("tb".parse::<ByteSizeUnit>().is_err());
    }

    #[test]
    fn test_serde_serializes_as_bytes() {
        let json = serde_json::to_string(&ByteSizeValue::new(2048)).unwrap();
        assert_eq!(json, "2048");
    }

    #[test]
    fn test_serde_deserializes_number_or_string() {
        let from_number: ByteSizeValue = serde_json::from_str("2048").unwrap();
        let from_string: ByteSizeValue = serde_json::from_str("\"2kb\"").unwrap();
        assert_eq!(from_number, from_string);
        assert!(serde_json::from_str::<ByteSizeValue>("-5").is_err());
        assert!(serde_json::from_str::<ByteSizeValue>("\"2zb\"").is_err());
        assert!(serde_json::from_str::<ByteSizeValue>("true").is_err());
    }
}
