//! Amount type for handling the money values of a week.
//!
//! This module provides the `Amount` type which wraps `Decimal`. Input is parsed leniently: a
//! currency symbol, thousands separators and trailing garbage are tolerated, and anything that
//! does not start with a number is zero.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// The currency symbols that are stripped from the front of user input.
const CURRENCY_SYMBOLS: &[char] = &['R', '$', '€', '£'];

/// Larger exponents are treated as out of `Decimal` range.
const MAX_EXPONENT: u64 = 100;

/// Represents a money value, such as a week's deposit or the net of a month.
///
/// # Examples
///
/// Lenient parsing, the way a browser's `parseFloat` treats form input:
/// ```
/// # use business_tracker::model::Amount;
/// assert_eq!(Amount::parse_lenient("R 1,250.50").to_string(), "1250.50");
/// assert_eq!(Amount::parse_lenient("12abc").to_string(), "12.00");
/// assert!(Amount::parse_lenient("").is_zero());
/// assert!(Amount::parse_lenient("abc").is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// The largest amount a single week can hold, one trillion. Edits above it are capped.
    pub const MAX_ENTRY: Amount = Amount(Decimal::from_parts(3_567_587_328, 232, 0, false, 0));

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    /// Parses form input. Never fails: input without a leading number is zero.
    ///
    /// A number too large for `Decimal` saturates, and one too small to represent is zero.
    pub fn parse_lenient(s: &str) -> Self {
        let trimmed = s.trim();
        let trimmed = trimmed.trim_start_matches(CURRENCY_SYMBOLS).trim_start();
        let without_commas = trimmed.replace(',', "");
        let prefix = numeric_prefix(&without_commas);
        if prefix.is_empty() {
            return Self::ZERO;
        }
        let (mantissa, exponent) = match prefix.find(['e', 'E']) {
            Some(ix) => (&prefix[..ix], Some(&prefix[ix + 1..])),
            None => (prefix, None),
        };
        let (negative, digits) = match mantissa.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, mantissa.trim_start_matches('+')),
        };
        let sign = if negative { "-" } else { "" };
        let digits = digits.trim_end_matches('.');
        let digits = if digits.starts_with('.') {
            format!("0{digits}")
        } else {
            digits.to_string()
        };

        let exp = match exponent.map(|e| e.trim_start_matches('+').parse::<i64>()) {
            None => 0,
            Some(Ok(e)) => e,
            // Too many exponent digits to be anything but huge or tiny.
            Some(Err(_)) if exponent.is_some_and(|e| e.starts_with('-')) => i64::MIN,
            Some(Err(_)) => i64::MAX,
        };
        let parsed = match exp {
            0 => Decimal::from_str(&format!("{sign}{digits}")).ok(),
            e if e.unsigned_abs() <= MAX_EXPONENT => {
                Decimal::from_scientific(&format!("{sign}{digits}e{e}")).ok()
            }
            _ => None,
        };
        match parsed {
            Some(d) => Self(d),
            None if exp < 0 || digits.trim_matches(['0', '.']).is_empty() => Self::ZERO,
            None if negative => Self(Decimal::MIN),
            None => Self(Decimal::MAX),
        }
    }

    /// Caps the amount at `MAX_ENTRY`.
    pub fn capped(self) -> Self {
        self.min(Self::MAX_ENTRY)
    }

    /// Returns the amount rounded half away from zero to exactly two decimal places.
    pub fn to_fixed(&self) -> String {
        let mut value = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(2);
        value.to_string()
    }

    /// Formats with thousands separators and a currency symbol, e.g. `R 12,500.00`.
    pub fn display_with(&self, currency: &str) -> String {
        let n = format_num::format_num!(",.2", self.0.to_f64().unwrap_or_default());
        if currency.is_empty() {
            n
        } else {
            format!("{currency} {n}")
        }
    }
}

/// Finds the longest prefix of `s` that reads as a decimal number, e.g. `-12.5` in `-12.5kg` or
/// `1.5e3` in `1.5e3x`.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        end = 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return "";
    }
    // An exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-') | Some(b'+')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }
    &s[..end]
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fixed())
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount(value)
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Amount(Decimal::from(value))
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Stored blobs hold plain JSON numbers. Values a number would not carry exactly are
        // written as strings, which `visit_str` reads back unchanged.
        if self.0.fract().is_zero() {
            if let Some(i) = self.0.to_i64() {
                return serializer.serialize_i64(i);
            }
        }
        let text = self.0.to_string();
        match f64::from_str(&text) {
            Ok(f) if from_f64_text(f) == Some(self.0) => serializer.serialize_f64(f),
            _ => serializer.serialize_str(&text),
        }
    }
}

/// Reads `v` through its shortest round-trip text, which is what a writer of `1234.56` meant.
fn from_f64_text(v: f64) -> Option<Decimal> {
    Decimal::from_str(&v.to_string()).ok()
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

/// Accepts numbers, numeric strings and `null`. Anything unreadable is zero.
struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, a numeric string or null")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        Ok(from_f64_text(v)
            .or_else(|| Decimal::from_f64(v))
            .map(Amount)
            .unwrap_or_default())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Ok(Amount::parse_lenient(v))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Amount, E> {
        Ok(Amount::ZERO)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::ZERO)
    }

    fn visit_none<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::ZERO)
    }
}
