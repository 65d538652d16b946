//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so that totals and averages do not
//! accumulate floating-point error. Notion delivers numbers as f64; they are
//! rounded to the nearest cent once, on the way in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Largest magnitude accepted from outside, in cents (2^62)
///
/// Leaves headroom so sums of a few extreme values stay representable;
/// arithmetic saturates beyond that.
pub const MAX_CENTS: i64 = 1 << 62;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use notion_expenses::models::Money;
    /// let amount = Money::from_cents(2350); // 23.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from a floating-point value in currency units
    ///
    /// Returns `None` for NaN, infinities and magnitudes of `MAX_CENTS` or more.
    ///
    /// # Examples
    /// ```
    /// use notion_expenses::models::Money;
    /// assert_eq!(Money::from_f64(23.5).unwrap().cents(), 2350);
    /// assert!(Money::from_f64(f64::NAN).is_none());
    /// ```
    pub fn from_f64(value: f64) -> Option<Self> {
        let cents = (value * 100.0).round();
        if cents.is_finite() && cents.abs() < MAX_CENTS as f64 {
            Some(Self(cents as i64))
        } else {
            None
        }
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the amount in currency units
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).unsigned_abs() as i64
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value, saturating at `i64::MAX`
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Divide evenly into `parts`, rounding half away from zero
    ///
    /// Returns zero when `parts` is zero.
    pub fn average(&self, parts: usize) -> Self {
        if parts == 0 {
            return Self::zero();
        }
        let parts = parts as i64;
        let half = parts / 2;
        let rounded = if self.0 >= 0 {
            self.0.saturating_add(half) / parts
        } else {
            self.0.saturating_sub(half) / parts
        };
        Self(rounded)
    }

    /// Format with a currency symbol and thousands separators
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            group_thousands(self.units().unsigned_abs()),
            self.cents_part()
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol(""))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Serde adapter writing `Money` as a number in currency units (23.5)
///
/// Use with `#[serde(with = "crate::models::money::units")]` on document
/// formats meant for people; the cache keeps plain cents.
pub mod units {
    use super::Money;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.as_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_f64(value)
            .ok_or_else(|| D::Error::custom(format!("amount out of range: {}", value)))
    }
}
