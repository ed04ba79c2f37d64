//! Integer-cents money type
//!
//! All ledger arithmetic happens on whole cents. Rounding happens exactly once,
//! when a value enters the system through [`Money::from_decimal`] or a random
//! integer-cents draw, and formatting happens only at the display boundary.

use super::error::StatementError;
use num_format::{Locale, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// A monetary amount stored as a whole number of cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Whole dollars, for writing catalog bounds
    pub const fn from_units(units: i64) -> Self {
        Money(units * 100)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Convert a decimal to cents, rounding half away from zero
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` when the value does not fit in `i64` cents.
    pub fn from_decimal(value: Decimal) -> Result<Self, StatementError> {
        value
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Money)
            .ok_or_else(|| StatementError::invalid_amount(value))
    }

    /// Exact decimal value of this amount
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Parse a display string such as `$1,234.56` back into money
    ///
    /// Currency prefixes and thousands separators are ignored.
    pub fn from_display_str(text: &str) -> Result<Self, StatementError> {
        let cleaned: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        let value =
            Decimal::from_str(&cleaned).map_err(|_| StatementError::invalid_amount(text))?;
        Money::from_decimal(value)
    }

    /// Fixed two-decimal, thousands-grouped rendering
    ///
    /// The prefix goes between the sign and the digits: `-$1,234.56`.
    pub fn to_display_string(self, prefix: Option<&str>) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = (abs / 100).to_formatted_string(&Locale::en);
        format!(
            "{}{}{}.{:02}",
            sign,
            prefix.unwrap_or_default(),
            whole,
            abs % 100
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string(None))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl TryFrom<Decimal> for Money {
    type Error = StatementError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Money::from_decimal(value)
    }
}
