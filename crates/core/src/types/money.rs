//! Monetary amounts in US dollars.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul, Sub};
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Money`] amount.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The input string is empty.
    #[error("amount cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("amount must be a number")]
    NotANumber,
}

/// A dollar amount held as an exact decimal.
///
/// `Display` renders the amount the way every page of the back office shows
/// it: a leading `$`, thousands separators and two decimal places.
///
/// ```
/// use stockinvent_core::Money;
///
/// let total = Money::parse("12450.75").unwrap();
/// assert_eq!(total.to_string(), "$12,450.75");
/// assert_eq!(total.to_plain_string(), "$12450.75");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wrap a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Build an amount from whole cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Parse user input such as `1499.99`, `$1,499.99` or ` 20 `.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Empty`] for blank input and
    /// [`MoneyError::NotANumber`] when the remainder is not a decimal.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let trimmed = input.trim();
        let cleaned: String = trimmed
            .strip_prefix('$')
            .unwrap_or(trimmed)
            .chars()
            .filter(|c| *c != ',')
            .collect();

        if cleaned.is_empty() {
            return Err(MoneyError::Empty);
        }

        Decimal::from_str(&cleaned)
            .map(Self)
            .map_err(|_| MoneyError::NotANumber)
    }

    /// The underlying decimal.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// True when the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// True when the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Largest whole dollar amount not above this one.
    #[must_use]
    pub fn floor(&self) -> Self {
        Self(self.0.floor())
    }

    /// Smallest whole dollar amount not below this one.
    #[must_use]
    pub fn ceil(&self) -> Self {
        Self(self.0.ceil())
    }

    /// Whole percentage this amount makes up of `total`, or `None` when
    /// `total` is zero.
    #[must_use]
    pub fn percent_of(&self, total: Self) -> Option<Decimal> {
        self.0
            .checked_div(total.0)?
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|share| share.round())
    }

    /// Lossy conversion for chart data.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    /// `$1234.50` with no thousands separators, as used in CSV exports.
    #[must_use]
    pub fn to_plain_string(&self) -> String {
        format!("${:.2}", self.0.round_dp(2))
    }

    /// `1234.50` with no currency sign, as used to prefill form inputs.
    #[must_use]
    pub fn to_input_string(&self) -> String {
        format!("{:.2}", self.0.round_dp(2))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = format!("{:.2}", self.0.abs().round_dp(2));
        let (whole, cents) = rounded.split_once('.').unwrap_or((&rounded, "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{sign}${grouped}.{cents}")
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

// Arithmetic saturates at the decimal bounds; stored amounts are not
// trusted to stay small.
impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, qty: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(qty)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_cents(1_245_075).to_string(), "$12,450.75");
        assert_eq!(Money::from_cents(157_855_000).to_string(), "$1,578,550.00");
        assert_eq!(Money::from_cents(4999).to_string(), "$49.99");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
        assert_eq!(Money::from_cents(-12_000).to_string(), "-$120.00");
    }

    #[test]
    fn test_parse_accepts_currency_input() {
        assert_eq!(Money::parse("1499.99").unwrap(), Money::from_cents(149_999));
        assert_eq!(Money::parse(" $1,499.99 ").unwrap(), Money::from_cents(149_999));
        assert_eq!(Money::parse("20").unwrap().to_plain_string(), "$20.00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse("   "), Err(MoneyError::Empty));
        assert_eq!(Money::parse("$"), Err(MoneyError::Empty));
        assert_eq!(Money::parse("twelve"), Err(MoneyError::NotANumber));
    }

    #[test]
    fn test_arithmetic() {
        let unit = Money::from_cents(129_999);
        assert_eq!(unit * 5, Money::from_cents(649_995));
        let total: Money = [unit, Money::from_cents(1)].iter().sum();
        assert_eq!(total, Money::from_cents(130_000));
        assert_eq!(Money::from_cents(4999).floor(), Money::from_cents(4900));
        assert_eq!(Money::from_cents(4999).ceil(), Money::from_cents(5000));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::new(Decimal::MAX);
        assert_eq!(huge * 2, huge);
        assert_eq!(huge + Money::from_cents(1), huge);
        assert_eq!(Money::new(Decimal::MIN) - Money::from_cents(1), Money::new(Decimal::MIN));
        let total: Money = [huge, huge, huge].iter().sum();
        assert_eq!(total, huge);
    }

    #[test]
    fn test_percent_of() {
        let part = Money::from_cents(2_500);
        assert_eq!(part.percent_of(Money::from_cents(10_000)), Some(Decimal::from(25)));
        assert_eq!(part.percent_of(Money::ZERO), None);
        assert_eq!(
            Money::new(Decimal::MAX).percent_of(Money::new(Decimal::MAX)),
            Some(Decimal::ONE_HUNDRED)
        );
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::from_cents(1).is_positive());
        assert!(!Money::ZERO.is_positive());
        assert!(Money::from_cents(-1).is_negative());
    }
}
