//! Monetary amounts with precise decimal arithmetic
//!
//! A book is kept in a single currency, so an amount is a plain decimal
//! value. rust_decimal avoids the floating-point drift that would otherwise
//! make balanced verifications compare unequal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

use crate::error::CoreError;

/// Number of decimal places kept internally
const STORAGE_DP: u32 = 4;

/// Number of decimal places used for display
const DISPLAY_DP: usize = 2;

/// A monetary amount
///
/// Amounts are stored with 4 decimal places so that share calculations
/// do not lose precision before they are posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Creates a new amount, rounded to the storage precision
    pub fn new(value: Decimal) -> Self {
        Self(value.round_dp(STORAGE_DP))
    }

    /// Creates an amount from an integer number of minor units (e.g. öre, cents)
    pub fn from_minor(minor_units: i64) -> Self {
        Self::new(Decimal::new(minor_units, 2))
    }

    /// Returns the decimal value
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Scales the amount by a factor, e.g. an owner's share
    pub fn scale(&self, factor: Decimal) -> Self {
        Self::new(self.0 * factor)
    }

    /// Checked addition that reports overflow instead of panicking
    pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Self::new)
    }

    /// Checked subtraction that reports overflow instead of panicking
    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Self::new)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.dp$}", self.0, dp = DISPLAY_DP)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Self(Decimal::from(value))
    }
}

impl TryFrom<f64> for Amount {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Decimal::try_from(value)
            .map(Self::new)
            .map_err(|_| CoreError::invalid_argument(format!("Invalid amount: {}", value)))
    }
}

/// Saturates at the decimal bounds; use `checked_add` to detect overflow
impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.0.saturating_sub(other.0))
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_creation() {
        let a = Amount::new(dec!(37.6));
        assert_eq!(a.value(), dec!(37.6));
    }

    #[test]
    fn test_amount_display_uses_two_decimals() {
        assert_eq!(Amount::new(dec!(188)).to_string(), "188.00");
        assert_eq!(Amount::from_minor(1505).to_string(), "15.05");
    }

    #[test]
    fn test_sum_of_lines() {
        let lines = [Amount::new(dec!(37.6)), Amount::new(dec!(150.4))];
        let total: Amount = lines.iter().sum();
        assert_eq!(total, Amount::from(188));
    }
}
