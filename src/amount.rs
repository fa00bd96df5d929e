//! Non-negative monetary amount with 2 decimal places precision.
//!
//! Uses `rust_decimal` internally with scale enforcement so that summing
//! millions of ledger rows never accumulates floating-point error.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A payment amount that is always non-negative and carries exactly
/// 2 decimal places.
///
/// Negative values are rejected at parse time; a negative ledger amount is
/// malformed input, not a refund.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use suspension_reports::Amount;
///
/// let amount = Amount::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.50");
/// assert!(Amount::from_str("-1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

/// Error returned when a string is not a valid non-negative amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    /// The string is not a decimal number at all.
    NotANumber(String),
    /// The string parsed but the value is below zero.
    Negative(String),
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::NotANumber(s) => write!(f, "`{}` is not a number", s),
            ParseAmountError::Negative(s) => write!(f, "`{}` is negative", s),
        }
    }
}

impl std::error::Error for ParseAmountError {}

impl Amount {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut decimal = Decimal::from_str(trimmed)
            .map_err(|_| ParseAmountError::NotANumber(trimmed.to_string()))?;
        if decimal.is_sign_negative() {
            if !decimal.is_zero() {
                return Err(ParseAmountError::Negative(trimmed.to_string()));
            }
            // "-0.00" would otherwise keep its sign through Display
            decimal = Decimal::ZERO;
        }
        decimal.rescale(Self::SCALE);
        Ok(Amount(decimal))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let mut sum = self.0 + rhs.0;
        sum.rescale(Self::SCALE);
        Amount(sum)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
        self.0.rescale(Self::SCALE);
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:.2}", self.0))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_normalizes_scale() {
        let a = Amount::from_str("1").unwrap();
        assert_eq!(a.to_string(), "1.00");

        let a = Amount::from_str("1.5").unwrap();
        assert_eq!(a.to_string(), "1.50");

        let a = Amount::from_str("1.25").unwrap();
        assert_eq!(a.to_string(), "1.25");

        let a = Amount::from_str("  2.5  ").unwrap();
        assert_eq!(a.to_string(), "2.50");
    }

    #[test]
    fn test_rejects_negative() {
        assert_eq!(
            Amount::from_str("-1.0"),
            Err(ParseAmountError::Negative("-1.0".to_string()))
        );
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert!(matches!(
            Amount::from_str("abc"),
            Err(ParseAmountError::NotANumber(_))
        ));
        assert!(matches!(
            Amount::from_str(""),
            Err(ParseAmountError::NotANumber(_))
        ));
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let a = Amount::from_str("-0.00").unwrap();
        assert!(a.is_zero());
    }

    #[test]
    fn test_addition_preserves_scale() {
        let a = Amount::from_str("1.5").unwrap();
        let b = Amount::from_str("2.25").unwrap();
        assert_eq!((a + b).to_string(), "3.75");

        let mut c = Amount::ZERO;
        c += a;
        c += b;
        assert_eq!(c.to_string(), "3.75");
    }

    #[test]
    fn test_zero_constant() {
        assert!(Amount::ZERO.is_zero());
    }
}
