//! Strongly-typed numbers for book entities
//!
//! Accounts and verifications are keyed by positive integers. Newtype
//! wrappers keep an account number from being passed where a verification
//! number is expected, and centralize the positivity check.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

macro_rules! define_number {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u32", into = "u32")]
        pub struct $name(u32);

        impl $name {
            /// Creates a number, rejecting zero
            pub fn new(value: u32) -> Result<Self, CoreError> {
                if value == 0 {
                    return Err(CoreError::invalid_argument(concat!($label, " must be positive")));
                }
                Ok(Self(value))
            }

            /// Returns the underlying integer
            pub fn get(&self) -> u32 {
                self.0
            }

            /// Returns the number that follows this one, `None` past `u32::MAX`
            pub fn next(&self) -> Option<Self> {
                self.0.checked_add(1).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s.trim().parse::<u32>().map_err(|_| {
                    CoreError::invalid_argument(format!(concat!("Invalid ", $label, ": {}"), s))
                })?;
                Self::new(value)
            }
        }

        impl TryFrom<u32> for $name {
            type Error = CoreError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = CoreError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                let value = u32::try_from(value).map_err(|_| {
                    CoreError::invalid_argument(format!(concat!("Invalid ", $label, ": {}"), value))
                })?;
                Self::new(value)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = CoreError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                let value = u32::try_from(value).map_err(|_| {
                    CoreError::invalid_argument(format!(concat!("Invalid ", $label, ": {}"), value))
                })?;
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = CoreError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for u32 {
            fn from(number: $name) -> u32 {
                number.0
            }
        }
    };
}

define_number!(AccountNumber, "account number");
define_number!(VerificationNumber, "verification number");

impl VerificationNumber {
    /// The number given to the first verification of a book
    pub const FIRST: VerificationNumber = VerificationNumber(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_number_display() {
        let number = AccountNumber::new(1930).unwrap();
        assert_eq!(number.to_string(), "1930");
    }

    #[test]
    fn test_zero_is_rejected() {
        assert!(matches!(AccountNumber::new(0), Err(CoreError::InvalidArgument(_))));
        assert!(VerificationNumber::try_from(0u32).is_err());
    }

    #[test]
    fn test_verification_number_sequence() {
        let first = VerificationNumber::FIRST;
        assert_eq!(first.get(), 1);
        assert_eq!(first.next().map(|n| n.get()), Some(2));
    }
}
