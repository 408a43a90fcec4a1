//! Accounts of the book
//!
//! An account is identified by its number within a book. Everything beyond
//! number and name (type, reporting category) is left to classifiers and
//! extensions.

use serde::{Deserialize, Serialize};

use core_kernel::AccountNumber;

/// A named ledger account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    number: AccountNumber,
    /// Account name, e.g. "Eget kapital"
    pub name: String,
}

impl Account {
    /// Creates a new account
    ///
    /// Accounts are created through `Book::create_account`, which enforces
    /// number uniqueness.
    pub(crate) fn new(number: AccountNumber, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
        }
    }

    /// The account number, fixed at creation
    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the account number lies in `[low, high]`
    ///
    /// Charts of accounts group accounts by number series, so most
    /// classifiers are range checks.
    pub fn in_series(&self, low: u32, high: u32) -> bool {
        (low..=high).contains(&self.number.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_new() {
        let account = Account::new(AccountNumber::new(1930).unwrap(), "Bank");
        assert_eq!(account.number().get(), 1930);
        assert_eq!(account.name(), "Bank");
    }

    #[test]
    fn test_in_series() {
        let account = Account::new(AccountNumber::new(2640).unwrap(), "Ingående moms");
        assert!(account.in_series(2600, 2699));
        assert!(!account.in_series(3000, 3999));
    }
}
