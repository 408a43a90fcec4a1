//! Verifications and their credit/debit lines
//!
//! A verification is the dated record of one business event. The book
//! assigns its number; callers then populate the lines through the fluent
//! `credit`/`debit` interface.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{Amount, VerificationNumber};
use crate::metadata::Metadata;

/// Side of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineSide {
    Debit,
    Credit,
}

/// A single credit or debit against an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Number of the account the line posts to
    pub account: u32,
    /// Amount (always as given, sign is carried by `side`)
    pub amount: Amount,
    pub side: LineSide,
}

/// A dated, described transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verification {
    number: VerificationNumber,
    date: NaiveDate,
    text: String,
    lines: Vec<Line>,
    /// Data attached by extensions during the creation hook
    pub metadata: Metadata,
}

impl Verification {
    pub(crate) fn new(number: VerificationNumber, date: NaiveDate, text: impl Into<String>) -> Self {
        Self {
            number,
            date,
            text: text.into(),
            lines: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    pub fn number(&self) -> VerificationNumber {
        self.number
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Adds a credit line
    pub fn credit(&mut self, account: u32, amount: impl Into<Amount>) -> &mut Self {
        self.lines.push(Line {
            account,
            amount: amount.into(),
            side: LineSide::Credit,
        });
        self
    }

    /// Adds a debit line
    pub fn debit(&mut self, account: u32, amount: impl Into<Amount>) -> &mut Self {
        self.lines.push(Line {
            account,
            amount: amount.into(),
            side: LineSide::Debit,
        });
        self
    }

    pub fn total_debit(&self) -> Amount {
        self.total(LineSide::Debit)
    }

    pub fn total_credit(&self) -> Amount {
        self.total(LineSide::Credit)
    }

    /// Checks that debits equal credits
    pub fn is_balanced_credit_debit(&self) -> bool {
        self.total_debit() == self.total_credit()
    }

    /// Lines posting to `account`
    pub fn lines_for(&self, account: u32) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(move |line| line.account == account)
    }

    fn total(&self, side: LineSide) -> Amount {
        self.lines
            .iter()
            .filter(|line| line.side == side)
            .map(|line| line.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn verification() -> Verification {
        Verification::new(
            VerificationNumber::FIRST,
            NaiveDate::from_ymd_opt(2012, 2, 11).unwrap(),
            "Domain names",
        )
    }

    #[test]
    fn test_balanced_lines() {
        let mut v = verification();
        v.credit(2010, 188).debit(2640, dec!(37.6)).debit(6500, dec!(150.4));

        assert!(v.is_balanced_credit_debit());
        assert_eq!(v.total_credit(), Amount::from(188));
        assert_eq!(v.lines().len(), 3);
    }

    #[test]
    fn test_unbalanced_lines() {
        let mut v = verification();
        v.credit(2010, 188).debit(6500, dec!(150.4));

        assert!(!v.is_balanced_credit_debit());
    }

    #[test]
    fn test_empty_verification_is_balanced() {
        assert!(verification().is_balanced_credit_debit());
    }
}
