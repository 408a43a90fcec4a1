//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for books: calendar dates, fiscal year
//! ranges, a small Swedish chart of accounts and a set of sample
//! verifications from a partnership's first year.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use domain_ledger::{Book, BookError, Verification};

/// Fixture for calendar dates
pub struct DateFixtures;

impl DateFixtures {
    /// Builds a date, for fixtures whose values are known to be valid
    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("fixture date is valid")
    }

    /// Calendar year as an inclusive `(from, to)` pair
    pub fn calendar_year(year: i32) -> (NaiveDate, NaiveDate) {
        (Self::ymd(year, 1, 1), Self::ymd(year, 12, 31))
    }

    /// Mid-year date used for containment lookups
    pub fn mid_2012() -> NaiveDate {
        Self::ymd(2012, 6, 1)
    }

    /// Range that leaves a one-month gap after calendar year 2013
    pub fn gapped_2014() -> (NaiveDate, NaiveDate) {
        (Self::ymd(2014, 2, 1), Self::ymd(2014, 12, 31))
    }
}

/// Fixture for the chart of accounts
pub struct ChartFixtures;

impl ChartFixtures {
    /// Accounts referenced by the sample verifications
    pub fn accounts() -> Vec<(u32, &'static str)> {
        vec![
            (1930, "Företagskonto"),
            (2010, "Eget kapital"),
            (2020, "Eget kapital delägare 2"),
            (2610, "Utgående moms 25%"),
            (2615, "Utgående moms import"),
            (2640, "Ingående moms"),
            (2645, "Beräknad ingående moms"),
            (2650, "Redovisningskonto för moms"),
            (3000, "Försäljning"),
            (4056, "Inköp av varor från EU"),
            (5400, "Förbrukningsinventarier"),
            (6100, "Övriga förvaltningskostnader"),
            (6500, "Övriga externa tjänster"),
            (6570, "Bankkostnader"),
            (8999, "Årets resultat"),
        ]
    }

    /// Creates every fixture account in `book`, skipping ones already there
    pub fn install(book: &mut Book) -> Result<(), BookError> {
        for (number, name) in Self::accounts() {
            if book.get_account(number)?.is_none() {
                book.create_account(number, name)?;
            }
        }
        Ok(())
    }
}

/// Fixture for verifications
pub struct VerificationFixtures;

impl VerificationFixtures {
    /// Five balanced purchases from early 2012
    ///
    /// Returns the numbers of the created verifications.
    pub fn purchases_2012(book: &mut Book) -> Result<Vec<u32>, BookError> {
        let mut numbers = Vec::new();

        numbers.push(number(
            book.create_verification("2012-02-11", "Domain names")?
                .credit(2010, 188)
                .debit(2640, dec!(37.6))
                .debit(6500, dec!(150.4)),
        ));
        numbers.push(number(
            book.create_verification("2012-03-04", "Paper holders")?
                .credit(2010, 29)
                .debit(2640, dec!(5.8))
                .debit(6100, dec!(23.2)),
        ));
        numbers.push(number(
            book.create_verification("2012-03-09", "Office stuff")?
                .credit(2010, 31)
                .debit(2640, dec!(6.2))
                .debit(6100, dec!(24.8)),
        ));
        numbers.push(number(
            book.create_verification("2012-03-09", "Post stamps")?
                .credit(2010, 18)
                .debit(2640, dec!(3.6))
                .debit(6100, dec!(14.4)),
        ));
        numbers.push(number(
            book.create_verification("2012-03-24", "iPad")?
                .credit(2020, 7195)
                .debit(2640, 1439)
                .debit(5400, 5756),
        ));

        Ok(numbers)
    }

    /// A sale whose credit side is short by 0.01
    pub fn unbalanced_sale(book: &mut Book, date: &str) -> Result<u32, BookError> {
        Ok(number(
            book.create_verification(date, "Sold product")?
                .debit(1930, 7500)
                .credit(2610, 1500)
                .credit(3000, dec!(5999.99)),
        ))
    }
}

fn number(verification: &mut Verification) -> u32 {
    verification.number().get()
}
