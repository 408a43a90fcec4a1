//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating book inputs that keep the
//! domain rules intact: positive account numbers, parseable dates and
//! fiscal years that can be chained.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::Amount;

/// Strategy for valid account numbers in the BAS range
pub fn account_number_strategy() -> impl Strategy<Value = u32> {
    1000u32..10000u32
}

/// Strategy for account numbers the book must reject
pub fn invalid_account_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("0".to_string()),
        Just("-1".to_string()),
        Just(String::new()),
        "[a-z]{1,8}",
    ]
}

/// Strategy for account names
pub fn account_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-zåäö]{2,12}( [a-zåäö]{2,8})?"
}

/// Strategy for dates between 2000 and 2040
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..14_600i64).prop_map(|days| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default() + Duration::days(days)
    })
}

/// Strategy for dates rendered as `YYYY-MM-DD` text
pub fn date_text_strategy() -> impl Strategy<Value = String> {
    date_strategy().prop_map(|date| date.format("%Y-%m-%d").to_string())
}

/// Strategy for positive amounts with two decimals
pub fn amount_strategy() -> impl Strategy<Value = Amount> {
    (1i64..10_000_000i64).prop_map(|cents| Amount::new(Decimal::new(cents, 2)))
}

/// Strategy for fiscal year lengths in days, from a month to eighteen months
pub fn fiscal_year_length_strategy() -> impl Strategy<Value = i64> {
    28i64..550i64
}

/// A fiscal year request: `to` is inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSpec {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Strategy for a run of adjacent fiscal years around a seed year
///
/// Yields the seed followed by years that each attach to one end of the
/// range built so far, so every request should be accepted in order.
pub fn adjacent_years_strategy(max_extra: usize) -> impl Strategy<Value = Vec<YearSpec>> {
    (
        date_strategy(),
        fiscal_year_length_strategy(),
        proptest::collection::vec((any::<bool>(), fiscal_year_length_strategy()), 0..=max_extra),
    )
        .prop_map(|(start, length, extra)| {
            let seed = YearSpec {
                from: start,
                to: start + Duration::days(length - 1),
            };
            let (mut first, mut last) = (seed.from, seed.to);
            let mut years = vec![seed];

            for (prepend, length) in extra {
                let year = if prepend {
                    let to = first - Duration::days(1);
                    YearSpec {
                        from: to - Duration::days(length - 1),
                        to,
                    }
                } else {
                    let from = last + Duration::days(1);
                    YearSpec {
                        from,
                        to: from + Duration::days(length - 1),
                    }
                };
                first = first.min(year.from);
                last = last.max(year.to);
                years.push(year);
            }

            years
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn account_numbers_are_positive(number in account_number_strategy()) {
            prop_assert!(number > 0);
        }

        #[test]
        fn amounts_are_positive(amount in amount_strategy()) {
            prop_assert!(amount.is_positive());
        }

        #[test]
        fn adjacent_years_are_well_formed(years in adjacent_years_strategy(5)) {
            prop_assert!(!years.is_empty());
            for year in &years {
                prop_assert!(year.from <= year.to);
            }
        }

        #[test]
        fn date_text_parses_back(text in date_text_strategy()) {
            prop_assert!(core_kernel::temporal::parse_date(&text).is_ok());
        }
    }
}
