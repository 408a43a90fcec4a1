//! Unit tests for the Temporal module
//!
//! Tests cover date parsing, formatting, range containment and the
//! one-day adjacency test used for fiscal year chaining.

use chrono::NaiveDate;
use core_kernel::temporal::{
    format_date, is_day_after, is_within_range, parse_date, DateRange, IntoDate, TemporalError,
};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod parsing {
    use super::*;

    #[test]
    fn test_parse_iso_format() {
        assert_eq!(parse_date("2013-12-31").unwrap(), date(2013, 12, 31));
    }

    #[test]
    fn test_parse_compact_format() {
        assert_eq!(parse_date("20130121").unwrap(), date(2013, 1, 21));
    }

    #[test]
    fn test_parse_rfc3339_keeps_date_part() {
        assert_eq!(parse_date("2012-03-24T10:15:00Z").unwrap(), date(2012, 3, 24));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_date(" 2012-02-11 ").unwrap(), date(2012, 2, 11));
    }

    #[test]
    fn test_parse_rejects_impossible_day() {
        let result = parse_date("2013-02-29");
        assert_eq!(result, Err(TemporalError::InvalidDate("2013-02-29".to_string())));
    }

    #[test]
    fn test_parse_rejects_empty_text() {
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_into_date_for_text_and_dates() {
        assert_eq!("2012-06-01".into_date().unwrap(), date(2012, 6, 1));
        assert_eq!(String::from("2012-06-01").into_date().unwrap(), date(2012, 6, 1));
        assert_eq!(date(2012, 6, 1).into_date().unwrap(), date(2012, 6, 1));
    }
}

mod formatting {
    use super::*;

    #[test]
    fn test_format_pads_month_and_day() {
        assert_eq!(format_date(date(2012, 2, 1)), "2012-02-01");
    }
}

mod containment {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        let from = Some(date(2012, 1, 1));
        let to = Some(date(2012, 12, 31));
        assert!(is_within_range(date(2012, 1, 1), from, to));
        assert!(is_within_range(date(2012, 12, 31), from, to));
        assert!(!is_within_range(date(2013, 1, 1), from, to));
        assert!(!is_within_range(date(2011, 12, 31), from, to));
    }

    #[test]
    fn test_open_bounds() {
        assert!(is_within_range(date(1900, 1, 1), None, Some(date(2012, 1, 1))));
        assert!(is_within_range(date(2100, 1, 1), Some(date(2012, 1, 1)), None));
        assert!(is_within_range(date(2012, 1, 1), None, None));
    }
}

mod date_range {
    use super::*;

    #[test]
    fn test_new_rejects_inverted_range() {
        let result = DateRange::new(date(2012, 12, 31), date(2012, 1, 1));
        assert!(matches!(result, Err(TemporalError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(date(2012, 5, 5), date(2012, 5, 5)).unwrap();
        assert_eq!(range.days(), 1);
        assert!(range.contains(date(2012, 5, 5)));
    }

    #[test]
    fn test_is_followed_by() {
        let y2012 = DateRange::new(date(2012, 1, 1), date(2012, 12, 31)).unwrap();
        let y2013 = DateRange::new(date(2013, 1, 1), date(2013, 12, 31)).unwrap();
        assert!(y2012.is_followed_by(&y2013));
        assert!(!y2013.is_followed_by(&y2012));
    }
}

mod adjacency {
    use super::*;

    #[test]
    fn test_leap_day_boundary() {
        assert!(is_day_after(date(2012, 3, 1), date(2012, 2, 29)));
        assert!(is_day_after(date(2012, 2, 29), date(2012, 2, 28)));
    }

    #[test]
    fn test_same_day_is_not_adjacent() {
        assert!(!is_day_after(date(2012, 3, 1), date(2012, 3, 1)));
    }
}

proptest! {
    #[test]
    fn prop_format_then_parse_is_identity(days in 0i64..100_000) {
        let d = date(1970, 1, 1) + chrono::Duration::days(days);
        prop_assert_eq!(parse_date(&format_date(d)).unwrap(), d);
    }

    #[test]
    fn prop_successor_is_day_after(days in 0i64..100_000) {
        let d = date(1970, 1, 1) + chrono::Duration::days(days);
        let next = d.succ_opt().unwrap();
        prop_assert!(is_day_after(next, d));
        prop_assert!(!is_day_after(d, next));
    }
}
