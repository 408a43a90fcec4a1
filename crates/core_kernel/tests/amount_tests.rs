//! Unit tests for the Amount module
//!
//! Tests cover creation, rounding, arithmetic and conversions used when
//! populating credit/debit lines.

use core_kernel::{Amount, CoreError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_keeps_value() {
        let a = Amount::new(dec!(150.4));
        assert_eq!(a.value(), dec!(150.4));
    }

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let a = Amount::new(dec!(100.123456789));
        assert_eq!(a.value(), dec!(100.1235));
    }

    #[test]
    fn test_from_minor_converts_ore() {
        let a = Amount::from_minor(1560);
        assert_eq!(a.value(), dec!(15.60));
    }

    #[test]
    fn test_from_integer() {
        assert_eq!(Amount::from(188).value(), dec!(188));
        assert_eq!(Amount::from(7195i64).value(), dec!(7195));
    }

    #[test]
    fn test_try_from_float() {
        let a = Amount::try_from(37.6).unwrap();
        assert_eq!(a.value(), dec!(37.6));
    }

    #[test]
    fn test_try_from_nan_fails() {
        let result = Amount::try_from(f64::NAN);
        assert!(matches!(result, Err(CoreError::InvalidArgument(_))));
    }

    #[test]
    fn test_default_is_zero() {
        assert!(Amount::default().is_zero());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_add_and_sub() {
        let a = Amount::new(dec!(29));
        let b = Amount::new(dec!(5.8));
        assert_eq!((a - b).value(), dec!(23.2));
        assert_eq!((a + b).value(), dec!(34.8));
    }

    #[test]
    fn test_add_assign() {
        let mut total = Amount::ZERO;
        total += Amount::new(dec!(1439));
        total += Amount::new(dec!(5756));
        assert_eq!(total, Amount::from(7195));
    }

    #[test]
    fn test_neg_and_abs() {
        let a = -Amount::new(dec!(12.5));
        assert!(a.is_negative());
        assert_eq!(a.abs().value(), dec!(12.5));
    }

    #[test]
    fn test_scale_by_share() {
        let a = Amount::new(dec!(31.2));
        assert_eq!(a.scale(dec!(0.5)).value(), dec!(15.6));
    }

    #[test]
    fn test_checked_add() {
        let a = Amount::new(dec!(1));
        assert_eq!(a.checked_add(&a), Some(Amount::from(2)));
    }

    #[test]
    fn test_overflow_is_reported_not_panicked() {
        let max = Amount::new(Decimal::MAX);
        let min = Amount::new(Decimal::MIN);
        let one = Amount::from(1);

        assert_eq!(max.checked_add(&one), None);
        assert_eq!(min.checked_sub(&one), None);
        assert_eq!(max + one, max);
        assert_eq!(min - one, min);
        assert_eq!([max, one].iter().sum::<Amount>(), max);
    }

    #[test]
    fn test_sum_owned_and_borrowed() {
        let parts = vec![Amount::from(1), Amount::from(2), Amount::from(3)];
        let borrowed: Amount = parts.iter().sum();
        let owned: Amount = parts.into_iter().sum();
        assert_eq!(borrowed, owned);
        assert_eq!(owned, Amount::from(6));
    }
}

mod predicates {
    use super::*;

    #[test]
    fn test_zero_is_neither_positive_nor_negative() {
        assert!(!Amount::ZERO.is_positive());
        assert!(!Amount::ZERO.is_negative());
    }

    #[test]
    fn test_positive() {
        assert!(Amount::from(1).is_positive());
    }
}
