//! Custom Test Assertions
//!
//! Provides assertion helpers for book invariants that give more
//! meaningful failure messages than chains of `assert_eq!`.

use chrono::Duration;

use domain_ledger::{Book, Diagnostic, Verification};

/// Asserts that the fiscal years form one gap-free, non-overlapping chain
///
/// # Panics
///
/// Panics naming the first pair of neighbouring years that do not touch.
pub fn assert_chain_contiguous(book: &Book) {
    let years: Vec<_> = book.fiscal_years().collect();

    for pair in years.windows(2) {
        let (earlier, later) = (&pair[0], &pair[1]);
        assert!(
            earlier.from() <= earlier.to(),
            "Fiscal year {} ends before it starts",
            earlier.range()
        );
        assert_eq!(
            earlier.to() + Duration::days(1),
            later.from(),
            "Fiscal years {} and {} are not adjacent",
            earlier.range(),
            later.range()
        );
    }
}

/// Asserts that the verifications are numbered exactly 1..=N
pub fn assert_dense_numbering(book: &Book) {
    let numbers: Vec<u32> = book.verifications().map(|v| v.number().get()).collect();
    let expected: Vec<u32> = (1..=numbers.len() as u32).collect();

    assert_eq!(numbers, expected, "Verification numbers are not dense");
    assert_eq!(
        book.next_verification_number(),
        numbers.len() as u32 + 1,
        "Next verification number does not follow the last one"
    );
}

/// Asserts that a verification's debit and credit totals are equal
pub fn assert_balanced(verification: &Verification) {
    assert!(
        verification.is_balanced_credit_debit(),
        "Verification {} is unbalanced: debit={}, credit={}",
        verification.number(),
        verification.total_debit(),
        verification.total_credit()
    );
}

/// Asserts that some diagnostic renders to exactly `message`
pub fn assert_diagnostic(diagnostics: &[Diagnostic], message: &str) {
    let rendered: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
    assert!(
        rendered.iter().any(|r| r == message),
        "No diagnostic reads {:?}; got {:#?}",
        message,
        rendered
    );
}

/// Asserts that some diagnostic mentions `fragment`
pub fn assert_diagnostic_mentions(diagnostics: &[Diagnostic], fragment: &str) {
    let rendered: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
    assert!(
        rendered.iter().any(|r| r.contains(fragment)),
        "No diagnostic mentions {:?}; got {:#?}",
        fragment,
        rendered
    );
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Asserts that a result is an Err matching `$pattern`
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(_) => panic!("Expected Err matching {}, got Ok", stringify!($pattern)),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}
