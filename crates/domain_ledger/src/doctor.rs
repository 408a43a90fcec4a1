//! Read-only consistency checks over a book
//!
//! The doctor never fails on bad data; it lists findings instead.

use serde::Serialize;
use std::fmt;

use core_kernel::{DateRange, VerificationNumber};

/// One finding reported by `Book::doctor`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Debits and credits of a verification differ
    UnbalancedVerification {
        verification: VerificationNumber,
    },
    /// Verifications exist but no fiscal year does
    MissingFiscalYears,
    /// Verification dated outside the fiscal year chain
    OutsideFiscalYears {
        verification: VerificationNumber,
        range: DateRange,
    },
    /// Finding reported by an extension
    Extension {
        extension: String,
        message: String,
    },
}

impl Diagnostic {
    /// Number of the verification the finding is about, if any
    pub fn verification(&self) -> Option<VerificationNumber> {
        match self {
            Diagnostic::UnbalancedVerification { verification }
            | Diagnostic::OutsideFiscalYears { verification, .. } => Some(*verification),
            Diagnostic::MissingFiscalYears | Diagnostic::Extension { .. } => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnbalancedVerification { verification } => {
                write!(f, "Invalid verification: {} is unbalanced.", verification)
            }
            Diagnostic::MissingFiscalYears => {
                write!(f, "Verifications exists without any fiscal years present.")
            }
            Diagnostic::OutsideFiscalYears { verification, range } => write!(
                f,
                "Verification out of fiscal years range. Verification: {}. Fiscal year range: {}.",
                verification, range
            ),
            Diagnostic::Extension { message, .. } => write!(f, "{}", message),
        }
    }
}
