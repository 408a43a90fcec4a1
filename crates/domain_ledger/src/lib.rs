//! Ledger Domain - The Book
//!
//! This crate implements the in-memory core of a double-entry bookkeeping
//! library. A [`Book`] owns the accounts, the numbered verifications and
//! the chain of fiscal years, and lets extensions attach jurisdiction
//! specific rules without touching the core.
//!
//! # Structure
//!
//! - **Accounts** are keyed by a positive number, unique per book
//! - **Verifications** are numbered 1, 2, 3, ... in creation order
//! - **Fiscal years** form one gap-free chain, extended at either end
//! - **Classifiers** group accounts by role for `Book::get_accounts`
//! - **Extensions** hook into verification and fiscal year creation and
//!   contribute to `Book::doctor`
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::Book;
//!
//! let mut book = Book::new();
//! book.create_account(1930, "Bank")?;
//! book.create_account(3000, "Försäljning")?;
//! book.create_fiscal_year("2012-01-01", "2012-12-31")?;
//!
//! book.create_verification("2012-10-04", "Sold product")?
//!     .debit(1930, dec!(6000))
//!     .credit(3000, dec!(6000));
//!
//! assert!(book.doctor().is_empty());
//! ```

pub mod account;
pub mod book;
pub mod classifier;
pub mod config;
pub mod doctor;
pub mod error;
pub mod extension;
pub mod fiscal_year;
pub mod metadata;
pub mod verification;

pub use account::Account;
pub use book::Book;
pub use classifier::Classifier;
pub use config::{BookConfig, ClassifierMode};
pub use doctor::Diagnostic;
pub use error::BookError;
pub use extension::Extension;
pub use fiscal_year::{FiscalYear, FiscalYearSelector};
pub use metadata::Metadata;
pub use verification::{Line, LineSide, Verification};
