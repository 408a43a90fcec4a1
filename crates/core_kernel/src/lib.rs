//! Core Kernel - Foundational types and utilities for the bookkeeping core
//!
//! This crate provides the leaf building blocks used by the ledger:
//! - Date parsing, formatting and range containment
//! - Decimal amounts for credit/debit lines
//! - Typed account and verification numbers

pub mod amount;
pub mod temporal;
pub mod identifiers;
pub mod error;

pub use amount::Amount;
pub use temporal::{DateRange, IntoDate, TemporalError};
pub use identifiers::{AccountNumber, VerificationNumber};
pub use error::CoreError;
