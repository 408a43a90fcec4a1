//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! bookkeeping test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built dates, fiscal years and a small chart of accounts
//! - `builders`: Builder for books with accounts and fiscal years in place
//! - `extensions`: Sample extensions exercising the hook protocol
//! - `assertions`: Custom assertion helpers for book invariants
//! - `generators`: Property-based test data generators
//! - `telemetry`: One-time tracing subscriber setup for tests

pub mod fixtures;
pub mod builders;
pub mod extensions;
pub mod assertions;
pub mod generators;
pub mod telemetry;

pub use fixtures::*;
pub use builders::*;
pub use extensions::*;
pub use assertions::*;
pub use generators::*;
pub use telemetry::*;
