//! Test Data Builders
//!
//! Provides a builder for books in a known state. Tests specify only the
//! parts they care about; everything is applied in a fixed order:
//! extensions, accounts, then fiscal years.

use chrono::NaiveDate;

use domain_ledger::{Book, BookConfig, BookError, ClassifierMode, Extension};

use crate::fixtures::{ChartFixtures, DateFixtures};

/// Builder for constructing test books
pub struct TestBookBuilder {
    config: BookConfig,
    extensions: Vec<Box<dyn Extension>>,
    accounts: Vec<(u32, String)>,
    fiscal_years: Vec<(NaiveDate, NaiveDate)>,
    with_chart: bool,
}

impl Default for TestBookBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBookBuilder {
    /// Creates a builder for an empty book
    pub fn new() -> Self {
        Self {
            config: BookConfig::default(),
            extensions: Vec::new(),
            accounts: Vec::new(),
            fiscal_years: Vec::new(),
            with_chart: false,
        }
    }

    /// Sets the classifier combination mode
    pub fn with_classifier_mode(mut self, mode: ClassifierMode) -> Self {
        self.config = self.config.with_classifier_mode(mode);
        self
    }

    /// Registers an extension
    pub fn with_extension<E: Extension>(mut self, extension: E) -> Self {
        self.extensions.push(Box::new(extension));
        self
    }

    /// Adds a single account
    pub fn with_account(mut self, number: u32, name: impl Into<String>) -> Self {
        self.accounts.push((number, name.into()));
        self
    }

    /// Adds the fixture chart of accounts
    pub fn with_chart_of_accounts(mut self) -> Self {
        self.with_chart = true;
        self
    }

    /// Adds a fiscal year
    pub fn with_fiscal_year(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.fiscal_years.push((from, to));
        self
    }

    /// Adds one calendar-year fiscal year per year in `years`, in order
    pub fn with_calendar_years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
        self.fiscal_years
            .extend(years.into_iter().map(DateFixtures::calendar_year));
        self
    }

    /// Builds the book
    pub fn build(self) -> Result<Book, BookError> {
        let mut book = Book::with_config(self.config);

        for extension in self.extensions {
            book.use_boxed_extension(extension)?;
        }

        for (number, name) in self.accounts {
            book.create_account(number, name)?;
        }

        if self.with_chart {
            ChartFixtures::install(&mut book)?;
        }

        for (from, to) in self.fiscal_years {
            book.create_fiscal_year(from, to)?;
        }

        Ok(book)
    }
}
