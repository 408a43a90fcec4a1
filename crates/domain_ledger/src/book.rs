//! The book aggregate
//!
//! This module provides the single entry point callers and extensions use.
//! The book owns every account, verification and fiscal year, enforces the
//! structural invariants and dispatches extension hooks.

use chrono::NaiveDate;
use serde_json::Value;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{debug, info, instrument, warn};

use core_kernel::temporal::is_within_range;
use core_kernel::{AccountNumber, CoreError, DateRange, IntoDate, VerificationNumber};

use crate::account::Account;
use crate::classifier::{self, ClassifierRegistry};
use crate::config::{BookConfig, ClassifierMode};
use crate::doctor::Diagnostic;
use crate::error::BookError;
use crate::extension::{Extension, ExtensionRegistry};
use crate::fiscal_year::{FiscalYear, FiscalYearChain, FiscalYearSelector};
use crate::verification::Verification;

/// A bookkeeping book holding accounts, verifications and fiscal years
///
/// # Invariants
///
/// - At most one account per account number
/// - Verification numbers are dense: 1..=N for N verifications created
/// - Fiscal years form one contiguous, non-overlapping chain
///
/// A book is a single-threaded object graph. Callers sharing one between
/// threads must serialize access themselves, e.g. behind a `Mutex`.
#[derive(Debug, Default)]
pub struct Book {
    /// Accounts keyed by number
    accounts: BTreeMap<AccountNumber, Account>,
    /// Verifications keyed by number
    verifications: BTreeMap<VerificationNumber, Verification>,
    /// Verifications created so far
    num_verifications: u32,
    fiscal_years: FiscalYearChain,
    classifiers: ClassifierRegistry,
    extensions: ExtensionRegistry,
    config: BookConfig,
}

impl Book {
    /// Creates an empty book with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty book with the given configuration
    pub fn with_config(config: BookConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Extensions
    // ------------------------------------------------------------------

    /// Registers an extension and runs its `apply`
    ///
    /// The extension is registered before `apply` runs, so `using` and
    /// `get_extension` already see it from inside `apply`, and its own hooks
    /// fire for whatever `apply` creates. If `apply` fails the registration
    /// is withdrawn; changes `apply` made to the book before failing stay.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the extension has an empty name
    /// - `DuplicateExtension` if the name is already registered
    /// - whatever `apply` returns
    pub fn use_extension<E: Extension>(&mut self, extension: E) -> Result<&mut Self, BookError> {
        self.use_boxed_extension(Box::new(extension))
    }

    /// Same as `use_extension` for an already boxed extension
    #[instrument(skip_all, fields(extension = %extension.name()))]
    pub fn use_boxed_extension(&mut self, extension: Box<dyn Extension>) -> Result<&mut Self, BookError> {
        let extension: Rc<dyn Extension> = Rc::from(extension);
        let name = extension.name().to_string();
        if name.is_empty() {
            return Err(BookError::invalid_argument("Invalid extension: name is empty"));
        }

        self.extensions.register(Rc::clone(&extension))?;

        if let Err(error) = extension.apply(self) {
            warn!(%error, "Extension apply failed, withdrawing registration");
            self.extensions.release(&name);
            return Err(error);
        }

        info!("Extension applied");
        Ok(self)
    }

    /// Returns whether an extension named `name` is registered
    pub fn using(&self, name: &str) -> Result<bool, BookError> {
        if name.is_empty() {
            return Err(BookError::invalid_argument("Invalid extension name"));
        }
        Ok(self.extensions.contains(name))
    }

    /// Returns the registered extension named `name`
    pub fn get_extension(&self, name: &str) -> Option<&dyn Extension> {
        self.extensions.get(name)
    }

    /// Returns the registered extension named `name` as its concrete type
    pub fn get_extension_as<T: Extension>(&self, name: &str) -> Option<&T> {
        self.get_extension(name)
            .and_then(|extension| extension.as_any().downcast_ref::<T>())
    }

    /// Names of registered extensions in registration order
    pub fn extension_names(&self) -> impl Iterator<Item = &str> {
        self.extensions.names()
    }

    // ------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------

    /// Creates a new account and adds it to the book
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `number` is not a positive integer
    /// - `DuplicateAccount` if the number is taken
    pub fn create_account<N>(&mut self, number: N, name: impl Into<String>) -> Result<&Account, BookError>
    where
        N: TryInto<AccountNumber, Error = CoreError>,
    {
        let number = number.try_into()?;

        match self.accounts.entry(number) {
            Entry::Occupied(_) => Err(BookError::DuplicateAccount(number)),
            Entry::Vacant(slot) => {
                let account = slot.insert(Account::new(number, name));
                debug!(number = %account.number(), name = %account.name(), "Account created");
                Ok(account)
            }
        }
    }

    /// Looks an account up by number
    ///
    /// Accepts integers and numeric text. A miss is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `number` is not numeric or not positive.
    pub fn get_account<N>(&self, number: N) -> Result<Option<&Account>, BookError>
    where
        N: TryInto<AccountNumber, Error = CoreError>,
    {
        let number = number.try_into()?;
        Ok(self.accounts.get(&number))
    }

    /// Looks an account up by an already validated number
    pub fn account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.get(&number)
    }

    /// All accounts in ascending number order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    // ------------------------------------------------------------------
    // Verifications
    // ------------------------------------------------------------------

    /// Creates the next verification
    ///
    /// See `create_verification_with`.
    pub fn create_verification(
        &mut self,
        date: impl IntoDate,
        text: impl Into<String>,
    ) -> Result<&mut Verification, BookError> {
        self.create_verification_with(date, text, &[])
    }

    /// Creates the next verification, forwarding `args` to extension hooks
    ///
    /// The verification is numbered and stored before the hooks run, then
    /// returned so the caller can add its lines:
    ///
    /// ```rust,ignore
    /// book.create_verification("2012-02-11", "Domain names")?
    ///     .credit(2010, dec!(188))
    ///     .debit(2640, dec!(37.6))
    ///     .debit(6500, dec!(150.4));
    /// ```
    ///
    /// # Errors
    ///
    /// - `InvalidDate` if `date` cannot be parsed
    /// - `NumberingCollision` if the allocated number is in use
    /// - any error returned by an extension hook; the verification stays
    ///   in the book with its number
    #[instrument(skip_all, fields(args = args.len()))]
    pub fn create_verification_with(
        &mut self,
        date: impl IntoDate,
        text: impl Into<String>,
        args: &[Value],
    ) -> Result<&mut Verification, BookError> {
        let date = date.into_date()?;
        let number = self.allocate_verification_number()?;

        let verification = match self.verifications.entry(number) {
            Entry::Occupied(_) => return Err(BookError::NumberingCollision(number)),
            Entry::Vacant(slot) => slot.insert(Verification::new(number, date, text)),
        };
        self.num_verifications += 1;
        debug!(%number, %date, "Verification created");

        for extension in self.extensions.iter() {
            debug!(extension = extension.name(), "Dispatching create_verification");
            extension.create_verification(verification, args)?;
        }

        Ok(verification)
    }

    fn allocate_verification_number(&self) -> Result<VerificationNumber, BookError> {
        let next = self
            .num_verifications
            .checked_add(1)
            .ok_or_else(|| BookError::invalid_argument("verification numbers exhausted"))?;
        Ok(VerificationNumber::new(next)?)
    }

    /// Returns the verification numbered `number`
    pub fn get_verification(&self, number: u32) -> Option<&Verification> {
        let number = VerificationNumber::new(number).ok()?;
        self.verifications.get(&number)
    }

    /// Mutable access for adding lines after creation
    pub fn get_verification_mut(&mut self, number: u32) -> Option<&mut Verification> {
        let number = VerificationNumber::new(number).ok()?;
        self.verifications.get_mut(&number)
    }

    /// Verifications dated within `[from, to]`, in number order
    ///
    /// A `None` bound leaves that side open.
    pub fn get_verifications(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Vec<&Verification> {
        self.verifications
            .values()
            .filter(|v| is_within_range(v.date(), from, to))
            .collect()
    }

    /// All verifications in number order
    pub fn verifications(&self) -> impl Iterator<Item = &Verification> {
        self.verifications.values()
    }

    /// Number the next verification will get; does not allocate it
    pub fn next_verification_number(&self) -> u32 {
        self.num_verifications.saturating_add(1)
    }

    // ------------------------------------------------------------------
    // Fiscal years
    // ------------------------------------------------------------------

    /// Creates a fiscal year and adds it to the chain
    ///
    /// See `create_fiscal_year_with`.
    pub fn create_fiscal_year(&mut self, from: impl IntoDate, to: impl IntoDate) -> Result<&FiscalYear, BookError> {
        self.create_fiscal_year_with(from, to, &[])
    }

    /// Creates a fiscal year, forwarding `args` to extension hooks
    ///
    /// Hooks run before insertion. The year must then either end the day
    /// before the chain starts or start the day after it ends.
    ///
    /// # Errors
    ///
    /// - `InvalidDate` if a date cannot be parsed
    /// - `InvalidArgument` if `from` is after `to`
    /// - any error returned by an extension hook
    /// - `Adjacency` if the year touches neither end of the chain
    #[instrument(skip_all, fields(args = args.len()))]
    pub fn create_fiscal_year_with(
        &mut self,
        from: impl IntoDate,
        to: impl IntoDate,
        args: &[Value],
    ) -> Result<&FiscalYear, BookError> {
        let range = DateRange::new(from.into_date()?, to.into_date()?)?;
        let mut fiscal_year = FiscalYear::new(range);

        for extension in self.extensions.iter() {
            debug!(extension = extension.name(), "Dispatching create_fiscal_year");
            extension.create_fiscal_year(&mut fiscal_year, args)?;
        }

        match self.fiscal_years.insert(fiscal_year) {
            Ok((placement, fiscal_year)) => {
                debug!(%range, ?placement, "Fiscal year added");
                Ok(fiscal_year)
            }
            Err(error) => {
                warn!(%range, "Fiscal year rejected, not adjacent to the current range");
                Err(error)
            }
        }
    }

    /// Returns the fiscal year matching `selector`
    ///
    /// A position selects the Nth year of the chain (1 is the first). A date
    /// selects the first year containing it. A miss is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// `InvalidDate` if a textual date cannot be parsed.
    pub fn get_fiscal_year(&self, selector: impl Into<FiscalYearSelector>) -> Result<Option<&FiscalYear>, BookError> {
        let found = match selector.into() {
            FiscalYearSelector::Position(position) => self.fiscal_years.at_position(position),
            FiscalYearSelector::Date(date) => self.fiscal_years.containing(date),
            FiscalYearSelector::DateText(text) => self.fiscal_years.containing(text.into_date()?),
        };
        Ok(found)
    }

    /// The most recent fiscal year
    pub fn last_fiscal_year(&self) -> Option<&FiscalYear> {
        self.fiscal_years.last()
    }

    /// Fiscal years in chronological order
    pub fn fiscal_years(&self) -> impl Iterator<Item = &FiscalYear> {
        self.fiscal_years.iter()
    }

    // ------------------------------------------------------------------
    // Classifiers
    // ------------------------------------------------------------------

    /// Appends `classifier` to the predicates of `kind`
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `kind` is empty.
    pub fn add_classifier<F>(&mut self, kind: impl Into<String>, classifier: F) -> Result<(), BookError>
    where
        F: Fn(&Account) -> bool + 'static,
    {
        let kind = kind.into();
        if kind.is_empty() {
            return Err(BookError::invalid_argument("Invalid type."));
        }

        debug!(%kind, "Classifier added");
        self.classifiers.add(kind, Box::new(classifier));
        Ok(())
    }

    /// Returns whether `kind` has at least one predicate
    pub fn has_classifier(&self, kind: &str) -> bool {
        self.classifiers.get(kind).is_some()
    }

    /// Number of predicates registered for `kind`
    pub fn classifier_count(&self, kind: &str) -> usize {
        self.classifiers.count(kind)
    }

    /// Registered classifier type names, in no particular order
    pub fn classifier_types(&self) -> impl Iterator<Item = &str> {
        self.classifiers.kinds()
    }

    /// Accounts matching the classifier type `kind`, in number order
    ///
    /// `None` (or an empty name) returns every account. Predicates are
    /// combined according to `BookConfig::classifier_mode`.
    ///
    /// # Errors
    ///
    /// `InvalidClassifierType` if `kind` has no predicates.
    pub fn get_accounts(&self, kind: Option<&str>) -> Result<Vec<&Account>, BookError> {
        let kind = match kind.filter(|k| !k.is_empty()) {
            Some(kind) => kind,
            None => return Ok(self.accounts.values().collect()),
        };

        let classifiers = self
            .classifiers
            .get(kind)
            .ok_or_else(|| BookError::InvalidClassifierType(kind.to_string()))?;

        let mode: ClassifierMode = self.config.classifier_mode;
        Ok(self
            .accounts
            .values()
            .filter(|account| classifier::matches(classifiers, account, mode))
            .collect())
    }

    // ------------------------------------------------------------------
    // Consistency
    // ------------------------------------------------------------------

    /// Lists consistency problems without modifying the book
    ///
    /// Findings come in this order: unbalanced verifications, verifications
    /// without fiscal years or outside the fiscal year chain, then each
    /// extension's own findings in registration order.
    pub fn doctor(&self) -> Vec<Diagnostic> {
        let mut diagnostics: Vec<Diagnostic> = self
            .verifications
            .values()
            .filter(|v| !v.is_balanced_credit_debit())
            .map(|v| Diagnostic::UnbalancedVerification { verification: v.number() })
            .collect();

        match self.fiscal_years.span() {
            None if !self.verifications.is_empty() => {
                diagnostics.push(Diagnostic::MissingFiscalYears);
            }
            None => {}
            Some(range) => diagnostics.extend(
                self.verifications
                    .values()
                    .filter(|v| !range.contains(v.date()))
                    .map(|v| Diagnostic::OutsideFiscalYears {
                        verification: v.number(),
                        range,
                    }),
            ),
        }

        for extension in self.extensions.iter() {
            diagnostics.extend(extension.doctor(self).into_iter().map(|message| {
                Diagnostic::Extension {
                    extension: extension.name().to_string(),
                    message,
                }
            }));
        }

        if !diagnostics.is_empty() {
            warn!(findings = diagnostics.len(), "Doctor found problems");
        }
        diagnostics
    }

    /// Reserved for exporting the book
    pub fn export(&self) -> Result<(), BookError> {
        Err(BookError::Unsupported("export"))
    }
}
