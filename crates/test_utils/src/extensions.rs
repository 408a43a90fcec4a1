//! Sample Extensions
//!
//! Extensions used by the test suites to exercise the hook protocol:
//! - `RecordingExtension` logs every hook call and can be told to fail
//! - `OwnerShareExtension` splits verifications between partnership owners

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::{json, Value};
use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use domain_ledger::{Account, Book, BookError, Extension, FiscalYear, Verification};

/// Metadata key under which `RecordingExtension` leaves its trail
pub const TRAIL_KEY: &str = "trail";

/// Metadata key holding the resolved owner shares
pub const OWNERS_KEY: &str = "owners";

/// Shared, inspectable log of hook invocations
pub type HookLog = Rc<RefCell<Vec<String>>>;

/// Extension that records every hook call
///
/// On `create_verification` it appends its name to the verification's
/// `trail` metadata and logs the trail it found, which lets tests see what
/// earlier extensions had already done.
pub struct RecordingExtension {
    name: String,
    log: HookLog,
    fail_apply: bool,
    fail_hooks: bool,
    findings: Vec<String>,
}

impl RecordingExtension {
    pub fn new(name: impl Into<String>, log: HookLog) -> Self {
        Self {
            name: name.into(),
            log,
            fail_apply: false,
            fail_hooks: false,
            findings: Vec::new(),
        }
    }

    /// Makes `apply` fail after logging
    pub fn failing_apply(mut self) -> Self {
        self.fail_apply = true;
        self
    }

    /// Makes both creation hooks fail
    pub fn failing_hooks(mut self) -> Self {
        self.fail_hooks = true;
        self
    }

    /// Messages returned from `doctor`
    pub fn with_findings(mut self, findings: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.findings = findings.into_iter().map(Into::into).collect();
        self
    }

    fn record(&self, entry: String) {
        self.log.borrow_mut().push(entry);
    }
}

impl Extension for RecordingExtension {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, book: &mut Book) -> Result<(), BookError> {
        let registered = book.using(&self.name)?;
        self.record(format!("{}:apply:registered={}", self.name, registered));

        if self.fail_apply {
            return Err(BookError::extension(&self.name, "apply refused"));
        }
        Ok(())
    }

    fn create_verification(&self, verification: &mut Verification, args: &[Value]) -> Result<(), BookError> {
        let mut trail: Vec<String> = verification.metadata.get_as(TRAIL_KEY).unwrap_or_default();
        self.record(format!(
            "{}:create_verification:{}:seen={}:args={}",
            self.name,
            verification.number(),
            trail.join(","),
            args.len()
        ));

        if self.fail_hooks {
            return Err(BookError::extension(&self.name, "verification refused"));
        }

        trail.push(self.name.clone());
        verification.metadata.insert(TRAIL_KEY, json!(trail));
        Ok(())
    }

    fn create_fiscal_year(&self, fiscal_year: &mut FiscalYear, args: &[Value]) -> Result<(), BookError> {
        self.record(format!(
            "{}:create_fiscal_year:{}:args={}",
            self.name,
            fiscal_year.range(),
            args.len()
        ));

        if self.fail_hooks {
            return Err(BookError::extension(&self.name, "fiscal year refused"));
        }

        fiscal_year.metadata.insert(self.name.clone(), json!(args));
        Ok(())
    }

    fn doctor(&self, _book: &Book) -> Vec<String> {
        self.record(format!("{}:doctor", self.name));
        self.findings.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Owner share argument accepted by `OwnerShareExtension`
///
/// Either positional fractions (`[0.12, 0.88]`) matched to owners in
/// order, or fractions keyed by owner name (`{"Jane": 0.34}`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OwnerShares {
    List(Vec<Decimal>),
    Named(BTreeMap<String, Decimal>),
}

/// Base number of the own capital account series
const OWN_CAPITAL_BASE: u32 = 2010;

/// Own capital classifier type covering every owner
pub const OWN_CAPITAL: &str = "Eget kapital";

/// Extension for a partnership with several owners
///
/// `apply` creates one own capital account per owner (2010, 2020, ...) and
/// a classifier type per owner. Each verification gets the owners' shares
/// of it stored under the `owners` metadata key; owners not given a share
/// split what remains of 1 equally.
pub struct OwnerShareExtension {
    owners: Vec<String>,
}

impl OwnerShareExtension {
    pub const NAME: &'static str = "OwnerShares";

    pub fn new(owners: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            owners: owners.into_iter().map(Into::into).collect(),
        }
    }

    pub fn owners(&self) -> &[String] {
        &self.owners
    }

    /// Classifier type for one owner's own capital
    pub fn own_capital_type(owner: &str) -> String {
        format!("{} {}", OWN_CAPITAL, owner)
    }

    /// Account number of the `index`th owner's own capital account
    pub fn own_capital_account(index: usize) -> u32 {
        OWN_CAPITAL_BASE + 10 * index as u32
    }

    /// Resolves the share argument into one fraction per owner
    pub fn resolve(&self, shares: Option<OwnerShares>) -> Result<BTreeMap<String, Decimal>, BookError> {
        let mut given: BTreeMap<String, Decimal> = BTreeMap::new();

        match shares {
            None => {}
            Some(OwnerShares::List(list)) => {
                if list.len() > self.owners.len() {
                    return Err(BookError::extension(Self::NAME, "more shares than owners"));
                }
                for (owner, share) in self.owners.iter().zip(list) {
                    given.insert(owner.clone(), share.round_dp(4));
                }
            }
            Some(OwnerShares::Named(named)) => {
                for (owner, share) in named {
                    if !self.owners.contains(&owner) {
                        return Err(BookError::extension(Self::NAME, format!("unknown owner {}", owner)));
                    }
                    given.insert(owner, share.round_dp(4));
                }
            }
        }

        let assigned: Decimal = given.values().sum();
        if given.values().any(|s| s.is_sign_negative()) || assigned > dec!(1) {
            return Err(BookError::extension(Self::NAME, "shares must be non-negative and sum to at most 1"));
        }

        let rest: Vec<&String> = self.owners.iter().filter(|o| !given.contains_key(*o)).collect();
        if let Some((last, others)) = rest.split_last() {
            let remainder = dec!(1) - assigned;
            let each = (remainder / Decimal::from(rest.len() as u64)).round_dp(4);
            for owner in others {
                given.insert((*owner).clone(), each);
            }
            // Last owner takes the rounding remainder so the total stays 1
            let distributed = each * Decimal::from(others.len() as u64);
            given.insert((*last).clone(), remainder - distributed);
        }

        Ok(given)
    }
}

impl Extension for OwnerShareExtension {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, book: &mut Book) -> Result<(), BookError> {
        if self.owners.is_empty() {
            book.create_account(OWN_CAPITAL_BASE, OWN_CAPITAL)?;
        }

        for (index, owner) in self.owners.iter().enumerate() {
            let number = Self::own_capital_account(index);
            book.create_account(number, Self::own_capital_type(owner))?;
            book.add_classifier(Self::own_capital_type(owner), move |a: &Account| {
                a.number().get() == number
            })?;
        }

        book.add_classifier(OWN_CAPITAL, |a: &Account| a.in_series(2000, 2099))?;
        Ok(())
    }

    fn create_verification(&self, verification: &mut Verification, args: &[Value]) -> Result<(), BookError> {
        if self.owners.is_empty() {
            return Ok(());
        }

        let shares = match args.first() {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                serde_json::from_value::<OwnerShares>(value.clone())
                    .map_err(|e| BookError::extension(Self::NAME, e.to_string()))?,
            ),
        };

        let resolved = self.resolve(shares)?;
        let value = serde_json::to_value(&resolved)
            .map_err(|e| BookError::extension(Self::NAME, e.to_string()))?;
        verification.metadata.insert(OWNERS_KEY, value);
        Ok(())
    }

    fn doctor(&self, book: &Book) -> Vec<String> {
        if self.owners.is_empty() {
            return Vec::new();
        }

        book.verifications()
            .filter_map(|v| {
                let shares: BTreeMap<String, Decimal> = v.metadata.get_as(OWNERS_KEY)?;
                let total: Decimal = shares.values().sum();
                (total != dec!(1)).then(|| {
                    format!("Owner shares of verification {} sum to {}, expected 1.", v.number(), total)
                })
            })
            .collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partnership() -> OwnerShareExtension {
        OwnerShareExtension::new(["John", "Jane"])
    }

    #[test]
    fn test_default_split_is_equal() {
        let shares = partnership().resolve(None).unwrap();
        assert_eq!(shares["John"], dec!(0.5));
        assert_eq!(shares["Jane"], dec!(0.5));
    }

    #[test]
    fn test_partial_list_fills_remainder() {
        let shares = partnership()
            .resolve(Some(OwnerShares::List(vec![dec!(0.9)])))
            .unwrap();
        assert_eq!(shares["John"], dec!(0.9));
        assert_eq!(shares["Jane"], dec!(0.1));
    }

    #[test]
    fn test_three_way_split_sums_to_one() {
        let shares = OwnerShareExtension::new(["A", "B", "C"]).resolve(None).unwrap();
        let total: Decimal = shares.values().sum();
        assert_eq!(total, dec!(1));
    }

    #[test]
    fn test_unknown_owner_is_rejected() {
        let named = BTreeMap::from([("Bob".to_string(), dec!(0.5))]);
        assert!(partnership().resolve(Some(OwnerShares::Named(named))).is_err());
    }
}
