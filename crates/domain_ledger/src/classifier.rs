//! Classifier registry
//!
//! Classifiers tag accounts by semantic role ("asset", "own capital John",
//! ...). Each type name holds an ordered, append-only list of predicates.

use std::collections::HashMap;
use std::fmt;

use crate::account::Account;
use crate::config::ClassifierMode;

/// Account predicate registered under a classifier type
pub type Classifier = Box<dyn Fn(&Account) -> bool>;

/// Named predicate groups owned by one book
#[derive(Default)]
pub(crate) struct ClassifierRegistry {
    classifiers: HashMap<String, Vec<Classifier>>,
}

impl ClassifierRegistry {
    pub fn add(&mut self, kind: String, classifier: Classifier) {
        self.classifiers.entry(kind).or_default().push(classifier);
    }

    /// Predicates of `kind`, or `None` when nothing is registered
    pub fn get(&self, kind: &str) -> Option<&[Classifier]> {
        self.classifiers
            .get(kind)
            .map(Vec::as_slice)
            .filter(|list| !list.is_empty())
    }

    pub fn count(&self, kind: &str) -> usize {
        self.get(kind).map_or(0, <[Classifier]>::len)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.classifiers.keys().map(String::as_str)
    }
}

impl fmt::Debug for ClassifierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.classifiers.iter().map(|(kind, list)| (kind, list.len())))
            .finish()
    }
}

/// Evaluates every predicate against `account` and combines the results
///
/// All predicates run in registration order regardless of earlier results.
pub(crate) fn matches(classifiers: &[Classifier], account: &Account, mode: ClassifierMode) -> bool {
    let mut matched = true;
    for classifier in classifiers {
        let result = classifier(account);
        matched = match mode {
            ClassifierMode::All => matched & result,
            ClassifierMode::LastWins => result,
        };
    }
    matched
}
