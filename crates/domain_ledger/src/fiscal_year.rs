//! Fiscal years and the chain that orders them
//!
//! A book's fiscal years form one unbroken chronological sequence. The
//! first year seeds the chain; every later one must touch either end of it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use core_kernel::temporal::{format_date, is_day_after, DateRange};
use crate::error::BookError;
use crate::metadata::Metadata;

/// A contiguous accounting period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalYear {
    range: DateRange,
    /// Data attached by extensions during the creation hook
    pub metadata: Metadata,
}

impl FiscalYear {
    pub(crate) fn new(range: DateRange) -> Self {
        Self {
            range,
            metadata: Metadata::new(),
        }
    }

    /// First day of the year (inclusive)
    pub fn from(&self) -> NaiveDate {
        self.range.start
    }

    /// Last day of the year (inclusive)
    pub fn to(&self) -> NaiveDate {
        self.range.end
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.range.contains(date)
    }
}

/// Lookup key for `Book::get_fiscal_year`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FiscalYearSelector {
    /// 1-based position in the chain, i.e. the Nth year since inception
    Position(usize),
    /// Year containing the date
    Date(NaiveDate),
    /// Year containing the date, given as text
    DateText(String),
}

impl From<usize> for FiscalYearSelector {
    fn from(position: usize) -> Self {
        FiscalYearSelector::Position(position)
    }
}

impl From<i32> for FiscalYearSelector {
    fn from(position: i32) -> Self {
        // Negative positions never match
        FiscalYearSelector::Position(usize::try_from(position).unwrap_or(0))
    }
}

impl From<NaiveDate> for FiscalYearSelector {
    fn from(date: NaiveDate) -> Self {
        FiscalYearSelector::Date(date)
    }
}

impl From<&str> for FiscalYearSelector {
    fn from(text: &str) -> Self {
        FiscalYearSelector::DateText(text.to_string())
    }
}

impl From<String> for FiscalYearSelector {
    fn from(text: String) -> Self {
        FiscalYearSelector::DateText(text)
    }
}

/// Where a fiscal year ended up in the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    /// The chain was empty
    Seeded,
    Prepended,
    Appended,
}

/// Ordered, gap-free sequence of fiscal years
#[derive(Debug, Default)]
pub(crate) struct FiscalYearChain {
    years: VecDeque<FiscalYear>,
}

impl FiscalYearChain {
    /// Decides where `year` may go without modifying the chain
    ///
    /// The prepend test is applied before the append test.
    pub fn placement_for(&self, year: &FiscalYear) -> Result<Placement, BookError> {
        let (first, last) = match (self.years.front(), self.years.back()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Ok(Placement::Seeded),
        };

        if is_day_after(first.from(), year.to()) {
            Ok(Placement::Prepended)
        } else if is_day_after(year.from(), last.to()) {
            Ok(Placement::Appended)
        } else {
            Err(BookError::Adjacency {
                from: format_date(year.from()),
                to: format_date(year.to()),
            })
        }
    }

    /// Inserts `year` at the end it is adjacent to
    pub fn insert(&mut self, year: FiscalYear) -> Result<(Placement, &FiscalYear), BookError> {
        let placement = self.placement_for(&year)?;

        let index = match placement {
            Placement::Prepended => {
                self.years.push_front(year);
                0
            }
            Placement::Seeded | Placement::Appended => {
                self.years.push_back(year);
                self.years.len() - 1
            }
        };

        Ok((placement, &self.years[index]))
    }

    /// Year at 1-based `position`
    pub fn at_position(&self, position: usize) -> Option<&FiscalYear> {
        position.checked_sub(1).and_then(|index| self.years.get(index))
    }

    /// First year in chain order containing `date`
    pub fn containing(&self, date: NaiveDate) -> Option<&FiscalYear> {
        self.years.iter().find(|year| year.contains(date))
    }

    pub fn first(&self) -> Option<&FiscalYear> {
        self.years.front()
    }

    pub fn last(&self) -> Option<&FiscalYear> {
        self.years.back()
    }

    /// Range from the first year's start to the last year's end
    pub fn span(&self) -> Option<DateRange> {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => Some(DateRange {
                start: first.from(),
                end: last.to(),
            }),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FiscalYear> {
        self.years.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(y: i32) -> FiscalYear {
        FiscalYear::new(
            DateRange::new(
                NaiveDate::from_ymd_opt(y, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(y, 12, 31).unwrap(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_first_year_seeds_chain() {
        let mut chain = FiscalYearChain::default();
        let (placement, _) = chain.insert(year(2012)).unwrap();
        assert_eq!(placement, Placement::Seeded);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_prepend_and_append() {
        let mut chain = FiscalYearChain::default();
        chain.insert(year(2012)).unwrap();
        assert_eq!(chain.insert(year(2013)).unwrap().0, Placement::Appended);
        assert_eq!(chain.insert(year(2011)).unwrap().0, Placement::Prepended);

        let years: Vec<i32> = chain.iter().map(|y| chrono::Datelike::year(&y.from())).collect();
        assert_eq!(years, vec![2011, 2012, 2013]);
    }

    #[test]
    fn test_overlap_is_rejected() {
        let mut chain = FiscalYearChain::default();
        chain.insert(year(2012)).unwrap();
        let result = chain.insert(year(2012));
        assert!(matches!(result, Err(BookError::Adjacency { .. })));
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_position_is_one_based() {
        let mut chain = FiscalYearChain::default();
        chain.insert(year(2012)).unwrap();
        assert!(chain.at_position(0).is_none());
        assert!(chain.at_position(1).is_some());
        assert!(chain.at_position(2).is_none());
    }
}
