//! Transaction records and daily series construction

use crate::error::{OracleError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Category label that marks money coming in rather than going out.
/// Income rows are excluded before any spending aggregation.
pub const INCOME_CATEGORY: &str = "income";

/// A single dated transaction, as returned by the transaction store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Calendar date the transaction was recorded on
    pub date: NaiveDate,
    /// Signed amount
    pub amount: f64,
    /// User-assigned category label (e.g. "food", "rent")
    pub category: String,
}

impl Transaction {
    /// Create a new transaction record
    pub fn new(date: NaiveDate, amount: f64, category: impl Into<String>) -> Self {
        Self {
            date,
            amount,
            category: category.into(),
        }
    }

    /// Whether this transaction belongs to the income category
    pub fn is_income(&self) -> bool {
        self.category == INCOME_CATEGORY
    }
}

/// Loader for transaction records
#[derive(Debug)]
pub struct TransactionLoader;

impl TransactionLoader {
    /// Load transaction records from a CSV file with `date,amount,category` columns
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut transactions = Vec::new();
        for record in reader.deserialize() {
            transactions.push(record?);
        }
        Ok(transactions)
    }
}

/// A contiguous daily spending series, gap-filled with zero.
///
/// Spans every calendar day from the earliest to the latest observed date;
/// each day's value is the sum of all amounts recorded on that day. The
/// representation (start date plus a dense value vector) makes the series
/// invariants hold by construction: dates strictly increasing, no
/// duplicates, no gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    /// First observed date
    start: NaiveDate,
    /// One summed value per day, starting at `start`
    values: Vec<f64>,
}

impl DailySeries {
    /// Build a daily series from (date, amount) pairs.
    ///
    /// Amounts recorded on the same day are summed; days with no recorded
    /// amounts between the first and last observed date get value 0. The
    /// result is a pure function of the input multiset, so input ordering
    /// does not matter. An empty input is an error.
    pub fn from_daily_amounts(amounts: &[(NaiveDate, f64)]) -> Result<Self> {
        let first = amounts.iter().map(|(date, _)| *date).min();
        let last = amounts.iter().map(|(date, _)| *date).max();
        let (start, end) = match (first, last) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(OracleError::InsufficientData(
                    "cannot build a series from zero transactions".to_string(),
                ))
            }
        };

        let len = (end - start).num_days() as usize + 1;
        let mut values = vec![0.0; len];
        for (date, amount) in amounts {
            let offset = (*date - start).num_days() as usize;
            values[offset] += amount;
        }

        Ok(Self { start, values })
    }

    /// First date covered by the series
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date covered by the series
    pub fn end(&self) -> NaiveDate {
        self.start + chrono::Days::new(self.values.len() as u64 - 1)
    }

    /// Daily values, one per calendar day from `start()` to `end()`
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The dates covered by the series, in order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take(self.values.len())
    }

    /// Number of days covered
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series covers no days
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all daily values (equals the sum of the input amounts)
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Whether every daily value is exactly zero
    pub fn is_all_zero(&self) -> bool {
        self.values.iter().all(|value| *value == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_single_day_series() {
        let series = DailySeries::from_daily_amounts(&[(day("2025-01-10"), 42.0)]).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.start(), series.end());
        assert_eq!(series.values(), &[42.0]);
    }

    #[test]
    fn test_same_day_amounts_are_summed() {
        let series = DailySeries::from_daily_amounts(&[
            (day("2025-01-10"), 10.0),
            (day("2025-01-10"), 5.0),
        ])
        .unwrap();
        assert_eq!(series.values(), &[15.0]);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let result = DailySeries::from_daily_amounts(&[]);
        assert!(matches!(result, Err(OracleError::InsufficientData(_))));
    }

    #[test]
    fn test_income_detection() {
        let rent = Transaction::new(day("2025-01-01"), 1000.0, "rent");
        let salary = Transaction::new(day("2025-01-01"), 3000.0, INCOME_CATEGORY);
        assert!(!rent.is_income());
        assert!(salary.is_income());
    }
}
