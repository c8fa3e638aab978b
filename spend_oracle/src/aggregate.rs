//! Per-category forecast aggregation

use crate::data::{DailySeries, Transaction};
use crate::error::{OracleError, Result};
use crate::forecaster::{forecast_bands, SampleForecaster, DEFAULT_SAMPLE_COUNT};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Minimum transaction count for a category to be forecast at all.
/// Rare categories below this threshold carry too little signal.
pub const MIN_CATEGORY_TRANSACTIONS: usize = 10;

/// Mapping from category label to per-date point estimates
pub type CategoryForecastMap = BTreeMap<String, BTreeMap<NaiveDate, f64>>;

/// Per-date totals
pub type DailyTotals = BTreeMap<NaiveDate, f64>;

/// Tuning knobs for the aggregator
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Categories with fewer transactions than this are silently omitted
    pub min_transactions: usize,
    /// Sample paths drawn per category forecast
    pub num_samples: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            min_transactions: MIN_CATEGORY_TRANSACTIONS,
            num_samples: DEFAULT_SAMPLE_COUNT,
        }
    }
}

/// Per-category point estimates plus the recombined baseline totals
#[derive(Debug, Clone)]
pub struct CategoryForecasts {
    /// Category label -> date -> point estimate
    pub categories: CategoryForecastMap,
    /// Date -> sum of all included categories' point estimates
    pub baseline: DailyTotals,
}

/// Group non-income transactions into per-category (date, amount) rows
fn group_by_category(transactions: &[Transaction]) -> BTreeMap<&str, Vec<(NaiveDate, f64)>> {
    let mut groups: BTreeMap<&str, Vec<(NaiveDate, f64)>> = BTreeMap::new();
    for transaction in transactions {
        if transaction.is_income() {
            continue;
        }
        groups
            .entry(transaction.category.as_str())
            .or_default()
            .push((transaction.date, transaction.amount));
    }
    groups
}

/// Forecast each category's spending independently over `target_dates`.
///
/// Transactions are grouped by category (income excluded); every category
/// with at least `config.min_transactions` of history is run through series
/// construction and the forecaster, and its median band is zipped onto the
/// requested dates. Categories below the threshold are omitted without
/// error, and a category whose forecast fails is logged and skipped so the
/// remaining categories still complete; partial results are valid.
///
/// The baseline total for every requested date is the sum of all included
/// categories' point estimates on that date. If no category survives at
/// all, the request cannot produce a usable baseline and an error is
/// returned: `ForecasterFailure` when at least one forecast attempt failed,
/// `InsufficientData` when every category was below the threshold.
///
/// Categories are processed in sorted order and the result is keyed by
/// category, so completion order can never affect the output.
pub fn forecast_by_category<F>(
    model: &F,
    transactions: &[Transaction],
    target_dates: &[NaiveDate],
    config: &AggregatorConfig,
) -> Result<CategoryForecasts>
where
    F: SampleForecaster + ?Sized,
{
    if target_dates.is_empty() {
        return Err(OracleError::InvalidDateRange(
            "no target dates requested".to_string(),
        ));
    }

    let horizon = target_dates.len();
    let mut categories = CategoryForecastMap::new();
    let mut failures = 0usize;

    for (category, rows) in group_by_category(transactions) {
        if rows.len() < config.min_transactions {
            tracing::debug!(
                category,
                count = rows.len(),
                "category below history threshold, omitted"
            );
            continue;
        }

        let forecast = DailySeries::from_daily_amounts(&rows)
            .and_then(|series| forecast_bands(model, &series, horizon, config.num_samples));
        match forecast {
            Ok(bands) => {
                let by_date: BTreeMap<NaiveDate, f64> = target_dates
                    .iter()
                    .copied()
                    .zip(bands.median().iter().copied())
                    .collect();
                categories.insert(category.to_string(), by_date);
            }
            Err(err) => {
                tracing::warn!(category, error = %err, "category forecast failed, omitted");
                failures += 1;
            }
        }
    }

    if categories.is_empty() {
        return Err(if failures > 0 {
            OracleError::ForecasterFailure(
                "every category forecast failed; no baseline can be built".to_string(),
            )
        } else {
            OracleError::InsufficientData(
                "no category has enough history to forecast".to_string(),
            )
        });
    }

    let baseline: DailyTotals = target_dates
        .iter()
        .map(|date| {
            let total = categories
                .values()
                .map(|by_date| by_date.get(date).copied().unwrap_or(0.0))
                .sum();
            (*date, total)
        })
        .collect();

    Ok(CategoryForecasts {
        categories,
        baseline,
    })
}
