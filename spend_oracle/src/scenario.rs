//! What-if scenario adjustments over per-category forecasts

use crate::aggregate::{CategoryForecastMap, DailyTotals};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Directive to drop a category's spending entirely
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkipExpense {
    /// Whether the directive applies
    #[serde(default)]
    pub active: bool,
    /// Target category
    pub category: String,
}

/// Directive to scale a category's spending by a fraction
/// (0.2 means 20% of the category's forecast)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseShift {
    /// Whether the directive applies
    #[serde(default)]
    pub active: bool,
    /// Target category
    pub category: String,
    /// Fraction of the category's forecast to add or remove
    pub percent: f64,
}

/// A set of up to three independent what-if adjustments.
///
/// Directives are additive, not mutually exclusive: every active directive
/// applies, in a fixed order, even when several target the same category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    /// Remove a category's forecast from the total
    #[serde(default)]
    pub skip_expense: Option<SkipExpense>,
    /// Add a surcharge proportional to a category's forecast
    #[serde(default)]
    pub new_expense: Option<ExpenseShift>,
    /// Remove a fraction of a category's forecast
    #[serde(default)]
    pub reduce_expense: Option<ExpenseShift>,
}

/// Baseline and adjusted totals, both covering exactly the requested dates
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    /// Totals without any directive applied
    pub baseline: DailyTotals,
    /// Totals after all active directives
    pub adjusted: DailyTotals,
}

/// A category's point estimate for a date; absent categories and dates
/// contribute zero, so directives over unknown categories are no-ops
fn category_value(categories: &CategoryForecastMap, category: &str, date: NaiveDate) -> f64 {
    categories
        .get(category)
        .and_then(|by_date| by_date.get(&date))
        .copied()
        .unwrap_or(0.0)
}

/// Apply a scenario's active directives to the baseline totals.
///
/// Directives apply in a fixed order: skip, then new, then reduce. The
/// baseline is returned untouched alongside the adjusted totals. Pure
/// function over its inputs.
pub fn apply_scenario(
    baseline: &DailyTotals,
    categories: &CategoryForecastMap,
    scenario: &Scenario,
) -> ScenarioOutcome {
    let mut adjusted = baseline.clone();

    if let Some(skip) = scenario.skip_expense.as_ref().filter(|d| d.active) {
        for (date, total) in adjusted.iter_mut() {
            *total -= category_value(categories, &skip.category, *date);
        }
    }

    if let Some(new) = scenario.new_expense.as_ref().filter(|d| d.active) {
        for (date, total) in adjusted.iter_mut() {
            *total += category_value(categories, &new.category, *date) * new.percent;
        }
    }

    if let Some(reduce) = scenario.reduce_expense.as_ref().filter(|d| d.active) {
        for (date, total) in adjusted.iter_mut() {
            *total -= category_value(categories, &reduce.category, *date) * reduce.percent;
        }
    }

    ScenarioOutcome {
        baseline: baseline.clone(),
        adjusted,
    }
}
