//! # Spend Oracle Workspace
//!
//! Workspace facade re-exporting the spending-forecast pipeline from the
//! `spend_oracle` member crate. The `oracle_server` member exposes the same
//! pipeline over HTTP.
//!
//! ## Example
//!
//! ```
//! use spend_oracle_workspace::{DailySeries, forecast_bands};
//! use spend_oracle_workspace::models::BootstrapSampler;
//!
//! let history = vec![
//!     ("2025-01-01".parse().unwrap(), 15.0),
//!     ("2025-01-02".parse().unwrap(), 30.0),
//! ];
//! let series = DailySeries::from_daily_amounts(&history).unwrap();
//! let bands = forecast_bands(&BootstrapSampler::with_seed(1), &series, 7, 20).unwrap();
//! assert_eq!(bands.horizon(), 7);
//! ```

pub use spend_oracle::{
    aggregate, apply_scenario, data, error, forecast_bands, forecast_by_category, forecaster,
    models, scenario, AggregatorConfig, CategoryForecastMap, CategoryForecasts, DailySeries,
    DailyTotals, ForecastBands, OracleError, Result, SampleForecaster, Scenario, ScenarioOutcome,
    Transaction, TransactionLoader, INCOME_CATEGORY,
};
