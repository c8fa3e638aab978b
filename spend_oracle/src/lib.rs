//! # Spend Oracle
//!
//! A Rust library for spending-forecast predictions over transaction
//! history, backed by a pretrained probabilistic sampling forecaster.
//!
//! ## Features
//!
//! - Daily series construction from dated transactions (gap-filled, summed)
//! - Probabilistic forecast bands (10th/50th/90th percentile) over any
//!   forecaster implementing the sampling contract
//! - Per-category forecast aggregation with graceful partial degradation
//! - What-if scenario arithmetic (skip / add / reduce a category's spending)
//! - Built-in inference-only samplers for running without an external model
//!
//! ## Quick Start
//!
//! ```
//! use spend_oracle::data::{DailySeries, Transaction};
//! use spend_oracle::forecaster::forecast_bands;
//! use spend_oracle::models::BootstrapSampler;
//!
//! let history = vec![
//!     ("2025-01-01".parse().unwrap(), 12.5),
//!     ("2025-01-03".parse().unwrap(), 40.0),
//!     ("2025-01-06".parse().unwrap(), 7.25),
//! ];
//! let series = DailySeries::from_daily_amounts(&history).unwrap();
//! assert_eq!(series.len(), 6); // contiguous, gap-filled with zero
//!
//! let model = BootstrapSampler::with_seed(7);
//! let bands = forecast_bands(&model, &series, 3, 20).unwrap();
//! assert_eq!(bands.horizon(), 3);
//! ```

pub mod aggregate;
pub mod data;
pub mod error;
pub mod forecaster;
pub mod models;
pub mod scenario;

// Re-export commonly used types
pub use crate::aggregate::{
    forecast_by_category, AggregatorConfig, CategoryForecastMap, CategoryForecasts, DailyTotals,
};
pub use crate::data::{DailySeries, Transaction, TransactionLoader, INCOME_CATEGORY};
pub use crate::error::{OracleError, Result};
pub use crate::forecaster::{forecast_bands, ForecastBands, SampleForecaster};
pub use crate::scenario::{apply_scenario, Scenario, ScenarioOutcome};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
