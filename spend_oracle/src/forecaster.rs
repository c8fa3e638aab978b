//! Probabilistic forecast bands over an opaque sampling forecaster

use crate::data::DailySeries;
use crate::error::{OracleError, Result};
use serde::Serialize;
use statrs::statistics::{Data, OrderStatistics};

/// Default number of sample paths drawn per forecast.
/// Higher counts trade latency for tighter quantile estimates.
pub const DEFAULT_SAMPLE_COUNT: usize = 20;

const LOW_QUANTILE: f64 = 0.1;
const MEDIAN_QUANTILE: f64 = 0.5;
const HIGH_QUANTILE: f64 = 0.9;

/// Contract of the pretrained probabilistic forecaster.
///
/// Implementations are loaded once at startup and used read-only: inference
/// is stateless, so concurrent calls need no extra synchronization. Given
/// the conditioning context (one value per historical day), a horizon and a
/// sample count, the forecaster returns `num_samples` sample paths, each of
/// horizon length.
pub trait SampleForecaster: Send + Sync {
    /// Draw sample paths for the next `horizon` steps after the context
    fn sample_paths(
        &self,
        context: &[f64],
        horizon: usize,
        num_samples: usize,
    ) -> Result<Vec<Vec<f64>>>;

    /// Name of the forecaster
    fn name(&self) -> &str;
}

/// Forecast result for a horizon of N future days: point estimate plus
/// low/high quantile bounds, aligned index-for-index
#[derive(Debug, Clone, Serialize)]
pub struct ForecastBands {
    median: Vec<f64>,
    low: Vec<f64>,
    high: Vec<f64>,
}

impl ForecastBands {
    /// Create a new set of forecast bands
    pub fn new(median: Vec<f64>, low: Vec<f64>, high: Vec<f64>) -> Result<Self> {
        if median.len() != low.len() || median.len() != high.len() {
            return Err(OracleError::InvalidParameter(format!(
                "Band lengths differ: median {}, low {}, high {}",
                median.len(),
                low.len(),
                high.len()
            )));
        }

        Ok(Self { median, low, high })
    }

    /// Number of forecasted days
    pub fn horizon(&self) -> usize {
        self.median.len()
    }

    /// Point estimates (50th percentile)
    pub fn median(&self) -> &[f64] {
        &self.median
    }

    /// Lower bounds (10th percentile)
    pub fn low(&self) -> &[f64] {
        &self.low
    }

    /// Upper bounds (90th percentile)
    pub fn high(&self) -> &[f64] {
        &self.high
    }

    /// Serialize the bands to a JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|err| OracleError::ForecasterFailure(format!("cannot encode bands: {err}")))
    }
}

/// Forecast the next `horizon` days after the series' last observed date.
///
/// Invokes the forecaster once with the series values as conditioning
/// context, then derives the 10th/50th/90th empirical quantiles per horizon
/// step from the returned sample paths. Band ordering is clamped so that
/// `low[i] <= median[i] <= high[i]` even if the sampling model misbehaves.
///
/// A degenerate series (all zero) or a forecaster error surfaces as
/// `ForecasterFailure`; callers forecasting many categories should treat
/// that as "skip this category" rather than aborting the whole request.
pub fn forecast_bands<F>(
    model: &F,
    series: &DailySeries,
    horizon: usize,
    num_samples: usize,
) -> Result<ForecastBands>
where
    F: SampleForecaster + ?Sized,
{
    if horizon == 0 {
        return Err(OracleError::InvalidParameter(
            "Horizon must be positive".to_string(),
        ));
    }
    if num_samples == 0 {
        return Err(OracleError::InvalidParameter(
            "Sample count must be positive".to_string(),
        ));
    }
    if series.is_empty() || series.is_all_zero() {
        return Err(OracleError::ForecasterFailure(
            "degenerate series: no non-zero history to condition on".to_string(),
        ));
    }

    let paths = model.sample_paths(series.values(), horizon, num_samples)?;
    if paths.is_empty() {
        return Err(OracleError::ForecasterFailure(format!(
            "{} returned no sample paths",
            model.name()
        )));
    }
    for path in &paths {
        if path.len() != horizon {
            return Err(OracleError::ForecasterFailure(format!(
                "{} returned a path of length {} for horizon {}",
                model.name(),
                path.len(),
                horizon
            )));
        }
    }

    let mut median = Vec::with_capacity(horizon);
    let mut low = Vec::with_capacity(horizon);
    let mut high = Vec::with_capacity(horizon);

    for step in 0..horizon {
        let mut samples = Data::new(paths.iter().map(|path| path[step]).collect::<Vec<f64>>());
        let mid = samples.quantile(MEDIAN_QUANTILE);
        median.push(mid);
        low.push(samples.quantile(LOW_QUANTILE).min(mid));
        high.push(samples.quantile(HIGH_QUANTILE).max(mid));
    }

    ForecastBands::new(median, low, high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DailySeries;

    #[derive(Debug)]
    struct FixedPaths(Vec<Vec<f64>>);

    impl SampleForecaster for FixedPaths {
        fn sample_paths(
            &self,
            _context: &[f64],
            _horizon: usize,
            _num_samples: usize,
        ) -> Result<Vec<Vec<f64>>> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn series() -> DailySeries {
        let start: chrono::NaiveDate = "2025-01-01".parse().unwrap();
        DailySeries::from_daily_amounts(&[(start, 10.0), (start + chrono::Days::new(2), 20.0)])
            .unwrap()
    }

    #[test]
    fn test_quantiles_from_sample_paths() {
        let model = FixedPaths(vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]]);
        let bands = forecast_bands(&model, &series(), 2, 3).unwrap();
        assert_eq!(bands.horizon(), 2);
        assert_eq!(bands.median(), &[2.0, 2.0]);
        for i in 0..2 {
            assert!(bands.low()[i] <= bands.median()[i]);
            assert!(bands.median()[i] <= bands.high()[i]);
        }
    }

    #[test]
    fn test_path_length_mismatch_is_a_failure() {
        let model = FixedPaths(vec![vec![1.0]]);
        let result = forecast_bands(&model, &series(), 2, 1);
        assert!(matches!(result, Err(OracleError::ForecasterFailure(_))));
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let model = FixedPaths(vec![vec![1.0]]);
        let result = forecast_bands(&model, &series(), 0, 1);
        assert!(matches!(result, Err(OracleError::InvalidParameter(_))));
    }

    #[test]
    fn test_all_zero_series_rejected() {
        let start: chrono::NaiveDate = "2025-01-01".parse().unwrap();
        let flat = DailySeries::from_daily_amounts(&[(start, 0.0)]).unwrap();
        let model = FixedPaths(vec![vec![1.0]]);
        let result = forecast_bands(&model, &flat, 1, 1);
        assert!(matches!(result, Err(OracleError::ForecasterFailure(_))));
    }
}
