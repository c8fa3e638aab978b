//! Bootstrap resampling forecaster

use crate::error::{OracleError, Result};
use crate::forecaster::SampleForecaster;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sampling forecaster that draws every forecasted day from the empirical
/// distribution of observed daily values. Crude but robust for spiky
/// spending series, where most days are zero and a few carry the spend.
#[derive(Debug, Clone)]
pub struct BootstrapSampler {
    /// Name of the model
    name: String,
    /// Fixed RNG seed, for deterministic sampling
    seed: Option<u64>,
}

impl BootstrapSampler {
    /// Create a new bootstrap sampler
    pub fn new() -> Self {
        Self {
            name: "Bootstrap Sampler".to_string(),
            seed: None,
        }
    }

    /// Create a new bootstrap sampler with a fixed RNG seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            name: "Bootstrap Sampler".to_string(),
            seed: Some(seed),
        }
    }
}

impl Default for BootstrapSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleForecaster for BootstrapSampler {
    fn sample_paths(
        &self,
        context: &[f64],
        horizon: usize,
        num_samples: usize,
    ) -> Result<Vec<Vec<f64>>> {
        if context.is_empty() {
            return Err(OracleError::ForecasterFailure(
                "empty conditioning context".to_string(),
            ));
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut paths = Vec::with_capacity(num_samples);
        for _ in 0..num_samples {
            let path = (0..horizon)
                .map(|_| context[rng.gen_range(0..context.len())])
                .collect();
            paths.push(path);
        }

        Ok(paths)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
