//! Exponential-smoothing sampler

use crate::error::{OracleError, Result};
use crate::forecaster::SampleForecaster;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Sampling forecaster built on simple exponential smoothing.
///
/// The context is folded into a smoothed level; the spread of the one-step-
/// ahead smoothing errors gives the noise scale. Each sample path is the
/// level plus Gaussian noise per step, so quantiles over many paths recover
/// a confidence band around the level.
#[derive(Debug, Clone)]
pub struct SmoothingSampler {
    /// Name of the model
    name: String,
    /// Smoothing parameter
    alpha: f64,
    /// Fixed RNG seed, for deterministic sampling
    seed: Option<u64>,
}

impl SmoothingSampler {
    /// Create a new smoothing sampler
    pub fn new(alpha: f64) -> Result<Self> {
        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(OracleError::InvalidParameter(
                "Alpha must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Smoothing Sampler (alpha={})", alpha),
            alpha,
            seed: None,
        })
    }

    /// Create a new smoothing sampler with a fixed RNG seed
    pub fn with_seed(alpha: f64, seed: u64) -> Result<Self> {
        let mut sampler = Self::new(alpha)?;
        sampler.seed = Some(seed);
        Ok(sampler)
    }

    /// Fold the context into a smoothed level and the residual spread
    fn fit_level(&self, context: &[f64]) -> (f64, f64) {
        let mut level = context[0];
        let mut residuals = Vec::with_capacity(context.len().saturating_sub(1));

        for &value in &context[1..] {
            residuals.push(value - level);
            level = self.alpha * value + (1.0 - self.alpha) * level;
        }

        let sigma = if residuals.len() > 1 {
            let n = residuals.len() as f64;
            let mean = residuals.iter().sum::<f64>() / n;
            let variance = residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
            variance.sqrt()
        } else {
            0.0
        };

        (level, sigma)
    }
}

impl SampleForecaster for SmoothingSampler {
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

        let (level, sigma) = self.fit_level(context);

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let noise = if sigma > 0.0 {
            Some(Normal::new(0.0, sigma).map_err(|err| {
                OracleError::ForecasterFailure(format!("cannot build noise distribution: {err}"))
            })?)
        } else {
            None
        };

        let mut paths = Vec::with_capacity(num_samples);
        for _ in 0..num_samples {
            let mut path = Vec::with_capacity(horizon);
            for _ in 0..horizon {
                let step = match &noise {
                    Some(noise) => level + noise.sample(&mut rng),
                    None => level,
                };
                path.push(step);
            }
            paths.push(path);
        }

        Ok(paths)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
