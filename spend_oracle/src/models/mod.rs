//! Built-in sampling forecasters.
//!
//! Both models implement the [`SampleForecaster`](crate::forecaster::SampleForecaster)
//! contract with inference-time sampling only; nothing here is trained or
//! persisted. They exist so the service runs end-to-end without an external
//! model runtime, and so tests can pin a seed for determinism.

pub mod bootstrap;
pub mod smoothing;

pub use bootstrap::BootstrapSampler;
pub use smoothing::SmoothingSampler;
