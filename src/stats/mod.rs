//! Streaming statistics core
//!
//! Accumulators keep running weights, sums and residual sums of squares and
//! update them one sample (or one vector of samples) at a time. Partial
//! accumulations, whether vector lanes or independently processed blocks, are
//! fused with the pairwise merge in [`combine`].
//!
//! # Example
//!
//! ```rust
//! use vstat::simd::Wide;
//! use vstat::stats::UnivariateAccumulator;
//!
//! let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
//!
//! let mut acc = UnivariateAccumulator::<Wide<f64, 4>>::new();
//! acc.update_slice(&data[0..4]);
//! acc.update_slice(&data[4..8]);
//!
//! let mut tail = UnivariateAccumulator::<f64>::from_state(acc.stats());
//! tail.update(data[8]);
//!
//! let stats = tail.statistics();
//! assert_eq!(stats.count, 9.0);
//! assert!((stats.mean - 5.0).abs() < 1e-12);
//! ```

pub mod bivariate;
pub mod combine;
pub mod univariate;

pub use bivariate::{BivariateAccumulator, BivariateState, BivariateStatistics};
pub use univariate::{UnivariateAccumulator, UnivariateState, UnivariateStatistics};
