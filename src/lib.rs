//! Vectorized streaming statistics
//!
//! One-pass, numerically stable mean, variance, covariance and correlation.
//! Values are accumulated in several independent lanes at once with the
//! Youngs–Cramer update and the lanes are fused with the pairwise merge of
//! Schubert and Gertz.

pub mod accumulate;
pub mod config;
pub mod error;
pub mod metrics;
pub mod simd;
pub mod stats;

// Re-export commonly used types
pub use accumulate::{bivariate, bivariate_weighted, univariate, univariate_weighted};
pub use config::{AccumulateConfig, LaneWidth};
pub use error::{Error, Result};
pub use stats::{
    BivariateAccumulator, BivariateState, BivariateStatistics, UnivariateAccumulator,
    UnivariateState, UnivariateStatistics,
};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
