//! Common test utilities module
//!
//! Provides shared utilities for the integration tests:
//! - Seeded random data generation
//! - Two-pass reference statistics to compare the accumulators against

pub mod test_utils;

#[allow(unused_imports)]
pub use test_utils::{
    random_values, random_weights, reference_bivariate, reference_univariate, relative_eq,
    Reference, ReferenceBivariate,
};
