//! Test data and reference statistics
//!
//! The reference statistics use the textbook two-pass algorithm in `f64`:
//! compute the weighted mean first, then sum the squared deviations.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `n` values drawn uniformly from `[-scale, scale)` around `offset`
pub fn random_values(seed: u64, n: usize, offset: f64, scale: f64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| offset + scale * rng.random_range(-1.0..1.0))
        .collect()
}

/// `n` integer weights in `0..=max`, zero included
pub fn random_weights(seed: u64, n: usize, max: u32) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(0..=max) as f64).collect()
}

/// Two-pass univariate statistics
#[derive(Debug, Clone, Copy)]
pub struct Reference {
    pub count: f64,
    pub sum: f64,
    pub mean: f64,
    pub ssr: f64,
    pub variance: f64,
}

pub fn reference_univariate(x: &[f64], w: Option<&[f64]>) -> Reference {
    let weight = |i: usize| w.map_or(1.0, |w| w[i]);

    let count: f64 = (0..x.len()).map(weight).sum();
    let sum: f64 = (0..x.len()).map(|i| weight(i) * x[i]).sum();
    let mean = sum / count;
    let ssr: f64 = (0..x.len())
        .map(|i| weight(i) * (x[i] - mean) * (x[i] - mean))
        .sum();

    Reference {
        count,
        sum,
        mean,
        ssr,
        variance: ssr / count,
    }
}

/// Two-pass bivariate statistics
#[derive(Debug, Clone, Copy)]
pub struct ReferenceBivariate {
    pub x: Reference,
    pub y: Reference,
    pub covariance: f64,
    pub correlation: f64,
}

pub fn reference_bivariate(x: &[f64], y: &[f64], w: Option<&[f64]>) -> ReferenceBivariate {
    let rx = reference_univariate(x, w);
    let ry = reference_univariate(y, w);
    let weight = |i: usize| w.map_or(1.0, |w| w[i]);

    let sxy: f64 = (0..x.len())
        .map(|i| weight(i) * (x[i] - rx.mean) * (y[i] - ry.mean))
        .sum();

    ReferenceBivariate {
        x: rx,
        y: ry,
        covariance: sxy / rx.count,
        correlation: sxy / (rx.ssr * ry.ssr).sqrt(),
    }
}

/// `|a - b| <= tol * max(1, |b|)`
pub fn relative_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * b.abs().max(1.0)
}
