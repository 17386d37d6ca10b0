//! Slice front-end of the vectorized accumulation
//!
//! These functions adapt slices, projections and binary operators to the lane
//! drivers in [`driver`]. The lane width comes from an [`AccumulateConfig`];
//! the plain functions use the native width of the scalar type, the `*_with`
//! variants take an explicit configuration.
//!
//! # Example
//!
//! ```rust
//! use vstat::accumulate;
//!
//! let x = [1.0, 1.0, 2.0, 6.0];
//! let y = [2.0, 4.0, 3.0, 1.0];
//!
//! let stats = accumulate::bivariate(&x, &y).unwrap();
//! assert!((stats.covariance + 1.75).abs() < 1e-12);
//! ```

pub mod driver;

pub use driver::{
    bivariate_lanes, bivariate_weighted_lanes, univariate_lanes, univariate_weighted_lanes,
};

use crate::config::{AccumulateConfig, LaneWidth};
use crate::error::{ensure_same_len, Result};
use crate::simd::ScalarLane;
use crate::stats::{BivariateStatistics, UnivariateStatistics};

/// Calls a lane driver instantiated for the given width.
macro_rules! dispatch_lanes {
    ($width:expr, $driver:ident::<$t:ty>($($arg:expr),* $(,)?)) => {
        match $width {
            LaneWidth::X2 => driver::$driver::<$t, 2>($($arg),*),
            LaneWidth::X4 => driver::$driver::<$t, 4>($($arg),*),
            LaneWidth::X8 => driver::$driver::<$t, 8>($($arg),*),
            LaneWidth::X16 => driver::$driver::<$t, 16>($($arg),*),
        }
    };
}

/// Mean, variance and sum of `x`.
pub fn univariate<T: ScalarLane>(x: &[T]) -> UnivariateStatistics {
    univariate_with(&AccumulateConfig::default(), x)
}

pub fn univariate_with<T: ScalarLane>(config: &AccumulateConfig, x: &[T]) -> UnivariateStatistics {
    univariate_by_with(config, x, |&v| v)
}

/// Statistics of `f(x[i])` over all elements of `x`.
pub fn univariate_by<X, T, F>(x: &[X], f: F) -> UnivariateStatistics
where
    T: ScalarLane,
    F: Fn(&X) -> T,
{
    univariate_by_with(&AccumulateConfig::default(), x, f)
}

pub fn univariate_by_with<X, T, F>(config: &AccumulateConfig, x: &[X], f: F) -> UnivariateStatistics
where
    T: ScalarLane,
    F: Fn(&X) -> T,
{
    dispatch_lanes!(
        config.lane_width_for::<T>(),
        univariate_lanes::<T>(x.len(), |i| f(&x[i]))
    )
}

/// Statistics of `x` with per-element weights `w`.
pub fn univariate_weighted<T: ScalarLane>(x: &[T], w: &[T]) -> Result<UnivariateStatistics> {
    univariate_weighted_with(&AccumulateConfig::default(), x, w)
}

pub fn univariate_weighted_with<T: ScalarLane>(
    config: &AccumulateConfig,
    x: &[T],
    w: &[T],
) -> Result<UnivariateStatistics> {
    univariate_weighted_by_with(config, x, w, |&v| v)
}

/// Statistics of `f(x[i])` with weights `w[i]`.
pub fn univariate_weighted_by<X, T, F>(x: &[X], w: &[T], f: F) -> Result<UnivariateStatistics>
where
    T: ScalarLane,
    F: Fn(&X) -> T,
{
    univariate_weighted_by_with(&AccumulateConfig::default(), x, w, f)
}

pub fn univariate_weighted_by_with<X, T, F>(
    config: &AccumulateConfig,
    x: &[X],
    w: &[T],
    f: F,
) -> Result<UnivariateStatistics>
where
    T: ScalarLane,
    F: Fn(&X) -> T,
{
    ensure_same_len(x.len(), w.len())?;
    Ok(dispatch_lanes!(
        config.lane_width_for::<T>(),
        univariate_weighted_lanes::<T>(x.len(), |i| f(&x[i]), |i| w[i])
    ))
}

/// Statistics of `op(x[i], y[i])`.
///
/// This is the building block of the error metrics in
/// [`crate::metrics::regression`], e.g. with `op` the squared difference.
pub fn univariate_binary<X, Y, T, Op>(x: &[X], y: &[Y], op: Op) -> Result<UnivariateStatistics>
where
    T: ScalarLane,
    Op: Fn(&X, &Y) -> T,
{
    univariate_binary_with(&AccumulateConfig::default(), x, y, op)
}

pub fn univariate_binary_with<X, Y, T, Op>(
    config: &AccumulateConfig,
    x: &[X],
    y: &[Y],
    op: Op,
) -> Result<UnivariateStatistics>
where
    T: ScalarLane,
    Op: Fn(&X, &Y) -> T,
{
    ensure_same_len(x.len(), y.len())?;
    Ok(dispatch_lanes!(
        config.lane_width_for::<T>(),
        univariate_lanes::<T>(x.len(), |i| op(&x[i], &y[i]))
    ))
}

/// Statistics of `op(x[i], y[i])` with weights `w[i]`.
pub fn univariate_binary_weighted<X, Y, T, Op>(
    x: &[X],
    y: &[Y],
    w: &[T],
    op: Op,
) -> Result<UnivariateStatistics>
where
    T: ScalarLane,
    Op: Fn(&X, &Y) -> T,
{
    univariate_binary_weighted_with(&AccumulateConfig::default(), x, y, w, op)
}

pub fn univariate_binary_weighted_with<X, Y, T, Op>(
    config: &AccumulateConfig,
    x: &[X],
    y: &[Y],
    w: &[T],
    op: Op,
) -> Result<UnivariateStatistics>
where
    T: ScalarLane,
    Op: Fn(&X, &Y) -> T,
{
    ensure_same_len(x.len(), y.len())?;
    ensure_same_len(x.len(), w.len())?;
    Ok(dispatch_lanes!(
        config.lane_width_for::<T>(),
        univariate_weighted_lanes::<T>(x.len(), |i| op(&x[i], &y[i]), |i| w[i])
    ))
}

/// Joint statistics of `x` and `y`, including covariance and correlation.
pub fn bivariate<T: ScalarLane>(x: &[T], y: &[T]) -> Result<BivariateStatistics> {
    bivariate_with(&AccumulateConfig::default(), x, y)
}

pub fn bivariate_with<T: ScalarLane>(
    config: &AccumulateConfig,
    x: &[T],
    y: &[T],
) -> Result<BivariateStatistics> {
    bivariate_by_with(config, x, y, |&v| v, |&v| v)
}

/// Joint statistics of `fx(x[i])` and `fy(y[i])`.
pub fn bivariate_by<X, Y, T, FX, FY>(x: &[X], y: &[Y], fx: FX, fy: FY) -> Result<BivariateStatistics>
where
    T: ScalarLane,
    FX: Fn(&X) -> T,
    FY: Fn(&Y) -> T,
{
    bivariate_by_with(&AccumulateConfig::default(), x, y, fx, fy)
}

pub fn bivariate_by_with<X, Y, T, FX, FY>(
    config: &AccumulateConfig,
    x: &[X],
    y: &[Y],
    fx: FX,
    fy: FY,
) -> Result<BivariateStatistics>
where
    T: ScalarLane,
    FX: Fn(&X) -> T,
    FY: Fn(&Y) -> T,
{
    ensure_same_len(x.len(), y.len())?;
    Ok(dispatch_lanes!(
        config.lane_width_for::<T>(),
        bivariate_lanes::<T>(x.len(), |i| fx(&x[i]), |i| fy(&y[i]))
    ))
}

/// Joint statistics of `x` and `y` sharing the weights `w`.
pub fn bivariate_weighted<T: ScalarLane>(x: &[T], y: &[T], w: &[T]) -> Result<BivariateStatistics> {
    bivariate_weighted_with(&AccumulateConfig::default(), x, y, w)
}

pub fn bivariate_weighted_with<T: ScalarLane>(
    config: &AccumulateConfig,
    x: &[T],
    y: &[T],
    w: &[T],
) -> Result<BivariateStatistics> {
    bivariate_weighted_by_with(config, x, y, w, |&v| v, |&v| v)
}

/// Joint statistics of `fx(x[i])` and `fy(y[i])` with weights `w[i]`.
pub fn bivariate_weighted_by<X, Y, T, FX, FY>(
    x: &[X],
    y: &[Y],
    w: &[T],
    fx: FX,
    fy: FY,
) -> Result<BivariateStatistics>
where
    T: ScalarLane,
    FX: Fn(&X) -> T,
    FY: Fn(&Y) -> T,
{
    bivariate_weighted_by_with(&AccumulateConfig::default(), x, y, w, fx, fy)
}

pub fn bivariate_weighted_by_with<X, Y, T, FX, FY>(
    config: &AccumulateConfig,
    x: &[X],
    y: &[Y],
    w: &[T],
    fx: FX,
    fy: FY,
) -> Result<BivariateStatistics>
where
    T: ScalarLane,
    FX: Fn(&X) -> T,
    FY: Fn(&Y) -> T,
{
    ensure_same_len(x.len(), y.len())?;
    ensure_same_len(x.len(), w.len())?;
    Ok(dispatch_lanes!(
        config.lane_width_for::<T>(),
        bivariate_weighted_lanes::<T>(x.len(), |i| fx(&x[i]), |i| fy(&y[i]), |i| w[i])
    ))
}
