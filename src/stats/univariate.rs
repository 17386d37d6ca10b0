//! Univariate accumulation: weight, weighted sum and residual sum of squares

use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use super::combine;
use crate::simd::{Lane, Scalar, Wide};

/// Reduced state of a univariate accumulation.
///
/// `sum_xx` is the residual sum of squares around the running mean, not the
/// raw sum of squared values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UnivariateState {
    /// Sum of weights
    pub sum_w: f64,
    /// Weighted sum of values
    pub sum_x: f64,
    /// Residual sum of squares
    pub sum_xx: f64,
}

impl UnivariateState {
    /// Merges the state of another, disjoint partition into this one.
    pub fn merge(&self, other: &UnivariateState) -> UnivariateState {
        combine::merge_univariate(*self, *other)
    }
}

/// Running univariate sums, one set per lane of `L`.
///
/// With `L = f64` (or `f32`) this is a plain sequential accumulator. With
/// `L = Wide<T, N>` every lane accumulates its own slice of the input and the
/// lanes are merged by [`stats`](Self::stats).
///
/// Updates follow Youngs and Cramer: the residual sum grows by
/// `dx^2 / (w * W * W_old)` with `dx = W_old * x * w - S * w`, so the running
/// mean is never formed explicitly.
#[derive(Debug, Clone, Copy)]
pub struct UnivariateAccumulator<L: Lane> {
    sum_w: L,
    sum_x: L,
    sum_xx: L,
}

impl<L: Lane> Default for UnivariateAccumulator<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Lane> UnivariateAccumulator<L> {
    /// Creates an empty accumulator
    pub fn new() -> Self {
        let zero = L::splat(L::Scalar::zero());
        Self {
            sum_w: zero,
            sum_x: zero,
            sum_xx: zero,
        }
    }

    /// Creates an accumulator holding one unit-weight sample per lane
    pub fn from_sample(x: L) -> Self {
        Self {
            sum_w: L::splat(L::Scalar::one()),
            sum_x: x,
            sum_xx: L::splat(L::Scalar::zero()),
        }
    }

    /// Creates an accumulator holding one weighted sample per lane
    pub fn from_weighted_sample(x: L, w: L) -> Self {
        Self {
            sum_w: w,
            sum_x: x * w,
            sum_xx: L::splat(L::Scalar::zero()),
        }
    }

    /// Restores an accumulator from raw per-lane sums.
    pub fn load_state(sum_w: L, sum_x: L, sum_xx: L) -> Self {
        Self {
            sum_w,
            sum_x,
            sum_xx,
        }
    }

    /// Adds one unit-weight sample per lane.
    #[inline(always)]
    pub fn update(&mut self, x: L) {
        let dx = self.sum_w * x - self.sum_x;
        let sum_w_old = self.sum_w;
        self.sum_x += x;
        self.sum_w += L::splat(L::Scalar::one());
        // zero denominator only on the first sample, where dx is zero too
        self.sum_xx += L::ratio_or_zero(dx * dx, self.sum_w * sum_w_old);
    }

    /// Adds one weighted sample per lane.
    ///
    /// Weights must not be negative. A zero weight leaves the lane untouched.
    #[inline(always)]
    pub fn update_weighted(&mut self, x: L, w: L) {
        let x = x * w;
        let dx = self.sum_w * x - self.sum_x * w;
        let sum_w_old = self.sum_w;
        self.sum_w += w;
        self.sum_x += x;
        self.sum_xx += L::ratio_or_zero(dx * dx, w * self.sum_w * sum_w_old);
    }

    /// Returns the reduced `{ sum_w, sum_x, sum_xx }`.
    ///
    /// Vector lanes are merged on every call; the accumulator itself is left
    /// as is, so this may be called mid-stream.
    pub fn stats(&self) -> UnivariateState {
        L::reduce_univariate(self.sum_w, self.sum_x, self.sum_xx)
    }

    /// Derives the statistics of everything accumulated so far
    pub fn statistics(&self) -> UnivariateStatistics {
        UnivariateStatistics::from(self.stats())
    }
}

impl<T, const N: usize> UnivariateAccumulator<Wide<T, N>>
where
    T: Scalar,
{
    /// Adds the first `N` values of `x`, one per lane.
    ///
    /// # Panics
    ///
    /// Panics if `x` holds fewer than `N` values.
    #[inline(always)]
    pub fn update_slice(&mut self, x: &[T]) {
        self.update(Wide::load(x));
    }

    /// Adds the first `N` values of `x` with the matching weights of `w`.
    ///
    /// # Panics
    ///
    /// Panics if either slice holds fewer than `N` values.
    #[inline(always)]
    pub fn update_weighted_slice(&mut self, x: &[T], w: &[T]) {
        self.update_weighted(Wide::load(x), Wide::load(w));
    }
}

impl<T> UnivariateAccumulator<T>
where
    T: Scalar + Lane<Scalar = T>,
{
    /// Continues from a reduced state, e.g. the lanes of a finished vector
    /// accumulation.
    pub fn from_state(state: UnivariateState) -> Self {
        Self::load_state(
            T::of_f64(state.sum_w),
            T::of_f64(state.sum_x),
            T::of_f64(state.sum_xx),
        )
    }
}

/// Statistics derived from a finished univariate accumulation.
///
/// This is a plain data holder: an empty accumulation yields `NaN` means and a
/// single sample yields an infinite (or `NaN`) sample variance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnivariateStatistics {
    /// Total weight
    pub count: f64,
    /// Weighted sum
    pub sum: f64,
    /// Sum of squared residuals
    pub ssr: f64,
    pub mean: f64,
    /// Population variance
    pub variance: f64,
    /// Bessel-corrected variance
    pub sample_variance: f64,
}

impl UnivariateStatistics {
    /// Population standard deviation
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Sample standard deviation
    pub fn sample_std_dev(&self) -> f64 {
        self.sample_variance.sqrt()
    }
}

impl From<UnivariateState> for UnivariateStatistics {
    fn from(state: UnivariateState) -> Self {
        let UnivariateState {
            sum_w,
            sum_x,
            sum_xx,
        } = state;

        Self {
            count: sum_w,
            sum: sum_x,
            ssr: sum_xx,
            mean: sum_x / sum_w,
            variance: sum_xx / sum_w,
            sample_variance: sum_xx / (sum_w - 1.0),
        }
    }
}
