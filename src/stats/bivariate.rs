//! Bivariate accumulation: two value streams and their cross products

use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use super::combine;
use crate::simd::{Lane, Scalar, Wide};

/// Reduced state of a bivariate accumulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BivariateState {
    pub sum_w: f64,
    pub sum_x: f64,
    pub sum_y: f64,
    /// Residual sum of squares of x
    pub sum_xx: f64,
    /// Residual sum of squares of y
    pub sum_yy: f64,
    /// Residual sum of cross products
    pub sum_xy: f64,
}

impl BivariateState {
    /// Merges the state of another, disjoint partition into this one.
    pub fn merge(&self, other: &BivariateState) -> BivariateState {
        combine::merge_bivariate(*self, *other)
    }
}

/// Running sums over paired samples `(x, y)`, one set per lane of `L`.
///
/// The `x` and `y` sums evolve exactly as in two separate
/// [`UnivariateAccumulator`](super::univariate::UnivariateAccumulator)s, so the
/// means and sums agree bit for bit with the univariate results.
#[derive(Debug, Clone, Copy)]
pub struct BivariateAccumulator<L: Lane> {
    sum_w: L,
    sum_x: L,
    sum_y: L,
    sum_xx: L,
    sum_yy: L,
    sum_xy: L,
}

impl<L: Lane> Default for BivariateAccumulator<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Lane> BivariateAccumulator<L> {
    pub fn new() -> Self {
        let zero = L::splat(L::Scalar::zero());
        Self {
            sum_w: zero,
            sum_x: zero,
            sum_y: zero,
            sum_xx: zero,
            sum_yy: zero,
            sum_xy: zero,
        }
    }

    pub fn from_sample(x: L, y: L) -> Self {
        let zero = L::splat(L::Scalar::zero());
        Self {
            sum_w: L::splat(L::Scalar::one()),
            sum_x: x,
            sum_y: y,
            sum_xx: zero,
            sum_yy: zero,
            sum_xy: zero,
        }
    }

    pub fn from_weighted_sample(x: L, y: L, w: L) -> Self {
        let zero = L::splat(L::Scalar::zero());
        Self {
            sum_w: w,
            sum_x: x * w,
            sum_y: y * w,
            sum_xx: zero,
            sum_yy: zero,
            sum_xy: zero,
        }
    }

    /// Restores an accumulator from raw per-lane sums.
    pub fn load_state(sum_w: L, sum_x: L, sum_y: L, sum_xx: L, sum_yy: L, sum_xy: L) -> Self {
        Self {
            sum_w,
            sum_x,
            sum_y,
            sum_xx,
            sum_yy,
            sum_xy,
        }
    }

    /// Adds one unit-weight pair per lane.
    #[inline(always)]
    pub fn update(&mut self, x: L, y: L) {
        let dx = self.sum_w * x - self.sum_x;
        let dy = self.sum_w * y - self.sum_y;
        let sum_w_old = self.sum_w;
        self.sum_w += L::splat(L::Scalar::one());

        let f = L::ratio_or_zero(L::splat(L::Scalar::one()), self.sum_w * sum_w_old);
        self.sum_xx += f * dx * dx;
        self.sum_yy += f * dy * dy;
        self.sum_xy += f * dx * dy;

        self.sum_x += x;
        self.sum_y += y;
    }

    /// Adds one weighted pair per lane. Weights must not be negative.
    #[inline(always)]
    pub fn update_weighted(&mut self, x: L, y: L, w: L) {
        let dx = self.sum_w * x - self.sum_x;
        let dy = self.sum_w * y - self.sum_y;

        self.sum_x += x * w;
        self.sum_y += y * w;
        let sum_w_old = self.sum_w;
        self.sum_w += w;

        let f = L::ratio_or_zero(w, self.sum_w * sum_w_old);
        self.sum_xx += f * dx * dx;
        self.sum_yy += f * dy * dy;
        self.sum_xy += f * dx * dy;
    }

    /// Returns the reduced sums; see
    /// [`UnivariateAccumulator::stats`](super::univariate::UnivariateAccumulator::stats).
    pub fn stats(&self) -> BivariateState {
        L::reduce_bivariate(
            self.sum_w,
            self.sum_x,
            self.sum_y,
            self.sum_xx,
            self.sum_yy,
            self.sum_xy,
        )
    }

    pub fn statistics(&self) -> BivariateStatistics {
        BivariateStatistics::from(self.stats())
    }
}

impl<T, const N: usize> BivariateAccumulator<Wide<T, N>>
where
    T: Scalar,
{
    /// Adds the first `N` pairs of `x` and `y`.
    ///
    /// # Panics
    ///
    /// Panics if either slice holds fewer than `N` values.
    #[inline(always)]
    pub fn update_slice(&mut self, x: &[T], y: &[T]) {
        self.update(Wide::load(x), Wide::load(y));
    }

    /// Adds the first `N` weighted pairs.
    ///
    /// # Panics
    ///
    /// Panics if any slice holds fewer than `N` values.
    #[inline(always)]
    pub fn update_weighted_slice(&mut self, x: &[T], y: &[T], w: &[T]) {
        self.update_weighted(Wide::load(x), Wide::load(y), Wide::load(w));
    }
}

impl<T> BivariateAccumulator<T>
where
    T: Scalar + Lane<Scalar = T>,
{
    /// Continues from a reduced state.
    pub fn from_state(state: BivariateState) -> Self {
        Self::load_state(
            T::of_f64(state.sum_w),
            T::of_f64(state.sum_x),
            T::of_f64(state.sum_y),
            T::of_f64(state.sum_xx),
            T::of_f64(state.sum_yy),
            T::of_f64(state.sum_xy),
        )
    }
}

/// Statistics derived from a finished bivariate accumulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BivariateStatistics {
    pub count: f64,
    pub sum_x: f64,
    pub sum_y: f64,
    pub ssr_x: f64,
    pub ssr_y: f64,
    /// Residual sum of cross products
    pub sum_xy: f64,
    pub mean_x: f64,
    pub mean_y: f64,
    pub variance_x: f64,
    pub variance_y: f64,
    pub sample_variance_x: f64,
    pub sample_variance_y: f64,
    /// Pearson correlation
    pub correlation: f64,
    pub covariance: f64,
    pub sample_covariance: f64,
}

impl From<BivariateState> for BivariateStatistics {
    fn from(state: BivariateState) -> Self {
        let BivariateState {
            sum_w,
            sum_x,
            sum_y,
            sum_xx,
            sum_yy,
            sum_xy,
        } = state;

        // a constant stream has no spread: two constant streams correlate
        // perfectly, one constant stream does not correlate at all
        let correlation = if !(sum_xx > 0.0 && sum_yy > 0.0) {
            if sum_xx == sum_yy {
                1.0
            } else {
                0.0
            }
        } else {
            (sum_xy / (sum_xx * sum_yy).sqrt()).clamp(-1.0, 1.0)
        };

        Self {
            count: sum_w,
            sum_x,
            sum_y,
            ssr_x: sum_xx,
            ssr_y: sum_yy,
            sum_xy,
            mean_x: sum_x / sum_w,
            mean_y: sum_y / sum_w,
            variance_x: sum_xx / sum_w,
            variance_y: sum_yy / sum_w,
            sample_variance_x: sum_xx / (sum_w - 1.0),
            sample_variance_y: sum_yy / (sum_w - 1.0),
            correlation,
            covariance: sum_xy / sum_w,
            sample_covariance: sum_xy / (sum_w - 1.0),
        }
    }
}
