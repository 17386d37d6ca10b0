//! Numeric lane abstraction
//!
//! The accumulators in [`crate::stats`] are written once against the [`Lane`]
//! trait. A lane is either a plain scalar (`f32`, `f64`), which behaves like a
//! vector of width one, or a [`Wide`] vector holding `N` independent running
//! sums. Which one is used is decided when the accumulator type is
//! instantiated, so the per-element update never branches on it.

mod wide;

pub use wide::Wide;

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

use num_traits::Float;

use crate::config::LaneWidth;
use crate::stats::bivariate::BivariateState;
use crate::stats::univariate::UnivariateState;

/// Floating point precision an accumulation runs in.
pub trait Scalar: Float + Default + Debug + Send + Sync + 'static {
    /// Lane count used when no width is configured
    const NATIVE_WIDTH: LaneWidth;

    /// Widens the value to `f64`.
    fn as_f64(self) -> f64;

    /// Narrows an `f64` to this precision.
    fn of_f64(value: f64) -> Self;
}

impl Scalar for f32 {
    const NATIVE_WIDTH: LaneWidth = LaneWidth::X8;

    #[inline(always)]
    fn as_f64(self) -> f64 {
        self as f64
    }

    #[inline(always)]
    fn of_f64(value: f64) -> Self {
        value as f32
    }
}

impl Scalar for f64 {
    const NATIVE_WIDTH: LaneWidth = LaneWidth::X4;

    #[inline(always)]
    fn as_f64(self) -> f64 {
        self
    }

    #[inline(always)]
    fn of_f64(value: f64) -> Self {
        value
    }
}

/// A value holding one running sum per lane.
pub trait Lane:
    Copy
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
{
    /// Element type of a single lane
    type Scalar: Scalar;

    /// Number of lanes
    const WIDTH: usize;

    /// Broadcasts `value` to every lane.
    fn splat(value: Self::Scalar) -> Self;

    /// `num / den` in every lane where `den` is nonzero, zero in the others.
    fn ratio_or_zero(num: Self, den: Self) -> Self;

    /// Fuses the lanes of a univariate accumulation into a single state.
    fn reduce_univariate(sum_w: Self, sum_x: Self, sum_xx: Self) -> UnivariateState;

    /// Fuses the lanes of a bivariate accumulation into a single state.
    fn reduce_bivariate(
        sum_w: Self,
        sum_x: Self,
        sum_y: Self,
        sum_xx: Self,
        sum_yy: Self,
        sum_xy: Self,
    ) -> BivariateState;
}

/// A scalar that also serves as its own single-lane accumulator type.
///
/// This is what the sequential phase of the drivers runs on.
pub trait ScalarLane: Scalar + Lane<Scalar = Self> {}

impl<T: Scalar + Lane<Scalar = T>> ScalarLane for T {}

macro_rules! impl_scalar_lane {
    ($t:ty) => {
        impl Lane for $t {
            type Scalar = $t;

            const WIDTH: usize = 1;

            #[inline(always)]
            fn splat(value: $t) -> Self {
                value
            }

            #[inline(always)]
            fn ratio_or_zero(num: Self, den: Self) -> Self {
                if den != 0.0 {
                    num / den
                } else {
                    0.0
                }
            }

            #[inline]
            fn reduce_univariate(sum_w: Self, sum_x: Self, sum_xx: Self) -> UnivariateState {
                UnivariateState {
                    sum_w: sum_w.as_f64(),
                    sum_x: sum_x.as_f64(),
                    sum_xx: sum_xx.as_f64(),
                }
            }

            #[inline]
            fn reduce_bivariate(
                sum_w: Self,
                sum_x: Self,
                sum_y: Self,
                sum_xx: Self,
                sum_yy: Self,
                sum_xy: Self,
            ) -> BivariateState {
                BivariateState {
                    sum_w: sum_w.as_f64(),
                    sum_x: sum_x.as_f64(),
                    sum_y: sum_y.as_f64(),
                    sum_xx: sum_xx.as_f64(),
                    sum_yy: sum_yy.as_f64(),
                    sum_xy: sum_xy.as_f64(),
                }
            }
        }
    };
}

impl_scalar_lane!(f32);
impl_scalar_lane!(f64);
