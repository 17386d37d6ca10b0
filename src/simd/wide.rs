use std::array;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

use super::{Lane, Scalar};
use crate::stats::bivariate::BivariateState;
use crate::stats::combine;
use crate::stats::univariate::UnivariateState;

/// Fixed-width vector of `N` lanes.
///
/// Operators work lane by lane over a plain array, a shape the compiler turns
/// into packed SIMD instructions for the widths the target supports.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wide<T: Scalar, const N: usize>([T; N]);

impl<T: Scalar, const N: usize> Wide<T, N> {
    /// Creates a vector from its lanes
    #[inline(always)]
    pub fn new(lanes: [T; N]) -> Self {
        Wide(lanes)
    }

    /// Builds a vector by evaluating `f` for each lane index.
    #[inline(always)]
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Wide(array::from_fn(f))
    }

    /// Loads the first `N` values of `slice`.
    ///
    /// # Panics
    ///
    /// Panics if `slice` holds fewer than `N` values.
    #[inline(always)]
    pub fn load(slice: &[T]) -> Self {
        let chunk = &slice[..N];
        Wide(array::from_fn(|i| chunk[i]))
    }

    /// Returns the lanes
    #[inline(always)]
    pub fn lanes(self) -> [T; N] {
        self.0
    }

    #[inline(always)]
    fn widen(self) -> [f64; N] {
        array::from_fn(|i| self.0[i].as_f64())
    }
}

macro_rules! impl_lanewise_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T: Scalar, const N: usize> $trait for Wide<T, N> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Wide(array::from_fn(|i| self.0[i] $op rhs.0[i]))
            }
        }
    };
}

impl_lanewise_op!(Add, add, +);
impl_lanewise_op!(Sub, sub, -);
impl_lanewise_op!(Mul, mul, *);
impl_lanewise_op!(Div, div, /);

impl<T: Scalar, const N: usize> AddAssign for Wide<T, N> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a = *a + b;
        }
    }
}

impl<T: Scalar, const N: usize> Lane for Wide<T, N> {
    type Scalar = T;

    const WIDTH: usize = N;

    #[inline(always)]
    fn splat(value: T) -> Self {
        Wide([value; N])
    }

    #[inline(always)]
    fn ratio_or_zero(num: Self, den: Self) -> Self {
        Wide(array::from_fn(|i| {
            if den.0[i] != T::zero() {
                num.0[i] / den.0[i]
            } else {
                T::zero()
            }
        }))
    }

    fn reduce_univariate(sum_w: Self, sum_x: Self, sum_xx: Self) -> UnivariateState {
        combine::merge_univariate_lanes(&sum_w.widen(), &sum_x.widen(), &sum_xx.widen())
    }

    fn reduce_bivariate(
        sum_w: Self,
        sum_x: Self,
        sum_y: Self,
        sum_xx: Self,
        sum_yy: Self,
        sum_xy: Self,
    ) -> BivariateState {
        combine::merge_bivariate_lanes(
            &sum_w.widen(),
            &sum_x.widen(),
            &sum_y.widen(),
            &sum_xx.widen(),
            &sum_yy.widen(),
            &sum_xy.widen(),
        )
    }
}
