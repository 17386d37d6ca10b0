//! Lane drivers
//!
//! Each driver walks `n` logical elements, addressed through index closures,
//! in two phases. The bulk `m = n - n % N` elements go through a width-`N`
//! vector accumulator, `N` consecutive elements per update. If anything is
//! left over, the vector lanes are merged into a scalar accumulator which takes
//! the remaining elements one at a time. Inputs shorter than one vector skip
//! the vector phase.

use crate::simd::{ScalarLane, Wide};
use crate::stats::{
    BivariateAccumulator, BivariateStatistics, UnivariateAccumulator, UnivariateStatistics,
};

#[inline(always)]
fn bulk_len<const N: usize>(n: usize) -> usize {
    assert!(N > 0, "lane width must be positive");
    n - n % N
}

/// Accumulates `value(0), ..., value(n - 1)` with unit weights.
pub fn univariate_lanes<T, const N: usize>(
    n: usize,
    value: impl Fn(usize) -> T,
) -> UnivariateStatistics
where
    T: ScalarLane,
{
    let m = bulk_len::<N>(n);

    if m == 0 {
        log::trace!("{} values shorter than {} lanes, scalar path only", n, N);
        let mut acc = UnivariateAccumulator::<T>::new();
        for i in 0..n {
            acc.update(value(i));
        }
        return acc.statistics();
    }

    let mut acc = UnivariateAccumulator::<Wide<T, N>>::new();
    for i in (0..m).step_by(N) {
        acc.update(Wide::from_fn(|j| value(i + j)));
    }

    if m == n {
        return acc.statistics();
    }

    log::trace!("{} of {} values left for the scalar phase", n - m, n);
    let mut tail = UnivariateAccumulator::<T>::from_state(acc.stats());
    for i in m..n {
        tail.update(value(i));
    }
    tail.statistics()
}

/// Accumulates `value(i)` with weight `weight(i)` for `i` in `0..n`.
pub fn univariate_weighted_lanes<T, const N: usize>(
    n: usize,
    value: impl Fn(usize) -> T,
    weight: impl Fn(usize) -> T,
) -> UnivariateStatistics
where
    T: ScalarLane,
{
    let m = bulk_len::<N>(n);

    if m == 0 {
        log::trace!("{} weighted values shorter than {} lanes, scalar path only", n, N);
        let mut acc = UnivariateAccumulator::<T>::new();
        for i in 0..n {
            acc.update_weighted(value(i), weight(i));
        }
        return acc.statistics();
    }

    let mut acc = UnivariateAccumulator::<Wide<T, N>>::new();
    for i in (0..m).step_by(N) {
        acc.update_weighted(
            Wide::from_fn(|j| value(i + j)),
            Wide::from_fn(|j| weight(i + j)),
        );
    }

    if m == n {
        return acc.statistics();
    }

    log::trace!("{} of {} weighted values left for the scalar phase", n - m, n);
    let mut tail = UnivariateAccumulator::<T>::from_state(acc.stats());
    for i in m..n {
        tail.update_weighted(value(i), weight(i));
    }
    tail.statistics()
}

/// Accumulates the pairs `(x(i), y(i))` with unit weights.
pub fn bivariate_lanes<T, const N: usize>(
    n: usize,
    x: impl Fn(usize) -> T,
    y: impl Fn(usize) -> T,
) -> BivariateStatistics
where
    T: ScalarLane,
{
    let m = bulk_len::<N>(n);

    if m == 0 {
        log::trace!("{} pairs shorter than {} lanes, scalar path only", n, N);
        let mut acc = BivariateAccumulator::<T>::new();
        for i in 0..n {
            acc.update(x(i), y(i));
        }
        return acc.statistics();
    }

    let mut acc = BivariateAccumulator::<Wide<T, N>>::new();
    for i in (0..m).step_by(N) {
        acc.update(Wide::from_fn(|j| x(i + j)), Wide::from_fn(|j| y(i + j)));
    }

    if m == n {
        return acc.statistics();
    }

    log::trace!("{} of {} pairs left for the scalar phase", n - m, n);
    let mut tail = BivariateAccumulator::<T>::from_state(acc.stats());
    for i in m..n {
        tail.update(x(i), y(i));
    }
    tail.statistics()
}

/// Accumulates the pairs `(x(i), y(i))` with weights `weight(i)`.
pub fn bivariate_weighted_lanes<T, const N: usize>(
    n: usize,
    x: impl Fn(usize) -> T,
    y: impl Fn(usize) -> T,
    weight: impl Fn(usize) -> T,
) -> BivariateStatistics
where
    T: ScalarLane,
{
    let m = bulk_len::<N>(n);

    if m == 0 {
        log::trace!("{} weighted pairs shorter than {} lanes, scalar path only", n, N);
        let mut acc = BivariateAccumulator::<T>::new();
        for i in 0..n {
            acc.update_weighted(x(i), y(i), weight(i));
        }
        return acc.statistics();
    }

    let mut acc = BivariateAccumulator::<Wide<T, N>>::new();
    for i in (0..m).step_by(N) {
        acc.update_weighted(
            Wide::from_fn(|j| x(i + j)),
            Wide::from_fn(|j| y(i + j)),
            Wide::from_fn(|j| weight(i + j)),
        );
    }

    if m == n {
        return acc.statistics();
    }

    log::trace!("{} of {} weighted pairs left for the scalar phase", n - m, n);
    let mut tail = BivariateAccumulator::<T>::from_state(acc.stats());
    for i in m..n {
        tail.update_weighted(x(i), y(i), weight(i));
    }
    tail.statistics()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_short_input_takes_scalar_path() {
        let data = [1.0, 2.0, 3.0];
        let stats = univariate_lanes::<f64, 4>(data.len(), |i| data[i]);
        assert_eq!(stats.count, 3.0);
        assert!(approx_eq(stats.mean, 2.0));
        assert!(approx_eq(stats.ssr, 2.0));
    }

    #[test]
    fn test_short_input_every_variant() {
        let x = [1.0, 1.0, 2.0];
        let y = [2.0, 4.0, 3.0];
        let w = [1.0, 0.0, 2.0];

        let u = univariate_weighted_lanes::<f64, 8>(x.len(), |i| x[i], |i| w[i]);
        assert_eq!(u.count, 3.0);
        assert!(approx_eq(u.mean, 5.0 / 3.0));

        let b = bivariate_lanes::<f64, 8>(x.len(), |i| x[i], |i| y[i]);
        assert_eq!(b.count, 3.0);
        assert!(approx_eq(b.mean_y, 3.0));
        assert!(approx_eq(b.sum_xy, 0.0));

        let bw = bivariate_weighted_lanes::<f64, 8>(x.len(), |i| x[i], |i| y[i], |i| w[i]);
        assert_eq!(bw.count, 3.0);
        assert!(approx_eq(bw.mean_x, 5.0 / 3.0));
        assert!(approx_eq(bw.mean_y, 8.0 / 3.0));
    }

    #[test]
    fn test_exact_multiple_skips_tail() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let stats = univariate_lanes::<f64, 4>(data.len(), |i| data[i]);
        assert_eq!(stats.count, 4.0);
        assert_eq!(stats.sum, 10.0);
        assert!(approx_eq(stats.ssr, 5.0));
        assert!(approx_eq(stats.variance, 1.25));
    }

    #[test]
    fn test_remainder_is_accumulated() {
        let data: Vec<f64> = (1..=11).map(|x| x as f64).collect();
        for stats in [
            univariate_lanes::<f64, 2>(data.len(), |i| data[i]),
            univariate_lanes::<f64, 4>(data.len(), |i| data[i]),
            univariate_lanes::<f64, 8>(data.len(), |i| data[i]),
            univariate_lanes::<f64, 16>(data.len(), |i| data[i]),
        ] {
            assert_eq!(stats.count, 11.0);
            assert!(approx_eq(stats.mean, 6.0));
            // population variance of 1..=11 is (11^2 - 1) / 12
            assert!(approx_eq(stats.variance, 10.0), "variance={}", stats.variance);
        }
    }

    #[test]
    fn test_empty_input() {
        let stats = univariate_lanes::<f32, 8>(0, |_| 0.0);
        assert_eq!(stats.count, 0.0);
        assert!(stats.mean.is_nan());
    }

    #[test]
    fn test_weighted_remainder() {
        let x = [2.0, 4.0, 5.0, 1.0, 3.0];
        let w = [2.0, 1.0, 3.0, 0.0, 2.0];
        let stats = univariate_weighted_lanes::<f64, 2>(x.len(), |i| x[i], |i| w[i]);

        // same as [2, 2, 4, 5, 5, 5, 3, 3]
        assert_eq!(stats.count, 8.0);
        assert!(approx_eq(stats.mean, 29.0 / 8.0));
    }

    #[test]
    fn test_bivariate_remainder() {
        let x = [1.0, 1.0, 2.0, 6.0, 3.0];
        let y = [2.0, 4.0, 3.0, 1.0, 5.0];
        let a = bivariate_lanes::<f64, 4>(x.len(), |i| x[i], |i| y[i]);
        let b = bivariate_lanes::<f64, 8>(x.len(), |i| x[i], |i| y[i]);

        assert_eq!(a.count, 5.0);
        assert!(approx_eq(a.covariance, b.covariance));
        assert!(approx_eq(a.mean_x, 2.6));
        assert!(approx_eq(a.mean_y, 3.0));
    }

    #[test]
    fn test_bivariate_weighted_unit_weights() {
        let x = [1.0, 1.0, 2.0, 6.0, 0.5, 4.0];
        let y = [2.0, 4.0, 3.0, 1.0, 8.0, -1.0];
        let a = bivariate_lanes::<f64, 4>(x.len(), |i| x[i], |i| y[i]);
        let b = bivariate_weighted_lanes::<f64, 4>(x.len(), |i| x[i], |i| y[i], |_| 1.0);

        assert!(approx_eq(a.covariance, b.covariance));
        assert!(approx_eq(a.correlation, b.correlation));
        assert!(approx_eq(a.variance_x, b.variance_x));
    }
}
