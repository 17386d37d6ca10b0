//! Merging of partial accumulations
//!
//! Two partitions A and B, each summarized by their total weight `n`, weighted
//! sum `s` and residual sum of squares `q`, merge into
//!
//! ```text
//! q = q0 + q1 + (n1 * s0 - n0 * s1)^2 / (n0 * n1 * (n0 + n1))
//! ```
//!
//! following Schubert & Gertz, "Numerically Stable Parallel Computation of
//! (Co-)Variance", SSDBM 2018, eq. 22-26. The correction term is the
//! between-partition contribution to the residual sum.
//!
//! Vector lanes are merged by recursive bisection: each half is reduced to a
//! single state (its weights and sums included), then the two halves are
//! merged once more. A width `N` vector therefore needs `log2(N)` levels and
//! never takes a flat horizontal sum over all lanes.

use super::bivariate::BivariateState;
use super::univariate::UnivariateState;

/// Merges two univariate partitions.
///
/// A partition with zero total weight is the identity.
#[inline]
pub fn merge_univariate(a: UnivariateState, b: UnivariateState) -> UnivariateState {
    if b.sum_w == 0.0 {
        return a;
    }
    if a.sum_w == 0.0 {
        return b;
    }

    let (n0, n1) = (a.sum_w, b.sum_w);
    let f = 1.0 / (n0 * n1 * (n0 + n1));
    let d = n1 * a.sum_x - n0 * b.sum_x;

    UnivariateState {
        sum_w: n0 + n1,
        sum_x: a.sum_x + b.sum_x,
        sum_xx: a.sum_xx + b.sum_xx + f * d * d,
    }
}

/// Merges two bivariate partitions.
///
/// The cross term uses `f * dx * dy` with the same scaled differences as the
/// two residual terms.
#[inline]
pub fn merge_bivariate(a: BivariateState, b: BivariateState) -> BivariateState {
    if b.sum_w == 0.0 {
        return a;
    }
    if a.sum_w == 0.0 {
        return b;
    }

    let (n0, n1) = (a.sum_w, b.sum_w);
    let f = 1.0 / (n0 * n1 * (n0 + n1));
    let dx = n1 * a.sum_x - n0 * b.sum_x;
    let dy = n1 * a.sum_y - n0 * b.sum_y;

    BivariateState {
        sum_w: n0 + n1,
        sum_x: a.sum_x + b.sum_x,
        sum_y: a.sum_y + b.sum_y,
        sum_xx: a.sum_xx + b.sum_xx + f * dx * dx,
        sum_yy: a.sum_yy + b.sum_yy + f * dy * dy,
        sum_xy: a.sum_xy + b.sum_xy + f * dx * dy,
    }
}

#[inline(always)]
fn halves(lanes: &[f64]) -> (&[f64], &[f64]) {
    lanes.split_at(lanes.len() / 2)
}

/// Reduces per-lane univariate sums to a single state.
///
/// Lane `i` is described by `sum_w[i]`, `sum_x[i]` and `sum_xx[i]`; all three
/// slices must have the same length.
pub fn merge_univariate_lanes(sum_w: &[f64], sum_x: &[f64], sum_xx: &[f64]) -> UnivariateState {
    debug_assert!(sum_w.len() == sum_x.len() && sum_w.len() == sum_xx.len());

    match sum_w.len() {
        0 => UnivariateState::default(),
        1 => UnivariateState {
            sum_w: sum_w[0],
            sum_x: sum_x[0],
            sum_xx: sum_xx[0],
        },
        _ => {
            let (w0, w1) = halves(sum_w);
            let (x0, x1) = halves(sum_x);
            let (xx0, xx1) = halves(sum_xx);

            let left = merge_univariate_lanes(w0, x0, xx0);
            let right = merge_univariate_lanes(w1, x1, xx1);
            merge_univariate(left, right)
        }
    }
}

/// Reduces per-lane bivariate sums to a single state.
pub fn merge_bivariate_lanes(
    sum_w: &[f64],
    sum_x: &[f64],
    sum_y: &[f64],
    sum_xx: &[f64],
    sum_yy: &[f64],
    sum_xy: &[f64],
) -> BivariateState {
    debug_assert!([sum_x.len(), sum_y.len(), sum_xx.len(), sum_yy.len(), sum_xy.len()]
        .iter()
        .all(|&len| len == sum_w.len()));

    match sum_w.len() {
        0 => BivariateState::default(),
        1 => BivariateState {
            sum_w: sum_w[0],
            sum_x: sum_x[0],
            sum_y: sum_y[0],
            sum_xx: sum_xx[0],
            sum_yy: sum_yy[0],
            sum_xy: sum_xy[0],
        },
        _ => {
            let (w0, w1) = halves(sum_w);
            let (x0, x1) = halves(sum_x);
            let (y0, y1) = halves(sum_y);
            let (xx0, xx1) = halves(sum_xx);
            let (yy0, yy1) = halves(sum_yy);
            let (xy0, xy1) = halves(sum_xy);

            let left = merge_bivariate_lanes(w0, x0, y0, xx0, yy0, xy0);
            let right = merge_bivariate_lanes(w1, x1, y1, xx1, yy1, xy1);
            merge_bivariate(left, right)
        }
    }
}
