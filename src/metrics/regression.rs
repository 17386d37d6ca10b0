//! Metrics for evaluating regression models
//!
//! Every metric is a single (or, for the variance based scores, a second)
//! binary-op accumulation over `(y_true, y_pred)`, so each has a weighted twin
//! taking per-sample weights.

use crate::accumulate::{
    univariate, univariate_binary, univariate_binary_weighted, univariate_weighted,
};
use crate::error::{ensure_same_len, Error, Result};
use crate::simd::ScalarLane;
use crate::stats::UnivariateStatistics;

/// Probabilities are kept this far away from 0 and 1 before taking logs
pub const LOG_LOSS_EPSILON: f64 = 1e-15;

fn validate<T>(y_true: &[T], y_pred: &[T]) -> Result<()> {
    ensure_same_len(y_true.len(), y_pred.len())?;
    if y_true.is_empty() {
        return Err(Error::EmptyData(
            "cannot evaluate a metric without samples".to_string(),
        ));
    }
    Ok(())
}

fn validate_weighted<T>(y_true: &[T], y_pred: &[T], sample_weight: &[T]) -> Result<()> {
    validate(y_true, y_pred)?;
    ensure_same_len(y_true.len(), sample_weight.len())
}

fn nonzero_mass(stats: UnivariateStatistics) -> Result<UnivariateStatistics> {
    if stats.count == 0.0 {
        return Err(Error::EmptyData("all sample weights are zero".to_string()));
    }
    Ok(stats)
}

fn error_mean<T, Op>(y_true: &[T], y_pred: &[T], op: Op) -> Result<f64>
where
    T: ScalarLane,
    Op: Fn(T, T) -> T,
{
    validate(y_true, y_pred)?;
    Ok(univariate_binary(y_true, y_pred, |&t, &p| op(t, p))?.mean)
}

fn weighted_error_mean<T, Op>(y_true: &[T], y_pred: &[T], sample_weight: &[T], op: Op) -> Result<f64>
where
    T: ScalarLane,
    Op: Fn(T, T) -> T,
{
    validate_weighted(y_true, y_pred, sample_weight)?;
    let stats = univariate_binary_weighted(y_true, y_pred, sample_weight, |&t, &p| op(t, p))?;
    Ok(nonzero_mass(stats)?.mean)
}

#[inline]
fn absolute_error<T: ScalarLane>(t: T, p: T) -> T {
    (t - p).abs()
}

#[inline]
fn absolute_percentage_error<T: ScalarLane>(t: T, p: T) -> T {
    ((t - p) / t).abs()
}

#[inline]
fn squared_error<T: ScalarLane>(t: T, p: T) -> T {
    let e = t - p;
    e * e
}

#[inline]
fn squared_log_error<T: ScalarLane>(t: T, p: T) -> T {
    let e = t.ln_1p() - p.ln_1p();
    e * e
}

#[inline]
fn poisson_neg_likelihood<T: ScalarLane>(t: T, p: T) -> T {
    p - t * p.ln()
}

#[inline]
fn poisson_deviance<T: ScalarLane>(t: T, p: T) -> T {
    let two = T::one() + T::one();
    if t == T::zero() {
        two * p
    } else {
        two * (t * (t / p).ln() - t + p)
    }
}

#[inline]
fn binary_cross_entropy<T: ScalarLane>(t: T, p: T) -> T {
    // 1 - 1e-15 rounds to 1 in single precision
    let eps = T::of_f64(LOG_LOSS_EPSILON).max(T::epsilon());
    let p = p.max(eps).min(T::one() - eps);
    -(t * p.ln() + (T::one() - t) * (T::one() - p).ln())
}

/// Mean absolute error
///
/// # Arguments
/// * `y_true` - observed values
/// * `y_pred` - predicted values
///
/// # Returns
/// * `Result<f64>` - mean of `|t - p|`
pub fn mean_absolute_error<T: ScalarLane>(y_true: &[T], y_pred: &[T]) -> Result<f64> {
    error_mean(y_true, y_pred, absolute_error)
}

pub fn mean_absolute_error_weighted<T: ScalarLane>(
    y_true: &[T],
    y_pred: &[T],
    sample_weight: &[T],
) -> Result<f64> {
    weighted_error_mean(y_true, y_pred, sample_weight, absolute_error)
}

/// Mean absolute percentage error, as a fraction rather than a percentage.
///
/// Observations equal to zero make the result infinite.
pub fn mean_absolute_percentage_error<T: ScalarLane>(y_true: &[T], y_pred: &[T]) -> Result<f64> {
    error_mean(y_true, y_pred, absolute_percentage_error)
}

pub fn mean_absolute_percentage_error_weighted<T: ScalarLane>(
    y_true: &[T],
    y_pred: &[T],
    sample_weight: &[T],
) -> Result<f64> {
    weighted_error_mean(y_true, y_pred, sample_weight, absolute_percentage_error)
}

/// Mean squared error
///
/// # Arguments
/// * `y_true` - observed values
/// * `y_pred` - predicted values
///
/// # Returns
/// * `Result<f64>` - mean of `(t - p)^2`
pub fn mean_squared_error<T: ScalarLane>(y_true: &[T], y_pred: &[T]) -> Result<f64> {
    error_mean(y_true, y_pred, squared_error)
}

pub fn mean_squared_error_weighted<T: ScalarLane>(
    y_true: &[T],
    y_pred: &[T],
    sample_weight: &[T],
) -> Result<f64> {
    weighted_error_mean(y_true, y_pred, sample_weight, squared_error)
}

/// Root of the mean squared error
pub fn root_mean_squared_error<T: ScalarLane>(y_true: &[T], y_pred: &[T]) -> Result<f64> {
    let mse = mean_squared_error(y_true, y_pred)?;
    Ok(mse.sqrt())
}

pub fn root_mean_squared_error_weighted<T: ScalarLane>(
    y_true: &[T],
    y_pred: &[T],
    sample_weight: &[T],
) -> Result<f64> {
    let mse = mean_squared_error_weighted(y_true, y_pred, sample_weight)?;
    Ok(mse.sqrt())
}

/// Mean squared logarithmic error, `mean((ln(1 + t) - ln(1 + p))^2)`.
pub fn mean_squared_log_error<T: ScalarLane>(y_true: &[T], y_pred: &[T]) -> Result<f64> {
    error_mean(y_true, y_pred, squared_log_error)
}

pub fn mean_squared_log_error_weighted<T: ScalarLane>(
    y_true: &[T],
    y_pred: &[T],
    sample_weight: &[T],
) -> Result<f64> {
    weighted_error_mean(y_true, y_pred, sample_weight, squared_log_error)
}

/// `1 - SSE / SST`, or 1 for a perfect fit of constant data and 0 for an
/// imperfect one.
fn score_ratio(unexplained: f64, total: f64) -> f64 {
    if total == 0.0 {
        if unexplained == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - unexplained / total
    }
}

/// Coefficient of determination (R²)
///
/// The residual sum of squares comes from the sum of the squared errors, the
/// total sum of squares from the residual sum of squares of `y_true` about
/// its own mean.
///
/// # Arguments
/// * `y_true` - observed values
/// * `y_pred` - predicted values
///
/// # Returns
/// * `Result<f64>` - R² score, at most 1
pub fn r2_score<T: ScalarLane>(y_true: &[T], y_pred: &[T]) -> Result<f64> {
    validate(y_true, y_pred)?;
    let sse = univariate_binary(y_true, y_pred, |&t, &p| squared_error(t, p))?.sum;
    let sst = univariate(y_true).ssr;
    Ok(score_ratio(sse, sst))
}

pub fn r2_score_weighted<T: ScalarLane>(
    y_true: &[T],
    y_pred: &[T],
    sample_weight: &[T],
) -> Result<f64> {
    validate_weighted(y_true, y_pred, sample_weight)?;
    let errors = univariate_binary_weighted(y_true, y_pred, sample_weight, |&t, &p| {
        squared_error(t, p)
    })?;
    let sse = nonzero_mass(errors)?.sum;
    let sst = univariate_weighted(y_true, sample_weight)?.ssr;
    Ok(score_ratio(sse, sst))
}

/// Explained variance score, `1 - Var(t - p) / Var(t)`.
///
/// Unlike [`r2_score`] this ignores a constant bias of the predictions.
pub fn explained_variance_score<T: ScalarLane>(y_true: &[T], y_pred: &[T]) -> Result<f64> {
    validate(y_true, y_pred)?;
    let residual = univariate_binary(y_true, y_pred, |&t, &p| t - p)?;
    let observed = univariate(y_true);
    Ok(score_ratio(residual.variance, observed.variance))
}

pub fn explained_variance_score_weighted<T: ScalarLane>(
    y_true: &[T],
    y_pred: &[T],
    sample_weight: &[T],
) -> Result<f64> {
    validate_weighted(y_true, y_pred, sample_weight)?;
    let residual = univariate_binary_weighted(y_true, y_pred, sample_weight, |&t, &p| t - p)?;
    let residual = nonzero_mass(residual)?;
    let observed = univariate_weighted(y_true, sample_weight)?;
    Ok(score_ratio(residual.variance, observed.variance))
}

/// Poisson negative log likelihood without the `ln(t!)` term,
/// `mean(p - t * ln(p))` where `p` is the predicted rate.
pub fn poisson_neg_likelihood_loss<T: ScalarLane>(y_true: &[T], y_pred: &[T]) -> Result<f64> {
    error_mean(y_true, y_pred, poisson_neg_likelihood)
}

pub fn poisson_neg_likelihood_loss_weighted<T: ScalarLane>(
    y_true: &[T],
    y_pred: &[T],
    sample_weight: &[T],
) -> Result<f64> {
    weighted_error_mean(y_true, y_pred, sample_weight, poisson_neg_likelihood)
}

/// Mean Poisson deviance, `mean(2 * (t * ln(t / p) - t + p))`.
///
/// The `t * ln(t / p)` term is taken as 0 where `t` is 0.
pub fn mean_poisson_deviance<T: ScalarLane>(y_true: &[T], y_pred: &[T]) -> Result<f64> {
    error_mean(y_true, y_pred, poisson_deviance)
}

pub fn mean_poisson_deviance_weighted<T: ScalarLane>(
    y_true: &[T],
    y_pred: &[T],
    sample_weight: &[T],
) -> Result<f64> {
    weighted_error_mean(y_true, y_pred, sample_weight, poisson_deviance)
}

/// Binary cross-entropy of predicted probabilities `y_pred` against labels
/// (or target probabilities) `y_true`.
///
/// Predictions are clamped to `[eps, 1 - eps]` with `eps` the larger of
/// [`LOG_LOSS_EPSILON`] and the machine epsilon of `T`.
pub fn log_loss<T: ScalarLane>(y_true: &[T], y_pred: &[T]) -> Result<f64> {
    error_mean(y_true, y_pred, binary_cross_entropy)
}

pub fn log_loss_weighted<T: ScalarLane>(
    y_true: &[T],
    y_pred: &[T],
    sample_weight: &[T],
) -> Result<f64> {
    weighted_error_mean(y_true, y_pred, sample_weight, binary_cross_entropy)
}
