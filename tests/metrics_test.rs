mod common;

use common::{random_values, relative_eq};
use vstat::metrics::regression::*;
use vstat::Error;

fn naive_mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    sum / n as f64
}

#[test]
fn test_error_metrics_match_naive() {
    let y_true = random_values(59, 10_007, 5.0, 3.0);
    let noise = random_values(61, 10_007, 0.0, 0.5);
    let y_pred: Vec<f64> = y_true.iter().zip(&noise).map(|(t, e)| t + e).collect();
    let pairs = || y_true.iter().zip(&y_pred);

    let mse = naive_mean(pairs().map(|(t, p)| (t - p) * (t - p)));
    let mae = naive_mean(pairs().map(|(t, p)| (t - p).abs()));
    let mape = naive_mean(pairs().map(|(t, p)| ((t - p) / t).abs()));
    let msle = naive_mean(pairs().map(|(t, p)| (t.ln_1p() - p.ln_1p()).powi(2)));

    assert!(relative_eq(mean_squared_error(&y_true, &y_pred).unwrap(), mse, 1e-10));
    assert!(relative_eq(root_mean_squared_error(&y_true, &y_pred).unwrap(), mse.sqrt(), 1e-10));
    assert!(relative_eq(mean_absolute_error(&y_true, &y_pred).unwrap(), mae, 1e-10));
    assert!(relative_eq(mean_absolute_percentage_error(&y_true, &y_pred).unwrap(), mape, 1e-10));
    assert!(relative_eq(mean_squared_log_error(&y_true, &y_pred).unwrap(), msle, 1e-10));
}

#[test]
fn test_r2_two_pass() {
    let y_true = random_values(67, 5003, 0.0, 10.0);
    let noise = random_values(71, 5003, 0.0, 1.0);
    let y_pred: Vec<f64> = y_true.iter().zip(&noise).map(|(t, e)| t + e).collect();

    let mean = naive_mean(y_true.iter().copied());
    let sst: f64 = y_true.iter().map(|t| (t - mean) * (t - mean)).sum();
    let sse: f64 = y_true.iter().zip(&y_pred).map(|(t, p)| (t - p) * (t - p)).sum();

    let r2 = r2_score(&y_true, &y_pred).unwrap();
    assert!(relative_eq(r2, 1.0 - sse / sst, 1e-10));
    assert!(r2 > 0.9 && r2 <= 1.0);

    let ev = explained_variance_score(&y_true, &y_pred).unwrap();
    assert!(ev >= r2 - 1e-12);
}

#[test]
fn test_count_metrics() {
    let y_true: [f64; 6] = [0.0, 1.0, 3.0, 2.0, 0.0, 5.0];
    let y_pred: [f64; 6] = [0.5, 1.2, 2.5, 2.0, 0.1, 4.0];

    let nll = naive_mean(y_true.iter().zip(&y_pred).map(|(t, p)| p - t * p.ln()));
    let dev = naive_mean(y_true.iter().zip(&y_pred).map(|(&t, &p)| {
        let term = if t == 0.0 { 0.0 } else { t * (t / p).ln() };
        2.0 * (term - t + p)
    }));

    assert!(relative_eq(poisson_neg_likelihood_loss(&y_true, &y_pred).unwrap(), nll, 1e-12));
    assert!(relative_eq(mean_poisson_deviance(&y_true, &y_pred).unwrap(), dev, 1e-12));
    assert_eq!(mean_poisson_deviance(&y_true, &y_true).unwrap(), 0.0);
}

#[test]
fn test_log_loss_against_naive() {
    let labels: [f64; 7] = [1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0];
    let probs: [f64; 7] = [0.9, 0.1, 0.6, 0.99, 0.4, 0.05, 0.7];
    let expected = naive_mean(
        labels
            .iter()
            .zip(&probs)
            .map(|(t, p)| -(t * p.ln() + (1.0 - t) * (1.0 - p).ln())),
    );
    assert!(relative_eq(log_loss(&labels, &probs).unwrap(), expected, 1e-12));

    let weights = [1.0; 7];
    assert!(relative_eq(
        log_loss_weighted(&labels, &probs, &weights).unwrap(),
        expected,
        1e-12
    ));
}

#[test]
fn test_weighted_metrics_ignore_zero_weights() {
    let y_true = [1.0, 2.0, 3.0, 100.0];
    let y_pred = [1.5, 2.0, 2.0, -50.0];
    let w = [1.0, 1.0, 1.0, 0.0];

    let a = mean_squared_error_weighted(&y_true, &y_pred, &w).unwrap();
    let b = mean_squared_error(&y_true[..3], &y_pred[..3]).unwrap();
    assert!(relative_eq(a, b, 1e-12));

    let a = r2_score_weighted(&y_true, &y_pred, &w).unwrap();
    let b = r2_score(&y_true[..3], &y_pred[..3]).unwrap();
    assert!(relative_eq(a, b, 1e-12));
}

#[test]
fn test_input_validation() {
    let empty: Vec<f64> = Vec::new();
    assert!(matches!(mean_absolute_error(&empty, &empty), Err(Error::EmptyData(_))));
    assert!(matches!(
        explained_variance_score(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
        Err(Error::LengthMismatch {
            expected: 3,
            actual: 2
        })
    ));
    assert!(matches!(
        r2_score_weighted(&[1.0, 2.0], &[1.0, 2.0], &[1.0]),
        Err(Error::LengthMismatch { .. })
    ));
    assert!(matches!(
        mean_squared_error_weighted(&[1.0, 2.0], &[1.0, 2.0], &[0.0, 0.0]),
        Err(Error::EmptyData(_))
    ));
}
