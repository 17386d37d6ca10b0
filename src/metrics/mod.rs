//! Model evaluation metrics built on the binary-op accumulation

pub mod regression;

pub use regression::{
    explained_variance_score, log_loss, mean_absolute_error, mean_absolute_percentage_error,
    mean_poisson_deviance, mean_squared_error, mean_squared_log_error,
    poisson_neg_likelihood_loss, r2_score, root_mean_squared_error,
};
