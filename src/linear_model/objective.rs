//! Squared-error objective with an L2 penalty on the weights.
//!
//! All functions take the `N x F` feature matrix and length-`N` targets as
//! already-validated `ndarray` views.

use crate::{Matrix, Vector};

/// `x · weights + bias` for every row.
pub fn predict(x: &Matrix, weights: &Vector, bias: f64) -> Vector {
    x.dot(weights) + bias
}

/// `(1/2N) Σ (pred - y)² + (λ/2) Σ w²`. The bias is not penalized.
pub fn regularized_cost(
    x: &Matrix,
    y: &Vector,
    weights: &Vector,
    bias: f64,
    l2_lambda: f64,
) -> f64 {
    let n_samples = x.nrows() as f64;
    let residuals = predict(x, weights, bias) - y;
    let data_term = residuals.mapv(|r| r * r).sum() / (2.0 * n_samples);
    let penalty = 0.5 * l2_lambda * weights.mapv(|w| w * w).sum();
    data_term + penalty
}

/// `(1/N) Σ_i residual_i · x_ij + λ · w_j` for each feature `j`.
///
/// The penalty is added after averaging and scales the current weight only.
pub fn weight_gradient(x: &Matrix, residuals: &Vector, weights: &Vector, l2_lambda: f64) -> Vector {
    let n_samples = x.nrows() as f64;
    x.t().dot(residuals) / n_samples + weights * l2_lambda
}

pub fn bias_gradient(residuals: &Vector) -> f64 {
    residuals.sum() / residuals.len() as f64
}

/// Clamps every component into `[-limit, limit]`.
pub fn clip_gradient(gradient: Vector, limit: f64) -> Vector {
    gradient.mapv_into(|g| g.clamp(-limit, limit))
}
