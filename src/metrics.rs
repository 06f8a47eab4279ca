//! Goodness-of-fit measures for reporting on a trained model.
//!
//! Each function compares observed targets with predictions of the same
//! length, e.g. the output of [`Parameters::predict`](crate::Parameters::predict).

use crate::Vector;
use crate::error::TrainError;

/// Residuals `y_pred - y_true`, or an error when the lengths differ.
fn residuals(y_true: &Vector, y_pred: &Vector) -> Result<Vector, TrainError> {
    if y_true.len() != y_pred.len() {
        return Err(TrainError::ShapeMismatch {
            what: "predictions",
            got: y_pred.len(),
            expected: y_true.len(),
        });
    }
    Ok(y_pred - y_true)
}

fn mean_of(values: &Vector) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.sum() / values.len() as f64
    }
}

pub fn mean_squared_error(y_true: &Vector, y_pred: &Vector) -> Result<f64, TrainError> {
    let r = residuals(y_true, y_pred)?;
    Ok(mean_of(&(&r * &r)))
}

pub fn mean_absolute_error(y_true: &Vector, y_pred: &Vector) -> Result<f64, TrainError> {
    let r = residuals(y_true, y_pred)?;
    Ok(mean_of(&r.mapv_into(f64::abs)))
}

/// Coefficient of determination. A perfect fit of constant targets scores 1.
pub fn r2_score(y_true: &Vector, y_pred: &Vector) -> Result<f64, TrainError> {
    let r = residuals(y_true, y_pred)?;
    let centered = y_true - mean_of(y_true);

    let unexplained = r.dot(&r);
    let total = centered.dot(&centered);
    if total == 0.0 {
        return Ok(if unexplained == 0.0 { 1.0 } else { 0.0 });
    }
    Ok(1.0 - unexplained / total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_mean_squared_error() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![1.0, 2.0, 5.0];
        assert_relative_eq!(mean_squared_error(&y_true, &y_pred).unwrap(), 4.0 / 3.0);
    }

    #[test]
    fn test_mean_absolute_error() {
        let y_true = array![1.0, 2.0, 3.0, 4.0];
        let y_pred = array![2.0, 2.0, 1.0, 4.0];
        assert_relative_eq!(mean_absolute_error(&y_true, &y_pred).unwrap(), 0.75);
    }

    #[test]
    fn test_r2_score() {
        let y_true = array![1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(r2_score(&y_true, &y_true).unwrap(), 1.0);

        let mean_only = array![2.5, 2.5, 2.5, 2.5];
        assert_relative_eq!(r2_score(&y_true, &mean_only).unwrap(), 0.0);
    }

    #[test]
    fn test_r2_score_constant_targets() {
        let y_true = array![3.0, 3.0];
        assert_relative_eq!(r2_score(&y_true, &array![3.0, 3.0]).unwrap(), 1.0);
        assert_relative_eq!(r2_score(&y_true, &array![2.0, 4.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        let y_true = array![1.0, 2.0];
        let y_pred = array![1.0];
        assert!(matches!(
            mean_squared_error(&y_true, &y_pred),
            Err(TrainError::ShapeMismatch { what: "predictions", got: 1, expected: 2 })
        ));
        assert!(r2_score(&y_true, &y_pred).is_err());
    }
}
