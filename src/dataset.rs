use crate::error::TrainError;
use crate::{Matrix, Vector};

/// Reads element `(row, col)` of a row-major buffer with `n_features` columns.
///
/// Callers validate the buffer length once up front; out-of-range indices panic.
#[inline]
pub fn element_at(buffer: &[i32], n_features: usize, row: usize, col: usize) -> i32 {
    buffer[row * n_features + col]
}

/// A training set stored as a flattened row-major feature buffer plus one target per row.
#[derive(Clone, Debug)]
pub struct Dataset {
    features: Vec<i32>,
    targets: Vec<i32>,
    n_features: usize,
}

impl Dataset {
    pub fn new(
        features: Vec<i32>,
        targets: Vec<i32>,
        n_features: usize,
    ) -> Result<Self, TrainError> {
        if n_features == 0 {
            return Err(TrainError::ShapeMismatch {
                what: "n_features",
                got: 0,
                expected: 1,
            });
        }

        let expected = targets.len() * n_features;
        if features.len() != expected {
            return Err(TrainError::ShapeMismatch {
                what: "features",
                got: features.len(),
                expected,
            });
        }

        Ok(Self {
            features,
            targets,
            n_features,
        })
    }

    /// Builds `n_samples` rows where every feature of row `i` equals `i` and
    /// the target is `slope * i + intercept` truncated toward zero.
    ///
    /// # Panics
    ///
    /// Panics if `n_features` is zero or `n_samples` does not fit in `i32`.
    pub fn synthetic(n_samples: usize, n_features: usize, slope: f64, intercept: f64) -> Self {
        assert!(n_features > 0, "n_features must be at least 1");
        assert!(
            i32::try_from(n_samples).is_ok(),
            "n_samples must fit in i32, got {}",
            n_samples
        );

        let features = (0..n_samples)
            .flat_map(|i| std::iter::repeat(i as i32).take(n_features))
            .collect();
        let targets = (0..n_samples)
            .map(|i| (slope * i as f64 + intercept) as i32)
            .collect();

        Self {
            features,
            targets,
            n_features,
        }
    }

    pub fn n_samples(&self) -> usize {
        self.targets.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn features(&self) -> &[i32] {
        &self.features
    }

    pub fn targets(&self) -> &[i32] {
        &self.targets
    }

    pub fn get(&self, row: usize, col: usize) -> i32 {
        element_at(&self.features, self.n_features, row, col)
    }

    /// Widens the features into an `N x F` float matrix.
    pub fn feature_matrix(&self) -> Matrix {
        to_matrix(&self.features, self.n_samples(), self.n_features)
    }

    pub fn target_vector(&self) -> Vector {
        to_vector(&self.targets)
    }
}

/// Copies a flattened buffer whose length is already known to be `n_samples * n_features`.
pub(crate) fn to_matrix(buffer: &[i32], n_samples: usize, n_features: usize) -> Matrix {
    debug_assert_eq!(buffer.len(), n_samples * n_features);
    Matrix::from_shape_fn((n_samples, n_features), |(i, j)| {
        f64::from(element_at(buffer, n_features, i, j))
    })
}

pub(crate) fn to_vector(buffer: &[i32]) -> Vector {
    buffer.iter().map(|&v| f64::from(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_dataset_creation() {
        let dataset = Dataset::new(vec![1, 2, 3, 4, 5, 6], vec![1, 2, 3], 2).unwrap();
        assert_eq!(dataset.n_samples(), 3);
        assert_eq!(dataset.n_features(), 2);
        assert_eq!(dataset.get(1, 0), 3);
        assert_eq!(dataset.get(2, 1), 6);
    }

    #[test]
    fn test_dataset_shape_mismatch() {
        let err = Dataset::new(vec![1, 2, 3, 4, 5], vec![1, 2, 3], 2).unwrap_err();
        assert!(matches!(
            err,
            TrainError::ShapeMismatch { what: "features", got: 5, expected: 6 }
        ));
        assert!(Dataset::new(vec![], vec![], 0).is_err());
    }

    #[test]
    fn test_element_at_row_major() {
        let buffer = [10, 11, 12, 20, 21, 22];
        assert_eq!(element_at(&buffer, 3, 0, 2), 12);
        assert_eq!(element_at(&buffer, 3, 1, 0), 20);
    }

    #[test]
    fn test_synthetic_layout() {
        let dataset = Dataset::synthetic(4, 3, 2.5, 1.5);
        assert_eq!(dataset.features().len(), 12);
        for i in 0..4 {
            for j in 0..3 {
                assert_eq!(dataset.get(i, j), i as i32);
            }
        }
        assert_eq!(dataset.targets(), &[1, 4, 6, 9]);
    }

    #[test]
    #[should_panic(expected = "n_features must be at least 1")]
    fn test_synthetic_without_features_panics() {
        Dataset::synthetic(3, 0, 1.0, 0.0);
    }

    #[test]
    #[should_panic(expected = "n_samples must fit in i32")]
    fn test_synthetic_row_overflow_panics() {
        Dataset::synthetic(i32::MAX as usize + 1, 1, 1.0, 0.0);
    }

    #[test]
    fn test_feature_matrix() {
        let dataset = Dataset::new(vec![1, 2, 3, 4], vec![5, 6], 2).unwrap();
        assert_eq!(dataset.feature_matrix(), array![[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(dataset.target_vector(), array![5.0, 6.0]);
    }
}
