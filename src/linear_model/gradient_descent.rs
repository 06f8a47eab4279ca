use log::{debug, info, warn};
use ndarray::ArrayView1;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::objective::{bias_gradient, clip_gradient, predict, regularized_cost, weight_gradient};
use crate::config::{TrainerConfig, WeightInit};
use crate::dataset::{Dataset, to_matrix, to_vector};
use crate::error::TrainError;
use crate::{Matrix, Vector};

/// Phase of a training run. `Converged` and `Exhausted` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainingState {
    /// Weights and the reference cost are being set up. A label for the
    /// first phase only; reports never carry it.
    Initializing,
    Iterating,
    /// The cost changed by less than the threshold between two checkpoints.
    Converged,
    /// The iteration cap was reached first.
    Exhausted,
}

impl TrainingState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TrainingState::Converged | TrainingState::Exhausted)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Checkpoint {
    pub iteration: usize,
    pub cost: f64,
}

/// Learned weights followed by the bias, `n_features + 1` values in total.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameters {
    values: Vec<f64>,
}

impl Parameters {
    fn from_parts(weights: &Vector, bias: f64) -> Self {
        let mut values = weights.to_vec();
        values.push(bias);
        Self { values }
    }

    pub fn n_features(&self) -> usize {
        self.values.len() - 1
    }

    pub fn weights(&self) -> &[f64] {
        &self.values[..self.n_features()]
    }

    pub fn bias(&self) -> f64 {
        self.values[self.n_features()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Predicts one value per row of a flattened row-major feature buffer.
    pub fn predict(&self, features: &[i32]) -> Result<Vector, TrainError> {
        let n_features = self.n_features();
        if features.len() % n_features != 0 {
            return Err(TrainError::ShapeMismatch {
                what: "features",
                got: features.len(),
                expected: features.len().next_multiple_of(n_features),
            });
        }

        let x = to_matrix(features, features.len() / n_features, n_features);
        let weights = ArrayView1::from(self.weights()).to_owned();
        Ok(predict(&x, &weights, self.bias()))
    }
}

#[derive(Clone, Debug)]
pub struct TrainingReport {
    pub parameters: Parameters,
    /// Either `Converged` or `Exhausted`.
    pub state: TrainingState,
    /// Number of parameter updates applied.
    pub iterations: usize,
    /// Cost of the initial parameters, the first convergence reference.
    pub initial_cost: f64,
    pub final_cost: f64,
    /// Costs recomputed every `log_interval` iterations, in order.
    pub checkpoints: Vec<Checkpoint>,
}

/// Batch gradient descent for a dense linear model with L2 regularization.
///
/// Every iteration uses the full dataset: predictions, averaged gradients, an
/// L2 term on the weights, per-weight gradient clipping and one update step.
/// Every `log_interval` iterations the full cost is recomputed; training stops
/// early once it changes by less than `convergence_threshold`.
///
/// ```
/// use gradfit::{Trainer, TrainerConfig};
///
/// let config = TrainerConfig::new(5, 1)
///     .l2_lambda(0.0)
///     .clip_limit(f64::INFINITY);
/// let trainer = Trainer::new(config);
///
/// let parameters = trainer.train(&[0, 1, 2, 3, 4], &[1, 3, 5, 7, 9], 1e-3).unwrap();
/// assert!((parameters.weights()[0] - 2.0).abs() < 0.1);
/// assert!((parameters.bias() - 1.0).abs() < 0.1);
/// ```
#[derive(Clone, Debug)]
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Fits the model and returns only the learned parameters.
    pub fn train(
        &self,
        features: &[i32],
        targets: &[i32],
        learning_rate: f64,
    ) -> Result<Parameters, TrainError> {
        self.fit(features, targets, learning_rate)
            .map(|report| report.parameters)
    }

    pub fn fit_dataset(
        &self,
        dataset: &Dataset,
        learning_rate: f64,
    ) -> Result<TrainingReport, TrainError> {
        self.fit(dataset.features(), dataset.targets(), learning_rate)
    }

    /// Runs gradient descent and reports how it stopped.
    ///
    /// The config is validated first, so fields assigned directly get the
    /// same checks as the setters.
    pub fn fit(
        &self,
        features: &[i32],
        targets: &[i32],
        learning_rate: f64,
    ) -> Result<TrainingReport, TrainError> {
        self.config.validate()?;
        if !(learning_rate > 0.0) || !learning_rate.is_finite() {
            return Err(TrainError::InvalidLearningRate(learning_rate));
        }
        self.check_shapes(features, targets)?;

        let x = to_matrix(features, self.config.n_samples, self.config.n_features);
        let y = to_vector(targets);
        self.gradient_descent(&x, &y, learning_rate)
    }

    fn check_shapes(&self, features: &[i32], targets: &[i32]) -> Result<(), TrainError> {
        if features.len() != self.config.feature_len() {
            return Err(TrainError::ShapeMismatch {
                what: "features",
                got: features.len(),
                expected: self.config.feature_len(),
            });
        }
        if targets.len() != self.config.n_samples {
            return Err(TrainError::ShapeMismatch {
                what: "targets",
                got: targets.len(),
                expected: self.config.n_samples,
            });
        }
        Ok(())
    }

    fn initial_weights(&self) -> Vector {
        match self.config.init {
            WeightInit::Zeros => Vector::zeros(self.config.n_features),
            WeightInit::Uniform { low, high } => {
                let mut rng = StdRng::seed_from_u64(self.config.seed);
                Vector::random_using(self.config.n_features, Uniform::new(low, high), &mut rng)
            }
        }
    }

    fn gradient_descent(
        &self,
        x: &Matrix,
        y: &Vector,
        learning_rate: f64,
    ) -> Result<TrainingReport, TrainError> {
        let config = &self.config;

        let mut weights = self.initial_weights();
        let mut bias = 0.0;
        let initial_cost = regularized_cost(x, y, &weights, bias, config.l2_lambda);
        debug!("initial cost={initial_cost}");

        let mut state = TrainingState::Iterating;
        let mut prev_cost = initial_cost;
        let mut checkpoints = Vec::new();
        let mut iterations = 0;

        for iteration in 0..config.max_iterations {
            let residuals = predict(x, &weights, bias) - y;
            let weight_grad = clip_gradient(
                weight_gradient(x, &residuals, &weights, config.l2_lambda),
                config.clip_limit,
            );
            let bias_grad = bias_gradient(&residuals);

            weights.scaled_add(-learning_rate, &weight_grad);
            bias -= learning_rate * bias_grad;
            iterations = iteration + 1;

            if !bias.is_finite() || weights.iter().any(|w| !w.is_finite()) {
                warn!(
                    "parameters became non-finite at iteration {iteration}, \
                     learning_rate={learning_rate}"
                );
                return Err(TrainError::Diverged { iteration });
            }

            if iteration % config.log_interval != 0 {
                continue;
            }

            let cost = regularized_cost(x, y, &weights, bias, config.l2_lambda);
            debug!("iteration {iteration}: cost={cost}");
            checkpoints.push(Checkpoint { iteration, cost });

            if (cost - prev_cost).abs() < config.convergence_threshold {
                info!("converged at iteration {iteration}: cost={cost}");
                state = TrainingState::Converged;
                break;
            }
            prev_cost = cost;
        }

        if state == TrainingState::Iterating {
            state = TrainingState::Exhausted;
            info!("stopped after {iterations} iterations without converging");
        }

        let final_cost = regularized_cost(x, y, &weights, bias, config.l2_lambda);
        Ok(TrainingReport {
            parameters: Parameters::from_parts(&weights, bias),
            state,
            iterations,
            initial_cost,
            final_cost,
            checkpoints,
        })
    }
}
