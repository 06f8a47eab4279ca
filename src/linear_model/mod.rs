//! Linear regression trained with batch gradient descent.
//!
//! This module provides:
//! - `Trainer`: full-batch gradient descent with L2 regularization on the
//!   weights, per-weight gradient clipping and cost-based early stopping
//! - `objective`: the prediction, cost and gradient functions the trainer uses
//!
//! # Examples
//!
//! ```rust
//! use gradfit::{Dataset, Trainer, TrainerConfig, TrainingState};
//!
//! let dataset = Dataset::synthetic(20, 1, 2.0, 1.0);
//! let config = TrainerConfig::new(20, 1).l2_lambda(0.0).clip_limit(100.0);
//!
//! let report = Trainer::new(config).fit_dataset(&dataset, 1e-3).unwrap();
//! assert!(report.state.is_terminal());
//! assert_eq!(report.parameters.as_slice().len(), 2);
//! ```

pub mod objective;
mod gradient_descent;

pub use gradient_descent::{Checkpoint, Parameters, Trainer, TrainingReport, TrainingState};
