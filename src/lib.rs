pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod config;
pub mod dataset;
pub mod error;
pub mod linear_model;
pub mod metrics;

pub use config::{TrainerConfig, WeightInit};
pub use dataset::{Dataset, element_at};
pub use error::{ConfigError, TrainError};
pub use linear_model::{Checkpoint, Parameters, Trainer, TrainingReport, TrainingState};

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;
