use gradfit::metrics::{mean_squared_error, r2_score};
use gradfit::{Dataset, Trainer, TrainerConfig};

const SLOPE: f64 = 2.5;
const INTERCEPT: f64 = 1.5;
const LEARNING_RATE: f64 = 1e-4;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Optional path to a TOML file with a [trainer] table
    let config = match std::env::args().nth(1) {
        Some(path) => TrainerConfig::load_from_file(path)?,
        None => TrainerConfig::default(),
    };

    println!("=== Synthetic Linear Regression ===\n");
    println!(
        "{} samples, {} features, lambda={}, clip={}, lr={}",
        config.n_samples, config.n_features, config.l2_lambda, config.clip_limit, LEARNING_RATE
    );

    let dataset = Dataset::synthetic(config.n_samples, config.n_features, SLOPE, INTERCEPT);
    let trainer = Trainer::new(config);
    let report = trainer.fit_dataset(&dataset, LEARNING_RATE)?;

    println!(
        "\nTraining complete: {:?} after {} iterations (cost {:.6} -> {:.6})",
        report.state, report.iterations, report.initial_cost, report.final_cost
    );
    println!("Target -> Slope: {}, Y-Intercept: {}", SLOPE, INTERCEPT);

    let parameters = &report.parameters;
    let weights = parameters
        .weights()
        .iter()
        .enumerate()
        .map(|(i, w)| format!("Weight #{}: {:.4}", i, w))
        .collect::<Vec<_>>()
        .join(", ");
    println!("Result -> {}, Bias: {:.4}", weights, parameters.bias());

    let predictions = parameters.predict(dataset.features())?;
    let targets = dataset.target_vector();
    println!("\nMSE: {:.4}", mean_squared_error(&targets, &predictions)?);
    println!("R² score: {:.4}", r2_score(&targets, &predictions)?);

    Ok(())
}
