use gradfit::metrics::r2_score;
use gradfit::{Dataset, Trainer, TrainerConfig, WeightInit};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== L2 Regularization Comparison ===\n");

    // y = 3x + 2 over 50 rows, two identical feature columns
    let dataset = Dataset::synthetic(50, 2, 3.0, 2.0);
    let targets = dataset.target_vector();
    println!(
        "Training data: {} samples, {} features\n",
        dataset.n_samples(),
        dataset.n_features()
    );

    println!(
        "{:<12} {:>12} {:>12} {:>10} {:>12} {:>10}",
        "lambda", "Weight 1", "Weight 2", "Bias", "Iterations", "R²"
    );
    println!("{}", "-".repeat(72));

    for lambda in [0.0, 0.01, 0.1, 1.0, 10.0] {
        let config = TrainerConfig::new(dataset.n_samples(), dataset.n_features())
            .l2_lambda(lambda)
            .clip_limit(10.0)
            .max_iterations(20_000)
            .init(WeightInit::Uniform { low: -0.1, high: 0.1 })
            .seed(42);

        let report = Trainer::new(config).fit_dataset(&dataset, 5e-4)?;
        let parameters = &report.parameters;
        let predictions = parameters.predict(dataset.features())?;

        println!(
            "{:<12} {:>12.4} {:>12.4} {:>10.4} {:>12} {:>10.4}",
            lambda,
            parameters.weights()[0],
            parameters.weights()[1],
            parameters.bias(),
            report.iterations,
            r2_score(&targets, &predictions)?
        );
    }

    println!("\nLarger lambda pulls the weights toward zero; the bias is never penalized.");

    Ok(())
}
