use anyhow::Context;
use clap::Parser;
use riskscore::application::data::{SyntheticConfig, generate_synthetic};
use riskscore::application::ml::{TrainingConfig, train};
use riskscore::infrastructure::persistence::read_dataset;
use std::path::PathBuf;
use tracing::info;

/// Train the logistic-regression risk classifier and save the artifact
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Training data CSV. When omitted, data is generated in memory.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Path to output model file
    #[arg(long, default_value = "models/model.json")]
    output: PathBuf,

    /// Rows to generate when no input is given
    #[arg(long, default_value_t = 20_000)]
    rows: usize,

    /// Seed for data generation and the train/test split
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// L2 regularization strength
    #[arg(long, default_value_t = 1.0)]
    alpha: f64,

    /// Fraction of rows held out for evaluation. 0 trains on everything.
    #[arg(long, default_value_t = 0.2)]
    test_size: f64,
}

fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let args = Args::parse();

    let rows = match &args.input {
        Some(path) => {
            info!("Loading training data from {}", path.display());
            read_dataset(path).with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            info!(
                "No input given, generating {} rows (seed={})",
                args.rows, args.seed
            );
            generate_synthetic(SyntheticConfig {
                rows: args.rows,
                seed: args.seed,
            })
            .context("Failed to generate synthetic data")?
        }
    };

    let config = TrainingConfig {
        test_fraction: args.test_size,
        alpha: args.alpha,
        seed: args.seed,
    };
    let outcome = train(&rows, &config).context("Training failed")?;

    outcome
        .model
        .save(&args.output)
        .with_context(|| format!("Failed to save model to {}", args.output.display()))?;
    println!("Saved model to: {}", args.output.display());

    match outcome.report {
        Some(report) => println!(
            "Precision: {:.3} | Recall: {:.3} | F1: {:.3} | ROC-AUC: {:.3}",
            report.precision, report.recall, report.f1, report.roc_auc
        ),
        None => println!("No held-out split; evaluation skipped."),
    }

    Ok(())
}
