use anyhow::Context;
use clap::Parser;
use riskscore::application::data::{SyntheticConfig, generate_synthetic};
use riskscore::infrastructure::persistence::write_dataset;
use std::path::PathBuf;
use tracing::info;

/// Generate a labeled synthetic transaction dataset as CSV
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of rows to generate
    #[arg(long, default_value_t = 20_000)]
    rows: usize,

    /// RNG seed; the same seed always yields the same rows
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output CSV path
    #[arg(short, long, default_value = "data/transactions.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let cli = Cli::parse();

    info!("Generating {} rows (seed={})", cli.rows, cli.seed);
    let rows = generate_synthetic(SyntheticConfig {
        rows: cli.rows,
        seed: cli.seed,
    })
    .context("Failed to generate synthetic data")?;

    let positives = rows.iter().filter(|r| r.label == 1).count();
    info!(
        "Positive rate: {:.2}% ({}/{})",
        positives as f64 / rows.len().max(1) as f64 * 100.0,
        positives,
        rows.len()
    );

    write_dataset(&cli.output, &rows)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    println!("Saved dataset to: {}", cli.output.display());

    Ok(())
}
