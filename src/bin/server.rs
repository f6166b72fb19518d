//! Riskscore Server - transaction compliance risk scoring over HTTP
//!
//! Loads the classifier artifact once at startup and serves `/health`,
//! `/predict` and `/predict_batch`. Metrics are pushed via structured JSON
//! logs to stdout.
//!
//! # Usage
//! ```sh
//! MODEL_PATH=models/model.json cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `SERVER_HOST` / `SERVER_PORT` - Listen address (default: 0.0.0.0:8000)
//! - `MODEL_PATH` - Classifier artifact (default: models/model.json)
//! - `OBSERVABILITY_ENABLED` - Enable metrics reporting (default: true)
//! - `OBSERVABILITY_INTERVAL` - Interval in seconds between metric outputs (default: 60)

use anyhow::{Context, Result};
use riskscore::application::ml::load_classifier;
use riskscore::application::scoring::ScoringService;
use riskscore::config::Config;
use riskscore::domain::ports::RiskClassifier;
use riskscore::infrastructure::observability::{Metrics, MetricsReporter};
use riskscore::interfaces::http::{AppState, create_router};
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    info!("Riskscore Server {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: listen={}, model={}",
        config.listen_addr(),
        config.model_path.display()
    );

    let service = match load_classifier(&config.model_path) {
        Ok(model) => {
            info!("Classifier ready: {} ({})", model.name(), model.version());
            ScoringService::new(Arc::new(model))
        }
        Err(e) => {
            warn!(
                "Model not loaded from {}: {}. Scoring endpoints will return 503 until a model is trained (cargo run --bin train_ml) and the server restarted.",
                config.model_path.display(),
                e
            );
            ScoringService::unavailable(config.model_path.clone(), e.to_string())
        }
    };
    let service = Arc::new(service);

    let metrics = Metrics::new().context("Failed to create metrics registry")?;

    if config.observability_enabled {
        let reporter = MetricsReporter::new(
            service.clone(),
            metrics.clone(),
            config.observability_interval_seconds,
        );
        tokio::spawn(async move {
            reporter.run().await;
        });
        info!(
            "Metrics reporter started (interval: {}s)",
            config.observability_interval_seconds
        );
    } else {
        info!("Metrics reporting disabled.");
    }

    let app = create_router(AppState::new(service, metrics));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}. Press Ctrl+C to shutdown.", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received. Draining connections..."),
        Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
    }
}
