//! Prometheus metrics for the scoring service
//!
//! All metrics use the `riskscore_` prefix.

use prometheus::{
    CounterVec, Histogram, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Endpoint label values
pub const ENDPOINT_PREDICT: &str = "predict";
pub const ENDPOINT_PREDICT_BATCH: &str = "predict_batch";

/// Outcome label values
pub const OUTCOME_OK: &str = "ok";
pub const OUTCOME_INVALID: &str = "invalid";
pub const OUTCOME_UNAVAILABLE: &str = "unavailable";
pub const OUTCOME_ERROR: &str = "error";

pub const OUTCOMES: [&str; 4] = [OUTCOME_OK, OUTCOME_INVALID, OUTCOME_UNAVAILABLE, OUTCOME_ERROR];

/// Prometheus metrics for the scoring endpoints
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Scoring requests by endpoint and outcome
    pub requests_total: CounterVec,
    /// Emitted assessments by risk label
    pub predictions_total: CounterVec,
    /// Time spent in the scoring service per request
    pub scoring_latency_seconds: HistogramVec,
    /// Items per accepted batch request
    pub batch_size: Histogram,
}

impl Metrics {
    /// Create a new Metrics instance with all collectors registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let requests_total = CounterVec::new(
            Opts::new(
                "riskscore_requests_total",
                "Scoring requests by endpoint and outcome",
            ),
            &["endpoint", "outcome"],
        )?;
        registry.register(Box::new(requests_total.clone()))?;

        let predictions_total = CounterVec::new(
            Opts::new("riskscore_predictions_total", "Risk assessments by label"),
            &["label"],
        )?;
        registry.register(Box::new(predictions_total.clone()))?;

        let scoring_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "riskscore_scoring_latency_seconds",
                "Scoring latency in seconds",
            )
            .buckets(vec![
                0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 1.0,
            ]),
            &["endpoint"],
        )?;
        registry.register(Box::new(scoring_latency_seconds.clone()))?;

        let batch_size = Histogram::with_opts(
            HistogramOpts::new("riskscore_batch_size", "Items per batch request").buckets(vec![
                0.0, 1.0, 5.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0,
            ]),
        )?;
        registry.register(Box::new(batch_size.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            requests_total,
            predictions_total,
            scoring_latency_seconds,
            batch_size,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn inc_requests(&self, endpoint: &str, outcome: &str) {
        self.requests_total
            .with_label_values(&[endpoint, outcome])
            .inc();
    }

    pub fn inc_predictions(&self, label: &str) {
        self.predictions_total.with_label_values(&[label]).inc();
    }

    /// Latency histogram for one endpoint
    pub fn latency(&self, endpoint: &str) -> Histogram {
        self.scoring_latency_seconds.with_label_values(&[endpoint])
    }

    /// Requests seen on `endpoint` across all outcomes
    pub fn requests_for(&self, endpoint: &str) -> u64 {
        OUTCOMES
            .iter()
            .map(|&outcome| {
                self.requests_total
                    .with_label_values(&[endpoint, outcome])
                    .get()
            })
            .sum::<f64>() as u64
    }

    pub fn predictions_for(&self, label: &str) -> u64 {
        self.predictions_total.with_label_values(&[label]).get() as u64
    }
}
