//! Push-based metrics reporter
//!
//! Periodically writes a metrics snapshot as structured JSON to stdout.

use crate::application::scoring::ScoringService;
use crate::domain::risk::RiskLabel;
use crate::infrastructure::observability::metrics::{
    ENDPOINT_PREDICT, ENDPOINT_PREDICT_BATCH, Metrics,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Metrics snapshot for JSON output
#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub model: ModelSnapshot,
    pub requests: RequestSnapshot,
    pub predictions: PredictionSnapshot,
}

#[derive(Serialize)]
pub struct ModelSnapshot {
    pub ready: bool,
    pub name: Option<String>,
    pub version: Option<String>,
}

#[derive(Serialize)]
pub struct RequestSnapshot {
    pub predict: u64,
    pub predict_batch: u64,
}

#[derive(Serialize)]
pub struct PredictionSnapshot {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

/// Outputs metrics as structured JSON logs on a configurable interval.
pub struct MetricsReporter {
    service: Arc<ScoringService>,
    metrics: Metrics,
    start_time: Instant,
    interval: Duration,
}

impl MetricsReporter {
    pub fn new(service: Arc<ScoringService>, metrics: Metrics, interval_seconds: u64) -> Self {
        Self {
            service,
            metrics,
            start_time: Instant::now(),
            interval: Duration::from_secs(interval_seconds.max(1)),
        }
    }

    /// Run the reporter in a loop, outputting metrics periodically
    pub async fn run(self) {
        info!(
            "MetricsReporter: Starting push-based metrics (interval: {:?})",
            self.interval
        );

        loop {
            tokio::time::sleep(self.interval).await;

            let snapshot = self.collect_snapshot();
            match serde_json::to_string(&snapshot) {
                Ok(json) => {
                    // Prefix so log shippers can filter metric lines
                    println!("METRICS_JSON:{}", json);
                    info!(
                        "Requests: predict={} predict_batch={} | Uptime: {}s",
                        snapshot.requests.predict,
                        snapshot.requests.predict_batch,
                        snapshot.uptime_seconds
                    );
                }
                Err(e) => warn!("Failed to serialize metrics: {}", e),
            }
            debug!("Prometheus exposition:\n{}", self.metrics.render());
        }
    }

    fn collect_snapshot(&self) -> MetricsSnapshot {
        let (name, version) = match self.service.model_info() {
            Some((name, version)) => (Some(name.to_string()), Some(version.to_string())),
            None => (None, None),
        };

        MetricsSnapshot {
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            model: ModelSnapshot {
                ready: self.service.is_ready(),
                name,
                version,
            },
            requests: RequestSnapshot {
                predict: self.metrics.requests_for(ENDPOINT_PREDICT),
                predict_batch: self.metrics.requests_for(ENDPOINT_PREDICT_BATCH),
            },
            predictions: PredictionSnapshot {
                low: self.metrics.predictions_for(RiskLabel::Low.as_str()),
                medium: self.metrics.predictions_for(RiskLabel::Medium.as_str()),
                high: self.metrics.predictions_for(RiskLabel::High.as_str()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::observability::metrics::OUTCOME_OK;

    #[test]
    fn test_snapshot_without_model() {
        let service = Arc::new(ScoringService::unavailable("models/model.json", "missing"));
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.inc_requests(ENDPOINT_PREDICT, OUTCOME_OK);
        metrics.inc_predictions("HIGH");
        let reporter = MetricsReporter::new(service, metrics, 60);

        let snapshot = reporter.collect_snapshot();

        assert!(!snapshot.model.ready);
        assert!(snapshot.model.name.is_none());
        assert_eq!(snapshot.requests.predict, 1);
        assert_eq!(snapshot.predictions.high, 1);
        assert!(!snapshot.timestamp.is_empty());
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = MetricsSnapshot {
            timestamp: "2026-01-10T10:00:00Z".to_string(),
            uptime_seconds: 3600,
            version: "0.3.1".to_string(),
            model: ModelSnapshot {
                ready: true,
                name: Some("Logistic Regression".to_string()),
                version: Some("0a1b2c3d4e5f".to_string()),
            },
            requests: RequestSnapshot {
                predict: 12,
                predict_batch: 3,
            },
            predictions: PredictionSnapshot {
                low: 40,
                medium: 7,
                high: 2,
            },
        };

        let json = serde_json::to_string(&snapshot).expect("Failed to serialize");
        assert!(json.contains("\"predict_batch\":3"));
        assert!(json.contains("0a1b2c3d4e5f"));
    }
}
