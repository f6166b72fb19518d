//! Push-based observability
//!
//! Metrics are collected in a Prometheus registry and periodically written to
//! stdout as `METRICS_JSON:` lines. Nothing here accepts inbound requests.

pub mod latency_tracker;
pub mod metrics;
pub mod reporter;

pub use latency_tracker::LatencyGuard;
pub use metrics::Metrics;
pub use reporter::MetricsReporter;
