use super::Metrics;
use prometheus::HistogramTimer;
use tracing::trace;

/// Records scoring latency for one endpoint when dropped
pub struct LatencyGuard {
    endpoint: &'static str,
    timer: Option<HistogramTimer>,
}

impl LatencyGuard {
    pub fn new(metrics: &Metrics, endpoint: &'static str) -> Self {
        Self {
            endpoint,
            timer: Some(metrics.latency(endpoint).start_timer()),
        }
    }
}

impl Drop for LatencyGuard {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            let elapsed = timer.stop_and_record();
            trace!("{} scored in {:.6}s", self.endpoint, elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::observability::metrics::{ENDPOINT_PREDICT, ENDPOINT_PREDICT_BATCH};

    #[test]
    fn test_latency_guard_records_scoring_time() {
        let metrics = Metrics::new().unwrap();

        {
            let _guard = LatencyGuard::new(&metrics, ENDPOINT_PREDICT);
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        let histogram = metrics.latency(ENDPOINT_PREDICT);
        assert_eq!(histogram.get_sample_count(), 1);
        assert!(histogram.get_sample_sum() >= 0.005);
        assert_eq!(metrics.latency(ENDPOINT_PREDICT_BATCH).get_sample_count(), 0);
    }
}
