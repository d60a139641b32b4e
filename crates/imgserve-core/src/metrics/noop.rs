use crate::metrics::backend::{MetricsBackend, RequestOutcome};

/// No-op metrics backend that compiles to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_admission_wait(&self, _: &str, _: u64) {}

    #[inline(always)]
    fn record_request_started(&self, _: &str) {}

    #[inline(always)]
    fn record_request_completed(&self, _: &str, _: RequestOutcome, _: u64) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_metrics_is_zero_size() {
        assert_eq!(std::mem::size_of::<NoOpMetrics>(), 0);
    }
}
