use std::sync::Arc;

use prometheus::{
    CounterVec, HistogramOpts, HistogramVec, IntGaugeVec, Opts, Registry, proto::MetricFamily,
};

use imgserve_core::{MetricsBackend, RequestOutcome};

const NAMESPACE: &str = "imgserve";

/// Prometheus metrics backend.
///
/// All labels are low cardinality: `server` is the decorator name
/// (e.g. `"limit"`), `outcome` is one of `success`, `failure`, `canceled`.
#[derive(Clone)]
pub struct PrometheusMetrics {
    admission_wait: HistogramVec,
    requests_started: CounterVec,
    requests_completed: CounterVec,
    requests_in_flight: IntGaugeVec,
    request_duration: HistogramVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create a backend registering its metrics in `registry`.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let admission_wait = HistogramVec::new(
            HistogramOpts::new(
                "admission_wait_seconds",
                "Time spent waiting for an admission slot",
            )
            .namespace(NAMESPACE)
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["server"],
        )?;
        registry.register(Box::new(admission_wait.clone()))?;

        let requests_started = CounterVec::new(
            Opts::new("requests_started_total", "Requests admitted to the wrapped server")
                .namespace(NAMESPACE),
            &["server"],
        )?;
        registry.register(Box::new(requests_started.clone()))?;

        let requests_completed = CounterVec::new(
            Opts::new("requests_completed_total", "Requests finished by outcome")
                .namespace(NAMESPACE),
            &["server", "outcome"],
        )?;
        registry.register(Box::new(requests_completed.clone()))?;

        let requests_in_flight = IntGaugeVec::new(
            Opts::new("requests_in_flight", "Requests currently inside the wrapped server")
                .namespace(NAMESPACE),
            &["server"],
        )?;
        registry.register(Box::new(requests_in_flight.clone()))?;

        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "request_duration_seconds",
                "Time spent inside the wrapped server",
            )
            .namespace(NAMESPACE)
            .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0]),
            &["server"],
        )?;
        registry.register(Box::new(request_duration.clone()))?;

        Ok(Self {
            admission_wait,
            requests_started,
            requests_completed,
            requests_in_flight,
            request_duration,
            registry,
        })
    }

    /// Create a backend with its own registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    /// Gather all metrics for exposition, e.g. with [`prometheus::TextEncoder`].
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_admission_wait(&self, server: &str, wait_ms: u64) {
        self.admission_wait
            .with_label_values(&[server])
            .observe(wait_ms as f64 / 1000.0);
    }

    fn record_request_started(&self, server: &str) {
        self.requests_started.with_label_values(&[server]).inc();
        self.requests_in_flight.with_label_values(&[server]).inc();
    }

    fn record_request_completed(&self, server: &str, outcome: RequestOutcome, duration_ms: u64) {
        self.requests_in_flight.with_label_values(&[server]).dec();
        self.requests_completed
            .with_label_values(&[server, outcome.as_label()])
            .inc();
        self.request_duration
            .with_label_values(&[server])
            .observe(duration_ms as f64 / 1000.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family<'a>(families: &'a [MetricFamily], name: &str) -> &'a MetricFamily {
        families
            .iter()
            .find(|f| f.name() == name)
            .unwrap_or_else(|| panic!("metric {name} not found"))
    }

    #[test]
    fn can_create_prometheus_metrics() {
        let _metrics = PrometheusMetrics::new().expect("failed to create metrics");
    }

    #[test]
    fn in_flight_goes_up_and_down() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_request_started("limit");
        metrics.record_request_started("limit");
        metrics.record_request_completed("limit", RequestOutcome::Success, 20);

        let in_flight = metrics.requests_in_flight.with_label_values(&["limit"]);
        assert_eq!(in_flight.get(), 1);

        let started = metrics.requests_started.with_label_values(&["limit"]);
        assert_eq!(started.get(), 2.0);

        let families = metrics.gather();
        family(&families, "imgserve_requests_in_flight");
    }

    #[test]
    fn completed_is_split_by_outcome() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_request_completed("limit", RequestOutcome::Success, 10);
        metrics.record_request_completed("limit", RequestOutcome::Failure, 10);
        metrics.record_request_completed("limit", RequestOutcome::Canceled, 10);

        let families = metrics.gather();
        assert_eq!(
            family(&families, "imgserve_requests_completed_total")
                .get_metric()
                .len(),
            3
        );
        assert_eq!(
            family(&families, "imgserve_request_duration_seconds")
                .get_metric()
                .len(),
            1
        );
    }

    #[test]
    fn admission_wait_is_observed_per_server() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_admission_wait("thumbs", 0);
        metrics.record_admission_wait("originals", 250);

        let families = metrics.gather();
        let wait = family(&families, "imgserve_admission_wait_seconds");
        assert_eq!(wait.get_metric().len(), 2);
    }

    #[test]
    fn can_use_custom_registry() {
        let registry = Arc::new(Registry::new());
        let metrics = PrometheusMetrics::new_with_registry(registry.clone()).unwrap();

        metrics.record_request_started("limit");
        assert!(!registry.gather().is_empty());
    }
}
