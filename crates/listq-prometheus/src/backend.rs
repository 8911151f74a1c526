use std::time::Duration;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
    proto::MetricFamily,
};

use listq_core::{MetricsBackend, OutcomeKind};

/// Fetch latencies are dominated by network round trips.
const DURATION_BUCKETS: &[f64] = &[0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

/// Prometheus-backed [`MetricsBackend`]. Clones share the same collectors.
#[derive(Clone)]
pub struct PrometheusMetrics {
    registry: Registry,
    issued: IntCounterVec,
    completed: IntCounterVec,
    duration: HistogramVec,
    debounced: IntCounterVec,
}

impl PrometheusMetrics {
    /// Backend with its own registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::with_registry(Registry::new())
    }

    /// Backend registering its collectors into `registry`.
    pub fn with_registry(registry: Registry) -> Result<Self, prometheus::Error> {
        let issued = IntCounterVec::new(
            Opts::new("listq_fetches_issued_total", "Fetches issued by list controllers"),
            &["controller"],
        )?;
        let completed = IntCounterVec::new(
            Opts::new(
                "listq_fetches_completed_total",
                "Fetches resolved, by outcome (applied, failed, superseded)",
            ),
            &["controller", "outcome"],
        )?;
        let duration = HistogramVec::new(
            HistogramOpts::new(
                "listq_fetch_duration_seconds",
                "Time from issuing a fetch to its resolution",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["controller"],
        )?;
        let debounced = IntCounterVec::new(
            Opts::new(
                "listq_search_debounced_total",
                "Search changes deferred by the debounce window",
            ),
            &["controller"],
        )?;

        registry.register(Box::new(issued.clone()))?;
        registry.register(Box::new(completed.clone()))?;
        registry.register(Box::new(duration.clone()))?;
        registry.register(Box::new(debounced.clone()))?;

        Ok(Self {
            registry,
            issued,
            completed,
            duration,
            debounced,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Current values in the Prometheus text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_issued(&self, controller: &str) {
        self.issued.with_label_values(&[controller]).inc();
    }

    fn record_outcome(&self, controller: &str, outcome: OutcomeKind, elapsed: Duration) {
        self.completed
            .with_label_values(&[controller, outcome.as_str()])
            .inc();
        self.duration
            .with_label_values(&[controller])
            .observe(elapsed.as_secs_f64());
    }

    fn record_debounced(&self, controller: &str) {
        self.debounced.with_label_values(&[controller]).inc();
    }
}
