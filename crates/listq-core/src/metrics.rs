use std::sync::Arc;
use std::time::Duration;

/// How a fetch ended, from the controller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Applied,
    Failed,
    Superseded,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Applied => "applied",
            OutcomeKind::Failed => "failed",
            OutcomeKind::Superseded => "superseded",
        }
    }
}

/// Sink for controller metrics. Implementations must be cheap and non-blocking.
pub trait MetricsBackend: Send + Sync {
    fn record_issued(&self, controller: &str);
    fn record_outcome(&self, controller: &str, outcome: OutcomeKind, elapsed: Duration);
    fn record_debounced(&self, controller: &str);
}

pub type MetricsHandle = Arc<dyn MetricsBackend>;

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    fn record_issued(&self, _controller: &str) {}
    fn record_outcome(&self, _controller: &str, _outcome: OutcomeKind, _elapsed: Duration) {}
    fn record_debounced(&self, _controller: &str) {}
}

pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
