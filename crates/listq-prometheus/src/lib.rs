//! Prometheus metrics backend for list query controllers.
//!
//! [`PrometheusMetrics`] implements [`listq_core::MetricsBackend`] and is
//! injected through [`listq_core::ListQueryBuilder::with_metrics`].
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use listq_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let handle: listq_core::MetricsHandle = Arc::new(metrics.clone());
//! # let _ = handle;
//!
//! // Render for a /metrics endpoint.
//! let text = metrics.render()?;
//! # let _ = text;
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `listq_fetches_issued_total{controller}` - Counter
//! - `listq_fetches_completed_total{controller, outcome}` - Counter
//! - `listq_fetch_duration_seconds{controller}` - Histogram
//! - `listq_search_debounced_total{controller}` - Counter
//!
//! No HTTP server is included; serve [`PrometheusMetrics::render`] from the
//! application's own router.

mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
