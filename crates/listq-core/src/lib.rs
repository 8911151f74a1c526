//! List query controller: paginated, filterable, searchable collections
//! fetched from a remote source with stale-response suppression.
pub mod error;
pub use error::CoreError;

pub mod config;
pub use config::ControllerConfig;

pub mod debounce;
pub use debounce::DebounceGate;

pub mod metrics;
pub use metrics::{MetricsBackend, MetricsHandle, NoOpMetrics, OutcomeKind};

pub mod normalize;
pub use normalize::normalize;

pub mod reconcile;

pub mod sequencer;
pub use sequencer::{FetchRequest, FetchSequencer};

pub mod source;
pub use source::ListSource;

pub mod state;
pub use state::QueryStore;

mod controller;
pub use controller::{Dispatch, FetchHandle, FetchOutcome, ListQuery, ListQueryBuilder};
