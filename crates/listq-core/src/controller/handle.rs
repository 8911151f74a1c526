use tokio::task::JoinHandle;
use tracing::warn;

use listq_model::{FetchError, SequenceId};

use crate::metrics::OutcomeKind;

/// What happened to one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was current and is now in the store.
    Applied,
    /// The fetch was current and failed; the store is in `error`.
    Failed(FetchError),
    /// A newer fetch (or teardown) made this one irrelevant; nothing was written.
    Superseded,
}

impl FetchOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            FetchOutcome::Applied => OutcomeKind::Applied,
            FetchOutcome::Failed(_) => OutcomeKind::Failed,
            FetchOutcome::Superseded => OutcomeKind::Superseded,
        }
    }
}

/// Pending fetch started by a controller operation.
///
/// Dropping the handle does not stop the fetch.
#[derive(Debug)]
pub struct FetchHandle {
    seq: SequenceId,
    join: JoinHandle<FetchOutcome>,
}

impl FetchHandle {
    pub(crate) fn new(seq: SequenceId, join: JoinHandle<FetchOutcome>) -> Self {
        Self { seq, join }
    }

    pub fn seq(&self) -> SequenceId {
        self.seq
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Waits for the fetch to resolve.
    pub async fn wait(self) -> FetchOutcome {
        match self.join.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(seq = self.seq, error = %e, "fetch task did not complete");
                FetchOutcome::Superseded
            }
        }
    }
}

/// Result of a mutating controller operation.
#[derive(Debug)]
pub enum Dispatch {
    /// A fetch was issued immediately.
    Issued(FetchHandle),
    /// A search change is waiting out the debounce interval.
    Debounced,
    /// Nothing changed; no fetch was issued.
    Unchanged,
    /// The controller has been shut down.
    Closed,
}

impl Dispatch {
    pub fn is_issued(&self) -> bool {
        matches!(self, Dispatch::Issued(_))
    }

    pub fn handle(self) -> Option<FetchHandle> {
        match self {
            Dispatch::Issued(h) => Some(h),
            _ => None,
        }
    }

    /// Waits for the issued fetch, if there is one.
    pub async fn wait(self) -> Option<FetchOutcome> {
        match self {
            Dispatch::Issued(h) => Some(h.wait().await),
            _ => None,
        }
    }
}
