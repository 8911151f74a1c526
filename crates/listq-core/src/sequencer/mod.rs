use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::trace;

use listq_model::{Filters, ListRequest, PageRequest, SequenceId};

/// One issued fetch.
///
/// Owned by the task performing the fetch; superseding it cancels its token.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    seq: SequenceId,
    filters: Filters,
    page: PageRequest,
    token: CancellationToken,
}

impl FetchRequest {
    pub fn seq(&self) -> SequenceId {
        self.seq
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once this request has been superseded or cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    pub fn to_list_request(&self) -> ListRequest {
        ListRequest::new(self.page)
            .with_seq(self.seq)
            .with_filters(self.filters.clone())
    }
}

/// Totally orders fetches by sequence id and lets only the latest one write.
///
/// At most one request is outstanding: issuing a new one cancels the previous.
/// The id check and the caller's state write in [`settle`](Self::settle) run
/// under one lock, so a superseding [`issue`](Self::issue) can never interleave
/// between them.
pub struct FetchSequencer {
    inner: Mutex<SequencerInner>,
}

#[derive(Default)]
struct SequencerInner {
    last_id: SequenceId,
    outstanding: Option<CancellationToken>,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SequencerInner::default()),
        }
    }

    /// Allocates the next id, cancels the outstanding request and runs `begin`
    /// for the new one before any later `issue` or `settle` can observe it.
    pub fn issue<F>(&self, filters: Filters, page: PageRequest, begin: F) -> FetchRequest
    where
        F: FnOnce(&FetchRequest),
    {
        let mut inner = self.lock();
        inner.last_id += 1;

        let token = CancellationToken::new();
        if let Some(prev) = inner.outstanding.replace(token.clone()) {
            prev.cancel();
            trace!(superseded_by = inner.last_id, "outstanding fetch cancelled");
        }

        let request = FetchRequest {
            seq: inner.last_id,
            filters,
            page,
            token,
        };
        begin(&request);
        request
    }

    /// Returns `true` if `request` is the latest issued and was not cancelled.
    pub fn is_current(&self, request: &FetchRequest) -> bool {
        let inner = self.lock();
        request.seq == inner.last_id && !request.is_cancelled()
    }

    /// Runs `apply` if `request` is still current, marking it resolved.
    ///
    /// Returns `None` for a superseded or cancelled request; `apply` is not run.
    pub fn settle<R, F>(&self, request: &FetchRequest, apply: F) -> Option<R>
    where
        F: FnOnce() -> R,
    {
        let mut inner = self.lock();
        if request.seq != inner.last_id || request.is_cancelled() {
            trace!(seq = request.seq, latest = inner.last_id, "stale response discarded");
            return None;
        }
        inner.outstanding = None;
        Some(apply())
    }

    /// Cancels the outstanding request, if any. Its response will be discarded.
    pub fn cancel_all(&self) -> bool {
        match self.lock().outstanding.take() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Id of the most recently issued request (0 if none).
    pub fn latest_id(&self) -> SequenceId {
        self.lock().last_id
    }

    /// Returns `true` while the latest request has neither settled nor been cancelled.
    pub fn has_outstanding(&self) -> bool {
        self.lock().outstanding.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, SequencerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for FetchSequencer {
    fn default() -> Self {
        Self::new()
    }
}
