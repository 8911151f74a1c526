//! The list query façade presentation code talks to.
mod builder;
pub use builder::ListQueryBuilder;

mod handle;
pub use handle::{Dispatch, FetchHandle, FetchOutcome};


use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{Instrument, debug, debug_span, info, trace, warn};
use uuid::Uuid;

use listq_model::{
    FetchError, Filters, ListPage, ListRequest, PageRequest, Pagination, QueryState, QueryStatus,
};

use crate::config::ControllerConfig;
use crate::debounce::DebounceGate;
use crate::error::CoreError;
use crate::metrics::{MetricsHandle, noop_metrics};
use crate::normalize::normalize;
use crate::reconcile::filters_changed;
use crate::sequencer::{FetchRequest, FetchSequencer};
use crate::source::ListSource;
use crate::state::QueryStore;

/// Paginated, filterable view over one [`ListSource`].
///
/// Operations never fail and never block: each returns a [`Dispatch`] right
/// away and any fetch runs on a spawned tokio task. Only the most recently
/// issued fetch may write to the state; everything older is discarded.
///
/// Cloning is cheap and every clone drives the same state. Dropping the last
/// clone cancels the pending search and the outstanding fetch.
pub struct ListQuery<S: ListSource> {
    inner: Arc<Inner<S>>,
}

struct Inner<S: ListSource> {
    id: Uuid,
    config: ControllerConfig,
    source: Arc<S>,
    store: QueryStore<S::Item>,
    sequencer: FetchSequencer,
    debounce: DebounceGate,
    metrics: MetricsHandle,
    /// Raw filters including a search value still inside its debounce window.
    desired: Mutex<Filters>,
    closed: AtomicBool,
}

impl<S: ListSource> ListQuery<S> {
    /// Controller with `config` and no metrics.
    pub fn new(source: S, config: ControllerConfig) -> Result<Self, CoreError> {
        Self::from_parts(source, config, noop_metrics())
    }

    pub fn builder(source: S) -> ListQueryBuilder<S> {
        ListQueryBuilder::new(source)
    }

    pub(crate) fn from_parts(
        source: S,
        config: ControllerConfig,
        metrics: MetricsHandle,
    ) -> Result<Self, CoreError> {
        config.validate()?;

        let page = PageRequest::first(config.page_size);
        let store = QueryStore::new(normalize(&config.default_filters), page);
        let inner = Inner {
            id: Uuid::new_v4(),
            desired: Mutex::new(config.default_filters.clone()),
            source: Arc::new(source),
            sequencer: FetchSequencer::new(),
            debounce: DebounceGate::new(),
            closed: AtomicBool::new(false),
            metrics,
            config,
            store,
        };
        debug!(controller = %inner.config.name, id = %inner.id, "list query created");
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Merge `partial` into the current filters and fetch page 1.
    ///
    /// When the only key whose normalized value changed is the search key the
    /// fetch is debounced. Anything else, including a merge that changes
    /// nothing, cancels a pending search and fetches page 1 right away with
    /// the search included, so `set_filters(Filters::new())` doubles as a retry.
    pub fn set_filters(&self, partial: Filters) -> Dispatch {
        if self.is_closed() {
            return Dispatch::Closed;
        }
        let search_key = self.inner.config.search_key.as_str();

        let (next, search_only) = {
            let mut desired = self.inner.desired();
            let prev = normalize(&desired);
            desired.merge(&partial);
            let next = normalize(&desired);
            let changed = prev.changed_keys(&next);
            let search_only = !changed.is_empty() && changed.iter().all(|k| *k == search_key);
            (next, search_only)
        };

        if search_only && self.inner.config.debounce_ms > 0 {
            self.schedule_search();
            return Dispatch::Debounced;
        }

        self.inner.debounce.cancel();
        self.issue(next, self.first_page())
    }

    /// Restore the configured default filters and fetch page 1.
    ///
    /// Always issues a fetch. The current page size is kept.
    pub fn reset_filters(&self) -> Dispatch {
        if self.is_closed() {
            return Dispatch::Closed;
        }
        self.inner.debounce.cancel();

        let defaults = self.inner.config.default_filters.clone();
        let normalized = normalize(&defaults);
        *self.inner.desired() = defaults;
        self.issue(normalized, self.first_page())
    }

    /// Move to page `index`, optionally changing the page size.
    ///
    /// Returns [`Dispatch::Unchanged`] when that page is already current. A
    /// search still waiting in its debounce window is applied first, which
    /// restarts pagination at page 1.
    pub fn set_page(&self, index: usize, size: Option<usize>) -> Dispatch {
        if self.is_closed() {
            return Dispatch::Closed;
        }
        let current = self.inner.store.pagination().request();
        let requested = PageRequest::new(index, size.unwrap_or(current.size));

        if let Some(filters) = self.flush_pending_search() {
            return self.issue(filters, PageRequest::first(requested.size));
        }
        if requested == current {
            trace!(controller = %self.inner.config.name, page = index, "page already current");
            return Dispatch::Unchanged;
        }
        self.issue(self.inner.store.filters(), requested)
    }

    /// Fetch the current filters and page again, unconditionally.
    ///
    /// Also the way to perform the first load of an idle controller.
    pub fn refresh(&self) -> Dispatch {
        if self.is_closed() {
            return Dispatch::Closed;
        }
        if let Some(filters) = self.flush_pending_search() {
            return self.issue(filters, self.first_page());
        }
        let page = self.inner.store.pagination().request();
        self.issue(self.inner.store.filters(), page)
    }

    /// Cancel the pending search and the outstanding fetch.
    ///
    /// Later operations return [`Dispatch::Closed`].
    pub fn shutdown(&self) {
        if self.inner.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let debounced = self.inner.debounce.cancel();
        let in_flight = self.inner.sequencer.cancel_all();
        info!(
            controller = %self.inner.config.name,
            debounced,
            in_flight,
            "list query shut down"
        );
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    /// Whole state as one consistent value.
    pub fn snapshot(&self) -> QueryState<S::Item> {
        self.inner.store.snapshot()
    }

    /// Change notifications carrying whole snapshots.
    pub fn subscribe(&self) -> watch::Receiver<QueryState<S::Item>> {
        self.inner.store.subscribe()
    }

    pub fn filters(&self) -> Filters {
        self.inner.store.filters()
    }

    pub fn pagination(&self) -> Pagination {
        self.inner.store.pagination()
    }

    pub fn items(&self) -> Vec<S::Item> {
        self.inner.store.snapshot().items
    }

    pub fn status(&self) -> QueryStatus {
        self.inner.store.status()
    }

    pub fn error_message(&self) -> Option<String> {
        self.inner.store.snapshot().error_message
    }

    pub fn is_loading(&self) -> bool {
        self.status().is_loading()
    }

    /// Returns `true` while a search change is waiting out its debounce window.
    pub fn has_pending_search(&self) -> bool {
        self.inner.debounce.is_pending()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn first_page(&self) -> PageRequest {
        PageRequest::first(self.inner.store.pagination().page_size)
    }

    fn schedule_search(&self) {
        let weak = Arc::downgrade(&self.inner);
        let delay = Duration::from_millis(self.inner.config.debounce_ms);

        self.inner.metrics.record_debounced(&self.inner.config.name);
        trace!(controller = %self.inner.config.name, delay_ms = self.inner.config.debounce_ms, "search debounced");

        self.inner.debounce.schedule((), delay, move |()| {
            if let Some(inner) = weak.upgrade() {
                ListQuery { inner }.settle_search();
            }
        });
    }

    /// Fetches the filters desired at the moment the search settles.
    ///
    /// A concurrent `set_filters` may already have fetched them after the
    /// timer fired, in which case they match the store and nothing is issued.
    fn settle_search(&self) {
        if self.is_closed() {
            return;
        }
        let filters = normalize(&self.inner.desired());
        if !filters_changed(&self.inner.store.filters(), &filters) {
            debug!(controller = %self.inner.config.name, "settled search matches current filters");
            return;
        }
        let _ = self.issue(filters, self.first_page());
    }

    /// Cancels a pending search and returns its filters if they differ from
    /// the ones currently applied.
    fn flush_pending_search(&self) -> Option<Filters> {
        if !self.inner.debounce.cancel() {
            return None;
        }
        let pending = normalize(&self.inner.desired());
        filters_changed(&self.inner.store.filters(), &pending).then_some(pending)
    }

    fn issue(&self, filters: Filters, page: PageRequest) -> Dispatch {
        let inner = &self.inner;
        let request = inner
            .sequencer
            .issue(filters, page, |req| inner.store.begin(req.filters(), req.page()));
        let seq = request.seq();

        inner.metrics.record_issued(&inner.config.name);
        debug!(
            controller = %inner.config.name,
            seq,
            page = page.index,
            limit = page.size,
            filters = request.filters().len(),
            "fetch issued"
        );

        let span = debug_span!("fetch", controller = %inner.config.name, id = %inner.id, seq);
        let task = run_fetch(
            Arc::downgrade(inner),
            Arc::clone(&inner.source),
            Arc::clone(&inner.metrics),
            inner.config.name.clone(),
            inner.config.timeout_ms,
            request,
        );
        let join = tokio::spawn(task.instrument(span));
        Dispatch::Issued(FetchHandle::new(seq, join))
    }
}

impl<S: ListSource> Clone for ListQuery<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ListSource> Inner<S> {
    fn desired(&self) -> MutexGuard<'_, Filters> {
        self.desired.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: ListSource> Drop for Inner<S> {
    fn drop(&mut self) {
        self.sequencer.cancel_all();
    }
}

async fn run_fetch<S: ListSource>(
    inner: Weak<Inner<S>>,
    source: Arc<S>,
    metrics: MetricsHandle,
    name: String,
    timeout_ms: Option<u64>,
    request: FetchRequest,
) -> FetchOutcome {
    let started = Instant::now();
    let list_request = request.to_list_request();

    let fetch = AssertUnwindSafe(fetch_with_deadline(source.as_ref(), &list_request, timeout_ms));
    let response = tokio::select! {
        biased;
        _ = request.cancelled() => None,
        result = fetch.catch_unwind() => Some(result.unwrap_or_else(|_| {
            warn!("list source panicked");
            Err(FetchError::Transport("list source panicked".to_string()))
        })),
    };

    let outcome = match (response, inner.upgrade()) {
        (Some(result), Some(inner)) => settle(&inner, &request, result),
        _ => {
            trace!("fetch cancelled before its response arrived");
            FetchOutcome::Superseded
        }
    };
    metrics.record_outcome(&name, outcome.kind(), started.elapsed());
    outcome
}

async fn fetch_with_deadline<S: ListSource>(
    source: &S,
    request: &ListRequest,
    timeout_ms: Option<u64>,
) -> Result<ListPage<S::Item>, FetchError> {
    match timeout_ms {
        None => source.fetch(request).await,
        Some(ms) => tokio::time::timeout(Duration::from_millis(ms), source.fetch(request))
            .await
            .unwrap_or(Err(FetchError::Timeout { timeout_ms: ms })),
    }
}

fn settle<S: ListSource>(
    inner: &Inner<S>,
    request: &FetchRequest,
    result: Result<ListPage<S::Item>, FetchError>,
) -> FetchOutcome {
    let applied = inner.sequencer.settle(request, || match result {
        Ok(page) => {
            let count = page.items.len();
            inner.store.apply_success(request.seq(), request.page(), page);
            debug!(items = count, total = inner.store.pagination().total_items, "fetch applied");
            FetchOutcome::Applied
        }
        Err(e) => {
            warn!(error = %e, "fetch failed");
            inner.store.apply_failure(&e);
            FetchOutcome::Failed(e)
        }
    });
    applied.unwrap_or_else(|| {
        trace!("stale response dropped");
        FetchOutcome::Superseded
    })
}
