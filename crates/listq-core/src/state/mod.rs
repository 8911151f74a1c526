use tokio::sync::watch;

use listq_model::{
    FetchError, Filters, ListPage, PageRequest, Pagination, QueryState, QueryStatus, SequenceId,
};

use crate::reconcile::{reconcile, replace_if_changed};

/// Single source of truth for one list query.
///
/// Every write goes through one `watch` send, so readers always see a whole
/// [`QueryState`] and never half of an update.
pub struct QueryStore<T> {
    tx: watch::Sender<QueryState<T>>,
}

impl<T> QueryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an idle store.
    pub fn new(filters: Filters, page: PageRequest) -> Self {
        let (tx, _rx) = watch::channel(QueryState::new(filters, page));
        Self { tx }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> QueryState<T> {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.tx.subscribe()
    }

    pub fn filters(&self) -> Filters {
        self.tx.borrow().filters.clone()
    }

    pub fn pagination(&self) -> Pagination {
        self.tx.borrow().pagination
    }

    pub fn status(&self) -> QueryStatus {
        self.tx.borrow().status
    }

    /// Enter `loading` for a newly issued fetch.
    ///
    /// Filters and the requested page become visible immediately; items and
    /// totals from the last success stay untouched until the response lands.
    /// Subscribers are only notified when one of those fields actually changes.
    pub fn begin(&self, filters: &Filters, page: PageRequest) {
        self.tx.send_if_modified(|state| {
            let mut pagination = state.pagination;
            pagination.page_index = page.index;
            pagination.page_size = page.size;
            let mut modified = replace_if_changed(&mut state.pagination, pagination);

            if state.filters != *filters {
                state.filters = filters.clone();
                modified = true;
            }
            if state.status != QueryStatus::Loading {
                state.status = QueryStatus::Loading;
                modified = true;
            }
            modified | state.error_message.take().is_some()
        });
    }

    /// Apply a successful response of fetch `seq`.
    ///
    /// Items and pagination are replaced together in a single send. This
    /// always notifies, since the items are replaced wholesale.
    pub fn apply_success(&self, seq: SequenceId, requested: PageRequest, page: ListPage<T>) {
        let pagination = reconcile(requested, page.pagination.as_ref(), page.items.len());
        self.tx.send_modify(move |state| {
            state.pagination = pagination;
            state.items = page.items;
            state.status = QueryStatus::Success;
            state.error_message = None;
            state.sequence_id = seq;
        });
    }

    /// Record a failed fetch. Items from the last success are kept.
    pub fn apply_failure(&self, error: &FetchError) {
        let message = error.user_message();
        self.tx.send_modify(move |state| {
            state.status = QueryStatus::Error;
            state.error_message = Some(message);
        });
    }
}
