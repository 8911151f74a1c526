use crate::{Filters, PageRequest, Pagination, QueryStatus, SequenceId};

/// Snapshot of a list query as seen by presentation code.
///
/// `items` and `pagination` always come from the same fetch, recorded in
/// `sequence_id`. `filters` and the page fields of `pagination` may already
/// describe a newer request while it is loading.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    /// Normalized filters of the most recently issued fetch.
    pub filters: Filters,
    pub pagination: Pagination,
    pub items: Vec<T>,
    pub status: QueryStatus,
    /// Set only while `status` is [`QueryStatus::Error`].
    pub error_message: Option<String>,
    /// Fetch that produced `items` (0 until the first success).
    pub sequence_id: SequenceId,
}

impl<T> QueryState<T> {
    pub fn new(filters: Filters, page: PageRequest) -> Self {
        Self {
            filters,
            pagination: Pagination::empty(page),
            items: Vec::new(),
            status: QueryStatus::Idle,
            error_message: None,
            sequence_id: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn is_error(&self) -> bool {
        self.status.is_error()
    }
}
