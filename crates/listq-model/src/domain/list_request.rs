use super::{Filters, PageRequest, SequenceId};
use crate::ServerPagination;

/// Query sent to a list source: one page plus the normalized filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub seq: SequenceId,
    pub page: PageRequest,
    pub filters: Filters,
}

/// One page of records as returned by a list source.
#[derive(Debug, Clone)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub pagination: Option<ServerPagination>,
}

impl ListRequest {
    pub fn new(page: PageRequest) -> Self {
        Self {
            seq: 0,
            page,
            filters: Filters::new(),
        }
    }

    pub fn with_seq(mut self, seq: SequenceId) -> Self {
        self.seq = seq;
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Query parameters in wire order: `page`, `limit`, then filters by key.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.index.to_string()),
            ("limit".to_string(), self.page.size.to_string()),
        ];
        pairs.extend(self.filters.to_query_pairs());
        pairs
    }
}

impl<T> ListPage<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            pagination: None,
        }
    }

    pub fn with_pagination(mut self, pagination: ServerPagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}
