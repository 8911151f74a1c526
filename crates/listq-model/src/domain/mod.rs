mod filters;
pub use filters::{DateBound, DateRange, FilterValue, Filters};

mod filter_spec;
pub use filter_spec::{FilterKind, FilterOption, FilterSpec};

mod pagination;
pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, Pagination};

mod list_request;
pub use list_request::{ListPage, ListRequest};

mod query_status;
pub use query_status::QueryStatus;

mod query_state;
pub use query_state::QueryState;

/// Monotonically increasing identifier of an issued fetch.
///
/// `0` is reserved for "no fetch has produced the visible data yet".
pub type SequenceId = u64;
