use serde::{Deserialize, Serialize};

/// Lifecycle of a list query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryStatus {
    /// No fetch has been issued yet.
    #[default]
    Idle,
    /// A fetch is outstanding.
    Loading,
    /// The last authoritative fetch completed.
    Success,
    /// The last authoritative fetch failed.
    Error,
}

impl QueryStatus {
    /// Returns `true` once the last authoritative fetch has resolved either way.
    pub fn is_settled(&self) -> bool {
        matches!(self, QueryStatus::Success | QueryStatus::Error)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryStatus::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QueryStatus::Error)
    }
}
