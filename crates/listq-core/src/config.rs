use listq_model::{DEFAULT_PAGE_SIZE, Filters, MAX_PAGE_SIZE};

use crate::error::CoreError;

pub const DEFAULT_SEARCH_KEY: &str = "search";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Label used in logs and metrics.
    pub name: String,
    /// Filters restored by `reset_filters` and used on construction.
    pub default_filters: Filters,
    pub page_size: usize,
    /// The free-text filter key; only changes to it are debounced.
    pub search_key: String,
    /// Quiet period for the search key. `0` disables debouncing.
    pub debounce_ms: u64,
    /// Per-fetch deadline. `None` waits for the source indefinitely.
    pub timeout_ms: Option<u64>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            name: "list".to_string(),
            default_filters: Filters::new(),
            page_size: DEFAULT_PAGE_SIZE,
            search_key: DEFAULT_SEARCH_KEY.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            timeout_ms: None,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(CoreError::InvalidConfig(format!(
                "page_size must be within 1..={MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        if self.search_key.trim().is_empty() {
            return Err(CoreError::InvalidConfig("search_key cannot be empty".into()));
        }
        if self.timeout_ms == Some(0) {
            return Err(CoreError::InvalidConfig("timeout_ms cannot be zero".into()));
        }
        Ok(())
    }
}
