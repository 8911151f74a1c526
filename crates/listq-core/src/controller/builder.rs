use std::sync::Arc;

use listq_model::Filters;

use crate::config::ControllerConfig;
use crate::error::CoreError;
use crate::metrics::{MetricsBackend, MetricsHandle, noop_metrics};
use crate::source::ListSource;

use super::ListQuery;

/// Step-by-step construction of a [`ListQuery`].
pub struct ListQueryBuilder<S> {
    source: S,
    config: ControllerConfig,
    metrics: MetricsHandle,
}

impl<S: ListSource> ListQueryBuilder<S> {
    pub(crate) fn new(source: S) -> Self {
        Self {
            source,
            config: ControllerConfig::default(),
            metrics: noop_metrics(),
        }
    }

    /// Replace the whole config. Later `with_*` calls still apply on top.
    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    pub fn with_default_filters(mut self, filters: Filters) -> Self {
        self.config.default_filters = filters;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size;
        self
    }

    pub fn with_search_key(mut self, key: impl Into<String>) -> Self {
        self.config.search_key = key.into();
        self
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.config.debounce_ms = debounce_ms;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsBackend>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn build(self) -> Result<ListQuery<S>, CoreError> {
        ListQuery::from_parts(self.source, self.config, self.metrics)
    }
}
