use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::RemoteError;

/// Where and how to reach one list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoteConfig {
    /// Base URL, e.g. `https://api.example.com`.
    pub endpoint: String,
    /// Path of the list endpoint, appended to `endpoint`.
    pub path: String,
    /// Key of the items array inside the response's `data` object.
    pub items_key: String,
    /// Extra headers sent with every request (auth tokens and the like).
    pub headers: HashMap<String, String>,
    /// Request timeout. `None` leaves it to the controller.
    pub timeout_ms: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080".to_string(),
            path: "/".to_string(),
            items_key: "items".to_string(),
            headers: HashMap::new(),
            timeout_ms: Some(15_000),
        }
    }
}

impl RemoteConfig {
    pub fn new(endpoint: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_items_key(mut self, key: impl Into<String>) -> Self {
        self.items_key = key.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Full URL of the list endpoint without query parameters.
    pub fn url(&self) -> Result<reqwest::Url, RemoteError> {
        let raw = format!("{}{}", self.endpoint.trim_end_matches('/'), self.path);
        let url = reqwest::Url::parse(&raw).map_err(|e| RemoteError::InvalidEndpoint {
            endpoint: raw.clone(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(RemoteError::InvalidEndpoint {
                endpoint: raw,
                reason: format!("unsupported scheme {other:?}"),
            }),
        }
    }

    pub fn validate(&self) -> Result<(), RemoteError> {
        if !self.path.is_empty() && !self.path.starts_with('/') {
            return Err(RemoteError::InvalidConfig(format!(
                "path must start with '/', got {:?}",
                self.path
            )));
        }
        if self.items_key.trim().is_empty() {
            return Err(RemoteError::InvalidConfig("items_key must not be empty".into()));
        }
        if self.timeout_ms == Some(0) {
            return Err(RemoteError::InvalidConfig("timeout_ms must be positive".into()));
        }
        self.url().map(|_| ())
    }
}
