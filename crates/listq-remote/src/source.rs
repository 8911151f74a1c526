use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use listq_core::ListSource;
use listq_model::{FetchError, ListEnvelope, ListPage, ListRequest, Resource};

use crate::config::RemoteConfig;
use crate::errors::RemoteError;

/// [`ListSource`] backed by a JSON list endpoint.
///
/// `T` is the record type found under `data.<items_key>` in the response.
pub struct HttpListSource<T> {
    client: reqwest::Client,
    url: reqwest::Url,
    config: RemoteConfig,
    _record: PhantomData<fn() -> T>,
}

impl<T> HttpListSource<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        config.validate()?;

        let mut builder = reqwest::Client::builder().default_headers(headers(&config)?);
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder.build()?;

        Ok(Self {
            url: config.url()?,
            client,
            config,
            _record: PhantomData,
        })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    fn request_url(&self, request: &ListRequest) -> reqwest::Url {
        let mut url = self.url.clone();
        url.query_pairs_mut().extend_pairs(request.query_pairs());
        url
    }

    fn map_send_error(&self, err: reqwest::Error) -> FetchError {
        match self.config.timeout_ms {
            Some(timeout_ms) if err.is_timeout() => FetchError::Timeout { timeout_ms },
            _ => RemoteError::Http(err).into(),
        }
    }
}

impl<T: Resource> HttpListSource<T> {
    /// Source for a known resource; the items key comes from the record type.
    pub fn for_resource(config: RemoteConfig) -> Result<Self, RemoteError> {
        Self::new(config.with_items_key(T::ITEMS_KEY))
    }
}

impl<T> fmt::Debug for HttpListSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpListSource")
            .field("url", &self.url.as_str())
            .field("items_key", &self.config.items_key)
            .finish()
    }
}

#[async_trait]
impl<T> ListSource for HttpListSource<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Item = T;

    async fn fetch(&self, request: &ListRequest) -> Result<ListPage<T>, FetchError> {
        let url = self.request_url(request);
        debug!(seq = request.seq, url = %url, "requesting list page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(seq = request.seq, status = status.as_u16(), "list endpoint returned error status");
            return Err(FetchError::Status {
                code: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.map_send_error(e))?;
        let envelope: ListEnvelope = serde_json::from_slice(&body)
            .map_err(|e| FetchError::Decode(format!("failed to parse response: {e}")))?;

        let page = envelope.into_page(&self.config.items_key)?;
        debug!(seq = request.seq, items = page.items.len(), "list page received");
        Ok(page)
    }
}

fn headers(config: &RemoteConfig) -> Result<HeaderMap, RemoteError> {
    let mut map = HeaderMap::with_capacity(config.headers.len());
    for (name, value) in &config.headers {
        let invalid = |reason: String| RemoteError::InvalidHeader {
            name: name.clone(),
            reason,
        };
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use listq_model::{Filters, LoginLog, PageRequest};

    #[test]
    fn request_url_carries_page_and_filters() {
        let source: HttpListSource<LoginLog> =
            HttpListSource::for_resource(RemoteConfig::new("http://localhost:3000", "/api/logs"))
                .unwrap();
        let request = ListRequest::new(PageRequest::new(2, 25))
            .with_filters(Filters::new().with("status", "failed").with("search", "a b"));

        let url = source.request_url(&request);
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/logs?page=2&limit=25&search=a+b&status=failed"
        );
        assert_eq!(source.config().items_key, "logs");
    }

    #[test]
    fn invalid_header_is_reported() {
        let cfg = RemoteConfig::default().with_header("bad header", "x");
        let err = HttpListSource::<LoginLog>::new(cfg).unwrap_err();
        assert!(matches!(err, RemoteError::InvalidHeader { .. }));
    }
}
