use std::sync::Arc;

use async_trait::async_trait;

use listq_model::{FetchError, ListPage, ListRequest};

/// Remote collection a [`ListQuery`](crate::ListQuery) pages through.
///
/// One implementation per resource; the controller is generic over it.
#[async_trait]
pub trait ListSource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;

    /// Fetch one page. Business rejections must come back as
    /// [`FetchError::Rejected`], never as an empty success.
    async fn fetch(&self, request: &ListRequest) -> Result<ListPage<Self::Item>, FetchError>;
}

#[async_trait]
impl<S: ListSource> ListSource for Arc<S> {
    type Item = S::Item;

    async fn fetch(&self, request: &ListRequest) -> Result<ListPage<Self::Item>, FetchError> {
        (**self).fetch(request).await
    }
}
