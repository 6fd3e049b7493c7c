//! Read seam between the list controller and the backend.

use super::client::ApiClient;
use super::query::ListQuery;
use crate::domain::error::Result;
use crate::domain::{ListEntity, Page};
use futures_util::future::BoxFuture;

/// Paginated read of one entity type.
///
/// The controller only depends on this trait, so tests can substitute an
/// in-memory source whose responses resolve in any order.
pub trait ListSource<E: ListEntity>: Send + Sync + 'static {
    /// Fetches the page described by `query`.
    ///
    /// The returned future owns everything it needs; it may outlive the
    /// borrow of `self` and be polled on another task.
    fn fetch_page(&self, query: ListQuery) -> BoxFuture<'static, Result<Page<E>>>;
}

impl<E: ListEntity> ListSource<E> for ApiClient {
    fn fetch_page(&self, query: ListQuery) -> BoxFuture<'static, Result<Page<E>>> {
        let client = self.clone();
        Box::pin(async move { client.list::<E>(&query).await })
    }
}
