//! # ActorClient Trait
//!
//! Shared read operations for the typed store clients. A client wraps a
//! [`ResourceClient`], names its own error type, and gets `fetch` and `fetch_all` for free.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Common surface of the typed clients (`CartClient`, `AuthClient`, `OrderClient`).
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Order> for OrderClient {
///     type Error = OrderError;
///
///     fn inner(&self) -> &ResourceClient<Order> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> OrderError {
///         e.downcast_entity::<OrderError>()
///             .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string()))
///     }
/// }
///
/// // fetch() and fetch_all() now come with the trait
/// let order = order_client.fetch(order_id).await?;
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The store-specific error type.
    type Error: Send + Sync;

    /// The wrapped generic client.
    fn inner(&self) -> &ResourceClient<T>;

    /// Converts a framework error into the store's error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetches one resource by id.
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetches every stored resource, in creation order.
    #[tracing::instrument(skip(self))]
    async fn fetch_all(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }
}
