use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard store operations.
///
/// Implementors only say how to reach the generic [`ResourceClient`] and how
/// framework failures translate into their own error type; `fetch`,
/// `contains` and `store` come for free.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by key.
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, key: T::Key) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(key).await.map_err(Self::map_error)
    }

    /// Check whether an entity is stored under `key`.
    #[tracing::instrument(skip(self))]
    async fn contains(&self, key: T::Key) -> Result<bool, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().exists(key).await.map_err(Self::map_error)
    }

    /// Insert or replace an entity.
    #[tracing::instrument(skip(self, entity))]
    async fn store(&self, entity: T) -> Result<T::Key, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().save(entity).await.map_err(Self::map_error)
    }
}
