use crate::catalog_actor::CatalogError;
use crate::clients::actor_client::ActorClient;
use crate::engine::Catalog;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::CatalogProduct;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<CatalogProduct>,
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<CatalogProduct>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<CatalogProduct> for CatalogClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<CatalogProduct> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(sku) => CatalogError::NotFound(sku),
            FrameworkError::EntityError(msg) => CatalogError::Rejected(msg),
            other => CatalogError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn exists(&self, sku: &str) -> Result<bool, CatalogError> {
        self.contains(sku.to_string()).await
    }

    #[instrument(skip(self))]
    async fn get(&self, sku: &str) -> Result<CatalogProduct, CatalogError> {
        self.fetch(sku.to_string())
            .await?
            .ok_or_else(|| CatalogError::NotFound(sku.to_string()))
    }

    #[instrument(skip(self, product), fields(sku = %product.sku))]
    async fn save(&self, product: CatalogProduct) -> Result<(), CatalogError> {
        debug!(?product, "save called");
        self.store(product).await.map(|_| ())
    }
}
