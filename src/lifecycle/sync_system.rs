use crate::catalog_actor::CatalogError;
use crate::clients::{CatalogClient, InventoryClient};
use crate::config::SyncConfig;
use crate::engine::{Catalog, Inventory, Orchestrator};
use crate::feed::Seed;
use crate::inventory_actor::InventoryError;
use thiserror::Error;
use tracing::{error, info};

/// Errors raised while seeding or stopping a [`SyncSystem`].
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Seeding catalog failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Seeding inventory failed: {0}")]
    Inventory(#[from] InventoryError),

    #[error("Actor task failed: {0}")]
    ActorTask(String),
}

/// Runtime for the in-memory catalog and inventory collaborators.
///
/// `SyncSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping both actors
/// - **Dependency Wiring**: Handing their clients to each [`Orchestrator`] it builds
///
/// # Example
///
/// ```ignore
/// let system = SyncSystem::new();
/// system.seed(seed).await?;
///
/// let summary = {
///     let orchestrator = system.orchestrator(&SyncConfig::default());
///     orchestrator.run(&records, &TracingSink).await
/// };
///
/// // Orchestrators hold client clones; drop them before shutting down.
/// system.shutdown().await?;
/// ```
pub struct SyncSystem {
    /// Client for interacting with the Catalog actor
    pub catalog_client: CatalogClient,

    /// Client for interacting with the Inventory actor
    pub inventory_client: InventoryClient,

    /// Task handles for both actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl SyncSystem {
    /// Spawns the catalog and inventory actors, each in its own Tokio task.
    pub fn new() -> Self {
        let (catalog_actor, catalog_client) = crate::catalog_actor::new();
        let (inventory_actor, inventory_client) = crate::inventory_actor::new();

        let catalog_handle = tokio::spawn(catalog_actor.run());
        let inventory_handle = tokio::spawn(inventory_actor.run());

        Self {
            catalog_client,
            inventory_client,
            handles: vec![catalog_handle, inventory_handle],
        }
    }

    /// Loads a snapshot of existing products and stock.
    pub async fn seed(&self, seed: Seed) -> Result<(), SystemError> {
        info!(
            products = seed.products.len(),
            inventory = seed.inventory.len(),
            "Seeding collaborators"
        );
        for product in seed.products {
            self.catalog_client.save(product).await?;
        }
        if !seed.inventory.is_empty() {
            self.inventory_client.save_batch(seed.inventory).await?;
        }
        Ok(())
    }

    /// Builds an orchestrator wired to this system's collaborators.
    pub fn orchestrator(&self, config: &SyncConfig) -> Orchestrator<CatalogClient, InventoryClient> {
        Orchestrator::new(
            self.catalog_client.clone(),
            self.inventory_client.clone(),
            config,
        )
    }

    /// Gracefully shuts down both actors.
    ///
    /// Dropping the clients closes the channels; each actor then drains and
    /// exits its loop. Any orchestrator built by [`SyncSystem::orchestrator`]
    /// must be dropped first, or this waits forever.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        drop(self.catalog_client);
        drop(self.inventory_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::ActorTask(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for SyncSystem {
    fn default() -> Self {
        Self::new()
    }
}
