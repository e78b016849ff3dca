//! # Core Actor Framework
//!
//! This module defines the generic building blocks for the collaborator stores.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait that all stored resource types must implement.
//! - [`ResourceActor`]: The generic actor that owns a keyed store of entities.
//! - [`ResourceClient`]: The generic client for communicating with actors.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, NotFound).

use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (Trait with Hooks and Actions)
// =============================================================================

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Architecture Note
/// Catalog products and per-sku stock are both "things stored under a natural
/// key". By describing that once (`ActorEntity`), the `ResourceActor` loop is
/// written a single time and serves both the catalog and the inventory.
///
/// Unlike generated-id stores, entities here carry their own key (the sku), so
/// a `Save` is an upsert: the caller decides the identity, the actor decides
/// whether the new state is acceptable through [`ActorEntity::on_save`].
///
/// # Provided Methods (Hooks)
/// - [`ActorEntity::vacant`]: what to materialize when an action targets an unknown key.
/// - [`ActorEntity::on_save`]: validation before a save replaces the stored state.
#[async_trait]
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// The natural key of the entity (a sku for both stores in this crate).
    type Key: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Enum representing resource-specific operations (e.g., `Apply` stock writes).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The per-entity error type, rendered into [`FrameworkError::EntityError`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Key this entity is stored under.
    fn key(&self) -> Self::Key;

    /// Entity to materialize when an action targets a key the store has never seen.
    ///
    /// The default (`None`) makes such actions fail with [`FrameworkError::NotFound`].
    fn vacant(_key: &Self::Key) -> Option<Self> {
        None
    }

    /// Called before a save replaces (or inserts) the stored entity.
    /// `previous` is the currently stored state, if any.
    async fn on_save(&mut self, _previous: Option<&Self>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
    ) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(String),
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// # Resource-Oriented Architecture
/// Every store speaks the same small vocabulary:
///
/// - **Exists**: Presence check by key, without copying the entity.
/// - **Get (Read)**: Fetches the current state of the resource by key.
/// - **Save**: Insert-or-replace of a whole entity (its key comes from [`ActorEntity::key`]).
/// - **Action**: Extensibility. Executes a custom [`ActorEntity::Action`].
///
/// The enum is generic over `T: ActorEntity`, so a stock write can never be sent
/// to the catalog actor: the compiler rejects it.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Exists {
        key: T::Key,
        respond_to: Response<bool>,
    },
    Get {
        key: T::Key,
        respond_to: Response<Option<T>>,
    },
    Save {
        entity: T,
        respond_to: Response<T::Key>,
    },
    Action {
        key: T::Key,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that manages a keyed collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`) and
/// the receiver end of the channel.
///
/// **Concurrency Model**:
/// Each actor processes its messages *sequentially* in a loop, so concurrent
/// callers writing the same sku are serialized here. No `Mutex` is needed for
/// the `store`: the task owns it exclusively.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Key, T>,
}

impl<T: ActorEntity> ResourceActor<T> {
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "CatalogProduct" instead of the full path)
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Exists { key, respond_to } => {
                    let found = self.store.contains_key(&key);
                    debug!(entity_type, %key, found, "Exists");
                    let _ = respond_to.send(Ok(found));
                }
                ResourceRequest::Get { key, respond_to } => {
                    let item = self.store.get(&key).cloned();
                    debug!(entity_type, %key, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Save {
                    mut entity,
                    respond_to,
                } => {
                    let key = entity.key();
                    debug!(entity_type, %key, ?entity, "Save");
                    if let Err(e) = entity.on_save(self.store.get(&key)).await {
                        warn!(entity_type, %key, error = %e, "Save rejected");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(e.to_string())));
                        continue;
                    }
                    let replaced = self.store.insert(key.clone(), entity).is_some();
                    info!(entity_type, %key, replaced, size = self.store.len(), "Saved");
                    let _ = respond_to.send(Ok(key));
                }
                ResourceRequest::Action {
                    key,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %key, ?action, "Action");
                    let mut materialized = false;
                    let item = match self.store.entry(key.clone()) {
                        Entry::Occupied(slot) => slot.into_mut(),
                        Entry::Vacant(slot) => match T::vacant(slot.key()) {
                            Some(fresh) => {
                                materialized = true;
                                slot.insert(fresh)
                            }
                            None => {
                                warn!(entity_type, %key, "Not found");
                                let _ = respond_to
                                    .send(Err(FrameworkError::NotFound(key.to_string())));
                                continue;
                            }
                        },
                    };

                    let result = item
                        .handle_action(action)
                        .await
                        .map_err(|e| FrameworkError::EntityError(e.to_string()));
                    match &result {
                        Ok(_) => info!(entity_type, %key, materialized, "Action ok"),
                        Err(e) => {
                            warn!(entity_type, %key, error = %e, "Action failed");
                            if materialized {
                                self.store.remove(&key);
                            }
                        }
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a `ResourceActor`.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: a derive would require `T: Clone` bounds on the request types.
impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn exists(&self, key: T::Key) -> Result<bool, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Exists { key, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, key: T::Key) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { key, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn save(&self, entity: T) -> Result<T::Key, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Save { entity, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn perform_action(
        &self,
        key: T::Key,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Action {
                key,
                action,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        name: String,
        value: i64,
    }

    #[derive(Debug)]
    enum CounterAction {
        Add(i64),
    }

    #[derive(Debug, thiserror::Error)]
    enum CounterError {
        #[error("counter cannot go below zero ({0})")]
        Negative(i64),
    }

    #[async_trait]
    impl ActorEntity for Counter {
        type Key = String;
        type Action = CounterAction;
        type ActionResult = i64;
        type Error = CounterError;

        fn key(&self) -> String {
            self.name.clone()
        }

        fn vacant(key: &String) -> Option<Self> {
            key.starts_with("auto_").then(|| Counter {
                name: key.clone(),
                value: 0,
            })
        }

        async fn on_save(&mut self, _previous: Option<&Self>) -> Result<(), CounterError> {
            if self.value < 0 {
                return Err(CounterError::Negative(self.value));
            }
            Ok(())
        }

        async fn handle_action(&mut self, action: CounterAction) -> Result<i64, CounterError> {
            match action {
                CounterAction::Add(delta) => {
                    let next = self.value + delta;
                    if next < 0 {
                        return Err(CounterError::Negative(next));
                    }
                    self.value = next;
                    Ok(next)
                }
            }
        }
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_save_get_and_exists() {
        let (actor, client) = ResourceActor::<Counter>::new(10);
        let handle = tokio::spawn(actor.run());

        // 1. Save (insert)
        let key = client
            .save(Counter { name: "hits".into(), value: 3 })
            .await
            .unwrap();
        assert_eq!(key, "hits");
        assert!(client.exists("hits".into()).await.unwrap());
        assert!(!client.exists("misses".into()).await.unwrap());

        // 2. Save (replace)
        client
            .save(Counter { name: "hits".into(), value: 7 })
            .await
            .unwrap();
        let stored = client.get("hits".into()).await.unwrap().unwrap();
        assert_eq!(stored.value, 7);

        // 3. Rejected save keeps the previous state
        let rejected = client.save(Counter { name: "hits".into(), value: -1 }).await;
        assert!(matches!(rejected, Err(FrameworkError::EntityError(_))));
        assert_eq!(client.get("hits".into()).await.unwrap().unwrap().value, 7);

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_actions_and_vacant_materialization() {
        let (actor, client) = ResourceActor::<Counter>::new(10);
        tokio::spawn(actor.run());

        // Unknown key without a vacant entity
        let missing = client.perform_action("plain".into(), CounterAction::Add(1)).await;
        assert_eq!(missing, Err(FrameworkError::NotFound("plain".into())));

        // Unknown key materialized on first action
        let value = client
            .perform_action("auto_a".into(), CounterAction::Add(2))
            .await
            .unwrap();
        assert_eq!(value, 2);
        assert!(client.exists("auto_a".into()).await.unwrap());

        // A failing action on a freshly materialized key leaves nothing behind
        let failed = client.perform_action("auto_b".into(), CounterAction::Add(-5)).await;
        assert!(failed.is_err());
        assert!(!client.exists("auto_b".into()).await.unwrap());
    }
}
