//! # Generic Actor Server
//!
//! [`ResourceActor`] owns the resources of one entity type and processes requests one at
//! a time, so the stored state needs no locks.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The server half of a store.
///
/// Holds the receiver end of the request channel and a map from id to resource. Each
/// actor runs in its own Tokio task and handles one message at a time; clients that send
/// concurrently are simply queued.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new(capacity)` returns the actor and its client.
/// 2. **Wire**: pass the entity's collaborators to `actor.run(context)`.
/// 3. **Run**: spawn the returned future.
///
/// ```rust
/// use storefront_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Wishlist { id: u32, skus: Vec<String> }
/// #[derive(Debug)] struct WishlistCreate;
/// #[derive(Debug)] struct WishlistUpdate;
/// #[derive(Debug)] enum WishlistAction { Add(String) }
/// #[derive(Debug, thiserror::Error)] #[error("wishlist error")] struct WishlistError;
///
/// #[async_trait]
/// impl ActorEntity for Wishlist {
///     type Id = u32;
///     type Create = WishlistCreate;
///     type Update = WishlistUpdate;
///     type Action = WishlistAction;
///     type ActionResult = usize;
///     type Context = ();
///     type Error = WishlistError;
///
///     fn from_create_params(id: u32, _: WishlistCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, skus: Vec::new() })
///     }
///     async fn on_update(&mut self, _: WishlistUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, action: WishlistAction, _: &()) -> Result<usize, Self::Error> {
///         match action {
///             WishlistAction::Add(sku) => { self.skus.push(sku); Ok(self.skus.len()) }
///         }
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Wishlist>::new(8);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(WishlistCreate).await.unwrap();
///     let len = client.perform_action(id, WishlistAction::Add("sku-1".into())).await.unwrap();
///     assert_eq!(len, 1);
/// }
/// ```
///
/// # Operations
///
/// * **Create**: allocate the next id, build with `from_create_params`, run `on_create`,
///   store, reply with the id.
/// * **Get**: reply with a clone of the resource, or `None`.
/// * **List**: reply with clones of every resource, in id order.
/// * **Update**: run `on_update` in place, reply with the updated clone.
/// * **Delete**: run `on_delete`, then remove.
/// * **Action**: run `handle_action` in place. On error the resource is restored to its
///   state before the action, so a failed action never leaves partial changes behind.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` is the capacity of the request channel; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// `context` is lent to each hook for the lifetime of the loop.
    pub async fn run(mut self, context: T::Context) {
        // Short type name ("Cart" rather than "storefront::model::cart::Cart")
        let entity_type = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    match item.on_update(update, &context).await {
                        Ok(()) => {
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(item.clone()));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let before = item.clone();
                    let result = match item.handle_action(action, &context).await {
                        Ok(value) => {
                            info!(entity_type, %id, "Action ok");
                            Ok(value)
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            *item = before;
                            Err(FrameworkError::EntityError(Box::new(e)))
                        }
                    };
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
