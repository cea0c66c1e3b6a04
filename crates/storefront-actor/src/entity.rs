//! # ActorEntity Trait
//!
//! The contract every stored resource (a cart, a session, an order) implements so that
//! one generic [`ResourceActor`](crate::ResourceActor) can own it. Associated types pin
//! down the id, the create/update payloads, the resource-specific actions and the error
//! type, so a cart action can never be sent to the session store.
//!
//! Hooks with default bodies (`on_create`, `on_delete`) only need to be written when the
//! resource has something to validate or clean up.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A resource managed by a [`ResourceActor`](crate::ResourceActor).
///
/// # Async & Context
/// Hooks are `async` so an entity can call out to a collaborator while handling a message
/// (the session store awaits the identity provider inside `handle_action`). The `Context`
/// type carries those collaborators and is handed to [`ResourceActor::run`](crate::ResourceActor::run),
/// not to the constructor, so stores can be created before their dependencies exist.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier of a stored instance.
    ///
    /// Ids are allocated by the actor from a `u32` counter, and the store is ordered by id,
    /// so listing returns resources in creation order.
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload needed to create an instance.
    type Create: Send + Sync + Debug;

    /// Payload needed to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `AddItem` on a cart).
    type Action: Send + Sync + Debug;

    /// Result returned by [`ActorEntity::handle_action`].
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. `()` when there are none.
    type Context: Send + Sync;

    /// Error produced by the entity's own logic.
    ///
    /// The actor boxes it into [`FrameworkError::EntityError`](crate::FrameworkError::EntityError);
    /// typed clients get it back with [`FrameworkError::downcast_entity`](crate::FrameworkError::downcast_entity).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the entity from its freshly allocated id and the create payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Runs after construction, before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update payload.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before the entity is removed. Returning an error keeps it stored.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handles a resource-specific action.
    ///
    /// When this returns an error the entity must be left as it was before the call.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
