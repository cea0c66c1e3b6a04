//! # Storefront Actor
//!
//! Keyed resource stores on Tokio. Each store is an actor: a task that owns a map of
//! resources and handles one request at a time, reached through a cheap cloneable client.
//! The storefront uses it for the cart, the login session and the order book.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the resource and its rules (what "add to cart" does).
//! 2. **Runtime** ([`ResourceActor`]): the message loop, id allocation, logging.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed async calls.
//!
//! ## Why actors here
//!
//! Store mutations never overlap: requests to one store are queued and applied in order,
//! and an action that fails is rolled back before the next request runs. Stores don't
//! share state with each other, so nothing needs a lock.
//!
//! ## Context injection
//!
//! Collaborators are passed to [`ResourceActor::run`], not to the constructor:
//!
//! ```rust,ignore
//! let (session_actor, sessions) = ResourceActor::<Session>::new(32);
//! tokio::spawn(session_actor.run(identity_provider.clone()));
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of canned replies;
//! [`mock::create_mock_client`] hands the raw requests to the test.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
