//! # Session Actor
//!
//! Holds the signed-in user of each browsing session. Sign-in and registration go through
//! the [`IdentityProvider`](crate::services::IdentityProvider) injected as the actor's
//! context, so the session only changes once the provider has answered.
//!
//! ```text
//! Anonymous --login / login_with_google / register--> Authenticated
//! Authenticated --logout--> Anonymous
//! ```
//!
//! A failed sign-in is rolled back by the actor, so the previous user (or none) stays.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::SessionCreate;
pub use error::*;

use crate::model::Session;
use storefront_actor::{ResourceActor, ResourceClient};

/// Creates a new Session actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Session>, ResourceClient<Session>) {
    ResourceActor::new(buffer_size)
}
