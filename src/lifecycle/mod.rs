//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the storefront's actors.
//!
//! ## Wiring
//!
//! Actors are created first and get their collaborators when they start running:
//!
//! ```rust,ignore
//! let (session_actor, sessions) = session_actor::new(capacity);
//! handles.push(tokio::spawn(session_actor.run(identity.clone())));
//! ```
//!
//! The cart and order actors need nothing (`Context = ()`); the session actor gets the
//! identity provider. The dependency graph has no cycles, so dropping the clients is
//! enough to stop everything.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients**, including the ones held by checkout, the admin view and the
//!    order persistence.
//! 2. **Actors see their channel close** and leave their loop, logging their final size.
//! 3. **Await every task.** A panicked actor is reported as
//!    [`StorefrontError::ActorTask`](crate::StorefrontError::ActorTask).
//!
//! Clones of the clients handed out to callers keep their actor alive; drop them before
//! calling [`Storefront::shutdown`].

pub mod storefront;

pub use storefront::*;
