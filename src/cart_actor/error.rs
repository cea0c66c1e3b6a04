//! Error types for the Cart actor.

use thiserror::Error;

/// Errors surfaced by cart operations.
///
/// The cart rules themselves never fail; what callers can see is a missing cart or a
/// store that has shut down.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// No cart is stored under this id.
    #[error("Cart not found: {0}")]
    NotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
