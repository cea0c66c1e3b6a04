//! Error types for the Order actor.

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// An order needs at least one line.
    #[error("Order has no items")]
    EmptyOrder,

    /// A required delivery field was blank.
    #[error("Missing customer detail: {0}")]
    MissingCustomerDetail(&'static str),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
