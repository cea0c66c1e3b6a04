//! # Order Actor
//!
//! The in-memory order book. Orders are validated on the way in (at least one line, name,
//! phone and address filled in) and stored in the order they were placed. The simulated
//! [`ActorOrderPersistence`](crate::services::ActorOrderPersistence) sits in front of it.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Order;
use storefront_actor::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
