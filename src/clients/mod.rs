//! Typed wrappers around [`ResourceClient`](storefront_actor::ResourceClient).
//!
//! Each client is bound to the resource it serves (one cart, one session) and turns
//! framework errors back into the store's own error type.

pub mod auth_client;
pub mod cart_client;
pub mod order_client;

pub use auth_client::*;
pub use cart_client::*;
pub use order_client::*;
