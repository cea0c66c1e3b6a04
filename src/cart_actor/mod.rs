//! # Cart Actor
//!
//! Keeps shopping carts and applies the cart rules from [`Cart`] one message at a time.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](storefront_actor::ActorEntity) implementation for [`Cart`]
//! - [`actions`] - [`CartAction`], the four cart mutations
//! - [`error`] - [`CartError`]
//!
//! ## Usage
//!
//! ```rust
//! use storefront::cart_actor;
//! use storefront::clients::CartClient;
//! use storefront::model::{Product, ProductId};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = cart_actor::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let cart = CartClient::open(generic_client).await?;
//!     let product = Product {
//!         id: ProductId::from("1"),
//!         name: "Phone".into(),
//!         price: Decimal::from(3500),
//!         description: String::new(),
//!         category: "Electronics".into(),
//!         image_url: String::new(),
//!         featured: true,
//!         stock: 10,
//!     };
//!     cart.add_to_cart(product.clone()).await?;
//!     cart.add_to_cart(product).await?;
//!     assert_eq!(cart.cart_total().await?, Decimal::from(7000));
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::CartCreate;
pub use error::*;

use crate::model::Cart;
use storefront_actor::{ResourceActor, ResourceClient};

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(buffer_size)
}
