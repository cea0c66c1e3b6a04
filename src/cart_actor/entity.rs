//! [`ActorEntity`] implementation for [`Cart`].

use super::actions::CartAction;
use super::error::CartError;
use crate::model::{Cart, CartId};
use async_trait::async_trait;
use storefront_actor::ActorEntity;
use tracing::debug;

/// Payload for opening a cart. Carts always start empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartCreate;

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Create = CartCreate;
    type Update = ();
    type Action = CartAction;
    type ActionResult = Cart;
    type Context = ();
    type Error = CartError;

    fn from_create_params(id: CartId, _params: CartCreate) -> Result<Self, Self::Error> {
        Ok(Cart::new(id))
    }

    // Carts change only through actions.
    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies a [`CartAction`] and returns the resulting cart.
    async fn handle_action(&mut self, action: CartAction, _ctx: &()) -> Result<Cart, Self::Error> {
        match action {
            CartAction::AddItem(product) => self.add(product),
            CartAction::RemoveItem(product_id) => {
                if !self.remove(&product_id) {
                    debug!(cart_id = %self.id, %product_id, "Remove ignored, product not in cart");
                }
            }
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => {
                if !self.set_quantity(&product_id, quantity) {
                    debug!(cart_id = %self.id, %product_id, quantity, "Quantity unchanged");
                }
            }
            CartAction::Clear => self.clear(),
            CartAction::RemoveOrdered(ordered) => self.remove_ordered(&ordered),
        }
        Ok(self.clone())
    }
}
