//! [`ActorEntity`] implementation for [`Order`].

use super::error::OrderError;
use crate::model::{Order, OrderCreate, OrderId};
use async_trait::async_trait;
use storefront_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = OrderError;

    /// Validates the draft and stamps it as a pending order.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        let customer = &params.customer;
        for (field, value) in [
            ("name", &customer.name),
            ("phone", &customer.phone),
            ("address", &customer.address),
        ] {
            if value.trim().is_empty() {
                return Err(OrderError::MissingCustomerDetail(field));
            }
        }
        Ok(Order::new(id, params))
    }

    // Placed orders are never edited and have no actions.
    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
