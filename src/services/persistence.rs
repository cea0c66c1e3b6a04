//! # Order Persistence
//!
//! Where checkout sends finished orders. [`ActorOrderPersistence`] keeps them in the
//! in-memory order book after a simulated network delay.

use crate::clients::OrderClient;
use crate::model::{Order, OrderCreate, OrderId};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{instrument, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PersistenceError {
    /// The backend refused the order (it failed validation).
    #[error("Order rejected: {0}")]
    Rejected(String),
    #[error("Order not found: {0}")]
    NotFound(OrderId),
    /// The backend could not be reached.
    #[error("Order storage unavailable: {0}")]
    Unavailable(String),
}

/// Order storage backend.
#[async_trait]
pub trait OrderPersistence: Send + Sync {
    /// Stores a new order and returns the id the backend assigned.
    async fn submit(&self, order: OrderCreate) -> Result<OrderId, PersistenceError>;

    /// Every stored order, oldest first.
    async fn list(&self) -> Result<Vec<Order>, PersistenceError>;

    async fn get(&self, id: OrderId) -> Result<Order, PersistenceError>;
}

/// Order persistence backed by the Order actor.
pub struct ActorOrderPersistence {
    orders: OrderClient,
    delay: Duration,
}

impl ActorOrderPersistence {
    pub fn new(orders: OrderClient, delay: Duration) -> Self {
        Self { orders, delay }
    }
}

fn to_persistence_error(e: OrderError, id: Option<OrderId>) -> PersistenceError {
    match (e, id) {
        (OrderError::NotFound(_), Some(id)) => PersistenceError::NotFound(id),
        (OrderError::ActorCommunicationError(msg), _) => PersistenceError::Unavailable(msg),
        (other, _) => PersistenceError::Rejected(other.to_string()),
    }
}

#[async_trait]
impl OrderPersistence for ActorOrderPersistence {
    #[instrument(skip(self, order), fields(total = %order.total))]
    async fn submit(&self, order: OrderCreate) -> Result<OrderId, PersistenceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.orders.place_order(order).await.map_err(|e| {
            warn!(error = %e, "Order submission failed");
            to_persistence_error(e, None)
        })
    }

    async fn list(&self) -> Result<Vec<Order>, PersistenceError> {
        self.orders
            .orders()
            .await
            .map_err(|e| to_persistence_error(e, None))
    }

    async fn get(&self, id: OrderId) -> Result<Order, PersistenceError> {
        self.orders
            .order(id)
            .await
            .map_err(|e| to_persistence_error(e, Some(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerDetails, PaymentMethod};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_invalid_order_is_rejected() {
        let (actor, client) = crate::order_actor::new(8);
        tokio::spawn(actor.run(()));
        let persistence = ActorOrderPersistence::new(OrderClient::new(client), Duration::ZERO);

        let empty = OrderCreate {
            user_id: None,
            user_email: None,
            items: Vec::new(),
            total: Decimal::ZERO,
            customer: CustomerDetails::new("A", "1", "B"),
            payment_method: PaymentMethod::CashOnDelivery,
        };
        assert!(matches!(
            persistence.submit(empty).await,
            Err(PersistenceError::Rejected(_))
        ));
        assert_eq!(
            persistence.get(OrderId(1)).await.unwrap_err(),
            PersistenceError::NotFound(OrderId(1))
        );
        assert!(persistence.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stopped_order_book_is_unavailable() {
        let (actor, client) = crate::order_actor::new(8);
        drop(actor);
        let persistence = ActorOrderPersistence::new(OrderClient::new(client), Duration::ZERO);

        assert!(matches!(
            persistence.list().await,
            Err(PersistenceError::Unavailable(_))
        ));
    }
}
