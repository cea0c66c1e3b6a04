//! # Order Client
//!
//! Provides a high-level API for the order book kept by the `Order` actor.
use crate::model::{Order, OrderCreate, OrderId};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use storefront_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Stores a new order and returns its id. Validation happens in `Order::from_create_params`.
    #[instrument(skip(self, params), fields(total = %params.total, lines = params.items.len()))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        let order_id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(%order_id, "Order placed");
        Ok(order_id)
    }

    /// Looks up one order.
    pub async fn order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.fetch(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// Every order, oldest first.
    pub async fn orders(&self) -> Result<Vec<Order>, OrderError> {
        self.fetch_all().await
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
