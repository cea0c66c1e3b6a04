//! # Cart Client
//!
//! The Cart Store as the rest of the storefront sees it: one cart, four mutations and
//! the derived total and badge count.
use crate::cart_actor::{CartAction, CartCreate, CartError};
use crate::model::{Cart, CartId, Product, ProductId};
use async_trait::async_trait;
use rust_decimal::Decimal;
use storefront_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client bound to a single cart in the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
    cart_id: CartId,
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<CartError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => CartError::NotFound(id),
            Err(other) => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>, cart_id: CartId) -> Self {
        Self { inner, cart_id }
    }

    /// Opens a fresh, empty cart and binds a client to it.
    #[instrument(skip(inner))]
    pub async fn open(inner: ResourceClient<Cart>) -> Result<Self, CartError> {
        let cart_id = inner.create(CartCreate).await.map_err(Self::map_error)?;
        debug!(%cart_id, "Cart opened");
        Ok(Self::new(inner, cart_id))
    }

    pub fn cart_id(&self) -> CartId {
        self.cart_id
    }

    async fn apply(&self, action: CartAction) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.inner
            .perform_action(self.cart_id, action)
            .await
            .map_err(Self::map_error)
    }

    /// Adds one unit of `product`, returning the updated cart.
    #[instrument(skip(self, product), fields(cart_id = %self.cart_id, product_id = %product.id))]
    pub async fn add_to_cart(&self, product: Product) -> Result<Cart, CartError> {
        self.apply(CartAction::AddItem(product)).await
    }

    #[instrument(skip(self), fields(cart_id = %self.cart_id))]
    pub async fn remove_from_cart(&self, product_id: ProductId) -> Result<Cart, CartError> {
        self.apply(CartAction::RemoveItem(product_id)).await
    }

    /// Sets a line's quantity. A quantity below 1 removes the line.
    #[instrument(skip(self), fields(cart_id = %self.cart_id))]
    pub async fn update_quantity(
        &self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<Cart, CartError> {
        self.apply(CartAction::SetQuantity {
            product_id,
            quantity,
        })
        .await
    }

    #[instrument(skip(self), fields(cart_id = %self.cart_id))]
    pub async fn clear_cart(&self) -> Result<Cart, CartError> {
        self.apply(CartAction::Clear).await
    }

    /// Removes the lines of a placed order, as taken from [`Cart::ordered_lines`].
    #[instrument(skip(self, ordered), fields(cart_id = %self.cart_id, lines = ordered.len()))]
    pub async fn remove_ordered(
        &self,
        ordered: Vec<(ProductId, u32)>,
    ) -> Result<Cart, CartError> {
        self.apply(CartAction::RemoveOrdered(ordered)).await
    }

    /// An owned copy of the cart as it is now.
    #[instrument(skip(self), fields(cart_id = %self.cart_id))]
    pub async fn snapshot(&self) -> Result<Cart, CartError> {
        self.fetch(self.cart_id)
            .await?
            .ok_or_else(|| CartError::NotFound(self.cart_id.to_string()))
    }

    pub async fn cart_total(&self) -> Result<Decimal, CartError> {
        Ok(self.snapshot().await?.total())
    }

    /// Number of units in the cart, for the cart badge.
    pub async fn item_count(&self) -> Result<u64, CartError> {
        Ok(self.snapshot().await?.item_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_actor::mock::{create_mock_client, expect_action, MockClient};

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            price: Decimal::from(price),
            description: String::new(),
            category: "Test".into(),
            image_url: String::new(),
            featured: false,
            stock: 3,
        }
    }

    #[tokio::test]
    async fn test_update_quantity_sends_absolute_value() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart_client = CartClient::new(client, CartId(4));

        let task = tokio::spawn(async move {
            cart_client
                .update_quantity(ProductId::from("1"), -1)
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, CartId(4));
        match action {
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => {
                assert_eq!(product_id, ProductId::from("1"));
                assert_eq!(quantity, -1);
            }
            other => panic!("Expected SetQuantity, got {other:?}"),
        }
        responder.send(Ok(Cart::new(CartId(4)))).unwrap();

        assert!(task.await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_total_and_badge_come_from_snapshot() {
        let mut mock = MockClient::<Cart>::new();
        let mut cart = Cart::new(CartId(1));
        cart.add(product("1", 450));
        cart.add(product("2", 900));
        cart.set_quantity(&ProductId::from("1"), 3);
        mock.expect_get(CartId(1)).return_ok(Some(cart.clone()));
        mock.expect_get(CartId(1)).return_ok(Some(cart));

        let client = CartClient::new(mock.client(), CartId(1));
        assert_eq!(client.cart_total().await.unwrap(), Decimal::from(2250));
        assert_eq!(client.item_count().await.unwrap(), 4);
        mock.verify();
    }

    #[tokio::test]
    async fn test_missing_cart_is_not_found() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_get(CartId(9)).return_ok(None);
        mock.expect_action(CartId(9))
            .return_err(FrameworkError::NotFound("cart_9".into()));

        let client = CartClient::new(mock.client(), CartId(9));
        assert_eq!(
            client.snapshot().await.unwrap_err(),
            CartError::NotFound("cart_9".into())
        );
        assert_eq!(
            client.clear_cart().await.unwrap_err(),
            CartError::NotFound("cart_9".into())
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_closed_store_is_a_communication_error() {
        let (client, receiver) = create_mock_client::<Cart>(1);
        drop(receiver);
        let cart_client = CartClient::new(client, CartId(1));

        let err = cart_client.add_to_cart(product("1", 1)).await.unwrap_err();
        assert!(matches!(err, CartError::ActorCommunicationError(_)));
    }

    #[tokio::test]
    async fn test_open_binds_to_created_id() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_create().return_ok(CartId(2));

        let client = CartClient::open(mock.client()).await.unwrap();
        assert_eq!(client.cart_id(), CartId(2));
        mock.verify();
    }
}
