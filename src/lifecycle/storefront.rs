use crate::admin::AdminDashboard;
use crate::checkout::CheckoutFlow;
use crate::clients::{AuthClient, CartClient, OrderClient};
use crate::config::StorefrontConfig;
use crate::error::StorefrontError;
use crate::services::{
    ActorOrderPersistence, Catalog, HistoryNavigator, IdentityProvider, OrderPersistence,
    SampleCatalog, SimulatedIdentityProvider,
};
use crate::{cart_actor, order_actor, session_actor};
use std::sync::Arc;
use tracing::{error, info};

/// The running storefront: every store, the collaborators and the task handles.
///
/// Created once at start-up with [`Storefront::start`], torn down with
/// [`Storefront::shutdown`].
///
/// # Example
///
/// ```ignore
/// let store = Storefront::start(StorefrontConfig::from_env()?).await?;
///
/// let phone = store.catalog.get_product(&ProductId::from("1")).await?;
/// store.cart.add_to_cart(phone).await?;
/// store.auth.login("sara@example.com", "secret").await?;
/// let order_id = store.checkout.submit_order(details).await?;
///
/// store.shutdown().await?;
/// ```
pub struct Storefront {
    pub catalog: Arc<dyn Catalog>,
    /// The shopper's cart.
    pub cart: CartClient,
    /// The shopper's session.
    pub auth: AuthClient,
    /// The order book behind the simulated persistence.
    pub orders: OrderClient,
    pub checkout: CheckoutFlow,
    pub admin: AdminDashboard,
    pub navigator: Arc<HistoryNavigator>,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Storefront {
    /// Spawns the cart, session and order actors, opens one cart and one anonymous
    /// session, and wires checkout and the admin view to them.
    pub async fn start(config: StorefrontConfig) -> Result<Self, StorefrontError> {
        info!(?config, "Starting storefront");
        let catalog: Arc<dyn Catalog> = Arc::new(SampleCatalog::load(config.catalog_delay)?);
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(SimulatedIdentityProvider::new(config.auth_delay));
        let navigator = Arc::new(HistoryNavigator::new());

        // 1. Create actors (no dependencies yet)
        let (cart_actor, carts) = cart_actor::new(config.channel_capacity);
        let (session_actor, sessions) = session_actor::new(config.channel_capacity);
        let (order_actor, orders) = order_actor::new(config.channel_capacity);

        // 2. Start actors with injected context
        let handles = vec![
            tokio::spawn(cart_actor.run(())),
            tokio::spawn(session_actor.run(identity)),
            tokio::spawn(order_actor.run(())),
        ];

        // 3. Open this shopper's cart and session
        let cart = CartClient::open(carts).await?;
        let auth = AuthClient::open(sessions).await?;
        let orders = OrderClient::new(orders);
        let persistence: Arc<dyn OrderPersistence> = Arc::new(ActorOrderPersistence::new(
            orders.clone(),
            config.checkout_delay,
        ));

        let checkout = CheckoutFlow::new(
            cart.clone(),
            auth.clone(),
            persistence.clone(),
            navigator.clone(),
        );
        let admin = AdminDashboard::new(auth.clone(), persistence, catalog.clone());

        info!(cart_id = %cart.cart_id(), session_id = %auth.session_id(), "Storefront ready");
        Ok(Self {
            catalog,
            cart,
            auth,
            orders,
            checkout,
            admin,
            navigator,
            handles,
        })
    }

    /// Stops every actor and waits for them to finish.
    ///
    /// Returns [`StorefrontError::ActorTask`] if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), StorefrontError> {
        info!("Shutting down storefront...");

        // Step 1: close all channels by dropping every client
        drop(self.checkout);
        drop(self.admin);
        drop(self.cart);
        drop(self.auth);
        drop(self.orders);

        // Step 2: wait for all actor tasks to complete
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(StorefrontError::ActorTask(e.to_string()));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
