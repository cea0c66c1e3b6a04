//! # Checkout Flow
//!
//! Turns the cart into an order. [`CheckoutFlow::submit_order`] either stores the order
//! and takes the ordered lines out of the cart, or leaves the cart exactly as it was and
//! returns the error.
//!
//! Only one submission runs at a time. A second call while the first is still waiting
//! on order persistence fails at once with [`CheckoutError::SubmissionInProgress`]; the
//! checkout page reads [`CheckoutFlow::is_loading`] to disable its button.

use crate::cart_actor::CartError;
use crate::clients::{AuthClient, CartClient};
use crate::model::{CustomerDetails, OrderCreate, OrderId};
use crate::services::{Navigator, OrderPersistence, PersistenceError, Route};
use crate::session_actor::AuthError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// Another submission has not finished yet.
    #[error("An order is already being submitted")]
    SubmissionInProgress,

    /// Order persistence refused or failed; the cart was left untouched.
    #[error("Order submission failed: {0}")]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Holds the in-flight flag until dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, CheckoutError> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| CheckoutError::SubmissionInProgress)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Checkout for one cart and session.
///
/// Clones share the in-flight flag, so the single-submission rule holds across them.
#[derive(Clone)]
pub struct CheckoutFlow {
    cart: CartClient,
    auth: AuthClient,
    persistence: Arc<dyn OrderPersistence>,
    navigator: Arc<dyn Navigator>,
    in_flight: Arc<AtomicBool>,
}

impl CheckoutFlow {
    pub fn new(
        cart: CartClient,
        auth: AuthClient,
        persistence: Arc<dyn OrderPersistence>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            cart,
            auth,
            persistence,
            navigator,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// True while a submission is waiting on order persistence.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Places an order for everything in the cart.
    ///
    /// The order gets a copy of the cart lines and total, cash on delivery and the
    /// signed-in user as owner (none for a guest). On success the ordered units leave the
    /// cart, the shopper is sent home and the new order's id is returned. Products added
    /// to the cart while the order was being stored stay in it.
    ///
    /// Once the order is stored the call succeeds. If the cart cannot be updated after
    /// that, the failure is logged and the ordered lines remain in the cart.
    ///
    /// # Errors
    ///
    /// * [`CheckoutError::SubmissionInProgress`] if another submission is running.
    /// * [`CheckoutError::EmptyCart`] if there is nothing to order.
    /// * [`CheckoutError::Persistence`] if the order was not stored. The cart is kept.
    #[instrument(skip(self, details), fields(cart_id = %self.cart.cart_id()))]
    pub async fn submit_order(&self, details: CustomerDetails) -> Result<OrderId, CheckoutError> {
        let _in_flight = InFlight::acquire(&self.in_flight).inspect_err(|_| {
            warn!("Rejected duplicate submission");
        })?;

        let cart = self.cart.snapshot().await?;
        if cart.is_empty() {
            warn!("Checkout with an empty cart");
            return Err(CheckoutError::EmptyCart);
        }
        let user = self.auth.current_user().await?;
        let draft = OrderCreate::from_cart(&cart, details, user.as_ref());
        let total = draft.total;
        let ordered = cart.ordered_lines();

        let order_id = self.persistence.submit(draft).await.inspect_err(|e| {
            warn!(error = %e, "Order not stored, cart kept");
        })?;

        match self.cart.remove_ordered(ordered).await {
            Ok(_) => info!(%order_id, %total, "Order placed, cart cleared"),
            Err(e) => warn!(%order_id, error = %e, "Order placed, cart not updated"),
        }
        self.navigator.navigate_to(Route::Home).await;
        Ok(order_id)
    }
}
