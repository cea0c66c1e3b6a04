//! Application-level error.
//!
//! Every component error converts into [`StorefrontError`], so `main` and other top-level
//! callers can use `?` across stores.

use crate::admin::AdminError;
use crate::cart_actor::CartError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::order_actor::OrderError;
use crate::services::{CatalogError, NavigationError, PersistenceError};
use crate::session_actor::AuthError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
    #[error(transparent)]
    Admin(#[from] AdminError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    /// An actor task panicked or was cancelled.
    #[error("Actor task failed: {0}")]
    ActorTask(String),
}
