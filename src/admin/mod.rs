//! # Admin Dashboard
//!
//! The orders and products tabs of the admin page. Every call checks the session first:
//! only a signed-in admin gets data, everyone else gets [`AdminError::Forbidden`].

use crate::clients::AuthClient;
use crate::model::{Order, Product};
use crate::services::{Catalog, CatalogError, OrderPersistence, PersistenceError};
use crate::session_actor::AuthError;
use std::sync::Arc;
use thiserror::Error;
use tracing::{instrument, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdminError {
    #[error("Admin access required")]
    Forbidden,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Clone)]
pub struct AdminDashboard {
    auth: AuthClient,
    orders: Arc<dyn OrderPersistence>,
    catalog: Arc<dyn Catalog>,
}

impl AdminDashboard {
    pub fn new(
        auth: AuthClient,
        orders: Arc<dyn OrderPersistence>,
        catalog: Arc<dyn Catalog>,
    ) -> Self {
        Self {
            auth,
            orders,
            catalog,
        }
    }

    async fn require_admin(&self) -> Result<(), AdminError> {
        if self.auth.is_admin().await? {
            Ok(())
        } else {
            warn!(session_id = %self.auth.session_id(), "Admin view refused");
            Err(AdminError::Forbidden)
        }
    }

    /// Every placed order, oldest first.
    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Vec<Order>, AdminError> {
        self.require_admin().await?;
        Ok(self.orders.list().await?)
    }

    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, AdminError> {
        self.require_admin().await?;
        Ok(self.catalog.list_products().await?)
    }
}
