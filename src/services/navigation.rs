//! # Navigation
//!
//! The storefront's route table and the capability to move between routes. Routes come
//! from the URL hash (`#/product/3`), so parsing accepts a leading `#`.

use crate::model::ProductId;
use async_trait::async_trait;
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Unknown route: {0}")]
    UnknownRoute(String),
}

/// Every page of the storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Product(ProductId),
    Cart,
    Checkout,
    Login,
    Register,
    Admin,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Product(id) => format!("/product/{id}"),
            Route::Cart => "/cart".to_string(),
            Route::Checkout => "/checkout".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Admin => "/admin".to_string(),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.strip_prefix('#').unwrap_or(s);
        let segments: Vec<&str> = path.split('/').filter(|seg| !seg.is_empty()).collect();
        match segments.as_slice() {
            [] => Ok(Route::Home),
            ["product", id] => Ok(Route::Product(ProductId::from(*id))),
            ["cart"] => Ok(Route::Cart),
            ["checkout"] => Ok(Route::Checkout),
            ["login"] => Ok(Route::Login),
            ["register"] => Ok(Route::Register),
            ["admin"] => Ok(Route::Admin),
            _ => Err(NavigationError::UnknownRoute(s.to_string())),
        }
    }
}

/// Moves the shopper to another page.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn navigate_to(&self, route: Route);
}

/// Keeps the visited routes in memory. Starts on [`Route::Home`].
pub struct HistoryNavigator {
    history: Mutex<Vec<Route>>,
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self {
            history: Mutex::new(vec![Route::Home]),
        }
    }

    /// The page currently shown.
    pub async fn current(&self) -> Route {
        self.history
            .lock()
            .await
            .last()
            .cloned()
            .unwrap_or(Route::Home)
    }

    /// All visited routes, oldest first.
    pub async fn history(&self) -> Vec<Route> {
        self.history.lock().await.clone()
    }
}

#[async_trait]
impl Navigator for HistoryNavigator {
    async fn navigate_to(&self, route: Route) {
        info!(path = %route, "Navigate");
        self.history.lock().await.push(route);
    }
}
