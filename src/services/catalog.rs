//! # Catalog
//!
//! Read-only product source. [`SampleCatalog`] serves the five demo products embedded in
//! `sample_catalog.json`.

use crate::model::{Category, Product, ProductId};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

const SAMPLE_CATALOG: &str = include_str!("sample_catalog.json");

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),
    #[error("Invalid catalog data: {0}")]
    InvalidData(String),
}

/// Where products come from.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Every product, in catalog order.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError>;

    async fn get_product(&self, id: &ProductId) -> Result<Product, CatalogError>;

    /// Products flagged for the home page.
    async fn featured_products(&self) -> Result<Vec<Product>, CatalogError> {
        let products = self.list_products().await?;
        Ok(products.into_iter().filter(|p| p.featured).collect())
    }

    /// Distinct categories in order of first appearance, numbered from 1.
    async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        let mut categories: Vec<Category> = Vec::new();
        for product in self.list_products().await? {
            if !categories.iter().any(|c| c.name == product.category) {
                categories.push(Category {
                    id: (categories.len() + 1).to_string(),
                    name: product.category,
                });
            }
        }
        Ok(categories)
    }
}

/// In-memory catalog that waits `delay` before every answer.
pub struct SampleCatalog {
    products: Vec<Product>,
    delay: Duration,
}

impl SampleCatalog {
    /// Loads the embedded demo catalog.
    pub fn load(delay: Duration) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(SAMPLE_CATALOG)
            .map_err(|e| CatalogError::InvalidData(e.to_string()))?;
        Self::from_products(products, delay)
    }

    /// Builds a catalog from explicit products. Rejects negative prices and duplicate ids.
    pub fn from_products(products: Vec<Product>, delay: Duration) -> Result<Self, CatalogError> {
        for (index, product) in products.iter().enumerate() {
            if product.price.is_sign_negative() {
                return Err(CatalogError::InvalidData(format!(
                    "product {} has a negative price",
                    product.id
                )));
            }
            if products[..index].iter().any(|p| p.id == product.id) {
                return Err(CatalogError::InvalidData(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
        }
        debug!(count = products.len(), "Catalog loaded");
        Ok(Self { products, delay })
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl Catalog for SampleCatalog {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.simulate_latency().await;
        Ok(self.products.clone())
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: &ProductId) -> Result<Product, CatalogError> {
        self.simulate_latency().await;
        self.products
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| {
                warn!(product_id = %id, "Unknown product");
                CatalogError::NotFound(id.clone())
            })
    }
}
