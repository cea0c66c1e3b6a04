//! # Storefront
//!
//! The core of a small online shop: product browsing, a shopping cart, sign-in and a
//! cash-on-delivery checkout. Everything runs in memory; the catalog, identity provider
//! and order storage are simulated collaborators with configurable latency.
//!
//! ## Module Tour
//!
//! ### 1. The Stores ([`cart_actor`], [`session_actor`], [`order_actor`])
//! Each store is a [`ResourceActor`](storefront_actor::ResourceActor) task owning its
//! resources. Requests to one store are handled one at a time, so store state needs no
//! locks and a failed action is rolled back before the next request runs.
//!
//! ### 2. The Interface ([`clients`])
//! - [`CartClient`](clients::CartClient): the Cart Store (add, remove, set quantity,
//!   clear, total).
//! - [`AuthClient`](clients::AuthClient): the Auth Store (login, Google login, register,
//!   logout, `is_admin`).
//! - [`OrderClient`](clients::OrderClient): the order book.
//!
//! ### 3. The Flows ([`checkout`], [`admin`])
//! [`CheckoutFlow`](checkout::CheckoutFlow) turns the cart into an order, one submission
//! at a time. [`AdminDashboard`](admin::AdminDashboard) lists orders and products for
//! admins.
//!
//! ### 4. Collaborators ([`services`])
//! Catalog, identity provider, order persistence and navigation, each a trait with a
//! simulated implementation.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`Storefront`] starts and wires everything from a [`StorefrontConfig`] and shuts it
//! down again.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! STOREFRONT_CHECKOUT_DELAY_MS=0 RUST_LOG=debug cargo run
//! ```

pub mod admin;
pub mod cart_actor;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod services;
pub mod session_actor;

pub use config::{ConfigError, StorefrontConfig};
pub use error::StorefrontError;
pub use lifecycle::Storefront;
