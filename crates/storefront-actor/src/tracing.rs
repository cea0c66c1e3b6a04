//! # Observability & Tracing
//!
//! Every actor logs its lifecycle and each request with structured fields, using the short
//! entity name as `entity_type`:
//!
//! ```text
//! INFO Actor started entity_type="Cart"
//! DEBUG Action entity_type="Cart" id=cart_1 action=AddItem(Product { id: "1", .. })
//! INFO Action ok entity_type="Cart" id=cart_1
//! WARN Action failed entity_type="Session" id=session_1 error=Invalid credentials
//! INFO Shutdown entity_type="Cart" size=1
//! ```
//!
//! Client methods carry `#[instrument]`, so a checkout shows up as a span wrapping the
//! cart and order requests it makes.
//!
//! ```bash
//! RUST_LOG=info cargo run                    # lifecycle and state changes
//! RUST_LOG=debug cargo run                   # full payloads
//! RUST_LOG=storefront::checkout=debug cargo run
//! ```

/// Installs the global subscriber: `RUST_LOG` filtering, compact lines, no module targets.
///
/// Panics if a global subscriber is already installed; call it once from `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
