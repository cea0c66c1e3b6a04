//! Storefront demo: browse the catalog, sign in, fill the cart and check out.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

use storefront::model::CustomerDetails;
use storefront::services::{Catalog, Navigator, Route};
use storefront::{Storefront, StorefrontConfig, StorefrontError};
use storefront_actor::tracing::setup_tracing;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), StorefrontError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = StorefrontConfig::from_env()?;
    let store = Storefront::start(config).await?;

    let span = tracing::info_span!("browse");
    let featured = async {
        let featured = store.catalog.featured_products().await?;
        for product in &featured {
            info!(id = %product.id, name = %product.name, price = %product.price, "Featured");
        }
        Ok::<_, StorefrontError>(featured)
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("sign_in");
    async {
        let user = store.auth.login("sara@example.com", "secret").await?;
        let admin = store.auth.is_admin().await?;
        info!(uid = %user.uid, name = %user.display_name, admin, "Signed in");
        Ok::<_, StorefrontError>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("shopping");
    async {
        for product in featured.iter().take(2) {
            store.cart.add_to_cart(product.clone()).await?;
        }
        if let Some(first) = featured.first() {
            store.cart.add_to_cart(first.clone()).await?;
        }
        store.navigator.navigate_to("#/cart".parse::<Route>()?).await;
        let items = store.cart.item_count().await?;
        let total = store.cart.cart_total().await?;
        info!(items, %total, "Cart ready");
        Ok::<_, StorefrontError>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("checkout");
    let details = CustomerDetails::new("Sara", "0500000000", "King Fahd Road, Riyadh")
        .with_notes("Please call before delivery");
    match store.checkout.submit_order(details).instrument(span).await {
        Ok(order_id) => {
            let order = store.orders.order(order_id).await?;
            info!(%order_id, total = %order.total, status = ?order.status, "Order placed");
        }
        Err(e) => error!(error = %e, "Checkout failed"),
    }

    store.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
