//! Custom actions for the Cart actor.
//!
//! Every action answers with a snapshot of the cart after the change, so callers can
//! render the new state without a second round trip.

use crate::model::{Product, ProductId};

/// Mutations of a single cart.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds one unit, merging with an existing line for the same product.
    AddItem(Product),
    /// Drops the line for a product. Unknown ids are ignored.
    RemoveItem(ProductId),
    /// Sets a line's quantity outright; anything below 1 removes the line.
    SetQuantity { product_id: ProductId, quantity: i64 },
    /// Empties the cart.
    Clear,
    /// Takes the units of a placed order out of the cart, leaving anything added since.
    RemoveOrdered(Vec<(ProductId, u32)>),
}
