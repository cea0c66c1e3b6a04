//! The shopping cart.
//!
//! All cart rules live here as plain synchronous methods on [`Cart`]; the cart actor only
//! forwards its messages to them.

use crate::model::{Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CartId(pub u32);

impl From<u32> for CartId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart_{}", self.0)
    }
}

/// A product snapshot and how many of it the shopper wants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartItem {
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// `price * quantity`.
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// An ordered list of cart items, at most one per product.
///
/// Items keep the order in which their product was first added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new(id: CartId) -> Self {
        Self {
            id,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    /// Adds one unit of `product`.
    ///
    /// Bumps the quantity of an existing line, or appends a new line with quantity 1.
    /// Stock is not checked.
    pub fn add(&mut self, product: Product) {
        match self.items.iter_mut().find(|item| item.product.id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem {
                product,
                quantity: 1,
            }),
        }
    }

    /// Removes the line for `product_id`. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id() != product_id);
        self.items.len() != before
    }

    /// Sets the quantity of an existing line to exactly `quantity`.
    ///
    /// Anything below 1 removes the line. Unknown products are ignored. Returns whether
    /// the cart changed.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity < 1 {
            return self.remove(product_id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self
            .items
            .iter_mut()
            .find(|item| item.product_id() == product_id)
        {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Takes ordered units out of the cart.
    ///
    /// Each `(product, quantity)` lowers that line by `quantity`; a line that reaches 0
    /// is removed. Lines that were not ordered, and units added after the order was
    /// taken, stay in the cart.
    pub fn remove_ordered(&mut self, ordered: &[(ProductId, u32)]) {
        for (product_id, quantity) in ordered {
            if let Some(item) = self
                .items
                .iter_mut()
                .find(|item| item.product_id() == product_id)
            {
                item.quantity = item.quantity.saturating_sub(*quantity);
            }
        }
        self.items.retain(|item| item.quantity > 0);
    }

    /// The product and quantity of every line, as handed to [`Cart::remove_ordered`].
    pub fn ordered_lines(&self) -> Vec<(ProductId, u32)> {
        self.items
            .iter()
            .map(|item| (item.product_id().clone(), item.quantity))
            .collect()
    }

    /// Sum of every line total. Computed on each call.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities, the number shown on the cart badge.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            price: Decimal::from(price),
            description: String::new(),
            category: "Test".into(),
            image_url: String::new(),
            featured: false,
            stock: 1,
        }
    }

    fn expected_total(cart: &Cart) -> Decimal {
        cart.items()
            .iter()
            .map(|item| item.product.price * Decimal::from(item.quantity))
            .sum()
    }

    #[test]
    fn test_repeated_add_merges_into_one_line() {
        let mut cart = Cart::new(CartId(1));
        for _ in 0..5 {
            cart.add(product("1", 10));
        }
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_add_twice_totals_7000() {
        let mut cart = Cart::new(CartId(1));
        cart.add(product("1", 3500));
        cart.add(product("1", 3500));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product_id(), &ProductId::from("1"));
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total(), Decimal::from(7000));
    }

    #[test]
    fn test_set_quantity_is_absolute() {
        let mut cart = Cart::new(CartId(1));
        cart.add(product("1", 450));
        cart.add(product("2", 900));

        assert!(cart.set_quantity(&ProductId::from("1"), 3));
        assert_eq!(cart.total(), Decimal::from(2250));
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_set_quantity_below_one_removes() {
        for quantity in [0, -1, -100, i64::MIN] {
            let mut via_update = Cart::new(CartId(1));
            via_update.add(product("1", 5));
            via_update.add(product("2", 7));
            let mut via_remove = via_update.clone();

            via_update.set_quantity(&ProductId::from("1"), quantity);
            via_remove.remove(&ProductId::from("1"));

            assert_eq!(via_update, via_remove, "quantity {quantity}");
        }
    }

    #[test]
    fn test_unknown_product_is_a_no_op() {
        let mut cart = Cart::new(CartId(1));
        cart.add(product("1", 5));
        let before = cart.clone();

        assert!(!cart.set_quantity(&ProductId::from("9"), 4));
        assert!(!cart.remove(&ProductId::from("9")));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_insertion_order_survives_updates() {
        let mut cart = Cart::new(CartId(1));
        cart.add(product("3", 1));
        cart.add(product("1", 1));
        cart.add(product("2", 1));
        cart.add(product("3", 1));
        cart.set_quantity(&ProductId::from("1"), 9);

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product.id.0.as_str()).collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[test]
    fn test_total_tracks_every_mutation() {
        let mut cart = Cart::new(CartId(1));
        cart.add(product("1", 3));
        assert_eq!(cart.total(), expected_total(&cart));
        cart.add(product("2", 11));
        assert_eq!(cart.total(), expected_total(&cart));
        cart.set_quantity(&ProductId::from("2"), 4);
        assert_eq!(cart.total(), expected_total(&cart));
        cart.remove(&ProductId::from("1"));
        assert_eq!(cart.total(), Decimal::from(44));
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new(CartId(1));
        cart.add(product("1", 3500));
        cart.add(product("2", 450));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_fractional_prices_are_exact() {
        let mut cart = Cart::new(CartId(1));
        let mut cheap = product("1", 0);
        cheap.price = Decimal::new(10, 2); // 0.10
        for _ in 0..3 {
            cart.add(cheap.clone());
        }
        assert_eq!(cart.total(), Decimal::new(30, 2));
    }

    #[test]
    fn test_remove_ordered_keeps_later_additions() {
        let mut cart = Cart::new(CartId(1));
        cart.add(product("1", 100));
        cart.add(product("1", 100));
        let ordered = cart.ordered_lines();

        // Added while the order was being stored
        cart.add(product("1", 100));
        cart.add(product("2", 77));

        cart.remove_ordered(&ordered);
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item(&ProductId::from("1")).map(|i| i.quantity), Some(1));
        assert_eq!(cart.item(&ProductId::from("2")).map(|i| i.quantity), Some(1));
        assert_eq!(cart.total(), Decimal::from(177));

        // Lines lowered or removed meanwhile never go below zero
        let mut cart = Cart::new(CartId(2));
        cart.add(product("3", 5));
        cart.remove_ordered(&[(ProductId::from("3"), 4), (ProductId::from("9"), 1)]);
        assert!(cart.is_empty());
    }
}
