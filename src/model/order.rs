//! Orders placed at checkout.
//!
//! An [`Order`] owns a copy of the cart lines it was built from, so nothing that happens
//! to the cart afterwards can reach it.

use crate::model::{Cart, CartItem, UserId, UserProfile};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Fulfillment state. Orders start `Pending`; later states are set by fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Cash on delivery is the only way to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "COD")]
    CashOnDelivery,
}

/// Delivery details typed in on the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub notes: Option<String>,
}

impl CustomerDetails {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Owner, absent for a guest checkout.
    pub user_id: Option<UserId>,
    pub user_email: Option<String>,
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub customer: CustomerDetails,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for placing a new order.
///
/// Built from a cart snapshot with [`OrderCreate::from_cart`]; the order book assigns the
/// id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreate {
    pub user_id: Option<UserId>,
    pub user_email: Option<String>,
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub customer: CustomerDetails,
    pub payment_method: PaymentMethod,
}

impl OrderCreate {
    /// Copies the cart's lines and total into a new order draft.
    pub fn from_cart(cart: &Cart, customer: CustomerDetails, user: Option<&UserProfile>) -> Self {
        Self {
            user_id: user.map(|u| u.uid.clone()),
            user_email: user.map(|u| u.email.clone()),
            items: cart.items().to_vec(),
            total: cart.total(),
            customer,
            payment_method: PaymentMethod::CashOnDelivery,
        }
    }
}

impl Order {
    /// Creates a pending order stamped with the current time.
    pub fn new(id: OrderId, params: OrderCreate) -> Self {
        Self {
            id,
            user_id: params.user_id,
            user_email: params.user_email,
            items: params.items,
            total: params.total,
            customer: params.customer,
            payment_method: params.payment_method,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartId, Product, ProductId, Role};

    fn phone() -> Product {
        Product {
            id: ProductId::from("1"),
            name: "Phone".into(),
            price: Decimal::from(500),
            description: String::new(),
            category: "Electronics".into(),
            image_url: String::new(),
            featured: true,
            stock: 10,
        }
    }

    #[test]
    fn test_draft_is_detached_from_cart() {
        let mut cart = Cart::new(CartId(1));
        cart.add(phone());
        cart.add(phone());

        let draft = OrderCreate::from_cart(&cart, CustomerDetails::new("A", "1", "Street"), None);
        cart.add(phone());
        cart.clear();

        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].quantity, 2);
        assert_eq!(draft.total, Decimal::from(1000));
        assert_eq!(draft.payment_method, PaymentMethod::CashOnDelivery);
    }

    #[test]
    fn test_draft_carries_owner_and_notes() {
        let mut cart = Cart::new(CartId(1));
        cart.add(phone());
        let user = UserProfile {
            uid: UserId::from("u-1"),
            email: "sara@example.com".into(),
            display_name: "sara".into(),
            role: Role::User,
            created_at: Utc::now(),
        };
        let customer = CustomerDetails::new("Sara", "0500000000", "Riyadh").with_notes("Call first");

        let order = Order::new(OrderId(7), OrderCreate::from_cart(&cart, customer, Some(&user)));

        assert_eq!(order.id.to_string(), "order_7");
        assert_eq!(order.user_id, Some(UserId::from("u-1")));
        assert_eq!(order.user_email.as_deref(), Some("sara@example.com"));
        assert_eq!(order.customer.notes.as_deref(), Some("Call first"));
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap(),
            "\"COD\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Delivered).unwrap(),
            "\"delivered\""
        );
    }
}
