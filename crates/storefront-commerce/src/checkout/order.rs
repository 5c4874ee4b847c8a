//! Order types.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::checkout::{BillingDetails, PaymentIntent};
use crate::ids::{OrderId, PaymentIntentId, ProductId};
use crate::money::{Currency, Money};

/// Days between placing an order and its estimated delivery.
pub const ESTIMATED_DELIVERY_DAYS: i64 = 3;

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, awaiting payment confirmation.
    #[default]
    Pending,
    /// Paid and being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if order can be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }
}

/// One line of a placed order, copied from the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_image: String,
    /// Unit price at the time of purchase.
    pub price: Money,
    pub quantity: u64,
}

impl OrderItem {
    pub fn line_total(&self) -> Money {
        self.price.saturating_mul(self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    /// Charge that paid for this order.
    pub payment_intent_id: PaymentIntentId,
    /// Amount charged.
    pub amount: Money,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub billing_details: BillingDetails,
    pub created_at: DateTime<Utc>,
    pub estimated_delivery: DateTime<Utc>,
}

impl Order {
    /// Snapshot a cart into an order paid by `intent`.
    pub fn from_cart(
        cart: &Cart,
        billing_details: BillingDetails,
        intent: &PaymentIntent,
        created_at: DateTime<Utc>,
    ) -> Self {
        let items = cart
            .items()
            .iter()
            .map(|line| OrderItem {
                product_id: line.product.id.clone(),
                product_name: line.product.name.clone(),
                product_image: line.product.image.clone(),
                price: line.product.price,
                quantity: line.quantity,
            })
            .collect();

        Self {
            id: OrderId::from_timestamp_millis(created_at.timestamp_millis()),
            payment_intent_id: intent.id.clone(),
            amount: intent.amount,
            status: if intent.is_succeeded() {
                OrderStatus::Processing
            } else {
                OrderStatus::Pending
            },
            items,
            billing_details,
            created_at,
            estimated_delivery: created_at + Duration::days(ESTIMATED_DELIVERY_DAYS),
        }
    }

    /// Order currency.
    pub fn currency(&self) -> Currency {
        self.amount.currency
    }

    /// Get total item count.
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, i| acc.saturating_add(i.quantity))
    }
}
