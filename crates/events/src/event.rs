use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{Product, ProductId};

/// A domain-agnostic event.
///
/// Events are immutable facts; timestamps are carried in the payload.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "cart.item.added").
    fn event_type(&self) -> &'static str;
}

/// Events published by a cart store to its subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    ItemAdded {
        product_id: ProductId,
        title: String,
        price: Decimal,
        /// Quantity of this product in the cart after the add.
        quantity: u32,
        occurred_at: DateTime<Utc>,
    },
}

impl CartEvent {
    pub fn item_added(product: &Product, quantity: u32, occurred_at: DateTime<Utc>) -> Self {
        CartEvent::ItemAdded {
            product_id: product.id(),
            title: product.title().to_string(),
            price: product.price(),
            quantity,
            occurred_at,
        }
    }
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded { .. } => "cart.item.added",
        }
    }
}
