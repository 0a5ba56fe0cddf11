//! Cart store seam and an in-memory implementation.

use std::sync::{Arc, Mutex, mpsc};

use chrono::Utc;
use storefront_core::{Product, ProductId};
use thiserror::Error;

use crate::bus::Subscription;
use crate::event::CartEvent;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Internal lock poisoning.
    #[error("cart state lock poisoned")]
    Poisoned,
    /// The store refused the item.
    #[error("cart rejected item: {0}")]
    Rejected(String),
}

/// The external cart store's single consumed capability.
///
/// Merge semantics (quantities, persistence) belong to the implementation; the
/// listing only ever asks for one unit of a product to be added.
pub trait CartStore: Send + Sync {
    fn add_item(&self, product: &Product) -> Result<(), CartError>;
}

impl<C> CartStore for Arc<C>
where
    C: CartStore + ?Sized,
{
    fn add_item(&self, product: &Product) -> Result<(), CartError> {
        (**self).add_item(product)
    }
}

/// One line of the in-memory cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

/// In-memory cart for hosts and tests.
///
/// - Re-adding a product increments its quantity
/// - Every add is broadcast to subscribers as a [`CartEvent`]
#[derive(Debug, Default)]
pub struct InMemoryCart {
    lines: Mutex<Vec<CartLine>>,
    subscribers: Mutex<Vec<mpsc::Sender<CartEvent>>>,
}

impl InMemoryCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the cart lines in first-added order.
    pub fn lines(&self) -> Vec<CartLine> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.lines
            .lock()
            .ok()
            .and_then(|lines| lines.iter().find(|l| l.product.id() == id).map(|l| l.quantity))
            .unwrap_or(0)
    }

    pub fn total_quantity(&self) -> u32 {
        self.lines
            .lock()
            .map(|lines| lines.iter().map(|l| l.quantity).sum())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.total_quantity() == 0
    }

    pub fn subscribe(&self) -> Subscription<CartEvent> {
        let (tx, rx) = mpsc::channel();

        // A poisoned lock still yields a subscription; it just never receives.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }

    fn publish(&self, event: CartEvent) -> Result<(), CartError> {
        let mut subs = self.subscribers.lock().map_err(|_| CartError::Poisoned)?;

        // Drop any dead subscribers while publishing.
        subs.retain(|tx| tx.send(event.clone()).is_ok());

        Ok(())
    }
}

impl CartStore for InMemoryCart {
    fn add_item(&self, product: &Product) -> Result<(), CartError> {
        let quantity = {
            let mut lines = self.lines.lock().map_err(|_| CartError::Poisoned)?;
            match lines.iter_mut().find(|l| l.product.id() == product.id()) {
                Some(line) => {
                    line.quantity += 1;
                    line.quantity
                }
                None => {
                    lines.push(CartLine {
                        product: product.clone(),
                        quantity: 1,
                    });
                    1
                }
            }
        };

        tracing::debug!(product_id = %product.id(), quantity, "cart item added");
        self.publish(CartEvent::item_added(product, quantity, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use rust_decimal::Decimal;
    use storefront_core::{Category, RawProduct, Stock, enrich_with_stock};

    fn product(id: u64) -> Product {
        enrich_with_stock(
            RawProduct {
                id: ProductId::new(id),
                title: format!("Product {id}"),
                price: Decimal::new(2250, 2),
                description: "d".to_string(),
                category: Category::new(Category::JEWELERY),
                image: "i".to_string(),
            },
            Stock::new(5),
        )
    }

    #[test]
    fn repeated_adds_merge_into_quantity() {
        let cart = InMemoryCart::new();
        cart.add_item(&product(1)).unwrap();
        cart.add_item(&product(2)).unwrap();
        cart.add_item(&product(1)).unwrap();

        let lines = cart.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product.id(), ProductId::new(1));
        assert_eq!(cart.quantity_of(ProductId::new(1)), 2);
        assert_eq!(cart.quantity_of(ProductId::new(2)), 1);
        assert_eq!(cart.quantity_of(ProductId::new(3)), 0);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn subscribers_receive_item_added_events() {
        let cart = InMemoryCart::new();
        let sub = cart.subscribe();

        cart.add_item(&product(9)).unwrap();
        cart.add_item(&product(9)).unwrap();

        let events = sub.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type(), "cart.item.added");
        match &events[1] {
            CartEvent::ItemAdded {
                product_id,
                quantity,
                ..
            } => {
                assert_eq!(*product_id, ProductId::new(9));
                assert_eq!(*quantity, 2);
            }
        }
    }

    #[test]
    fn dropped_subscribers_do_not_break_publishing() {
        let cart = InMemoryCart::new();
        drop(cart.subscribe());
        cart.add_item(&product(1)).unwrap();
        assert!(!cart.is_empty());
    }

    #[test]
    fn shared_handle_forwards_to_inner_store() {
        let cart = Arc::new(InMemoryCart::new());
        let store: Arc<dyn CartStore> = cart.clone();
        store.add_item(&product(4)).unwrap();
        assert_eq!(cart.total_quantity(), 1);
    }
}
