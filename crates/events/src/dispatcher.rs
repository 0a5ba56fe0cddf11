//! Add-to-cart boundary call.

use std::sync::Arc;

use storefront_core::Product;

use crate::cart::CartStore;
use crate::notify::Notifier;

/// Message shown after a product is handed to the cart.
pub const ADDED_TO_CART: &str = "Added to cart";

/// Hands products to the injected cart store and raises a success toast.
///
/// Stock is **not** re-checked here: the render layer only exposes the action
/// for purchasable products, and whatever reaches this call is forwarded as-is.
#[derive(Clone)]
pub struct CartDispatcher {
    cart: Arc<dyn CartStore>,
    notifier: Arc<dyn Notifier>,
}

impl CartDispatcher {
    pub fn new(cart: Arc<dyn CartStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { cart, notifier }
    }

    /// Notify, then forward one unit of `product` to the cart store.
    ///
    /// Store failures are logged and swallowed; nothing propagates to the caller.
    pub fn add_to_cart(&self, product: &Product) {
        self.notifier.success(ADDED_TO_CART);

        tracing::debug!(product_id = %product.id(), "dispatching to cart");
        if let Err(e) = self.cart.add_item(product) {
            tracing::error!(product_id = %product.id(), error = %e, "cart store rejected item");
        }
    }
}

impl core::fmt::Debug for CartDispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CartDispatcher").finish_non_exhaustive()
    }
}
