//! Subscription handle for events broadcast by a cart store.

use std::sync::mpsc::Receiver;

/// A subscription to an event stream.
///
/// Each subscription gets a copy of every event published after it was
/// created (broadcast semantics), in publication order.
///
/// ## Usage Pattern
///
/// ```ignore
/// let cart = InMemoryCart::new();
/// let subscription = cart.subscribe();
///
/// for event in subscription.drain() {
///     render_badge(event);
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Drain everything published so far without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}
