//! Cart events and the collaborators the listing dispatches to.
//!
//! The cart store and the notification sink are owned elsewhere; this crate
//! only defines the seams (`CartStore`, `Notifier`), an in-memory cart for
//! hosts and tests, and the `CartDispatcher` boundary call.

pub mod bus;
pub mod cart;
pub mod dispatcher;
pub mod event;
pub mod notify;

pub use bus::Subscription;
pub use cart::{CartError, CartLine, CartStore, InMemoryCart};
pub use dispatcher::{ADDED_TO_CART, CartDispatcher};
pub use event::{CartEvent, Event};
pub use notify::{Notifier, RecordingNotifier, ToastSlot, TracingNotifier};
