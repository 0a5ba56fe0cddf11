//! `storefront-client`
//!
//! **Responsibility:** the product listing of the storefront.
//!
//! This crate provides:
//! - Catalog fetching from the products API, cancellable on teardown
//! - The listing component (loading flag, catalog, category filter, cart dispatch)
//! - A pure render layer producing the listing view model
//! - A Leptos frontend drawing that view model in the browser (wasm32 only)
//!
//! The cart and notification subsystems are injected collaborators.

pub mod cancel;
pub mod component;
pub mod config;
pub mod fetch;
pub mod render;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use cancel::CancelToken;
pub use component::{ComponentError, LoadOutcome, ProductsComponent, ProductsState};
pub use config::{ClientConfig, ConfigError};
pub use fetch::{CatalogSource, FetchError, HttpCatalogSource};
pub use render::{CardAction, ProductCard, ProductsView};
