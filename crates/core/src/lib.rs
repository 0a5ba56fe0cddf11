//! `storefront-core` — product listing domain.
//!
//! This crate contains **pure domain** logic (no IO): the product model,
//! mock enrichment, and the catalog/filter state the listing renders from.

pub mod catalog;
pub mod enrich;
pub mod error;
pub mod id;
pub mod product;

pub use catalog::{Catalog, CategoryFilter, FILTER_BAR, FilterState};
pub use enrich::{enrich, enrich_all, enrich_with_stock, roll_stock};
pub use error::DomainError;
pub use id::ProductId;
pub use product::{Category, Product, RawProduct, Stock, Variant, description_excerpt};
