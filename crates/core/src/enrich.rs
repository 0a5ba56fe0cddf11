//! Mock enrichment: stock and variant data the upstream API does not provide.
//!
//! Randomness is always injected by the caller so enrichment is reproducible
//! under a seeded generator.

use rand::Rng;

use crate::product::{Product, RawProduct, Stock};

/// Probability that a product is mocked as in stock.
pub const IN_STOCK_PROBABILITY: f64 = 0.7;

/// Upper bound (inclusive) of mocked stock for in-stock products.
pub const MAX_MOCK_STOCK: u32 = 10;

/// Draw a mock stock level: 70% uniformly in `1..=10`, otherwise zero.
pub fn roll_stock<R: Rng + ?Sized>(rng: &mut R) -> Stock {
    if rng.gen_bool(IN_STOCK_PROBABILITY) {
        Stock::new(rng.gen_range(1..=MAX_MOCK_STOCK))
    } else {
        Stock::OUT_OF_STOCK
    }
}

/// Enrich a single record with a randomly drawn stock level.
pub fn enrich<R: Rng + ?Sized>(raw: RawProduct, rng: &mut R) -> Product {
    let stock = roll_stock(rng);
    enrich_with_stock(raw, stock)
}

/// Enrich a single record with an explicit stock level.
pub fn enrich_with_stock(raw: RawProduct, stock: Stock) -> Product {
    Product::from_raw(raw, stock)
}

/// Enrich a fetched batch, preserving its order.
pub fn enrich_all<R: Rng + ?Sized>(raws: Vec<RawProduct>, rng: &mut R) -> Vec<Product> {
    raws.into_iter().map(|raw| enrich(raw, rng)).collect()
}
