use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::id::ProductId;

/// Number of characters of the description shown on a product card.
pub const DESCRIPTION_EXCERPT_CHARS: usize = 90;

/// Category tag as reported by the upstream API (open set).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub const MENS_CLOTHING: &'static str = "men's clothing";
    pub const WOMENS_CLOTHING: &'static str = "women's clothing";
    pub const JEWELERY: &'static str = "jewelery";
    pub const ELECTRONICS: &'static str = "electronics";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Category {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Category {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Size variant offered for every product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    Small,
    Medium,
    Large,
    #[serde(rename = "XL")]
    ExtraLarge,
}

impl Variant {
    /// The fixed, ordered variant list attached to every product.
    pub const ALL: [Variant; 4] = [
        Variant::Small,
        Variant::Medium,
        Variant::Large,
        Variant::ExtraLarge,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Variant::Small => "Small",
            Variant::Medium => "Medium",
            Variant::Large => "Large",
            Variant::ExtraLarge => "XL",
        }
    }
}

impl core::fmt::Display for Variant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Units on hand (mocked). Zero means the product cannot be purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stock(u32);

impl Stock {
    pub const OUT_OF_STOCK: Stock = Stock(0);

    pub const fn new(units: u32) -> Self {
        Self(units)
    }

    pub fn units(&self) -> u32 {
        self.0
    }

    pub fn is_available(&self) -> bool {
        self.0 > 0
    }
}

/// Product record exactly as served by the catalog API.
///
/// Fields beyond these (e.g. `rating`) are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub description: String,
    pub category: Category,
    pub image: String,
}

/// Enriched, immutable product shown in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    title: String,
    description: String,
    price: Decimal,
    category: Category,
    image: String,
    stock: Stock,
    variants: Vec<Variant>,
}

impl Product {
    /// Build an enriched product from an upstream record.
    ///
    /// Upstream fields pass through unchanged; variants are always
    /// [`Variant::ALL`].
    pub fn from_raw(raw: RawProduct, stock: Stock) -> Self {
        let RawProduct {
            id,
            title,
            price,
            description,
            category,
            image,
        } = raw;

        Self {
            id,
            title,
            description,
            price,
            category,
            image,
            stock,
            variants: Variant::ALL.to_vec(),
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn stock(&self) -> Stock {
        self.stock
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Check if the product can be added to the cart.
    pub fn is_purchasable(&self) -> bool {
        self.stock.is_available()
    }

    /// Route of the product detail view.
    pub fn detail_path(&self) -> String {
        format!("/product/{}", self.id)
    }
}

/// Card excerpt of a description: the first 90 characters followed by `...`.
///
/// The ellipsis is appended unconditionally, so descriptions shorter than the
/// limit are shown in full with a trailing `...`. Truncation counts Unicode
/// scalar values and ignores word boundaries.
pub fn description_excerpt(description: &str) -> String {
    let mut excerpt: String = description.chars().take(DESCRIPTION_EXCERPT_CHARS).collect();
    excerpt.push_str("...");
    excerpt
}
