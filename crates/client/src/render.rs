//! Render layer: a pure derivation of (loading flag, filtered view).
//!
//! The output is a plain view model. Hosts (the Leptos frontend, the terminal
//! binary) draw it; nothing here holds state.

use core::fmt;

use storefront_core::{CategoryFilter, FILTER_BAR, Product, ProductId, description_excerpt};

/// Page heading above the grid.
pub const HEADING: &str = "Latest Products";

/// Number of card-sized placeholders shown while loading.
pub const PLACEHOLDER_CARDS: usize = 6;

/// Placeholder geometry, in pixels.
pub const HEADER_PLACEHOLDER_HEIGHT: u32 = 40;
pub const HEADER_PLACEHOLDER_WIDTH: u32 = 560;
pub const CARD_PLACEHOLDER_HEIGHT: u32 = 592;

/// Height of the card image, in pixels.
pub const CARD_IMAGE_HEIGHT: u32 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductsView {
    Loading(PlaceholderLayout),
    Loaded(ProductGrid),
}

impl ProductsView {
    pub fn is_loading(&self) -> bool {
        matches!(self, ProductsView::Loading(_))
    }

    /// Cards of a loaded grid (empty while loading).
    pub fn cards(&self) -> &[ProductCard] {
        match self {
            ProductsView::Loading(_) => &[],
            ProductsView::Loaded(grid) => &grid.cards,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderLayout {
    pub blocks: Vec<PlaceholderBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderBlock {
    Header { height: u32, width: u32 },
    Card { height: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductGrid {
    pub filters: Vec<CategoryFilter>,
    pub cards: Vec<ProductCard>,
}

/// Card action at the bottom of a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// Enabled button dispatching to the cart.
    AddToCart,
    /// Disabled placeholder button; clicking it does nothing.
    OutOfStock,
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::AddToCart => "Add to Cart",
            CardAction::OutOfStock => "Out of Stock",
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, CardAction::AddToCart)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub description: String,
    pub price: String,
    /// Informational only; the selection is not wired to the cart.
    pub variants: Vec<&'static str>,
    pub action: CardAction,
    pub detail_href: String,
}

/// Derive the view for the current state.
pub fn render(loading: bool, filtered: &[Product]) -> ProductsView {
    if loading {
        ProductsView::Loading(placeholder_layout())
    } else {
        ProductsView::Loaded(ProductGrid {
            filters: FILTER_BAR.to_vec(),
            cards: filtered.iter().map(render_card).collect(),
        })
    }
}

pub fn placeholder_layout() -> PlaceholderLayout {
    let mut blocks = Vec::with_capacity(PLACEHOLDER_CARDS + 1);
    blocks.push(PlaceholderBlock::Header {
        height: HEADER_PLACEHOLDER_HEIGHT,
        width: HEADER_PLACEHOLDER_WIDTH,
    });
    blocks.extend(
        std::iter::repeat(PlaceholderBlock::Card {
            height: CARD_PLACEHOLDER_HEIGHT,
        })
        .take(PLACEHOLDER_CARDS),
    );
    PlaceholderLayout { blocks }
}

pub fn render_card(product: &Product) -> ProductCard {
    let action = if product.is_purchasable() {
        CardAction::AddToCart
    } else {
        CardAction::OutOfStock
    };

    ProductCard {
        id: product.id(),
        title: product.title().to_string(),
        image: product.image().to_string(),
        description: description_excerpt(product.description()),
        price: format!("$ {}", product.price()),
        variants: product.variants().iter().map(|v| v.label()).collect(),
        action,
        detail_href: product.detail_path(),
    }
}

impl fmt::Display for ProductCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{} {}", self.id, self.title)?;
        writeln!(f, "  {}", self.description)?;
        writeln!(f, "  {}  [{}]", self.price, self.variants.join(" | "))?;
        write!(f, "  <{}>  -> {}", self.action.label(), self.detail_href)
    }
}

impl fmt::Display for ProductsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADING}")?;
        match self {
            ProductsView::Loading(layout) => {
                write!(f, "loading ({} placeholders)", layout.blocks.len())
            }
            ProductsView::Loaded(grid) => {
                let labels: Vec<_> = grid.filters.iter().map(CategoryFilter::label).collect();
                writeln!(f, "[ {} ]", labels.join(" ] [ "))?;
                for card in &grid.cards {
                    writeln!(f)?;
                    writeln!(f, "{card}")?;
                }
                Ok(())
            }
        }
    }
}
