//! Catalog and filtered view.
//!
//! The catalog is populated once per mount and never mutated afterwards; the
//! filtered view is always recomputed from it, never from a previous filter.

use crate::product::{Category, Product};

/// The full fetched set of products, in upstream order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products whose category equals `category`, in catalog order.
    pub fn in_category(&self, category: &str) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.category() == category)
            .cloned()
            .collect()
    }
}

/// One entry of the category filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Reset to the whole catalog.
    All,
    /// Restrict to a single category tag.
    Category {
        label: &'static str,
        tag: &'static str,
    },
}

impl CategoryFilter {
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Category { label, .. } => *label,
        }
    }
}

/// Filter buttons offered above the product grid, left to right.
pub const FILTER_BAR: [CategoryFilter; 5] = [
    CategoryFilter::All,
    CategoryFilter::Category {
        label: "Men's Clothing",
        tag: Category::MENS_CLOTHING,
    },
    CategoryFilter::Category {
        label: "Women's Clothing",
        tag: Category::WOMENS_CLOTHING,
    },
    CategoryFilter::Category {
        label: "Jewelery",
        tag: Category::JEWELERY,
    },
    CategoryFilter::Category {
        label: "Electronics",
        tag: Category::ELECTRONICS,
    },
];

/// Catalog plus the subset currently displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    catalog: Catalog,
    filtered: Vec<Product>,
}

impl FilterState {
    /// Start with the filtered view equal to the whole catalog.
    pub fn new(catalog: Catalog) -> Self {
        let filtered = catalog.products().to_vec();
        Self { catalog, filtered }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    /// Filtered view := full catalog.
    pub fn show_all(&mut self) {
        self.filtered = self.catalog.products().to_vec();
    }

    /// Filtered view := catalog products with exactly this category.
    ///
    /// No match yields an empty view, not an error.
    pub fn filter_by_category(&mut self, category: &str) {
        self.filtered = self.catalog.in_category(category);
        tracing::debug!(category, matches = self.filtered.len(), "category filter applied");
    }

    /// Apply one filter-bar entry.
    pub fn apply(&mut self, filter: CategoryFilter) {
        match filter {
            CategoryFilter::All => self.show_all(),
            CategoryFilter::Category { tag, .. } => self.filter_by_category(tag),
        }
    }
}
