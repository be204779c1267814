use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::PriceBucket;
use crate::slug::slugify;

/// Closed price interval. The bounds are always ordered, `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PriceBounds", into = "PriceBounds")]
pub struct PriceRange {
    min: f64,
    max: f64,
}

#[derive(Serialize, Deserialize)]
struct PriceBounds {
    min: f64,
    max: f64,
}

impl From<PriceBounds> for PriceRange {
    fn from(bounds: PriceBounds) -> Self {
        PriceRange::new(bounds.min, bounds.max)
    }
}

impl From<PriceRange> for PriceBounds {
    fn from(range: PriceRange) -> Self {
        PriceBounds { min: range.min, max: range.max }
    }
}

impl PriceRange {
    pub fn new(a: f64, b: f64) -> Self {
        if b < a { Self { min: b, max: a } } else { Self { min: a, max: b } }
    }

    pub fn from_bucket(bucket: &PriceBucket) -> Self {
        Self::new(bucket.min, bucket.max)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// The user's current selection on the shop page.
///
/// Category and brand selections are stored as slugs so they compare
/// directly against `slugify(product.category)` and `slugify(product.brand)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    categories: BTreeSet<String>,
    brands: BTreeSet<String>,
    price_range: Option<PriceRange>,
    search_query: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    pub fn brands(&self) -> &BTreeSet<String> {
        &self.brands
    }

    pub fn price_range(&self) -> Option<PriceRange> {
        self.price_range
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Add or remove a category slug.
    pub fn set_category(&mut self, slug: &str, selected: bool) {
        set_member(&mut self.categories, slug, selected);
    }

    pub fn toggle_category(&mut self, slug: &str) {
        let selected = !self.categories.contains(&slugify(slug));
        self.set_category(slug, selected);
    }

    /// Add or remove a brand slug.
    pub fn set_brand(&mut self, slug: &str, selected: bool) {
        set_member(&mut self.brands, slug, selected);
    }

    pub fn toggle_brand(&mut self, slug: &str) {
        let selected = !self.brands.contains(&slugify(slug));
        self.set_brand(slug, selected);
    }

    pub fn set_price_range(&mut self, range: Option<PriceRange>) {
        self.price_range = range;
    }

    /// Store the raw query; matching lowercases it, nothing else is trimmed.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.active_filter_count() == 0
    }

    /// Number of active selections, as shown on the "clear filters" button.
    pub fn active_filter_count(&self) -> usize {
        self.categories.len()
            + self.brands.len()
            + usize::from(self.price_range.is_some())
            + usize::from(!self.search_query.is_empty())
    }

    pub fn with_category(mut self, slug: &str) -> Self {
        self.set_category(slug, true);
        self
    }

    pub fn with_brand(mut self, slug: &str) -> Self {
        self.set_brand(slug, true);
        self
    }

    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.set_price_range(Some(PriceRange::new(min, max)));
        self
    }

    pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
        self.set_search_query(query);
        self
    }
}

fn set_member(set: &mut BTreeSet<String>, slug: &str, selected: bool) {
    let slug = slugify(slug);
    if selected {
        set.insert(slug);
    } else {
        set.remove(&slug);
    }
}
