//! Catalog index models shared by the exporter, the backend and the browser.

use serde::{Deserialize, Serialize};

use crate::lenient::{lenient_bool, lenient_f64, lenient_string, lenient_terms, lenient_u64, optional_string};
use crate::slug::slugify;

/// A product as it appears in the search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub in_stock: bool,
    #[serde(default, deserialize_with = "lenient_terms")]
    pub search_terms: Vec<Option<String>>,
    #[serde(default, deserialize_with = "optional_string", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "optional_string", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "optional_string", skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
}

impl Product {
    pub fn category_slug(&self) -> String {
        slugify(self.category.as_str())
    }

    pub fn brand_slug(&self) -> String {
        slugify(self.brand.as_str())
    }
}

/// One category, brand or branch option with its build-time product count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FacetBucket {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: String,
}

impl FacetBucket {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        let name = name.into();
        let slug = slugify(name.as_str());
        Self { name, count, slug }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PriceBucket {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub min: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub max: f64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
}

/// The static catalog: facet summaries plus the flat product search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogIndex {
    pub categories: Vec<FacetBucket>,
    pub brands: Vec<FacetBucket>,
    pub price_ranges: Vec<PriceBucket>,
    pub branches: Vec<FacetBucket>,
    pub last_updated: Option<String>,
    #[serde(alias = "search_index")]
    pub products: Vec<Product>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("catalog data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog index contains no products")]
    Empty,
}

impl CatalogIndex {
    /// Parse a combined index document (JSON or a `window.x = {...};` module).
    pub fn from_json_str(text: &str) -> Result<Self, CatalogLoadError> {
        let mut index: CatalogIndex = serde_json::from_str(strip_js_module_wrapper(text))?;
        index.normalize_facet_slugs();
        Ok(index)
    }

    /// Assemble an index from the exporter's two files: the facet summary
    /// (`filter-data`) and the product array (`search-index`).
    pub fn from_parts(filter_data: &str, search_index: &str) -> Result<Self, CatalogLoadError> {
        let mut index: CatalogIndex = serde_json::from_str(strip_js_module_wrapper(filter_data))?;
        index.products = serde_json::from_str(strip_js_module_wrapper(search_index))?;
        index.normalize_facet_slugs();
        Ok(index)
    }

    /// Fail with [`CatalogLoadError::Empty`] when there is nothing to show.
    pub fn require_products(self) -> Result<Self, CatalogLoadError> {
        if self.products.is_empty() {
            return Err(CatalogLoadError::Empty);
        }
        Ok(self)
    }

    /// Recompute every facet slug from its display name and merge buckets
    /// whose names only differ in spacing or punctuation.
    ///
    /// The exporter's slugs are not guaranteed to agree with [`slugify`], and
    /// the filter engine only ever compares against `slugify(product.field)`.
    pub fn normalize_facet_slugs(&mut self) {
        for buckets in [&mut self.categories, &mut self.brands, &mut self.branches] {
            let mut merged: Vec<FacetBucket> = Vec::with_capacity(buckets.len());
            for mut bucket in buckets.drain(..) {
                bucket.slug = slugify(bucket.name.as_str());
                match merged.iter_mut().find(|b| b.slug == bucket.slug) {
                    Some(existing) => existing.count += bucket.count,
                    None => merged.push(bucket),
                }
            }
            *buckets = merged;
        }
    }

    pub fn total_products(&self) -> usize {
        self.products.len()
    }

    pub fn product(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

/// Strip the `window.name = ...;` wrapper the static site ships its data in.
pub fn strip_js_module_wrapper(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("window.") else {
        return trimmed;
    };
    let Some((_, body)) = rest.split_once('=') else {
        return trimmed;
    };
    body.trim().trim_end_matches(';').trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_odoo_shaped_products() {
        let product: Product = serde_json::from_str(
            r#"{
                "id": "262209",
                "name": "A1N156 / Front disc",
                "category": {"id": 4, "name": "Brake System"},
                "brand": [12, "ADVICS"],
                "price": "38.50",
                "search_terms": ["A1N156 / Front disc", null, "ADVICS", ""],
                "product_code": false
            }"#,
        )
        .unwrap();

        assert_eq!(product.id, 262209);
        assert_eq!(product.category, "Brake System");
        assert_eq!(product.brand, "ADVICS");
        assert_eq!(product.price, 38.5);
        assert!(!product.in_stock);
        assert_eq!(product.product_code, None);
        assert_eq!(
            product.search_terms,
            vec![Some("A1N156 / Front disc".to_string()), None, Some("ADVICS".to_string()), Some(String::new())]
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let product: Product = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(product.category, "");
        assert_eq!(product.category_slug(), "unknown");
        assert_eq!(product.price, 0.0);
        assert!(product.search_terms.is_empty());
    }

    #[test]
    fn reads_js_module_files() {
        let filter_data = r#"window.filter-data = {
            "categories": [{"name": "Car Care - العناية", "count": 1, "slug": "car-care--العناية"}],
            "brands": [{"name": "Nissan ", "count": 3, "slug": "nissan"}, {"name": "NISSAN", "count": 2, "slug": "nissan-"}],
            "price_ranges": [{"min": 0, "max": 10, "count": 4, "label": "$0.00 - $10.00"}]
        };"#;
        let search_index = r#"window.searchIndex = [{"id": 1, "name": "Wax", "category": "Car Care - العناية", "brand": "Nissan ", "price": 4}];"#;

        let index = CatalogIndex::from_parts(filter_data, search_index).unwrap();

        assert_eq!(index.categories[0].slug, "car-care-العناية");
        assert_eq!(index.categories[0].slug, index.products[0].category_slug());
        assert_eq!(index.brands, vec![FacetBucket { name: "Nissan ".to_string(), count: 5, slug: "nissan".to_string() }]);
        assert_eq!(index.price_ranges[0].count, 4);
        assert_eq!(index.total_products(), 1);
    }

    #[test]
    fn accepts_search_index_alias_and_plain_json() {
        let index = CatalogIndex::from_json_str(r#"{"search_index": [{"id": 3, "name": "Belt"}]}"#).unwrap();
        assert_eq!(index.product(3).map(|p| p.name.as_str()), Some("Belt"));
        assert!(index.product(4).is_none());
    }

    #[test]
    fn empty_catalog_is_rejected_on_request() {
        let index = CatalogIndex::from_json_str("{}").unwrap();
        assert!(matches!(index.require_products(), Err(CatalogLoadError::Empty)));
        assert!(matches!(CatalogIndex::from_json_str("window.x = ;"), Err(CatalogLoadError::Json(_))));
    }
}
