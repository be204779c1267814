//! Conjunctive product filtering.
//!
//! Every pass re-evaluates all predicates over the whole product list; there is
//! no incremental state. An empty slot in [`FilterState`] matches everything.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogIndex, Product};
use crate::filter_state::FilterState;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterResult {
    /// Matching products, in catalog order.
    pub products: Vec<Product>,
    /// Size of the unfiltered catalog.
    pub total_count: usize,
}

impl FilterResult {
    pub fn filtered_count(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Facet dimension left out of a recount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Category,
    Brand,
}

pub fn apply_filters(state: &FilterState, products: &[Product]) -> FilterResult {
    FilterResult {
        products: products.iter().filter(|p| matches_all(state, p)).cloned().collect(),
        total_count: products.len(),
    }
}

pub fn matches_all(state: &FilterState, product: &Product) -> bool {
    matches_category(state, product)
        && matches_brand(state, product)
        && matches_price(state, product)
        && matches_search(state, product)
}

/// Every predicate except the one belonging to `facet`.
pub fn matches_all_except(state: &FilterState, product: &Product, facet: Facet) -> bool {
    let facet_ok = match facet {
        Facet::Category => matches_brand(state, product),
        Facet::Brand => matches_category(state, product),
    };
    facet_ok && matches_price(state, product) && matches_search(state, product)
}

pub fn matches_category(state: &FilterState, product: &Product) -> bool {
    state.categories().is_empty() || state.categories().contains(&product.category_slug())
}

pub fn matches_brand(state: &FilterState, product: &Product) -> bool {
    state.brands().is_empty() || state.brands().contains(&product.brand_slug())
}

pub fn matches_price(state: &FilterState, product: &Product) -> bool {
    state.price_range().is_none_or(|range| range.contains(product.price))
}

pub fn matches_search(state: &FilterState, product: &Product) -> bool {
    let query = state.search_query();
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    product
        .search_terms
        .iter()
        .flatten()
        .filter(|term| !term.is_empty())
        .any(|term| term.to_lowercase().contains(&query))
}

impl CatalogIndex {
    pub fn apply_filters(&self, state: &FilterState) -> FilterResult {
        apply_filters(state, &self.products)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    pub(crate) fn product(id: u64, name: &str, brand: &str, category: &str, price: f64) -> Product {
        Product {
            id,
            name: name.to_string(),
            brand: brand.to_string(),
            category: category.to_string(),
            price,
            in_stock: true,
            search_terms: vec![Some(name.to_string()), Some(category.to_string()), Some(brand.to_string())],
            ..Default::default()
        }
    }

    pub(crate) fn sample_catalog() -> Vec<Product> {
        vec![
            product(1, "Oil Filter", "Denso", "Filtration", 9.50),
            product(2, "Brake Pad", "AISIN", "Brake System", 38.50),
        ]
    }

    fn names(result: &FilterResult) -> Vec<&str> {
        result.products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn empty_state_returns_catalog_unchanged() {
        let catalog = sample_catalog();
        let result = apply_filters(&FilterState::new(), &catalog);
        assert_eq!(result.products, catalog);
        assert_eq!(result.total_count, 2);
    }

    #[test]
    fn brand_filter_example() {
        let result = apply_filters(&FilterState::new().with_brand("denso"), &sample_catalog());
        assert_eq!(names(&result), vec!["Oil Filter"]);
        assert_eq!((result.filtered_count(), result.total_count), (1, 2));
    }

    #[test]
    fn price_filter_example() {
        let result = apply_filters(&FilterState::new().with_price_range(10.0, 40.0), &sample_catalog());
        assert_eq!(names(&result), vec!["Brake Pad"]);
    }

    #[test]
    fn search_filter_example() {
        let result = apply_filters(&FilterState::new().with_search_query("brake"), &sample_catalog());
        assert_eq!(names(&result), vec!["Brake Pad"]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let catalog = sample_catalog();
        let at = |min: f64, max: f64| apply_filters(&FilterState::new().with_price_range(min, max), &catalog);

        assert_eq!(names(&at(9.50, 38.50)), vec!["Oil Filter", "Brake Pad"]);
        assert_eq!(names(&at(9.51, 38.49)), Vec::<&str>::new());
        assert_eq!(names(&at(38.50, 100.0)), vec!["Brake Pad"]);
        assert_eq!(names(&at(38.51, 100.0)), Vec::<&str>::new());
        assert_eq!(names(&at(0.0, 9.49)), Vec::<&str>::new());
    }

    #[test]
    fn search_is_case_insensitive_and_skips_missing_terms() {
        let mut toyota = product(3, "Camry Wiper", "Toyota", "Wipers", 12.0);
        toyota.search_terms.insert(0, None);
        toyota.search_terms.push(Some(String::new()));
        let catalog = vec![toyota];

        assert_eq!(apply_filters(&FilterState::new().with_search_query("toy"), &catalog).filtered_count(), 1);
        assert_eq!(apply_filters(&FilterState::new().with_search_query("TOY"), &catalog).filtered_count(), 1);
        assert_eq!(apply_filters(&FilterState::new().with_search_query("honda"), &catalog).filtered_count(), 0);
    }

    #[test]
    fn missing_category_is_the_unknown_slug() {
        let catalog = vec![product(4, "Mystery part", "", "", 1.0)];
        let result = apply_filters(&FilterState::new().with_category("unknown"), &catalog);
        assert_eq!(result.filtered_count(), 1);
    }

    #[test]
    fn recount_ignores_only_the_named_facet() {
        let state = FilterState::new().with_brand("aisin").with_category("filtration");
        let catalog = sample_catalog();
        assert!(matches_all_except(&state, &catalog[0], Facet::Brand));
        assert!(!matches_all_except(&state, &catalog[0], Facet::Category));
        assert!(matches_all_except(&state, &catalog[1], Facet::Category));
    }

    fn arb_product() -> impl Strategy<Value = Product> {
        (
            0u64..1000,
            "[a-zA-Z ]{0,12}",
            prop::sample::select(vec!["Denso", "AISIN", "Bosch", ""]),
            prop::sample::select(vec!["Filtration", "Brake System", "Car Care"]),
            0.0f64..200.0,
        )
            .prop_map(|(id, name, brand, category, price)| product(id, &name, brand, category, price))
    }

    fn arb_state() -> impl Strategy<Value = FilterState> {
        (
            prop::option::of(prop::sample::select(vec!["denso", "aisin", "unknown"])),
            prop::option::of(prop::sample::select(vec!["filtration", "brake-system"])),
            prop::option::of((0.0f64..200.0, 0.0f64..200.0)),
            "[a-z]{0,3}",
        )
            .prop_map(|(brand, category, range, query)| {
                let mut state = FilterState::new().with_search_query(query);
                if let Some(brand) = brand {
                    state.set_brand(brand, true);
                }
                if let Some(category) = category {
                    state.set_category(category, true);
                }
                if let Some((a, b)) = range {
                    state = state.with_price_range(a, b);
                }
                state
            })
    }

    proptest! {
        #[test]
        fn filtered_count_never_exceeds_total(
            state in arb_state(),
            catalog in prop::collection::vec(arb_product(), 0..30),
        ) {
            let result = apply_filters(&state, &catalog);
            prop_assert!(result.filtered_count() <= result.total_count);
            prop_assert_eq!(result.total_count, catalog.len());
        }

        #[test]
        fn result_is_an_ordered_subsequence(
            state in arb_state(),
            catalog in prop::collection::vec(arb_product(), 0..30),
        ) {
            let result = apply_filters(&state, &catalog);
            let mut rest = catalog.iter();
            for kept in &result.products {
                prop_assert!(rest.any(|p| p == kept));
                prop_assert!(matches_all(&state, kept));
            }
        }

        #[test]
        fn brand_membership_matches_selection(
            brand in prop::sample::select(vec!["denso", "aisin", "bosch"]),
            catalog in prop::collection::vec(arb_product(), 0..30),
        ) {
            let state = FilterState::new().with_brand(brand);
            let result = apply_filters(&state, &catalog);
            let expected = catalog.iter().filter(|p| p.brand_slug() == brand).count();
            prop_assert_eq!(result.filtered_count(), expected);
        }
    }
}
