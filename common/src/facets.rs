//! Sidebar option lists built from the catalog's facet buckets.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogIndex, FacetBucket, PriceBucket};
use crate::filter_engine::{matches_all_except, Facet};
use crate::filter_state::{FilterState, PriceRange};

/// How category and brand counts are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FacetCountMode {
    /// Counts from the index build, over the whole catalog.
    #[default]
    Catalog,
    /// Counts over products that pass every other active filter.
    Filtered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetOption {
    pub name: String,
    pub slug: String,
    pub count: u64,
    pub selected: bool,
    /// Selected in the state but absent from the index.
    pub missing: bool,
}

impl FacetOption {
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceOption {
    pub range: PriceRange,
    pub label: String,
    pub count: u64,
    pub selected: bool,
}

impl PriceOption {
    pub fn option_label(&self) -> String {
        format!("{} ({})", self.label, self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FacetSummary {
    pub categories: Vec<FacetOption>,
    pub brands: Vec<FacetOption>,
    pub price_ranges: Vec<PriceOption>,
}

impl FacetSummary {
    pub fn from_index(index: &CatalogIndex, state: &FilterState, mode: FacetCountMode) -> Self {
        let recount = |facet: Facet, buckets: &[FacetBucket]| -> Vec<u64> {
            match mode {
                FacetCountMode::Catalog => buckets.iter().map(|b| b.count).collect(),
                FacetCountMode::Filtered => {
                    let candidates: Vec<_> =
                        index.products.iter().filter(|p| matches_all_except(state, p, facet)).collect();
                    buckets
                        .iter()
                        .map(|b| {
                            candidates
                                .iter()
                                .filter(|p| match facet {
                                    Facet::Category => p.category_slug() == b.slug,
                                    Facet::Brand => p.brand_slug() == b.slug,
                                })
                                .count() as u64
                        })
                        .collect()
                }
            }
        };

        let categories = facet_options(&index.categories, recount(Facet::Category, &index.categories), state.categories());
        let brands = facet_options(&index.brands, recount(Facet::Brand, &index.brands), state.brands());
        let price_ranges = price_options(&index.price_ranges, state.price_range());

        Self { categories, brands, price_ranges }
    }
}

fn facet_options(
    buckets: &[FacetBucket],
    counts: Vec<u64>,
    selected: &std::collections::BTreeSet<String>,
) -> Vec<FacetOption> {
    let mut options: Vec<FacetOption> = buckets
        .iter()
        .zip(counts)
        .map(|(bucket, count)| FacetOption {
            name: bucket.name.clone(),
            slug: bucket.slug.clone(),
            count,
            selected: selected.contains(&bucket.slug),
            missing: false,
        })
        .collect();

    // keep stale selections visible so they can be unchecked
    for slug in selected {
        if !options.iter().any(|o| &o.slug == slug) {
            options.push(FacetOption { name: slug.clone(), slug: slug.clone(), count: 0, selected: true, missing: true });
        }
    }
    options
}

fn price_options(buckets: &[PriceBucket], selected: Option<PriceRange>) -> Vec<PriceOption> {
    buckets
        .iter()
        .map(|bucket| {
            let range = PriceRange::from_bucket(bucket);
            PriceOption { range, label: bucket.label.clone(), count: bucket.count, selected: selected == Some(range) }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_engine::tests::sample_catalog;
    use pretty_assertions::assert_eq;

    fn sample_index() -> CatalogIndex {
        CatalogIndex {
            categories: vec![FacetBucket::new("Filtration", 1), FacetBucket::new("Brake System", 1)],
            brands: vec![FacetBucket::new("Denso", 1), FacetBucket::new("AISIN", 1)],
            price_ranges: vec![
                PriceBucket { min: 9.5, max: 14.5, count: 1, label: "$9.50 - $14.50".to_string() },
                PriceBucket { min: 34.51, max: 39.51, count: 1, label: "$34.51 - $39.51".to_string() },
            ],
            products: sample_catalog(),
            ..Default::default()
        }
    }

    #[test]
    fn catalog_mode_keeps_build_time_counts() {
        let state = FilterState::new().with_brand("denso");
        let summary = FacetSummary::from_index(&sample_index(), &state, FacetCountMode::Catalog);

        let labels: Vec<String> = summary.categories.iter().map(FacetOption::label).collect();
        assert_eq!(labels, vec!["Filtration (1)", "Brake System (1)"]);
        assert!(summary.brands[0].selected);
        assert!(!summary.brands[1].selected);
    }

    #[test]
    fn filtered_mode_counts_against_other_predicates() {
        let state = FilterState::new().with_brand("denso");
        let summary = FacetSummary::from_index(&sample_index(), &state, FacetCountMode::Filtered);

        let category_counts: Vec<u64> = summary.categories.iter().map(|o| o.count).collect();
        assert_eq!(category_counts, vec![1, 0]);
        // brand counts ignore the brand selection itself
        let brand_counts: Vec<u64> = summary.brands.iter().map(|o| o.count).collect();
        assert_eq!(brand_counts, vec![1, 1]);
        assert_eq!(summary.price_ranges[1].count, 1);
    }

    #[test]
    fn unknown_selection_is_listed_with_zero_count() {
        let state = FilterState::new().with_category("Body Parts");
        let summary = FacetSummary::from_index(&sample_index(), &state, FacetCountMode::Catalog);

        let last = summary.categories.last().unwrap();
        assert_eq!((last.slug.as_str(), last.count, last.selected, last.missing), ("body-parts", 0, true, true));
    }

    #[test]
    fn price_option_selection_follows_state() {
        let state = FilterState::new().with_price_range(34.51, 39.51);
        let summary = FacetSummary::from_index(&sample_index(), &state, FacetCountMode::Catalog);
        assert!(!summary.price_ranges[0].selected);
        assert!(summary.price_ranges[1].selected);
        assert_eq!(summary.price_ranges[1].option_label(), "$34.51 - $39.51 (1)");
    }
}
