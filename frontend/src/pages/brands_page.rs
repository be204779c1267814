//! Brand directory: every brand in the catalog, searchable, each linking to
//! the shop filtered by that brand.

use common::catalog::FacetBucket;
use common::debounce::Debouncer;
use common::filter_state::FilterState;
use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::MdSearch;
use dioxus_free_icons::Icon;
use gloo_timers::future::TimeoutFuture;

use crate::api::store_api::load_catalog;
use crate::components::error_boundary::{log_load_failure, CatalogUnavailable};
use crate::components::suspend_boundary::SuspendWrapper;
use crate::routes::Route;

fn matching_brands(brands: &[FacetBucket], query: &str) -> Vec<FacetBucket> {
    let query = query.trim().to_lowercase();
    brands
        .iter()
        .filter(|b| query.is_empty() || b.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

#[component]
pub fn BrandsPage() -> Element {
    rsx! {
        Title { "Brands - Al-Saji Auto Parts" }
        div {
            style: "padding: 24px 40px; display: flex; flex-direction: column; gap: 20px;",
            h1 { "Our brands" }
            SuspendWrapper {
                message: "Loading brands...",
                BrandDirectory {}
            }
        }
    }
}

#[component]
fn BrandDirectory() -> Element {
    let brands = use_resource(move || async move { log_load_failure("brand list", load_catalog().await.map(|c| c.brands)) })
        .suspend()?
        .cloned();
    match brands {
        Ok(brands) => rsx! { BrandGrid { brands } },
        Err(e) => rsx! { CatalogUnavailable { error_txt: format!("{:#?}", e) } },
    }
}

#[component]
fn BrandGrid(brands: ReadSignal<Vec<FacetBucket>>) -> Element {
    let mut text = use_signal(String::new);
    let mut query = use_signal(String::new);
    let mut debouncer = use_signal(Debouncer::new);
    let shown = use_memo(move || matching_brands(&brands.read(), &query.read()));

    let search_oninput = move |event: Event<FormData>| {
        let value = event.value();
        text.set(value.clone());
        let ticket = debouncer.write().schedule();
        let delay = debouncer.peek().delay_ms();
        spawn(async move {
            TimeoutFuture::new(delay as u32).await;
            if debouncer.peek().is_current(ticket) {
                query.set(value);
            }
        });
    };

    rsx! {
        div {
            class: "shop-search-bar",
            style: "max-width: 480px;",
            Icon { icon: MdSearch, style: "width: 20px; height: 20px; color: #6B7280;" }
            input {
                r#type: "text",
                placeholder: "Search brands",
                value: "{text}",
                oninput: search_oninput,
            }
        }
        if shown.read().is_empty() {
            p { class: "no-results", "No brands match \"{query}\"." }
        }
        div {
            class: "category-tiles",
            for brand in shown.read().iter() {
                Link {
                    key: "{brand.slug}",
                    class: "category-tile",
                    to: Route::shop_page(FilterState::new().with_brand(&brand.slug)),
                    span { "{brand.name}" }
                    span { class: "facet-count", "{brand.count} parts" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_search_is_case_insensitive() {
        let brands = vec![FacetBucket::new("Denso", 4), FacetBucket::new("AISIN", 2), FacetBucket::new("Bosch", 1)];
        let names = |query: &str| matching_brands(&brands, query).into_iter().map(|b| b.name).collect::<Vec<_>>();

        assert_eq!(names(""), vec!["Denso", "AISIN", "Bosch"]);
        assert_eq!(names("  ais "), vec!["AISIN"]);
        assert_eq!(names("o"), vec!["Denso", "Bosch"]);
        assert!(names("toyota").is_empty());
    }
}
