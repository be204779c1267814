//! Product listing with filters, search and result count.

use common::catalog::CatalogIndex;
use common::facets::FacetCountMode;
use common::filter_state::FilterState;
use common::render::PriceFormat;
use common::store_const::PRODUCTS_PER_PAGE;
use dioxus::prelude::*;

use crate::api::store_api::{currency_prefix, load_catalog};
use crate::components::error_boundary::{log_load_failure, CatalogUnavailable};
use crate::components::shop_components::filter_sidebar::FilterSidebar;
use crate::components::shop_components::product_results::ProductResults;
use crate::components::shop_components::search_bar::ShopSearchBar;
use crate::components::shop_components::ShopContext;
use crate::components::suspend_boundary::SuspendWrapper;
use crate::data_definitions::url_param::UrlParam;

#[component]
pub fn ShopPage(filters: UrlParam<FilterState>) -> Element {
    rsx! {
        Title { "Shop - Al-Saji Auto Parts" }
        SuspendWrapper {
            message: "Loading catalog...",
            ShopCatalogLoader { filters: filters.0.clone() }
        }
    }
}

#[component]
fn ShopCatalogLoader(filters: ReadSignal<FilterState>) -> Element {
    let loaded = use_resource(move || async move {
        let loaded = async {
            let catalog = load_catalog().await?;
            let prefix = currency_prefix().await?;
            Ok::<_, ServerFnError>((catalog, PriceFormat::with_prefix(prefix)))
        }
        .await;
        log_load_failure("catalog", loaded)
    })
    .suspend()?
    .cloned();

    match loaded {
        Ok((catalog, money)) => rsx! { ShopRoot { catalog, money, filters } },
        Err(e) => rsx! { CatalogUnavailable { error_txt: format!("{:#?}", e) } },
    }
}

#[component]
fn ShopRoot(catalog: CatalogIndex, money: PriceFormat, filters: ReadSignal<FilterState>) -> Element {
    let mut shop = use_context_provider(move || ShopContext {
        catalog: Signal::new(catalog),
        money: Signal::new(money),
        filters: Signal::new(filters.peek().clone()),
        count_mode: Signal::new(FacetCountMode::default()),
        visible: Signal::new(PRODUCTS_PER_PAGE),
    });
    // the route prop changes on back/forward; the context does not reset by itself
    use_effect(move || {
        let from_url = filters.read().clone();
        if from_url != *shop.filters.peek() {
            shop.visible.set(PRODUCTS_PER_PAGE);
            shop.filters.set(from_url);
        }
    });

    rsx! {
        div {
            id: "x-shop-page",
            style: "display: flex; flex-direction: row; gap: 24px; padding: 24px;",
            div {
                id: "x-shop-sidebar",
                style: "width: 280px; flex-shrink: 0;",
                FilterSidebar {}
            }
            div {
                id: "x-shop-main",
                style: "flex-grow: 1; min-width: 0;",
                ShopSearchBar {}
                ProductResults {}
            }
        }
    }
}
