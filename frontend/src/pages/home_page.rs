use common::filter_state::FilterState;
use common::render::{PriceFormat, ProductCard};
use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::MdSearch;
use dioxus_free_icons::icons::md_maps_icons::MdDirectionsCar;
use dioxus_free_icons::Icon;

use crate::api::store_api::{currency_prefix, featured_products, top_categories};
use crate::components::error_boundary::ComponentErrorDisplay;
use crate::components::shop_components::product_card::ShopProductCard;
use crate::components::suspend_boundary::SuspendWrapper;
use crate::routes::Route;

/// Home page
#[component]
pub fn HomePage() -> Element {
    rsx! {
        Title { "Al-Saji Auto Parts" }
        div {
            id: "x-home-container",
            style: "
                display: flex;
                flex-direction: column;
                gap: 28px;
                padding: 36px 40px;
                background: #F5F6F8;
            ",
            div {
                h1 { style: "margin: 0; font-size: 40px; color: #1C212D;", "Genuine parts for your car" }
                p { style: "margin: 8px 0 0; color: #4B5563;", "Search thousands of parts or find what fits your vehicle." }
            }
            div {
                style: "display: flex; flex-direction: row; gap: 20px; flex-wrap: wrap;",
                QuickSearchCard {}
                VehicleFinderCard {}
            }
            h2 { "Shop by category" }
            SuspendWrapper {
                CategoryTiles {}
            }
            h2 { "Featured parts" }
            SuspendWrapper {
                message: "Loading featured parts...",
                FeaturedProducts {}
            }
        }
    }
}

#[component]
fn QuickSearchCard() -> Element {
    let mut query = use_signal(String::new);
    let go = move || {
        navigator().push(Route::shop_page(FilterState::new().with_search_query(query.peek().clone())));
    };
    rsx! {
        div {
            class: "home-card",
            h3 { "Find a part" }
            div {
                class: "shop-search-bar",
                Icon { icon: MdSearch, style: "width: 20px; height: 20px; color: #6B7280;" }
                input {
                    r#type: "text",
                    placeholder: "Oil filter, brake pads, ...",
                    value: "{query}",
                    oninput: move |e: Event<FormData>| query.set(e.value()),
                    onkeydown: move |e: Event<KeyboardData>| {
                        if e.key() == Key::Enter {
                            go();
                        }
                    },
                }
            }
            button { class: "store-button", onclick: move |_| go(), "Search" }
        }
    }
}

#[component]
fn VehicleFinderCard() -> Element {
    rsx! {
        div {
            class: "home-card",
            h3 { "Shop by vehicle" }
            p { "Pick your make, model and year to see compatible parts." }
            Link {
                to: Route::VehiclePage {},
                class: "store-button",
                Icon { icon: MdDirectionsCar, style: "width: 20px; height: 20px;" }
                "Choose vehicle"
            }
        }
    }
}

#[component]
fn CategoryTiles() -> Element {
    let categories = use_resource(move || top_categories(8)).suspend()?.cloned();
    let categories = match categories {
        Ok(c) => c,
        Err(e) => return rsx! { ComponentErrorDisplay { error_txt: format!("{:#?}", e) } },
    };
    rsx! {
        div {
            class: "category-tiles",
            for category in categories {
                Link {
                    key: "{category.slug}",
                    class: "category-tile",
                    to: Route::shop_page(FilterState::new().with_category(&category.slug)),
                    span { "{category.name}" }
                    span { class: "facet-count", "{category.count} parts" }
                }
            }
        }
    }
}

#[component]
fn FeaturedProducts() -> Element {
    let featured = use_resource(move || async move {
        let products = featured_products().await?;
        let prefix = currency_prefix().await?;
        Ok::<_, ServerFnError>((products, PriceFormat::with_prefix(prefix)))
    })
    .suspend()?
    .cloned();
    let (products, money) = match featured {
        Ok(x) => x,
        Err(e) => return rsx! { ComponentErrorDisplay { error_txt: format!("{:#?}", e) } },
    };
    rsx! {
        div {
            class: "product-grid",
            for product in products.iter() {
                ShopProductCard { key: "{product.id}", card: ProductCard::from_product(product, &money) }
            }
        }
    }
}
