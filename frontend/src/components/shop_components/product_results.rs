use common::render::{render_results, ResultBody};
use common::store_const::PRODUCTS_PER_PAGE;
use dioxus::prelude::*;

use crate::components::shop_components::product_card::ShopProductCard;
use crate::components::shop_components::use_shop;

#[component]
pub fn ProductResults() -> Element {
    let mut shop = use_shop();
    let filtered = use_memo(move || shop.catalog.read().apply_filters(&shop.filters.read()));
    let rendered = use_memo(move || {
        let total = shop.catalog.read().total_products();
        render_results(&filtered.read().products, total, &shop.money.read())
    });
    let visible = use_memo(move || *shop.visible.read());

    let rendered = rendered.read();
    rsx! {
        div {
            class: "product-results",
            p { class: "results-count", "{rendered.summary}" }
            match &rendered.body {
                ResultBody::Empty { message } => rsx! {
                    div {
                        class: "no-results",
                        p { "{message}" }
                        button {
                            class: "store-button",
                            onclick: move |_| shop.update_filters(|f| f.clear()),
                            "Clear filters"
                        }
                    }
                },
                ResultBody::Cards(cards) => {
                    let remaining = cards.len().saturating_sub(visible());
                    rsx! {
                        div {
                            class: "product-grid",
                            for card in cards.iter().take(visible()).cloned() {
                                ShopProductCard { key: "{card.id}", card }
                            }
                        }
                        if remaining > 0 {
                            div {
                                style: "display: flex; justify-content: center; margin: 24px 0;",
                                button {
                                    class: "store-button",
                                    onclick: move |_| *shop.visible.write() += PRODUCTS_PER_PAGE,
                                    "Load more ({remaining} remaining)"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
