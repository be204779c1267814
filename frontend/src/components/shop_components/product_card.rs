use common::render::{ProductCard, StockStatus};
use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::MdAddShoppingCart;
use dioxus_free_icons::Icon;

use crate::components::cart_components::add_to_cart_button::AddToCartButton;

/// A rendered card plus the cart button. The card markup is produced by the
/// shared renderer, which escapes every catalog-provided field.
#[component]
pub fn ShopProductCard(card: ReadSignal<ProductCard>) -> Element {
    let html = use_memo(move || card.read().to_html());
    let card = card.read();
    let in_stock = card.stock == StockStatus::InStock;

    rsx! {
        div {
            class: "product-card-wrapper",
            div { dangerous_inner_html: "{html}" }
            AddToCartButton {
                product_id: card.id,
                disabled: !in_stock,
                Icon { icon: MdAddShoppingCart, style: "width: 18px; height: 18px;" }
                if in_stock { "Add to cart" } else { "Unavailable" }
            }
        }
    }
}
