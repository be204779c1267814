use common::cart::CartLine;
use common::render::PriceFormat;
use common::store_const::MAX_LINE_QUANTITY;
use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::MdDelete;
use dioxus_free_icons::icons::md_content_icons::{MdAdd, MdRemove};
use dioxus_free_icons::Icon;

use crate::components::toasts::toast_error;
use crate::data_definitions::store_state::use_store;

#[component]
pub fn CartLines(money: ReadSignal<PriceFormat>) -> Element {
    let store = use_store();
    let lines = use_memo(move || store.cart.read().items().to_vec());

    rsx! {
        div {
            class: "cart-lines",
            for line in lines.read().iter().cloned() {
                CartLineRow { key: "{line.line_id}", line, money }
            }
        }
    }
}

#[component]
fn CartLineRow(line: ReadSignal<CartLine>, money: ReadSignal<PriceFormat>) -> Element {
    let store = use_store();
    let set_quantity = move |quantity: u32| {
        let line_id = line.read().line_id;
        if let Err(e) = store.update_cart(|cart| cart.update_quantity(line_id, quantity)) {
            toast_error("Could not update cart", &e.to_string());
        }
    };
    let remove = move |_: Event<MouseData>| {
        let line_id = line.read().line_id;
        if let Err(e) = store.update_cart(|cart| cart.remove(line_id)) {
            toast_error("Could not update cart", &e.to_string());
        }
    };

    let line = line.read();
    let quantity = line.quantity;
    let money = money.read();
    rsx! {
        div {
            class: "cart-line",
            match &line.image_url {
                Some(url) => rsx! { img { class: "cart-line-image", src: "{url}", alt: "{line.name}" } },
                None => rsx! { div { class: "cart-line-image product-image-placeholder" } },
            }
            div {
                class: "cart-line-info",
                p { class: "cart-line-name", "{line.name}" }
                p { class: "cart-line-price", "{money.format(line.unit_price)} each" }
            }
            div {
                class: "quantity-stepper",
                button {
                    class: "icon-button",
                    onclick: move |_| set_quantity(quantity - 1),
                    Icon { icon: MdRemove, style: "width: 16px; height: 16px;" }
                }
                span { "{quantity}" }
                button {
                    class: "icon-button",
                    disabled: quantity >= MAX_LINE_QUANTITY,
                    onclick: move |_| set_quantity(quantity + 1),
                    Icon { icon: MdAdd, style: "width: 16px; height: 16px;" }
                }
            }
            div { class: "cart-line-subtotal", "{money.format(line.subtotal)}" }
            button {
                class: "icon-button",
                title: "Remove",
                onclick: remove,
                Icon { icon: MdDelete, style: "width: 18px; height: 18px;" }
            }
        }
    }
}
