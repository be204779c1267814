use common::filter_state::FilterState;
use common::order::OrderConfirmation;
use common::render::PriceFormat;
use common::store_const::SHIPPING_FEE;
use dioxus::prelude::*;

use crate::api::store_api::currency_prefix;
use crate::components::cart_components::cart_lines::CartLines;
use crate::components::cart_components::checkout_form::CheckoutForm;
use crate::data_definitions::store_state::use_store;
use crate::routes::Route;

#[component]
pub fn CartPage() -> Element {
    let store = use_store();
    let mut confirmation = use_signal(|| None::<OrderConfirmation>);
    // the prefix only decorates prices; fall back to the default while it loads
    let prefix = use_resource(currency_prefix);
    let money = use_memo(move || match &*prefix.read() {
        Some(Ok(prefix)) => PriceFormat::with_prefix(prefix.clone()),
        _ => PriceFormat::default(),
    });
    let is_empty = use_memo(move || store.cart.read().is_empty());

    rsx! {
        Title { "Your cart" }
        div {
            style: "padding: 24px 40px; display: flex; flex-direction: column; gap: 20px;",
            h1 { "Your cart" }
            if let Some(done) = confirmation() {
                OrderConfirmed { confirmation: done }
            } else if is_empty() {
                div {
                    class: "no-results",
                    p { "Your cart is empty." }
                    Link { to: Route::shop_page(FilterState::new()), class: "store-button", "Browse parts" }
                }
            } else {
                div {
                    style: "display: flex; flex-direction: row; gap: 32px; flex-wrap: wrap;",
                    div {
                        style: "flex: 2; min-width: 360px;",
                        CartLines { money }
                        CartTotals { money }
                    }
                    div {
                        style: "flex: 1; min-width: 300px;",
                        CheckoutForm { on_confirmed: move |c: OrderConfirmation| confirmation.set(Some(c)) }
                    }
                }
            }
        }
    }
}

#[component]
fn CartTotals(money: ReadSignal<PriceFormat>) -> Element {
    let store = use_store();
    let cart = store.cart.read();
    let money = money.read();
    rsx! {
        div {
            class: "cart-totals",
            p { "Items: {cart.item_count()}" }
            p { "Subtotal: {money.format(cart.total())}" }
            p { "Shipping: {money.format(SHIPPING_FEE)}" }
            p { class: "cart-grand-total", "Total: {money.format(cart.total() + SHIPPING_FEE)}" }
            button {
                class: "link-button",
                onclick: move |_| store.update_cart(|cart| cart.clear()),
                "Empty cart"
            }
        }
    }
}

#[component]
fn OrderConfirmed(confirmation: ReadSignal<OrderConfirmation>) -> Element {
    let confirmation = confirmation.read();
    rsx! {
        div {
            class: "order-confirmed",
            h2 { "Thank you!" }
            p { "Order number: {confirmation.order_number}" }
            p { "{confirmation.message}" }
            if confirmation.odoo_order_id.is_none() {
                p { class: "results-count", "Our team will contact you to confirm the order." }
            }
            Link { to: Route::shop_page(FilterState::new()), class: "store-button", "Continue shopping" }
        }
    }
}
