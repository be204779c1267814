use dioxus::prelude::*;

use crate::api::store_api::add_to_cart;
use crate::components::toasts::{toast_error, toast_success};
use crate::data_definitions::store_state::use_store;

/// Checks the product with the store, then adds it to the local cart.
#[component]
pub fn AddToCartButton(
    product_id: u64,
    #[props(default = 1)] quantity: u32,
    #[props(default = false)] disabled: bool,
    children: Element,
) -> Element {
    let store = use_store();
    let mut busy = use_signal(|| false);

    let onclick = move |_: Event<MouseData>| {
        if busy() {
            return;
        }
        busy.set(true);
        spawn(async move {
            match add_to_cart(product_id, quantity).await {
                Ok(product) => match store.update_cart(|cart| cart.add(&product, quantity).map(|line| line.quantity)) {
                    Ok(in_cart) => toast_success("Added to cart", &format!("{} (x{in_cart} in cart)", product.name)),
                    Err(e) => toast_error("Could not add to cart", &e.to_string()),
                },
                Err(e) => {
                    dioxus::logger::tracing::warn!("add to cart failed for {product_id}: {e}");
                    toast_error("Could not add to cart", "The product could not be checked. Please try again.");
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        button {
            class: "add-to-cart-button",
            disabled: disabled || busy(),
            onclick,
            {children}
        }
    }
}
