//! Delivery details and order submission.

use common::order::{CustomerDetails, OrderConfirmation};
use dioxus::prelude::*;

use crate::api::store_api::place_order;
use crate::components::toasts::{toast_error, toast_info, toast_success};
use crate::data_definitions::store_state::use_store;

const PAYMENT_METHODS: [(&str, &str); 2] = [("cash_on_delivery", "Cash on delivery"), ("card_on_delivery", "Card on delivery")];

fn missing_fields(customer: &CustomerDetails) -> Vec<&'static str> {
    [
        ("full name", customer.full_name.as_str()),
        ("phone", customer.phone.as_str()),
        ("address", customer.address.as_str()),
        ("city", customer.city.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect()
}

#[component]
pub fn CheckoutForm(on_confirmed: Callback<OrderConfirmation>) -> Element {
    let store = use_store();
    let mut customer = use_signal(CustomerDetails::default);
    let mut payment = use_signal(|| PAYMENT_METHODS[0].0.to_string());
    let mut submitting = use_signal(|| false);

    let submit = move |event: Event<FormData>| {
        event.prevent_default();
        if submitting() {
            return;
        }
        let details = customer.peek().clone();
        let missing = missing_fields(&details);
        if !missing.is_empty() {
            toast_info("Missing details", &format!("Please fill in: {}", missing.join(", ")));
            return;
        }
        let cart = store.cart.peek().clone();
        if cart.is_empty() {
            toast_info("Your cart is empty", "Add some parts before checking out.");
            return;
        }
        submitting.set(true);
        let payment = payment.peek().clone();
        spawn(async move {
            match place_order(cart, details, payment).await {
                Ok(confirmation) => {
                    toast_success("Order received", &confirmation.message);
                    on_confirmed.call(confirmation);
                    store.update_cart(|cart| cart.clear());
                }
                Err(e) => {
                    dioxus::logger::tracing::error!("order failed: {e}");
                    toast_error("Order failed", "We could not submit your order. Your cart was kept.");
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        form {
            class: "checkout-form",
            onsubmit: submit,
            h3 { "Delivery details" }
            CheckoutField { label: "Full name", value: customer.read().full_name.clone(), oninput: move |v: String| customer.write().full_name = v }
            CheckoutField { label: "Email", input_type: "email", value: customer.read().email.clone(), oninput: move |v: String| customer.write().email = v }
            CheckoutField { label: "Phone", input_type: "tel", value: customer.read().phone.clone(), oninput: move |v: String| customer.write().phone = v }
            CheckoutField { label: "Address", value: customer.read().address.clone(), oninput: move |v: String| customer.write().address = v }
            CheckoutField { label: "City", value: customer.read().city.clone(), oninput: move |v: String| customer.write().city = v }
            CheckoutField { label: "Area", value: customer.read().area.clone(), oninput: move |v: String| customer.write().area = v }
            label {
                class: "checkout-field",
                span { "Notes" }
                textarea {
                    value: "{customer.read().notes}",
                    oninput: move |e: Event<FormData>| customer.write().notes = e.value(),
                }
            }
            label {
                class: "checkout-field",
                span { "Payment" }
                select {
                    value: "{payment}",
                    onchange: move |e: Event<FormData>| payment.set(e.value()),
                    for (value, label) in PAYMENT_METHODS {
                        option { value, "{label}" }
                    }
                }
            }
            button {
                class: "store-button",
                r#type: "submit",
                disabled: submitting(),
                if submitting() { "Placing order..." } else { "Place order" }
            }
        }
    }
}

#[component]
fn CheckoutField(
    label: String,
    #[props(default = "text".to_string())] input_type: String,
    value: String,
    oninput: Callback<String>,
) -> Element {
    rsx! {
        label {
            class: "checkout-field",
            span { "{label}" }
            input {
                r#type: "{input_type}",
                value: "{value}",
                oninput: move |e: Event<FormData>| oninput.call(e.value()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_delivery_fields_are_reported() {
        let mut customer = CustomerDetails { full_name: "Ali".to_string(), city: " ".to_string(), ..Default::default() };
        assert_eq!(missing_fields(&customer), vec!["phone", "address", "city"]);

        customer.phone = "0770".to_string();
        customer.address = "Street 1".to_string();
        customer.city = "Baghdad".to_string();
        assert!(missing_fields(&customer).is_empty());
    }
}
