//! Sign-in with Odoo credentials. Only the resulting session is kept.

use common::account::{LoginRequest, SessionInfo};
use dioxus::prelude::*;

use crate::api::store_api::{login, logout};
use crate::components::toasts::{toast_error, toast_info, toast_success};
use crate::data_definitions::store_state::use_store;

#[component]
pub fn AccountPage() -> Element {
    let store = use_store();
    let session = use_memo(move || store.active_session());

    rsx! {
        Title { "Your account" }
        div {
            style: "padding: 24px 40px; max-width: 480px;",
            h1 { "Your account" }
            match session() {
                Some(session) => rsx! { SignedIn { session } },
                None => rsx! { LoginForm {} },
            }
        }
    }
}

#[component]
fn LoginForm() -> Element {
    let store = use_store();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let submit = move |event: Event<FormData>| {
        event.prevent_default();
        if busy() {
            return;
        }
        let request = LoginRequest { email: email.peek().trim().to_string(), password: password.peek().clone() };
        if request.email.is_empty() || request.password.is_empty() {
            toast_info("Missing details", "Please enter your email and password.");
            return;
        }
        busy.set(true);
        spawn(async move {
            match login(request).await {
                Ok(session) => {
                    password.set(String::new());
                    toast_success("Signed in", &format!("Welcome back, {}", session.username));
                    store.set_session(Some(session));
                }
                Err(e) => {
                    dioxus::logger::tracing::warn!("login failed: {e}");
                    toast_error("Sign in failed", "Check your email and password and try again.");
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        form {
            class: "checkout-form",
            onsubmit: submit,
            label {
                class: "checkout-field",
                span { "Email" }
                input {
                    r#type: "email",
                    value: "{email}",
                    oninput: move |e: Event<FormData>| email.set(e.value()),
                }
            }
            label {
                class: "checkout-field",
                span { "Password" }
                input {
                    r#type: "password",
                    value: "{password}",
                    oninput: move |e: Event<FormData>| password.set(e.value()),
                }
            }
            button {
                class: "store-button",
                r#type: "submit",
                disabled: busy(),
                if busy() { "Signing in..." } else { "Sign in" }
            }
        }
    }
}

#[component]
fn SignedIn(session: ReadSignal<SessionInfo>) -> Element {
    let store = use_store();
    let sign_out = move |_: Event<MouseData>| {
        let session = session.read().clone();
        spawn(async move {
            if let Err(e) = logout(session).await {
                dioxus::logger::tracing::warn!("logout failed: {e}");
            }
            // forget the session locally even when the server call failed
            toast_info("Signed out", "See you soon.");
            store.set_session(None);
        });
    };

    rsx! {
        div {
            class: "home-card",
            p { "Signed in as " strong { "{session.read().username}" } }
            button { class: "store-button", onclick: sign_out, "Sign out" }
        }
    }
}
