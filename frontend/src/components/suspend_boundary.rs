use dioxus::prelude::*;

use crate::components::error_boundary::ComponentErrorBoundary;

#[component]
pub fn SuspendWrapper(#[props(default = "Loading...".to_string())] message: String, children: Element) -> Element {
    rsx! {
        SuspenseBoundary {
            fallback: move |_s: SuspenseContext| rsx! {
                div {
                    style: "width: 100%; display: flex; justify-content: center; padding: 40px 0;",
                    LoadingIndicator { message: message.clone() }
                }
            },
            ComponentErrorBoundary {
                children
            }
        }
    }
}

#[component]
pub fn LoadingIndicator(#[props(default = "Loading...".to_string())] message: String) -> Element {
    rsx! {
        div {
            class: "loading-indicator",
            span { class: "loading-spinner" }
            "{message}"
        }
    }
}
