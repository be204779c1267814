//! Error boundaries and the panels they render.

use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                rsx! {
                    div {
                        class: "store-error-page",
                        h1 { "Something went wrong" }
                        p { "Section: {boundary_name}" }
                        Link { to: Route::HomePage {}, "Back to the store" }
                        pre { "{err:#?}" }
                    }
                }
            },
            children
        }
    }
}

#[component]
pub fn ComponentErrorBoundary(children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: |err: ErrorContext| {
                let error_txt = match err.error() {
                    Some(e) => format!("{:#?}", e.0),
                    None => "Unknown error".to_string(),
                };
                rsx! {
                    ComponentErrorDisplay {
                        error_txt,
                        button {
                            class: "store-button",
                            onclick: move |_| err.clear_errors(),
                            "Try Again"
                        }
                    }
                }
            },
            div {
                width: "100%",
                {children}
            }
        }
    }
}

#[component]
pub fn ComponentErrorDisplay(error_txt: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        div {
            class: "store-error-panel",
            h2 { "Could not load this section" }
            pre { "{error_txt}" }
            {children}
        }
    }
}

/// Logs a failed catalog load once, where the load happens, and passes the result on.
pub fn log_load_failure<T>(what: &str, loaded: Result<T, ServerFnError>) -> Result<T, ServerFnError> {
    if let Err(e) = &loaded {
        dioxus::logger::tracing::error!("{what} unavailable: {e}");
    }
    loaded
}

/// Shown instead of the shop when the product catalog cannot be read.
#[component]
pub fn CatalogUnavailable(error_txt: ReadSignal<String>) -> Element {
    rsx! {
        div {
            class: "store-error-panel",
            h2 { "Our catalog is temporarily unavailable" }
            p { "Please refresh the page in a few minutes." }
            details {
                summary { "Details" }
                pre { "{error_txt}" }
            }
        }
    }
}
