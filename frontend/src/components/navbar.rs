//! Top navigation bar shared by every page.

use common::filter_state::FilterState;
use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::{MdHome, MdLabel, MdShoppingCart, MdStore};
use dioxus_free_icons::icons::md_maps_icons::MdDirectionsCar;
use dioxus_free_icons::icons::md_social_icons::MdPerson;
use dioxus_free_icons::{Icon, IconShape};

use crate::components::error_boundary::GlobalErrorBoundary;
use crate::data_definitions::store_state::use_store;
use crate::routes::Route;

#[component]
pub fn Navbar() -> Element {
    rsx! {
        div {
            id: "x-nav-container",
            style: "display: flex; flex-direction: column; min-height: 100vh;",

            div {
                id: "x-nav-topbar",
                style: "
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 24px;
                    height: 64px;
                    padding: 0 24px;
                    background-color: #1C212D;
                    color: white;
                ",
                Link {
                    to: Route::HomePage {},
                    class: "store-logo",
                    "Al-Saji Auto Parts"
                }
                div { style: "flex-grow: 1;" }
                IconLink { to: Route::HomePage {}, icon: MdHome, label: "Home" }
                IconLink { to: Route::shop_page(FilterState::new()), icon: MdStore, label: "Shop" }
                IconLink { to: Route::BrandsPage {}, icon: MdLabel, label: "Brands" }
                IconLink { to: Route::VehiclePage {}, icon: MdDirectionsCar, label: "My Vehicle" }
                CartLink {}
                AccountLink {}
            }

            div {
                id: "x-page-container",
                style: "flex-grow: 1;",
                GlobalErrorBoundary {
                    boundary_name: "Navbar".to_string(),
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
fn CartLink() -> Element {
    let store = use_store();
    let item_count = use_memo(move || store.cart.read().item_count());
    rsx! {
        Link {
            to: Route::CartPage {},
            class: "nav-link",
            Icon { icon: MdShoppingCart, style: "width: 24px; height: 24px;" }
            "Cart"
            if item_count() > 0 {
                span { class: "cart-badge", "{item_count}" }
            }
        }
    }
}

#[component]
fn AccountLink() -> Element {
    let store = use_store();
    let label = use_memo(move || match store.session.read().as_ref() {
        Some(session) => session.username.clone(),
        None => "Sign in".to_string(),
    });
    rsx! {
        IconLink { to: Route::AccountPage {}, icon: MdPerson, label: label() }
    }
}

#[component]
fn IconLink<T: IconShape + Clone + PartialEq + 'static>(to: Route, icon: T, label: String) -> Element {
    rsx! {
        Link {
            to,
            class: "nav-link",
            Icon { icon, style: "width: 24px; height: 24px;" }
            "{label}"
        }
    }
}
