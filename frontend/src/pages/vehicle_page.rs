use common::render::{render_results, PriceFormat, ResultBody};
use common::vehicle::VehicleIndex;
use dioxus::prelude::*;

use crate::api::store_api::{currency_prefix, load_vehicle_index};
use crate::components::error_boundary::ComponentErrorDisplay;
use crate::components::shop_components::product_card::ShopProductCard;
use crate::components::suspend_boundary::SuspendWrapper;
use crate::components::vehicle_selector::VehicleSelector;
use crate::data_definitions::store_state::use_store;

/// Vehicle finder: pick a car, list the parts known to fit it.
#[component]
pub fn VehiclePage() -> Element {
    rsx! {
        Title { "Find parts for your vehicle" }
        div {
            style: "padding: 24px 40px;",
            h1 { "Find parts for your vehicle" }
            SuspendWrapper {
                message: "Loading vehicles...",
                VehicleFinder {}
            }
        }
    }
}

#[component]
fn VehicleFinder() -> Element {
    let loaded = use_resource(move || async move {
        let index = load_vehicle_index().await?;
        let prefix = currency_prefix().await?;
        Ok::<_, ServerFnError>((index, PriceFormat::with_prefix(prefix)))
    })
    .suspend()?
    .cloned();

    match loaded {
        Ok((index, money)) => rsx! { VehicleFinderRoot { index, money } },
        Err(e) => rsx! { ComponentErrorDisplay { error_txt: format!("{:#?}", e) } },
    }
}

#[component]
fn VehicleFinderRoot(index: VehicleIndex, money: ReadSignal<PriceFormat>) -> Element {
    let store = use_store();
    let index = use_signal(move || index);
    let vehicle_name = use_memo(move || {
        let selection = store.vehicle.read().clone()?;
        let index = index.read();
        let make = index.makes().into_iter().find(|m| m.id == selection.make_id)?;
        let model = index.models(selection.make_id).into_iter().find(|m| m.id == selection.model_id)?;
        Some(match selection.year {
            Some(year) => format!("{} {} {}", make.name, model.name, year),
            None => format!("{} {}", make.name, model.name),
        })
    });
    let rendered = use_memo(move || {
        let products = store.vehicle.read().as_ref().map(|v| index.read().compatible_products(v)).unwrap_or_default();
        render_results(&products, products.len(), &money.read())
    });

    rsx! {
        VehicleSelector { index }
        match vehicle_name() {
            None => rsx! { p { class: "results-count", "Choose a make and model to see compatible parts." } },
            Some(name) => rsx! {
                h2 { "Parts for {name}" }
                match &rendered.read().body {
                    ResultBody::Empty { message } => rsx! { p { class: "no-results", "{message}" } },
                    ResultBody::Cards(cards) => rsx! {
                        p { class: "results-count", "{cards.len()} compatible parts" }
                        div {
                            class: "product-grid",
                            for card in cards.iter().cloned() {
                                ShopProductCard { key: "{card.id}", card }
                            }
                        }
                    },
                }
            },
        }
    }
}
