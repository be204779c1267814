//! Make / model / year picker for the vehicle finder.

use common::vehicle::{VehicleIndex, VehicleSelection};
use dioxus::prelude::*;

use crate::data_definitions::store_state::use_store;

fn parse_id(value: &str) -> Option<u64> {
    value.parse::<u64>().ok().filter(|id| *id > 0)
}

#[component]
pub fn VehicleSelector(index: Signal<VehicleIndex>) -> Element {
    let store = use_store();
    let saved = store.vehicle.peek().clone();
    let mut make_id = use_signal(|| saved.as_ref().map(|v| v.make_id));
    let mut model_id = use_signal(|| saved.as_ref().map(|v| v.model_id));
    let mut year = use_signal(|| saved.as_ref().and_then(|v| v.year));

    let makes = use_memo(move || index.read().makes());
    let models = use_memo(move || make_id().map(|id| index.read().models(id)).unwrap_or_default());
    let years = use_memo(move || model_id().map(|id| index.read().years(id)).unwrap_or_default());

    let find_parts = move |_: Event<MouseData>| {
        if let (Some(make_id), Some(model_id)) = (make_id(), model_id()) {
            store.set_vehicle(Some(VehicleSelection { make_id, model_id, year: year() }));
        }
    };
    let reset = move |_: Event<MouseData>| {
        make_id.set(None);
        model_id.set(None);
        year.set(None);
        store.set_vehicle(None);
    };

    rsx! {
        div {
            class: "vehicle-selector",
            select {
                onchange: move |e: Event<FormData>| {
                    make_id.set(parse_id(&e.value()));
                    model_id.set(None);
                    year.set(None);
                },
                option { value: "", selected: make_id().is_none(), "Select make" }
                for make in makes.read().iter() {
                    option { key: "{make.id}", value: "{make.id}", selected: make_id() == Some(make.id), "{make.name}" }
                }
            }
            select {
                disabled: make_id().is_none(),
                onchange: move |e: Event<FormData>| {
                    model_id.set(parse_id(&e.value()));
                    year.set(None);
                },
                option { value: "", selected: model_id().is_none(), "Select model" }
                for model in models.read().iter() {
                    option { key: "{model.id}", value: "{model.id}", selected: model_id() == Some(model.id), "{model.name}" }
                }
            }
            select {
                disabled: years.read().is_empty(),
                onchange: move |e: Event<FormData>| year.set(e.value().parse::<u32>().ok()),
                option { value: "", selected: year().is_none(), "Any year" }
                for y in years.read().iter().copied() {
                    option { key: "{y}", value: "{y}", selected: year() == Some(y), "{y}" }
                }
            }
            button {
                class: "store-button",
                disabled: model_id().is_none(),
                onclick: find_parts,
                "Find parts"
            }
            if store.vehicle.read().is_some() {
                button { class: "link-button", onclick: reset, "Clear vehicle" }
            }
        }
    }
}
