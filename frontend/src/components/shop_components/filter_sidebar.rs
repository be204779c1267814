//! Category, brand and price filters with their option counts.

use common::facets::{FacetCountMode, FacetOption, FacetSummary, PriceOption};
use dioxus::prelude::*;
use dioxus_free_icons::icons::md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank, MdRadioButtonChecked, MdRadioButtonUnchecked};
use dioxus_free_icons::Icon;

use crate::components::shop_components::use_shop;

#[derive(Debug, Clone, Copy, PartialEq)]
enum FacetKind {
    Category,
    Brand,
}

#[component]
pub fn FilterSidebar() -> Element {
    let shop = use_shop();
    let summary = use_memo(move || {
        FacetSummary::from_index(&shop.catalog.read(), &shop.filters.read(), *shop.count_mode.read())
    });
    let active_count = use_memo(move || shop.filters.read().active_filter_count());

    rsx! {
        div {
            class: "filter-sidebar",
            div {
                class: "filter-sidebar-header",
                h3 { "Filters" }
                if active_count() > 0 {
                    button {
                        class: "link-button",
                        onclick: move |_| shop.update_filters(|f| f.clear()),
                        "Clear all ({active_count})"
                    }
                }
            }
            LiveCountsToggle {}
            FacetSection {
                title: "Categories",
                kind: FacetKind::Category,
                options: summary.read().categories.clone(),
            }
            FacetSection {
                title: "Brands",
                kind: FacetKind::Brand,
                options: summary.read().brands.clone(),
            }
            PriceSection { options: summary.read().price_ranges.clone() }
        }
    }
}

#[component]
fn LiveCountsToggle() -> Element {
    let mut shop = use_shop();
    let live = use_memo(move || *shop.count_mode.read() == FacetCountMode::Filtered);
    rsx! {
        label {
            class: "live-counts-toggle",
            title: "Count only products that match your other filters",
            input {
                r#type: "checkbox",
                checked: live(),
                onchange: move |event: Event<FormData>| {
                    let mode = if event.checked() { FacetCountMode::Filtered } else { FacetCountMode::Catalog };
                    shop.count_mode.set(mode);
                },
            }
            "Live counts"
        }
    }
}

#[component]
fn FacetSection(title: String, kind: FacetKind, options: ReadSignal<Vec<FacetOption>>) -> Element {
    let mut expanded = use_signal(|| false);
    // long brand lists are folded after the first few entries
    let visible = use_memo(move || {
        let options = options.read();
        let selected_hidden = options.iter().skip(8).any(|o| o.selected);
        if expanded() || selected_hidden { options.clone() } else { options.iter().take(8).cloned().collect() }
    });
    let hidden = use_memo(move || options.read().len().saturating_sub(visible.read().len()));

    rsx! {
        div {
            class: "filter-section",
            h4 { "{title}" }
            if options.read().is_empty() {
                p { class: "filter-empty", "No options" }
            }
            for option in visible.read().iter().cloned() {
                FacetCheckbox { key: "{option.slug}", kind, option }
            }
            if hidden() > 0 {
                button {
                    class: "link-button",
                    onclick: move |_| expanded.set(true),
                    "Show {hidden} more"
                }
            } else if expanded() {
                button {
                    class: "link-button",
                    onclick: move |_| expanded.set(false),
                    "Show less"
                }
            }
        }
    }
}

#[component]
fn FacetCheckbox(kind: FacetKind, option: ReadSignal<FacetOption>) -> Element {
    let shop = use_shop();
    let toggle = move |_: Event<MouseData>| {
        let slug = option.read().slug.clone();
        shop.update_filters(|f| match kind {
            FacetKind::Category => f.toggle_category(&slug),
            FacetKind::Brand => f.toggle_brand(&slug),
        });
    };
    let option = option.read();
    let dimmed = if option.count == 0 && !option.selected { "opacity: 0.5;" } else { "" };

    rsx! {
        div {
            class: "facet-checkbox",
            style: "{dimmed}",
            onclick: toggle,
            if option.selected {
                Icon { icon: MdCheckBox, style: "width: 20px; height: 20px; color: #1C5FD4;" }
            } else {
                Icon { icon: MdCheckBoxOutlineBlank, style: "width: 20px; height: 20px;" }
            }
            span { class: "facet-name", "{option.name}" }
            span { style: "flex-grow: 1;" }
            span { class: "facet-count", "{option.count}" }
        }
    }
}

#[component]
fn PriceSection(options: ReadSignal<Vec<PriceOption>>) -> Element {
    let shop = use_shop();
    let any_selected = use_memo(move || shop.filters.read().price_range().is_some());

    rsx! {
        div {
            class: "filter-section",
            h4 { "Price" }
            div {
                class: "facet-checkbox",
                onclick: move |_| shop.update_filters(|f| f.set_price_range(None)),
                PriceRadio { checked: !any_selected() }
                span { class: "facet-name", "Any price" }
            }
            for option in options.read().iter().cloned() {
                PriceOptionRow { key: "{option.label}", option }
            }
        }
    }
}

#[component]
fn PriceOptionRow(option: ReadSignal<PriceOption>) -> Element {
    let shop = use_shop();
    let select = move |_: Event<MouseData>| {
        let range = option.read().range;
        shop.update_filters(|f| {
            let next = if f.price_range() == Some(range) { None } else { Some(range) };
            f.set_price_range(next);
        });
    };
    let option = option.read();

    rsx! {
        div {
            class: "facet-checkbox",
            onclick: select,
            PriceRadio { checked: option.selected }
            span { class: "facet-name", "{option.option_label()}" }
        }
    }
}

#[component]
fn PriceRadio(checked: bool) -> Element {
    rsx! {
        if checked {
            Icon { icon: MdRadioButtonChecked, style: "width: 20px; height: 20px; color: #1C5FD4;" }
        } else {
            Icon { icon: MdRadioButtonUnchecked, style: "width: 20px; height: 20px;" }
        }
    }
}
