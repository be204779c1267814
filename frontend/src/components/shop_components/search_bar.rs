use common::debounce::Debouncer;
use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::MdSearch;
use dioxus_free_icons::icons::md_navigation_icons::MdClose;
use dioxus_free_icons::Icon;
use gloo_timers::future::TimeoutFuture;

use crate::components::shop_components::use_shop;

#[component]
pub fn ShopSearchBar() -> Element {
    let shop = use_shop();
    let mut text = use_signal(|| shop.filters.peek().search_query().to_string());
    let mut debouncer = use_signal(Debouncer::new);

    // back/forward navigation or "clear filters" changes the query under us
    use_effect(move || {
        let query = shop.filters.read().search_query().to_string();
        if query != *text.peek() {
            debouncer.write().cancel();
            text.set(query);
        }
    });

    let mut search_now = move |query: String| {
        debouncer.write().cancel();
        shop.update_filters(|f| f.set_search_query(query));
    };

    let search_oninput = move |event: Event<FormData>| {
        let query = event.value();
        text.set(query.clone());
        let ticket = debouncer.write().schedule();
        let delay = debouncer.peek().delay_ms();
        spawn(async move {
            TimeoutFuture::new(delay as u32).await;
            if debouncer.peek().is_current(ticket) {
                shop.update_filters(|f| f.set_search_query(query));
            }
        });
    };

    rsx! {
        div {
            class: "shop-search-bar",
            Icon { icon: MdSearch, style: "width: 20px; height: 20px; color: #6B7280;" }
            input {
                r#type: "text",
                placeholder: "Search by part name, category or brand",
                value: "{text}",
                oninput: search_oninput,
                onkeydown: move |event: Event<KeyboardData>| {
                    if event.key() == Key::Enter {
                        search_now(text.peek().clone());
                    }
                },
            }
            if !text.read().is_empty() {
                button {
                    class: "icon-button",
                    title: "Clear search",
                    onclick: move |_| {
                        text.set(String::new());
                        search_now(String::new());
                    },
                    Icon { icon: MdClose, style: "width: 18px; height: 18px;" }
                }
            }
        }
    }
}
