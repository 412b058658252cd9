//! Search Bar Component
//!
//! Submits after a quiet period while typing, immediately on Enter.

use leptos::prelude::*;
use leptos::task::spawn_local;
use gloo_timers::future::TimeoutFuture;

use crate::config::config;

#[component]
pub fn SearchBar(
    #[prop(into)] value: Signal<String>,
    placeholder: &'static str,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into)] on_submit: Callback<()>,
    #[prop(into)] on_clear: Callback<()>,
) -> impl IntoView {
    // Bumped on every keystroke; a pending debounce only fires if it is
    // still the latest one when its timer ends.
    let keystroke = StoredValue::new(0u32);

    let on_type = move |ev: web_sys::Event| {
        on_input.run(event_target_value(&ev));
        keystroke.update_value(|k| *k = k.wrapping_add(1));
        let mine = keystroke.get_value();
        let delay = config().search_debounce_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            if keystroke.try_get_value() == Some(mine) {
                on_submit.run(());
            }
        });
    };

    let on_enter = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        keystroke.update_value(|k| *k = k.wrapping_add(1));
        on_submit.run(());
    };

    view! {
        <form class="search-bar" role="search" on:submit=on_enter>
            <input
                type="search"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=on_type
            />
            <Show when=move || !value.with(String::is_empty)>
                <button
                    type="button"
                    class="search-clear"
                    title="Clear search"
                    on:click=move |_| {
                        keystroke.update_value(|k| *k = k.wrapping_add(1));
                        on_clear.run(());
                    }
                >
                    "×"
                </button>
            </Show>
            <button type="submit" class="btn">"Search"</button>
        </form>
    }
}
