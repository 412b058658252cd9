//! Delete Confirm Button Component
//!
//! Two-step inline delete: the first click asks, ✓ confirms, ✗ backs out.

use leptos::prelude::*;

#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] on_confirm: Callback<()>,
    /// Question shown while confirming
    #[prop(optional)]
    prompt: Option<&'static str>,
) -> impl IntoView {
    let asking = RwSignal::new(false);
    let prompt = prompt.unwrap_or("Delete?");

    move || {
        if !asking.get() {
            return view! {
                <button type="button" class="btn danger small" on:click=move |_| asking.set(true)>
                    "Delete"
                </button>
            }
            .into_any();
        }
        view! {
            <span class="delete-confirm">
                <span class="delete-confirm-text">{prompt}</span>
                <button
                    type="button"
                    class="confirm-btn"
                    title="Confirm"
                    on:click=move |_| {
                        asking.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button type="button" class="cancel-btn" title="Cancel" on:click=move |_| asking.set(false)>
                    "✗"
                </button>
            </span>
        }
        .into_any()
    }
}
