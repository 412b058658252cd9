use leptos::prelude::*;

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="spinner" role="status">
            <span class="spinner-label">"Loading..."</span>
        </div>
    }
}
