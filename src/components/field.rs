//! Form Fields
//!
//! Labelled inputs bound two-way to an `RwSignal`.

use leptos::prelude::*;

#[component]
pub fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] placeholder: Option<&'static str>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <input
                type=input_type.unwrap_or("text")
                placeholder=placeholder.unwrap_or_default()
                required=required
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

/// Dropdown over `(value, label)` pairs; the placeholder maps to `""`
#[component]
pub fn SelectField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(optional)] placeholder: Option<&'static str>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <select
                required=required
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                <option value="">{placeholder.unwrap_or("Select…")}</option>
                <For
                    each=move || options.get()
                    key=|(v, _)| v.clone()
                    children=move |(v, text)| {
                        let selected = {
                            let v = v.clone();
                            move || value.with(|current| *current == v)
                        };
                        view! { <option value=v selected=selected>{text}</option> }
                    }
                />
            </select>
        </label>
    }
}

#[component]
pub fn CheckboxField(label: &'static str, value: RwSignal<bool>) -> impl IntoView {
    view! {
        <label class="field field-checkbox">
            <input
                type="checkbox"
                prop:checked=move || value.get()
                on:change=move |ev| value.set(event_target_checked(&ev))
            />
            <span class="field-label">{label}</span>
        </label>
    }
}
