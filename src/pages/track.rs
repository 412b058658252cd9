//! Shipment tracking lookup. Works without a session.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::api;
use crate::components::Spinner;
use crate::format::{format_datetime, format_optional_date, status_label};
use crate::models::{Order, StatusEvent};
use crate::router::Route;

use super::route_id;

#[derive(Clone)]
enum Lookup {
    Idle,
    Loading,
    Found(Order),
    Missing(String),
    Failed(String),
}

#[component]
pub fn TrackPage() -> impl IntoView {
    let navigate = use_navigate();
    let tracking_id = route_id();
    let input = RwSignal::new(String::new());
    let lookup = RwSignal::new(Lookup::Idle);

    // Re-runs when the address bar moves to another tracking id
    Effect::new(move |_| {
        let Some(id) = tracking_id.get() else {
            lookup.set(Lookup::Idle);
            return;
        };
        input.set(id.clone());
        lookup.set(Lookup::Loading);
        spawn_local(async move {
            let result = api::track_parcel(&id).await;
            // A newer id took over while this one was in flight
            if tracking_id.try_get_untracked().flatten().as_deref() != Some(id.as_str()) {
                return;
            }
            let next = match result {
                Ok(order) => Lookup::Found(order),
                Err(e) if e.is_not_found() => Lookup::Missing(id),
                Err(e) => {
                    log::error!("[TRACK] lookup failed: {e}");
                    Lookup::Failed(e.to_string())
                }
            };
            lookup.try_set(next);
        });
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let id = input.get_untracked().trim().to_string();
        if !id.is_empty() {
            navigate(&Route::Track(Some(id)).href(), NavigateOptions::default());
        }
    };

    view! {
        <Title text=Route::Track(None).title() />
        <section class="track-page">
            <h1>"Track shipment"</h1>
            <form class="quick-track" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Tracking number"
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                />
                <button type="submit" class="btn primary">"Track"</button>
            </form>
            {move || match lookup.get() {
                Lookup::Idle => view! { <p class="hint">"Enter the tracking number printed on your LR."</p> }.into_any(),
                Lookup::Loading => view! { <Spinner /> }.into_any(),
                Lookup::Found(order) => view! { <TrackResult order=order /> }.into_any(),
                Lookup::Missing(id) => view! {
                    <p class="list-empty">"No shipment found with tracking number " <strong>{id}</strong></p>
                }
                .into_any(),
                Lookup::Failed(message) => view! { <p class="list-error">{message}</p> }.into_any(),
            }}
        </section>
    }
}

#[component]
fn TrackResult(order: Order) -> impl IntoView {
    view! {
        <div class="track-result">
            <dl class="details">
                <dt>"Tracking number"</dt>
                <dd>{order.tracking_id.clone()}</dd>
                <dt>"Status"</dt>
                <dd><span class="status-badge">{status_label(&order.status)}</span></dd>
                <dt>"Booked on"</dt>
                <dd>{format_optional_date(order.placed_at.as_deref())}</dd>
                <dt>"From"</dt>
                <dd>{order.source_warehouse.label()}</dd>
                <dt>"To"</dt>
                <dd>{order.destination_warehouse.label()}</dd>
                <dt>"Packages"</dt>
                <dd>{order.package_count()}</dd>
            </dl>
            <StatusTimeline events=order.status_history />
        </div>
    }
}

/// Status history, oldest first
#[component]
pub fn StatusTimeline(events: Vec<StatusEvent>) -> impl IntoView {
    if events.is_empty() {
        return view! { <span></span> }.into_any();
    }
    view! {
        <ol class="timeline">
            {events
                .into_iter()
                .map(|event| {
                    view! {
                        <li>
                            <span class="status-badge">{status_label(&event.status)}</span>
                            <span class="timeline-at">
                                {event.at.as_deref().map(format_datetime).unwrap_or_default()}
                            </span>
                            {event.note.map(|note| view! { <span class="timeline-note">{note}</span> })}
                        </li>
                    }
                })
                .collect_view()}
        </ol>
    }
    .into_any()
}
