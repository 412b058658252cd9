//! Public site: marketing pages and the not-found page.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;

use crate::markdown::parse_markdown;
use crate::router::Route;

const HOME: &str = include_str!("../../content/home.md");
const ABOUT: &str = include_str!("../../content/about.md");
const SERVICES: &str = include_str!("../../content/services.md");
const CONTACT: &str = include_str!("../../content/contact.md");

#[component]
fn MarkdownPage(source: &'static str) -> impl IntoView {
    let html = parse_markdown(source);
    view! { <article class="markdown-body" inner_html=html></article> }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <Title text=Route::About.title() />
        <MarkdownPage source=ABOUT />
    }
}

#[component]
pub fn ServicesPage() -> impl IntoView {
    view! {
        <Title text=Route::Services.title() />
        <MarkdownPage source=SERVICES />
    }
}

#[component]
pub fn ContactPage() -> impl IntoView {
    view! {
        <Title text=Route::Contact.title() />
        <MarkdownPage source=CONTACT />
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let navigate = use_navigate();
    let tracking_id = RwSignal::new(String::new());

    let on_track = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let id = tracking_id.get_untracked().trim().to_string();
        if !id.is_empty() {
            navigate(&Route::Track(Some(id)).href(), NavigateOptions::default());
        }
    };

    view! {
        <Title text=Route::Home.title() />
        <section class="hero">
            <MarkdownPage source=HOME />
            <form class="quick-track" on:submit=on_track>
                <input
                    type="text"
                    placeholder="Tracking number"
                    prop:value=move || tracking_id.get()
                    on:input=move |ev| tracking_id.set(event_target_value(&ev))
                />
                <button type="submit" class="btn primary">"Track"</button>
            </form>
        </section>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let path = use_location().pathname;
    view! {
        <Title text="Not found" />
        <section class="not-found">
            <h1>"Page not found"</h1>
            <p>"Nothing lives at " <code>{move || path.get()}</code> "."</p>
            <a href=Route::Home.href() class="btn">"Back to home"</a>
        </section>
    }
}
