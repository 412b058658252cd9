//! Navigation
//!
//! Top bar for the public site and sidebar for the back office.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;

use crate::router::{is_active_link, Route};
use crate::session;
use crate::store::{is_admin, is_signed_in, use_app_store, AppStateStoreFields};

const PUBLIC_LINKS: &[Route] = &[Route::Home, Route::About, Route::Services, Route::Contact];

const BACK_OFFICE_LINKS: &[Route] = &[
    Route::Dashboard,
    Route::Orders,
    Route::Ledgers,
    Route::Clients,
    Route::Items,
    Route::ItemTypes,
    Route::Warehouses,
    Route::Trucks,
    Route::Employees,
];

/// Anchor that highlights itself while its section is open
#[component]
fn NavLink(route: Route) -> impl IntoView {
    let pathname = use_location().pathname;
    let href = route.href();
    let title = route.title();
    let exact = route.is_exact_link();
    let active = {
        let href = href.clone();
        move || pathname.with(|path| is_active_link(path, &href, exact))
    };
    view! {
        <a href=href class="nav-link" class:active=active>
            {title}
        </a>
    }
}

#[component]
fn ThemeToggle() -> impl IntoView {
    let store = use_app_store();
    view! {
        <button
            type="button"
            class="btn-icon"
            title="Toggle theme"
            on:click=move |_| session::toggle_theme(store)
        >
            {move || match store.theme().get() {
                session::Theme::Light => "☾",
                session::Theme::Dark => "☀",
            }}
        </button>
    }
}

#[component]
pub fn PublicNav() -> impl IntoView {
    let store = use_app_store();
    view! {
        <nav class="public-nav">
            <a href=Route::Home.href() class="brand">"Freight Desk"</a>
            <div class="nav-links">
                {PUBLIC_LINKS
                    .iter()
                    .map(|route| view! { <NavLink route=route.clone() /> })
                    .collect_view()}
                <NavLink route=Route::Track(None) />
            </div>
            <div class="nav-actions">
                <ThemeToggle />
                {move || {
                    if is_signed_in(&store) {
                        view! { <a href=Route::Dashboard.href() class="btn">"Dashboard"</a> }.into_any()
                    } else {
                        view! { <a href=Route::Login.href() class="btn">"Login"</a> }.into_any()
                    }
                }}
            </div>
        </nav>
    }
}

#[component]
pub fn AdminSidebar() -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();

    let user_name = move || {
        store
            .user()
            .with(|u| u.as_ref().map(|u| u.display_name().to_string()))
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        session::sign_out(store);
        navigate(&Route::Login.href(), NavigateOptions::default());
    };

    view! {
        <aside class="admin-sidebar">
            <a href=Route::Dashboard.href() class="brand">"Freight Desk"</a>
            <nav class="sidebar-links">
                {BACK_OFFICE_LINKS
                    .iter()
                    .map(|route| {
                        let route = route.clone();
                        let admin_only = route.admin_only();
                        view! {
                            <Show when=move || !admin_only || is_admin(&store)>
                                <NavLink route=route.clone() />
                            </Show>
                        }
                    })
                    .collect_view()}
            </nav>
            <div class="sidebar-footer">
                <span class="user-name">{user_name}</span>
                <ThemeToggle />
                <button type="button" class="btn" on:click=on_logout>"Logout"</button>
            </div>
        </aside>
    }
}
