//! Freight Desk App
//!
//! Root component: provides the store and context, declares the route
//! table and wraps back-office routes in the session guards.

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::components::{Outlet, ParentRoute, Route, Router, Routes};
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::{NavigateOptions, ParamSegment, StaticSegment};

use crate::components::{AdminSidebar, NoticeBar, PublicNav, Spinner};
use crate::context::{use_app_context, AppContext};
use crate::models::User;
use crate::pages::{
    AboutPage, ClientsPage, ContactPage, DashboardPage, EmployeesPage, HomePage, ItemTypesPage,
    ItemsPage, LedgerDetailPage, LedgersPage, LoginPage, NewLedgerPage, NewOrderPage,
    NotFoundPage, OrderDetailPage, OrdersPage, ServicesPage, TrackPage, TrucksPage,
    WarehousesPage,
};
use crate::router::{self, back_office_access, Access, NEW_SEGMENT};
use crate::session;
use crate::store::{is_signed_in, use_app_store, AppState, AppStateStoreFields, AppStore};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let store: AppStore = reactive_stores::Store::new(AppState::default());
    provide_context(store);
    provide_context(AppContext::new(signal(None)));

    session::restore(store);

    // Theme
    Effect::new(move |_| session::apply_theme(store.theme().get()));

    // Static segments come before the `:id` routes they would otherwise match
    view! {
        <Title formatter=|text: String| format!("{text} | Freight Desk") />
        <NoticeBar />
        <Router>
            <Routes fallback=|| view! { <PublicFrame><NotFoundPage /></PublicFrame> }>
                <ParentRoute path=StaticSegment("admin") view=BackOffice>
                    <Route path=StaticSegment("") view=DashboardPage />
                    <Route path=StaticSegment("clients") view=ClientsPage />
                    <Route path=StaticSegment("items") view=ItemsPage />
                    <Route path=StaticSegment("item-types") view=ItemTypesPage />
                    <Route
                        path=StaticSegment("warehouses")
                        view=|| view! { <AdminOnly><WarehousesPage /></AdminOnly> }
                    />
                    <Route
                        path=StaticSegment("trucks")
                        view=|| view! { <AdminOnly><TrucksPage /></AdminOnly> }
                    />
                    <Route
                        path=StaticSegment("employees")
                        view=|| view! { <AdminOnly><EmployeesPage /></AdminOnly> }
                    />
                    <Route path=StaticSegment("orders") view=OrdersPage />
                    <Route path=(StaticSegment("orders"), StaticSegment(NEW_SEGMENT)) view=NewOrderPage />
                    <Route path=(StaticSegment("orders"), ParamSegment("id")) view=OrderDetailPage />
                    <Route path=StaticSegment("ledgers") view=LedgersPage />
                    <Route path=(StaticSegment("ledgers"), StaticSegment(NEW_SEGMENT)) view=NewLedgerPage />
                    <Route path=(StaticSegment("ledgers"), ParamSegment("id")) view=LedgerDetailPage />
                </ParentRoute>
                <ParentRoute path=StaticSegment("") view=PublicLayout>
                    <Route path=StaticSegment("") view=HomePage />
                    <Route path=StaticSegment("about") view=AboutPage />
                    <Route path=StaticSegment("services") view=ServicesPage />
                    <Route path=StaticSegment("contact") view=ContactPage />
                    <Route path=StaticSegment("track") view=TrackPage />
                    <Route path=(StaticSegment("track"), ParamSegment("id")) view=TrackPage />
                    <Route path=StaticSegment("login") view=LoginPage />
                </ParentRoute>
            </Routes>
        </Router>
    }
}

// ========================
// Layouts
// ========================

/// Top nav and footer around public pages
#[component]
fn PublicFrame(children: Children) -> impl IntoView {
    view! {
        <div class="public-layout">
            <PublicNav />
            <main class="public-main">{children()}</main>
            <footer class="public-footer">
                <a href=router::Route::Contact.href()>"Contact"</a>
                <a href=router::Route::Track(None).href()>"Track shipment"</a>
                <a href=router::Route::Login.href()>"Staff login"</a>
            </footer>
        </div>
    }
}

#[component]
fn PublicLayout() -> impl IntoView {
    view! {
        <PublicFrame>
            <Outlet />
        </PublicFrame>
    }
}

fn profile_role(store: &AppStore) -> Option<bool> {
    store.user().with(|user| user.as_ref().map(User::is_admin))
}

/// Sidebar layout for `/admin/*`. Sends visitors without a session to the
/// login page and remembers where they were going.
#[component]
fn BackOffice() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let navigate = use_navigate();
    let location = use_location();

    let access = Memo::new(move |_| {
        back_office_access(store.restoring().get(), is_signed_in(&store), false, None)
    });

    Effect::new(move |_| {
        if access.get() == Access::Login {
            let target = location.pathname.get_untracked();
            log::info!("[ROUTER] {target} needs a session");
            ctx.after_login.set(Some(target));
            navigate(
                &router::Route::Login.href(),
                NavigateOptions { replace: true, ..Default::default() },
            );
        }
    });

    view! {
        <div class="admin-layout">
            <AdminSidebar />
            <main class="admin-main">
                <Show when=move || access.get() == Access::Allowed fallback=|| view! { <Spinner /> }>
                    <Outlet />
                </Show>
            </main>
        </div>
    }
}

/// Admin-only pages. Staff users get a notice and the dashboard once their
/// profile says they are not an admin.
#[component]
fn AdminOnly(children: ChildrenFn) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let navigate = use_navigate();
    let location = use_location();

    let access = Memo::new(move |_| {
        back_office_access(
            store.restoring().get(),
            is_signed_in(&store),
            true,
            profile_role(&store),
        )
    });

    Effect::new(move |_| {
        if access.get() == Access::Forbidden {
            log::warn!("[ROUTER] {} is admin only", location.pathname.get_untracked());
            ctx.error("You are not permitted to open that page");
            navigate(
                &router::Route::Dashboard.href(),
                NavigateOptions { replace: true, ..Default::default() },
            );
        }
    });

    view! {
        <Show when=move || access.get() == Access::Allowed fallback=|| view! { <Spinner /> }>
            {children()}
        </Show>
    }
}
