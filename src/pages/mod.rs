//! Pages
//!
//! One component per route in the table in `app.rs`.

mod public;
mod track;
mod login;
mod dashboard;
mod clients;
mod items;
mod warehouses;
mod trucks;
mod employees;
mod orders;
mod ledgers;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;

use crate::api::{self, Resource};
use crate::models::{Labeled, Warehouse};
use crate::router::decode_param;
use crate::session;
use crate::store::use_app_store;

pub use clients::ClientsPage;
pub use dashboard::DashboardPage;
pub use employees::EmployeesPage;
pub use items::{ItemTypesPage, ItemsPage};
pub use ledgers::{LedgerDetailPage, LedgersPage, NewLedgerPage};
pub use login::LoginPage;
pub use orders::{NewOrderPage, OrderDetailPage, OrdersPage};
pub use public::{AboutPage, ContactPage, HomePage, NotFoundPage, ServicesPage};
pub use track::TrackPage;
pub use trucks::TrucksPage;
pub use warehouses::WarehousesPage;

/// The decoded `:id` segment of the current route, if any
pub(crate) fn route_id() -> Memo<Option<String>> {
    let params = use_params_map();
    Memo::new(move |_| {
        params
            .read()
            .get("id")
            .map(|raw| decode_param(&raw))
            .filter(|id| !id.trim().is_empty())
    })
}

/// Record named by the `:id` segment: `None` while loading, reloaded when
/// the segment changes. Answers for an id that is no longer current are
/// dropped.
pub(crate) fn load_by_route_id<T: Resource>(missing: &'static str) -> RwSignal<Option<Result<T, String>>> {
    let store = use_app_store();
    let id = route_id();
    let record = RwSignal::new(None);

    Effect::new(move |_| {
        record.set(None);
        let Some(wanted) = id.get() else {
            record.set(Some(Err(missing.to_string())));
            return;
        };
        spawn_local(async move {
            let result = api::get::<T>(&wanted).await.map_err(|e| {
                log::error!("[DETAIL] {} {wanted} failed: {e}", T::BASE);
                if e.is_unauthorized() {
                    session::sign_out(store);
                }
                if e.is_not_found() {
                    missing.to_string()
                } else {
                    e.to_string()
                }
            });
            if id.try_get_untracked().flatten().as_deref() == Some(wanted.as_str()) {
                record.try_set(Some(result));
            }
        });
    });

    record
}

/// Fill a dropdown source with the whole collection
pub(crate) fn load_all<T: Resource>(target: RwSignal<Vec<T>>) {
    spawn_local(async move {
        match api::list_all::<T>().await {
            Ok(rows) => {
                target.try_set(rows);
            }
            Err(e) => log::error!("[PICKER] {} failed: {e}", T::BASE),
        }
    });
}

/// `(id, "Name (CODE)")` pairs for warehouse dropdowns
pub(crate) fn warehouse_options(warehouses: RwSignal<Vec<Warehouse>>) -> Signal<Vec<(String, String)>> {
    Signal::derive(move || {
        warehouses.with(|all| all.iter().map(|w| (w.id.clone(), w.label())).collect())
    })
}

/// Trimmed text, or `None` when blank
pub(crate) fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Text for optional cells
pub(crate) fn or_dash(value: Option<String>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_becomes_none() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty(" 27AAAPL1234C1Z5 ".to_string()), Some("27AAAPL1234C1Z5".to_string()));
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some(String::new())), "-");
        assert_eq!(or_dash(Some("MH12".to_string())), "MH12");
    }
}
