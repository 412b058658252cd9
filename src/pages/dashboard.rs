//! Back-office landing page: shortcuts, today's memo count, latest LRs.

use leptos::prelude::*;
use leptos::task::spawn_local;
use list_query::ListQuery;

use crate::api;
use crate::components::{PageHeader, Spinner};
use crate::format::{format_optional_date, status_label, today_iso};
use crate::models::{Ledger, Order, Paged};
use crate::router::Route;
use crate::session;
use crate::store::{is_admin, use_app_store, AppStateStoreFields};

const RECENT_ORDERS: u32 = 5;

/// Memo count from a one-row page. With one row per page the page count is
/// the row count; with neither total only an empty page is conclusive.
fn memo_count(page: &Paged<Ledger>) -> Option<u64> {
    page.total_count
        .or_else(|| page.total_pages.map(u64::from))
        .or_else(|| page.rows.is_empty().then_some(0))
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let store = use_app_store();
    let memos_today = RwSignal::new(None::<u64>);
    let recent = RwSignal::new(None::<Vec<Order>>);

    spawn_local(async move {
        let request = ListQuery::new(1).with_filter("date", &today_iso()).request();
        match api::list::<Ledger>(&request).await {
            Ok(page) => {
                memos_today.try_set(memo_count(&page));
            }
            Err(e) => {
                log::warn!("[DASHBOARD] memo count unavailable: {e}");
                if e.is_unauthorized() {
                    session::sign_out(store);
                }
            }
        }
    });

    spawn_local(async move {
        let request = ListQuery::new(RECENT_ORDERS).request();
        match api::list::<Order>(&request).await {
            Ok(page) => {
                recent.try_set(Some(page.rows));
            }
            Err(e) => {
                log::warn!("[DASHBOARD] recent orders unavailable: {e}");
                recent.try_set(Some(Vec::new()));
            }
        }
    });

    let greeting = move || {
        store
            .user()
            .with(|u| u.as_ref().map(|u| format!("Welcome, {}", u.display_name())))
            .unwrap_or_else(|| "Welcome".to_string())
    };

    let shortcuts = move || {
        let mut links = vec![Route::NewOrder, Route::NewLedger, Route::Orders, Route::Ledgers, Route::Clients];
        if is_admin(&store) {
            links.extend([Route::Warehouses, Route::Trucks, Route::Employees]);
        }
        links
            .into_iter()
            .map(|route| view! { <a href=route.href() class="shortcut">{route.title()}</a> })
            .collect_view()
    };

    let recent_rows = move || match recent.get() {
        None => view! { <Spinner /> }.into_any(),
        Some(orders) if orders.is_empty() => view! { <p class="list-empty">"No LRs yet"</p> }.into_any(),
        Some(orders) => view! {
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Tracking no."</th>
                        <th>"Booked"</th>
                        <th>"To"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    {orders
                        .into_iter()
                        .map(|order| {
                            let href = Route::OrderDetail(order.id.clone()).href();
                            view! {
                                <tr>
                                    <td>
                                        <a href=href>{order.tracking_id}</a>
                                    </td>
                                    <td>{format_optional_date(order.placed_at.as_deref())}</td>
                                    <td>{order.destination_warehouse.label()}</td>
                                    <td>{status_label(&order.status)}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        }
        .into_any(),
    };

    view! {
        <section class="dashboard">
            <PageHeader title="Dashboard" />
            <p class="greeting">{greeting}</p>
            <div class="stat-cards">
                <a href=Route::Ledgers.href() class="stat-card">
                    <span class="stat-value">
                        {move || memos_today.get().map_or_else(|| "-".to_string(), |n| n.to_string())}
                    </span>
                    <span class="stat-label">"Memos dispatched today"</span>
                </a>
            </div>
            <div class="shortcuts">{shortcuts}</div>
            <h2>"Latest LRs"</h2>
            {recent_rows}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(rows: usize, total_pages: Option<u32>, total_count: Option<u64>) -> Paged<Ledger> {
        Paged {
            rows: vec![Ledger::default(); rows],
            total_pages,
            total_count,
        }
    }

    #[test]
    fn memo_count_prefers_server_totals() {
        assert_eq!(memo_count(&page(1, Some(7), Some(7))), Some(7));
        assert_eq!(memo_count(&page(1, None, Some(12))), Some(12));
        assert_eq!(memo_count(&page(1, Some(4), None)), Some(4));
    }

    #[test]
    fn one_row_without_totals_is_not_a_count() {
        assert_eq!(memo_count(&page(1, None, None)), None);
        assert_eq!(memo_count(&page(0, None, None)), Some(0));
    }
}
