//! Ledgers (delivery memos): per-date list, memo form and detail view.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use list_query::ListQuery;

use super::{load_all, load_by_route_id, warehouse_options};
use crate::api;
use crate::components::{PageHeader, SelectField, Spinner, TextField};
use crate::config::config;
use crate::context::use_app_context;
use crate::format::{format_amount, format_optional_date, status_label, today_iso};
use crate::list::ListController;
use crate::models::{Ledger, NewLedger, Order, Ref, Truck, Warehouse};
use crate::router::Route;
use crate::session;
use crate::store::use_app_store;

/// Tracking ids separated by commas, spaces or new lines, in the order
/// given, without repeats
pub fn parse_tracking_ids(text: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in text.split(|c: char| c == ',' || c.is_whitespace()) {
        if !id.is_empty() && !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    }
    ids
}

fn destination_label(ledger: &Ledger) -> String {
    ledger
        .destination_warehouse
        .as_ref()
        .map_or_else(|| "-".to_string(), Ref::label)
}

fn freight_label(amount: Option<f64>) -> String {
    amount.map_or_else(|| "-".to_string(), format_amount)
}

#[component]
pub fn LedgersPage() -> impl IntoView {
    let query = ListQuery::new(config().page_size).with_filter("date", &today_iso());
    let list = ListController::<Ledger>::new(query);

    let rows = move || {
        list.rows
            .get()
            .into_iter()
            .enumerate()
            .map(|(i, ledger)| {
                let serial = list.serial(i);
                let href = Route::LedgerDetail(ledger.id.clone()).href();
                let destination = destination_label(&ledger);
                let count = ledger.parcels.len();
                view! {
                    <tr>
                        <td>{serial}</td>
                        <td><a href=href>{ledger.ledger_id}</a></td>
                        <td>{ledger.vehicle_no}</td>
                        <td>{format_optional_date(ledger.dispatch_date.as_deref())}</td>
                        <td>{ledger.source_warehouse.label()}</td>
                        <td>{destination}</td>
                        <td>{count}</td>
                        <td>{freight_label(ledger.lorry_freight)}</td>
                        <td><span class="status-badge">{status_label(&ledger.status)}</span></td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <section class="list-page">
            <PageHeader title="Memos">
                <a href=Route::NewLedger.href() class="btn primary">"New memo"</a>
            </PageHeader>
            <div class="list-toolbar">
                {list.search_bar("Search by memo number or vehicle")}
                <label class="filter">
                    "Dispatch date"
                    <input
                        type="date"
                        prop:value=move || list.query.with(|q| q.filter("date").unwrap_or_default().to_string())
                        on:change=move |ev| list.set_filter("date", event_target_value(&ev))
                    />
                </label>
            </div>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"S.No"</th>
                        <th>"Memo no."</th>
                        <th>"Vehicle"</th>
                        <th>"Dispatched"</th>
                        <th>"From"</th>
                        <th>"To"</th>
                        <th>"LRs"</th>
                        <th>"Lorry freight"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            {list.status()}
            {list.pagination()}
        </section>
    }
}

// ========================
// Memo form
// ========================

fn build_ledger(
    vehicle_no: String,
    lorry_freight: &str,
    source_warehouse: String,
    destination_warehouse: String,
    dispatch_date: String,
    ids_text: &str,
) -> Result<NewLedger, String> {
    if vehicle_no.is_empty() {
        return Err("Choose a truck".to_string());
    }
    if source_warehouse.is_empty() || destination_warehouse.is_empty() {
        return Err("Choose both source and destination warehouses".to_string());
    }
    let lorry_freight = match lorry_freight.trim().replace(',', "") {
        raw if raw.is_empty() => None,
        raw => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
            _ => return Err("Lorry freight must be a non-negative amount".to_string()),
        },
    };
    let ids = parse_tracking_ids(ids_text);
    if ids.is_empty() {
        return Err("Add at least one LR tracking number".to_string());
    }
    Ok(NewLedger {
        vehicle_no,
        lorry_freight,
        source_warehouse,
        destination_warehouse,
        dispatch_date,
        ids,
    })
}

#[component]
pub fn NewLedgerPage() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let trucks = RwSignal::new(Vec::<Truck>::new());
    let warehouses = RwSignal::new(Vec::<Warehouse>::new());
    load_all(trucks);
    load_all(warehouses);

    let vehicle_no = RwSignal::new(String::new());
    let lorry_freight = RwSignal::new(String::new());
    let source = RwSignal::new(String::new());
    let destination = RwSignal::new(String::new());
    let dispatch_date = RwSignal::new(today_iso());
    let ids_text = RwSignal::new(String::new());

    let (error, set_error) = signal(None::<String>);
    let (submitting, set_submitting) = signal(false);
    let navigate = use_navigate();

    let truck_options = Signal::derive(move || {
        trucks.with(|all| {
            all.iter()
                .map(|t| (t.vehicle_no.clone(), t.vehicle_no.clone()))
                .collect::<Vec<_>>()
        })
    });
    let options = warehouse_options(warehouses);
    let id_count = move || ids_text.with(|t| parse_tracking_ids(t).len());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let ledger = match build_ledger(
            vehicle_no.get_untracked(),
            &lorry_freight.get_untracked(),
            source.get_untracked(),
            destination.get_untracked(),
            dispatch_date.get_untracked(),
            &ids_text.get_untracked(),
        ) {
            Ok(ledger) => ledger,
            Err(e) => {
                set_error.set(Some(e));
                return;
            }
        };

        set_error.set(None);
        set_submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::create_ledger(&ledger).await {
                Ok(created) => {
                    ctx.success(format!("Memo {} created", created.ledger_id));
                    let next = if created.id.is_empty() {
                        Route::Ledgers
                    } else {
                        Route::LedgerDetail(created.id)
                    };
                    navigate(&next.href(), NavigateOptions::default());
                }
                Err(e) => {
                    log::error!("[LEDGERS] create failed: {e}");
                    if e.is_unauthorized() {
                        session::sign_out(store);
                    }
                    set_error.try_set(Some(e.to_string()));
                    set_submitting.try_set(false);
                }
            }
        });
    };

    view! {
        <section class="form-page">
            <PageHeader title="New memo" />
            <form class="record-form wide" on:submit=on_submit>
                <div class="form-row">
                    <SelectField label="Truck" value=vehicle_no options=truck_options required=true />
                    <TextField label="Dispatch date" value=dispatch_date input_type="date" required=true />
                    <TextField label="Lorry freight" value=lorry_freight placeholder="0.00" />
                </div>
                <div class="form-row">
                    <SelectField label="Source warehouse" value=source options=options required=true />
                    <SelectField label="Destination warehouse" value=destination options=options required=true />
                </div>
                <label class="field">
                    <span class="field-label">"LR tracking numbers"</span>
                    <textarea
                        rows="6"
                        placeholder="One per line, or separated by commas"
                        prop:value=move || ids_text.get()
                        on:input=move |ev| ids_text.set(event_target_value(&ev))
                    ></textarea>
                    <span class="hint">{move || format!("{} LR(s)", id_count())}</span>
                </label>
                {move || error.get().map(|e| view! { <p class="list-error">{e}</p> })}
                <div class="form-actions">
                    <a href=Route::Ledgers.href() class="btn">"Cancel"</a>
                    <button type="submit" class="btn primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Saving..." } else { "Create memo" }}
                    </button>
                </div>
            </form>
        </section>
    }
}

// ========================
// Detail
// ========================

#[component]
pub fn LedgerDetailPage() -> impl IntoView {
    let ledger = load_by_route_id::<Ledger>("This memo does not exist");

    view! {
        <section class="detail-page">
            <PageHeader title="Memo details">
                <a href=Route::Ledgers.href() class="btn">"Back to memos"</a>
                <button type="button" class="btn" on:click=move |_| { let _ = window().print(); }>"Print"</button>
            </PageHeader>
            {move || match ledger.get() {
                None => view! { <Spinner /> }.into_any(),
                Some(Err(message)) => view! { <p class="list-error">{message}</p> }.into_any(),
                Some(Ok(ledger)) => view! { <LedgerSummary ledger=ledger /> }.into_any(),
            }}
        </section>
    }
}

/// Detail link and visible text for one parcel on a memo
fn parcel_link(parcel: &Ref<Order>) -> (String, String) {
    match parcel {
        Ref::Full(order) => (Route::OrderDetail(order.id.clone()).href(), order.tracking_id.clone()),
        Ref::Id(id) => (Route::OrderDetail(id.clone()).href(), id.clone()),
    }
}

#[component]
fn LedgerSummary(ledger: Ledger) -> impl IntoView {
    let destination = destination_label(&ledger);
    let parcels = ledger
        .parcels
        .into_iter()
        .enumerate()
        .map(|(i, parcel)| {
            let (href, text) = parcel_link(&parcel);
            match parcel {
                Ref::Full(order) => {
                    let packages = order.package_count();
                    view! {
                        <tr>
                            <td>{i + 1}</td>
                            <td><a href=href>{text}</a></td>
                            <td>{order.source_warehouse.label()}</td>
                            <td>{order.destination_warehouse.label()}</td>
                            <td>{order.receiver.name}</td>
                            <td>{packages}</td>
                            <td>{status_label(&order.status)}</td>
                        </tr>
                    }
                    .into_any()
                }
                Ref::Id(_) => view! {
                    <tr>
                        <td>{i + 1}</td>
                        <td><a href=href>{text}</a></td>
                        <td colspan="5"></td>
                    </tr>
                }
                .into_any(),
            }
        })
        .collect_view();

    view! {
        <dl class="details">
            <dt>"Memo number"</dt>
            <dd>{ledger.ledger_id}</dd>
            <dt>"Vehicle"</dt>
            <dd>{ledger.vehicle_no}</dd>
            <dt>"Dispatch date"</dt>
            <dd>{format_optional_date(ledger.dispatch_date.as_deref())}</dd>
            <dt>"From"</dt>
            <dd>{ledger.source_warehouse.label()}</dd>
            <dt>"To"</dt>
            <dd>{destination}</dd>
            <dt>"Lorry freight"</dt>
            <dd>{freight_label(ledger.lorry_freight)}</dd>
            <dt>"Status"</dt>
            <dd><span class="status-badge">{status_label(&ledger.status)}</span></dd>
        </dl>
        <table class="data-table">
            <thead>
                <tr>
                    <th>"#"</th>
                    <th>"Tracking no."</th>
                    <th>"From"</th>
                    <th>"To"</th>
                    <th>"Receiver"</th>
                    <th>"Pkgs"</th>
                    <th>"Status"</th>
                </tr>
            </thead>
            <tbody>{parcels}</tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_ids_split_dedupe_and_keep_order() {
        let ids = parse_tracking_ids("PUN-1042, SUR-77\nPUN-1042  BOM-3,,\n\tSUR-77");
        assert_eq!(ids, vec!["PUN-1042", "SUR-77", "BOM-3"]);
        assert!(parse_tracking_ids(" ,\n ").is_empty());
    }

    #[test]
    fn memo_needs_truck_warehouses_and_lrs() {
        let build = |truck: &str, freight: &str, ids: &str| {
            build_ledger(
                truck.into(),
                freight,
                "w1".into(),
                "w2".into(),
                "2026-10-18".into(),
                ids,
            )
        };

        assert_eq!(build("", "", "PUN-1").unwrap_err(), "Choose a truck");
        assert_eq!(build("MH12AB1234", "", "").unwrap_err(), "Add at least one LR tracking number");
        assert!(build("MH12AB1234", "-5", "PUN-1").is_err());

        let ledger = build("MH12AB1234", "12,500", "PUN-1 PUN-2").unwrap();
        assert_eq!(ledger.lorry_freight, Some(12500.0));
        assert_eq!(ledger.ids, vec!["PUN-1", "PUN-2"]);

        assert_eq!(build("MH12AB1234", " ", "PUN-1").unwrap().lorry_freight, None);
    }

    #[test]
    fn parcels_link_to_their_lr_whether_populated_or_not() {
        let bare: Ref<Order> = Ref::Id("65f0c1".into());
        assert_eq!(parcel_link(&bare), ("/admin/orders/65f0c1".to_string(), "65f0c1".to_string()));

        let full = Ref::Full(Order {
            id: "65f0c2".into(),
            tracking_id: "PUN-1042".into(),
            ..Order::default()
        });
        assert_eq!(parcel_link(&full), ("/admin/orders/65f0c2".to_string(), "PUN-1042".to_string()));
    }

    #[test]
    fn missing_destination_and_freight_show_dash() {
        let ledger = Ledger::default();
        assert_eq!(destination_label(&ledger), "-");
        assert_eq!(freight_label(None), "-");
    }
}
