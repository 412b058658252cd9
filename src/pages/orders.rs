//! Orders (LRs): list with filters, booking form and detail view.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use list_query::ListQuery;

use super::track::StatusTimeline;
use super::{load_all, load_by_route_id, non_empty, or_dash, warehouse_options};
use crate::api;
use crate::components::{CheckboxField, PageHeader, SelectField, Spinner, TextField};
use crate::config::config;
use crate::context::use_app_context;
use crate::format::{format_amount, format_optional_date, status_label};
use crate::list::ListController;
use crate::models::{Item, NewOrder, Order, OrderItem, Party, Warehouse};
use crate::router::Route;
use crate::session;
use crate::store::{use_app_store, AppStateStoreFields};

pub const ORDER_STATUSES: &[&str] = &["booked", "dispatched", "arrived", "delivered", "cancelled"];

#[component]
pub fn OrdersPage() -> impl IntoView {
    let list = ListController::<Order>::new(ListQuery::new(config().page_size));
    let warehouses = RwSignal::new(Vec::<Warehouse>::new());
    load_all(warehouses);

    let rows = move || {
        list.rows
            .get()
            .into_iter()
            .enumerate()
            .map(|(i, order)| {
                let serial = list.serial(i);
                let href = Route::OrderDetail(order.id.clone()).href();
                let packages = order.package_count();
                view! {
                    <tr>
                        <td>{serial}</td>
                        <td><a href=href>{order.tracking_id}</a></td>
                        <td>{format_optional_date(order.placed_at.as_deref())}</td>
                        <td>{order.source_warehouse.label()}</td>
                        <td>{order.destination_warehouse.label()}</td>
                        <td>{order.sender.name}</td>
                        <td>{order.receiver.name}</td>
                        <td>{packages}</td>
                        <td><span class="status-badge">{status_label(&order.status)}</span></td>
                    </tr>
                }
            })
            .collect_view()
    };

    let filter_value = move |key: &'static str| {
        move || list.query.with(|q| q.filter(key).unwrap_or_default().to_string())
    };

    view! {
        <section class="list-page">
            <PageHeader title="Orders">
                <a href=Route::NewOrder.href() class="btn primary">"New LR"</a>
            </PageHeader>
            <div class="list-toolbar">
                {list.search_bar("Search by tracking number, sender or receiver")}
                <select
                    class="filter"
                    prop:value=filter_value("status")
                    on:change=move |ev| list.set_filter("status", event_target_value(&ev))
                >
                    <option value="">"All statuses"</option>
                    {ORDER_STATUSES
                        .iter()
                        .map(|s| view! { <option value=*s>{status_label(s)}</option> })
                        .collect_view()}
                </select>
                <select
                    class="filter"
                    prop:value=filter_value("sourceWarehouse")
                    on:change=move |ev| list.set_filter("sourceWarehouse", event_target_value(&ev))
                >
                    <option value="">"All source warehouses"</option>
                    <For
                        each=move || warehouses.get()
                        key=|w| w.id.clone()
                        children=|w| view! { <option value=w.id.clone()>{w.name}</option> }
                    />
                </select>
            </div>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"S.No"</th>
                        <th>"Tracking no."</th>
                        <th>"Booked"</th>
                        <th>"From"</th>
                        <th>"To"</th>
                        <th>"Sender"</th>
                        <th>"Receiver"</th>
                        <th>"Pkgs"</th>
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
// Booking form
// ========================

/// One editable item line, kept as typed until submit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub quantity: String,
    pub freight: String,
    pub hamali: String,
    pub statistical: String,
}

impl ItemDraft {
    fn new() -> Self {
        Self {
            quantity: "1".to_string(),
            ..Default::default()
        }
    }

    /// Validate and convert; `line` is 1-based for messages
    pub fn to_item(&self, line: usize) -> Result<OrderItem, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(format!("Line {line}: item name is required"));
        }
        let quantity = match self.quantity.trim().parse::<u32>() {
            Ok(q) if q > 0 => q,
            _ => return Err(format!("Line {line}: quantity must be a whole number above zero")),
        };
        Ok(OrderItem {
            name: name.to_string(),
            item_type: None,
            quantity,
            freight: parse_amount(&self.freight, line, "freight")?,
            hamali: parse_amount(&self.hamali, line, "hamali")?,
            statistical: parse_amount(&self.statistical, line, "statistical charge")?,
        })
    }
}

/// Blank means zero
fn parse_amount(raw: &str, line: usize, what: &str) -> Result<f64, String> {
    let raw = raw.trim().replace(',', "");
    if raw.is_empty() {
        return Ok(0.0);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(format!("Line {line}: {what} must be a non-negative amount")),
    }
}

#[derive(Clone, Copy)]
struct DraftRow {
    key: u32,
    draft: RwSignal<ItemDraft>,
}

/// Name, phone, address and GST inputs for one side of the LR
#[derive(Clone, Copy)]
struct PartyFields {
    name: RwSignal<String>,
    phone_no: RwSignal<String>,
    address: RwSignal<String>,
    gst: RwSignal<String>,
}

impl PartyFields {
    fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            phone_no: RwSignal::new(String::new()),
            address: RwSignal::new(String::new()),
            gst: RwSignal::new(String::new()),
        }
    }

    fn party(&self) -> Party {
        Party {
            name: self.name.get_untracked().trim().to_string(),
            phone_no: self.phone_no.get_untracked().trim().to_string(),
            address: self.address.get_untracked().trim().to_string(),
            gst: non_empty(self.gst.get_untracked()),
        }
    }

    fn view(self, heading: &'static str) -> impl IntoView {
        view! {
            <fieldset class="party">
                <legend>{heading}</legend>
                <TextField label="Name" value=self.name required=true />
                <TextField label="Phone" value=self.phone_no input_type="tel" />
                <TextField label="Address" value=self.address />
                <TextField label="GST number" value=self.gst />
            </fieldset>
        }
    }
}

/// Form-level checks before anything is sent
fn validate_order(order: &NewOrder) -> Result<(), String> {
    if order.source_warehouse.is_empty() || order.destination_warehouse.is_empty() {
        return Err("Choose both source and destination warehouses".to_string());
    }
    if order.source_warehouse == order.destination_warehouse {
        return Err("Source and destination must differ".to_string());
    }
    if order.sender.name.is_empty() || order.receiver.name.is_empty() {
        return Err("Sender and receiver names are required".to_string());
    }
    if order.items.is_empty() {
        return Err("Add at least one item".to_string());
    }
    Ok(())
}

#[component]
pub fn NewOrderPage() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let warehouses = RwSignal::new(Vec::<Warehouse>::new());
    let known_items = RwSignal::new(Vec::<Item>::new());
    load_all(warehouses);
    load_all(known_items);

    let source = RwSignal::new(String::new());
    let destination = RwSignal::new(String::new());
    let sender = PartyFields::new();
    let receiver = PartyFields::new();
    let pay_later = RwSignal::new(false);

    let next_key = StoredValue::new(1u32);
    let lines = RwSignal::new(vec![DraftRow { key: 0, draft: RwSignal::new(ItemDraft::new()) }]);
    let add_line = move |_| {
        let key = next_key.get_value();
        next_key.set_value(key + 1);
        lines.update(|l| l.push(DraftRow { key, draft: RwSignal::new(ItemDraft::new()) }));
    };

    let (error, set_error) = signal(None::<String>);
    let (submitting, set_submitting) = signal(false);
    let navigate = use_navigate();

    // Staff book from their own warehouse by default
    Effect::new(move |_| {
        let code = store.user().with(|u| u.as_ref().and_then(|u| u.warehouse_code.clone()));
        let Some(code) = code else { return };
        let found = warehouses.with(|all| all.iter().find(|w| w.warehouse_code == code).map(|w| w.id.clone()));
        if let Some(id) = found {
            if source.with_untracked(String::is_empty) {
                source.set(id);
            }
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let items: Result<Vec<OrderItem>, String> = lines
            .get_untracked()
            .iter()
            .enumerate()
            .map(|(i, row)| row.draft.with_untracked(|d| d.to_item(i + 1)))
            .collect();
        let items = match items {
            Ok(items) => items,
            Err(e) => {
                set_error.set(Some(e));
                return;
            }
        };
        let order = NewOrder {
            source_warehouse: source.get_untracked(),
            destination_warehouse: destination.get_untracked(),
            sender: sender.party(),
            receiver: receiver.party(),
            items,
            pay_later: pay_later.get_untracked(),
        };
        if let Err(e) = validate_order(&order) {
            set_error.set(Some(e));
            return;
        }

        set_error.set(None);
        set_submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::create_order(&order).await {
                Ok(created) => {
                    ctx.success(format!("LR {} booked", created.tracking_id));
                    let next = if created.id.is_empty() {
                        Route::Orders
                    } else {
                        Route::OrderDetail(created.id)
                    };
                    navigate(&next.href(), NavigateOptions::default());
                }
                Err(e) => {
                    log::error!("[ORDERS] booking failed: {e}");
                    if e.is_unauthorized() {
                        session::sign_out(store);
                    }
                    set_error.try_set(Some(e.to_string()));
                    set_submitting.try_set(false);
                }
            }
        });
    };

    let options = warehouse_options(warehouses);

    view! {
        <section class="form-page">
            <PageHeader title="New LR" />
            <form class="record-form wide" on:submit=on_submit>
                <div class="form-row">
                    <SelectField label="Source warehouse" value=source options=options required=true />
                    <SelectField label="Destination warehouse" value=destination options=options required=true />
                </div>
                <div class="form-row">
                    {sender.view("Sender")}
                    {receiver.view("Receiver")}
                </div>
                <datalist id="known-items">
                    <For
                        each=move || known_items.get()
                        key=|item| item.id.clone()
                        children=|item| view! { <option value=item.name></option> }
                    />
                </datalist>
                <table class="data-table item-lines">
                    <thead>
                        <tr>
                            <th>"#"</th>
                            <th>"Item"</th>
                            <th>"Qty"</th>
                            <th>"Freight"</th>
                            <th>"Hamali"</th>
                            <th>"Statistical"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || lines.get().into_iter().enumerate()
                            key=|(i, row)| (*i, row.key)
                            children=move |(i, row)| view! { <ItemLine index=i row=row lines=lines /> }
                        />
                    </tbody>
                </table>
                <button type="button" class="btn" on:click=add_line>"+ Add item"</button>
                <CheckboxField label="Pay later (freight collected at destination)" value=pay_later />
                {move || error.get().map(|e| view! { <p class="list-error">{e}</p> })}
                <div class="form-actions">
                    <a href=Route::Orders.href() class="btn">"Cancel"</a>
                    <button type="submit" class="btn primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Booking..." } else { "Book LR" }}
                    </button>
                </div>
            </form>
        </section>
    }
}

#[component]
fn ItemLine(index: usize, row: DraftRow, lines: RwSignal<Vec<DraftRow>>) -> impl IntoView {
    let draft = row.draft;
    let field = move |read: fn(&ItemDraft) -> &String, write: fn(&mut ItemDraft, String)| {
        view! {
            <input
                type="text"
                prop:value=move || draft.with(|d| read(d).clone())
                on:input=move |ev| draft.update(|d| write(d, event_target_value(&ev)))
            />
        }
    };

    view! {
        <tr>
            <td>{index + 1}</td>
            <td>
                <input
                    type="text"
                    list="known-items"
                    prop:value=move || draft.with(|d| d.name.clone())
                    on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
                />
            </td>
            <td>{field(|d| &d.quantity, |d, v| d.quantity = v)}</td>
            <td>{field(|d| &d.freight, |d, v| d.freight = v)}</td>
            <td>{field(|d| &d.hamali, |d, v| d.hamali = v)}</td>
            <td>{field(|d| &d.statistical, |d, v| d.statistical = v)}</td>
            <td>
                <Show when=move || lines.with(|l| l.len() > 1)>
                    <button
                        type="button"
                        class="btn small"
                        title="Remove line"
                        on:click=move |_| lines.update(|l| l.retain(|r| r.key != row.key))
                    >
                        "✕"
                    </button>
                </Show>
            </td>
        </tr>
    }
}

// ========================
// Detail
// ========================

#[component]
pub fn OrderDetailPage() -> impl IntoView {
    let order = load_by_route_id::<Order>("This LR does not exist");

    view! {
        <section class="detail-page">
            <PageHeader title="LR details">
                <a href=Route::Orders.href() class="btn">"Back to orders"</a>
                <button type="button" class="btn" on:click=move |_| { let _ = window().print(); }>"Print"</button>
            </PageHeader>
            {move || match order.get() {
                None => view! { <Spinner /> }.into_any(),
                Some(Err(message)) => view! { <p class="list-error">{message}</p> }.into_any(),
                Some(Ok(order)) => view! { <OrderSummary order=order /> }.into_any(),
            }}
        </section>
    }
}

#[component]
fn OrderSummary(order: Order) -> impl IntoView {
    let party = |p: Party| {
        view! {
            <div class="party">
                <strong>{p.name}</strong>
                <div>{p.phone_no}</div>
                <div>{p.address}</div>
                <div>"GST: " {or_dash(p.gst)}</div>
            </div>
        }
    };
    let packages = order.package_count();

    view! {
        <dl class="details">
            <dt>"Tracking number"</dt>
            <dd>{order.tracking_id.clone()}</dd>
            <dt>"Booked on"</dt>
            <dd>{format_optional_date(order.placed_at.as_deref())}</dd>
            <dt>"Status"</dt>
            <dd><span class="status-badge">{status_label(&order.status)}</span></dd>
            <dt>"From"</dt>
            <dd>{order.source_warehouse.label()}</dd>
            <dt>"To"</dt>
            <dd>{order.destination_warehouse.label()}</dd>
            <dt>"Payment"</dt>
            <dd>{if order.pay_later { "To pay" } else { "Paid" }}</dd>
            <dt>"Packages"</dt>
            <dd>{packages}</dd>
        </dl>
        <div class="form-row">
            <div>
                <h3>"Sender"</h3>
                {party(order.sender)}
            </div>
            <div>
                <h3>"Receiver"</h3>
                {party(order.receiver)}
            </div>
        </div>
        <table class="data-table">
            <thead>
                <tr>
                    <th>"#"</th>
                    <th>"Item"</th>
                    <th>"Qty"</th>
                    <th>"Freight"</th>
                    <th>"Hamali"</th>
                    <th>"Statistical"</th>
                </tr>
            </thead>
            <tbody>
                {order
                    .items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| {
                        view! {
                            <tr>
                                <td>{i + 1}</td>
                                <td>{item.name}</td>
                                <td>{item.quantity}</td>
                                <td>{format_amount(item.freight)}</td>
                                <td>{format_amount(item.hamali)}</td>
                                <td>{format_amount(item.statistical)}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
        <h3>"History"</h3>
        <StatusTimeline events=order.status_history />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, qty: &str, freight: &str) -> ItemDraft {
        ItemDraft {
            name: name.into(),
            quantity: qty.into(),
            freight: freight.into(),
            ..Default::default()
        }
    }

    #[test]
    fn draft_converts_with_blank_amounts_as_zero() {
        let item = draft(" Rice bags ", "12", "1,250.50").to_item(1).unwrap();
        assert_eq!(item.name, "Rice bags");
        assert_eq!(item.quantity, 12);
        assert_eq!(item.freight, 1250.5);
        assert_eq!(item.hamali, 0.0);
        assert_eq!(item.statistical, 0.0);
    }

    #[test]
    fn draft_rejects_bad_lines() {
        assert_eq!(
            draft("", "1", "").to_item(2).unwrap_err(),
            "Line 2: item name is required"
        );
        assert!(draft("Box", "0", "").to_item(1).unwrap_err().contains("quantity"));
        assert!(draft("Box", "1.5", "").to_item(1).unwrap_err().contains("quantity"));
        assert!(draft("Box", "1", "-4").to_item(3).unwrap_err().starts_with("Line 3: freight"));
        assert!(draft("Box", "1", "abc").to_item(1).is_err());
    }

    #[test]
    fn order_needs_distinct_warehouses_and_items() {
        let mut order = NewOrder {
            source_warehouse: "w1".into(),
            destination_warehouse: "w1".into(),
            sender: Party { name: "Shah Traders".into(), ..Default::default() },
            receiver: Party { name: "Patel & Co".into(), ..Default::default() },
            items: vec![],
            pay_later: false,
        };
        assert_eq!(validate_order(&order).unwrap_err(), "Source and destination must differ");

        order.destination_warehouse = "w2".into();
        assert_eq!(validate_order(&order).unwrap_err(), "Add at least one item");

        order.items.push(draft("Box", "1", "").to_item(1).unwrap());
        assert_eq!(validate_order(&order), Ok(()));

        order.source_warehouse.clear();
        assert!(validate_order(&order).is_err());
    }
}
