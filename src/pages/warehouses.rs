//! Warehouses (admin only).

use leptos::prelude::*;
use list_query::ListQuery;

use super::{non_empty, or_dash};
use crate::components::{CheckboxField, DeleteConfirmButton, Modal, PageHeader, TextField};
use crate::config::config;
use crate::list::ListController;
use crate::models::Warehouse;

#[component]
pub fn WarehousesPage() -> impl IntoView {
    let list = ListController::<Warehouse>::new(ListQuery::new(config().page_size));
    let editing = RwSignal::new(None::<Warehouse>);

    let rows = move || {
        list.rows
            .get()
            .into_iter()
            .enumerate()
            .map(|(i, warehouse)| {
                let serial = list.serial(i);
                let id = warehouse.id.clone();
                let row = warehouse.clone();
                view! {
                    <tr>
                        <td>{serial}</td>
                        <td>{warehouse.warehouse_code}</td>
                        <td>{warehouse.name}</td>
                        <td>{warehouse.address}</td>
                        <td>{or_dash(warehouse.phone_no)}</td>
                        <td>{if warehouse.is_source { "Yes" } else { "No" }}</td>
                        <td class="row-actions">
                            <button type="button" class="btn small" on:click=move |_| editing.set(Some(row.clone()))>
                                "Edit"
                            </button>
                            <DeleteConfirmButton prompt="Delete warehouse?" on_confirm=move |_: ()| list.delete(id.clone()) />
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <section class="list-page">
            <PageHeader title="Warehouses">
                <button type="button" class="btn primary" on:click=move |_| editing.set(Some(Warehouse::default()))>
                    "Add warehouse"
                </button>
            </PageHeader>
            {list.search_bar("Search warehouses by name or code")}
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"S.No"</th>
                        <th>"Code"</th>
                        <th>"Name"</th>
                        <th>"Address"</th>
                        <th>"Phone"</th>
                        <th>"Source"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            {list.status()}
            {list.pagination()}
            {move || {
                editing
                    .get()
                    .map(|warehouse| {
                        view! {
                            <WarehouseForm
                                warehouse=warehouse
                                on_save=move |record: Warehouse| list.save(record, move || editing.set(None))
                                on_close=move |_: ()| editing.set(None)
                            />
                        }
                    })
            }}
        </section>
    }
}

#[component]
fn WarehouseForm(
    warehouse: Warehouse,
    #[prop(into)] on_save: Callback<Warehouse>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let title = if warehouse.id.is_empty() { "New warehouse" } else { "Edit warehouse" };
    let id = warehouse.id;
    let name = RwSignal::new(warehouse.name);
    let code = RwSignal::new(warehouse.warehouse_code);
    let address = RwSignal::new(warehouse.address);
    let phone_no = RwSignal::new(warehouse.phone_no.unwrap_or_default());
    let is_source = RwSignal::new(warehouse.is_source);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        on_save.run(Warehouse {
            id: id.clone(),
            name: name.get_untracked().trim().to_string(),
            warehouse_code: code.get_untracked().trim().to_uppercase(),
            address: address.get_untracked().trim().to_string(),
            phone_no: non_empty(phone_no.get_untracked()),
            is_source: is_source.get_untracked(),
        });
    };

    view! {
        <Modal title=title on_close=on_close>
            <form class="record-form" on:submit=on_submit>
                <TextField label="Name" value=name required=true />
                <TextField label="Code" value=code required=true placeholder="e.g. PUN" />
                <TextField label="Address" value=address />
                <TextField label="Phone" value=phone_no input_type="tel" />
                <CheckboxField label="Dispatches parcels (source warehouse)" value=is_source />
                <div class="form-actions">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn primary">"Save"</button>
                </div>
            </form>
        </Modal>
    }
}
