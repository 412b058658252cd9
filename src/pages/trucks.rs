//! Trucks (admin only).

use leptos::prelude::*;
use list_query::ListQuery;

use super::{non_empty, or_dash};
use crate::components::{DeleteConfirmButton, Modal, PageHeader, TextField};
use crate::config::config;
use crate::list::ListController;
use crate::models::Truck;

#[component]
pub fn TrucksPage() -> impl IntoView {
    let list = ListController::<Truck>::new(ListQuery::new(config().page_size));
    let editing = RwSignal::new(None::<Truck>);

    let rows = move || {
        list.rows
            .get()
            .into_iter()
            .enumerate()
            .map(|(i, truck)| {
                let serial = list.serial(i);
                let id = truck.id.clone();
                let row = truck.clone();
                view! {
                    <tr>
                        <td>{serial}</td>
                        <td>{truck.vehicle_no}</td>
                        <td>{or_dash(truck.make)}</td>
                        <td>{or_dash(truck.capacity)}</td>
                        <td>{or_dash(truck.registration_no)}</td>
                        <td class="row-actions">
                            <button type="button" class="btn small" on:click=move |_| editing.set(Some(row.clone()))>
                                "Edit"
                            </button>
                            <DeleteConfirmButton prompt="Delete truck?" on_confirm=move |_: ()| list.delete(id.clone()) />
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <section class="list-page">
            <PageHeader title="Trucks">
                <button type="button" class="btn primary" on:click=move |_| editing.set(Some(Truck::default()))>
                    "Add truck"
                </button>
            </PageHeader>
            {list.search_bar("Search by vehicle number")}
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"S.No"</th>
                        <th>"Vehicle no."</th>
                        <th>"Make"</th>
                        <th>"Capacity"</th>
                        <th>"Registration"</th>
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
                    .map(|truck| {
                        view! {
                            <TruckForm
                                truck=truck
                                on_save=move |record: Truck| list.save(record, move || editing.set(None))
                                on_close=move |_: ()| editing.set(None)
                            />
                        }
                    })
            }}
        </section>
    }
}

#[component]
fn TruckForm(
    truck: Truck,
    #[prop(into)] on_save: Callback<Truck>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let title = if truck.id.is_empty() { "New truck" } else { "Edit truck" };
    let id = truck.id;
    let vehicle_no = RwSignal::new(truck.vehicle_no);
    let make = RwSignal::new(truck.make.unwrap_or_default());
    let capacity = RwSignal::new(truck.capacity.unwrap_or_default());
    let registration_no = RwSignal::new(truck.registration_no.unwrap_or_default());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        on_save.run(Truck {
            id: id.clone(),
            vehicle_no: vehicle_no.get_untracked().trim().to_uppercase(),
            make: non_empty(make.get_untracked()),
            capacity: non_empty(capacity.get_untracked()),
            registration_no: non_empty(registration_no.get_untracked()),
        });
    };

    view! {
        <Modal title=title on_close=on_close>
            <form class="record-form" on:submit=on_submit>
                <TextField label="Vehicle number" value=vehicle_no required=true placeholder="MH12AB1234" />
                <TextField label="Make" value=make />
                <TextField label="Capacity" value=capacity placeholder="e.g. 9 t" />
                <TextField label="Registration number" value=registration_no />
                <div class="form-actions">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn primary">"Save"</button>
                </div>
            </form>
        </Modal>
    }
}
