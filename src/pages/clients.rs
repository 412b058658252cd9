//! Regular clients: list, create, edit, delete.

use leptos::prelude::*;
use list_query::ListQuery;

use super::{non_empty, or_dash};
use crate::components::{DeleteConfirmButton, Modal, PageHeader, TextField};
use crate::config::config;
use crate::list::ListController;
use crate::models::Client;

#[component]
pub fn ClientsPage() -> impl IntoView {
    let list = ListController::<Client>::new(ListQuery::new(config().page_size));
    let editing = RwSignal::new(None::<Client>);

    let rows = move || {
        list.rows
            .get()
            .into_iter()
            .enumerate()
            .map(|(i, client)| {
                let serial = list.serial(i);
                let id = client.id.clone();
                let row = client.clone();
                view! {
                    <tr>
                        <td>{serial}</td>
                        <td>{client.name}</td>
                        <td>{client.phone_no}</td>
                        <td>{or_dash(client.gst)}</td>
                        <td>{or_dash(client.email)}</td>
                        <td>{client.address}</td>
                        <td class="row-actions">
                            <button type="button" class="btn small" on:click=move |_| editing.set(Some(row.clone()))>
                                "Edit"
                            </button>
                            <DeleteConfirmButton prompt="Delete client?" on_confirm=move |_: ()| list.delete(id.clone()) />
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <section class="list-page">
            <PageHeader title="Clients">
                <button type="button" class="btn primary" on:click=move |_| editing.set(Some(Client::default()))>
                    "Add client"
                </button>
            </PageHeader>
            {list.search_bar("Search clients by name or phone")}
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"S.No"</th>
                        <th>"Name"</th>
                        <th>"Phone"</th>
                        <th>"GST"</th>
                        <th>"Email"</th>
                        <th>"Address"</th>
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
                    .map(|client| {
                        view! {
                            <ClientForm
                                client=client
                                on_save=move |record: Client| list.save(record, move || editing.set(None))
                                on_close=move |_: ()| editing.set(None)
                            />
                        }
                    })
            }}
        </section>
    }
}

#[component]
fn ClientForm(
    client: Client,
    #[prop(into)] on_save: Callback<Client>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let title = if client.id.is_empty() { "New client" } else { "Edit client" };
    let id = client.id;
    let name = RwSignal::new(client.name);
    let phone_no = RwSignal::new(client.phone_no);
    let address = RwSignal::new(client.address);
    let gst = RwSignal::new(client.gst.unwrap_or_default());
    let email = RwSignal::new(client.email.unwrap_or_default());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        on_save.run(Client {
            id: id.clone(),
            name: name.get_untracked().trim().to_string(),
            phone_no: phone_no.get_untracked().trim().to_string(),
            address: address.get_untracked().trim().to_string(),
            gst: non_empty(gst.get_untracked()),
            email: non_empty(email.get_untracked()),
        });
    };

    view! {
        <Modal title=title on_close=on_close>
            <form class="record-form" on:submit=on_submit>
                <TextField label="Name" value=name required=true />
                <TextField label="Phone" value=phone_no input_type="tel" required=true />
                <TextField label="Address" value=address />
                <TextField label="GST number" value=gst />
                <TextField label="Email" value=email input_type="email" />
                <div class="form-actions">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn primary">"Save"</button>
                </div>
            </form>
        </Modal>
    }
}
