//! Items and item types.

use leptos::prelude::*;
use list_query::ListQuery;

use super::{load_all, non_empty, or_dash};
use crate::components::{DeleteConfirmButton, Modal, PageHeader, SelectField, TextField};
use crate::config::config;
use crate::list::ListController;
use crate::models::{Item, ItemType, Ref};

/// Type name for an item, resolving bare ids against the loaded types
fn type_name(item_type: Option<&Ref<ItemType>>, types: &[ItemType]) -> String {
    match item_type {
        Some(Ref::Full(t)) => t.name.clone(),
        Some(Ref::Id(id)) if !id.is_empty() => types
            .iter()
            .find(|t| &t.id == id)
            .map_or_else(|| id.clone(), |t| t.name.clone()),
        _ => "-".to_string(),
    }
}

fn type_id(item_type: Option<&Ref<ItemType>>) -> String {
    match item_type {
        Some(Ref::Full(t)) => t.id.clone(),
        Some(Ref::Id(id)) => id.clone(),
        None => String::new(),
    }
}

#[component]
pub fn ItemsPage() -> impl IntoView {
    let list = ListController::<Item>::new(ListQuery::new(config().page_size));
    let types = RwSignal::new(Vec::<ItemType>::new());
    load_all(types);
    let editing = RwSignal::new(None::<Item>);

    let rows = move || {
        list.rows
            .get()
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let serial = list.serial(i);
                let id = item.id.clone();
                let kind = types.with(|t| type_name(item.item_type.as_ref(), t));
                let row = item.clone();
                view! {
                    <tr>
                        <td>{serial}</td>
                        <td>{item.name}</td>
                        <td>{kind}</td>
                        <td>{or_dash(item.hsn_code)}</td>
                        <td class="row-actions">
                            <button type="button" class="btn small" on:click=move |_| editing.set(Some(row.clone()))>
                                "Edit"
                            </button>
                            <DeleteConfirmButton prompt="Delete item?" on_confirm=move |_: ()| list.delete(id.clone()) />
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <section class="list-page">
            <PageHeader title="Items">
                <button type="button" class="btn primary" on:click=move |_| editing.set(Some(Item::default()))>
                    "Add item"
                </button>
            </PageHeader>
            {list.search_bar("Search items")}
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"S.No"</th>
                        <th>"Name"</th>
                        <th>"Type"</th>
                        <th>"HSN code"</th>
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
                    .map(|item| {
                        view! {
                            <ItemForm
                                item=item
                                types=types
                                on_save=move |record: Item| list.save(record, move || editing.set(None))
                                on_close=move |_: ()| editing.set(None)
                            />
                        }
                    })
            }}
        </section>
    }
}

#[component]
fn ItemForm(
    item: Item,
    types: RwSignal<Vec<ItemType>>,
    #[prop(into)] on_save: Callback<Item>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let title = if item.id.is_empty() { "New item" } else { "Edit item" };
    let item_type = RwSignal::new(type_id(item.item_type.as_ref()));
    let id = item.id;
    let name = RwSignal::new(item.name);
    let hsn_code = RwSignal::new(item.hsn_code.unwrap_or_default());

    let options = Signal::derive(move || {
        types.with(|t| t.iter().map(|t| (t.id.clone(), t.name.clone())).collect::<Vec<_>>())
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        on_save.run(Item {
            id: id.clone(),
            name: name.get_untracked().trim().to_string(),
            item_type: non_empty(item_type.get_untracked()).map(Ref::Id),
            hsn_code: non_empty(hsn_code.get_untracked()),
        });
    };

    view! {
        <Modal title=title on_close=on_close>
            <form class="record-form" on:submit=on_submit>
                <TextField label="Name" value=name required=true />
                <SelectField label="Type" value=item_type options=options placeholder="No type" />
                <TextField label="HSN code" value=hsn_code />
                <div class="form-actions">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn primary">"Save"</button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
pub fn ItemTypesPage() -> impl IntoView {
    let list = ListController::<ItemType>::new(ListQuery::new(config().page_size));
    let editing = RwSignal::new(None::<ItemType>);

    let rows = move || {
        list.rows
            .get()
            .into_iter()
            .enumerate()
            .map(|(i, item_type)| {
                let serial = list.serial(i);
                let id = item_type.id.clone();
                let row = item_type.clone();
                view! {
                    <tr>
                        <td>{serial}</td>
                        <td>{item_type.name}</td>
                        <td class="row-actions">
                            <button type="button" class="btn small" on:click=move |_| editing.set(Some(row.clone()))>
                                "Edit"
                            </button>
                            <DeleteConfirmButton prompt="Delete type?" on_confirm=move |_: ()| list.delete(id.clone()) />
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <section class="list-page">
            <PageHeader title="Item types">
                <button type="button" class="btn primary" on:click=move |_| editing.set(Some(ItemType::default()))>
                    "Add type"
                </button>
            </PageHeader>
            {list.search_bar("Search item types")}
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"S.No"</th>
                        <th>"Name"</th>
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
                    .map(|item_type| {
                        view! {
                            <ItemTypeForm
                                item_type=item_type
                                on_save=move |record: ItemType| list.save(record, move || editing.set(None))
                                on_close=move |_: ()| editing.set(None)
                            />
                        }
                    })
            }}
        </section>
    }
}

#[component]
fn ItemTypeForm(
    item_type: ItemType,
    #[prop(into)] on_save: Callback<ItemType>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let title = if item_type.id.is_empty() { "New item type" } else { "Edit item type" };
    let id = item_type.id;
    let name = RwSignal::new(item_type.name);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        on_save.run(ItemType {
            id: id.clone(),
            name: name.get_untracked().trim().to_string(),
        });
    };

    view! {
        <Modal title=title on_close=on_close>
            <form class="record-form" on:submit=on_submit>
                <TextField label="Name" value=name required=true />
                <div class="form-actions">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn primary">"Save"</button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grains() -> ItemType {
        ItemType { id: "t1".into(), name: "Grains".into() }
    }

    #[test]
    fn type_name_resolves_ids_against_loaded_types() {
        let types = vec![grains()];
        assert_eq!(type_name(Some(&Ref::Full(grains())), &[]), "Grains");
        assert_eq!(type_name(Some(&Ref::Id("t1".into())), &types), "Grains");
        assert_eq!(type_name(Some(&Ref::Id("t9".into())), &types), "t9");
        assert_eq!(type_name(Some(&Ref::Id(String::new())), &types), "-");
        assert_eq!(type_name(None, &types), "-");
    }

    #[test]
    fn type_id_reads_either_shape() {
        assert_eq!(type_id(Some(&Ref::Full(grains()))), "t1");
        assert_eq!(type_id(Some(&Ref::Id("t2".into()))), "t2");
        assert_eq!(type_id(None), "");
    }
}
