//! Employees (admin only). Each employee is a login for the back office.

use leptos::prelude::*;
use list_query::ListQuery;

use super::{load_all, non_empty, or_dash};
use crate::components::{DeleteConfirmButton, Modal, PageHeader, SelectField, TextField};
use crate::config::config;
use crate::list::ListController;
use crate::models::{Employee, Warehouse};

const ROLES: &[(&str, &str)] = &[("staff", "Staff"), ("admin", "Admin")];

/// Employee to send; a blank password on edit keeps the current one
fn employee_from_form(base: &Employee, password: String) -> Employee {
    Employee {
        password: (!password.trim().is_empty()).then_some(password),
        ..base.clone()
    }
}

#[component]
pub fn EmployeesPage() -> impl IntoView {
    let list = ListController::<Employee>::new(ListQuery::new(config().page_size));
    let warehouses = RwSignal::new(Vec::<Warehouse>::new());
    load_all(warehouses);
    let editing = RwSignal::new(None::<Employee>);

    let rows = move || {
        list.rows
            .get()
            .into_iter()
            .enumerate()
            .map(|(i, employee)| {
                let serial = list.serial(i);
                let id = employee.id.clone();
                let row = employee.clone();
                view! {
                    <tr>
                        <td>{serial}</td>
                        <td>{employee.name}</td>
                        <td>{employee.username}</td>
                        <td>{or_dash(employee.phone_no)}</td>
                        <td>{or_dash(employee.warehouse_code)}</td>
                        <td>{employee.role}</td>
                        <td class="row-actions">
                            <button type="button" class="btn small" on:click=move |_| editing.set(Some(row.clone()))>
                                "Edit"
                            </button>
                            <DeleteConfirmButton prompt="Remove employee?" on_confirm=move |_: ()| list.delete(id.clone()) />
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <section class="list-page">
            <PageHeader title="Employees">
                <button type="button" class="btn primary" on:click=move |_| editing.set(Some(Employee::default()))>
                    "Add employee"
                </button>
            </PageHeader>
            {list.search_bar("Search employees by name or username")}
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"S.No"</th>
                        <th>"Name"</th>
                        <th>"Username"</th>
                        <th>"Phone"</th>
                        <th>"Warehouse"</th>
                        <th>"Role"</th>
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
                    .map(|employee| {
                        view! {
                            <EmployeeForm
                                employee=employee
                                warehouses=warehouses
                                on_save=move |record: Employee| list.save(record, move || editing.set(None))
                                on_close=move |_: ()| editing.set(None)
                            />
                        }
                    })
            }}
        </section>
    }
}

#[component]
fn EmployeeForm(
    employee: Employee,
    warehouses: RwSignal<Vec<Warehouse>>,
    #[prop(into)] on_save: Callback<Employee>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let creating = employee.id.is_empty();
    let title = if creating { "New employee" } else { "Edit employee" };
    let name = RwSignal::new(employee.name.clone());
    let username = RwSignal::new(employee.username.clone());
    let phone_no = RwSignal::new(employee.phone_no.clone().unwrap_or_default());
    let email = RwSignal::new(employee.email.clone().unwrap_or_default());
    let warehouse_code = RwSignal::new(employee.warehouse_code.clone().unwrap_or_default());
    let role = RwSignal::new(if employee.role.is_empty() { "staff".to_string() } else { employee.role.clone() });
    let password = RwSignal::new(String::new());

    let warehouse_options = Signal::derive(move || {
        warehouses.with(|w| {
            w.iter()
                .map(|w| (w.warehouse_code.clone(), format!("{} ({})", w.name, w.warehouse_code)))
                .collect::<Vec<_>>()
        })
    });
    let role_options = Signal::derive(|| {
        ROLES.iter().map(|(v, l)| (v.to_string(), l.to_string())).collect::<Vec<_>>()
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let base = Employee {
            id: employee.id.clone(),
            name: name.get_untracked().trim().to_string(),
            username: username.get_untracked().trim().to_string(),
            phone_no: non_empty(phone_no.get_untracked()),
            email: non_empty(email.get_untracked()),
            warehouse_code: non_empty(warehouse_code.get_untracked()),
            role: role.get_untracked(),
            password: None,
        };
        on_save.run(employee_from_form(&base, password.get_untracked()));
    };

    view! {
        <Modal title=title on_close=on_close>
            <form class="record-form" on:submit=on_submit>
                <TextField label="Name" value=name required=true />
                <TextField label="Username" value=username required=true />
                <TextField label="Phone" value=phone_no input_type="tel" />
                <TextField label="Email" value=email input_type="email" />
                <SelectField label="Warehouse" value=warehouse_code options=warehouse_options placeholder="No warehouse" />
                <SelectField label="Role" value=role options=role_options required=true />
                <TextField
                    label=if creating { "Password" } else { "New password (leave blank to keep)" }
                    value=password
                    input_type="password"
                    required=creating
                />
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

    #[test]
    fn blank_password_is_left_out() {
        let base = Employee {
            id: "e1".into(),
            name: "Asha".into(),
            username: "asha".into(),
            role: "staff".into(),
            ..Default::default()
        };
        assert_eq!(employee_from_form(&base, "  ".into()).password, None);
        assert_eq!(employee_from_form(&base, " s3cret".into()).password, Some(" s3cret".into()));

        let json = serde_json::to_value(employee_from_form(&base, String::new())).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["_id"], "e1");
    }
}
