//! List Controller
//!
//! Binds a [`ListQuery`] to Leptos signals and a [`Resource`] endpoint:
//! search, filter and page changes trigger a fetch, responses land in
//! `rows`, and stale responses are dropped by the query's request sequence.

use leptos::prelude::*;
use leptos::task::spawn_local;
use list_query::{ListQuery, Outcome};

use crate::api::{self, Resource};
use crate::components::{Pagination, SearchBar, Spinner};
use crate::context::{use_app_context, AppContext};
use crate::error::ApiError;
use crate::session;
use crate::store::{use_app_store, AppStore};

pub struct ListController<T: Resource> {
    pub query: RwSignal<ListQuery>,
    /// Rows of the current page only
    pub rows: RwSignal<Vec<T>>,
    /// Last fetch error, cleared by the next successful fetch
    pub error: RwSignal<Option<String>>,
    store: AppStore,
    ctx: AppContext,
}

impl<T: Resource> Clone for ListController<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Resource> Copy for ListController<T> {}

impl<T: Resource> ListController<T> {
    /// Create the controller and request the first page.
    /// Must be called inside a component (reads context).
    pub fn new(query: ListQuery) -> Self {
        let controller = Self {
            query: RwSignal::new(query),
            rows: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            store: use_app_store(),
            ctx: use_app_context(),
        };
        controller.fetch();
        controller
    }

    pub fn fetch(self) {
        let Some(request) = self.query.try_update(ListQuery::request) else {
            return;
        };
        log::debug!("[LIST] {} page {} (seq {})", T::BASE, request.page, request.seq);

        spawn_local(async move {
            match api::list::<T>(&request).await {
                Ok(page) => {
                    let meta = page.meta();
                    match self.query.try_update(|q| q.apply(request.seq, meta)) {
                        Some(Outcome::Applied) => {
                            self.rows.set(page.rows);
                            self.error.set(None);
                        }
                        Some(Outcome::Refetch) => self.fetch(),
                        // Superseded by a newer request, or the page is gone
                        Some(Outcome::Stale) | None => {}
                    }
                }
                Err(e) => {
                    log::error!("[LIST] {} failed: {e}", T::BASE);
                    self.query.try_update(|q| q.fail(request.seq));
                    self.error.set(Some(e.to_string()));
                    self.expire_if_unauthorized(&e);
                }
            }
        });
    }

    /// Fetch the current page again, keeping search, filters and page
    pub fn reload(self) {
        self.fetch();
    }

    /// Apply `op` and fetch when it reports a change
    fn run(self, op: impl FnOnce(&mut ListQuery) -> bool) {
        if self.query.try_update(op).unwrap_or(false) {
            self.fetch();
        }
    }

    pub fn set_search_input(self, text: String) {
        self.query.update(|q| q.set_search_input(&text));
    }

    pub fn submit_search(self) {
        self.run(ListQuery::submit_search);
    }

    pub fn clear_search(self) {
        self.run(ListQuery::clear_search);
    }

    pub fn go_to(self, page: u32) {
        self.run(move |q| q.go_to(page));
    }

    pub fn set_filter(self, key: &'static str, value: String) {
        self.run(move |q| q.set_filter(key, &value));
    }

    pub fn set_page_size(self, page_size: u32) {
        self.run(move |q| q.set_page_size(page_size));
    }

    /// Serial number for the row at `index` on the current page
    pub fn serial(self, index: usize) -> u64 {
        self.query.with_untracked(|q| q.serial(index))
    }

    pub fn is_loading(self) -> bool {
        self.query.with(ListQuery::is_loading)
    }

    // ========================
    // Mutations
    // ========================

    /// Create (empty id) or update a record, then refresh the page
    pub fn save(self, record: T, on_saved: impl FnOnce() + 'static) {
        spawn_local(async move {
            let creating = record.id().is_empty();
            let result = if creating {
                api::create(&record).await
            } else {
                api::update(&record).await
            };
            match result {
                Ok(_) => {
                    self.ctx.success(if creating { "Saved" } else { "Updated" });
                    on_saved();
                    self.fetch();
                }
                Err(e) => self.action_failed(e),
            }
        });
    }

    /// Delete then refetch, so the page and totals reflect the server
    pub fn delete(self, id: String) {
        spawn_local(async move {
            match api::delete::<T>(&id).await {
                Ok(()) => {
                    self.ctx.success("Deleted");
                    self.fetch();
                }
                Err(e) => self.action_failed(e),
            }
        });
    }

    fn action_failed(self, e: ApiError) {
        log::error!("[LIST] {} action failed: {e}", T::BASE);
        self.ctx.error(e.to_string());
        self.expire_if_unauthorized(&e);
    }

    fn expire_if_unauthorized(self, e: &ApiError) {
        if e.is_unauthorized() {
            session::sign_out(self.store);
        }
    }

    // ========================
    // Shared widgets
    // ========================

    pub fn search_bar(self, placeholder: &'static str) -> impl IntoView {
        let value = Signal::derive(move || self.query.with(|q| q.search_input().to_string()));
        view! {
            <SearchBar
                value=value
                placeholder=placeholder
                on_input=move |text: String| self.set_search_input(text)
                on_submit=move |_: ()| self.submit_search()
                on_clear=move |_: ()| self.clear_search()
            />
            <button
                type="button"
                class="btn"
                title="Reload this page"
                disabled=move || self.is_loading()
                on:click=move |_| self.reload()
            >
                "Refresh"
            </button>
        }
    }

    pub fn pagination(self) -> impl IntoView {
        view! {
            <Pagination
                query=self.query
                on_page=move |page: u32| self.go_to(page)
                on_page_size=move |size: u32| self.set_page_size(size)
            />
        }
    }

    /// Spinner while loading, error text, or the empty-state line
    pub fn status(self) -> impl IntoView {
        move || {
            if let Some(err) = self.error.get() {
                view! { <div class="list-error">{err}</div> }.into_any()
            } else if self.is_loading() {
                view! { <Spinner /> }.into_any()
            } else if self.query.with(|q| q.is_loaded() && q.row_count() == 0) {
                view! { <div class="list-empty">"No records found"</div> }.into_any()
            } else {
                view! { <span></span> }.into_any()
            }
        }
    }
}
