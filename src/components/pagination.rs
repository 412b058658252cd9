//! Pagination Component
//!
//! Range text, page buttons and a page-size picker for a [`ListQuery`].

use leptos::prelude::*;
use list_query::{ListQuery, PageLink, PAGE_SIZE_CHOICES};

/// Page buttons shown around the current page
const WINDOW: u32 = 5;

#[component]
pub fn Pagination(
    #[prop(into)] query: Signal<ListQuery>,
    #[prop(into)] on_page: Callback<u32>,
    #[prop(into)] on_page_size: Callback<u32>,
) -> impl IntoView {
    let page = move || query.with(ListQuery::page);
    let has_prev = move || query.with(ListQuery::has_prev);
    let has_next = move || query.with(ListQuery::has_next);
    let total = move || query.with(ListQuery::total_pages);

    let links = move || {
        query
            .with(|q| q.page_window(WINDOW))
            .into_iter()
            .map(|link| match link {
                PageLink::Page(n) => view! {
                    <button
                        type="button"
                        class="page-btn"
                        class:active=move || page() == n
                        on:click=move |_| on_page.run(n)
                    >
                        {n}
                    </button>
                }
                .into_any(),
                PageLink::Gap => view! { <span class="page-gap">"…"</span> }.into_any(),
            })
            .collect_view()
    };

    view! {
        <div class="pagination">
            <span class="range-label">{move || query.with(ListQuery::range_label)}</span>
            <div class="page-buttons">
                <button
                    type="button"
                    class="page-btn"
                    title="First page"
                    disabled=move || !has_prev()
                    on:click=move |_| on_page.run(1)
                >
                    "«"
                </button>
                <button
                    type="button"
                    class="page-btn"
                    title="Previous page"
                    disabled=move || !has_prev()
                    on:click=move |_| on_page.run(page().saturating_sub(1).max(1))
                >
                    "‹"
                </button>
                {links}
                <button
                    type="button"
                    class="page-btn"
                    title="Next page"
                    disabled=move || !has_next()
                    on:click=move |_| on_page.run(page() + 1)
                >
                    "›"
                </button>
                <button
                    type="button"
                    class="page-btn"
                    title="Last page"
                    disabled=move || !has_next()
                    on:click=move |_| on_page.run(total())
                >
                    "»"
                </button>
            </div>
            <label class="page-size">
                "Rows"
                <select on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        on_page_size.run(size);
                    }
                }>
                    {PAGE_SIZE_CHOICES
                        .iter()
                        .map(|&size| {
                            view! {
                                <option
                                    value=size.to_string()
                                    selected=move || query.with(ListQuery::page_size) == size
                                >
                                    {size}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
        </div>
    }
}
