//! Notice Bar Component
//!
//! Shows the latest success/error notice and hides it after a few seconds.

use leptos::prelude::*;
use leptos::task::spawn_local;
use gloo_timers::future::TimeoutFuture;

use crate::context::{use_app_context, NoticeKind};

const DISMISS_AFTER_MS: u32 = 4000;

#[component]
pub fn NoticeBar() -> impl IntoView {
    let ctx = use_app_context();

    // Each new notice schedules its own dismissal; a newer one replaces it
    Effect::new(move |_| {
        let Some(id) = ctx.notice.with(|n| n.as_ref().map(|n| n.id)) else {
            return;
        };
        spawn_local(async move {
            TimeoutFuture::new(DISMISS_AFTER_MS).await;
            let still_showing = ctx
                .notice
                .try_with_untracked(|n| n.as_ref().is_some_and(|n| n.id == id))
                .unwrap_or(false);
            if still_showing {
                ctx.dismiss();
            }
        });
    });

    move || {
        ctx.notice.get().map(|notice| {
            let class = match notice.kind {
                NoticeKind::Success => "notice notice-success",
                NoticeKind::Error => "notice notice-error",
            };
            view! {
                <div class=class role="alert">
                    <span>{notice.text}</span>
                    <button type="button" class="btn-close" on:click=move |_| ctx.dismiss()>
                        "✕"
                    </button>
                </div>
            }
        })
    }
}
