use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::api;
use crate::components::TextField;
use crate::context::use_app_context;
use crate::router::Route;
use crate::session;
use crate::store::{is_signed_in, use_app_store, AppStateStoreFields};

#[component]
pub fn LoginPage() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let navigate = use_navigate();

    // Already signed in: nothing to do here. Skipped while a submit is
    // finishing, which picks its own destination.
    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            if !store.restoring().get() && is_signed_in(&store) && !submitting.get_untracked() {
                navigate(&Route::Dashboard.href(), NavigateOptions { replace: true, ..Default::default() });
            }
        });
    }

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let user = username.get_untracked().trim().to_string();
        let pass = password.get_untracked();
        if user.is_empty() || pass.is_empty() {
            set_error.set(Some("Enter your username and password".to_string()));
            return;
        }

        set_submitting.set(true);
        set_error.set(None);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(&user, &pass).await {
                Ok(response) => {
                    log::info!("[SESSION] signed in as {user}");
                    session::sign_in(store, response);
                    let target = ctx
                        .after_login
                        .try_update(Option::take)
                        .flatten()
                        .unwrap_or_else(|| Route::Dashboard.href());
                    navigate(&target, NavigateOptions::default());
                }
                Err(e) => {
                    let message = if e.is_unauthorized() {
                        "Invalid username or password".to_string()
                    } else {
                        e.to_string()
                    };
                    set_error.try_set(Some(message));
                    set_submitting.try_set(false);
                }
            }
        });
    };

    view! {
        <Title text=Route::Login.title() />
        <section class="login-page">
            <form class="login-form" on:submit=on_submit>
                <h1>"Staff login"</h1>
                <TextField label="Username" value=username required=true />
                <TextField label="Password" value=password input_type="password" required=true />
                {move || error.get().map(|e| view! { <p class="list-error">{e}</p> })}
                <button type="submit" class="btn primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Login" }}
                </button>
            </form>
        </section>
    }
}
