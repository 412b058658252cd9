//! Session and Preferences
//!
//! The bearer token and the theme are the only things kept in local
//! storage. Everything else is fetched per page.

use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::{Deserialize, Serialize};

use crate::api;
use crate::config::{THEME_KEY, TOKEN_KEY};
use crate::models::LoginResponse;
use crate::store::{store_sign_in, store_sign_out, AppStateStoreFields, AppStore};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

// ========================
// Storage
// ========================

pub fn stored_token() -> Option<String> {
    LocalStorage::get::<String>(TOKEN_KEY)
        .ok()
        .filter(|token| !token.is_empty())
}

fn save_token(token: &str) {
    if let Err(e) = LocalStorage::set(TOKEN_KEY, token) {
        log::warn!("[SESSION] could not persist token: {e}");
    }
}

fn clear_token() {
    LocalStorage::delete(TOKEN_KEY);
}

pub fn stored_theme() -> Theme {
    LocalStorage::get::<Theme>(THEME_KEY).unwrap_or_default()
}

/// Reflect the theme on `<html data-theme=…>` for the stylesheet
pub fn apply_theme(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

// ========================
// Session flows
// ========================

/// Load the stored theme and token at startup. A stored token is checked
/// against the server; a rejected one is discarded.
pub fn restore(store: AppStore) {
    store.theme().set(stored_theme());

    let Some(token) = stored_token() else {
        return;
    };
    store.token().set(Some(token));
    store.restoring().set(true);

    spawn_local(async move {
        match api::current_user().await {
            Ok(user) => {
                log::info!("[SESSION] restored session for {}", user.username);
                store.user().set(Some(user));
                store.restoring().set(false);
            }
            Err(e) if e.is_unauthorized() => {
                log::info!("[SESSION] stored token rejected");
                clear_token();
                store_sign_out(&store);
            }
            Err(e) => {
                // Keep the token; the profile can be fetched later
                log::warn!("[SESSION] could not load profile: {e}");
                store.restoring().set(false);
            }
        }
    });
}

pub fn sign_in(store: AppStore, response: LoginResponse) {
    save_token(&response.token);
    let needs_profile = response.user.is_none();
    store_sign_in(&store, response.token, response.user);

    if needs_profile {
        spawn_local(async move {
            match api::current_user().await {
                Ok(user) => store.user().set(Some(user)),
                Err(e) => log::warn!("[SESSION] could not load profile: {e}"),
            }
        });
    }
}

pub fn sign_out(store: AppStore) {
    log::info!("[SESSION] signed out");
    clear_token();
    store_sign_out(&store);
}

pub fn toggle_theme(store: AppStore) {
    let theme = store.theme().get_untracked().toggled();
    store.theme().set(theme);
    if let Err(e) = LocalStorage::set(THEME_KEY, theme) {
        log::warn!("[SESSION] could not persist theme: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_round_trips_as_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), r#""dark""#);
        let theme: Theme = serde_json::from_str(r#""light""#).unwrap();
        assert_eq!(theme, Theme::Light);
        assert_eq!(Theme::default().toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().as_str(), "light");
    }
}
