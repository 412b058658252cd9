//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Only the session
//! and theme live here; list pages keep their rows locally.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::User;
use crate::session::Theme;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user's profile, once fetched
    pub user: Option<User>,
    /// Bearer token mirrored from local storage
    pub token: Option<String>,
    pub theme: Theme,
    /// True while a stored token is being checked against the server
    pub restoring: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_sign_in(store: &AppStore, token: String, user: Option<User>) {
    store.token().set(Some(token));
    store.user().set(user);
    store.restoring().set(false);
}

pub fn store_sign_out(store: &AppStore) {
    store.token().set(None);
    store.user().set(None);
    store.restoring().set(false);
}

/// Tracked: re-runs the caller when the session changes
pub fn is_signed_in(store: &AppStore) -> bool {
    store.token().with(Option::is_some)
}

/// Tracked: false until the profile says otherwise
pub fn is_admin(store: &AppStore) -> bool {
    store.user().with(|user| user.as_ref().is_some_and(User::is_admin))
}
