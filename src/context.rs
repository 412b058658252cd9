//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient message shown in the notice bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Distinguishes repeats of the same text for auto-dismiss
    pub id: u32,
    pub kind: NoticeKind,
    pub text: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Notice bar message - read
    pub notice: ReadSignal<Option<Notice>>,
    /// Notice bar message - write
    set_notice: WriteSignal<Option<Notice>>,
    /// Path to return to once the user has logged in
    pub after_login: RwSignal<Option<String>>,
}

impl AppContext {
    pub fn new(notice: (ReadSignal<Option<Notice>>, WriteSignal<Option<Notice>>)) -> Self {
        Self {
            notice: notice.0,
            set_notice: notice.1,
            after_login: RwSignal::new(None),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.notify(NoticeKind::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.notify(NoticeKind::Error, text.into());
    }

    pub fn dismiss(&self) {
        self.set_notice.set(None);
    }

    fn notify(&self, kind: NoticeKind, text: String) {
        let id = self
            .notice
            .with_untracked(|n| n.as_ref().map_or(1, |n| n.id.wrapping_add(1)));
        self.set_notice.set(Some(Notice { id, kind, text }));
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
