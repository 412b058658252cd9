//! Freight Desk Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod error;
mod format;
mod list;
mod logging;
mod markdown;
mod models;
mod pages;
mod router;
mod session;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    log::info!("[APP] starting, api base {:?}", config::config().api_base);
    mount_to_body(App);
}
