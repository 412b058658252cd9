//! Browser console logging

use crate::config::config;

/// Route the `log` facade to the browser console. Call once at startup.
pub fn init() {
    wasm_logger::init(wasm_logger::Config::new(config().log_level));
    log::debug!("[LOG] console logger ready at {}", config().log_level);
}
