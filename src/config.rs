//! Application Configuration
//!
//! Values baked in at compile time from the build environment.
//! Set them before `trunk build`, e.g. `FREIGHT_API_BASE=https://api.example.com`.

use std::sync::OnceLock;

/// Local storage key for the bearer token
pub const TOKEN_KEY: &str = "token";
/// Local storage key for the theme preference
pub const THEME_KEY: &str = "theme";

const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_DEBOUNCE_MS: u32 = 400;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Prefix for every API path; empty means same origin
    pub api_base: String,
    /// Rows per page on list pages
    pub page_size: u32,
    /// Quiet period before a typed search is submitted
    pub search_debounce_ms: u32,
    pub log_level: log::Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None, None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("FREIGHT_API_BASE"),
            option_env!("FREIGHT_PAGE_SIZE"),
            option_env!("FREIGHT_SEARCH_DEBOUNCE_MS"),
            option_env!("FREIGHT_LOG_LEVEL"),
        )
    }

    fn from_values(
        api_base: Option<&str>,
        page_size: Option<&str>,
        debounce_ms: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        Self {
            api_base: api_base.unwrap_or("").trim_end_matches('/').to_string(),
            page_size: page_size
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            search_debounce_ms: debounce_ms
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DEBOUNCE_MS),
            log_level: log_level
                .and_then(|v| v.parse().ok())
                .unwrap_or(log::Level::Info),
        }
    }

    /// Absolute URL for an API path such as `/api/parcel/all`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Global configuration, built on first use
pub fn config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_base, "");
        assert_eq!(cfg.page_size, 10);
        assert_eq!(cfg.search_debounce_ms, 400);
        assert_eq!(cfg.log_level, log::Level::Info);
        assert_eq!(cfg.url("/api/parcel/all"), "/api/parcel/all");
    }

    #[test]
    fn parses_overrides_and_ignores_garbage() {
        let cfg = AppConfig::from_values(
            Some("https://api.example.com/"),
            Some("25"),
            Some("soon"),
            Some("debug"),
        );
        assert_eq!(cfg.url("/api/auth/me"), "https://api.example.com/api/auth/me");
        assert_eq!(cfg.page_size, 25);
        assert_eq!(cfg.search_debounce_ms, 400);
        assert_eq!(cfg.log_level, log::Level::Debug);

        let zero = AppConfig::from_values(None, Some("0"), None, None);
        assert_eq!(zero.page_size, 10);
    }
}
