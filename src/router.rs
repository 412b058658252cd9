//! Route Paths
//!
//! Typed builder for the paths matched by the `<Routes>` table in `app.rs`,
//! plus the pure checks behind the back-office guards.

use percent_encoding::percent_decode_str;

use crate::api::encode_segment;

/// Static child segment of `/admin/orders` and `/admin/ledgers`. It is
/// declared ahead of the `:id` routes, so a record id equal to it cannot be
/// linked to.
pub const NEW_SEGMENT: &str = "new";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    // Public
    Home,
    About,
    Services,
    Contact,
    /// Tracking lookup, optionally for a given tracking id
    Track(Option<String>),
    Login,
    // Back-office
    Dashboard,
    Clients,
    Items,
    ItemTypes,
    Warehouses,
    Trucks,
    Employees,
    Orders,
    NewOrder,
    OrderDetail(String),
    Ledgers,
    NewLedger,
    LedgerDetail(String),
}

/// Result of checking a back-office page against the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    /// Session restore still running, or the profile has not arrived yet
    Pending,
    /// Needs a session; send to login first
    Login,
    /// Signed in but not an admin
    Forbidden,
}

impl Route {
    pub fn href(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::About => "/about".to_string(),
            Route::Services => "/services".to_string(),
            Route::Contact => "/contact".to_string(),
            Route::Track(None) => "/track".to_string(),
            Route::Track(Some(id)) => format!("/track/{}", encode_segment(id)),
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/admin".to_string(),
            Route::Clients => "/admin/clients".to_string(),
            Route::Items => "/admin/items".to_string(),
            Route::ItemTypes => "/admin/item-types".to_string(),
            Route::Warehouses => "/admin/warehouses".to_string(),
            Route::Trucks => "/admin/trucks".to_string(),
            Route::Employees => "/admin/employees".to_string(),
            Route::Orders => "/admin/orders".to_string(),
            Route::NewOrder => format!("/admin/orders/{NEW_SEGMENT}"),
            Route::OrderDetail(id) => format!("/admin/orders/{}", encode_segment(id)),
            Route::Ledgers => "/admin/ledgers".to_string(),
            Route::NewLedger => format!("/admin/ledgers/{NEW_SEGMENT}"),
            Route::LedgerDetail(id) => format!("/admin/ledgers/{}", encode_segment(id)),
        }
    }

    pub fn admin_only(&self) -> bool {
        matches!(self, Route::Warehouses | Route::Trucks | Route::Employees)
    }

    /// Nav links for the landing pages match their path only; section
    /// links also match everything below them.
    pub fn is_exact_link(&self) -> bool {
        matches!(self, Route::Home | Route::Dashboard)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About us",
            Route::Services => "Services",
            Route::Contact => "Contact",
            Route::Track(_) => "Track shipment",
            Route::Login => "Login",
            Route::Dashboard => "Dashboard",
            Route::Clients => "Clients",
            Route::Items => "Items",
            Route::ItemTypes => "Item types",
            Route::Warehouses => "Warehouses",
            Route::Trucks => "Trucks",
            Route::Employees => "Employees",
            Route::Orders => "Orders",
            Route::NewOrder => "New LR",
            Route::OrderDetail(_) => "LR details",
            Route::Ledgers => "Memos",
            Route::NewLedger => "New memo",
            Route::LedgerDetail(_) => "Memo details",
        }
    }
}

/// Decode a `:id` path parameter; plain ids pass through unchanged
pub fn decode_param(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Whether a nav link to `href` is highlighted while `pathname` is open
pub fn is_active_link(pathname: &str, href: &str, exact: bool) -> bool {
    let pathname = match pathname.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    if pathname == href {
        return true;
    }
    !exact
        && pathname
            .strip_prefix(href)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Decide what a back-office page may show.
///
/// `admin` is `None` until the profile has loaded; admin-only pages wait
/// for it instead of bouncing a real admin.
pub fn back_office_access(
    restoring: bool,
    signed_in: bool,
    admin_only: bool,
    admin: Option<bool>,
) -> Access {
    if restoring {
        Access::Pending
    } else if !signed_in {
        Access::Login
    } else if !admin_only {
        Access::Allowed
    } else {
        match admin {
            None => Access::Pending,
            Some(true) => Access::Allowed,
            Some(false) => Access::Forbidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hrefs_are_plain_paths() {
        assert_eq!(Route::Home.href(), "/");
        assert_eq!(Route::Track(None).href(), "/track");
        assert_eq!(Route::Track(Some("LR 12/3".into())).href(), "/track/LR%2012%2F3");
        assert_eq!(Route::ItemTypes.href(), "/admin/item-types");
        assert_eq!(Route::OrderDetail("65f0c1".into()).href(), "/admin/orders/65f0c1");
        assert_eq!(Route::LedgerDetail("M-7".into()).href(), "/admin/ledgers/M-7");
    }

    #[test]
    fn params_decode_from_encoded_hrefs() {
        let href = Route::Track(Some("LR 12/3".into())).href();
        let raw = href.trim_start_matches("/track/");
        assert_eq!(decode_param(raw), "LR 12/3");
        assert_eq!(decode_param("PUN-1042"), "PUN-1042");
    }

    #[test]
    fn new_pages_sit_on_the_reserved_segment() {
        assert_eq!(Route::NewOrder.href(), "/admin/orders/new");
        assert_eq!(Route::NewLedger.href(), "/admin/ledgers/new");
        // Only an id spelled exactly like the segment can shadow a detail page
        assert_ne!(Route::OrderDetail("news".into()).href(), Route::NewOrder.href());
        assert_ne!(Route::LedgerDetail("NEW".into()).href(), Route::NewLedger.href());
        assert_eq!(Route::OrderDetail(NEW_SEGMENT.into()).href(), Route::NewOrder.href());
    }

    #[test]
    fn section_links_stay_active_on_child_pages() {
        let orders = Route::Orders.href();
        assert!(is_active_link("/admin/orders", &orders, false));
        assert!(is_active_link("/admin/orders/new", &orders, false));
        assert!(is_active_link("/admin/orders/65f0c1/", &orders, false));
        assert!(!is_active_link("/admin/orders-archive", &orders, false));
        assert!(!is_active_link("/admin/ledgers", &orders, false));
    }

    #[test]
    fn landing_links_match_only_themselves() {
        assert!(Route::Dashboard.is_exact_link());
        assert!(is_active_link("/admin/", &Route::Dashboard.href(), true));
        assert!(!is_active_link("/admin/clients", &Route::Dashboard.href(), true));
        assert!(is_active_link("", &Route::Home.href(), true));
        assert!(!is_active_link("/about", &Route::Home.href(), true));
    }

    #[test]
    fn back_office_access_rules() {
        assert_eq!(back_office_access(true, false, false, None), Access::Pending);
        assert_eq!(back_office_access(false, false, false, None), Access::Login);
        assert_eq!(back_office_access(false, false, true, Some(true)), Access::Login);
        assert_eq!(back_office_access(false, true, false, None), Access::Allowed);
        assert_eq!(back_office_access(false, true, true, None), Access::Pending);
        assert_eq!(back_office_access(false, true, true, Some(false)), Access::Forbidden);
        assert_eq!(back_office_access(false, true, true, Some(true)), Access::Allowed);
    }
}
