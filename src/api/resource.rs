//! CRUD Resources
//!
//! Each back-office collection implements [`Resource`]; list pages and forms
//! go through the generic operations below.

use list_query::PageRequest;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::client::{self, Verb};
use crate::error::ApiError;
use crate::models::{Client, Employee, Item, ItemType, Ledger, Order, Paged, Truck, Warehouse};

/// Characters kept verbatim in path segments and query values
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Page size used when loading a whole collection for a picker
const PICKER_LIMIT: u32 = 500;

pub fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, UNRESERVED).to_string()
}

pub fn encode_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_segment(k), encode_segment(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// A backend collection with list/get/create/update/delete endpoints
pub trait Resource: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static {
    /// Collection root, e.g. `/api/admin/manage/truck`
    const BASE: &'static str;
    /// Filters that travel in the list path instead of the query string
    const PATH_FILTERS: &'static [&'static str] = &[];

    fn id(&self) -> &str;

    fn list_path(_request: &PageRequest) -> String {
        Self::BASE.to_string()
    }

    fn create_path() -> String {
        Self::BASE.to_string()
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::BASE, encode_segment(id))
    }
}

pub fn list_url<T: Resource>(request: &PageRequest) -> String {
    let query = encode_query(&request.query_pairs(T::PATH_FILTERS));
    format!("{}?{}", T::list_path(request), query)
}

// ========================
// Generic operations
// ========================

pub async fn list<T: Resource>(request: &PageRequest) -> Result<Paged<T>, ApiError> {
    let url = list_url::<T>(request);
    log::debug!("[API] GET {url}");
    let envelope = client::get_envelope::<Vec<T>>(&url).await?;
    Ok(Paged {
        rows: envelope.body.unwrap_or_default(),
        total_pages: envelope.total_pages,
        total_count: envelope.total_count,
    })
}

/// Whole collection (first `PICKER_LIMIT` rows) for dropdowns
pub async fn list_all<T: Resource>() -> Result<Vec<T>, ApiError> {
    let request = PageRequest {
        seq: 0,
        page: 1,
        page_size: PICKER_LIMIT,
        search: None,
        filters: Default::default(),
    };
    Ok(list::<T>(&request).await?.rows)
}

pub async fn get<T: Resource>(id: &str) -> Result<T, ApiError> {
    client::get(&T::item_path(id)).await
}

/// Create a record; returns the server's copy (with its id) when echoed
pub async fn create<T: Resource>(record: &T) -> Result<T, ApiError> {
    let created: Option<T> = client::send(Verb::Post, &T::create_path(), record).await?;
    Ok(created.unwrap_or_else(|| record.clone()))
}

pub async fn update<T: Resource>(record: &T) -> Result<T, ApiError> {
    let updated: Option<T> = client::send(Verb::Put, &T::item_path(record.id()), record).await?;
    Ok(updated.unwrap_or_else(|| record.clone()))
}

pub async fn delete<T: Resource>(id: &str) -> Result<(), ApiError> {
    log::info!("[API] DELETE {}", T::item_path(id));
    client::delete(&T::item_path(id)).await
}

// ========================
// Collections
// ========================

macro_rules! manage_resource {
    ($ty:ty, $path:literal) => {
        impl Resource for $ty {
            const BASE: &'static str = $path;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

manage_resource!(Client, "/api/admin/manage/regular-client");
manage_resource!(Item, "/api/admin/manage/regular-item");
manage_resource!(ItemType, "/api/admin/manage/item-type");
manage_resource!(Warehouse, "/api/admin/manage/warehouse");
manage_resource!(Truck, "/api/admin/manage/truck");
manage_resource!(Employee, "/api/admin/manage/employee");

impl Resource for Order {
    const BASE: &'static str = "/api/parcel";

    fn id(&self) -> &str {
        &self.id
    }

    fn list_path(_request: &PageRequest) -> String {
        "/api/parcel/all".to_string()
    }

    fn create_path() -> String {
        "/api/parcel/new".to_string()
    }
}

impl Resource for Ledger {
    const BASE: &'static str = "/api/ledger";
    const PATH_FILTERS: &'static [&'static str] = &["date"];

    fn id(&self) -> &str {
        &self.id
    }

    /// Memos are listed per dispatch date
    fn list_path(request: &PageRequest) -> String {
        let date = request
            .filter("date")
            .map(str::to_string)
            .unwrap_or_else(crate::format::today_iso);
        format!("/api/ledger/track-all/{}", encode_segment(&date))
    }

    fn create_path() -> String {
        "/api/ledger/new".to_string()
    }

    fn item_path(id: &str) -> String {
        format!("/api/ledger/track/{}", encode_segment(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use list_query::ListQuery;

    #[test]
    fn client_list_url_carries_paging_and_search() {
        let mut q = ListQuery::new(10);
        q.set_search_input("Shah & Sons");
        q.submit_search();
        let url = list_url::<Client>(&q.request());
        assert_eq!(
            url,
            "/api/admin/manage/regular-client?page=1&limit=10&search=Shah%20%26%20Sons"
        );
    }

    #[test]
    fn ledger_date_goes_in_the_path() {
        let mut q = ListQuery::new(20).with_filter("date", "2024-03-05");
        q.go_to(2);
        let url = list_url::<Ledger>(&q.request());
        assert_eq!(url, "/api/ledger/track-all/2024-03-05?page=2&limit=20");
        assert_eq!(Ledger::item_path("M-7"), "/api/ledger/track/M-7");
    }

    #[test]
    fn order_paths() {
        let req = ListQuery::new(10).with_filter("status", "dispatched").request();
        assert_eq!(list_url::<Order>(&req), "/api/parcel/all?page=1&limit=10&status=dispatched");
        assert_eq!(Order::create_path(), "/api/parcel/new");
        assert_eq!(Order::item_path("a/b"), "/api/parcel/a%2Fb");
        assert_eq!(Truck::item_path("t1"), "/api/admin/manage/truck/t1");
    }
}
