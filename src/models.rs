//! Frontend Models
//!
//! Data structures matching backend entities. Field names follow the
//! backend's camelCase JSON; ids are the backend's string `_id`.

use serde::{Deserialize, Serialize};

/// Something a table cell or picker can show in one line
pub trait Labeled {
    fn label(&self) -> String;
}

/// Reference to another entity: populated object or bare id/code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Full(T),
    Id(String),
}

impl<T> Default for Ref<T> {
    fn default() -> Self {
        Ref::Id(String::new())
    }
}

impl<T: Labeled> Ref<T> {
    pub fn label(&self) -> String {
        match self {
            Ref::Full(inner) => inner.label(),
            Ref::Id(id) => id.clone(),
        }
    }
}

// ========================
// Envelopes
// ========================

/// Every backend response: `{ flag, body, message }` plus paging totals on
/// list endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(default = "default_true")]
    pub flag: bool,
    pub body: Option<T>,
    pub message: Option<String>,
    pub total_pages: Option<u32>,
    #[serde(alias = "totalElements")]
    pub total_count: Option<u64>,
}

fn default_true() -> bool {
    true
}

impl<T> Envelope<T> {
    /// Acknowledgement with no payload
    pub fn empty() -> Self {
        Self {
            flag: true,
            body: None,
            message: None,
            total_pages: None,
            total_count: None,
        }
    }
}

/// One page of rows plus whatever totals the server reported
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub rows: Vec<T>,
    pub total_pages: Option<u32>,
    pub total_count: Option<u64>,
}

impl<T> Paged<T> {
    pub fn meta(&self) -> list_query::PageMeta {
        list_query::PageMeta {
            rows: self.rows.len(),
            total_pages: self.total_pages,
            total_count: self.total_count,
        }
    }
}

// ========================
// Session
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub warehouse_code: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

// ========================
// Master data
// ========================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone_no: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub gst: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemType {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
}

impl Labeled for ItemType {
    fn label(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub item_type: Option<Ref<ItemType>>,
    #[serde(default)]
    pub hsn_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub warehouse_code: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone_no: Option<String>,
    /// Source warehouses book LRs; the others only receive
    #[serde(default)]
    pub is_source: bool,
}

impl Labeled for Warehouse {
    fn label(&self) -> String {
        format!("{} ({})", self.name, self.warehouse_code)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub phone_no: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub warehouse_code: Option<String>,
    #[serde(default)]
    pub role: String,
    /// Only sent when creating or resetting; never returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub vehicle_no: String,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub capacity: Option<String>,
    #[serde(default)]
    pub registration_no: Option<String>,
}

// ========================
// Orders (LRs) and ledgers (memos)
// ========================

/// Sender or receiver printed on an LR
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone_no: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub gst: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    #[serde(default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub freight: f64,
    #[serde(default)]
    pub hamali: f64,
    #[serde(default)]
    pub statistical: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEvent {
    pub status: String,
    #[serde(default)]
    pub at: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub tracking_id: String,
    #[serde(default)]
    pub placed_at: Option<String>,
    #[serde(default)]
    pub source_warehouse: Ref<Warehouse>,
    #[serde(default)]
    pub destination_warehouse: Ref<Warehouse>,
    #[serde(default)]
    pub sender: Party,
    #[serde(default)]
    pub receiver: Party,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub pay_later: bool,
    #[serde(default)]
    pub status_history: Vec<StatusEvent>,
}

impl Labeled for Order {
    fn label(&self) -> String {
        self.tracking_id.clone()
    }
}

impl Order {
    pub fn package_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// Payload for booking a new LR; the server prices it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub source_warehouse: String,
    pub destination_warehouse: String,
    pub sender: Party,
    pub receiver: Party,
    pub items: Vec<OrderItem>,
    pub pay_later: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub ledger_id: String,
    #[serde(default)]
    pub vehicle_no: String,
    #[serde(default)]
    pub lorry_freight: Option<f64>,
    #[serde(default)]
    pub dispatch_date: Option<String>,
    #[serde(default)]
    pub source_warehouse: Ref<Warehouse>,
    #[serde(default)]
    pub destination_warehouse: Option<Ref<Warehouse>>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub parcels: Vec<Ref<Order>>,
}

/// Payload for dispatching a new memo of LRs
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLedger {
    pub vehicle_no: String,
    pub lorry_freight: Option<f64>,
    pub source_warehouse: String,
    pub destination_warehouse: String,
    pub dispatch_date: String,
    /// Tracking ids of the LRs on this memo
    pub ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_reads_totals_under_either_name() {
        let json = r#"{"flag":true,"body":[{"_id":"c1","name":"Acme","phoneNo":"99"}],"totalPages":3,"totalElements":27}"#;
        let env: Envelope<Vec<Client>> = serde_json::from_str(json).unwrap();
        assert!(env.flag);
        assert_eq!(env.total_pages, Some(3));
        assert_eq!(env.total_count, Some(27));
        let rows = env.body.unwrap();
        assert_eq!(rows[0].id, "c1");
        assert_eq!(rows[0].phone_no, "99");

        let bare: Envelope<Vec<Client>> = serde_json::from_str(r#"{"body":[],"totalCount":0}"#).unwrap();
        assert!(bare.flag);
        assert_eq!(bare.total_count, Some(0));
        assert_eq!(bare.total_pages, None);
    }

    #[test]
    fn rejected_envelope_keeps_message() {
        let env: Envelope<Client> =
            serde_json::from_str(r#"{"flag":false,"message":"Client already exists"}"#).unwrap();
        assert!(!env.flag);
        assert!(env.body.is_none());
        assert_eq!(env.message.as_deref(), Some("Client already exists"));
    }

    #[test]
    fn refs_accept_objects_or_codes() {
        let json = r#"{
            "_id": "o1",
            "trackingId": "PUN-1042",
            "sourceWarehouse": {"_id": "w1", "name": "Pune", "warehouseCode": "PUN"},
            "destinationWarehouse": "BOM",
            "items": [{"name": "Carton", "quantity": 3, "freight": 120.5}],
            "status": "arrived"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.source_warehouse.label(), "Pune (PUN)");
        assert_eq!(order.destination_warehouse.label(), "BOM");
        assert!(matches!(order.destination_warehouse, Ref::Id(_)));
        assert_eq!(order.package_count(), 3);
        assert!(order.status_history.is_empty());
    }

    #[test]
    fn ledger_parcels_may_be_ids() {
        let json = r#"{"ledgerId":"M-7","vehicleNo":"MH12AB1234","parcels":["PUN-1","PUN-2"]}"#;
        let ledger: Ledger = serde_json::from_str(json).unwrap();
        let labels: Vec<String> = ledger.parcels.iter().map(Ref::label).collect();
        assert_eq!(labels, vec!["PUN-1", "PUN-2"]);
        assert!(ledger.destination_warehouse.is_none());
    }

    #[test]
    fn new_records_omit_empty_id_and_password() {
        let client = Client { name: "Acme".into(), ..Default::default() };
        let json = serde_json::to_value(&client).unwrap();
        assert!(json.get("_id").is_none());
        assert_eq!(json["phoneNo"], "");

        let emp = Employee { name: "Asha".into(), username: "asha".into(), ..Default::default() };
        let json = serde_json::to_value(&emp).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn admin_role_is_case_insensitive() {
        let user: User = serde_json::from_str(r#"{"username":"root","role":"ADMIN"}"#).unwrap();
        assert!(user.is_admin());
        assert_eq!(user.display_name(), "root");
    }
}
