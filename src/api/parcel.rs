//! Parcel (LR) Endpoints
//!
//! CRUD goes through [`super::Resource`]; these are the extra routes.

use super::client::{self, Verb};
use super::resource::encode_segment;
use crate::error::ApiError;
use crate::models::{NewOrder, Order};

/// Public tracking lookup by tracking id; works without a session
pub async fn track_parcel(tracking_id: &str) -> Result<Order, ApiError> {
    let path = format!("/api/parcel/track/{}", encode_segment(tracking_id.trim()));
    client::get(&path).await
}

/// Book a new LR. The server assigns the tracking id and prices it.
pub async fn create_order(order: &NewOrder) -> Result<Order, ApiError> {
    let created: Option<Order> = client::send(Verb::Post, "/api/parcel/new", order).await?;
    created.ok_or_else(|| ApiError::Decode("server did not return the new LR".to_string()))
}
