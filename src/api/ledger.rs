//! Ledger (Memo) Endpoints

use super::client::{self, Verb};
use crate::error::ApiError;
use crate::models::{Ledger, NewLedger};

/// Dispatch a new memo grouping the given LRs
pub async fn create_ledger(ledger: &NewLedger) -> Result<Ledger, ApiError> {
    let created: Option<Ledger> = client::send(Verb::Post, "/api/ledger/new", ledger).await?;
    created.ok_or_else(|| ApiError::Decode("server did not return the new memo".to_string()))
}
