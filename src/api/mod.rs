//! REST API Bindings
//!
//! Frontend bindings to the backend REST endpoints, organized by domain.

mod client;
mod resource;
mod auth;
mod parcel;
mod ledger;

// Re-export all public items
pub use resource::*;
pub use auth::*;
pub use parcel::*;
pub use ledger::*;
