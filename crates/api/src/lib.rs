//! # Backoffice API
//!
//! `reqwest` implementation of the [`RecordApi`](backoffice_core::RecordApi)
//! and [`AuthApi`](backoffice_core::AuthApi) seams:
//!
//! - **client**: `ApiClient`, bearer auth and response handling
//! - **endpoint**: the `<Resource>/<Action>` endpoint table
//! - **envelope**: the single decoder for list, fetch and login bodies,
//!   plus error-body message extraction
//!

pub mod client;
pub mod endpoint;
pub mod envelope;

pub use client::ApiClient;
pub use endpoint::Endpoint;
pub use envelope::{decode_record, decode_records, error_message};
