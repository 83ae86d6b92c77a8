//! Core traits for Backoffice Console
//!
//! [`RecordApi`] is the seam between the console flows and the collaborator
//! REST API: the desktop app and CLI plug in the `reqwest` client, tests plug
//! in an in-memory fake. [`AuthApi`] covers the login exchange.

use serde_json::Value;

use crate::error::ConsoleResult;
use crate::session::SessionContext;
use crate::types::{Credentials, EntityKind, PasswordChange, Record, RecordId};

// ============================================================================
// RecordApi Trait
// ============================================================================

/// Operations the console performs against the collaborator API
///
/// Every method is a single request; implementations never retry.
#[allow(async_fn_in_trait)]
pub trait RecordApi {
    /// `POST <Entity>/List` with `{ "allRecords": true }`
    async fn list(&self, kind: EntityKind) -> ConsoleResult<Vec<Record>>;

    /// `GET <Entity>/GetById/{id}`; `Ok(None)` when no record matches
    async fn get_by_id(&self, kind: EntityKind, id: RecordId) -> ConsoleResult<Option<Record>>;

    /// `POST <Entity>/Insert`
    async fn insert(&self, kind: EntityKind, payload: &Value) -> ConsoleResult<()>;

    /// `PUT <Entity>/Update`
    async fn update(&self, kind: EntityKind, payload: &Value) -> ConsoleResult<()>;

    /// `POST <Entity>/ChangeStatus`
    async fn change_status(&self, kind: EntityKind, id: RecordId) -> ConsoleResult<()>;

    /// `PUT User/ChangePassword`
    async fn change_password(&self, request: &PasswordChange) -> ConsoleResult<()>;

    /// `POST <resource>/List` for lookup-only resources such as `City`
    async fn list_resource(&self, resource: &str) -> ConsoleResult<Vec<Record>>;
}

// ============================================================================
// AuthApi Trait
// ============================================================================

/// Credential exchange with the collaborator API
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// `POST Auth/login`; the response's `data` object becomes the session
    async fn login(&self, credentials: &Credentials) -> ConsoleResult<SessionContext>;
}
