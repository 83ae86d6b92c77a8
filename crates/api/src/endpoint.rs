//! Endpoint table
//!
//! Every entity follows the same `<Resource>/<Action>` convention; only
//! login and password change live on fixed resources.

use reqwest::Method;

use backoffice_core::RecordId;

/// One action of the collaborator API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `POST <Resource>/List` with `{ "allRecords": true }`
    List,
    /// `POST <Resource>/Insert`
    Insert,
    /// `PUT <Resource>/Update`
    Update,
    /// `GET <Resource>/GetById/{id}`
    GetById(RecordId),
    /// `POST <Resource>/ChangeStatus`
    ChangeStatus,
    /// `PUT User/ChangePassword`
    ChangePassword,
    /// `POST Auth/login`
    Login,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::GetById(_) => Method::GET,
            Endpoint::Update | Endpoint::ChangePassword => Method::PUT,
            Endpoint::List | Endpoint::Insert | Endpoint::ChangeStatus | Endpoint::Login => {
                Method::POST
            }
        }
    }

    /// Path relative to the base URL
    pub fn path(&self, resource: &str) -> String {
        match self {
            Endpoint::List => format!("{}/List", resource),
            Endpoint::Insert => format!("{}/Insert", resource),
            Endpoint::Update => format!("{}/Update", resource),
            Endpoint::GetById(id) => format!("{}/GetById/{}", resource, id),
            Endpoint::ChangeStatus => format!("{}/ChangeStatus", resource),
            Endpoint::ChangePassword => "User/ChangePassword".to_string(),
            Endpoint::Login => "Auth/login".to_string(),
        }
    }

    /// Whether the request carries the bearer token
    pub fn is_authorized(&self) -> bool {
        !matches!(self, Endpoint::Login)
    }

    /// Whether a 2xx reply carries JSON the caller reads
    ///
    /// Command endpoints succeed on status alone; whatever body they send
    /// (often a plain-text confirmation) is discarded.
    pub fn returns_body(&self) -> bool {
        matches!(self, Endpoint::List | Endpoint::GetById(_) | Endpoint::Login)
    }
}
