//! Core types for Backoffice Console
//!
//! Entity kinds, record identifiers, the schemaless [`Record`] every list and
//! form works with, and the transient [`Notice`] surfaced to the operator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use crate::error::{ConsoleError, ConsoleResult};

// ============================================================================
// Entity Kind
// ============================================================================

/// The record types managed by a list/form pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Client,
    User,
    Role,
    BillingProfile,
    Building,
    Room,
}

impl EntityKind {
    /// Every entity kind, in navigation order
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Client,
        EntityKind::User,
        EntityKind::Role,
        EntityKind::BillingProfile,
        EntityKind::Building,
        EntityKind::Room,
    ];

    /// Resource segment used by the collaborator API (`<resource>/List`)
    pub fn resource(&self) -> &'static str {
        match self {
            EntityKind::Client => "Client",
            EntityKind::User => "User",
            EntityKind::Role => "Role",
            EntityKind::BillingProfile => "BillingProfile",
            EntityKind::Building => "Building",
            EntityKind::Room => "Room",
        }
    }

    /// Path segment used by console routes and CLI arguments
    pub fn slug(&self) -> &'static str {
        match self {
            EntityKind::Client => "clients",
            EntityKind::User => "users",
            EntityKind::Role => "roles",
            EntityKind::BillingProfile => "billing",
            EntityKind::Building => "buildings",
            EntityKind::Room => "rooms",
        }
    }

    /// Human-readable singular name
    pub fn display_name(&self) -> &'static str {
        match self {
            EntityKind::Client => "Client",
            EntityKind::User => "User",
            EntityKind::Role => "Role",
            EntityKind::BillingProfile => "Billing Profile",
            EntityKind::Building => "Building",
            EntityKind::Room => "Room",
        }
    }

    /// Human-readable plural name
    pub fn plural_name(&self) -> &'static str {
        match self {
            EntityKind::Client => "Clients",
            EntityKind::User => "Users",
            EntityKind::Role => "Roles",
            EntityKind::BillingProfile => "Billing Profiles",
            EntityKind::Building => "Buildings",
            EntityKind::Room => "Rooms",
        }
    }

    /// Icon shown in navigation
    pub fn icon(&self) -> &'static str {
        match self {
            EntityKind::Client => "🏢",
            EntityKind::User => "👤",
            EntityKind::Role => "🛡️",
            EntityKind::BillingProfile => "🧾",
            EntityKind::Building => "🏬",
            EntityKind::Room => "🚪",
        }
    }

    /// Fields the free-text search looks at (dotted paths allowed)
    pub fn search_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Client => &["name", "email"],
            EntityKind::User => &["firstName", "lastName", "email", "role.name"],
            EntityKind::Role => &["name"],
            EntityKind::BillingProfile => &["name", "gstNumber"],
            EntityKind::Building => &["name"],
            EntityKind::Room => &["name"],
        }
    }

    /// Body key carrying the target id in a `ChangeStatus` request
    pub fn status_key(&self) -> &'static str {
        match self {
            EntityKind::Room => "RoomId",
            EntityKind::Building => "BuildingId",
            _ => "id",
        }
    }

    /// Whether new records are stamped with the session's tenant id
    pub fn is_tenant_scoped(&self) -> bool {
        matches!(
            self,
            EntityKind::User
                | EntityKind::BillingProfile
                | EntityKind::Building
                | EntityKind::Room
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for EntityKind {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "client" | "clients" => Ok(EntityKind::Client),
            "user" | "users" => Ok(EntityKind::User),
            "role" | "roles" => Ok(EntityKind::Role),
            "billing" | "billingprofile" | "billingprofiles" => Ok(EntityKind::BillingProfile),
            "building" | "buildings" => Ok(EntityKind::Building),
            "room" | "rooms" => Ok(EntityKind::Room),
            _ => Err(ConsoleError::UnknownEntity(s.to_string())),
        }
    }
}

// ============================================================================
// Record Identifier
// ============================================================================

/// Identifier assigned to a record by the collaborator API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    /// Read an identifier from a JSON value (number or numeric string)
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(RecordId),
            Value::String(s) => s.trim().parse().ok().map(RecordId),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(RecordId)
            .map_err(|_| ConsoleError::validation(format!("'{}' is not a record id", s)))
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId(value)
    }
}

// ============================================================================
// Record
// ============================================================================

/// A single entity record: a mapping from field name to JSON value
///
/// Shapes differ per entity kind, so the console never assumes more than
/// an identifier and, for most kinds, an `isActive` flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing JSON object
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Convert a JSON value, failing unless it is an object
    pub fn from_value(value: Value) -> ConsoleResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ConsoleError::shape(format!(
                "expected a record object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Builder-style field setter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set a top-level field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a field by dotted path (`role.name`)
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut current = self.0.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// String value at `path`, if present and a string
    pub fn text(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// The record identifier (`id`, falling back to `userId`)
    pub fn id(&self) -> Option<RecordId> {
        self.get("id")
            .and_then(RecordId::from_value)
            .or_else(|| self.get("userId").and_then(RecordId::from_value))
    }

    /// The `isActive` flag, if the record carries one
    pub fn is_active(&self) -> Option<bool> {
        self.get("isActive").and_then(Value::as_bool)
    }

    /// Overwrite the `isActive` flag
    pub fn set_active(&mut self, active: bool) {
        self.0.insert("isActive".to_string(), Value::Bool(active));
    }

    /// Render the value at `path` for a table cell
    pub fn display(&self, path: &str) -> String {
        match self.get(path) {
            None | Some(Value::Null) => "—".to_string(),
            Some(Value::String(s)) if s.is_empty() => "—".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Bool(b)) => if *b { "Yes" } else { "No" }.to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Array(items)) => format!("[{} items]", items.len()),
            Some(Value::Object(_)) => "{…}".to_string(),
        }
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert into a JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Short name of a JSON value's type, for error messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Request Payloads
// ============================================================================

/// Body of a `User/ChangePassword` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub user_id: RecordId,
    pub old_password: String,
    pub new_password: String,
}

/// Body of an `Auth/login` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
    pub remind_me: bool,
}

impl Credentials {
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            password: password.into(),
            remind_me: true,
        }
    }
}

// ============================================================================
// Notices
// ============================================================================

/// Notice severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient, user-visible message (toast)
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: Uuid,
    pub level: NoticeLevel,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Notice {
    /// Create a notice with the given level
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, text)
    }

    /// Whether this notice reports a failure
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    /// Whether the notice has been shown for at least `ttl` as of `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => now - self.created_at >= ttl,
            Err(_) => false,
        }
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.is_expired_at(Utc::now(), ttl)
    }
}

// ============================================================================
// Tests
// ============================================================================
