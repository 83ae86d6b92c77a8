//! Session context and its persisted form
//!
//! The collaborator's login response is stored verbatim as a single JSON
//! blob under the well-known key [`SESSION_KEY`]. Every authorized flow
//! receives an immutable [`SessionContext`] built from that blob; nothing
//! outside [`SessionStore`] touches the file.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::{ConsoleError, ConsoleResult};

/// Key under which the session blob is persisted
pub const SESSION_KEY: &str = "token";

/// File name of the persisted session inside the config directory
pub const SESSION_FILE_NAME: &str = "session.json";

// ============================================================================
// Session Context
// ============================================================================

/// Authentication token and tenant identifier of the logged-in operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    /// Bearer token for authorized requests
    pub token: String,

    /// Tenant (client) identifier stamped onto new records
    #[serde(deserialize_with = "deserialize_client_id")]
    pub client_id: i64,

    /// Everything else the login response carried (user name, role, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionContext {
    /// Create a session from its two required parts
    pub fn new(token: impl Into<String>, client_id: i64) -> Self {
        Self {
            token: token.into(),
            client_id,
            extra: Map::new(),
        }
    }

    /// Build a session from the `data` object of a login response
    pub fn from_value(value: Value) -> ConsoleResult<Self> {
        let session: SessionContext = serde_json::from_value(value)
            .map_err(|e| ConsoleError::InvalidSession(e.to_string()))?;
        if session.token.trim().is_empty() {
            return Err(ConsoleError::InvalidSession("empty token".to_string()));
        }
        Ok(session)
    }

    /// Display name for the toolbar, when the login response carried one
    pub fn display_name(&self) -> Option<&str> {
        ["userName", "username", "name", "email"]
            .iter()
            .find_map(|key| self.extra.get(*key).and_then(Value::as_str))
    }
}

/// Accepts the tenant id as either a number or a numeric string.
fn deserialize_client_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    struct ClientIdVisitor;

    impl<'de> de::Visitor<'de> for ClientIdVisitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("an integer or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::custom("client id out of range"))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            v.trim()
                .parse()
                .map_err(|_| E::custom(format!("'{}' is not a numeric client id", v)))
        }
    }

    deserializer.deserialize_any(ClientIdVisitor)
}

// ============================================================================
// Session Store
// ============================================================================

/// File-backed store for the persisted session blob
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session
    ///
    /// Returns [`ConsoleError::NotLoggedIn`] when the file or the key is
    /// absent.
    pub fn load(&self) -> ConsoleResult<SessionContext> {
        let mut blob = self.read_blob()?;
        match blob.remove(SESSION_KEY) {
            Some(Value::Null) | None => Err(ConsoleError::NotLoggedIn),
            Some(value) => SessionContext::from_value(value),
        }
    }

    /// Persist a session, keeping any unrelated keys in the file
    pub fn save(&self, session: &SessionContext) -> ConsoleResult<()> {
        let mut blob = self.read_blob()?;
        blob.insert(SESSION_KEY.to_string(), serde_json::to_value(session)?);
        self.write_blob(&blob)?;
        tracing::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    /// Remove the persisted session
    pub fn clear(&self) -> ConsoleResult<()> {
        let mut blob = self.read_blob()?;
        if blob.remove(SESSION_KEY).is_some() {
            self.write_blob(&blob)?;
            tracing::debug!("Session cleared from {}", self.path.display());
        }
        Ok(())
    }

    fn read_blob(&self) -> ConsoleResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let contents =
            std::fs::read_to_string(&self.path).map_err(|e| ConsoleError::FileRead {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&contents)? {
            Value::Object(map) => Ok(map),
            _ => Err(ConsoleError::InvalidSession(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_blob(&self, blob: &Map<String, Value>) -> ConsoleResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ConsoleError::FileWrite {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }
        }

        let json = serde_json::to_string_pretty(blob)?;
        std::fs::write(&self.path, json).map_err(|e| ConsoleError::FileWrite {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
