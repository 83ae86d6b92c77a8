//! HTTP client for the collaborator REST API
//!
//! One request per call: no retry and no client-side timeout. Transport
//! failures, non-2xx responses and mis-shaped bodies all surface as
//! [`ConsoleError`] values for the calling flow to report.

use reqwest::{Client, Response};
use serde_json::{Value, json};

use backoffice_core::{
    AuthApi, ConsoleConfig, ConsoleError, ConsoleResult, Credentials, EntityKind, PasswordChange,
    Record, RecordApi, RecordId, SessionContext,
};

use crate::endpoint::Endpoint;
use crate::envelope;

// ============================================================================
// API Client
// ============================================================================

/// Typed client for the collaborator REST API
///
/// # Example
///
/// ```rust,ignore
/// let api = ApiClient::new("http://127.0.0.1:5000/api")?.with_token(&session.token);
/// let clients = api.list(EntityKind::Client).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// The underlying reqwest HTTP client.
    client: Client,
    /// Base URL without a trailing slash.
    base_url: String,
    /// Bearer token for authorized requests.
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>) -> ConsoleResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ConsoleError::transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Create a client for the configured base URL
    pub fn from_config(config: &ConsoleConfig) -> ConsoleResult<Self> {
        Self::new(config.base_url())
    }

    /// Set the bearer token sent with authorized requests
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Authorize as the given session
    pub fn with_session(self, session: &SessionContext) -> Self {
        self.with_token(session.token.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for an endpoint of `resource`
    pub fn url(&self, endpoint: Endpoint, resource: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.path(resource))
    }

    // ========================================================================
    // Request helpers
    // ========================================================================

    /// Send one request and return the decoded JSON body
    ///
    /// `null` when the body is empty or the endpoint is a command.
    async fn send(&self, endpoint: Endpoint, resource: &str, body: Option<&Value>) -> ConsoleResult<Value> {
        let url = self.url(endpoint, resource);
        let method = endpoint.method();
        tracing::debug!("{} {}", method, url);

        let mut req = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            req = req.json(body);
        }
        if endpoint.is_authorized() {
            if let Some(token) = &self.token {
                req = req.bearer_auth(token);
            }
        }

        let response = req.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {}", method, url, e);
            ConsoleError::transport(e.to_string())
        })?;

        self.handle_response(endpoint, response).await
    }

    /// Check for errors and read the body on success.
    async fn handle_response(&self, endpoint: Endpoint, response: Response) -> ConsoleResult<Value> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ConsoleError::transport(format!("failed to read response body: {}", e)))?;

        if status.is_success() {
            if !endpoint.returns_body() {
                tracing::debug!("{} accepted ({} byte reply ignored)", status, text.len());
                return Ok(Value::Null);
            }
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text)
                .map_err(|e| ConsoleError::shape(format!("response is not valid JSON: {}", e)));
        }

        let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
        let message = envelope::error_message(&body).unwrap_or_default();
        tracing::warn!("API returned {}: {}", status, message);
        Err(ConsoleError::api(status.as_u16(), message))
    }
}

// ============================================================================
// Collaborator operations
// ============================================================================

impl RecordApi for ApiClient {
    async fn list(&self, kind: EntityKind) -> ConsoleResult<Vec<Record>> {
        self.list_resource(kind.resource()).await
    }

    async fn get_by_id(&self, kind: EntityKind, id: RecordId) -> ConsoleResult<Option<Record>> {
        let body = self.send(Endpoint::GetById(id), kind.resource(), None).await?;
        envelope::decode_record(body, id)
    }

    async fn insert(&self, kind: EntityKind, payload: &Value) -> ConsoleResult<()> {
        self.send(Endpoint::Insert, kind.resource(), Some(payload)).await?;
        Ok(())
    }

    async fn update(&self, kind: EntityKind, payload: &Value) -> ConsoleResult<()> {
        self.send(Endpoint::Update, kind.resource(), Some(payload)).await?;
        Ok(())
    }

    async fn change_status(&self, kind: EntityKind, id: RecordId) -> ConsoleResult<()> {
        let body = status_body(kind, id);
        self.send(Endpoint::ChangeStatus, kind.resource(), Some(&body)).await?;
        Ok(())
    }

    async fn change_password(&self, request: &PasswordChange) -> ConsoleResult<()> {
        let body = serde_json::to_value(request)?;
        self.send(Endpoint::ChangePassword, EntityKind::User.resource(), Some(&body))
            .await?;
        Ok(())
    }

    async fn list_resource(&self, resource: &str) -> ConsoleResult<Vec<Record>> {
        let body = self
            .send(Endpoint::List, resource, Some(&list_body()))
            .await?;
        envelope::decode_records(body)
    }
}

impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> ConsoleResult<SessionContext> {
        let body = serde_json::to_value(credentials)?;
        let response = self.send(Endpoint::Login, "Auth", Some(&body)).await?;
        envelope::decode_login(response)
    }
}

/// Body of every list request
pub fn list_body() -> Value {
    json!({ "allRecords": true })
}

/// Body of a status change request for `kind`
pub fn status_body(kind: EntityKind, id: RecordId) -> Value {
    let mut body = serde_json::Map::new();
    body.insert(kind.status_key().to_string(), Value::from(id.0));
    Value::Object(body)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use tokio_test::block_on;

    /// Answer a single request with a canned response; joins to the raw request
    fn serve_once(status: &str, content_type: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/api", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            content_type,
            body.len(),
            body
        );

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            request
        });
        (base_url, handle)
    }

    /// Read headers plus a `Content-Length` body
    fn read_request(stream: &mut impl Read) -> String {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&raw);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if raw.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&raw).into_owned()
    }

    #[test]
    fn test_url_building() {
        let api = ApiClient::new("http://127.0.0.1:5000/api/").unwrap();
        assert_eq!(api.base_url(), "http://127.0.0.1:5000/api");
        assert_eq!(
            api.url(Endpoint::GetById(RecordId(3)), "Client"),
            "http://127.0.0.1:5000/api/Client/GetById/3"
        );
        assert_eq!(
            api.url(Endpoint::Login, "Auth"),
            "http://127.0.0.1:5000/api/Auth/login"
        );
    }

    #[test]
    fn test_from_config() {
        let config = ConsoleConfig {
            api_base_url: "https://pgm.example.com/api/".to_string(),
            ..Default::default()
        };
        let api = ApiClient::from_config(&config).unwrap();
        assert_eq!(api.base_url(), "https://pgm.example.com/api");
    }

    #[test]
    fn test_request_bodies() {
        assert_eq!(list_body(), json!({ "allRecords": true }));
        assert_eq!(status_body(EntityKind::Room, RecordId(4)), json!({ "RoomId": 4 }));
        assert_eq!(
            status_body(EntityKind::Building, RecordId(4)),
            json!({ "BuildingId": 4 })
        );
        assert_eq!(status_body(EntityKind::User, RecordId(4)), json!({ "id": 4 }));
    }

    #[test]
    fn test_password_change_body() {
        let body = serde_json::to_value(PasswordChange {
            user_id: RecordId(8),
            old_password: "a".to_string(),
            new_password: "b".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({ "userId": 8, "oldPassword": "a", "newPassword": "b" }));
    }

    #[test]
    fn test_login_body() {
        let body = serde_json::to_value(Credentials::new("ops@example.com", "pw")).unwrap();
        assert_eq!(
            body,
            json!({ "userName": "ops@example.com", "password": "pw", "remindMe": true })
        );
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) is closed on test machines.
        let api = ApiClient::new("http://127.0.0.1:9/api").unwrap().with_token("t");
        let err = block_on(api.list(EntityKind::Client)).unwrap_err();
        assert!(err.is_transport(), "{:?}", err);
    }

    #[test]
    fn test_plain_text_status_change_succeeds() {
        let (base_url, server) = serve_once("200 OK", "text/plain", "Status changed successfully");
        let api = ApiClient::new(base_url).unwrap().with_token("jwt");

        block_on(api.change_status(EntityKind::Room, RecordId(1))).unwrap();

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /api/Room/ChangeStatus "), "{}", request);
        assert!(request.contains("{\"RoomId\":1}"), "{}", request);
        assert!(request.to_lowercase().contains("authorization: bearer jwt"));
    }

    #[test]
    fn test_plain_text_insert_succeeds() {
        let (base_url, server) = serve_once("201 Created", "text/plain", "Client created");
        let api = ApiClient::new(base_url).unwrap().with_token("jwt");

        block_on(api.insert(EntityKind::Client, &json!({ "name": "Acme" }))).unwrap();
        assert!(server.join().unwrap().starts_with("POST /api/Client/Insert "));
    }

    #[test]
    fn test_empty_update_reply_succeeds() {
        let (base_url, server) = serve_once("200 OK", "text/plain", "");
        let api = ApiClient::new(base_url).unwrap().with_token("jwt");

        block_on(api.update(EntityKind::Building, &json!({ "id": 2 }))).unwrap();
        assert!(server.join().unwrap().starts_with("PUT /api/Building/Update "));
    }

    #[test]
    fn test_validation_errors_are_flattened() {
        let body = r#"{"title":"One or more validation errors occurred.","errors":{"Email":["Email already exists"],"Name":["Name is required"]}}"#;
        let (base_url, server) = serve_once("400 Bad Request", "application/json", body);
        let api = ApiClient::new(base_url).unwrap().with_token("jwt");

        let err = block_on(api.insert(EntityKind::Client, &json!({}))).unwrap_err();
        server.join().unwrap();

        assert!(
            matches!(
                &err,
                ConsoleError::Api { status: 400, message }
                    if message == "Email already exists, Name is required"
            ),
            "{:?}",
            err
        );
        assert_eq!(err.user_message(), "Email already exists, Name is required");
    }

    #[test]
    fn test_server_error_without_body() {
        let (base_url, server) = serve_once("500 Internal Server Error", "text/plain", "");
        let api = ApiClient::new(base_url).unwrap().with_token("jwt");

        let err = block_on(api.change_status(EntityKind::Client, RecordId(4))).unwrap_err();
        server.join().unwrap();

        assert!(matches!(&err, ConsoleError::Api { status: 500, message } if message.is_empty()));
        assert_eq!(err.user_message(), "The server returned an error (HTTP 500).");
    }

    #[test]
    fn test_plain_text_error_body_is_the_message() {
        let (base_url, server) = serve_once("409 Conflict", "text/plain", "Room already exists");
        let api = ApiClient::new(base_url).unwrap().with_token("jwt");

        let err = block_on(api.update(EntityKind::Room, &json!({ "id": 1 }))).unwrap_err();
        server.join().unwrap();
        assert_eq!(err.user_message(), "Room already exists");
    }

    #[test]
    fn test_list_with_wrong_shape() {
        let (base_url, server) = serve_once("200 OK", "application/json", r#"{"data":[]}"#);
        let api = ApiClient::new(base_url).unwrap().with_token("jwt");

        let err = block_on(api.list(EntityKind::Building)).unwrap_err();
        let request = server.join().unwrap();

        assert!(matches!(err, ConsoleError::UnexpectedShape(_)), "{:?}", err);
        assert!(request.contains("{\"allRecords\":true}"));
    }

    #[test]
    fn test_list_with_plain_text_body() {
        let (base_url, server) = serve_once("200 OK", "text/plain", "ok");
        let api = ApiClient::new(base_url).unwrap().with_token("jwt");

        let err = block_on(api.list(EntityKind::Client)).unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, ConsoleError::UnexpectedShape(_)), "{:?}", err);
    }

    #[test]
    fn test_get_by_id_reads_envelope() {
        let body = r#"{"records":[{"id":3,"name":"Tower A"},{"id":7,"name":"Tower B"}]}"#;
        let (base_url, server) = serve_once("200 OK", "application/json", body);
        let api = ApiClient::new(base_url).unwrap().with_token("jwt");

        let record = block_on(api.get_by_id(EntityKind::Building, RecordId(7)))
            .unwrap()
            .unwrap();
        assert!(server.join().unwrap().starts_with("GET /api/Building/GetById/7 "));
        assert_eq!(record.text("name"), Some("Tower B"));
    }

    #[test]
    fn test_login_skips_bearer_token() {
        let body = r#"{"success":true,"data":{"token":"fresh","clientId":3}}"#;
        let (base_url, server) = serve_once("200 OK", "application/json", body);
        let api = ApiClient::new(base_url).unwrap().with_token("stale");

        let session = block_on(api.login(&Credentials::new("ops", "pw"))).unwrap();
        let request = server.join().unwrap();

        assert_eq!(session.token, "fresh");
        assert!(request.starts_with("POST /api/Auth/login "));
        assert!(!request.to_lowercase().contains("authorization:"));
    }
}
