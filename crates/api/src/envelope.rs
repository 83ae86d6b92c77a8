//! Response decoding
//!
//! Successful list and fetch responses arrive as `{ "records": [...] }`,
//! sometimes as a bare array. Anything else is an
//! [`UnexpectedShape`](ConsoleError::UnexpectedShape) error; nothing is
//! silently defaulted to empty.

use serde_json::Value;

use backoffice_core::types::json_kind;
use backoffice_core::{ConsoleError, ConsoleResult, Record, RecordId, SessionContext};

/// Key of the record array in the list envelope
pub const RECORDS_KEY: &str = "records";

/// Decode a list response
pub fn decode_records(body: Value) -> ConsoleResult<Vec<Record>> {
    let items = match body {
        Value::Object(mut map) => match map.remove(RECORDS_KEY) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(ConsoleError::shape(format!(
                    "'{}' should be an array, found {}",
                    RECORDS_KEY,
                    json_kind(&other)
                )));
            }
            None => {
                return Err(ConsoleError::shape(format!(
                    "response object has no '{}' array",
                    RECORDS_KEY
                )));
            }
        },
        Value::Array(items) => items,
        other => {
            return Err(ConsoleError::shape(format!(
                "expected a records envelope or an array, found {}",
                json_kind(&other)
            )));
        }
    };

    items.into_iter().map(Record::from_value).collect()
}

/// Decode a fetch-by-id response
///
/// Accepts the list envelope, a bare array, or a bare record object. From
/// an array the record whose `id` equals `id` is taken, else the first one.
/// An empty envelope or `null` means "no such record".
pub fn decode_record(body: Value, id: RecordId) -> ConsoleResult<Option<Record>> {
    let records = match body {
        Value::Null => return Ok(None),
        Value::Object(map) if !map.contains_key(RECORDS_KEY) => {
            return Ok(Some(Record::from_map(map)));
        }
        other => decode_records(other)?,
    };

    if records.len() > 1 {
        tracing::debug!("GetById({}) returned {} records", id, records.len());
    }
    let position = records.iter().position(|r| r.id() == Some(id)).unwrap_or(0);
    Ok(records.into_iter().nth(position))
}

/// Decode a login response into a session (`{ "data": { token, clientId, ... } }`)
pub fn decode_login(body: Value) -> ConsoleResult<SessionContext> {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data @ Value::Object(_)) => SessionContext::from_value(data),
            _ => Err(ConsoleError::shape("login response has no 'data' object")),
        },
        other => Err(ConsoleError::shape(format!(
            "expected a login response object, found {}",
            json_kind(&other)
        ))),
    }
}

/// Derive a user-facing message from an error body
///
/// Validation `errors` maps are flattened and comma-joined; otherwise
/// `message`, then `title`, then a bare string body is used.
pub fn error_message(body: &Value) -> Option<String> {
    if let Value::String(s) = body {
        return non_empty(s);
    }

    if let Some(Value::Object(errors)) = body.get("errors") {
        let messages: Vec<&str> = errors
            .values()
            .flat_map(|v| match v {
                Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
                Value::String(s) => vec![s.as_str()],
                _ => Vec::new(),
            })
            .filter(|s| !s.trim().is_empty())
            .collect();
        if !messages.is_empty() {
            return Some(messages.join(", "));
        }
    }

    ["message", "title"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str).and_then(non_empty))
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::RecordId;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_envelope_and_bare_array() {
        let wrapped = decode_records(json!({ "records": [{ "id": 1 }, { "id": 2 }], "total": 2 }))
            .unwrap();
        let bare = decode_records(json!([{ "id": 1 }, { "id": 2 }])).unwrap();

        assert_eq!(wrapped, bare);
        assert_eq!(wrapped[1].id(), Some(RecordId(2)));
    }

    #[test]
    fn test_wrong_shapes_fail_loudly() {
        for body in [
            json!({ "data": [] }),
            json!({ "records": { "id": 1 } }),
            json!("ok"),
            json!(null),
            json!([1, 2]),
        ] {
            let err = decode_records(body.clone()).unwrap_err();
            assert!(
                matches!(err, ConsoleError::UnexpectedShape(_)),
                "{} should be rejected",
                body
            );
        }
    }

    #[test]
    fn test_decode_record() {
        let first = decode_record(json!({ "records": [{ "id": 5, "name": "A" }] }), RecordId(5))
            .unwrap();
        assert_eq!(first.and_then(|r| r.id()), Some(RecordId(5)));

        let bare = decode_record(json!({ "id": 6 }), RecordId(6)).unwrap();
        assert_eq!(bare.and_then(|r| r.id()), Some(RecordId(6)));

        assert_eq!(decode_record(json!({ "records": [] }), RecordId(1)).unwrap(), None);
        assert_eq!(decode_record(json!(null), RecordId(1)).unwrap(), None);
        assert!(decode_record(json!(42), RecordId(1)).is_err());
    }

    #[test]
    fn test_decode_record_picks_requested_id() {
        let body = json!({
            "records": [
                { "id": 3, "name": "Tower A" },
                { "id": 7, "name": "Tower B" },
                { "id": 9, "name": "Tower C" }
            ]
        });
        let record = decode_record(body.clone(), RecordId(7)).unwrap().unwrap();
        assert_eq!(record.text("name"), Some("Tower B"));

        let bare = decode_record(json!([{ "id": 1 }, { "id": "2" }]), RecordId(2))
            .unwrap()
            .unwrap();
        assert_eq!(bare.id(), Some(RecordId(2)));

        // No match: the first record still wins
        let fallback = decode_record(body, RecordId(42)).unwrap().unwrap();
        assert_eq!(fallback.id(), Some(RecordId(3)));
    }

    #[test]
    fn test_decode_login() {
        let session = decode_login(json!({
            "success": true,
            "data": { "token": "jwt", "clientId": 3, "userName": "ops" }
        }))
        .unwrap();
        assert_eq!(session.token, "jwt");
        assert_eq!(session.client_id, 3);

        assert!(decode_login(json!({ "success": false })).is_err());
        assert!(decode_login(json!([])).is_err());
    }

    #[test]
    fn test_error_message_prefers_validation_errors() {
        let body = json!({
            "title": "One or more validation errors occurred.",
            "errors": {
                "Email": ["Email is required", "Email is invalid"],
                "Name": ["Name is too long"]
            }
        });
        assert_eq!(
            error_message(&body).unwrap(),
            "Email is required, Email is invalid, Name is too long"
        );
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(
            error_message(&json!({ "message": "Room already exists" })).as_deref(),
            Some("Room already exists")
        );
        assert_eq!(
            error_message(&json!({ "errors": {}, "title": "Bad Request" })).as_deref(),
            Some("Bad Request")
        );
        assert_eq!(
            error_message(&json!("Client is inactive")).as_deref(),
            Some("Client is inactive")
        );
        assert_eq!(error_message(&json!({ "message": "" })), None);
        assert_eq!(error_message(&json!(null)), None);
    }
}
