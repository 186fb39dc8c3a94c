//! Wire format of the university backend.
//!
//! Every endpoint answers with the same envelope:
//!
//! ```json
//! { "messageCode": 1200, "message": "...", "data": { ... } }
//! ```
//!
//! Only `messageCode == 1200` counts as success; anything else, including a
//! missing code, is a protocol failure.

use portal_core::{PortalError, Result, UserSummary};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SUCCESS_CODE: i64 = 1200;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "messageCode", default)]
    message_code: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    data: Option<Value>,
}

/// Decodes an envelope body and extracts a typed `data` payload.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| PortalError::protocol(format!("Invalid JSON response: {e}")))?;

    match envelope.message_code.as_ref().and_then(code_value) {
        Some(SUCCESS_CODE) => {}
        Some(code) => {
            return Err(PortalError::protocol(format!(
                "Backend returned messageCode {code}: {}",
                describe_message(envelope.message.as_ref())
            )));
        }
        None => {
            return Err(PortalError::protocol(format!(
                "Response has no messageCode: {}",
                describe_message(envelope.message.as_ref())
            )));
        }
    }

    let data = envelope
        .data
        .ok_or_else(|| PortalError::protocol("Response has no data"))?;

    serde_json::from_value(data)
        .map_err(|e| PortalError::protocol(format!("Unexpected data shape: {e}")))
}

/// Best-effort human message from an error body, for HTTP status errors.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<Envelope>(body) {
        Ok(envelope) if envelope.message.is_some() => describe_message(envelope.message.as_ref()),
        _ => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "empty response body".to_string()
            } else {
                trimmed.chars().take(200).collect()
            }
        }
    }
}

/// Accepts the code as a number or a numeric string.
fn code_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn describe_message(message: Option<&Value>) -> String {
    match message {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "no message".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Body of `POST /Auth/student_login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    /// The backend expects the id as a string.
    pub program_id: String,
    pub login: &'a str,
    pub password: &'a str,
    pub device: &'a str,
}

/// `data` of a successful login.
#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub token: String,
    #[serde(default)]
    pub user: Option<Value>,
}

impl LoginData {
    /// The account record, if the backend sent one in a recognizable shape.
    pub fn user_summary(&self) -> Option<UserSummary> {
        self.user
            .clone()
            .and_then(|user| serde_json::from_value(user).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::Program;

    #[test]
    fn test_success_envelope() {
        let programs: Vec<Program> = decode_envelope(
            r#"{"messageCode": 1200, "data": [{"id": 1, "program": "BSc in CSE", "ordering": 10}]}"#,
        )
        .unwrap();
        assert_eq!(programs, vec![Program::new(1, "BSc in CSE", 10)]);
    }

    #[test]
    fn test_string_code_is_accepted() {
        let data: Value = decode_envelope(r#"{"messageCode": "1200", "data": {}}"#).unwrap();
        assert!(data.is_object());
    }

    #[test]
    fn test_failure_code_carries_message() {
        let err = decode_envelope::<Value>(r#"{"messageCode": 1401, "message": "Unauthorized"}"#)
            .unwrap_err();
        assert!(err.is_protocol());
        assert!(err.to_string().contains("1401"));
        assert!(err.to_string().contains("Unauthorized"));
    }

    #[test]
    fn test_missing_code_is_protocol_error() {
        let err = decode_envelope::<Value>(r#"{"data": []}"#).unwrap_err();
        assert!(err.is_protocol());
    }

    #[test]
    fn test_garbage_body_is_protocol_error() {
        let err = decode_envelope::<Value>("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(err.is_protocol());
    }

    #[test]
    fn test_missing_data_is_protocol_error() {
        let err = decode_envelope::<Value>(r#"{"messageCode": 1200}"#).unwrap_err();
        assert_eq!(err, PortalError::protocol("Response has no data"));
    }

    #[test]
    fn test_wrong_data_shape_is_protocol_error() {
        let err = decode_envelope::<Vec<Program>>(r#"{"messageCode": 1200, "data": {"id": 1}}"#)
            .unwrap_err();
        assert!(err.is_protocol());
    }

    #[test]
    fn test_login_request_shape() {
        let body = serde_json::to_value(LoginRequest {
            program_id: 1.to_string(),
            login: "minhaj",
            password: "12345",
            device: "web",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "program_id": "1",
                "login": "minhaj",
                "password": "12345",
                "device": "web"
            })
        );
    }

    #[test]
    fn test_login_user_summary_is_lenient() {
        let data: LoginData = serde_json::from_str(
            r#"{"token": "abc", "user": {"id": 7, "name": "Ayesha", "username": "ayesha"}}"#,
        )
        .unwrap();
        assert_eq!(data.user_summary().unwrap().username.as_deref(), Some("ayesha"));

        let odd: LoginData = serde_json::from_str(r#"{"token": "abc", "user": "ayesha"}"#).unwrap();
        assert!(odd.user_summary().is_none());
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(r#"{"message": "Server busy"}"#), "Server busy");
        assert_eq!(error_message(""), "empty response body");
        assert_eq!(error_message("Service Unavailable"), "Service Unavailable");
    }
}
