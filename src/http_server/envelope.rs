//! Uniform JSON response envelope
//!
//! Every form response is one object: `status`, `success`, `message`,
//! plus whatever the endpoint attaches (`errors`, `warnings`, `data`,
//! identifiers, flags). A collection key that is attached while empty
//! serializes as `[]` — never null, never omitted — so callers can
//! iterate without null checks.

use std::collections::BTreeMap;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Serialize)]
pub struct Envelope {
    status: &'static str,
    success: bool,
    message: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
    #[serde(skip)]
    http_status: StatusCode,
}

impl Envelope {
    pub fn new(http_status: StatusCode, message: impl Into<String>) -> Self {
        let success = http_status.is_success();
        Self {
            status: if success { "success" } else { "error" },
            success,
            message: message.into(),
            extra: Map::new(),
            http_status,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, message)
    }

    pub fn error(http_status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(http_status, message)
    }

    /// Attach a flat top-level key.
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    /// Attach the blocking-error map.
    pub fn errors(self, map: &BTreeMap<String, String>) -> Self {
        self.field("errors", collection(map))
    }

    /// Attach the warning map.
    pub fn warnings(self, map: &BTreeMap<String, String>) -> Self {
        self.field("warnings", collection(map))
    }

    /// Attach the response data object.
    pub fn data(self, map: Map<String, Value>) -> Self {
        let value = if map.is_empty() { json!([]) } else { Value::Object(map) };
        self.field("data", value)
    }

    pub fn http_status(&self) -> StatusCode {
        self.http_status
    }
}

fn collection(map: &BTreeMap<String, String>) -> Value {
    if map.is_empty() {
        json!([])
    } else {
        json!(map)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let body = serde_json::to_string(&self).unwrap_or_else(|_| {
            r#"{"status":"error","success":false,"message":"Response serialization failed."}"#
                .to_string()
        });
        (
            self.http_status,
            [(header::CONTENT_TYPE, "application/json; charset=UTF-8")],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_value(envelope: Envelope) -> Value {
        serde_json::to_value(&envelope).unwrap()
    }

    #[test]
    fn test_success_shape() {
        let value = as_value(Envelope::success("Saved."));
        assert_eq!(value["status"], "success");
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "Saved.");
    }

    #[test]
    fn test_error_shape() {
        let value = as_value(Envelope::error(StatusCode::UNPROCESSABLE_ENTITY, "Fix it."));
        assert_eq!(value["status"], "error");
        assert_eq!(value["success"], false);
    }

    #[test]
    fn test_empty_collections_serialize_as_arrays() {
        let empty = BTreeMap::new();
        let value = as_value(
            Envelope::success("ok")
                .errors(&empty)
                .warnings(&empty)
                .data(Map::new()),
        );
        assert_eq!(value["errors"], json!([]));
        assert_eq!(value["warnings"], json!([]));
        assert_eq!(value["data"], json!([]));
    }

    #[test]
    fn test_populated_collections_serialize_as_objects() {
        let mut errors = BTreeMap::new();
        errors.insert("dob".to_string(), "Date of birth is required".to_string());

        let value = as_value(Envelope::error(StatusCode::UNPROCESSABLE_ENTITY, "Fix it.").errors(&errors));
        assert_eq!(value["errors"]["dob"], "Date of birth is required");
    }

    #[test]
    fn test_unattached_collections_are_omitted() {
        let value = as_value(Envelope::error(StatusCode::METHOD_NOT_ALLOWED, "POST only."));
        assert!(value.get("errors").is_none());
        assert!(value.get("warnings").is_none());
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_flat_fields_land_at_top_level() {
        let value = as_value(
            Envelope::success("ok")
                .field("emailSent", false)
                .field("databaseSaved", true)
                .field("application_id", "APP20260806ABC123"),
        );
        assert_eq!(value["emailSent"], false);
        assert_eq!(value["databaseSaved"], true);
        assert_eq!(value["application_id"], "APP20260806ABC123");
    }
}
