//! Body parsing
//!
//! A submission arrives either as a JSON object or as a form-encoded
//! body. Both are reduced to a flat string-to-string map before any
//! business logic runs.

use std::collections::BTreeMap;

use axum::http::{header, HeaderMap};
use serde_json::Value;
use thiserror::Error;

/// Flat mapping of input field name to raw string value.
pub type FieldMap = BTreeMap<String, String>;

/// Errors while reducing a request body to a [`FieldMap`]. All of these
/// are the caller's fault and map to 400.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Invalid JSON format in request.")]
    InvalidJson,

    #[error("Request body must be a JSON object.")]
    NotAnObject,

    #[error("Malformed form body.")]
    InvalidForm,
}

impl IntakeError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> u16 {
        400
    }
}

/// True when the request declared a JSON body.
pub fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}

/// Reduce the raw body to a [`FieldMap`] according to the declared
/// content type. Anything that is not JSON is treated as form-encoded.
pub fn parse_body(headers: &HeaderMap, body: &[u8]) -> Result<FieldMap, IntakeError> {
    if is_json(headers) {
        parse_json(body)
    } else {
        parse_form(body)
    }
}

fn parse_json(body: &[u8]) -> Result<FieldMap, IntakeError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| IntakeError::InvalidJson)?;
    let Value::Object(object) = value else {
        return Err(IntakeError::NotAnObject);
    };

    let mut fields = FieldMap::new();
    for (key, value) in object {
        // Only scalars can carry a form field; nested values are dropped.
        let text = match value {
            Value::String(text) => text,
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            _ => continue,
        };
        fields.insert(key, text);
    }
    Ok(fields)
}

fn parse_form(body: &[u8]) -> Result<FieldMap, IntakeError> {
    let pairs: Vec<(String, String)> =
        serde_urlencoded::from_bytes(body).map_err(|_| IntakeError::InvalidForm)?;
    // Later duplicates overwrite earlier ones.
    Ok(pairs.into_iter().collect())
}
