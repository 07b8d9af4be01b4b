//! # API error handling
//!
//! The task API reports failures in two encodings:
//! - Shape A: `{ "message": "..." }` is raised to the caller verbatim.
//! - Shape B: `{ "success": false, "error": ... }` carries either one
//!   message or a list of field-level validation issues, flattened into
//!   a single human-readable string first.
//!
//! Response bodies are decoded once at the boundary as [`ApiBody`], an
//! untagged union over the two failure encodings and the success payload,
//! instead of sniffing fields at every call site. Write paths that have
//! already seen a non-success status use [`ApiFailure`], which never
//! admits a success payload.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Fallback used when a failure body does not match a known encoding.
pub const FALLBACK_MESSAGE: &str = "The request could not be completed";

/// A structured API failure, recoverable from `anyhow::Error` by
/// downcast.
///
/// Display is the bare message so callers observe exactly what the
/// server said (Shape A) or what the formatter produced (Shape B).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Shape A: the server's message, unreformatted.
    #[error("{0}")]
    Message(String),
    /// Shape B: a validation failure flattened by [`format_failure`].
    #[error("{0}")]
    Validation(String),
}

/// Shape A wire form.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageFailure {
    pub message: String,
}

/// Shape B wire form, discriminated by the presence of `success`.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationFailure {
    pub success: bool,
    #[serde(default)]
    pub error: FailureDetail,
}

/// The `error` payload of a Shape B body.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FailureDetail {
    /// One message for the whole request.
    Message(String),
    /// Field-level validation issues.
    Issues(Vec<FieldIssue>),
    /// Anything else; the formatter falls back to a generic message.
    Other(Value),
}

impl Default for FailureDetail {
    fn default() -> Self {
        Self::Other(Value::Null)
    }
}

/// One field-level validation issue.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldIssue {
    #[serde(default)]
    pub field: Option<String>,
    pub message: String,
}

/// Decode of an API response body where failures arrive in-band: the two
/// failure encodings are tried before the success payload, so only a body
/// lacking both discriminators is trusted as `T`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiBody<T> {
    Message(MessageFailure),
    Validation(ValidationFailure),
    Ok(T),
}

impl<T> ApiBody<T> {
    /// Collapse into the success payload, raising the matching
    /// [`ApiError`] otherwise.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            ApiBody::Message(failure) => Err(ApiError::Message(failure.message)),
            ApiBody::Validation(failure) => Err(ApiError::Validation(format_failure(&failure))),
            ApiBody::Ok(value) => Ok(value),
        }
    }
}

/// Decode of a create response. Creates report failures only in the
/// `success`-discriminated shape, so that is the only encoding tried
/// before the payload is trusted as the created record.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CreateBody<T> {
    Validation(ValidationFailure),
    Ok(T),
}

impl<T> CreateBody<T> {
    /// Collapse into the created record, raising the formatted
    /// [`ApiError`] otherwise.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            CreateBody::Validation(failure) => Err(ApiError::Validation(format_failure(&failure))),
            CreateBody::Ok(value) => Ok(value),
        }
    }
}

/// Failure-only decode, used by write paths once a non-success status is
/// already known and no success payload can follow.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiFailure {
    Message(MessageFailure),
    Validation(ValidationFailure),
}

impl ApiFailure {
    pub fn into_error(self) -> ApiError {
        match self {
            ApiFailure::Message(failure) => ApiError::Message(failure.message),
            ApiFailure::Validation(failure) => ApiError::Validation(format_failure(&failure)),
        }
    }
}

/// Interpret the raw body of a failed request.
///
/// Bodies that match neither encoding (including empty or non-JSON
/// bodies) produce the generic fallback rather than an error about the
/// error.
pub fn failure_from_bytes(bytes: &[u8]) -> ApiError {
    match serde_json::from_slice::<ApiFailure>(bytes) {
        Ok(failure) => failure.into_error(),
        Err(_) => ApiError::Validation(FALLBACK_MESSAGE.to_string()),
    }
}

/// Flatten a Shape B failure into one human-readable string.
///
/// Never fails: an unrecognized `error` payload produces the generic
/// fallback.
pub fn format_failure(failure: &ValidationFailure) -> String {
    match &failure.error {
        FailureDetail::Message(message) if !message.trim().is_empty() => message.clone(),
        FailureDetail::Issues(issues) if !issues.is_empty() => issues
            .iter()
            .map(|issue| match &issue.field {
                Some(field) => format!("{field}: {}", issue.message),
                None => issue.message.clone(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ => FALLBACK_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;
    use serde_json::json;

    fn decode(body: Value) -> ApiBody<Task> {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn message_body_is_raised_verbatim() {
        let err = decode(json!({ "message": "not found" }))
            .into_result()
            .unwrap_err();
        assert_eq!(err, ApiError::Message("not found".to_string()));
        assert_eq!(err.to_string(), "not found");
    }

    #[test]
    fn validation_body_with_single_message_formats_to_that_message() {
        let err = decode(json!({ "success": false, "error": "name required" }))
            .into_result()
            .unwrap_err();
        assert_eq!(err.to_string(), "name required");
    }

    #[test]
    fn validation_body_with_issues_mentions_field_and_message() {
        let err = decode(json!({
            "success": false,
            "error": [
                { "field": "title", "message": "required" },
                { "field": "description", "message": "too long" }
            ]
        }))
        .into_result()
        .unwrap_err();
        assert_eq!(err.to_string(), "title: required, description: too long");
    }

    #[test]
    fn body_without_discriminators_is_a_valid_task() {
        let task = decode(json!({
            "id": "t-1",
            "title": "Ship it",
            "completed": false,
            "createdAt": "2026-05-01T12:00:00Z"
        }))
        .into_result()
        .unwrap();
        assert_eq!(task.id, "t-1");
    }

    #[test]
    fn unrecognized_validation_detail_gets_the_fallback() {
        let err = decode(json!({ "success": false, "error": { "weird": true } }))
            .into_result()
            .unwrap_err();
        assert_eq!(err.to_string(), FALLBACK_MESSAGE);
    }

    #[test]
    fn issue_without_field_prints_the_bare_message() {
        let err = decode(json!({
            "success": false,
            "error": [{ "message": "something is off" }]
        }))
        .into_result()
        .unwrap_err();
        assert_eq!(err.to_string(), "something is off");
    }

    #[test]
    fn create_decode_inspects_only_the_success_shape() {
        let err = serde_json::from_value::<CreateBody<Task>>(
            json!({ "success": false, "error": "name required" }),
        )
        .unwrap()
        .into_result()
        .unwrap_err();
        assert_eq!(err, ApiError::Validation("name required".to_string()));

        // A message-shaped body is not intercepted on the create path.
        assert!(
            serde_json::from_value::<CreateBody<Task>>(json!({ "message": "boom" })).is_err()
        );
    }

    #[test]
    fn unparseable_failure_bytes_get_the_fallback() {
        assert_eq!(
            failure_from_bytes(b"<html>nope</html>").to_string(),
            FALLBACK_MESSAGE
        );
        assert_eq!(failure_from_bytes(b"").to_string(), FALLBACK_MESSAGE);
    }

    #[test]
    fn failure_bytes_with_message_shape_survive_unreformatted() {
        let err = failure_from_bytes(br#"{ "message": "not found" }"#);
        assert_eq!(err, ApiError::Message("not found".to_string()));
    }
}
