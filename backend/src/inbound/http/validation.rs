//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every validation failure is a `400 invalid_request` whose details name the
//! offending field and a stable code.

use actix_multipart::form::MultipartFormConfig;
use actix_web::web;
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::{Error, RegistrationValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidId => "invalid_id",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField.as_str(),
        format!("missing required field: {field}"),
    )
}

pub(crate) fn invalid_id_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(
        field,
        ErrorCode::InvalidId.as_str(),
        format!("{field} must be a non-empty string or non-zero number"),
    )
}

/// Return `value` trimmed, or a missing-field error when it is absent or blank.
pub(crate) fn required_text(value: Option<&str>, field: FieldName) -> Result<String, Error> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| missing_field_error(field))
}

/// Map a rejected registration form onto a field-level error.
pub(crate) fn registration_error(error: &RegistrationValidationError) -> Error {
    let err = field_error(error.field().as_str(), error.code(), error.to_string());
    match error {
        RegistrationValidationError::WeakPassword(violation) => {
            let unmet: Vec<Value> = violation
                .unmet()
                .iter()
                .filter_map(|rule| serde_json::to_value(rule).ok())
                .collect();
            err.with_details(json!({
                "field": error.field().as_str(),
                "code": error.code(),
                "unmet": unmet,
            }))
        }
        _ => err,
    }
}

/// Largest accepted profile photo, matching the `profilePhoto` field limit.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Room for the text fields of the registration form.
const MULTIPART_TEXT_ALLOWANCE: usize = 64 * 1024;

/// JSON extractor settings that answer malformed bodies with the error
/// envelope instead of actix's plain-text rejection.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejecting malformed JSON body");
        Error::invalid_request("request body must be a JSON object").into()
    })
}

/// Query-string settings answering undecodable parameters with the error
/// envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejecting malformed query string");
        Error::invalid_request("query string could not be decoded").into()
    })
}

/// Multipart settings sized for one profile photo plus the text fields.
///
/// Oversized or malformed forms are answered with the error envelope.
pub fn multipart_config() -> MultipartFormConfig {
    MultipartFormConfig::default()
        .memory_limit(MAX_PHOTO_BYTES + MULTIPART_TEXT_ALLOWANCE)
        .total_limit(MAX_PHOTO_BYTES + MULTIPART_TEXT_ALLOWANCE)
        .error_handler(|err, _req| {
            debug!(error = %err, "rejecting unreadable multipart form");
            Error::invalid_request(format!(
                "form must be multipart/form-data with a photo of at most {} MiB",
                MAX_PHOTO_BYTES / (1024 * 1024)
            ))
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RegistrationField, RegistrationParts, RegistrationRequest};
    use rstest::rstest;

    const ITEM: FieldName = FieldName::new("item");

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn blank_text_is_a_missing_field(#[case] value: Option<&str>) {
        let err = required_text(value, ITEM).expect_err("blank rejected");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "item", "code": "missing_field"}))
        );
    }

    #[rstest]
    fn text_is_trimmed() {
        assert_eq!(required_text(Some("  milk "), ITEM).expect("present"), "milk");
    }

    #[rstest]
    fn weak_passwords_list_unmet_rules() {
        let parts = RegistrationParts {
            first_name: "Ada",
            last_name: "Lovelace",
            email: "ada@example.com",
            username: "ada",
            password: "Ab12!@",
            ..RegistrationParts::default()
        };
        let rejected =
            RegistrationRequest::try_from_parts(parts, None).expect_err("one uppercase only");

        let err = registration_error(&rejected);
        assert_eq!(
            err.details(),
            Some(&json!({
                "field": "password",
                "code": "weak_password",
                "unmet": ["too_few_uppercase"],
            }))
        );
    }

    #[rstest]
    fn missing_registration_fields_use_wire_names() {
        let err = registration_error(&RegistrationValidationError::MissingField(
            RegistrationField::FirstName,
        ));
        assert_eq!(
            err.details(),
            Some(&json!({"field": "firstName", "code": "missing_field"}))
        );
    }
}
