//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, FieldValidationError, IssueId};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
    InvalidUuid,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::InvalidUuid => "invalid_uuid",
        }
    }
}

/// Translate a domain field failure into a `400` payload.
///
/// Unsupported values are echoed back so clients can see what was rejected.
pub(crate) fn field_error(err: FieldValidationError) -> Error {
    let message = err.to_string();
    match err {
        FieldValidationError::Blank { field } => Error::invalid_request(message).with_details(
            json!({ "field": field, "code": ErrorCode::MissingField.as_str() }),
        ),
        FieldValidationError::Unsupported { field, value } => Error::invalid_request(message)
            .with_details(json!({
                "field": field,
                "value": value,
                "code": ErrorCode::InvalidValue.as_str(),
            })),
    }
}

/// Parse an issue identifier taken from the request path.
pub(crate) fn parse_issue_id(raw: &str) -> Result<IssueId, Error> {
    Uuid::parse_str(raw.trim())
        .map(IssueId::from_uuid)
        .map_err(|_| {
            Error::invalid_request("id must be a valid UUID").with_details(json!({
                "field": "id",
                "value": raw,
                "code": ErrorCode::InvalidUuid.as_str(),
            }))
        })
}

/// Treat blank optional query values as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|raw| !raw.is_empty())
}
