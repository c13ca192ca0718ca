//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, SwapDecision, SwapId, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValidationCode {
    MissingField,
    InvalidUuid,
    InvalidDecision,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidDecision => "invalid_decision",
        }
    }
}

fn field_error(field: &str, message: impl Into<String>, code: ValidationCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

fn value_error(
    field: &str,
    message: impl Into<String>,
    code: ValidationCode,
    value: &str,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "value": value,
        "code": code.as_str(),
    }))
}

/// Error for a required body field that was absent.
pub(crate) fn missing_field_error(field: &str) -> Error {
    field_error(
        field,
        format!("missing required field: {field}"),
        ValidationCode::MissingField,
    )
}

/// Parse a user identifier taken from `field`.
pub(crate) fn parse_user_id(raw: &str, field: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| {
        value_error(
            field,
            format!("{field} must be a valid UUID"),
            ValidationCode::InvalidUuid,
            raw,
        )
    })
}

/// Parse a swap identifier taken from `field`.
pub(crate) fn parse_swap_id(raw: &str, field: &str) -> Result<SwapId, Error> {
    SwapId::new(raw).map_err(|_| {
        value_error(
            field,
            format!("{field} must be a valid UUID"),
            ValidationCode::InvalidUuid,
            raw,
        )
    })
}

/// Parse a recipient's answer, which must be `accepted` or `rejected`.
pub(crate) fn parse_decision(raw: &str) -> Result<SwapDecision, Error> {
    match raw {
        "accepted" => Ok(SwapDecision::Accepted),
        "rejected" => Ok(SwapDecision::Rejected),
        other => Err(value_error(
            "decision",
            "decision must be accepted or rejected",
            ValidationCode::InvalidDecision,
            other,
        )),
    }
}
