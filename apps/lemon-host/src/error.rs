//! # Host Error Types
//!
//! - [`ApiError`]: what the presentation adapter receives when a command
//!   can't be applied. Serialized onto the bridge.
//! - [`HostError`]: startup failures (configuration). Never reaches the bridge.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {"command":"set_field","field":"partySize","value":"12"}              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ReservationMachine::set_field ── CoreError::InvalidValue ──┐          │
//! │                                                              ▼          │
//! │  {"error":{"code":"INVALID_VALUE","message":"Invalid value for ..."}}  │
//! │                                                                         │
//! │  A rejected submit() is NOT an ApiError: it returns a snapshot whose   │
//! │  `errors` map is non-empty.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use lemon_core::CoreError;
use serde::Serialize;
use thiserror::Error;

/// API error returned from host commands.
///
/// ```json
/// { "code": "UNKNOWN_FIELD", "message": "Unknown field: guests" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for bridge responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Field name is not one of the nine form keys
    UnknownField,

    /// Value can't be parsed for the field
    InvalidValue,

    /// Time is not offered for the selected date
    SlotUnavailable,

    /// Form is submitted; reset before editing
    InvalidState,

    /// Request line is not a valid command
    BadRequest,

    /// Response payload could not be encoded
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::UnknownField(_) => ErrorCode::UnknownField,
            CoreError::InvalidValue { .. } => ErrorCode::InvalidValue,
            CoreError::SlotUnavailable(_) => ErrorCode::SlotUnavailable,
            CoreError::NotEditing(_) => ErrorCode::InvalidState,
        };
        ApiError::new(code, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Host Error
// =============================================================================

/// Result type alias for host startup.
pub type HostResult<T> = Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Invalid host configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to encode response: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use lemon_core::{FieldKey, LifecycleState};

    #[test]
    fn test_core_error_codes() {
        let err: ApiError = CoreError::UnknownField("guests".into()).into();
        assert_eq!(err.code, ErrorCode::UnknownField);
        assert_eq!(err.message, "Unknown field: guests");

        let err: ApiError = CoreError::InvalidValue {
            field: FieldKey::Date,
            value: "tomorrow".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidValue);

        let err: ApiError = CoreError::NotEditing(LifecycleState::Submitted).into();
        assert_eq!(err.code, ErrorCode::InvalidState);
    }

    #[test]
    fn test_api_error_serialization() {
        let err = ApiError::new(ErrorCode::SlotUnavailable, "nope");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"SLOT_UNAVAILABLE","message":"nope"}"#);
    }
}
