//! # Error Types
//!
//! Domain-specific error types for lemon-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lemon-core errors (this file)                                         │
//! │  ├── ValidationError  - Field rule violations (values, never thrown)   │
//! │  └── CoreError        - Boundary misuse (unknown key, bad raw value)   │
//! │                                                                         │
//! │  lemon-host errors (separate crate)                                    │
//! │  └── ApiError         - What the adapter sees (serialized)             │
//! │                                                                         │
//! │  Flow: CoreError → ApiError → Adapter                                  │
//! │        ValidationError → ValidationErrors → Snapshot → Adapter         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. A failed `submit()` is a normal outcome, so validation failures are
//!    collected into a map instead of being returned through `Err`
//! 3. Errors are enum variants, never String

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::types::{FieldKey, LifecycleState};

// =============================================================================
// Validation Error
// =============================================================================

/// Why a single field is not submit-ready.
///
/// The per-field wording shown to guests lives in
/// [`crate::validation::message_for`]; the `Display` text here is the
/// field-agnostic form used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    /// Field is empty or absent.
    #[error("value is required")]
    Required,

    /// Reservation date precedes today.
    #[error("date is in the past")]
    InPast,

    /// Email or phone does not have the expected shape.
    #[error("value has an invalid format")]
    InvalidFormat,
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised when an intent cannot be applied at all.
///
/// None of these describe a guest typing something wrong into a valid field;
/// they mean the caller sent something the form could never produce.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Field name outside the nine recognised keys.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Raw value cannot be parsed for the field.
    ///
    /// ## When This Occurs
    /// - `date` not in `YYYY-MM-DD` form
    /// - `partySize` outside 1..=10 or not a number
    /// - `occasion` not one of the known tags
    #[error("Invalid value for {field}: '{value}'")]
    InvalidValue { field: FieldKey, value: String },

    /// Time is well-formed but not offered for the selected date.
    #[error("Time slot {0} is not available for the selected date")]
    SlotUnavailable(String),

    /// Intent requires the form to be in `Editing`.
    #[error("Reservation is {0:?}, reset it before editing again")]
    NotEditing(LifecycleState),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidValue {
            field: FieldKey::PartySize,
            value: "12".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value for partySize: '12'");

        let err = CoreError::SlotUnavailable("23:00".to_string());
        assert_eq!(
            err.to_string(),
            "Time slot 23:00 is not available for the selected date"
        );
    }

    #[test]
    fn test_validation_error_serializes_snake_case() {
        let json = serde_json::to_string(&ValidationError::InvalidFormat).unwrap();
        assert_eq!(json, "\"invalid_format\"");
    }
}
