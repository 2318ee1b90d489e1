//! # Validation Module
//!
//! Field validators for the reservation form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation on submit()                             │
//! │                                                                         │
//! │  ReservationDraft ──► validate_date ──────┐                            │
//! │                   ──► validate_time ──────┤                            │
//! │                   ──► validate_first_name ┤                            │
//! │                   ──► validate_last_name ─┼──► ValidationErrors        │
//! │                   ──► validate_email ─────┤    (rebuilt from scratch)  │
//! │                   ──► validate_phone ─────┘                            │
//! │                                                                         │
//! │  partySize, occasion, specialRequests: always valid                    │
//! │                                                                         │
//! │  Empty map ⇒ draft is submit-ready                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each validator is a pure function of the draft (plus "today" for the
//! date) returning `Option<ValidationError>`. Nothing here panics or
//! returns `Err`; a failure is just a value.
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use lemon_core::types::ReservationDraft;
//! use lemon_core::validation::validate_draft;
//! use lemon_core::{FieldKey, ValidationError};
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
//! let errors = validate_draft(&ReservationDraft::default(), today);
//! assert_eq!(errors.get(FieldKey::Email), Some(ValidationError::Required));
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{FieldKey, ReservationDraft};

/// `local@domain.tld`, no whitespace, exactly one `@`. Not RFC 5322.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Optional leading `+`, then digits, whitespace, hyphens, parentheses.
static PHONE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]+$").expect("phone pattern is valid"));

// =============================================================================
// Validation Errors
// =============================================================================

/// Fields that currently violate a rule. A field absent from the map is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FieldKey, ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the draft is submit-ready.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FieldKey) -> Option<ValidationError> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: FieldKey) -> bool {
        self.0.contains_key(&field)
    }

    /// Removes a single entry, returning it if present.
    pub fn clear_field(&mut self, field: FieldKey) -> Option<ValidationError> {
        self.0.remove(&field)
    }

    /// Iterates failures in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, ValidationError)> + '_ {
        self.0.iter().map(|(field, err)| (*field, *err))
    }

    /// Guest-facing message for a field, if it has an error.
    pub fn message(&self, field: FieldKey) -> Option<&'static str> {
        self.get(field).map(|err| message_for(field, err))
    }

    /// Guest-facing messages for every failing field.
    pub fn messages(&self) -> BTreeMap<FieldKey, &'static str> {
        self.iter()
            .map(|(field, err)| (field, message_for(field, err)))
            .collect()
    }

    fn record(&mut self, field: FieldKey, outcome: Option<ValidationError>) {
        if let Some(err) = outcome {
            self.0.insert(field, err);
        }
    }
}

/// Fixed wording shown next to a failing field.
pub fn message_for(field: FieldKey, err: ValidationError) -> &'static str {
    match (field, err) {
        (FieldKey::Date, ValidationError::InPast) => "The date cannot be in the past",
        (FieldKey::Date, _) => "Please select a reservation date",
        (FieldKey::Time, _) => "Please select a time",
        (FieldKey::FirstName, _) => "Please enter your first name",
        (FieldKey::LastName, _) => "Please enter your last name",
        (FieldKey::Email, ValidationError::InvalidFormat) => "Invalid email format",
        (FieldKey::Email, _) => "Please enter your email",
        (FieldKey::Phone, ValidationError::InvalidFormat) => "Invalid phone number format",
        (FieldKey::Phone, _) => "Please enter your phone number",
        (_, ValidationError::Required) => "This field is required",
        (_, ValidationError::InPast) => "The value cannot be in the past",
        (_, ValidationError::InvalidFormat) => "Invalid format",
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates the reservation date against `today`.
///
/// ## Rules
/// - Must be set
/// - Must not be strictly before `today` (day granularity; today is fine)
pub fn validate_date(draft: &ReservationDraft, today: NaiveDate) -> Option<ValidationError> {
    match draft.date {
        None => Some(ValidationError::Required),
        Some(date) if date < today => Some(ValidationError::InPast),
        Some(_) => None,
    }
}

/// Validates that a time slot has been chosen.
///
/// Membership in the available slots is enforced by the state machine
/// when the time is set, so it is not re-checked here.
pub fn validate_time(draft: &ReservationDraft) -> Option<ValidationError> {
    draft.time.is_none().then_some(ValidationError::Required)
}

pub fn validate_first_name(draft: &ReservationDraft) -> Option<ValidationError> {
    required_text(&draft.first_name)
}

pub fn validate_last_name(draft: &ReservationDraft) -> Option<ValidationError> {
    required_text(&draft.last_name)
}

/// Validates the email address.
///
/// ## Rules
/// - Must not be empty
/// - Must look like `local@domain.tld` with no whitespace and a single `@`
///
/// ## Example
/// ```rust
/// use lemon_core::types::ReservationDraft;
/// use lemon_core::validation::validate_email;
///
/// let mut draft = ReservationDraft::default();
/// draft.email = "a@b.co".to_string();
/// assert!(validate_email(&draft).is_none());
///
/// draft.email = "not-an-email".to_string();
/// assert!(validate_email(&draft).is_some());
/// ```
pub fn validate_email(draft: &ReservationDraft) -> Option<ValidationError> {
    if draft.email.is_empty() {
        return Some(ValidationError::Required);
    }

    if !EMAIL_SHAPE.is_match(&draft.email) {
        return Some(ValidationError::InvalidFormat);
    }

    None
}

/// Validates the phone number.
///
/// ## Rules
/// - Must not be empty
/// - Only digits, whitespace, `-`, `(`, `)`, with an optional leading `+`
/// - At least one digit (`"( - )"` is not a phone number)
pub fn validate_phone(draft: &ReservationDraft) -> Option<ValidationError> {
    let phone = draft.phone.as_str();

    if phone.is_empty() {
        return Some(ValidationError::Required);
    }

    if !PHONE_SHAPE.is_match(phone) || !phone.chars().any(|c| c.is_ascii_digit()) {
        return Some(ValidationError::InvalidFormat);
    }

    None
}

fn required_text(value: &str) -> Option<ValidationError> {
    value.trim().is_empty().then_some(ValidationError::Required)
}

// =============================================================================
// Whole-Draft Validation
// =============================================================================

/// Runs every field validator and collects the failures.
///
/// Always a full recomputation: the result replaces any previous errors
/// wholesale, so a field fixed since the last attempt can't linger.
pub fn validate_draft(draft: &ReservationDraft, today: NaiveDate) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    errors.record(FieldKey::Date, validate_date(draft, today));
    errors.record(FieldKey::Time, validate_time(draft));
    errors.record(FieldKey::FirstName, validate_first_name(draft));
    errors.record(FieldKey::LastName, validate_last_name(draft));
    errors.record(FieldKey::Email, validate_email(draft));
    errors.record(FieldKey::Phone, validate_phone(draft));

    errors
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimeSlot;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn complete_draft() -> ReservationDraft {
        ReservationDraft {
            date: today().succ_opt(),
            time: TimeSlot::from_hm(19, 0),
            first_name: "Anna".to_string(),
            last_name: "K".to_string(),
            email: "a@b.com".to_string(),
            phone: "+1 555 123 4567".to_string(),
            ..ReservationDraft::default()
        }
    }

    #[test]
    fn test_validate_date() {
        let mut draft = ReservationDraft::default();
        assert_eq!(validate_date(&draft, today()), Some(ValidationError::Required));

        draft.date = today().pred_opt();
        assert_eq!(validate_date(&draft, today()), Some(ValidationError::InPast));

        draft.date = Some(today());
        assert_eq!(validate_date(&draft, today()), None);

        draft.date = today().succ_opt();
        assert_eq!(validate_date(&draft, today()), None);
    }

    #[test]
    fn test_validate_names_trim_whitespace() {
        let mut draft = complete_draft();
        draft.first_name = "   ".to_string();
        assert_eq!(validate_first_name(&draft), Some(ValidationError::Required));

        draft.last_name = "\t".to_string();
        assert_eq!(validate_last_name(&draft), Some(ValidationError::Required));

        draft.first_name = " Anna ".to_string();
        assert_eq!(validate_first_name(&draft), None);
    }

    #[test]
    fn test_validate_email() {
        let mut draft = complete_draft();

        draft.email = String::new();
        assert_eq!(validate_email(&draft), Some(ValidationError::Required));

        for bad in ["not-an-email", "a@b", "a @b.co", "a@@b.co", "@b.co", "a@b."] {
            draft.email = bad.to_string();
            assert_eq!(
                validate_email(&draft),
                Some(ValidationError::InvalidFormat),
                "{bad} should be rejected"
            );
        }

        for good in ["a@b.co", "first.last@sub.example.org"] {
            draft.email = good.to_string();
            assert_eq!(validate_email(&draft), None, "{good} should be accepted");
        }
    }

    #[test]
    fn test_validate_phone() {
        let mut draft = complete_draft();

        draft.phone = String::new();
        assert_eq!(validate_phone(&draft), Some(ValidationError::Required));

        for good in ["+1 555 123 4567", "(555) 123-4567", "5551234567"] {
            draft.phone = good.to_string();
            assert_eq!(validate_phone(&draft), None, "{good} should be accepted");
        }

        for bad in ["call me", "555-CALL", "1+555", "( - )", "+", "++1 555"] {
            draft.phone = bad.to_string();
            assert_eq!(
                validate_phone(&draft),
                Some(ValidationError::InvalidFormat),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_draft_empty_form() {
        let errors = validate_draft(&ReservationDraft::default(), today());

        assert_eq!(errors.len(), 6);
        for field in [
            FieldKey::Date,
            FieldKey::Time,
            FieldKey::FirstName,
            FieldKey::LastName,
            FieldKey::Email,
            FieldKey::Phone,
        ] {
            assert_eq!(errors.get(field), Some(ValidationError::Required));
        }
        assert!(!errors.contains(FieldKey::PartySize));
        assert!(!errors.contains(FieldKey::Occasion));
        assert!(!errors.contains(FieldKey::SpecialRequests));
    }

    #[test]
    fn test_validate_draft_complete_form() {
        assert!(validate_draft(&complete_draft(), today()).is_empty());
    }

    #[test]
    fn test_messages() {
        let mut draft = complete_draft();
        draft.date = today().pred_opt();
        draft.email = "nope".to_string();

        let errors = validate_draft(&draft, today());
        assert_eq!(errors.message(FieldKey::Date), Some("The date cannot be in the past"));
        assert_eq!(errors.message(FieldKey::Email), Some("Invalid email format"));
        assert_eq!(errors.message(FieldKey::Phone), None);
        assert_eq!(errors.messages().len(), 2);
    }

    #[test]
    fn test_errors_serialize_as_field_map() {
        let mut errors = ValidationErrors::new();
        errors.record(FieldKey::FirstName, Some(ValidationError::Required));
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"firstName":"required"}"#);
    }
}
