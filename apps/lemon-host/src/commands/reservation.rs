//! # Reservation Commands
//!
//! The inbound intents of the reservation form.
//!
//! ## Form Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐   set_field    ┌──────────┐   submit (valid)  ┌────────┐ │
//! │  │  Empty   │──────────────► │ Editing  │─────────────────► │Submitted│ │
//! │  │  Form    │                │          │◄──┐               └────┬───┘ │
//! │  └──────────┘                └──────────┘   │ submit (errors)    │     │
//! │        ▲                          │─────────┘                    │     │
//! │        └──────────────── reset ◄─────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command returns the post-operation snapshot so the adapter can
//! re-render without a second round trip.

use lemon_core::{FieldKey, ReservationSnapshot, SubmitOutcome};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::ReservationState;

/// Response to `submit`: whether it went through, plus the new state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub confirmed: bool,

    /// Booking reference when confirmed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    pub snapshot: ReservationSnapshot,
}

/// Gets the current form state.
pub fn get_reservation(state: &ReservationState) -> ReservationSnapshot {
    debug!("get_reservation command");
    state.with_machine(|m| m.snapshot())
}

/// Applies one field edit.
///
/// ## Arguments
/// * `field` - wire name of the field (`"partySize"`, `"email"`, ...)
/// * `value` - raw form value
///
/// ## Errors
/// Unknown field names and values the form can't produce. The snapshot
/// is unchanged in that case.
pub fn set_field(
    state: &ReservationState,
    field: &str,
    value: &str,
) -> Result<ReservationSnapshot, ApiError> {
    debug!(field = %field, "set_field command");

    let key: FieldKey = field.parse()?;
    state.with_machine_mut(|m| {
        m.set_field(key, value)?;
        Ok(m.snapshot())
    })
}

/// Submits the form.
///
/// A form with validation errors is a normal response with
/// `confirmed: false`; only submitting an already-submitted form errors.
pub fn submit(state: &ReservationState) -> Result<SubmitResponse, ApiError> {
    debug!("submit command");

    state.with_machine_mut(|m| {
        let outcome = m.submit()?;
        let reference = match &outcome {
            SubmitOutcome::Confirmed(record) => Some(record.reference.to_string()),
            SubmitOutcome::Rejected(_) => None,
        };
        Ok(SubmitResponse {
            confirmed: reference.is_some(),
            reference,
            snapshot: m.snapshot(),
        })
    })
}

/// Clears the form back to an empty `Editing` state.
pub fn reset(state: &ReservationState) -> ReservationSnapshot {
    debug!("reset command");

    state.with_machine_mut(|m| {
        m.reset();
        m.snapshot()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;
    use lemon_core::{
        BookingRecord, FixedClock, LifecycleState, Notifier, ReservationMachine, ValidationError,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Collect(Arc<Mutex<Vec<BookingRecord>>>);

    impl Notifier for Collect {
        fn notify(&self, record: BookingRecord) {
            self.0.lock().unwrap().push(record);
        }
    }

    fn state() -> (ReservationState, Collect) {
        let collect = Collect::default();
        let machine = ReservationMachine::new(
            StdRng::seed_from_u64(5),
            Box::new(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())),
            Box::new(collect.clone()),
        );
        (ReservationState::from_machine(machine), collect)
    }

    fn fill(state: &ReservationState) {
        for (field, value) in [
            ("date", "2026-10-19"),
            ("time", "18:00"),
            ("partySize", "4"),
            ("firstName", "Anna"),
            ("lastName", "K"),
            ("email", "a@b.com"),
            ("phone", "(555) 123-4567"),
            ("occasion", "anniversary"),
            ("specialRequests", "Window table"),
        ] {
            set_field(state, field, value).unwrap();
        }
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let (state, _) = state();
        let err = set_field(&state, "guests", "2").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownField);
    }

    #[test]
    fn test_set_field_returns_updated_snapshot() {
        let (state, _) = state();
        let snap = set_field(&state, "date", "2026-10-19").unwrap();
        assert_eq!(snap.available_slots.len(), 11);
        assert!(snap.time_selectable);
    }

    #[test]
    fn test_rejected_submit_is_not_an_error() {
        let (state, collect) = state();

        let response = submit(&state).unwrap();

        assert!(!response.confirmed);
        assert!(response.reference.is_none());
        assert_eq!(
            response.snapshot.errors.get(FieldKey::Date),
            Some(ValidationError::Required)
        );
        assert!(collect.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_full_booking_flow() {
        let (state, collect) = state();
        fill(&state);

        let response = submit(&state).unwrap();
        assert!(response.confirmed);
        assert_eq!(response.snapshot.lifecycle, LifecycleState::Submitted);

        let records = collect.0.lock().unwrap().clone();
        assert_eq!(records.len(), 1);
        assert_eq!(Some(records[0].reference.to_string()), response.reference);
        assert_eq!(records[0].draft.special_requests, "Window table");

        let err = set_field(&state, "firstName", "Bob").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);

        let snap = reset(&state);
        assert_eq!(snap.lifecycle, LifecycleState::Editing);
        assert_eq!(snap.draft.party_size.get(), 2);
        assert!(snap.available_slots.is_empty());
        assert_eq!(get_reservation(&state), snap);
    }
}
