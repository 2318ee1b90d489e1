//! # Reservation State Machine
//!
//! Owns the draft, the error map, the derived slots and the lifecycle state,
//! and is the only thing that mutates them.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Reservation Lifecycle                                │
//! │                                                                         │
//! │        set_field(..)                                                    │
//! │        ┌──────┐                                                         │
//! │        │      ▼                                                         │
//! │  ┌─────┴────────┐   submit() + no errors    ┌──────────────┐           │
//! │  │   Editing    │ ────────────────────────► │  Submitted   │           │
//! │  │              │                           │              │           │
//! │  └─────┬────────┘ ◄──────────────────────── └──────────────┘           │
//! │        │  ▲               reset()                                       │
//! │        └──┘                                                             │
//! │   submit() + errors (stays Editing, errors replaced)                   │
//! │                                                                         │
//! │  reset() from either state clears draft, errors and slots.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Collaborators
//! - `R: Rng` - random source for peak-day availability and booking references
//! - [`Clock`] - supplies "today" for the past-date rule and the submit instant
//! - [`Notifier`] - receives the [`BookingRecord`] on successful submit
//!
//! ## Concurrency
//! Every operation runs to completion synchronously and needs `&mut self`.
//! A multi-threaded host must serialize intents itself (the host crate
//! keeps the machine behind a single mutex).

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use rand::Rng;
use serde::Serialize;
use ts_rs::TS;
use tracing::{debug, info, warn};

use crate::availability::{derive_slots, SlotPolicy};
use crate::error::{CoreError, CoreResult};
use crate::types::{
    BookingRecord, FieldKey, LifecycleState, Occasion, PartySize, ReservationDraft, TimeSlot,
};
use crate::validation::{validate_draft, ValidationErrors};

// =============================================================================
// Collaborators
// =============================================================================

/// Source of the current date and instant.
pub trait Clock: Send {
    /// Calendar date used by the past-date rule.
    fn today(&self) -> NaiveDate;

    /// Instant stamped on a confirmed booking.
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock: local date, UTC instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same date; `now()` is midnight UTC of that date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }

    fn now(&self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }
}

/// Receives finalized bookings.
///
/// Fire-and-forget: the machine does not wait for, or look at, anything
/// the notifier does with the record.
pub trait Notifier: Send {
    fn notify(&self, record: BookingRecord);
}

// =============================================================================
// Outcomes & Snapshots
// =============================================================================

/// Result of a `submit()` attempt in the `Editing` state.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Draft was valid; the record has been handed to the notifier.
    Confirmed(BookingRecord),
    /// Draft has errors; they are now the machine's current errors.
    Rejected(ValidationErrors),
}

impl SubmitOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, SubmitOutcome::Confirmed(_))
    }
}

/// Read-only view the presentation adapter renders from.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSnapshot {
    pub draft: ReservationDraft,
    pub errors: ValidationErrors,

    /// Guest-facing text for each entry in `errors`.
    #[ts(as = "std::collections::BTreeMap<FieldKey, String>")]
    pub error_messages: std::collections::BTreeMap<FieldKey, &'static str>,

    #[ts(as = "Vec<String>")]
    pub available_slots: Vec<TimeSlot>,

    pub lifecycle: LifecycleState,

    /// False while no slots are offered; the time field should be disabled.
    pub time_selectable: bool,
}

// =============================================================================
// Reservation Machine
// =============================================================================

/// The reservation engine.
pub struct ReservationMachine<R> {
    draft: ReservationDraft,
    errors: ValidationErrors,
    available_slots: Vec<TimeSlot>,
    lifecycle: LifecycleState,
    policy: SlotPolicy,
    rng: R,
    clock: Box<dyn Clock>,
    notifier: Box<dyn Notifier>,
}

impl<R: Rng> ReservationMachine<R> {
    /// Creates a machine in `Editing` with an empty draft.
    pub fn new(rng: R, clock: Box<dyn Clock>, notifier: Box<dyn Notifier>) -> Self {
        ReservationMachine {
            draft: ReservationDraft::default(),
            errors: ValidationErrors::new(),
            available_slots: Vec::new(),
            lifecycle: LifecycleState::Editing,
            policy: SlotPolicy::default(),
            rng,
            clock,
            notifier,
        }
    }

    /// Replaces the availability policy. Applies from the next date change.
    pub fn with_policy(mut self, policy: SlotPolicy) -> Self {
        self.policy = policy;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn draft(&self) -> &ReservationDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn available_slots(&self) -> &[TimeSlot] {
        &self.available_slots
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn policy(&self) -> &SlotPolicy {
        &self.policy
    }

    /// Clones the current state for rendering.
    pub fn snapshot(&self) -> ReservationSnapshot {
        ReservationSnapshot {
            draft: self.draft.clone(),
            errors: self.errors.clone(),
            error_messages: self.errors.messages(),
            available_slots: self.available_slots.clone(),
            lifecycle: self.lifecycle,
            time_selectable: !self.available_slots.is_empty(),
        }
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// Applies a raw value from the form to one field.
    ///
    /// ## Behavior
    /// - `date`: re-derives the available slots and drops `time` if it is no
    ///   longer offered. `""` clears the date (and with it the slots).
    /// - `time`: must be one of the available slots; `""` clears it.
    /// - Any existing error on the field is cleared, whether or not the new
    ///   value would pass validation. Re-validation waits for `submit()`.
    ///
    /// ## Errors
    /// - [`CoreError::NotEditing`] after a successful submit
    /// - [`CoreError::InvalidValue`] / [`CoreError::SlotUnavailable`] for
    ///   values the form can't produce; the draft is left untouched
    pub fn set_field(&mut self, field: FieldKey, raw: &str) -> CoreResult<()> {
        self.ensure_editing()?;
        debug!(%field, "set_field");

        match field {
            FieldKey::Date => {
                let date = parse_date(raw)?;
                self.apply_date(date);
            }
            FieldKey::Time => {
                self.draft.time = self.parse_offered_slot(raw)?;
            }
            FieldKey::PartySize => self.draft.party_size = raw.parse::<PartySize>()?,
            FieldKey::Occasion => self.draft.occasion = Occasion::parse_optional(raw)?,
            FieldKey::FirstName => self.draft.first_name = raw.to_string(),
            FieldKey::LastName => self.draft.last_name = raw.to_string(),
            FieldKey::Email => self.draft.email = raw.to_string(),
            FieldKey::Phone => self.draft.phone = raw.to_string(),
            FieldKey::SpecialRequests => self.draft.special_requests = raw.to_string(),
        }

        if self.errors.clear_field(field).is_some() {
            debug!(%field, "Cleared field error on edit");
        }

        Ok(())
    }

    /// Validates the draft and, if clean, finalizes the booking.
    ///
    /// ## Behavior
    /// - Errors are replaced wholesale by a fresh validation pass
    /// - No errors: lifecycle becomes `Submitted` and the notifier receives
    ///   a frozen copy of the draft
    /// - Errors: stays `Editing`; the outcome carries the same errors
    ///
    /// Invalid input is never an `Err`. The only error is calling this
    /// outside `Editing`.
    pub fn submit(&mut self) -> CoreResult<SubmitOutcome> {
        self.ensure_editing()?;

        self.errors = validate_draft(&self.draft, self.clock.today());

        if !self.errors.is_empty() {
            warn!(
                failing = self.errors.len(),
                fields = ?self.errors.iter().map(|(f, _)| f.as_str()).collect::<Vec<_>>(),
                "Reservation rejected"
            );
            return Ok(SubmitOutcome::Rejected(self.errors.clone()));
        }

        let reference = uuid::Builder::from_random_bytes(self.rng.random()).into_uuid();
        let record = BookingRecord::from_draft(&self.draft, reference, self.clock.now());
        self.lifecycle = LifecycleState::Submitted;
        info!(
            reference = %record.reference,
            party_size = %record.draft.party_size,
            "Reservation submitted"
        );

        self.notifier.notify(record.clone());
        Ok(SubmitOutcome::Confirmed(record))
    }

    /// Returns to an empty `Editing` form. Valid from either state.
    pub fn reset(&mut self) {
        if self.lifecycle == LifecycleState::Submitted {
            info!("Reservation form reset after submission");
        } else {
            debug!("Reservation form reset");
        }

        self.draft = ReservationDraft::default();
        self.errors = ValidationErrors::new();
        self.available_slots.clear();
        self.lifecycle = LifecycleState::Editing;
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn ensure_editing(&self) -> CoreResult<()> {
        match self.lifecycle {
            LifecycleState::Editing => Ok(()),
            other => Err(CoreError::NotEditing(other)),
        }
    }

    /// Sets the date and keeps slots and time consistent with it.
    fn apply_date(&mut self, date: Option<NaiveDate>) {
        self.draft.date = date;
        self.available_slots = derive_slots(date, &self.policy, &mut self.rng);

        if let Some(time) = self.draft.time {
            if !self.available_slots.contains(&time) {
                debug!(%time, "Selected time no longer offered, clearing");
                self.draft.time = None;
            }
        }
    }

    fn parse_offered_slot(&self, raw: &str) -> CoreResult<Option<TimeSlot>> {
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let slot = raw.parse::<TimeSlot>().map_err(|_| CoreError::InvalidValue {
            field: FieldKey::Time,
            value: raw.to_string(),
        })?;

        if !self.available_slots.contains(&slot) {
            return Err(CoreError::SlotUnavailable(slot.to_string()));
        }

        Ok(Some(slot))
    }
}

/// Parses an HTML date-input value (`YYYY-MM-DD`); empty means "no date".
fn parse_date(raw: &str) -> CoreResult<Option<NaiveDate>> {
    let raw_trimmed = raw.trim();
    if raw_trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(raw_trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| CoreError::InvalidValue {
            field: FieldKey::Date,
            value: raw.to_string(),
        })
}

impl<R> std::fmt::Debug for ReservationMachine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationMachine")
            .field("draft", &self.draft)
            .field("errors", &self.errors)
            .field("available_slots", &self.available_slots)
            .field("lifecycle", &self.lifecycle)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
