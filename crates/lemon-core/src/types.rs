//! # Domain Types
//!
//! Core domain types used throughout the reservation engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ReservationDraft │   │  BookingRecord  │   │ LifecycleState  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  date, time     │   │  reference      │   │  Editing        │       │
//! │  │  party_size     │   │  submitted_at   │   │  Submitted      │       │
//! │  │  names, contact │   │  draft (frozen) │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    FieldKey     │   │    TimeSlot     │   │    PartySize    │       │
//! │  │  nine form keys │   │  "HH:MM"        │   │  1..=10, def. 2 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

// =============================================================================
// Field Key
// =============================================================================

/// The nine fields a presentation adapter may edit.
///
/// Declaration order is form order; `ValidationErrors` iterates in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Date,
    Time,
    PartySize,
    FirstName,
    LastName,
    Email,
    Phone,
    Occasion,
    SpecialRequests,
}

impl FieldKey {
    /// Every key, in form order.
    pub const ALL: [FieldKey; 9] = [
        FieldKey::Date,
        FieldKey::Time,
        FieldKey::PartySize,
        FieldKey::FirstName,
        FieldKey::LastName,
        FieldKey::Email,
        FieldKey::Phone,
        FieldKey::Occasion,
        FieldKey::SpecialRequests,
    ];

    /// Wire name of the key (camelCase, as the adapter sends it).
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Date => "date",
            FieldKey::Time => "time",
            FieldKey::PartySize => "partySize",
            FieldKey::FirstName => "firstName",
            FieldKey::LastName => "lastName",
            FieldKey::Email => "email",
            FieldKey::Phone => "phone",
            FieldKey::Occasion => "occasion",
            FieldKey::SpecialRequests => "specialRequests",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = CoreError;

    /// Parses a wire name. Only the exact camelCase spellings are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}

// =============================================================================
// Time Slot
// =============================================================================

/// A bookable time of day, shown and parsed as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    const FORMAT: &'static str = "%H:%M";

    /// Creates a slot from hour and minute. Returns `None` for an impossible time.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(TimeSlot)
    }

    /// The underlying time of day.
    #[inline]
    pub const fn time(&self) -> NaiveTime {
        self.0
    }
}

impl From<NaiveTime> for TimeSlot {
    fn from(time: NaiveTime) -> Self {
        TimeSlot(time)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for TimeSlot {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), Self::FORMAT).map(TimeSlot)
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = chrono::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// Party Size
// =============================================================================

/// Number of guests, constrained to the selector's 1..=10 range.
///
/// ## Why a newtype?
/// The range is a property of the input domain, not a validation rule:
/// an out-of-range size can't be constructed, so no validator has to
/// reject one at submit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub struct PartySize(u8);

impl PartySize {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;
    pub const DEFAULT: PartySize = PartySize(2);

    /// Creates a party size, or `None` if outside 1..=10.
    pub const fn new(guests: u8) -> Option<Self> {
        if guests >= Self::MIN && guests <= Self::MAX {
            Some(PartySize(guests))
        } else {
            None
        }
    }

    /// Number of guests.
    #[inline]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// All selectable sizes in ascending order.
    pub fn options() -> impl Iterator<Item = PartySize> {
        (Self::MIN..=Self::MAX).map(PartySize)
    }
}

impl Default for PartySize {
    fn default() -> Self {
        PartySize::DEFAULT
    }
}

impl fmt::Display for PartySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PartySize> for u8 {
    fn from(size: PartySize) -> Self {
        size.0
    }
}

impl TryFrom<u8> for PartySize {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PartySize::new(value).ok_or_else(|| CoreError::InvalidValue {
            field: FieldKey::PartySize,
            value: value.to_string(),
        })
    }
}

impl FromStr for PartySize {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(PartySize::new)
            .ok_or_else(|| CoreError::InvalidValue {
                field: FieldKey::PartySize,
                value: s.to_string(),
            })
    }
}

// =============================================================================
// Occasion
// =============================================================================

/// Optional reason for the visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Occasion {
    Birthday,
    Anniversary,
    Business,
    Date,
    Celebration,
    Other,
}

impl Occasion {
    /// Every occasion, in selector order.
    pub const ALL: [Occasion; 6] = [
        Occasion::Birthday,
        Occasion::Anniversary,
        Occasion::Business,
        Occasion::Date,
        Occasion::Celebration,
        Occasion::Other,
    ];

    /// Wire tag.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Occasion::Birthday => "birthday",
            Occasion::Anniversary => "anniversary",
            Occasion::Business => "business",
            Occasion::Date => "date",
            Occasion::Celebration => "celebration",
            Occasion::Other => "other",
        }
    }

    /// Display label for the selector.
    pub const fn label(&self) -> &'static str {
        match self {
            Occasion::Birthday => "Birthday",
            Occasion::Anniversary => "Anniversary",
            Occasion::Business => "Business meeting",
            Occasion::Date => "Date",
            Occasion::Celebration => "Celebration",
            Occasion::Other => "Other",
        }
    }

    /// Parses a selector value. `""` and `"none"` mean no occasion.
    pub fn parse_optional(raw: &str) -> Result<Option<Occasion>, CoreError> {
        match raw.trim() {
            "" | "none" => Ok(None),
            tag => Occasion::ALL
                .into_iter()
                .find(|o| o.as_str() == tag)
                .map(Some)
                .ok_or_else(|| CoreError::InvalidValue {
                    field: FieldKey::Occasion,
                    value: raw.to_string(),
                }),
        }
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Lifecycle State
// =============================================================================

/// Coarse phase of the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Guest is filling in the form.
    #[default]
    Editing,
    /// Booking was handed to the notifier; only `reset()` leaves this state.
    Submitted,
}

// =============================================================================
// Reservation Draft
// =============================================================================

/// The in-progress booking.
///
/// ## Invariant
/// `time`, when set, is one of the slots currently derived for `date`.
/// The state machine enforces this; the struct alone cannot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDraft {
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,

    #[ts(as = "Option<String>")]
    pub time: Option<TimeSlot>,

    #[ts(as = "u8")]
    pub party_size: PartySize,

    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub occasion: Option<Occasion>,
    pub special_requests: String,
}

// =============================================================================
// Booking Record
// =============================================================================

/// Finalized booking handed to the notifier.
/// Uses snapshot pattern: the draft is frozen at the moment of submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    /// Booking reference (UUID v4).
    #[ts(as = "String")]
    pub reference: Uuid,

    #[ts(as = "String")]
    pub submitted_at: DateTime<Utc>,

    pub draft: ReservationDraft,
}

impl BookingRecord {
    /// Freezes a draft into a record.
    pub fn from_draft(
        draft: &ReservationDraft,
        reference: Uuid,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        BookingRecord {
            reference,
            submitted_at,
            draft: draft.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
