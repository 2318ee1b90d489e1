//! # lemon-core: Pure Reservation Logic for Little Lemon
//!
//! This crate is the reservation engine behind the table-booking form. It
//! contains all of the form's rules as plain functions and one small state
//! machine, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Little Lemon Reservations                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation Adapter (any front end)               │   │
//! │  │     renders snapshots, forwards set_field / submit / reset      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON lines                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    lemon-host (bridge, config, logs)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lemon-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌────────────┐  ┌──────────┐  │   │
//! │  │   │   types   │  │ validation │  │availability│  │ machine  │  │   │
//! │  │   │  Draft    │  │ per-field  │  │ slots for  │  │ Editing ↔│  │   │
//! │  │   │  Record   │  │ rules      │  │ a date     │  │ Submitted│  │   │
//! │  │   └───────────┘  └────────────┘  └────────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO AMBIENT RANDOMNESS • NO WALL CLOCK READS INLINE   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (draft, record, field keys, slots)
//! - [`error`] - Validation and boundary error types
//! - [`validation`] - Per-field validators and the error map
//! - [`availability`] - Slot derivation from a date
//! - [`machine`] - The reservation state machine
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use lemon_core::machine::{FixedClock, Notifier, ReservationMachine};
//! use lemon_core::{BookingRecord, FieldKey, LifecycleState};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! struct Discard;
//! impl Notifier for Discard {
//!     fn notify(&self, _record: BookingRecord) {}
//! }
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
//! let mut machine = ReservationMachine::new(
//!     StdRng::seed_from_u64(1),
//!     Box::new(FixedClock(today)),
//!     Box::new(Discard),
//! );
//!
//! machine.set_field(FieldKey::Date, "2026-10-19").unwrap(); // a Monday
//! machine.set_field(FieldKey::Time, "19:30").unwrap();
//! machine.set_field(FieldKey::FirstName, "Anna").unwrap();
//! machine.set_field(FieldKey::LastName, "K").unwrap();
//! machine.set_field(FieldKey::Email, "a@b.com").unwrap();
//! machine.set_field(FieldKey::Phone, "+1 555 123 4567").unwrap();
//!
//! assert!(machine.submit().unwrap().is_confirmed());
//! assert_eq!(machine.lifecycle(), LifecycleState::Submitted);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod availability;
pub mod error;
pub mod machine;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use availability::SlotPolicy;
pub use error::{CoreError, CoreResult, ValidationError};
pub use machine::{
    Clock, FixedClock, Notifier, ReservationMachine, ReservationSnapshot, SubmitOutcome,
    SystemClock,
};
pub use types::*;
pub use validation::ValidationErrors;
