//! # Availability
//!
//! Derives the bookable time slots for a date.
//!
//! ## Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      derive_slots(date, policy, rng)                    │
//! │                                                                         │
//! │  date = None ─────────────────────────────► []                          │
//! │                                                                         │
//! │  weekday ∉ peak_days ─────────────────────► 17:00, 17:30 … 22:00 (11)   │
//! │                                                                         │
//! │  weekday ∈ peak_days (Fri, Sat) ──────────► each base slot kept iff     │
//! │                                             rng draw > 1 - retention    │
//! │                                             (order preserved)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The random source is a parameter, never `rand::rng()`, so a derivation
//! is a pure function of `(date, policy, rng state)`.
//!
//! The peak-day retention rate simulates demand and is a placeholder
//! until real occupancy data exists. Only the shape is contractual:
//! off-peak days offer every slot, peak days offer an ordered subset.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::TimeSlot;

/// First bookable slot (hour, minute).
pub const FIRST_SLOT: (u32, u32) = (17, 0);

/// Minutes between consecutive slots.
pub const SLOT_INTERVAL_MINUTES: u32 = 30;

/// Number of slots in the base set (17:00 through 22:00 inclusive).
pub const BASE_SLOT_COUNT: usize = 11;

/// The full evening schedule, ascending and unique.
pub fn base_slots() -> Vec<TimeSlot> {
    let start = FIRST_SLOT.0 * 60 + FIRST_SLOT.1;
    (0..BASE_SLOT_COUNT as u32)
        .filter_map(|i| {
            let minutes = start + i * SLOT_INTERVAL_MINUTES;
            TimeSlot::from_hm(minutes / 60, minutes % 60)
        })
        .collect()
}

// =============================================================================
// Slot Policy
// =============================================================================

/// Which days are busy and how much of the evening survives on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotPolicy {
    /// Days on which availability is reduced.
    #[serde(default = "default_peak_days")]
    pub peak_days: Vec<Weekday>,

    /// Probability that any one base slot stays bookable on a peak day.
    #[serde(default = "default_peak_retention")]
    pub peak_retention: f64,
}

fn default_peak_days() -> Vec<Weekday> {
    vec![Weekday::Fri, Weekday::Sat]
}

fn default_peak_retention() -> f64 {
    0.7
}

impl Default for SlotPolicy {
    fn default() -> Self {
        SlotPolicy {
            peak_days: default_peak_days(),
            peak_retention: default_peak_retention(),
        }
    }
}

impl SlotPolicy {
    /// Returns true if `date` falls on a peak day.
    pub fn is_peak(&self, date: NaiveDate) -> bool {
        self.peak_days.contains(&date.weekday())
    }

    /// A slot is kept when a uniform draw in `[0, 1)` exceeds this.
    fn drop_threshold(&self) -> f64 {
        1.0 - self.peak_retention.clamp(0.0, 1.0)
    }
}

// =============================================================================
// Derivation
// =============================================================================

/// Maps a date to its ordered list of bookable slots.
///
/// Off-peak days return [`base_slots`] untouched and do not consume any
/// randomness. Peak days draw once per base slot, in slot order.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use rand::{rngs::StdRng, SeedableRng};
/// use lemon_core::availability::{derive_slots, SlotPolicy};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let tuesday = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
/// let slots = derive_slots(Some(tuesday), &SlotPolicy::default(), &mut rng);
/// assert_eq!(slots.len(), 11);
/// assert!(derive_slots(None, &SlotPolicy::default(), &mut rng).is_empty());
/// ```
pub fn derive_slots<R: Rng + ?Sized>(
    date: Option<NaiveDate>,
    policy: &SlotPolicy,
    rng: &mut R,
) -> Vec<TimeSlot> {
    let Some(date) = date else {
        return Vec::new();
    };

    let slots = base_slots();
    if !policy.is_peak(date) {
        return slots;
    }

    let threshold = policy.drop_threshold();
    slots
        .into_iter()
        .filter(|_| rng.random::<f64>() > threshold)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
