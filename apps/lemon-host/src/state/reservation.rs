//! # Reservation State
//!
//! The host's single reservation machine.
//!
//! ## Thread Safety
//! The machine is wrapped in `Arc<Mutex<T>>` because:
//! 1. Bridge commands and tests may hold the state from different tasks
//! 2. The machine is single-writer: one intent must finish before the next
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Adapter Intent           Command               Machine Call            │
//! │  ──────────────           ───────               ────────────            │
//! │  Edit a field ──────────► set_field() ────────► set_field(key, raw)    │
//! │  Press "Book" ──────────► submit() ───────────► submit()               │
//! │  "New booking" ─────────► reset() ────────────► reset()                │
//! │  Re-render ─────────────► get_reservation() ──► snapshot()             │
//! │                                                                         │
//! │  Every call takes the lock for its whole duration.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use lemon_core::{Notifier, ReservationMachine, SystemClock};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use super::config::AvailabilitySettings;

pub type HostMachine = ReservationMachine<StdRng>;

/// Shared handle to the host's reservation machine.
#[derive(Debug, Clone)]
pub struct ReservationState {
    machine: Arc<Mutex<HostMachine>>,
}

impl ReservationState {
    /// Builds a machine on the system clock with the configured policy and seed.
    pub fn new(settings: &AvailabilitySettings, notifier: Box<dyn Notifier>) -> Self {
        let rng = match settings.seed {
            Some(seed) => {
                info!(seed, "Using seeded availability");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        let machine = ReservationMachine::new(rng, Box::new(SystemClock), notifier)
            .with_policy(settings.policy.clone());

        Self::from_machine(machine)
    }

    /// Wraps an already-built machine.
    pub fn from_machine(machine: HostMachine) -> Self {
        ReservationState {
            machine: Arc::new(Mutex::new(machine)),
        }
    }

    /// Executes a function with read access to the machine.
    pub fn with_machine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&HostMachine) -> R,
    {
        let machine = self.machine.lock().unwrap_or_else(PoisonError::into_inner);
        f(&machine)
    }

    /// Executes a function with write access to the machine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_machine_mut(|m| m.set_field(FieldKey::Email, "a@b.co"))?;
    /// ```
    pub fn with_machine_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut HostMachine) -> R,
    {
        let mut machine = self.machine.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut machine)
    }
}
