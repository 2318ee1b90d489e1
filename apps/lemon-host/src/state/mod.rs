//! # State Module
//!
//! Host state, split by concern:
//!
//! ```text
//! ┌──────────────────────────────┐  ┌──────────────────────────────┐
//! │      ReservationState        │  │         HostConfig           │
//! │  Arc<Mutex<Machine>>         │  │  restaurant, availability,   │
//! │  single writer per intent    │  │  logging (read-only)         │
//! └──────────────────────────────┘  └──────────────────────────────┘
//! ```

mod config;
mod reservation;

pub use config::{AvailabilitySettings, HostConfig, LoggingSettings, RestaurantSettings};
pub use reservation::{HostMachine, ReservationState};
