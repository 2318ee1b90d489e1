//! # Commands Module
//!
//! Everything the presentation adapter can ask the host to do.
//!
//! ```text
//! commands/
//! ├── mod.rs          ◄─── You are here (exports)
//! ├── reservation.rs  ◄─── get_reservation, set_field, submit, reset
//! └── config.rs       ◄─── get_config (form options)
//! ```
//!
//! Commands are plain functions over the state they need; the bridge
//! decodes a request line and calls exactly one of them.

pub mod config;
pub mod reservation;
