//! # Little Lemon Host Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Presentation adapter (web page, TUI, test harness)                    │
//! │          │ stdin: one JSON request per line                             │
//! │          ▼                                                              │
//! │  lemon-host ──► ReservationState ──► lemon-core ReservationMachine     │
//! │          │ stdout: one JSON response per line                           │
//! │          ▼                                                              │
//! │  Presentation adapter re-renders from the returned snapshot            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs for better testability.

#[tokio::main]
async fn main() {
    if let Err(e) = lemon_host_lib::run().await {
        // Logging may not be up yet if config loading failed.
        eprintln!("lemon-host: {}", e);
        std::process::exit(1);
    }
}
