//! # Little Lemon Host Library
//!
//! Runs one reservation form behind a JSON-lines command bridge.
//!
//! ## Module Organization
//! ```text
//! lemon_host_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── bridge.rs       ◄─── JSON-lines request/response loop
//! ├── notifier.rs     ◄─── Where confirmed bookings go
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── reservation.rs ◄─ Single-writer machine handle
//! │   └── config.rs   ◄─── Host configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── reservation.rs ◄─ get/set_field/submit/reset
//! │   └── config.rs   ◄─── Form options
//! └── error.rs        ◄─── API and startup error types
//! ```
//!
//! stdout carries bridge responses only. All logging goes to stderr.

pub mod bridge;
pub mod commands;
pub mod error;
pub mod notifier;
pub mod state;

use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use error::HostResult;
use notifier::{drain_confirmations, ChannelNotifier};
use state::{HostConfig, LoggingSettings, ReservationState};

/// Runs the host until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → host.toml → LEMON_* environment                       │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG if set, else [logging] filter                            │
/// │     • Written to stderr                                                 │
/// │                                                                         │
/// │  3. Start Confirmation Consumer ──────────────────────────────────────► │
/// │     • ChannelNotifier → drain_confirmations task                        │
/// │                                                                         │
/// │  4. Build ReservationState ───────────────────────────────────────────► │
/// │     • System clock, configured policy, seeded or OS rng                 │
/// │                                                                         │
/// │  5. Serve the Bridge on stdin/stdout until EOF ───────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> HostResult<()> {
    let config = HostConfig::load(None)?;
    init_tracing(&config.logging);

    info!(
        restaurant = %config.restaurant.name,
        peak_days = ?config.availability.policy.peak_days,
        "Starting Little Lemon reservation host"
    );

    let (notifier, rx) = ChannelNotifier::channel();
    let drain = tokio::spawn(drain_confirmations(rx));

    let state = ReservationState::new(&config.availability, Box::new(notifier));

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    bridge::serve(stdin, &mut stdout, &state, &config).await?;

    // Last handle: dropping it closes the confirmation channel.
    drop(state);
    match drain.await {
        Ok(confirmed) => info!(confirmed, "Host shutting down"),
        Err(e) => warn!("Confirmation consumer failed: {}", e),
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=lemon_core=trace` - Trace the form machine only
/// - Default: the configured `[logging] filter`
fn init_tracing(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
