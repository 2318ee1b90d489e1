//! # Notifiers
//!
//! Where finalized bookings go after a successful submit.
//!
//! ```text
//! ReservationMachine::submit()
//!        │ notify(record)      (returns immediately)
//!        ▼
//! ChannelNotifier ──unbounded mpsc──► drain_confirmations task ──► log
//! ```
//!
//! The machine never waits on delivery. A closed channel drops the record
//! with a warning rather than failing the submit.

use lemon_core::{BookingRecord, Notifier};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Logs each record as it arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, record: BookingRecord) {
        log_confirmation(&record);
    }
}

/// Forwards records to an async consumer.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<BookingRecord>,
}

impl ChannelNotifier {
    /// Creates the notifier and the receiving half for the consumer task.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<BookingRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelNotifier { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, record: BookingRecord) {
        if let Err(e) = self.tx.send(record) {
            warn!(reference = %e.0.reference, "Confirmation consumer gone, booking not forwarded");
        }
    }
}

/// Consumes records until every sender is dropped. Returns how many were seen.
pub async fn drain_confirmations(mut rx: mpsc::UnboundedReceiver<BookingRecord>) -> usize {
    let mut count = 0;
    while let Some(record) = rx.recv().await {
        log_confirmation(&record);
        count += 1;
    }
    count
}

fn log_confirmation(record: &BookingRecord) {
    let draft = &record.draft;
    info!(
        reference = %record.reference,
        date = ?draft.date,
        time = ?draft.time.map(|t| t.to_string()),
        party_size = %draft.party_size,
        "Booking confirmed"
    );

    match serde_json::to_string(record) {
        Ok(json) => tracing::debug!(record = %json, "Booking record"),
        Err(e) => warn!("Failed to serialize booking record: {}", e),
    }
}
