//! # Config Commands
//!
//! Read-only view of what the adapter needs to draw the form.

use lemon_core::{Occasion, PartySize};
use serde::Serialize;
use tracing::debug;

use crate::state::{HostConfig, ReservationState};

/// Static form options plus the restaurant's configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    pub restaurant_name: String,
    pub party_sizes: Vec<u8>,
    pub default_party_size: u8,
    pub occasions: Vec<OccasionOption>,

    /// Weekdays with reduced availability, as `"Fri"`, `"Sat"`, ...
    pub peak_days: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OccasionOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Gets the form configuration.
///
/// ## When Used
/// - Adapter startup, to build the party-size and occasion selectors
/// - Showing which days book up faster
pub fn get_config(config: &HostConfig, state: &ReservationState) -> FormConfig {
    debug!("get_config command");

    let peak_days = state.with_machine(|m| {
        m.policy()
            .peak_days
            .iter()
            .map(ToString::to_string)
            .collect()
    });

    FormConfig {
        restaurant_name: config.restaurant.name.clone(),
        party_sizes: PartySize::options().map(|p| p.get()).collect(),
        default_party_size: PartySize::DEFAULT.get(),
        occasions: Occasion::ALL
            .iter()
            .map(|o| OccasionOption {
                value: o.as_str(),
                label: o.label(),
            })
            .collect(),
        peak_days,
    }
}
