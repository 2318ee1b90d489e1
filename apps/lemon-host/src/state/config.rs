//! # Host Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     LEMON_RESTAURANT_NAME, LEMON_PEAK_DAYS, LEMON_PEAK_RETENTION,      │
//! │     LEMON_SEED, LEMON_LOG                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $LEMON_CONFIG, or host.toml in the platform config dir             │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [restaurant]
//! name = "Little Lemon"
//!
//! [availability]
//! peak_days = ["Fri", "Sat"]
//! peak_retention = 0.7
//! seed = 42            # optional; omit for OS-seeded randomness
//!
//! [logging]
//! filter = "info,lemon_core=debug,lemon_host_lib=debug"
//! ```
//!
//! Read-only after startup.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use lemon_core::SlotPolicy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{HostError, HostResult};

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantSettings {
    #[serde(default = "default_restaurant_name")]
    pub name: String,
}

fn default_restaurant_name() -> String {
    "Little Lemon".to_string()
}

impl Default for RestaurantSettings {
    fn default() -> Self {
        RestaurantSettings {
            name: default_restaurant_name(),
        }
    }
}

/// Availability policy plus the random source choice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilitySettings {
    #[serde(flatten)]
    pub policy: SlotPolicy,

    /// Fixed seed for reproducible peak-day availability.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive; `RUST_LOG` still wins when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,lemon_core=debug,lemon_host_lib=debug".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Host Config
// =============================================================================

/// Complete host configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default)]
    pub restaurant: RestaurantSettings,

    #[serde(default)]
    pub availability: AvailabilitySettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl HostConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (host.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> HostResult<Self> {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    fn load_with_env(
        config_path: Option<PathBuf>,
        var: impl Fn(&str) -> Option<String>,
    ) -> HostResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading host config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(var);
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file without applying overrides.
    pub fn from_file(path: &Path) -> HostResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> HostResult<()> {
        let retention = self.availability.policy.peak_retention;
        if !(0.0..=1.0).contains(&retention) {
            return Err(HostError::InvalidConfig(format!(
                "peak_retention must be between 0 and 1, got {}",
                retention
            )));
        }

        if self.restaurant.name.trim().is_empty() {
            return Err(HostError::InvalidConfig(
                "restaurant name must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies `LEMON_*` overrides read through `var`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(name) = var("LEMON_RESTAURANT_NAME") {
            self.restaurant.name = name;
        }

        if let Some(days) = var("LEMON_PEAK_DAYS") {
            match parse_weekdays(&days) {
                Some(parsed) => {
                    debug!(days = %days, "Overriding peak days from environment");
                    self.availability.policy.peak_days = parsed;
                }
                None => warn!(days = %days, "Unknown weekday in LEMON_PEAK_DAYS"),
            }
        }

        if let Some(retention) = var("LEMON_PEAK_RETENTION") {
            match retention.parse::<f64>() {
                Ok(r) => self.availability.policy.peak_retention = r,
                Err(_) => warn!(value = %retention, "Invalid LEMON_PEAK_RETENTION"),
            }
        }

        if let Some(seed) = var("LEMON_SEED") {
            match seed.parse::<u64>() {
                Ok(s) => self.availability.seed = Some(s),
                Err(_) => warn!(value = %seed, "Invalid LEMON_SEED"),
            }
        }

        if let Some(filter) = var("LEMON_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the config file path: `$LEMON_CONFIG`, else the platform dir.
    fn default_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("LEMON_CONFIG") {
            return Some(PathBuf::from(path));
        }

        directories::ProjectDirs::from("com", "littlelemon", "reservations")
            .map(|dirs| dirs.config_dir().join("host.toml"))
    }
}

/// Parses `"fri, sat"` style lists. `None` if any entry is not a weekday.
fn parse_weekdays(raw: &str) -> Option<Vec<Weekday>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Weekday>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = HostConfig::default();
        assert_eq!(config.restaurant.name, "Little Lemon");
        assert_eq!(config.availability.policy, SlotPolicy::default());
        assert!(config.availability.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_parsing() {
        let config: HostConfig = toml::from_str(
            r#"
            [restaurant]
            name = "Lemon Downtown"

            [availability]
            peak_days = ["Thu", "Fri", "Sat"]
            peak_retention = 0.5
            seed = 9
            "#,
        )
        .unwrap();

        assert_eq!(config.restaurant.name, "Lemon Downtown");
        assert_eq!(
            config.availability.policy.peak_days,
            vec![Weekday::Thu, Weekday::Fri, Weekday::Sat]
        );
        assert_eq!(config.availability.policy.peak_retention, 0.5);
        assert_eq!(config.availability.seed, Some(9));
        assert_eq!(config.logging.filter, default_log_filter());
    }

    #[test]
    fn test_partial_availability_section_keeps_defaults() {
        let config: HostConfig = toml::from_str("[availability]\nseed = 1\n").unwrap();
        assert_eq!(config.availability.policy, SlotPolicy::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = HostConfig::default();
        config.apply_overrides(env(&[
            ("LEMON_RESTAURANT_NAME", "Lemon Uptown"),
            ("LEMON_PEAK_DAYS", "sun, sat"),
            ("LEMON_PEAK_RETENTION", "0.25"),
            ("LEMON_SEED", "77"),
        ]));

        assert_eq!(config.restaurant.name, "Lemon Uptown");
        assert_eq!(
            config.availability.policy.peak_days,
            vec![Weekday::Sun, Weekday::Sat]
        );
        assert_eq!(config.availability.policy.peak_retention, 0.25);
        assert_eq!(config.availability.seed, Some(77));
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = HostConfig::default();
        config.apply_overrides(env(&[
            ("LEMON_PEAK_DAYS", "fri, caturday"),
            ("LEMON_SEED", "-3"),
        ]));

        assert_eq!(config.availability.policy.peak_days, SlotPolicy::default().peak_days);
        assert!(config.availability.seed.is_none());
    }

    #[test]
    fn test_config_validation() {
        let mut config = HostConfig::default();
        config.availability.policy.peak_retention = 1.5;
        assert!(matches!(config.validate(), Err(HostError::InvalidConfig(_))));

        config.availability.policy.peak_retention = 1.0;
        assert!(config.validate().is_ok());

        config.restaurant.name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_config("[availability]\npeak_retention = 2.0\n");

        let loaded = HostConfig::from_file(&path).unwrap();
        assert_eq!(loaded.availability.policy.peak_retention, 2.0);
        assert!(loaded.validate().is_err());

        std::fs::remove_file(&path).unwrap();
    }

    fn temp_config(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("lemon-host-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = temp_config("[availability]\npeak_retention = 2.0\n");

        let result = HostConfig::load_with_env(Some(path.clone()), env(&[]));
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(HostError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_layers_file_then_env() {
        let path = temp_config(
            "[restaurant]\nname = \"Lemon Harbor\"\n\n[availability]\npeak_days = [\"Sun\"]\npeak_retention = 0.4\n",
        );

        let from_file = HostConfig::load_with_env(Some(path.clone()), env(&[])).unwrap();
        let with_env = HostConfig::load_with_env(
            Some(path.clone()),
            env(&[("LEMON_PEAK_RETENTION", "0.9"), ("LEMON_SEED", "3")]),
        )
        .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(from_file.restaurant.name, "Lemon Harbor");
        assert_eq!(from_file.availability.policy.peak_days, vec![Weekday::Sun]);
        assert_eq!(from_file.availability.policy.peak_retention, 0.4);
        assert_eq!(from_file.logging.filter, default_log_filter());

        assert_eq!(with_env.restaurant.name, "Lemon Harbor");
        assert_eq!(with_env.availability.policy.peak_retention, 0.9);
        assert_eq!(with_env.availability.seed, Some(3));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join(format!("lemon-host-{}.toml", uuid::Uuid::new_v4()));

        let config = HostConfig::load_with_env(Some(path), env(&[])).unwrap();

        assert_eq!(config.restaurant.name, "Little Lemon");
        assert_eq!(config.availability.policy, SlotPolicy::default());
    }

    #[test]
    fn test_load_validates_after_layering() {
        let path = temp_config("[availability]\npeak_retention = 2.0\n");

        let result = HostConfig::load(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(HostError::InvalidConfig(_))));
    }

    #[test]
    fn test_default_log_filter_names_real_targets() {
        let filter = default_log_filter();
        assert!(filter.contains(&format!("{}=debug", env!("CARGO_CRATE_NAME"))));
        assert!(filter.contains("lemon_core=debug"));
    }
}
