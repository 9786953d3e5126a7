//! Runtime configuration, read from environment variables with defaults.
//!
//! | Variable                    | Default                | Meaning                       |
//! |-----------------------------|------------------------|-------------------------------|
//! | `COMMERCIUM_CHANNEL_BUFFER` | `32`                   | mailbox size of every store   |
//! | `COMMERCIUM_BCRYPT_COST`    | `bcrypt::DEFAULT_COST` | bcrypt work factor (4..=31)   |
//! | `RUST_LOG`                  | `info`                 | log filter for `setup_tracing`|
//!
//! A value that does not parse, or is out of range, is replaced by its default and
//! reported with a warning.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::warn;

pub const CHANNEL_BUFFER_VAR: &str = "COMMERCIUM_CHANNEL_BUFFER";
pub const BCRYPT_COST_VAR: &str = "COMMERCIUM_BCRYPT_COST";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

const DEFAULT_CHANNEL_BUFFER: usize = 32;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub channel_buffer: usize,
    pub bcrypt_cost: u32,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let channel_buffer = parse_or(&lookup, CHANNEL_BUFFER_VAR, defaults.channel_buffer, |n| {
            *n > 0
        });
        let bcrypt_cost = parse_or(&lookup, BCRYPT_COST_VAR, defaults.bcrypt_cost, |cost| {
            (4..=31).contains(cost)
        });
        let log_filter = lookup(LOG_FILTER_VAR)
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        Self {
            channel_buffer,
            bcrypt_cost,
            log_filter,
        }
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    valid: impl Fn(&T) -> bool,
) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        _ => {
            warn!(key, value = %raw, %default, "Invalid configuration value, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config_from(&[]), AppConfig::default());
        assert_eq!(AppConfig::default().channel_buffer, 32);
        assert_eq!(AppConfig::default().log_filter, "info");
    }

    #[test]
    fn test_reads_values() {
        let config = config_from(&[
            (CHANNEL_BUFFER_VAR, "128"),
            (BCRYPT_COST_VAR, " 6 "),
            (LOG_FILTER_VAR, "commercium=debug"),
        ]);
        assert_eq!(config.channel_buffer, 128);
        assert_eq!(config.bcrypt_cost, 6);
        assert_eq!(config.log_filter, "commercium=debug");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            (CHANNEL_BUFFER_VAR, "0"),
            (BCRYPT_COST_VAR, "99"),
            (LOG_FILTER_VAR, "  "),
        ]);
        assert_eq!(config, AppConfig::default());

        let config = config_from(&[(CHANNEL_BUFFER_VAR, "lots")]);
        assert_eq!(config.channel_buffer, 32);
    }
}
