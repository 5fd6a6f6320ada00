use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

pub const LATENCY_ENV: &str = "LISTINGS_LATENCY_MS";
pub const SEED_ENV: &str = "LISTINGS_SEED";
pub const LOG_ENV: &str = "RUST_LOG";

/// Runtime settings for the mock service and the CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Delay applied to every mock service call
    pub latency: Duration,
    /// JSON file to seed the mock service from; built-in listings when unset
    pub seed_path: Option<PathBuf>,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            latency: Duration::ZERO,
            seed_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Defaults overridden by environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(raw) = lookup(LATENCY_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => settings.latency = Duration::from_millis(ms),
                Err(_) => warn!("Ignoring {}={:?}: not a whole number of ms", LATENCY_ENV, raw),
            }
        }
        if let Some(path) = lookup(SEED_ENV).filter(|p| !p.trim().is_empty()) {
            settings.seed_path = Some(PathBuf::from(path));
        }
        if let Some(filter) = lookup(LOG_ENV).filter(|f| !f.trim().is_empty()) {
            settings.log_filter = filter;
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(Settings::from_lookup(lookup(&[])), Settings::default());
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::from_lookup(lookup(&[
            (LATENCY_ENV, "25"),
            (SEED_ENV, "data/listings.json"),
            (LOG_ENV, "property_listings=debug"),
        ]));

        assert_eq!(settings.latency, Duration::from_millis(25));
        assert_eq!(settings.seed_path, Some(PathBuf::from("data/listings.json")));
        assert_eq!(settings.log_filter, "property_listings=debug");
    }

    #[test]
    fn malformed_latency_keeps_default() {
        let settings = Settings::from_lookup(lookup(&[(LATENCY_ENV, "soon")]));
        assert_eq!(settings.latency, Duration::ZERO);
    }
}
