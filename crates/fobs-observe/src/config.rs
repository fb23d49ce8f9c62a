//! Observer configuration.
//!
//! Controls how observations show up in logs. Defaults suit most callers;
//! override via environment variables or explicit construction.

use serde::{Deserialize, Serialize};

/// Default label attached to every emission log line.
pub const DEFAULT_LABEL: &str = "computation";

/// Configuration shared by every observation an observer starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    /// Names the observed computations in logs.
    pub label: String,
    /// Log each emitted state at `debug`.
    pub log_emissions: bool,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            log_emissions: true,
        }
    }
}

impl ObserverConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `FOBS_OBSERVER_LABEL` (default: `computation`)
    /// - `FOBS_LOG_EMISSIONS` (default: `true`; accepts true/false, 1/0,
    ///   yes/no, on/off in any case)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(label) = lookup("FOBS_OBSERVER_LABEL") {
            let label = label.trim();
            if label.is_empty() {
                return Err(ConfigError::EmptyLabel("FOBS_OBSERVER_LABEL".to_string()));
            }
            config.label = label.to_string();
        }

        if let Some(raw) = lookup("FOBS_LOG_EMISSIONS") {
            config.log_emissions = parse_flag("FOBS_LOG_EMISSIONS", &raw)?;
        }

        Ok(config)
    }

    /// Replace the log label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Turn per-emission logging on or off.
    pub fn with_log_emissions(mut self, enabled: bool) -> Self {
        self.log_emissions = enabled;
        self
    }
}

fn parse_flag(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var: var.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    EmptyLabel(String),
    #[error("invalid boolean for {var}: {value:?}")]
    InvalidFlag { var: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = ObserverConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, ObserverConfig::default());
        assert_eq!(cfg.label, "computation");
        assert!(cfg.log_emissions);
    }

    #[test]
    fn reads_label_and_flag() {
        let cfg = ObserverConfig::from_lookup(lookup(&[
            ("FOBS_OBSERVER_LABEL", " upload "),
            ("FOBS_LOG_EMISSIONS", "OFF"),
        ]))
        .unwrap();
        assert_eq!(cfg.label, "upload");
        assert!(!cfg.log_emissions);
    }

    #[test]
    fn accepts_every_flag_spelling() {
        for (raw, expected) in [
            ("true", true),
            ("1", true),
            ("Yes", true),
            ("on", true),
            ("FALSE", false),
            ("0", false),
            ("no", false),
            ("Off", false),
        ] {
            assert_eq!(parse_flag("X", raw).unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn rejects_invalid_flag() {
        let err = ObserverConfig::from_lookup(lookup(&[("FOBS_LOG_EMISSIONS", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFlag { ref value, .. } if value == "maybe"));
        assert_eq!(
            err.to_string(),
            "invalid boolean for FOBS_LOG_EMISSIONS: \"maybe\""
        );
    }

    #[test]
    fn rejects_blank_label() {
        let err =
            ObserverConfig::from_lookup(lookup(&[("FOBS_OBSERVER_LABEL", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyLabel(_)));
    }

    #[test]
    fn builders_override_fields() {
        let cfg = ObserverConfig::default()
            .with_label("fetch")
            .with_log_emissions(false);
        assert_eq!(cfg.label, "fetch");
        assert!(!cfg.log_emissions);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let cfg: ObserverConfig = serde_json::from_str(r#"{"label":"sync"}"#).unwrap();
        assert_eq!(cfg.label, "sync");
        assert!(cfg.log_emissions);
    }
}
