//! Process-wide carrier configuration
//!
//! The carrier protocol has two knobs: how a carrier unwinds when it is raised,
//! and whether a backtrace is captured when an error is wrapped. Both can come
//! from the environment, from a JSON document, or be set programmatically.

use std::str::FromStr;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{
    CARRIER_BACKTRACE_VAR, CARRIER_RAISE_VAR, CONFIG_TRACE_TARGET, FALSY_VALUES, TRUTHY_VALUES,
};
use crate::errors::{Error, Result, ResultExt};

/// How a carrier leaves the frame that raised it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaiseMode {
    /// Unwind without running the panic hook
    #[default]
    Resume,
    /// Unwind through `panic_any`, so the panic hook reports the raise site
    Panic,
}

impl FromStr for RaiseMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resume" => Ok(RaiseMode::Resume),
            "panic" => Ok(RaiseMode::Panic),
            _ => Err(Error::invalid_setting(
                CARRIER_RAISE_VAR,
                s,
                "expected 'resume' or 'panic'",
            )),
        }
    }
}

/// Settings for wrapping and raising carriers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CarrierConfig {
    pub raise: RaiseMode,
    pub capture_backtrace: bool,
}

impl CarrierConfig {
    /// Read the configuration from `CHECKED_CARRIER_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup
    ///
    /// Unset keys keep their default. Set keys must parse.
    pub fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(CARRIER_RAISE_VAR) {
            config.raise = raw.parse()?;
        }
        if let Some(raw) = lookup(CARRIER_BACKTRACE_VAR) {
            config.capture_backtrace = parse_flag(CARRIER_BACKTRACE_VAR, &raw)?;
        }
        Ok(config)
    }

    /// Parse a JSON document such as `{"raise": "panic", "capture_backtrace": true}`
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid carrier configuration")
    }

    #[must_use]
    pub fn with_raise(mut self, raise: RaiseMode) -> Self {
        self.raise = raise;
        self
    }

    #[must_use]
    pub fn with_capture_backtrace(mut self, capture_backtrace: bool) -> Self {
        self.capture_backtrace = capture_backtrace;
        self
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    let value = raw.trim().to_ascii_lowercase();
    if TRUTHY_VALUES.contains(&value.as_str()) {
        Ok(true)
    } else if FALSY_VALUES.contains(&value.as_str()) {
        Ok(false)
    } else {
        Err(Error::invalid_setting(key, raw, "expected a boolean flag"))
    }
}

static GLOBAL: Lazy<RwLock<CarrierConfig>> = Lazy::new(|| RwLock::new(load_from_env()));

fn load_from_env() -> CarrierConfig {
    CarrierConfig::from_env().unwrap_or_else(|e| {
        warn!(
            target: CONFIG_TRACE_TARGET,
            error = %e,
            "ignoring invalid carrier configuration from environment"
        );
        CarrierConfig::default()
    })
}

/// The configuration currently in effect
pub fn global() -> CarrierConfig {
    *GLOBAL.read()
}

/// Replace the process-wide configuration, returning the previous one
pub fn set_global(config: CarrierConfig) -> CarrierConfig {
    std::mem::replace(&mut *GLOBAL.write(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    /// Run `f` with the carrier variables set as given, restoring them afterwards
    fn with_env<R>(raise: Option<&str>, backtrace: Option<&str>, f: impl FnOnce() -> R) -> R {
        let saved: Vec<_> = [CARRIER_RAISE_VAR, CARRIER_BACKTRACE_VAR]
            .into_iter()
            .map(|key| (key, std::env::var(key).ok()))
            .collect();
        for (key, value) in [(CARRIER_RAISE_VAR, raise), (CARRIER_BACKTRACE_VAR, backtrace)] {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
        let result = f();
        for (key, value) in saved {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
        result
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = CarrierConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, CarrierConfig::default());
        assert_eq!(config.raise, RaiseMode::Resume);
        assert!(!config.capture_backtrace);
    }

    #[test]
    fn test_reads_both_settings() {
        let config = CarrierConfig::from_lookup(lookup_from(&[
            (CARRIER_RAISE_VAR, "Panic"),
            (CARRIER_BACKTRACE_VAR, " yes "),
        ]))
        .unwrap();
        assert_eq!(config.raise, RaiseMode::Panic);
        assert!(config.capture_backtrace);
    }

    #[test]
    fn test_rejects_unknown_raise_mode() {
        let err =
            CarrierConfig::from_lookup(lookup_from(&[(CARRIER_RAISE_VAR, "abort")])).unwrap_err();
        match err {
            Error::InvalidSetting { key, value, .. } => {
                assert_eq!(key, CARRIER_RAISE_VAR);
                assert_eq!(value, "abort");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_unknown_flag() {
        let err = CarrierConfig::from_lookup(lookup_from(&[(CARRIER_BACKTRACE_VAR, "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains("expected a boolean flag"));
    }

    #[test]
    fn test_json_round_trip() {
        let config = CarrierConfig::default()
            .with_raise(RaiseMode::Panic)
            .with_capture_backtrace(true);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"raise":"panic","capture_backtrace":true}"#);
        assert_eq!(CarrierConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_json_missing_fields_use_defaults() {
        let config = CarrierConfig::from_json(r#"{"capture_backtrace": true}"#).unwrap();
        assert_eq!(config.raise, RaiseMode::Resume);
        assert!(config.capture_backtrace);
    }

    #[test]
    fn test_invalid_json_carries_context() {
        let err = CarrierConfig::from_json(r#"{"raise": "sideways"}"#).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("JSON error: invalid carrier configuration: "));
        let source = std::error::Error::source(&err).expect("JSON errors keep their source");
        assert!(source.is::<serde_json::Error>());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        let config = with_env(Some("panic"), Some("on"), CarrierConfig::from_env).unwrap();
        assert_eq!(config.raise, RaiseMode::Panic);
        assert!(config.capture_backtrace);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_invalid_values() {
        let err = with_env(Some("sideways"), None, CarrierConfig::from_env).unwrap_err();
        assert!(matches!(err, Error::InvalidSetting { ref key, .. } if key == CARRIER_RAISE_VAR));
    }

    #[test]
    #[serial]
    fn test_invalid_environment_falls_back_to_defaults() {
        let (loaded, current) = with_env(Some("sideways"), Some("maybe"), || {
            (load_from_env(), global())
        });
        assert_eq!(loaded, CarrierConfig::default());
        assert_eq!(current, CarrierConfig::default());
    }

    #[test]
    #[serial]
    fn test_set_global_returns_previous() {
        let custom = CarrierConfig::default().with_capture_backtrace(true);
        let previous = set_global(custom);
        assert_eq!(global(), custom);
        assert_eq!(set_global(previous), custom);
    }
}
