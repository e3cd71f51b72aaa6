use crate::error::{FaultwallError, Result};
use dashmap::DashMap;
use std::env;
use std::sync::Arc;

/// Environment key toggling panic capture
pub const CATCH_PANICS_KEY: &str = "FAULTWALL_CATCH_PANICS";

/// Environment key toggling `error` level logs for translated faults
pub const LOG_FAULTS_KEY: &str = "FAULTWALL_LOG_FAULTS";

/// Configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Create a service seeded from the process environment
    pub fn new() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    /// Read a boolean flag, falling back to `default` when the key is absent
    pub fn get_flag(&self, key: &str, default: bool) -> Result<bool> {
        let Some(raw) = self.get(key) else {
            return Ok(default);
        };

        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            other => Err(FaultwallError::invalid_config(
                key,
                format!("expected a boolean, got {:?}", other),
            )),
        }
    }
}

/// Settings for the error-translation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationConfig {
    /// Translate panics raised by the rest of the chain into error responses
    pub catch_panics: bool,
    /// Emit an `error` event for every translated fault
    pub log_faults: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            catch_panics: true,
            log_faults: true,
        }
    }
}

impl TranslationConfig {
    pub fn from_config(config: &ConfigService) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            catch_panics: config.get_flag(CATCH_PANICS_KEY, defaults.catch_panics)?,
            log_faults: config.get_flag(LOG_FAULTS_KEY, defaults.log_faults)?,
        })
    }

    /// Load settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_config(&ConfigService::new())
    }

    pub fn catch_panics(mut self, enabled: bool) -> Self {
        self.catch_panics = enabled;
        self
    }

    pub fn log_faults(mut self, enabled: bool) -> Self {
        self.log_faults = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_keys_missing() {
        let config = ConfigService::default();
        let settings = TranslationConfig::from_config(&config).unwrap();
        assert_eq!(settings, TranslationConfig::default());
        assert!(settings.catch_panics);
        assert!(settings.log_faults);
    }

    #[test]
    fn test_flags_are_parsed() {
        let config = ConfigService::default();
        config.set(CATCH_PANICS_KEY, "off");
        config.set(LOG_FAULTS_KEY, " FALSE ");

        let settings = TranslationConfig::from_config(&config).unwrap();
        assert!(!settings.catch_panics);
        assert!(!settings.log_faults);

        config.set(CATCH_PANICS_KEY, "1");
        assert!(config.get_flag(CATCH_PANICS_KEY, false).unwrap());
    }

    #[test]
    fn test_invalid_flag_is_rejected() {
        let config = ConfigService::default();
        config.set(LOG_FAULTS_KEY, "sometimes");

        let err = TranslationConfig::from_config(&config).unwrap_err();
        match err {
            FaultwallError::InvalidConfig { key, .. } => assert_eq!(key, LOG_FAULTS_KEY),
            other => panic!("unexpected error: {other}"),
        }
    }
}
