//! Runtime configuration, read from the environment.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default image model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default pause before the request is sent.
pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_millis(1500);

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Environment variable overriding the model.
pub const MODEL_VAR: &str = "TRUECAPTURE_MODEL";

/// Environment variable overriding the base URL.
pub const BASE_URL_VAR: &str = "TRUECAPTURE_BASE_URL";

/// Settings for talking to the model.
#[derive(Clone)]
pub struct Config {
    /// Secret API key.
    pub api_key: String,
    /// Model name used in the request path.
    pub model: String,
    /// Scheme and host of the API, without a trailing path.
    pub base_url: String,
    /// Pause between the analyzing and processing states.
    pub analysis_delay: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("analysis_delay", &self.analysis_delay)
            .finish()
    }
}

impl Config {
    /// Defaults with the given key.
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            analysis_delay: DEFAULT_ANALYSIS_DELAY,
        }
    }

    /// Read the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApiKey`] if none of [`API_KEY_VARS`] holds a
    /// non-empty value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApiKey`] if no key is found.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = API_KEY_VARS
            .into_iter()
            .find_map(&non_empty)
            .ok_or(Error::MissingApiKey)?;

        let mut config = Self::with_api_key(api_key.trim());
        if let Some(model) = non_empty(MODEL_VAR) {
            config.model = model;
        }
        if let Some(base_url) = non_empty(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn gemini_key_takes_precedence() {
        let config =
            Config::from_lookup(lookup(&[("GEMINI_API_KEY", "g"), ("API_KEY", "a")])).unwrap();
        assert_eq!(config.api_key, "g");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.analysis_delay, DEFAULT_ANALYSIS_DELAY);
    }

    #[test]
    fn falls_back_to_api_key() {
        let config = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "  "), ("API_KEY", "a")]))
            .unwrap();
        assert_eq!(config.api_key, "a");
    }

    #[test]
    fn missing_key_is_an_error() {
        assert!(matches!(
            Config::from_lookup(lookup(&[])),
            Err(Error::MissingApiKey)
        ));
    }

    #[test]
    fn overrides_model_and_base_url() {
        let config = Config::from_lookup(lookup(&[
            ("API_KEY", "a"),
            (MODEL_VAR, "other-model"),
            (BASE_URL_VAR, "http://127.0.0.1:8080"),
        ]))
        .unwrap();
        assert_eq!(config.model, "other-model");
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn debug_redacts_key() {
        let rendered = format!("{:?}", Config::with_api_key("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("redacted"));
    }
}
