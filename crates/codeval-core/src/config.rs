//! Process-wide configuration, loaded once at startup.
//!
//! | variable               | default                                     |
//! |------------------------|---------------------------------------------|
//! | `GOOGLE_API_KEY`       | required                                    |
//! | `CODEVAL_MODEL`        | `gemini-2.5-flash`                          |
//! | `CODEVAL_API_BASE`     | `https://generativelanguage.googleapis.com` |
//! | `CODEVAL_TIMEOUT_SECS` | `30` (clamped to 1..=300)                   |
//! | `CODEVAL_BIND`         | `127.0.0.1:8501`                            |
//!
//! A missing API key is fatal: callers must not start serving without a
//! valid [`AppConfig`].

use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use completion_gateway::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use completion_gateway::GeminiConfig;

use crate::domain::ConfigError;
use crate::orchestrator::EvaluationSettings;

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const MODEL_VAR: &str = "CODEVAL_MODEL";
pub const API_BASE_VAR: &str = "CODEVAL_API_BASE";
pub const TIMEOUT_VAR: &str = "CODEVAL_TIMEOUT_SECS";
pub const BIND_VAR: &str = "CODEVAL_BIND";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

/// API credential; never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: ApiKey,
    pub model: String,
    pub api_base: String,
    pub call_timeout: Duration,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = get(API_KEY_VAR).ok_or_else(|| ConfigError::MissingApiKey {
            key: API_KEY_VAR.to_string(),
        })?;

        let timeout_secs = match get(TIMEOUT_VAR) {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| ConfigError::Invalid {
                    key: TIMEOUT_VAR.to_string(),
                    reason: format!("'{raw}' is not a whole number of seconds ({e})"),
                })?
                .clamp(1, 300),
            None => DEFAULT_TIMEOUT_SECS,
        };

        let bind_raw = get(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: BIND_VAR.to_string(),
                reason: format!("'{bind_raw}' is not a socket address ({e})"),
            })?;

        Ok(Self {
            api_key: ApiKey(api_key),
            model: get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: get(API_BASE_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            call_timeout: Duration::from_secs(timeout_secs),
            bind_addr,
        })
    }

    /// Settings for the Gemini client.
    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig::new(self.api_key.expose(), &self.model)
            .with_base_url(&self.api_base)
            .with_timeout(self.call_timeout)
    }

    /// Settings for the orchestrator.
    pub fn evaluation_settings(&self) -> EvaluationSettings {
        EvaluationSettings {
            call_timeout: self.call_timeout,
        }
    }
}

/// Best-effort load of `.env` then `.env.local` from `dir`.
///
/// Variables already present in the environment are not overridden.
pub fn load_env_files(dir: &Path) {
    let _ = dotenvy::from_path(dir.join(".env"));
    let _ = dotenvy::from_path(dir.join(".env.local"));
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
    fn test_missing_api_key_is_fatal() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey { .. }));
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let err = AppConfig::from_lookup(lookup(&[(API_KEY_VAR, "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey { .. }));
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[(API_KEY_VAR, "k")])).unwrap();
        assert_eq!(config.api_key.expose(), "k");
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.api_base, DEFAULT_BASE_URL);
        assert_eq!(config.call_timeout, Duration::from_secs(30));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8501");
    }

    #[test]
    fn test_overrides_and_timeout_clamp() {
        let config = AppConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "k"),
            (MODEL_VAR, "gemini-pro"),
            (TIMEOUT_VAR, "9000"),
            (BIND_VAR, "0.0.0.0:9000"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.call_timeout, Duration::from_secs(300));
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.evaluation_settings().call_timeout, Duration::from_secs(300));
        assert_eq!(config.gemini_config().timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(API_KEY_VAR, "k"), (TIMEOUT_VAR, "soon")]))
            .unwrap_err();
        match err {
            ConfigError::Invalid { key, .. } => assert_eq!(key, TIMEOUT_VAR),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_bind_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(API_KEY_VAR, "k"), (BIND_VAR, "localhost")]))
            .unwrap_err();
        assert!(err.to_string().contains(BIND_VAR));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = AppConfig::from_lookup(lookup(&[(API_KEY_VAR, "top-secret")])).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_load_env_files_reads_dotenv() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "CODEVAL_TEST_DOTENV_MARKER=from-dotenv\n",
        )
        .unwrap();

        load_env_files(dir.path());
        assert_eq!(
            std::env::var("CODEVAL_TEST_DOTENV_MARKER").as_deref(),
            Ok("from-dotenv")
        );
    }
}
