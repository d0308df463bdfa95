//! Config file loading, environment overrides, and validation.

use crate::{ConfigError, Environment, RelayConfig};
use log::{debug, info, warn};
use std::fs;
use std::path::Path;

/// Environment variable carrying the LLM credential.
const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Environment variable carrying the search credential.
const ENV_SEARCH_API_KEY: &str = "SEARCH_API_KEY";
/// Environment variable carrying the search engine id.
const ENV_SEARCH_ENGINE_ID: &str = "SEARCH_ENGINE_ID";
/// Environment variable overriding the listening port.
const ENV_PORT: &str = "PORT";
/// Environment variable selecting the deployment environment.
const ENV_ENVIRONMENT: &str = "LEARNFLOW_ENV";

impl RelayConfig {
    /// Load a config from a JSON5 file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        info!("loading config from path: {}", path.as_ref().display());
        let contents = fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }

    /// Load a config from JSON5 contents.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: serde_json::Value = json5::from_str(contents)?;
        let config: RelayConfig = serde_json::from_value(value)?;
        Ok(config)
    }

    /// Apply process environment overrides on top of file values.
    ///
    /// Credentials usually arrive this way in deployment; file values are
    /// kept only when the variable is unset.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(ENV_GEMINI_API_KEY)
            && !key.is_empty()
        {
            self.llm.api_key = Some(key);
        }
        if let Ok(key) = std::env::var(ENV_SEARCH_API_KEY)
            && !key.is_empty()
        {
            self.search.api_key = Some(key);
        }
        if let Ok(id) = std::env::var(ENV_SEARCH_ENGINE_ID)
            && !id.is_empty()
        {
            self.search.engine_id = Some(id);
        }
        if let Ok(port) = std::env::var(ENV_PORT) {
            match port.parse::<u16>() {
                Ok(port) if port != 0 => self.server.port = port,
                _ => warn!("ignoring invalid PORT override (value={})", port),
            }
        }
        if let Ok(environment) = std::env::var(ENV_ENVIRONMENT) {
            match environment.to_lowercase().as_str() {
                "development" => self.server.environment = Environment::Development,
                "production" => self.server.environment = Environment::Production,
                other => warn!("ignoring unknown environment override (value={})", other),
            }
        }
    }

    /// Validate configuration invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".to_string()));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::Invalid(
                "llm.temperature must be between 0.0 and 2.0".to_string(),
            ));
        }
        if self.llm.max_output_tokens == 0 {
            return Err(ConfigError::Invalid(
                "llm.max_output_tokens must be non-zero".to_string(),
            ));
        }
        if self.rate_limit.window_secs == 0 || self.rate_limit.max_requests == 0 {
            return Err(ConfigError::Invalid(
                "rate_limit window and request budget must be non-zero".to_string(),
            ));
        }
        if self.server.environment == Environment::Production
            && self.server.allowed_origins.is_empty()
        {
            return Err(ConfigError::Invalid(
                "production requires server.allowed_origins".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Environment, RelayConfig};
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_pass_validation() {
        let config = RelayConfig::default();
        config.validate().expect("valid");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.rate_limit.window_secs, 60);
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.llm.model, "gemini-2.5-flash");
    }

    #[test]
    fn loads_json5_with_partial_sections() {
        let config = RelayConfig::load_from_str(
            r#"{
                // deployment overrides
                server: { port: 8080 },
                rate_limit: { max_requests: 3 },
            }"#,
        )
        .expect("config");

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.rate_limit.max_requests, 3);
        assert_eq!(config.rate_limit.window_secs, 60);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn load_from_path_reads_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("learnflow.json5");
        std::fs::write(&path, r#"{ llm: { model: "gemini-2.5-pro" } }"#).expect("write");

        let config = RelayConfig::load_from_path(&path).expect("config");
        assert_eq!(config.llm.model, "gemini-2.5-pro");
    }

    #[test]
    fn production_without_origins_fails_validation() {
        let config = RelayConfig::load_from_str(r#"{ server: { environment: "production" } }"#)
            .expect("config");
        let err = config.validate().expect_err("invalid");
        assert!(err.to_string().contains("allowed_origins"));
    }

    #[test]
    fn env_override_wins_over_file_value() {
        // set_var is unsafe in edition 2024; the key is only read here.
        unsafe { std::env::set_var("GEMINI_API_KEY", "from-env") };
        let mut config =
            RelayConfig::load_from_str(r#"{ llm: { api_key: "from-file" } }"#).expect("config");
        config.apply_env_overrides();
        assert_eq!(config.llm.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn out_of_range_temperature_fails_validation() {
        let config =
            RelayConfig::load_from_str(r#"{ llm: { temperature: 3.5 } }"#).expect("config");
        assert!(config.validate().is_err());
    }

    #[test]
    fn builder_replaces_sections() {
        let config = RelayConfig::builder()
            .admin(crate::AdminConfig {
                allowed_identities: vec!["ops".to_string()],
            })
            .build();
        assert_eq!(config.admin.allowed_identities, vec!["ops".to_string()]);
    }
}
