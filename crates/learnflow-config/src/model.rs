//! Configuration schema for the relay.

use serde::{Deserialize, Serialize};

/// Root config for the relay.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RelayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub resources: ResourcesConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

impl RelayConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> RelayConfigBuilder {
        RelayConfigBuilder::new()
    }
}

/// Builder for assembling a `RelayConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct RelayConfigBuilder {
    config: RelayConfig,
}

impl RelayConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: RelayConfig::default(),
        }
    }

    /// Replace the server configuration.
    pub fn server(mut self, server: ServerConfig) -> Self {
        self.config.server = server;
        self
    }

    /// Replace the LLM provider configuration.
    pub fn llm(mut self, llm: LlmConfig) -> Self {
        self.config.llm = llm;
        self
    }

    /// Replace the web search configuration.
    pub fn search(mut self, search: SearchConfig) -> Self {
        self.config.search = search;
        self
    }

    /// Replace the rate limit configuration.
    pub fn rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.config.rate_limit = rate_limit;
        self
    }

    /// Replace the local resources configuration.
    pub fn resources(mut self, resources: ResourcesConfig) -> Self {
        self.config.resources = resources;
        self
    }

    /// Replace the admin command configuration.
    pub fn admin(mut self, admin: AdminConfig) -> Self {
        self.config.admin = admin;
        self
    }

    /// Finalize and return the built `RelayConfig`.
    pub fn build(self) -> RelayConfig {
        self.config
    }
}

/// Deployment environment; selects the CORS policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Lowercase label used in the health endpoint and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub environment: Environment,
    /// Origins allowed by CORS in production; ignored in development where
    /// the policy is permissive.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            environment: Environment::default(),
            allowed_origins: Vec::new(),
        }
    }
}

/// Default listening port.
fn default_port() -> u16 {
    3000
}

/// External LLM provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider credential; overridden by `GEMINI_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

/// Default generation model.
fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

/// Default sampling temperature.
fn default_temperature() -> f32 {
    0.7
}

/// Default output token budget.
fn default_max_output_tokens() -> u32 {
    1024
}

/// Web search provider settings. With no credential the relay falls back to
/// the deterministic simulated provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchConfig {
    /// Provider credential; overridden by `SEARCH_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Programmable search engine id; overridden by `SEARCH_ENGINE_ID`.
    #[serde(default)]
    pub engine_id: Option<String>,
}

impl SearchConfig {
    /// True when both credential pieces are present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.engine_id.is_some()
    }
}

/// Fixed-window rate limit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Map size past which expired buckets are swept before insert.
    #[serde(default = "default_sweep_threshold")]
    pub sweep_threshold: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            max_requests: default_max_requests(),
            sweep_threshold: default_sweep_threshold(),
        }
    }
}

/// Default rate limit window length in seconds.
fn default_window_secs() -> u64 {
    60
}

/// Default request budget per window per identity.
fn default_max_requests() -> u32 {
    10
}

/// Default bucket map size that triggers a sweep.
fn default_sweep_threshold() -> usize {
    1024
}

/// Local resource and scan locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// Root of the indexable resource tree.
    #[serde(default = "default_resource_root")]
    pub root: String,
    /// Default root for `/scan` without an explicit path.
    #[serde(default = "default_scan_root")]
    pub scan_root: String,
    /// Optional JSON file replacing the built-in course catalog.
    #[serde(default)]
    pub courses_path: Option<String>,
    /// Optional JSON file replacing the built-in navigation map.
    #[serde(default)]
    pub navigation_path: Option<String>,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            root: default_resource_root(),
            scan_root: default_scan_root(),
            courses_path: None,
            navigation_path: None,
        }
    }
}

/// Default resource tree root.
fn default_resource_root() -> String {
    "resources".to_string()
}

/// Default scan root for admin commands.
fn default_scan_root() -> String {
    ".".to_string()
}

/// Admin command settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminConfig {
    /// Identities allowed to run `/scan` and `/debug`. An empty list leaves
    /// commands open.
    #[serde(default)]
    pub allowed_identities: Vec<String>,
}
