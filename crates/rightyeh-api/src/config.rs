use config::{Config as ConfigLoader, ConfigError, Environment, File};
use rightyeh_assistant::{OpenAIConfig, WaitOptions};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Deployment name reported by `/health` (from `ENV`)
    #[serde(default = "default_environment")]
    pub environment: String,

    // Secrets (from ENV only)
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default)]
    pub openai_assistant_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            assistant: AssistantConfig::default(),
            logging: LoggingConfig::default(),
            environment: default_environment(),
            openai_api_key: String::new(),
            openai_assistant_id: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Whole-request timeout; checked against the assistant budget on load
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    90
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Overrides the public OpenAI endpoint (proxies, local mocks)
    #[serde(default)]
    pub base_url: Option<String>,
    pub max_wait_ms: u64,
    pub poll_interval_ms: u64,
    /// Timeout for each individual upstream request
    pub request_timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            max_wait_ms: 30_000,
            poll_interval_ms: 1_000,
            request_timeout_secs: 30,
        }
    }
}

impl AssistantConfig {
    pub fn wait_options(&self) -> WaitOptions {
        WaitOptions::new()
            .max_wait(Duration::from_millis(self.max_wait_ms))
            .poll_interval(Duration::from_millis(self.poll_interval_ms.max(1)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

fn default_environment() -> String {
    "development".to_string()
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables, `RIGHTYEH_<SECTION>__<KEY>`
    ///    (e.g. `RIGHTYEH_SERVER__PORT=8080`, `RIGHTYEH_ASSISTANT__MAX_WAIT_MS=45000`)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("RIGHTYEH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut cfg: Config = builder.build()?.try_deserialize()?;

        cfg.environment = env;
        cfg.validate()?;

        // Load secrets from ENV (not in TOML)
        cfg.openai_api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            ConfigError::Message("OPENAI_API_KEY environment variable is required".to_string())
        })?;
        cfg.openai_assistant_id = std::env::var("OPENAI_ASSISTANT_ID").map_err(|_| {
            ConfigError::Message(
                "OPENAI_ASSISTANT_ID environment variable is required".to_string(),
            )
        })?;

        Ok(cfg)
    }

    /// A chat turn waits up to `max_wait_ms` plus at least one upstream
    /// request; the whole-request timeout has to leave room for both.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let server_ms = self.server.request_timeout_secs.saturating_mul(1000);
        let turn_ms = self
            .assistant
            .max_wait_ms
            .saturating_add(self.assistant.request_timeout_secs.saturating_mul(1000));

        if server_ms <= turn_ms {
            return Err(ConfigError::Message(format!(
                "server.request_timeout_secs ({}s) must exceed assistant.max_wait_ms + \
                 assistant.request_timeout_secs ({}ms)",
                self.server.request_timeout_secs, turn_ms
            )));
        }
        Ok(())
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        ConfigLoader::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }

    /// Upstream client settings built from the secrets and `[assistant]`
    pub fn openai(&self) -> OpenAIConfig {
        let mut openai = OpenAIConfig::new(&self.openai_api_key, &self.openai_assistant_id)
            .with_request_timeout(Duration::from_secs(self.assistant.request_timeout_secs));
        if let Some(base_url) = &self.assistant.base_url {
            openai = openai.with_base_url(base_url);
        }
        openai
    }
}
