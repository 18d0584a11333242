use crate::domain::model::{FilterCriteria, Reaction};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ReactionError, Result};
use crate::utils::validation::{validate_endpoint_path, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5799";

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub server: ServerConfig,
    pub filter: Option<FilterDefaults>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub base_url: String,
    pub like_path: Option<String>,
    pub dislike_path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Initial values for the filter controls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterDefaults {
    pub mode: Option<String>,
    pub threshold: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                base_url: DEFAULT_SERVER_URL.to_string(),
                like_path: None,
                dislike_path: None,
                timeout_seconds: None,
            },
            filter: None,
        }
    }
}

impl ClientConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReactionError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ReactionError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("server.base_url", &self.server.base_url)?;
        validate_endpoint_path("server.like_path", self.like_path())?;
        validate_endpoint_path("server.dislike_path", self.dislike_path())?;

        if self.server.timeout_seconds == Some(0) {
            return Err(ReactionError::InvalidConfigValueError {
                field: "server.timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be at least 1 second".to_string(),
            });
        }

        Ok(())
    }

    /// Filter criteria from `[filter]`, with explicit values taking precedence.
    pub fn filter_criteria(&self, mode: Option<&str>, threshold: Option<&str>) -> FilterCriteria {
        let defaults = self.filter.clone().unwrap_or_default();
        let mode = mode.or(defaults.mode.as_deref()).unwrap_or("all");
        let threshold = threshold.or(defaults.threshold.as_deref()).unwrap_or("");
        FilterCriteria::from_inputs(mode, threshold)
    }
}

impl ConfigProvider for ClientConfig {
    fn server_url(&self) -> &str {
        &self.server.base_url
    }

    fn like_path(&self) -> &str {
        self.server
            .like_path
            .as_deref()
            .unwrap_or(Reaction::Like.default_path())
    }

    fn dislike_path(&self) -> &str {
        self.server
            .dislike_path
            .as_deref()
            .unwrap_or(Reaction::Dislike.default_path())
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.server.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
