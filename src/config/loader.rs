//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file and applying environment overrides.

use std::fs;
use std::path::Path;

use crate::error::{TaxError, AppResult};

use super::types::{AppConfig, AuthConfig, RecordsConfig, ServerConfig};

/// Environment variable overriding the bind host.
pub const ENV_HOST: &str = "TAX_CALCULATOR_HOST";
/// Environment variable overriding the bind port.
pub const ENV_PORT: &str = "TAX_CALCULATOR_PORT";
/// Environment variable overriding the token signing secret.
pub const ENV_TOKEN_SECRET: &str = "TAX_CALCULATOR_TOKEN_SECRET";

/// Longest accepted token lifetime: one year.
pub const MAX_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 365;

/// Loads and provides access to the service configuration.
///
/// # Example
///
/// ```no_run
/// use tax_calculator::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/app.yaml")?.with_env_overrides()?;
/// println!("Listening on {}", loader.server().bind_address());
/// # Ok::<(), tax_calculator::error::TaxError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or mistyped fields (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| TaxError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            TaxError::ConfigParseError { message, .. } => TaxError::ConfigParseError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Parses configuration from YAML text.
    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let config = serde_yaml::from_str::<AppConfig>(content).map_err(|e| {
            TaxError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> AppResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by the `ENV_*` names.
    pub fn with_overrides<F>(mut self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.config.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.config.server.port = port.parse::<u16>().map_err(|e| TaxError::ConfigParseError {
                path: ENV_PORT.to_string(),
                message: e.to_string(),
            })?;
        }
        if let Some(secret) = lookup(ENV_TOKEN_SECRET) {
            self.config.auth.token_secret = secret;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> AppResult<()> {
        let invalid = |message: &str| TaxError::ConfigParseError {
            path: "<config>".to_string(),
            message: message.to_string(),
        };
        if self.config.auth.token_secret.is_empty() {
            return Err(invalid("auth.token_secret must not be empty"));
        }
        if self.config.auth.token_ttl_minutes <= 0 {
            return Err(invalid("auth.token_ttl_minutes must be positive"));
        }
        if self.config.auth.token_ttl_minutes > MAX_TOKEN_TTL_MINUTES {
            return Err(invalid("auth.token_ttl_minutes must not exceed one year"));
        }
        if self.config.records.default_page_limit > self.config.records.max_page_limit {
            return Err(invalid(
                "records.default_page_limit must not exceed records.max_page_limit",
            ));
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the HTTP listener settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    /// Returns the password and token settings.
    pub fn auth(&self) -> &AuthConfig {
        &self.config.auth
    }

    /// Returns the tax record settings.
    pub fn records(&self) -> &RecordsConfig {
        &self.config.records
    }
}
