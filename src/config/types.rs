//! Configuration types for the Tax Calculator service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section and
//! field has a default, so a partial file is valid.

use serde::Deserialize;

/// The full service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Password and token settings.
    pub auth: AuthConfig,
    /// Tax record validation and paging settings.
    pub records: RecordsConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// Returns `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Password and token settings.
///
/// `Debug` redacts the signing secret.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Secret used to sign access tokens.
    pub token_secret: String,
    /// Lifetime of an access token in minutes.
    pub token_ttl_minutes: i64,
    /// Minimum accepted password length.
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: "development-secret-change-me".to_string(),
            token_ttl_minutes: 30,
            min_password_length: 6,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("min_password_length", &self.min_password_length)
            .finish()
    }
}

/// Tax record validation and paging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    /// Earliest accepted tax year. The latest is always next year.
    pub min_tax_year: i32,
    /// Page size when a listing request gives no `limit`.
    pub default_page_limit: usize,
    /// Largest accepted `limit`.
    pub max_page_limit: usize,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            min_tax_year: 2020,
            default_page_limit: 100,
            max_page_limit: 1000,
        }
    }
}
