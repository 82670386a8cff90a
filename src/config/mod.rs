//! Configuration loading and management for the Tax Calculator service.
//!
//! This module loads the service configuration (listener, authentication
//! and record settings) from a YAML file and applies environment overrides.
//!
//! # Example
//!
//! ```no_run
//! use tax_calculator::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/app.yaml").unwrap();
//! println!("Bind address: {}", config.server().bind_address());
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, ENV_HOST, ENV_PORT, ENV_TOKEN_SECRET, MAX_TOKEN_TTL_MINUTES};
pub use types::{AppConfig, AuthConfig, RecordsConfig, ServerConfig};
