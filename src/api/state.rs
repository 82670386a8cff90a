//! Application state for the Tax Calculator API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::auth::TokenSigner;
use crate::config::ConfigLoader;
use crate::store::TaxStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers:
/// the loaded configuration, the record store and the token signer.
#[derive(Clone)]
pub struct AppState {
    /// The loaded service configuration.
    config: Arc<ConfigLoader>,
    /// Users, tax records and employees.
    store: TaxStore,
    /// Issues and verifies bearer tokens.
    signer: Arc<TokenSigner>,
}

impl AppState {
    /// Creates a new application state with an empty store.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_store(config, TaxStore::new())
    }

    /// Creates a new application state over an existing store.
    pub fn with_store(config: ConfigLoader, store: TaxStore) -> Self {
        let signer = TokenSigner::from_config(config.auth());
        Self {
            config: Arc::new(config),
            store,
            signer: Arc::new(signer),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the record store.
    pub fn store(&self) -> &TaxStore {
        &self.store
    }

    /// Returns the token signer.
    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }
}
