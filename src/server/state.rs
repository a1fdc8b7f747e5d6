//! Application state for the HTTP server.

use crate::api::NasaClient;
use crate::config::Config;
use crate::error::Result;
use std::sync::Arc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<NasaClient>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Builds the NASA client from `config`.
    pub fn new(config: Config) -> Result<Self> {
        let client = NasaClient::from_config(&config)?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: Config, client: NasaClient) -> Self {
        Self {
            client: Arc::new(client),
            config: Arc::new(config),
        }
    }
}
