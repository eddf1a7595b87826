//! Shared state for a single command invocation

use anyhow::Result;
use petfyco_api_client::{
    ApiResult, Backend, ClientConfig, FileSessionStore, PetfycoClient, SupabaseBackend,
};
use petfyco_cli::progress::{self, ProgressBar};
use petfyco_cli::OutputFormat;
use petfyco_core::config::Config;
use std::sync::Arc;

pub struct AppContext {
    pub config: Config,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(config: Config, format: OutputFormat) -> Self {
        Self { config, format }
    }

    /// Resolved backend settings; environment variables override the
    /// `[backend]` section
    pub fn client_config(&self) -> Result<ClientConfig> {
        Ok(ClientConfig::from_env_and_file(&self.config.schema.backend)?)
    }

    /// Backend for the hosted service
    pub fn backend(&self) -> Result<Arc<dyn Backend>> {
        self.backend_with(self.client_config()?)
    }

    /// Backend built from already resolved settings
    pub fn backend_with(&self, client_config: ClientConfig) -> Result<Arc<dyn Backend>> {
        tracing::debug!(
            url = %client_config.url,
            environment = ?client_config.environment,
            "Using backend"
        );
        let client = PetfycoClient::with_config(client_config)?;
        let sessions = Arc::new(self.session_store()?);
        Ok(Arc::new(SupabaseBackend::new(client, sessions)))
    }

    fn session_store(&self) -> ApiResult<FileSessionStore> {
        match &self.config.schema.session.path {
            Some(path) => Ok(FileSessionStore::new(path)),
            None => FileSessionStore::default_location(),
        }
    }

    /// Spinner for a network call; never drawn for JSON output
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if self.format.is_json() {
            progress::hidden()
        } else {
            progress::spinner(message)
        }
    }
}
