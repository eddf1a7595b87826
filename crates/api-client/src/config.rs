//! Configuration for the PetfyCo API client
//!
//! Values come from the environment first, then from the `[backend]` section
//! of `petfyco.toml`, then from per-environment defaults.

use crate::error::{ApiError, ApiResult};
use petfyco_core::config::BackendConfig;
use petfyco_core::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Local Supabase started by `supabase start`
const LOCAL_SUPABASE_URL: &str = "http://localhost:54321";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (localhost Supabase)
    Development,
    /// Staging project
    Staging,
    /// Production project
    #[default]
    Production,
}

impl Environment {
    /// Parse an environment name, defaulting to production
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Project URL, without the `/auth/v1` or `/rest/v1` suffix
    pub url: String,
    /// Public anon key, sent as `apikey` on every request
    pub anon_key: Option<String>,
    /// Table pet rows are inserted into
    pub pets_table: String,
    /// Request timeout
    pub timeout: Duration,
    /// Retry policy for idempotent reads
    pub retry: RetryConfig,
    /// Current environment
    pub environment: Environment,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl ClientConfig {
    /// Create configuration from the environment overlaid on a file section
    ///
    /// Reads the following environment variables:
    /// - `SUPABASE_URL`: project URL (required outside development)
    /// - `SUPABASE_ANON_KEY`: anon key
    /// - `PETFYCO_ENV`: environment (development/staging/production)
    /// - `PETFYCO_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env_and_file(file: &BackendConfig) -> ApiResult<Self> {
        Self::resolve(|key| env::var(key).ok(), file)
    }

    /// Resolve configuration from a variable lookup and a file section
    pub fn resolve<F>(lookup: F, file: &BackendConfig) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::parse(&lookup("PETFYCO_ENV").unwrap_or_default());

        let url = match lookup("SUPABASE_URL").or_else(|| file.url.clone()) {
            Some(url) => url,
            None if environment == Environment::Development => LOCAL_SUPABASE_URL.to_string(),
            None => return Err(ApiError::missing_env("SUPABASE_URL")),
        };

        let anon_key = lookup("SUPABASE_ANON_KEY").or_else(|| file.anon_key.clone());

        let timeout = lookup("PETFYCO_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .or(file.timeout_secs)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        let retry = match environment {
            Environment::Development => RetryConfig::quick(),
            Environment::Staging => RetryConfig::default(),
            Environment::Production => RetryConfig::patient(),
        };

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
            pets_table: file.pets_table.clone(),
            timeout,
            retry,
            environment,
        })
    }

    /// Create development configuration (local Supabase)
    #[must_use]
    pub fn development() -> Self {
        Self {
            url: LOCAL_SUPABASE_URL.to_string(),
            anon_key: None,
            pets_table: "pets".to_string(),
            timeout: Duration::from_secs(10),
            retry: RetryConfig::quick(),
            environment: Environment::Development,
        }
    }

    /// Builder-style method to set the project URL
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder-style method to set anon key
    #[must_use]
    pub fn with_anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set retry config
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Base URL of the auth service
    #[must_use]
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.url)
    }

    /// Base URL of the REST service
    #[must_use]
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.url.is_empty() {
            return Err(ApiError::config("url cannot be empty"));
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(self.url.clone()));
        }

        if self.anon_key.as_deref().is_none_or(str::is_empty) {
            return Err(ApiError::missing_env("SUPABASE_ANON_KEY"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        if self.pets_table.trim().is_empty() {
            return Err(ApiError::config("pets_table cannot be empty"));
        }

        Ok(())
    }
}
