use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::core::{AppError, Result};

/// Connection settings for the wholesaler backend REST API
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl BackendConfig {
    pub fn from_env() -> Result<Self> {
        Ok(BackendConfig {
            base_url: env::var("BACKEND_BASE_URL")
                .map_err(|_| AppError::Configuration("BACKEND_BASE_URL not set".to_string()))?,
            api_key: env::var("BACKEND_API_KEY")
                .map_err(|_| AppError::Configuration("BACKEND_API_KEY not set".to_string()))?,
            timeout_secs: env::var("BACKEND_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| AppError::Configuration("Invalid BACKEND_TIMEOUT_SECS".to_string()))?,
            max_retries: env::var("BACKEND_MAX_RETRIES")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .map_err(|_| AppError::Configuration("Invalid BACKEND_MAX_RETRIES".to_string()))?,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL without a trailing slash, ready for path joining
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(AppError::Configuration(format!(
                "BACKEND_BASE_URL must be an http(s) URL, got {}",
                self.base_url
            )));
        }

        if self.api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "BACKEND_API_KEY must not be empty".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Backend timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
