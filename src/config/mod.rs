use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod backend;
pub mod server;

pub use backend::BackendConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub matching: MatchingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

/// Tuning for the matching calculator
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MatchingConfig {
    /// Upper bound on partial sums explored by the exact within-limit search
    pub search_state_limit: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            search_state_limit: 200_000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "debug".to_string()),
            },
            server: ServerConfig::from_env()?,
            backend: BackendConfig::from_env()?,
            matching: MatchingConfig {
                search_state_limit: env::var("MATCHING_SEARCH_STATE_LIMIT")
                    .unwrap_or_else(|_| "200000".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid MATCHING_SEARCH_STATE_LIMIT".to_string())
                    })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.backend.validate()?;

        if self.matching.search_state_limit == 0 {
            return Err(AppError::Configuration(
                "Matching search state limit must be greater than 0".to_string(),
            ));
        }

        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "Server workers must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
