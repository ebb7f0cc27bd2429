//! Configuration module for the payload inspector
//!
//! This module handles loading and validating configuration from environment
//! variables.

use envconfig::Envconfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::decode::PayloadKind;
use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct Config {
    /// Logging configuration
    #[serde(flatten)]
    #[envconfig(nested = true)]
    pub logging: LoggingConfig,

    /// Input configuration
    #[serde(flatten)]
    #[envconfig(nested = true)]
    pub input: InputConfig,

    /// Output configuration
    #[serde(flatten)]
    #[envconfig(nested = true)]
    pub output: OutputConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct LoggingConfig {
    /// Log level
    #[envconfig(from = "LOG_LEVEL", default = "info")]
    pub log_level: String,

    /// Environment (development, staging, production)
    #[envconfig(from = "ENVIRONMENT", default = "development")]
    pub environment: String,
}

impl LoggingConfig {
    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Which payload to decode
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct InputConfig {
    /// Path of the JSON file to decode
    #[envconfig(from = "PAYLOAD_PATH")]
    pub payload_path: String,

    /// Kind of record the file holds, e.g. `store` or `lego-world`
    #[envconfig(from = "PAYLOAD_KIND")]
    pub payload_kind: String,
}

impl InputConfig {
    pub fn path(&self) -> &Path {
        Path::new(&self.payload_path)
    }

    pub fn kind(&self) -> Result<PayloadKind> {
        PayloadKind::from_name(&self.payload_kind)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct OutputConfig {
    /// Pretty-print the decoded record
    #[envconfig(from = "PRETTY_OUTPUT", default = "true")]
    pub pretty: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenv::dotenv().ok();

        Config::init_from_env().map_err(Error::from)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.input.payload_path.trim().is_empty() {
            return Err(Error::config("Payload path cannot be empty"));
        }

        self.input.kind()?;

        if self.logging.log_level.trim().is_empty() {
            return Err(Error::config("Log level cannot be empty"));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!(
            environment = %self.logging.environment,
            log_level = %self.logging.log_level,
            "Logging configuration"
        );

        tracing::info!(
            payload_path = %self.input.payload_path,
            payload_kind = %self.input.payload_kind,
            pretty = %self.output.pretty,
            "Input configuration"
        );
    }
}
