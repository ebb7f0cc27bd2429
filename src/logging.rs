//! Logging module for fnmodels
//!
//! This module configures structured logging using the tracing crate,
//! providing JSON output for production and pretty formatting for development.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use crate::error::Result;

/// Initialize the logging system
///
/// Configures tracing based on the environment:
/// - Production: JSON formatted logs
/// - Development: Pretty formatted logs with colors
pub fn init_tracing(log_level: &str, environment: &str) -> Result<()> {
    // Create environment filter from RUST_LOG or use provided log level
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    if environment == "production" {
        let formatting_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true);

        Registry::default()
            .with(env_filter)
            .with(formatting_layer)
            .try_init()
            .map_err(|e| {
                crate::error::Error::internal(format!("Failed to initialize tracing: {}", e))
            })?;
    } else {
        let formatting_layer = fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE);

        Registry::default()
            .with(env_filter)
            .with(formatting_layer)
            .try_init()
            .map_err(|e| {
                crate::error::Error::internal(format!("Failed to initialize tracing: {}", e))
            })?;
    }

    tracing::info!(
        environment = environment,
        log_level = log_level,
        "Logging initialized"
    );

    Ok(())
}

/// Filter directives used when `RUST_LOG` is not set
fn default_directives(log_level: &str) -> String {
    format!("fnmodels={},fnmodels_inspect={}", log_level, log_level)
}

/// Create a span for decoding one payload
#[macro_export]
macro_rules! decode_span {
    ($entity:expr) => {
        tracing::debug_span!(
            "decode",
            entity = $entity,
            duration_ms = tracing::field::Empty,
        )
    };
}

/// Log an error with context
#[macro_export]
macro_rules! log_error {
    ($error:expr, $msg:expr) => {
        tracing::error!(
            error = %$error,
            error_type = $error.error_type(),
            $msg
        )
    };
    ($error:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::error!(
            error = %$error,
            error_type = $error.error_type(),
            $($key = tracing::field::display(&$value),)*
            $msg
        )
    };
}

/// Helper for timing operations
pub struct Timer {
    start: std::time::Instant,
    operation: String,
}

impl Timer {
    /// Start a new timer
    pub fn start(operation: impl Into<String>) -> Self {
        Timer {
            start: std::time::Instant::now(),
            operation: operation.into(),
        }
    }

    /// Stop the timer and log the duration
    pub fn stop(self) -> std::time::Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_us = duration.as_micros() as u64,
            "Operation completed"
        );
        duration
    }
}
