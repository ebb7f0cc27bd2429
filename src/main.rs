//! fnmodels-inspect - decode a saved API payload and print it
//!
//! Reads the file named by `PAYLOAD_PATH`, decodes it as `PAYLOAD_KIND` and
//! writes the typed record back out as JSON.

use fnmodels::error::Result;
use fnmodels::{config, decode_kind_slice, log_error, logging};

fn run(config: &config::Config) -> Result<()> {
    let kind = config.input.kind()?;
    let bytes = std::fs::read(config.input.path())?;
    let decoded = decode_kind_slice(kind, &bytes)?;
    tracing::info!(kind = %kind, summary = %decoded.summary(), "Payload decoded");

    let rendered = if config.output.pretty {
        serde_json::to_string_pretty(&decoded)?
    } else {
        serde_json::to_string(&decoded)?
    };
    println!("{}", rendered);

    Ok(())
}

fn main() -> Result<()> {
    // Load configuration from environment
    let config = config::Config::from_env()?;

    // Validate configuration
    config.validate()?;

    // Initialize logging/tracing
    logging::init_tracing(&config.logging.log_level, &config.logging.environment)?;

    config.log_config();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting fnmodels-inspect");

    if let Err(error) = run(&config) {
        log_error!(error, "Inspection failed", path = config.input.payload_path);
        return Err(error);
    }

    Ok(())
}
