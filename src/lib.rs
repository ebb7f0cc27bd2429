//! fnmodels Library
//!
//! Typed, read-only models for the JSON payloads served by the game
//! platform's web API: item shop, catalog, creative islands, codes, player
//! profiles, Lego worlds and Support-a-Creator earnings.

pub mod config;
pub mod decode;
pub mod error;
pub mod logging;
pub mod models;

// Re-export commonly used types at the crate root
pub use config::Config;
pub use decode::{decode_kind, decode_kind_slice, Decoded, FromPayload, Payload, PayloadKind};
pub use error::{Error, Result};

// Re-export model types
pub use models::{ValidationError, ValidationErrorKind};
