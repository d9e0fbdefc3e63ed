//! Configuration module
//!
//! Provides configuration for the JSON delegate marshaler, loaded from YAML
//! files, environment variables, or the programmatic builder.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{BytesEncoding, EncoderConfig, EncoderConfigBuilder, FieldNaming, MAX_INDENT};
