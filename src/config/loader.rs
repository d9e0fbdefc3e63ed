//! Configuration loader
//!
//! Loads encoder configuration from YAML files, environment variables, or programmatic API.
//! Priority: environment variables > provided config > defaults

use std::env;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::config::types::{BytesEncoding, EncoderConfig, FieldNaming};
use crate::error::OtlpConfigError;

/// Environment variable overriding [`EncoderConfig::emit_defaults`]
pub const ENV_EMIT_DEFAULTS: &str = "OTLP_JSON_EMIT_DEFAULTS";
/// Environment variable overriding [`EncoderConfig::field_naming`]
pub const ENV_FIELD_NAMING: &str = "OTLP_JSON_FIELD_NAMING";
/// Environment variable overriding [`EncoderConfig::enums_as_ints`]
pub const ENV_ENUMS_AS_INTS: &str = "OTLP_JSON_ENUMS_AS_INTS";
/// Environment variable overriding [`EncoderConfig::bytes_encoding`]
pub const ENV_BYTES_ENCODING: &str = "OTLP_JSON_BYTES_ENCODING";
/// Environment variable overriding [`EncoderConfig::indent`]
pub const ENV_INDENT: &str = "OTLP_JSON_INDENT";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<EncoderConfig, OtlpConfigError> {
        let path = path.as_ref();
        info!(
            config_path = %path.display(),
            "Loading encoder configuration from YAML file"
        );

        let content = std::fs::read_to_string(path).map_err(|e| {
            warn!(
                config_path = %path.display(),
                error = %e,
                "Failed to read configuration file"
            );
            OtlpConfigError::Read(e)
        })?;

        debug!(
            config_path = %path.display(),
            file_size_bytes = content.len(),
            "Read configuration file"
        );

        let config: EncoderConfig = serde_yaml::from_str(&content).map_err(|e| {
            warn!(
                config_path = %path.display(),
                error = %e,
                "Failed to parse YAML configuration"
            );
            OtlpConfigError::Parse(e)
        })?;

        Self::finish(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<EncoderConfig, OtlpConfigError> {
        info!("Loading encoder configuration from environment variables");
        Self::finish(EncoderConfig::default())
    }

    /// Load configuration with priority: environment variables > provided config > defaults
    pub fn load(provided: Option<EncoderConfig>) -> Result<EncoderConfig, OtlpConfigError> {
        if provided.is_some() {
            info!("Loading configuration with provided config and environment variable overrides");
        } else {
            info!("Loading configuration with defaults and environment variable overrides");
        }

        Self::finish(provided.unwrap_or_default())
    }

    fn finish(mut config: EncoderConfig) -> Result<EncoderConfig, OtlpConfigError> {
        Self::apply_env_overrides(&mut config);
        debug!("Applied environment variable overrides");

        config.validate().map_err(|e| {
            warn!(error = %e, "Configuration validation failed");
            e
        })?;

        info!(
            emit_defaults = config.emit_defaults,
            field_naming = ?config.field_naming,
            enums_as_ints = config.enums_as_ints,
            bytes_encoding = ?config.bytes_encoding,
            indent = config.indent,
            "Encoder configuration loaded and validated successfully"
        );

        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut EncoderConfig) {
        if let Some(val) = read_env(ENV_EMIT_DEFAULTS, bool::from_str) {
            config.emit_defaults = val;
        }

        if let Some(naming) = read_env(ENV_FIELD_NAMING, |v| {
            FieldNaming::parse(v).ok_or("unknown field naming")
        }) {
            config.field_naming = naming;
        }

        if let Some(val) = read_env(ENV_ENUMS_AS_INTS, bool::from_str) {
            config.enums_as_ints = val;
        }

        if let Some(encoding) = read_env(ENV_BYTES_ENCODING, |v| {
            BytesEncoding::parse(v).ok_or("unknown bytes encoding")
        }) {
            config.bytes_encoding = encoding;
        }

        if let Some(spaces) = read_env(ENV_INDENT, usize::from_str) {
            config.indent = spaces;
        }
    }
}

/// Read and parse one override; unparseable values are logged and ignored
fn read_env<T, E, F>(name: &'static str, parse: F) -> Option<T>
where
    T: std::fmt::Debug,
    E: std::fmt::Display,
    F: FnOnce(&str) -> Result<T, E>,
{
    let raw = env::var(name).ok()?;
    match parse(raw.trim()) {
        Ok(value) => {
            debug!(
                env_var = name,
                value = ?value,
                "Applying environment variable override"
            );
            Some(value)
        }
        Err(e) => {
            warn!(
                env_var = name,
                value = %raw,
                error = %e,
                "Failed to parse environment variable, using configured value"
            );
            None
        }
    }
}
