//! Configuration type definitions
//!
//! Defines the options fixed into an encoder's JSON delegate at construction.

use serde::{Deserialize, Serialize};

use crate::error::OtlpConfigError;

/// Largest accepted indentation width, in spaces
pub const MAX_INDENT: usize = 16;

/// How JSON object keys are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldNaming {
    /// Protobuf JSON names (`lowerCamelCase`, e.g. `resourceSpans`)
    #[default]
    CamelCase,
    /// Field names as declared in the `.proto` files (e.g. `resource_spans`)
    OriginalName,
}

impl FieldNaming {
    /// Parse the environment-variable spelling
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "camel_case" | "camelcase" | "json" => Some(Self::CamelCase),
            "original_name" | "originalname" | "original" | "proto" => Some(Self::OriginalName),
            _ => None,
        }
    }
}

/// How bytes fields (trace and span ids, bytes attribute values) are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BytesEncoding {
    /// Standard base64 with padding
    #[default]
    Base64,
    /// Lower-case hexadecimal, as in the OTLP/JSON file format
    Hex,
}

impl BytesEncoding {
    /// Parse the environment-variable spelling
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "base64" => Some(Self::Base64),
            "hex" => Some(Self::Hex),
            _ => None,
        }
    }
}

/// Options for the JSON delegate marshaler
///
/// # Default Values
///
/// - `emit_defaults`: `false` (zero-valued scalars and unset messages are omitted)
/// - `field_naming`: `camel_case`
/// - `enums_as_ints`: `false` (enums render as their symbolic name)
/// - `bytes_encoding`: `base64`
/// - `indent`: `0` (compact output)
///
/// # Example
///
/// ```no_run
/// use otlp_json_encoder::config::{EncoderConfigBuilder, FieldNaming};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = EncoderConfigBuilder::new()
///     .emit_defaults(true)
///     .field_naming(FieldNaming::OriginalName)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct EncoderConfig {
    /// Render zero-valued scalars and unset messages instead of omitting them
    #[serde(default)]
    pub emit_defaults: bool,

    /// Naming convention for object keys
    #[serde(default)]
    pub field_naming: FieldNaming,

    /// Render enums as integers instead of symbolic names
    #[serde(default)]
    pub enums_as_ints: bool,

    /// Text encoding for bytes fields
    #[serde(default)]
    pub bytes_encoding: BytesEncoding,

    /// Spaces per indentation level; 0 writes compact JSON
    #[serde(default)]
    pub indent: usize,
}

impl EncoderConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), OtlpConfigError> {
        if self.indent > MAX_INDENT {
            return Err(OtlpConfigError::InvalidValue(format!(
                "indent must be at most {} spaces, got {}",
                MAX_INDENT, self.indent
            )));
        }

        Ok(())
    }
}

/// Builder for creating configurations programmatically
#[derive(Debug, Default)]
pub struct EncoderConfigBuilder {
    config: EncoderConfig,
}

impl EncoderConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit zero-valued fields
    pub fn emit_defaults(mut self, emit: bool) -> Self {
        self.config.emit_defaults = emit;
        self
    }

    /// Set the key naming convention
    pub fn field_naming(mut self, naming: FieldNaming) -> Self {
        self.config.field_naming = naming;
        self
    }

    /// Render enums as integers
    pub fn enums_as_ints(mut self, as_ints: bool) -> Self {
        self.config.enums_as_ints = as_ints;
        self
    }

    /// Set the bytes encoding
    pub fn bytes_encoding(mut self, encoding: BytesEncoding) -> Self {
        self.config.bytes_encoding = encoding;
        self
    }

    /// Set indentation width in spaces
    pub fn indent(mut self, spaces: usize) -> Self {
        self.config.indent = spaces;
        self
    }

    /// Build the configuration with validation
    pub fn build(self) -> Result<EncoderConfig, OtlpConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
