//! Error types for the OTLP JSON encoder
//!
//! Defines all error types used throughout the library with clear error messages
//! and context for debugging.

use std::fmt;

use thiserror::Error;

use crate::otlp::SignalKind;

/// Main error type for the OTLP JSON encoder
#[derive(Error, Debug)]
pub enum OtlpError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] OtlpConfigError),

    /// Encoding errors
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum OtlpConfigError {
    /// A configuration value is out of range or malformed
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// Configuration file could not be read
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// Configuration file is not valid YAML for [`crate::config::EncoderConfig`]
    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Failure returned by an encode operation.
///
/// Both kinds are ordinary values: the encoder never retries and never
/// panics on bad input. A failed call yields no bytes at all.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// The payload is not the export request the operation expects
    #[error(transparent)]
    IncompatibleType(#[from] IncompatibleTypeError),

    /// The delegate marshaler failed; its error is passed through as-is
    #[error(transparent)]
    Marshal(#[from] MarshalError),
}

impl EncodeError {
    /// Returns the type mismatch details if this is an incompatible-type error
    pub fn as_incompatible_type(&self) -> Option<&IncompatibleTypeError> {
        match self {
            EncodeError::IncompatibleType(err) => Some(err),
            EncodeError::Marshal(_) => None,
        }
    }
}

/// Errors raised by a [`crate::otlp::Marshaler`] while writing a request
#[derive(Error, Debug)]
pub enum MarshalError {
    /// JSON serialization failed
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to the byte sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A bytes field could not be re-encoded
    #[error("Invalid bytes in field '{field}': {reason}")]
    InvalidBytes {
        /// JSON name of the offending field
        field: String,
        /// Decoder diagnostic
        reason: String,
    },
}

/// Identity of a value handed to an encoder.
///
/// Carries the Rust type name of the value and, when the value is one of
/// the known export requests, its signal kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: &'static str,
    signal: Option<SignalKind>,
}

impl TypeDescriptor {
    /// Describe a value of the given Rust type
    pub fn new(name: &'static str, signal: Option<SignalKind>) -> Self {
        Self { name, signal }
    }

    /// Describe the export request of the given signal
    pub fn of_signal(signal: SignalKind) -> Self {
        Self {
            name: signal.rust_type_name(),
            signal: Some(signal),
        }
    }

    /// Rust type name (as reported by `std::any::type_name`)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Signal kind if the value is an export request
    pub fn signal(&self) -> Option<SignalKind> {
        self.signal
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.signal {
            Some(signal) => f.write_str(signal.proto_name()),
            None => f.write_str(self.name),
        }
    }
}

/// A payload did not match the export request expected by the operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("incompatible type: expected {}, got {actual}", .expected.proto_name())]
pub struct IncompatibleTypeError {
    expected: SignalKind,
    actual: TypeDescriptor,
}

impl IncompatibleTypeError {
    /// Create a new incompatible-type error
    pub fn new(expected: SignalKind, actual: TypeDescriptor) -> Self {
        Self { expected, actual }
    }

    /// Signal whose export request was expected
    pub fn expected(&self) -> SignalKind {
        self.expected
    }

    /// Descriptor of the expected export request type
    pub fn expected_type(&self) -> TypeDescriptor {
        TypeDescriptor::of_signal(self.expected)
    }

    /// Descriptor of the value actually supplied
    pub fn actual(&self) -> TypeDescriptor {
        self.actual
    }
}
