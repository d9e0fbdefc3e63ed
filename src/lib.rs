//! OTLP JSON Encoder
//!
//! Converts in-memory OpenTelemetry export requests (traces, metrics, logs)
//! into protobuf-JSON bytes for transmission or storage.
//!
//! # Features
//!
//! - One encoder capability per signal, each accepting any value and
//!   rejecting everything but its own export request with a typed error
//! - Deterministic output: equal requests encode to identical bytes
//! - Pluggable delegate marshaler behind the [`otlp::Marshaler`] trait
//! - Configurable via YAML, environment variables, or programmatic API
//!
//! # Example
//!
//! ```no_run
//! use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;
//! use otlp_json_encoder::otlp::{MetricsEncoder, TracesEncoder};
//!
//! # fn main() -> Result<(), otlp_json_encoder::OtlpError> {
//! let request = ExportTraceServiceRequest::default();
//!
//! let traces = otlp_json_encoder::json_traces_encoder();
//! let json = traces.encode_traces(&request)?;
//!
//! let metrics = otlp_json_encoder::json_metrics_encoder();
//! assert!(metrics.encode_metrics(&request).is_err());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod otlp;

// Re-export public API
pub use config::{BytesEncoding, ConfigLoader, EncoderConfig, EncoderConfigBuilder, FieldNaming};
pub use error::{
    EncodeError, IncompatibleTypeError, MarshalError, OtlpConfigError, OtlpError, TypeDescriptor,
};
pub use otlp::{
    AnyPayload, Encoder, ExportRequest, JsonMarshaler, LogsEncoder, Marshaler, MetricsEncoder,
    SignalKind, SignalRequest, TracesEncoder, json_logs_encoder, json_logs_encoder_with,
    json_metrics_encoder, json_metrics_encoder_with, json_traces_encoder, json_traces_encoder_with,
};

// Initialize tracing subscriber for structured logging
use tracing_subscriber::EnvFilter;

/// Initialize structured logging
///
/// Installs a formatting subscriber filtered by `RUST_LOG`. Calling it again
/// after a subscriber is installed is a no-op.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .try_init();
}
