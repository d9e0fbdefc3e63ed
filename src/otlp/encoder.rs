//! OTLP export request encoder
//!
//! Type-checks a dynamically-typed payload against the export request of one
//! signal and hands it to the delegate marshaler.
//!
//! # Example
//!
//! ```no_run
//! use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;
//! use otlp_json_encoder::otlp::{TracesEncoder, json_traces_encoder};
//!
//! # fn main() -> Result<(), otlp_json_encoder::EncodeError> {
//! let encoder = json_traces_encoder();
//! let bytes = encoder.encode_traces(&ExportTraceServiceRequest::default())?;
//! assert_eq!(bytes, br#"{"resourceSpans":[]}"#);
//! # Ok(())
//! # }
//! ```

use tracing::debug;

use crate::config::EncoderConfig;
use crate::error::{EncodeError, IncompatibleTypeError, OtlpConfigError};
use crate::otlp::marshaler::{JsonMarshaler, Marshaler};
use crate::otlp::{AnyPayload, SignalKind, SignalRequest, describe};

/// Encodes trace export requests
pub trait TracesEncoder: Send + Sync {
    /// Encode an `ExportTraceServiceRequest`; any other payload is rejected
    fn encode_traces(&self, payload: &dyn AnyPayload) -> Result<Vec<u8>, EncodeError>;
}

/// Encodes metric export requests
pub trait MetricsEncoder: Send + Sync {
    /// Encode an `ExportMetricsServiceRequest`; any other payload is rejected
    fn encode_metrics(&self, payload: &dyn AnyPayload) -> Result<Vec<u8>, EncodeError>;
}

/// Encodes log export requests
pub trait LogsEncoder: Send + Sync {
    /// Encode an `ExportLogsServiceRequest`; any other payload is rejected
    fn encode_logs(&self, payload: &dyn AnyPayload) -> Result<Vec<u8>, EncodeError>;
}

/// Stateless encoder over a delegate marshaler
///
/// Holds nothing but the delegate, so one instance can be shared by any
/// number of threads. Every call writes into its own buffer.
#[derive(Debug, Clone, Default)]
pub struct Encoder<M = JsonMarshaler> {
    delegate: M,
}

impl Encoder<JsonMarshaler> {
    /// JSON encoder with the given delegate options
    pub fn json(config: &EncoderConfig) -> Result<Self, OtlpConfigError> {
        config.validate()?;
        Ok(Self::new(JsonMarshaler::new(config.clone())))
    }
}

impl<M: Marshaler> Encoder<M> {
    /// Wrap a delegate marshaler
    pub fn new(delegate: M) -> Self {
        Self { delegate }
    }

    /// The delegate marshaler
    pub fn delegate(&self) -> &M {
        &self.delegate
    }

    /// Encode a request whose signal is known statically
    pub fn encode(&self, request: SignalRequest<'_>) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::new();
        self.delegate.marshal(&mut buf, request)?;

        debug!(
            signal = %request.kind(),
            encoded_bytes = buf.len(),
            content_type = self.delegate.content_type(),
            "Encoded export request"
        );

        Ok(buf)
    }

    fn encode_expecting(
        &self,
        expected: SignalKind,
        payload: &dyn AnyPayload,
    ) -> Result<Vec<u8>, EncodeError> {
        match SignalRequest::from_payload(payload) {
            Some(request) if request.kind() == expected => self.encode(request),
            _ => {
                let err = IncompatibleTypeError::new(expected, describe(payload));
                debug!(
                    signal = %expected,
                    expected = expected.proto_name(),
                    actual = %err.actual(),
                    "Rejected payload of incompatible type"
                );
                Err(err.into())
            }
        }
    }
}

impl<M: Marshaler> TracesEncoder for Encoder<M> {
    fn encode_traces(&self, payload: &dyn AnyPayload) -> Result<Vec<u8>, EncodeError> {
        self.encode_expecting(SignalKind::Traces, payload)
    }
}

impl<M: Marshaler> MetricsEncoder for Encoder<M> {
    fn encode_metrics(&self, payload: &dyn AnyPayload) -> Result<Vec<u8>, EncodeError> {
        self.encode_expecting(SignalKind::Metrics, payload)
    }
}

impl<M: Marshaler> LogsEncoder for Encoder<M> {
    fn encode_logs(&self, payload: &dyn AnyPayload) -> Result<Vec<u8>, EncodeError> {
        self.encode_expecting(SignalKind::Logs, payload)
    }
}

/// Traces encoder producing OTLP JSON with default options
pub fn json_traces_encoder() -> impl TracesEncoder + Clone {
    Encoder::<JsonMarshaler>::default()
}

/// Metrics encoder producing OTLP JSON with default options
pub fn json_metrics_encoder() -> impl MetricsEncoder + Clone {
    Encoder::<JsonMarshaler>::default()
}

/// Logs encoder producing OTLP JSON with default options
pub fn json_logs_encoder() -> impl LogsEncoder + Clone {
    Encoder::<JsonMarshaler>::default()
}

/// Traces encoder producing OTLP JSON with the given options
pub fn json_traces_encoder_with(
    config: &EncoderConfig,
) -> Result<impl TracesEncoder + Clone + use<>, OtlpConfigError> {
    Encoder::json(config)
}

/// Metrics encoder producing OTLP JSON with the given options
pub fn json_metrics_encoder_with(
    config: &EncoderConfig,
) -> Result<impl MetricsEncoder + Clone + use<>, OtlpConfigError> {
    Encoder::json(config)
}

/// Logs encoder producing OTLP JSON with the given options
pub fn json_logs_encoder_with(
    config: &EncoderConfig,
) -> Result<impl LogsEncoder + Clone + use<>, OtlpConfigError> {
    Encoder::json(config)
}
