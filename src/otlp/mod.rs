//! OpenTelemetry Protocol (OTLP) module
//!
//! Provides the closed set of OTLP signal kinds, the request wrappers the
//! encoder dispatches on, and the JSON encoder itself.

use std::any::{self, Any};
use std::fmt;

use opentelemetry_proto::tonic::collector::logs::v1::ExportLogsServiceRequest;
use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest;
use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;

use crate::error::TypeDescriptor;

pub mod encoder;
pub mod marshaler;
pub mod normalize;
pub mod value;

pub use encoder::{
    Encoder, LogsEncoder, MetricsEncoder, TracesEncoder, json_logs_encoder, json_logs_encoder_with,
    json_metrics_encoder, json_metrics_encoder_with, json_traces_encoder, json_traces_encoder_with,
};
pub use marshaler::{JsonMarshaler, Marshaler};

/// Signal kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// OpenTelemetry trace data
    Traces,
    /// OpenTelemetry metric data
    Metrics,
    /// OpenTelemetry log data
    Logs,
}

impl SignalKind {
    /// Every signal kind, in declaration order
    pub const ALL: [SignalKind; 3] = [SignalKind::Traces, SignalKind::Metrics, SignalKind::Logs];

    /// Fully-qualified protobuf name of the signal's export request
    pub fn proto_name(self) -> &'static str {
        match self {
            SignalKind::Traces => {
                "opentelemetry.proto.collector.trace.v1.ExportTraceServiceRequest"
            }
            SignalKind::Metrics => {
                "opentelemetry.proto.collector.metrics.v1.ExportMetricsServiceRequest"
            }
            SignalKind::Logs => {
                "opentelemetry.proto.collector.logs.v1.ExportLogsServiceRequest"
            }
        }
    }

    /// Rust type name of the signal's export request
    pub fn rust_type_name(self) -> &'static str {
        match self {
            SignalKind::Traces => any::type_name::<ExportTraceServiceRequest>(),
            SignalKind::Metrics => any::type_name::<ExportMetricsServiceRequest>(),
            SignalKind::Logs => any::type_name::<ExportLogsServiceRequest>(),
        }
    }

    /// Lower-case signal name
    pub fn as_str(self) -> &'static str {
        match self {
            SignalKind::Traces => "traces",
            SignalKind::Metrics => "metrics",
            SignalKind::Logs => "logs",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamically-typed value offered to an encoder.
///
/// Implemented for every `'static` type, so `&request`, `&()` or
/// `&"text"` can all be passed where a `&dyn AnyPayload` is expected.
pub trait AnyPayload: Any {
    /// Upcast for downcasting to the concrete type
    fn as_any(&self) -> &dyn Any;

    /// Rust type name of the concrete value
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AnyPayload for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
}

/// Identity of an arbitrary payload
pub fn describe(payload: &dyn AnyPayload) -> TypeDescriptor {
    let request = SignalRequest::from_payload(payload);
    let signal = request.map(|request| request.kind());
    TypeDescriptor::new(payload.type_name(), signal)
}

/// Borrowed export request of exactly one signal kind
#[derive(Debug, Clone, Copy)]
pub enum SignalRequest<'a> {
    /// Trace export request
    Traces(&'a ExportTraceServiceRequest),
    /// Metric export request
    Metrics(&'a ExportMetricsServiceRequest),
    /// Log export request
    Logs(&'a ExportLogsServiceRequest),
}

impl<'a> SignalRequest<'a> {
    /// Signal kind of the wrapped request
    pub fn kind(&self) -> SignalKind {
        match self {
            SignalRequest::Traces(_) => SignalKind::Traces,
            SignalRequest::Metrics(_) => SignalKind::Metrics,
            SignalRequest::Logs(_) => SignalKind::Logs,
        }
    }

    /// Recognise a payload as one of the export requests by exact type
    pub fn from_payload(payload: &'a dyn AnyPayload) -> Option<Self> {
        let any = payload.as_any();
        if let Some(request) = any.downcast_ref::<ExportTraceServiceRequest>() {
            return Some(SignalRequest::Traces(request));
        }
        if let Some(request) = any.downcast_ref::<ExportMetricsServiceRequest>() {
            return Some(SignalRequest::Metrics(request));
        }
        any.downcast_ref::<ExportLogsServiceRequest>()
            .map(SignalRequest::Logs)
    }
}

impl<'a> From<&'a ExportTraceServiceRequest> for SignalRequest<'a> {
    fn from(request: &'a ExportTraceServiceRequest) -> Self {
        SignalRequest::Traces(request)
    }
}

impl<'a> From<&'a ExportMetricsServiceRequest> for SignalRequest<'a> {
    fn from(request: &'a ExportMetricsServiceRequest) -> Self {
        SignalRequest::Metrics(request)
    }
}

impl<'a> From<&'a ExportLogsServiceRequest> for SignalRequest<'a> {
    fn from(request: &'a ExportLogsServiceRequest) -> Self {
        SignalRequest::Logs(request)
    }
}

/// Owned export request of exactly one signal kind
#[derive(Debug, Clone, PartialEq)]
pub enum ExportRequest {
    /// Trace export request
    Traces(ExportTraceServiceRequest),
    /// Metric export request
    Metrics(ExportMetricsServiceRequest),
    /// Log export request
    Logs(ExportLogsServiceRequest),
}

impl ExportRequest {
    /// Signal kind of the wrapped request
    pub fn kind(&self) -> SignalKind {
        self.as_request().kind()
    }

    /// Borrow as a [`SignalRequest`]
    pub fn as_request(&self) -> SignalRequest<'_> {
        match self {
            ExportRequest::Traces(request) => SignalRequest::Traces(request),
            ExportRequest::Metrics(request) => SignalRequest::Metrics(request),
            ExportRequest::Logs(request) => SignalRequest::Logs(request),
        }
    }
}

impl From<ExportTraceServiceRequest> for ExportRequest {
    fn from(request: ExportTraceServiceRequest) -> Self {
        ExportRequest::Traces(request)
    }
}

impl From<ExportMetricsServiceRequest> for ExportRequest {
    fn from(request: ExportMetricsServiceRequest) -> Self {
        ExportRequest::Metrics(request)
    }
}

impl From<ExportLogsServiceRequest> for ExportRequest {
    fn from(request: ExportLogsServiceRequest) -> Self {
        ExportRequest::Logs(request)
    }
}
