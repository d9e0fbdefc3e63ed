//! Shared request fixtures for encoder tests

#![allow(dead_code)]

use opentelemetry_proto::tonic::collector::logs::v1::ExportLogsServiceRequest;
use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest;
use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;
use opentelemetry_proto::tonic::common::v1::any_value::Value;
use opentelemetry_proto::tonic::common::v1::{AnyValue, InstrumentationScope, KeyValue};
use opentelemetry_proto::tonic::logs::v1::{LogRecord, ResourceLogs, ScopeLogs, SeverityNumber};
use opentelemetry_proto::tonic::metrics::v1::{
    AggregationTemporality, Exemplar, Gauge, Histogram, HistogramDataPoint, Metric, NumberDataPoint,
    ResourceMetrics, ScopeMetrics, Sum, exemplar, metric::Data, number_data_point,
};
use opentelemetry_proto::tonic::resource::v1::Resource;
use opentelemetry_proto::tonic::trace::v1::span::SpanKind;
use opentelemetry_proto::tonic::trace::v1::status::StatusCode;
use opentelemetry_proto::tonic::trace::v1::{ResourceSpans, ScopeSpans, Span, Status};

pub const TRACE_ID: [u8; 16] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
pub const SPAN_ID: [u8; 8] = [0xa1, 0xb2, 0xc3, 0xd4, 0xe5, 0xf6, 0x07, 0x08];

/// Base64 of [`TRACE_ID`]
pub const TRACE_ID_BASE64: &str = "AQIDBAUGBwgJCgsMDQ4PEA==";
/// Hex of [`SPAN_ID`]
pub const SPAN_ID_HEX: &str = "a1b2c3d4e5f60708";

/// Above 2^53, so a JSON number would lose precision
pub const EXEMPLAR_INT: i64 = 9_007_199_254_740_993;

pub const BYTES: [u8; 4] = [0xde, 0xad, 0xbe, 0xef];

pub fn string_attribute(key: &str, value: &str) -> KeyValue {
    KeyValue {
        key: key.to_string(),
        value: Some(AnyValue {
            value: Some(Value::StringValue(value.to_string())),
        }),
    }
}

pub fn double_attribute(key: &str, value: f64) -> KeyValue {
    KeyValue {
        key: key.to_string(),
        value: Some(AnyValue {
            value: Some(Value::DoubleValue(value)),
        }),
    }
}

pub fn bytes_attribute(key: &str, value: &[u8]) -> KeyValue {
    KeyValue {
        key: key.to_string(),
        value: Some(AnyValue {
            value: Some(Value::BytesValue(value.to_vec())),
        }),
    }
}

pub fn resource(service_name: &str) -> Resource {
    Resource {
        attributes: vec![string_attribute("service.name", service_name)],
        ..Default::default()
    }
}

pub fn scope() -> InstrumentationScope {
    InstrumentationScope {
        name: "checkout-instrumentation".to_string(),
        version: "1.0.0".to_string(),
        ..Default::default()
    }
}

/// Span with ids, kind and status set; every other scalar left at its default
pub fn span(name: &str) -> Span {
    Span {
        trace_id: TRACE_ID.to_vec(),
        span_id: SPAN_ID.to_vec(),
        name: name.to_string(),
        kind: SpanKind::Server as i32,
        start_time_unix_nano: 1_700_000_000_000_000_000,
        end_time_unix_nano: 1_700_000_000_500_000_000,
        status: Some(Status {
            code: StatusCode::Ok as i32,
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// One resource span group holding one span
pub fn trace_request(span_name: &str) -> ExportTraceServiceRequest {
    ExportTraceServiceRequest {
        resource_spans: vec![ResourceSpans {
            resource: Some(resource("checkout")),
            scope_spans: vec![ScopeSpans {
                scope: Some(scope()),
                spans: vec![span(span_name)],
                ..Default::default()
            }],
            ..Default::default()
        }],
    }
}

/// One resource metric group holding `metrics`
pub fn metrics_request_of(metrics: Vec<Metric>) -> ExportMetricsServiceRequest {
    ExportMetricsServiceRequest {
        resource_metrics: vec![ResourceMetrics {
            resource: Some(resource("checkout")),
            scope_metrics: vec![ScopeMetrics {
                scope: Some(scope()),
                metrics,
                ..Default::default()
            }],
            ..Default::default()
        }],
    }
}

pub fn metrics_request() -> ExportMetricsServiceRequest {
    let point = NumberDataPoint {
        time_unix_nano: 1_700_000_000_000_000_000,
        value: Some(number_data_point::Value::AsInt(7)),
        ..Default::default()
    };

    metrics_request_of(vec![
        Metric {
            name: "queue.depth".to_string(),
            unit: "1".to_string(),
            data: Some(Data::Gauge(Gauge {
                data_points: vec![point.clone()],
            })),
            ..Default::default()
        },
        Metric {
            name: "requests.total".to_string(),
            data: Some(Data::Sum(Sum {
                data_points: vec![point],
                aggregation_temporality: AggregationTemporality::Cumulative as i32,
                is_monotonic: true,
            })),
            ..Default::default()
        },
    ])
}

/// Gauge with a NaN point carrying an infinite attribute
pub fn non_finite_gauge_request() -> ExportMetricsServiceRequest {
    metrics_request_of(vec![Metric {
        name: "cpu.ratio".to_string(),
        data: Some(Data::Gauge(Gauge {
            data_points: vec![NumberDataPoint {
                attributes: vec![double_attribute("limit", f64::INFINITY)],
                time_unix_nano: 1_700_000_000_000_000_000,
                value: Some(number_data_point::Value::AsDouble(f64::NAN)),
                ..Default::default()
            }],
        })),
        ..Default::default()
    }])
}

/// Histogram with `sum` and `min` set to zero, `max` unset and one integer exemplar
pub fn histogram_request() -> ExportMetricsServiceRequest {
    let point = HistogramDataPoint {
        time_unix_nano: 1_700_000_000_000_000_000,
        count: 3,
        sum: Some(0.0),
        min: Some(0.0),
        max: None,
        bucket_counts: vec![1, 2],
        explicit_bounds: vec![1.0],
        exemplars: vec![Exemplar {
            value: Some(exemplar::Value::AsInt(EXEMPLAR_INT)),
            ..Default::default()
        }],
        ..Default::default()
    };

    metrics_request_of(vec![Metric {
        name: "request.latency".to_string(),
        unit: "ms".to_string(),
        data: Some(Data::Histogram(Histogram {
            data_points: vec![point],
            aggregation_temporality: AggregationTemporality::Delta as i32,
        })),
        ..Default::default()
    }])
}

pub fn logs_request() -> ExportLogsServiceRequest {
    ExportLogsServiceRequest {
        resource_logs: vec![ResourceLogs {
            resource: Some(resource("checkout")),
            scope_logs: vec![ScopeLogs {
                scope: Some(scope()),
                log_records: vec![LogRecord {
                    time_unix_nano: 1_700_000_000_000_000_000,
                    severity_number: SeverityNumber::Info as i32,
                    severity_text: "INFO".to_string(),
                    body: Some(AnyValue {
                        value: Some(Value::StringValue("user logged in".to_string())),
                    }),
                    trace_id: TRACE_ID.to_vec(),
                    span_id: SPAN_ID.to_vec(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }],
    }
}

/// Parse encoder output, failing the test on invalid JSON
pub fn parse(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes).expect("encoder output must be valid JSON")
}
