//! Integration tests for metric export request encoding

mod common;

use common::{EXEMPLAR_INT, histogram_request, metrics_request, non_finite_gauge_request, parse};
use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest;
use otlp_json_encoder::{MetricsEncoder, json_metrics_encoder};
use serde_json::json;

#[test]
fn test_metrics_nested_under_resource_and_scope() {
    let bytes = json_metrics_encoder()
        .encode_metrics(&metrics_request())
        .unwrap();
    let json = parse(&bytes);
    let metrics = &json["resourceMetrics"][0]["scopeMetrics"][0]["metrics"];

    assert_eq!(metrics.as_array().unwrap().len(), 2);
    assert_eq!(metrics[0]["name"], "queue.depth");
    assert_eq!(metrics[0]["unit"], "1");
    assert_eq!(metrics[1]["name"], "requests.total");
}

#[test]
fn test_metric_order_preserved() {
    let mut request = metrics_request();
    request.resource_metrics[0].scope_metrics[0].metrics.reverse();

    let json = parse(&json_metrics_encoder().encode_metrics(&request).unwrap());
    let metrics = &json["resourceMetrics"][0]["scopeMetrics"][0]["metrics"];
    assert_eq!(metrics[0]["name"], "requests.total");
    assert_eq!(metrics[1]["name"], "queue.depth");
}

#[test]
fn test_aggregation_temporality_renders_as_name() {
    let bytes = json_metrics_encoder()
        .encode_metrics(&metrics_request())
        .unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.contains("AGGREGATION_TEMPORALITY_CUMULATIVE"));
    assert!(text.contains(r#""isMonotonic":true"#));
    assert!(!text.contains("description"));
}

#[test]
fn test_empty_metrics_request() {
    let bytes = json_metrics_encoder()
        .encode_metrics(&ExportMetricsServiceRequest::default())
        .unwrap();
    assert_eq!(bytes, br#"{"resourceMetrics":[]}"#);
}

#[test]
fn test_equal_metrics_requests_encode_identically() {
    let encoder = json_metrics_encoder();
    let a = encoder.encode_metrics(&metrics_request()).unwrap();
    let b = encoder.encode_metrics(&metrics_request()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_non_finite_doubles_render_as_strings() {
    let bytes = json_metrics_encoder()
        .encode_metrics(&non_finite_gauge_request())
        .unwrap();
    let json = parse(&bytes);
    let metric = &json["resourceMetrics"][0]["scopeMetrics"][0]["metrics"][0];
    let point = &metric["gauge"]["dataPoints"][0];

    assert_eq!(point["asDouble"], "NaN");
    assert_eq!(point["attributes"][0]["key"], "limit");
    assert_eq!(point["attributes"][0]["value"]["doubleValue"], "Infinity");
}

#[test]
fn test_64_bit_integers_render_as_strings() {
    let bytes = json_metrics_encoder()
        .encode_metrics(&histogram_request())
        .unwrap();
    let json = parse(&bytes);
    let metric = &json["resourceMetrics"][0]["scopeMetrics"][0]["metrics"][0];
    let point = &metric["histogram"]["dataPoints"][0];

    assert_eq!(point["count"], "3");
    assert_eq!(point["bucketCounts"], json!(["1", "2"]));
    assert_eq!(point["explicitBounds"], json!([1.0]));

    let as_int = point["exemplars"][0]["asInt"].as_str().unwrap();
    assert_eq!(as_int, "9007199254740993");
    assert_eq!(as_int.parse::<i64>().unwrap(), EXEMPLAR_INT);

    let bytes = json_metrics_encoder()
        .encode_metrics(&metrics_request())
        .unwrap();
    let json = parse(&bytes);
    let metric = &json["resourceMetrics"][0]["scopeMetrics"][0]["metrics"][0];
    assert_eq!(metric["gauge"]["dataPoints"][0]["asInt"], "7");
}

#[test]
fn test_set_histogram_fields_kept_at_zero() {
    let bytes = json_metrics_encoder()
        .encode_metrics(&histogram_request())
        .unwrap();
    let json = parse(&bytes);
    let histogram = &json["resourceMetrics"][0]["scopeMetrics"][0]["metrics"][0]["histogram"];
    let point = histogram["dataPoints"][0].as_object().unwrap();

    assert_eq!(point["sum"], 0.0);
    assert_eq!(point["min"], 0.0);
    assert!(!point.contains_key("max"));
    assert_eq!(histogram["aggregationTemporality"], "AGGREGATION_TEMPORALITY_DELTA");
}
