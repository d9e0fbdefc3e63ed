//! Protobuf-JSON normalization
//!
//! Rewrites the `serde` rendering of an OTLP message into its protobuf-JSON
//! form: zero-valued scalars dropped, enums named, bytes re-encoded, keys
//! renamed and sorted.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use opentelemetry_proto::tonic::logs::v1::SeverityNumber;
use opentelemetry_proto::tonic::metrics::v1::AggregationTemporality;
use opentelemetry_proto::tonic::trace::v1::span::SpanKind;
use opentelemetry_proto::tonic::trace::v1::status::StatusCode;
use serde_json::{Map, Number, Value};

use crate::config::{BytesEncoding, EncoderConfig, FieldNaming};
use crate::error::MarshalError;

/// Enum-typed fields across the trace, metric and log schemas
const ENUM_FIELDS: &[&str] = &["kind", "code", "severityNumber", "aggregationTemporality"];

/// Bytes fields rendered as hex by the schema's serde mapping
const ID_FIELDS: &[&str] = &["traceId", "spanId", "parentSpanId"];

/// Oneof members; always emitted once set, even at their zero value
const ONEOF_FIELDS: &[&str] = &[
    "stringValue",
    "boolValue",
    "intValue",
    "doubleValue",
    "arrayValue",
    "kvlistValue",
    "bytesValue",
    "asDouble",
    "asInt",
];

/// 64-bit integer scalars whose zero value renders as the string `"0"`
const INT64_FIELDS: &[&str] = &[
    "timeUnixNano",
    "startTimeUnixNano",
    "endTimeUnixNano",
    "observedTimeUnixNano",
    "count",
    "zeroCount",
];

/// Optional fields of histogram points; set values survive even at zero
const PRESENCE_FIELDS: &[&str] = &["sum", "min", "max"];

/// Keys only histogram and exponential histogram points carry
const HISTOGRAM_POINT_MARKERS: &[&str] = &["bucketCounts", "zeroThreshold"];

/// Exemplar value members, serialized nested under `value` but hoisted into the point
const HOISTED_ONEOF_FIELDS: &[&str] = &["asDouble", "asInt"];

const BYTES_VALUE: &str = "bytesValue";

/// Normalize a serialized message according to `config`
pub fn normalize(value: Value, config: &EncoderConfig) -> Result<Value, MarshalError> {
    match value {
        Value::Object(map) => normalize_object(map, config),
        Value::Array(items) => items
            .into_iter()
            .map(|item| normalize(item, config))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        scalar => Ok(scalar),
    }
}

fn normalize_object(
    map: Map<String, Value>,
    config: &EncoderConfig,
) -> Result<Value, MarshalError> {
    let histogram_point = HISTOGRAM_POINT_MARKERS
        .iter()
        .any(|marker| map.contains_key(*marker));

    let mut fields = Vec::with_capacity(map.len());
    for (key, value) in map {
        let (key, value) = hoist_oneof(key, value);
        if histogram_point && PRESENCE_FIELDS.contains(&key.as_str()) && !value.is_null() {
            fields.push((rename(&key, config.field_naming), value));
            continue;
        }
        if let Some(value) = normalize_field(&key, value, config)? {
            fields.push((rename(&key, config.field_naming), value));
        }
    }
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(Value::Object(fields.into_iter().collect()))
}

/// `"value": {"asInt": ..}` becomes `"asInt": ..`
fn hoist_oneof(key: String, value: Value) -> (String, Value) {
    match value {
        Value::Object(inner)
            if key == "value"
                && inner.len() == 1
                && inner.keys().all(|k| HOISTED_ONEOF_FIELDS.contains(&k.as_str())) =>
        {
            match inner.into_iter().next() {
                Some(member) => member,
                None => (key, Value::Object(Map::new())),
            }
        }
        other => (key, other),
    }
}

/// Returns `None` when the field is to be omitted
fn normalize_field(
    key: &str,
    value: Value,
    config: &EncoderConfig,
) -> Result<Option<Value>, MarshalError> {
    if value.is_null() {
        return Ok(config.emit_defaults.then_some(Value::Null));
    }

    if ENUM_FIELDS.contains(&key) {
        return Ok(render_enum(key, value, config));
    }

    if ID_FIELDS.contains(&key) {
        let rendered = render_id(key, value, config.bytes_encoding)?;
        return Ok(keep_unless_default(key, rendered, config));
    }

    if key == BYTES_VALUE {
        return render_bytes_value(value, config.bytes_encoding).map(Some);
    }

    if ONEOF_FIELDS.contains(&key) {
        return normalize(value, config).map(Some);
    }

    match value {
        Value::Object(_) | Value::Array(_) => normalize(value, config).map(Some),
        scalar => Ok(keep_unless_default(key, scalar, config)),
    }
}

fn keep_unless_default(key: &str, value: Value, config: &EncoderConfig) -> Option<Value> {
    if config.emit_defaults || !is_default_scalar(key, &value) {
        Some(value)
    } else {
        None
    }
}

fn is_default_scalar(key: &str, value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || (s == "0" && INT64_FIELDS.contains(&key)),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn render_enum(key: &str, value: Value, config: &EncoderConfig) -> Option<Value> {
    let number = match &value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => enum_number(key, s),
        _ => None,
    };

    let Some(number) = number else {
        // Unknown value; keep whatever the schema produced
        return Some(value);
    };

    if number == 0 && !config.emit_defaults {
        return None;
    }

    if config.enums_as_ints {
        return Some(Value::Number(Number::from(number)));
    }

    match enum_name(key, number) {
        Some(name) => Some(Value::String(name.to_string())),
        None => Some(Value::Number(Number::from(number))),
    }
}

fn enum_name(key: &str, number: i32) -> Option<&'static str> {
    match key {
        "kind" => SpanKind::try_from(number).ok().map(|v| v.as_str_name()),
        "code" => StatusCode::try_from(number).ok().map(|v| v.as_str_name()),
        "severityNumber" => SeverityNumber::try_from(number)
            .ok()
            .map(|v| v.as_str_name()),
        "aggregationTemporality" => AggregationTemporality::try_from(number)
            .ok()
            .map(|v| v.as_str_name()),
        _ => None,
    }
}

fn enum_number(key: &str, name: &str) -> Option<i32> {
    match key {
        "kind" => SpanKind::from_str_name(name).map(|v| v as i32),
        "code" => StatusCode::from_str_name(name).map(|v| v as i32),
        "severityNumber" => SeverityNumber::from_str_name(name).map(|v| v as i32),
        "aggregationTemporality" => AggregationTemporality::from_str_name(name).map(|v| v as i32),
        _ => None,
    }
}

fn render_id(key: &str, value: Value, encoding: BytesEncoding) -> Result<Value, MarshalError> {
    let bytes = match value {
        Value::String(text) => match hex::decode(&text) {
            Ok(bytes) => bytes,
            // Some schema versions already render ids as base64
            Err(e) => STANDARD.decode(&text).map_err(|_| invalid(key, e))?,
        },
        Value::Array(items) => byte_array(key, &items)?,
        other => return Ok(other),
    };
    Ok(Value::String(encode_bytes(&bytes, encoding)))
}

fn render_bytes_value(value: Value, encoding: BytesEncoding) -> Result<Value, MarshalError> {
    let bytes = match value {
        Value::String(text) if encoding == BytesEncoding::Base64 => {
            return Ok(Value::String(text));
        }
        Value::String(text) => STANDARD.decode(&text).map_err(|e| invalid(BYTES_VALUE, e))?,
        Value::Array(items) => byte_array(BYTES_VALUE, &items)?,
        other => return Ok(other),
    };
    Ok(Value::String(encode_bytes(&bytes, encoding)))
}

fn byte_array(key: &str, items: &[Value]) -> Result<Vec<u8>, MarshalError> {
    items
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|b| u8::try_from(b).ok())
                .ok_or_else(|| invalid(key, format!("{} is not a byte", item)))
        })
        .collect()
}

fn encode_bytes(bytes: &[u8], encoding: BytesEncoding) -> String {
    match encoding {
        BytesEncoding::Base64 => STANDARD.encode(bytes),
        BytesEncoding::Hex => hex::encode(bytes),
    }
}

fn invalid(key: &str, reason: impl std::fmt::Display) -> MarshalError {
    MarshalError::InvalidBytes {
        field: key.to_string(),
        reason: reason.to_string(),
    }
}

fn rename(key: &str, naming: FieldNaming) -> String {
    match naming {
        FieldNaming::CamelCase => key.to_string(),
        FieldNaming::OriginalName => to_snake_case(key),
    }
}

fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
