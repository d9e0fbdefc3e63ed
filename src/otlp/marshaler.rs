//! Delegate marshalers
//!
//! A [`Marshaler`] writes one export request into a byte sink. The encoder
//! owns exactly one and never interprets its output or its errors.

use std::io;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::config::EncoderConfig;
use crate::error::MarshalError;
use crate::otlp::SignalRequest;
use crate::otlp::normalize::normalize;
use crate::otlp::value::to_value;

/// Structural writer for OTLP export requests
pub trait Marshaler: Send + Sync {
    /// Write `request` into `sink`
    fn marshal(&self, sink: &mut dyn io::Write, request: SignalRequest<'_>)
    -> Result<(), MarshalError>;

    /// Media type of the produced bytes
    fn content_type(&self) -> &'static str;
}

/// Protobuf-JSON marshaler
///
/// Renders export requests with JSON field names, symbolic enum names,
/// base64 bytes and zero values omitted (see [`EncoderConfig`] for the
/// switches). Object keys are written in lexicographic order, so equal
/// requests always produce identical bytes.
#[derive(Debug, Clone, Default)]
pub struct JsonMarshaler {
    config: EncoderConfig,
}

impl JsonMarshaler {
    /// Create a marshaler with the given options
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Options this marshaler was built with
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    fn to_value(request: SignalRequest<'_>) -> Result<serde_json::Value, serde_json::Error> {
        match request {
            SignalRequest::Traces(request) => to_value(request),
            SignalRequest::Metrics(request) => to_value(request),
            SignalRequest::Logs(request) => to_value(request),
        }
    }
}

impl Marshaler for JsonMarshaler {
    fn marshal(
        &self,
        sink: &mut dyn io::Write,
        request: SignalRequest<'_>,
    ) -> Result<(), MarshalError> {
        let value = normalize(Self::to_value(request)?, &self.config)?;

        if self.config.indent == 0 {
            serde_json::to_writer(&mut *sink, &value)?;
        } else {
            let indent = vec![b' '; self.config.indent];
            let mut serializer =
                Serializer::with_formatter(&mut *sink, PrettyFormatter::with_indent(&indent));
            value.serialize(&mut serializer)?;
        }

        Ok(())
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}
