//! Encoding throughput benchmarks

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;
use opentelemetry_proto::tonic::trace::v1::{ResourceSpans, ScopeSpans, Span};
use otlp_json_encoder::config::EncoderConfigBuilder;
use otlp_json_encoder::{TracesEncoder, json_traces_encoder, json_traces_encoder_with};

fn trace_request(span_count: usize) -> ExportTraceServiceRequest {
    let spans = (0..span_count)
        .map(|i| Span {
            trace_id: vec![1; 16],
            span_id: (i as u64).to_be_bytes().to_vec(),
            name: format!("span-{}", i),
            kind: 2,
            start_time_unix_nano: 1_700_000_000_000_000_000 + i as u64,
            end_time_unix_nano: 1_700_000_000_000_500_000 + i as u64,
            ..Default::default()
        })
        .collect();

    ExportTraceServiceRequest {
        resource_spans: vec![ResourceSpans {
            scope_spans: vec![ScopeSpans {
                spans,
                ..Default::default()
            }],
            ..Default::default()
        }],
    }
}

fn bench_encode_traces(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_traces");
    let encoder = json_traces_encoder();

    for span_count in [1, 100, 1000] {
        let request = trace_request(span_count);
        group.throughput(Throughput::Elements(span_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(span_count),
            &request,
            |b, request| b.iter(|| encoder.encode_traces(black_box(request)).unwrap()),
        );
    }

    group.finish();
}

fn bench_encode_with_defaults(c: &mut Criterion) {
    let config = EncoderConfigBuilder::new()
        .emit_defaults(true)
        .build()
        .unwrap();
    let encoder = json_traces_encoder_with(&config).unwrap();
    let request = trace_request(100);

    c.bench_function("encode_traces_emit_defaults", |b| {
        b.iter(|| encoder.encode_traces(black_box(&request)).unwrap())
    });
}

fn bench_rejected_payload(c: &mut Criterion) {
    let encoder = json_traces_encoder();
    c.bench_function("encode_traces_incompatible", |b| {
        b.iter(|| encoder.encode_traces(black_box(&())).is_err())
    });
}

criterion_group!(
    benches,
    bench_encode_traces,
    bench_encode_with_defaults,
    bench_rejected_payload
);
criterion_main!(benches);
