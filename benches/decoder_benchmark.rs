//! Benchmarks for the chat stream decoder
//!
//! Run with: cargo bench --bench decoder_benchmark

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use futures::StreamExt;
use qchat::sse::{
    decode_stream, ByteStream, FrameBuffer, StreamOptions, StreamSession, Utf8StreamDecoder,
};
use qchat::traits::HttpError;

/// Build a response body of `fragments` content frames followed by `[DONE]`
fn generate_body(fragments: usize) -> String {
    let words = ["Rest", " and", " drink", " plenty", " of", " fluids", " (café", " 💙)."];
    let mut body = String::new();
    for i in 0..fragments {
        let payload = serde_json::json!({ "p": words[i % words.len()] });
        body.push_str(&format!("data: {}\n\n", payload));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

/// Split a body into fixed-size chunks, ignoring char boundaries
fn split_chunks(body: &str, chunk_size: usize) -> Vec<Vec<u8>> {
    body.as_bytes()
        .chunks(chunk_size)
        .map(<[u8]>::to_vec)
        .collect()
}

/// Benchmark the synchronous decode path: UTF-8 decoding, framing, session
fn bench_session_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_apply");

    for size in [10, 100, 1000].iter() {
        let chunks = split_chunks(&generate_body(*size), 7);
        let total: usize = chunks.iter().map(Vec::len).sum();
        group.throughput(Throughput::Bytes(total as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_frames", size)),
            &chunks,
            |b, chunks| {
                b.iter(|| {
                    let mut decoder = Utf8StreamDecoder::new();
                    let mut frames = FrameBuffer::new();
                    let mut session = StreamSession::new();
                    for chunk in chunks {
                        frames.push(&decoder.decode(black_box(chunk)));
                        while let Some(frame) = frames.next_frame() {
                            black_box(session.apply_frame(&frame));
                        }
                    }
                    black_box(session.accumulated().len())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the full async event stream over an in-memory body
fn bench_decode_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_stream");
    let runtime = tokio::runtime::Runtime::new().expect("failed to build runtime");

    for chunk_size in [16, 256, 4096].iter() {
        let chunks = split_chunks(&generate_body(500), *chunk_size);
        let total: usize = chunks.iter().map(Vec::len).sum();
        group.throughput(Throughput::Bytes(total as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_byte_chunks", chunk_size)),
            &chunks,
            |b, chunks| {
                b.iter(|| {
                    let body: Vec<Result<Bytes, HttpError>> = chunks
                        .iter()
                        .map(|chunk| Ok(Bytes::from(chunk.clone())))
                        .collect();
                    let body: ByteStream = Box::pin(futures::stream::iter(body));
                    let events = runtime.block_on(
                        decode_stream(body, StreamOptions::new()).collect::<Vec<_>>(),
                    );
                    black_box(events.len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_session_apply, bench_decode_stream);

criterion_main!(benches);
