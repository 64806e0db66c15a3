//! Benchmark – `jsonsieve::StreamParser::consume`
#![allow(missing_docs)]

use std::{cell::RefCell, fmt::Write, time::Duration};

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jsonsieve::{Parsed, StreamParser, Value};

/// A deterministic stream of concatenated quote documents, at least
/// `target_len` bytes long.
fn make_quote_stream(target_len: usize) -> String {
    let mut s = String::with_capacity(target_len + 128);
    let mut i = 0_u64;
    while s.len() < target_len {
        write!(s, r#"{{"symbol":"SYM{i}","price":{}.{},"#, i % 997, i % 100).unwrap();
        writeln!(
            s,
            r#""volume":{},"tags":["a","b"],"venue":{{"open":{},"name":null}}}}"#,
            i * 31,
            i % 2 == 0
        )
        .unwrap();
        i += 1;
    }
    s
}

/// Feeds `payload` in `parts` pieces with one exact-key and one pattern
/// subscription attached. Returns the number of callbacks that fired.
fn run_consume(payload: &str, parts: usize) -> usize {
    let chunk_size = payload.len().div_ceil(parts);
    let fired = RefCell::new(0_usize);
    let mut parser = StreamParser::default();
    parser.on_parse("symbol", |_: &Value| *fired.borrow_mut() += 1);
    parser.on_match(
        |key: &str| key.starts_with('v'),
        |_: Parsed<'_>| *fired.borrow_mut() += 1,
    );

    // payload is ASCII, so byte chunks are valid UTF-8
    for chunk in payload.as_bytes().chunks(chunk_size) {
        parser.consume(std::str::from_utf8(chunk).expect("ASCII payload"));
        parser.take_scope();
    }
    drop(parser);
    fired.into_inner()
}

fn bench_consume(c: &mut Criterion) {
    let payload = make_quote_stream(64 * 1024);
    let mut group = c.benchmark_group("consume_split");

    for &parts in &[1_usize, 16, 1_024, 16_384] {
        group.bench_with_input(BenchmarkId::from_parameter(parts), &parts, |b, &parts| {
            b.iter(|| black_box(run_consume(black_box(&payload), parts)));
        });
    }
    group.finish();
}

fn criterion() -> Criterion {
    let c = Criterion::default();
    if is_ci::cached() {
        c.warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10)
    } else {
        c.warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(10))
    }
}

criterion_group! { name = benches; config = criterion(); targets = bench_consume }
criterion_main!(benches);
