//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Benchmarks for telnetcodec performance

use bytes::BytesMut;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tokio_util::codec::{Decoder, Encoder};
use wiretel_telnetcodec::{TelnetCodec, TelnetFrame, TelnetOption};

fn bench_encode_single_byte(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_single_byte");

    group.bench_function("data_byte", |b| {
        let mut codec = TelnetCodec::new();
        let mut buffer = BytesMut::with_capacity(1024);

        b.iter(|| {
            buffer.clear();
            codec
                .encode(black_box(TelnetFrame::Data(b'A')), &mut buffer)
                .unwrap();
        });
    });

    group.bench_function("iac_byte", |b| {
        let mut codec = TelnetCodec::new();
        let mut buffer = BytesMut::with_capacity(1024);

        b.iter(|| {
            buffer.clear();
            codec
                .encode(black_box(TelnetFrame::Data(0xFF)), &mut buffer)
                .unwrap();
        });
    });

    group.finish();
}

fn bench_decode_data_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_data_sizes");

    for size in [10, 100, 1000, 10000].iter() {
        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let data: Vec<u8> = (0..size).map(|i| (i % 0x7F) as u8).collect();

            b.iter(|| {
                let mut codec = TelnetCodec::new();
                let mut buffer = BytesMut::from(&data[..]);
                while let Some(event) = codec.decode(&mut buffer).unwrap() {
                    black_box(event);
                }
            });
        });
    }

    group.finish();
}

fn bench_decode_negotiation(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_negotiation");

    group.bench_function("will_echo", |b| {
        b.iter(|| {
            let mut codec = TelnetCodec::new();
            let mut buffer = BytesMut::from(&[0xFF, 0xFB, 0x01][..]);
            while let Some(event) = codec.decode(&mut buffer).unwrap() {
                black_box(event);
            }
            black_box(codec.take_pending_replies());
        });
    });

    group.bench_function("enable_local", |b| {
        b.iter(|| {
            let mut codec = TelnetCodec::new();
            black_box(codec.enable_local(black_box(TelnetOption::SuppressGoAhead)));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_encode_single_byte,
    bench_decode_data_sizes,
    bench_decode_negotiation
);
criterion_main!(benches);
