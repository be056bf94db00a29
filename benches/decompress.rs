use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use flate2::write::DeflateEncoder;
use flate2::Compression;
use rand::{Rng, SeedableRng};
use std::io::Write;

fn criterion_benchmark(c: &mut Criterion) {
    const DATA_SIZE: usize = 4 * 1024 * 1024;

    // Mostly repetitive log lines with some noise, roughly what .clog files hold
    let mut rng = rand::rngs::SmallRng::seed_from_u64(0xDEADBEEF);
    let mut data = Vec::with_capacity(DATA_SIZE);
    while data.len() < DATA_SIZE {
        write!(
            &mut data,
            "2021-01-{:02} worker={} status={}\n",
            rng.gen_range(1..=31),
            rng.gen_range(0..64),
            rng.gen::<u16>()
        )
        .unwrap();
    }

    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&data).unwrap();
    let compressed = encoder.finish().unwrap();

    let mut group = c.benchmark_group("decompress");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("decompress_stream", |b| {
        let mut output = Vec::with_capacity(data.len());
        b.iter(|| {
            output.clear();
            clogdecomp::decompress_stream(black_box(compressed.as_slice()), &mut output).unwrap()
        })
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
