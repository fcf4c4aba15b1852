//! XChaCha20 benchmark
use benches::{Benchmarker, criterion_group_bench};
use criterion::{BenchmarkId, Throughput, criterion_group, criterion_main};

use xchacha20::{
    OsRng, RandomSource, XChaCha20,
    cipher::{KeyIvInit, StreamCipher},
};

const KB: usize = 1024;

fn bench(c: &mut Benchmarker) {
    let mut group = c.benchmark_group("xchacha20");

    for size in &[KB, 2 * KB, 4 * KB, 8 * KB, 16 * KB] {
        let mut buf = vec![0u8; *size];

        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_function(BenchmarkId::new("xchacha20_in_place", size), |b| {
            let key = [0x42; 32];
            let nonce = [0x24; 24];
            b.iter(|| xchacha20::xchacha20_in_place(&key, &nonce, 0, &mut buf));
        });

        group.bench_function(BenchmarkId::new("apply_keystream", size), |b| {
            let mut cipher = XChaCha20::new(&Default::default(), &Default::default());
            b.iter(|| cipher.apply_keystream(&mut buf));
        });
    }

    group.finish();
}

fn bench_payload(c: &mut Benchmarker) {
    let mut group = c.benchmark_group("xchacha20-payload");

    for size in &[16, 256, KB, 16 * KB] {
        let mut message = vec![0u8; *size];
        OsRng
            .fill_random(&mut message)
            .expect("OS random source unavailable");
        let key = [0x42; 32];

        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_function(BenchmarkId::new("encrypt_decrypt", size), |b| {
            b.iter(|| {
                let encoded = xchacha20::encrypt(&message, &key).expect("encrypt");
                xchacha20::decrypt(&encoded, &key).expect("decrypt")
            });
        });
    }

    group.finish();
}

criterion_group_bench!(benches, bench);
criterion_group_bench!(benches_payload, bench_payload);
criterion_main!(benches, benches_payload);
