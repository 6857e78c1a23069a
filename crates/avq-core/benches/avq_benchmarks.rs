use avq_core::avq::quantizer::quantize;
use avq_core::avq::re8::{decode_base, encode_base};
use avq_core::{AvqCodec, AvqConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// --- Common benchmark configuration ---
const FRAME_LAYOUTS: [(usize, usize); 3] = [(80, 4), (160, 8), (320, 16)];

fn test_coefficients(len: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-200.0..200.0)).collect()
}

fn bench_quantize(c: &mut Criterion) {
    let mut group = c.benchmark_group("avq_quantize");
    for (nb_bits, nsv) in FRAME_LAYOUTS {
        let coefficients = test_coefficients(nsv * 8, 1);
        group.throughput(Throughput::Elements(nsv as u64));
        group.bench_with_input(BenchmarkId::from_parameter(nb_bits), &coefficients, |b, x| {
            b.iter(|| quantize(black_box(x), nb_bits, nsv))
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("avq_encode");
    for (nb_bits, nsv) in FRAME_LAYOUTS {
        let codec = AvqCodec::new(AvqConfig::new(nb_bits, nsv)).unwrap();
        let coefficients = test_coefficients(nsv * 8, 2);
        group.throughput(Throughput::Elements(nsv as u64));
        group.bench_with_input(BenchmarkId::from_parameter(nb_bits), &coefficients, |b, x| {
            b.iter(|| codec.encode(black_box(x)))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("avq_decode");
    for (nb_bits, nsv) in FRAME_LAYOUTS {
        for parallel in [false, true] {
            let codec =
                AvqCodec::new(AvqConfig::new(nb_bits, nsv).with_parallel_decode(parallel)).unwrap();
            let encoded = codec.encode(&test_coefficients(nsv * 8, 3)).unwrap();
            let label = if parallel { "parallel" } else { "sequential" };
            group.throughput(Throughput::Elements(nsv as u64));
            group.bench_with_input(BenchmarkId::new(label, nb_bits), &encoded.frame.bits, |b, bits| {
                b.iter(|| codec.decode(black_box(bits)))
            });
        }
    }
    group.finish();
}

fn bench_base_codebook(c: &mut Criterion) {
    let points: Vec<_> = (0..4096u32).step_by(17).map(|i| decode_base(3, i)).collect();
    c.bench_function("re8_decode_base_q4", |b| {
        b.iter(|| {
            for i in (0..65520u32).step_by(257) {
                black_box(decode_base(4, black_box(i)));
            }
        })
    });
    c.bench_function("re8_encode_base_q3", |b| {
        b.iter(|| {
            for point in &points {
                black_box(encode_base(black_box(point)));
            }
        })
    });
}

criterion_group!(benches, bench_quantize, bench_encode, bench_decode, bench_base_codebook);
criterion_main!(benches);
