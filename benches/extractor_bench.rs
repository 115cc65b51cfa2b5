use benchlog::extractor::Extractor;
use benchlog::freshness::DEFAULT_FRESHNESS_FACTOR;
use benchlog::{aggregate, ProverRecord, Records};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

// Realistic prover output, including the progress chatter around the labeled lines
fn prover_log(size_kib: u64) -> String {
    format!(
        "Loading trusted setup from trusted_setup.txt\n\
         File size: {} KiB\n\
         Initialization time: 1.203481s\n\
         Proving...\n\
         FK20 time: 2.017263s\n\
         Proving time: 7.212863475s\n",
        size_kib
    )
}

fn bench_prover_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prover_extraction");
    let extractor = Extractor::new().unwrap();
    let log = prover_log(512);

    group.throughput(Throughput::Bytes(log.len() as u64));
    group.bench_function("single_log", |b| {
        b.iter(|| black_box(extractor.extract_prover(black_box(&log)).unwrap()));
    });

    // Labels buried after a long preamble
    let padded = format!("{}{}", "progress: ok\n".repeat(1000), log);
    group.throughput(Throughput::Bytes(padded.len() as u64));
    group.bench_function("padded_log", |b| {
        b.iter(|| black_box(extractor.extract_prover(black_box(&padded)).unwrap()));
    });

    group.finish();
}

fn bench_verifier_extraction(c: &mut Criterion) {
    let extractor = Extractor::new().unwrap();
    let content = "Verifying proof...\nVerification took: 11.865ms\n";

    c.bench_function("verifier_extraction", |b| {
        b.iter(|| {
            black_box(
                extractor
                    .extract_verifier(black_box("out512-3.txt"), black_box(content))
                    .unwrap(),
            )
        });
    });
}

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for samples in [10usize, 100, 1000] {
        let records: Vec<ProverRecord> = (0..samples * 8)
            .map(|i| ProverRecord {
                size_kib: 128 << (i % 8),
                init_secs: Some(1.0),
                fk20_secs: 2.0 + (i % 7) as f64 * 0.01,
                mining_secs: 5.0 + (i % 11) as f64 * 0.01,
            })
            .collect();
        let records = Records::Prover(records);

        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(samples), &records, |b, records| {
            b.iter(|| black_box(aggregate(records, DEFAULT_FRESHNESS_FACTOR).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_prover_extraction,
    bench_verifier_extraction,
    bench_aggregation
);
criterion_main!(benches);
