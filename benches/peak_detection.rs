use criterion::{black_box, Criterion};

use partsignal::{PeakDetector, Pipeline, PipelineParameters};

fn trace(n: usize) -> (Vec<f64>, Vec<f64>) {
    let time: Vec<f64> = (0..n).map(|i| i as f64 * 1e-4).collect();
    let signal = (0..n)
        .map(|i| {
            let phase = (i % 500) as f64;
            let dip = 0.05 * (-((phase - 250.0) / 8.0).powi(2)).exp();
            0.01 * (i as f64 * 1e-3).sin() - dip + ((i * 7919) % 97) as f64 * 1e-5
        })
        .collect();
    (time, signal)
}

fn peak_detection(c: &mut Criterion) {
    let (time, signal) = trace(100_000);
    let input = vec![0.0; signal.len()];

    let detector = PeakDetector::default();
    c.bench_function("detect", |b| {
        b.iter(|| black_box(detector.detect(&time, &signal).unwrap()))
    });

    let pipeline = Pipeline::new(PipelineParameters::default());
    c.bench_function("pipeline", |b| {
        b.iter(|| black_box(pipeline.run(&time, &input, &signal).unwrap()))
    });
}

criterion::criterion_group!(benches, peak_detection);
criterion::criterion_main!(benches);
