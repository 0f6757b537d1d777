use criterion::{criterion_group, criterion_main, Criterion};
use ditfft::{Complex64, FftEngine};

fn bench_small_fft(c: &mut Criterion) {
    for &n in &[2usize, 4, 8, 16] {
        let mut group = c.benchmark_group(format!("fft_{}", n));
        let engine = FftEngine::<f64>::new(n).unwrap();
        let input: Vec<Complex64> = (0..n).map(|i| Complex64::new(i as f64, 0.0)).collect();
        let mut output = vec![Complex64::zero(); n];
        group.bench_function("transform", |b| {
            b.iter(|| engine.transform(&input, &mut output).unwrap());
        });
        group.bench_function("plan", |b| {
            b.iter(|| FftEngine::<f64>::new(n).unwrap());
        });
        group.finish();
    }
}

criterion_group!(benches, bench_small_fft);
criterion_main!(benches);
