//! Demonstrates enabling verbose logging for ditfft.
use ditfft::{Complex64, FftEngine};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let engine = FftEngine::<f64>::new(16).unwrap();
    let _ = FftEngine::<f64>::new(12);

    let input = vec![Complex64::new(1.0, 0.0); 16];
    let mut output = vec![Complex64::zero(); 8];
    let _ = engine.transform(&input, &mut output);
}
