//! Basic usage example for ditfft
//!
//! Plans an engine, transforms a few signals under each normalization mode
//! and reports the dominant bin. Pass `re,im` samples on stdin (one per
//! line, power-of-two count) to transform your own data instead.

use std::io::{self, BufRead, IsTerminal};

use ditfft::spectrum::{bin_frequency, magnitudes, peak_bin};
use ditfft::{Complex64, FftPlanner, Normalization};

fn format_spectrum(spectrum: &[Complex64]) -> Vec<String> {
    spectrum
        .iter()
        .map(|c| format!("{:.3}{:+.3}i", c.re, c.im))
        .collect()
}

fn read_stdin() -> Result<Vec<Complex64>, Box<dyn std::error::Error>> {
    let mut samples = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        samples.push(line.parse::<Complex64>()?);
    }
    Ok(samples)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== ditfft Basic Usage Example ===\n");
    let mut planner = FftPlanner::<f64>::new();

    if !io::stdin().is_terminal() {
        let samples = read_stdin()?;
        if !samples.is_empty() {
            let engine = planner.plan(samples.len())?;
            let spectrum = engine.transform_vec(&samples)?;
            for line in format_spectrum(&spectrum) {
                println!("{}", line);
            }
            return Ok(());
        }
    }

    // 1. Known pairs
    println!("1. Impulse and constant (N = 4)");
    let engine = planner.plan(4)?;
    let impulse = [
        Complex64::new(1.0, 0.0),
        Complex64::zero(),
        Complex64::zero(),
        Complex64::zero(),
    ];
    let mut out = [Complex64::zero(); 4];
    engine.transform(&impulse, &mut out)?;
    println!("   impulse  -> {:?}", format_spectrum(&out));
    engine.transform(&[Complex64::new(1.0, 0.0); 4], &mut out)?;
    println!("   constant -> {:?}\n", format_spectrum(&out));

    // 2. Normalization modes
    println!("2. Cosine at bin 1 (N = 8) under each normalization");
    let engine = planner.plan(8)?;
    let cosine: Vec<Complex64> = (0..8)
        .map(|n| {
            let theta = 2.0 * std::f64::consts::PI * n as f64 / 8.0;
            Complex64::new(theta.cos(), 0.0)
        })
        .collect();
    for mode in Normalization::ALL {
        engine.set_normalization(mode);
        let spectrum = engine.transform_vec(&cosine)?;
        println!("   {:>9}: bin1 = {:.4}", mode, spectrum[1].re);
    }
    engine.set_normalization(Normalization::None);
    println!();

    // 3. Tone detection
    println!("3. Dominant frequency of a 1 kHz tone sampled at 8 kHz");
    let size = 1024;
    let rate = 8000.0;
    let engine = planner.plan(size)?;
    let tone: Vec<Complex64> = (0..size)
        .map(|n| {
            let theta = 2.0 * std::f64::consts::PI * 1000.0 * n as f64 / rate;
            Complex64::new(theta.sin(), 0.0)
        })
        .collect();
    let spectrum = engine.transform_vec(&tone)?;
    let half = &spectrum[..size / 2];
    if let Some(bin) = peak_bin(half) {
        println!(
            "   peak bin {} at {:.1} Hz, magnitude {:.1}",
            bin,
            bin_frequency(bin, size, rate),
            magnitudes(half)[bin]
        );
    }
    println!("\n{} engine sizes cached", planner.len());
    Ok(())
}
