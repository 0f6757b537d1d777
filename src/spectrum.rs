//! Read-only helpers for consumers of a transform result.

use alloc::vec::Vec;

use crate::num::{Complex, Float};

/// Magnitude of every bin.
pub fn magnitudes<T: Float>(spectrum: &[Complex<T>]) -> Vec<T> {
    spectrum.iter().map(Complex::magnitude).collect()
}

/// Squared magnitude of every bin.
pub fn power<T: Float>(spectrum: &[Complex<T>]) -> Vec<T> {
    spectrum.iter().map(Complex::norm_sqr).collect()
}

/// Index of the bin with the largest magnitude. Ties resolve to the lowest
/// index; NaN bins are never selected unless every bin is NaN.
pub fn peak_bin<T: Float>(spectrum: &[Complex<T>]) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (i, c) in spectrum.iter().enumerate() {
        let p = c.norm_sqr();
        match best {
            None => best = Some((i, p)),
            Some((_, bp)) if p > bp || (is_nan(bp) && !is_nan(p)) => best = Some((i, p)),
            _ => {}
        }
    }
    best.map(|(i, _)| i)
}

fn is_nan<T: Float>(x: T) -> bool {
    x.partial_cmp(&x).is_none()
}

/// Centre frequency of `bin` for a transform of `size` points sampled at
/// `sample_rate`.
pub fn bin_frequency<T: Float>(bin: usize, size: usize, sample_rate: T) -> T {
    T::from_usize(bin) * sample_rate / T::from_usize(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::Complex64;

    #[test]
    fn peak_prefers_first_of_equal_bins() {
        let s = [
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 4.0),
            Complex64::new(4.0, 0.0),
        ];
        assert_eq!(peak_bin(&s), Some(1));
        assert_eq!(peak_bin::<f64>(&[]), None);
    }

    #[test]
    fn peak_skips_nan() {
        let s = [Complex64::new(f64::NAN, 0.0), Complex64::new(1.0, 0.0)];
        assert_eq!(peak_bin(&s), Some(1));
    }

    #[test]
    fn bin_frequency_scales_by_rate() {
        assert_eq!(bin_frequency(3, 8, 8000.0f64), 3000.0);
    }

    #[test]
    fn magnitudes_and_power() {
        let s = [Complex64::new(3.0, 4.0)];
        assert_eq!(magnitudes(&s), [5.0]);
        assert_eq!(power(&s), [25.0]);
    }
}
