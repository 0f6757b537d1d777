//! Fixed-size radix-2 FFT engine.
//!
//! [`FftEngine`] implements the iterative
//! [Cooley–Tukey](https://en.wikipedia.org/wiki/Cooley%E2%80%93Tukey_FFT_algorithm)
//! decimation-in-time algorithm for one power-of-two length chosen at
//! construction. The twiddle table (`N/2` roots of unity) is computed once;
//! every [`FftEngine::transform`] call then performs a bit-reversed load of
//! the input into the output buffer, applies the configured
//! [`Normalization`] to each loaded sample, and runs `log2(N)` butterfly
//! stages in place on the output.
//!
//! With the `parallel` feature the groups of a stage are spread over Rayon
//! workers for large sizes. Stages always run one after another.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use core::sync::atomic::{AtomicU8, Ordering};

pub use crate::error::{Buffer, FftError, MIN_SIZE};
pub use crate::num::{Complex, Complex32, Complex64, Float};

#[cfg(feature = "parallel")]
use core::sync::atomic::AtomicUsize;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::OnceLock;

/// Minimum number of points each core should receive before a stage is
/// split across threads.
#[cfg(feature = "parallel")]
const PER_CORE_WORK: usize = 4096;

/// Override for the parallel threshold. `0` means no override.
#[cfg(feature = "parallel")]
static PARALLEL_THRESHOLD_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
#[cfg(feature = "parallel")]
static PARALLEL_THRESHOLD: OnceLock<usize> = OnceLock::new();

#[cfg(feature = "parallel")]
fn parallel_threshold() -> usize {
    let override_thr = PARALLEL_THRESHOLD_OVERRIDE.load(Ordering::Relaxed);
    if override_thr != 0 {
        return override_thr;
    }
    *PARALLEL_THRESHOLD.get_or_init(|| {
        std::env::var("DITFFT_PAR_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&v| v != 0)
            .unwrap_or_else(|| {
                let cores = num_cpus::get().max(1);
                if cores == 1 {
                    usize::MAX
                } else {
                    PER_CORE_WORK * cores
                }
            })
    })
}

/// Set the minimum transform size that uses parallel butterfly stages.
///
/// Passing `0` reverts to the `DITFFT_PAR_THRESHOLD` environment variable or
/// the built-in heuristic.
#[cfg(feature = "parallel")]
pub fn set_parallel_threshold(threshold: usize) {
    PARALLEL_THRESHOLD_OVERRIDE.store(threshold, Ordering::Relaxed);
}

/// Scaling applied to every sample of a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Normalization {
    /// Raw transform, no scaling.
    #[default]
    None = 0,
    /// Divide by `N`.
    OneOverN = 1,
    /// Divide by `sqrt(N)`; makes the transform unitary.
    OneOverSqrtN = 2,
}

impl Normalization {
    pub const ALL: [Normalization; 3] = [
        Normalization::None,
        Normalization::OneOverN,
        Normalization::OneOverSqrtN,
    ];

    /// Scalar every sample is divided by for a transform of `size` points.
    /// `None` means samples are left untouched.
    pub fn divisor<T: Float>(self, size: usize) -> Option<T> {
        match self {
            Normalization::None => None,
            Normalization::OneOverN => Some(T::from_usize(size)),
            Normalization::OneOverSqrtN => Some(T::from_usize(size).sqrt()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Normalization::None => "none",
            Normalization::OneOverN => "1/n",
            Normalization::OneOverSqrtN => "1/sqrt(n)",
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl TryFrom<u8> for Normalization {
    type Error = FftError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Normalization::None),
            1 => Ok(Normalization::OneOverN),
            2 => Ok(Normalization::OneOverSqrtN),
            _ => Err(FftError::InvalidNormalization),
        }
    }
}

impl FromStr for Normalization {
    type Err = FftError;

    /// Accepts the [`Normalization::as_str`] spellings plus `one_over_n`,
    /// `one_over_sqrt_n` and `ortho`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let is = |name: &str| s.eq_ignore_ascii_case(name);
        if is("none") {
            Ok(Normalization::None)
        } else if is("1/n") || is("one_over_n") {
            Ok(Normalization::OneOverN)
        } else if is("1/sqrt(n)") || is("one_over_sqrt_n") || is("ortho") {
            Ok(Normalization::OneOverSqrtN)
        } else {
            Err(FftError::InvalidNormalization)
        }
    }
}

/// Reverse the low `bits` bits of `index`. Higher bits are discarded.
/// `bits` above `usize::BITS` reverses the whole word.
#[inline(always)]
pub fn reverse_bits(index: usize, bits: u32) -> usize {
    if bits == 0 {
        return 0;
    }
    index.reverse_bits() >> (usize::BITS - bits.min(usize::BITS))
}

/// Forward FFT plan for one power-of-two size.
///
/// The engine is immutable apart from its normalization mode, which is held
/// atomically, so one engine can be shared by reference between threads that
/// transform their own buffers.
#[derive(Debug)]
pub struct FftEngine<T: Float> {
    size: usize,
    fft_bits: u32,
    /// `twiddles[k] = exp(-2πi k / size)` for `k` in `0..size/2`.
    twiddles: Vec<Complex<T>>,
    normalization: AtomicU8,
}

impl<T: Float> Clone for FftEngine<T> {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            fft_bits: self.fft_bits,
            twiddles: self.twiddles.clone(),
            normalization: AtomicU8::new(self.normalization.load(Ordering::Relaxed)),
        }
    }
}

impl<T: Float> FftEngine<T> {
    /// Build an engine for transforms of exactly `size` points.
    ///
    /// # Errors
    /// [`FftError::SizeTooSmall`] when `size < 2` and
    /// [`FftError::NonPowerOfTwo`] when `size` is not a power of two.
    pub fn new(size: usize) -> Result<Self, FftError> {
        if size < MIN_SIZE {
            #[cfg(feature = "verbose-logging")]
            log::warn!("rejected FFT size {}: below minimum {}", size, MIN_SIZE);
            return Err(FftError::SizeTooSmall { size });
        }
        if !size.is_power_of_two() {
            #[cfg(feature = "verbose-logging")]
            log::warn!("rejected FFT size {}: not a power of two", size);
            return Err(FftError::NonPowerOfTwo { size });
        }
        let fft_bits = size.trailing_zeros();
        let twiddles = compute_twiddles(size);
        #[cfg(feature = "verbose-logging")]
        log::debug!(
            "planned radix-2 FFT: size={} stages={} twiddles={}",
            size,
            fft_bits,
            twiddles.len()
        );
        Ok(Self {
            size,
            fft_bits,
            twiddles,
            normalization: AtomicU8::new(Normalization::None as u8),
        })
    }

    /// Convenience constructor that also sets the normalization mode.
    pub fn with_normalization(size: usize, mode: Normalization) -> Result<Self, FftError> {
        let engine = Self::new(size)?;
        engine.set_normalization(mode);
        Ok(engine)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// `log2(size)`, also the number of butterfly stages.
    pub fn fft_bits(&self) -> u32 {
        self.fft_bits
    }

    pub fn twiddles(&self) -> &[Complex<T>] {
        &self.twiddles
    }

    pub fn normalization(&self) -> Normalization {
        // Only valid codes are ever stored.
        Normalization::try_from(self.normalization.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Change the scaling used by subsequent [`transform`](Self::transform)
    /// calls. A call already in flight keeps the mode it started with.
    pub fn set_normalization(&self, mode: Normalization) {
        self.normalization.store(mode as u8, Ordering::Relaxed);
    }

    /// Compute `output[k] = Σ input[n]·exp(-2πi·n·k/N)`, scaled by the
    /// current normalization.
    ///
    /// `input` is only read. Every slot of `output` is overwritten; its prior
    /// contents are never read.
    ///
    /// # Errors
    /// [`FftError::MismatchedLength`] naming the first buffer whose length is
    /// not [`size`](Self::size). Nothing is written in that case.
    pub fn transform(
        &self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        self.check_len(Buffer::Input, input.len())?;
        self.check_len(Buffer::Output, output.len())?;
        let divisor = self.normalization().divisor::<T>(self.size);
        self.load_bit_reversed(input, output, divisor);
        self.butterflies(output);
        Ok(())
    }

    /// Allocating variant of [`transform`](Self::transform).
    pub fn transform_vec(&self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>, FftError> {
        self.check_len(Buffer::Input, input.len())?;
        let mut output = vec![Complex::zero(); self.size];
        self.transform(input, &mut output)?;
        Ok(output)
    }

    /// Transform `inputs[i]` into `outputs[i]` for every pair.
    ///
    /// All counts and lengths are validated before the first transform runs,
    /// so on error no output has been touched.
    pub fn transform_batch<I, O>(&self, inputs: &[I], outputs: &mut [O]) -> Result<(), FftError>
    where
        I: AsRef<[Complex<T>]>,
        O: AsMut<[Complex<T>]>,
    {
        if inputs.len() != outputs.len() {
            return Err(FftError::MismatchedBatch {
                inputs: inputs.len(),
                outputs: outputs.len(),
            });
        }
        for (input, output) in inputs.iter().zip(outputs.iter_mut()) {
            self.check_len(Buffer::Input, input.as_ref().len())?;
            self.check_len(Buffer::Output, output.as_mut().len())?;
        }
        for (input, output) in inputs.iter().zip(outputs.iter_mut()) {
            self.transform(input.as_ref(), output.as_mut())?;
        }
        Ok(())
    }

    fn check_len(&self, buffer: Buffer, actual: usize) -> Result<(), FftError> {
        if actual == self.size {
            return Ok(());
        }
        #[cfg(feature = "verbose-logging")]
        log::warn!(
            "{} buffer length {} does not match FFT size {}",
            buffer,
            actual,
            self.size
        );
        Err(FftError::MismatchedLength {
            buffer,
            expected: self.size,
            actual,
        })
    }

    /// Copy `input[i]` to `output[reverse_bits(i)]`, dividing each loaded
    /// sample by `divisor`. Scaling commutes with the linear stages, so doing
    /// it here touches every sample exactly once.
    fn load_bit_reversed(
        &self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
        divisor: Option<T>,
    ) {
        for (i, sample) in input.iter().enumerate() {
            let slot = &mut output[reverse_bits(i, self.fft_bits)];
            slot.set(sample);
            if let Some(d) = divisor {
                slot.div_in_place_scalar(d);
            }
        }
    }

    fn butterflies(&self, data: &mut [Complex<T>]) {
        let parallel = self.use_parallel();
        let mut num_groups = self.size / 2;
        let mut per_group = 1;
        while num_groups > 0 {
            self.stage(data, num_groups, per_group, parallel);
            num_groups >>= 1;
            per_group <<= 1;
        }
    }

    /// One stage: `num_groups` independent groups of `2 * per_group`
    /// samples. Group `g` starts at `2 * per_group * g`, so contiguous
    /// chunks map one-to-one onto groups.
    fn stage(&self, data: &mut [Complex<T>], num_groups: usize, per_group: usize, parallel: bool) {
        #[cfg(feature = "parallel")]
        {
            if parallel && num_groups > 1 {
                let twiddles = &self.twiddles[..];
                data.par_chunks_exact_mut(2 * per_group)
                    .for_each(|group| butterfly_group(group, twiddles, num_groups));
                return;
            }
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;
        for group in data.chunks_exact_mut(2 * per_group) {
            butterfly_group(group, &self.twiddles, num_groups);
        }
    }

    #[cfg(feature = "parallel")]
    fn use_parallel(&self) -> bool {
        let parallel = self.size >= parallel_threshold();
        #[cfg(feature = "verbose-logging")]
        log::trace!("FFT size {} parallel stages: {}", self.size, parallel);
        parallel
    }

    #[cfg(not(feature = "parallel"))]
    fn use_parallel(&self) -> bool {
        false
    }
}

/// `exp(-2πi k / size)` for `k` in `0..size/2`.
fn compute_twiddles<T: Float>(size: usize) -> Vec<Complex<T>> {
    let n = T::from_usize(size);
    (0..size / 2)
        .map(|k| {
            let theta = -(T::two() * T::pi() * T::from_usize(k)) / n;
            Complex::expi(theta)
        })
        .collect()
}

/// Butterflies of one group. The first half of `group` holds the even
/// samples, the second half the odd ones; butterfly `b` uses twiddle
/// `stride * b`.
#[inline(always)]
fn butterfly_group<T: Float>(group: &mut [Complex<T>], twiddles: &[Complex<T>], stride: usize) {
    let half = group.len() / 2;
    let (evens, odds) = group.split_at_mut(half);
    for (b, (even, odd)) in evens.iter_mut().zip(odds.iter_mut()).enumerate() {
        butterfly(even, odd, &twiddles[stride * b]);
    }
}

/// `(a, b) -> (a + w·b, a - w·b)` with a stack scratch value.
#[inline(always)]
fn butterfly<T: Float>(even: &mut Complex<T>, odd: &mut Complex<T>, w: &Complex<T>) {
    let mut temp = *odd;
    temp.mul_in_place(w);
    odd.set(even);
    odd.sub_in_place(&temp);
    even.add_in_place(&temp);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_bits_low_bits_only() {
        assert_eq!(reverse_bits(0b001, 3), 0b100);
        assert_eq!(reverse_bits(0b110, 3), 0b011);
        assert_eq!(reverse_bits(1, 1), 1);
        assert_eq!(reverse_bits(5, 0), 0);
        for i in 0..16 {
            assert_eq!(reverse_bits(reverse_bits(i, 4), 4), i);
        }
    }

    #[test]
    fn reverse_bits_full_and_oversized_width() {
        let top = 1usize << (usize::BITS - 1);
        assert_eq!(reverse_bits(1, usize::BITS), top);
        assert_eq!(reverse_bits(1, usize::BITS + 1), top);
        assert_eq!(reverse_bits(6, u32::MAX), 6usize.reverse_bits());
    }

    #[test]
    fn twiddles_match_closed_form() {
        let engine = FftEngine::<f64>::new(16).unwrap();
        assert_eq!(engine.twiddles().len(), 8);
        for (k, w) in engine.twiddles().iter().enumerate() {
            let theta = -2.0 * core::f64::consts::PI * k as f64 / 16.0;
            assert!((w.re - libm::cos(theta)).abs() < 1e-15);
            assert!((w.im - libm::sin(theta)).abs() < 1e-15);
        }
        assert_eq!(engine.twiddles()[0], Complex64::new(1.0, 0.0));
    }

    #[test]
    fn butterfly_combines_pair() {
        let mut a = Complex64::new(1.0, 2.0);
        let mut b = Complex64::new(3.0, -1.0);
        butterfly(&mut a, &mut b, &Complex64::new(0.0, -1.0));
        // w·b = (3 - i)(-i) = -1 - 3i
        assert_eq!(a, Complex64::new(0.0, -1.0));
        assert_eq!(b, Complex64::new(2.0, 5.0));
    }

    #[test]
    fn size_two_is_sum_and_difference() {
        let engine = FftEngine::<f64>::new(2).unwrap();
        let input = [Complex64::new(3.0, 1.0), Complex64::new(1.0, -2.0)];
        let mut out = [Complex64::zero(); 2];
        engine.transform(&input, &mut out).unwrap();
        assert_eq!(out[0], Complex64::new(4.0, -1.0));
        assert_eq!(out[1], Complex64::new(2.0, 3.0));
    }

    #[test]
    fn divisor_per_mode() {
        assert_eq!(Normalization::None.divisor::<f64>(16), None);
        assert_eq!(Normalization::OneOverN.divisor::<f64>(16), Some(16.0));
        assert_eq!(Normalization::OneOverSqrtN.divisor::<f64>(16), Some(4.0));
    }

    #[test]
    fn normalization_codes_round_trip() {
        for mode in Normalization::ALL {
            assert_eq!(Normalization::try_from(mode as u8), Ok(mode));
            assert_eq!(mode.as_str().parse::<Normalization>(), Ok(mode));
        }
        assert_eq!(Normalization::try_from(3), Err(FftError::InvalidNormalization));
        assert_eq!("ORTHO".parse(), Ok(Normalization::OneOverSqrtN));
        assert_eq!("".parse::<Normalization>(), Err(FftError::InvalidNormalization));
    }
}
