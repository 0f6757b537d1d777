//! # ditfft - fixed-size radix-2 FFT engine
//!
//! A small forward Discrete Fourier Transform kernel: iterative Cooley–Tukey
//! decimation-in-time for power-of-two lengths, with a twiddle table
//! precomputed once per size and a mutable complex sample type whose
//! in-place operations keep the butterfly loop allocation free.
//!
//! ## Features
//!
//! - **Plan once, transform many times**: [`FftEngine`] owns the twiddle table
//!   for one size and can be shared between threads.
//! - **Normalization modes**: raw, `1/N` and unitary `1/sqrt(N)`.
//! - **no_std + alloc**: all math goes through `libm`.
//! - **Parallel stages** (optional): large transforms split each butterfly
//!   stage across Rayon workers.
//!
//! ## Cargo Features
//!
//! - `std` (default): `std::error::Error` impls
//! - `parallel`: parallel butterfly stages with Rayon
//! - `verbose-logging`: `log` records for planning and rejected calls
//!
//! ## Example
//!
//! ```
//! use ditfft::{Complex64, FftEngine, Normalization};
//!
//! let engine = FftEngine::<f64>::new(4).unwrap();
//! engine.set_normalization(Normalization::None);
//! let input = [Complex64::new(1.0, 0.0); 4];
//! let mut output = [Complex64::zero(); 4];
//! engine.transform(&input, &mut output).unwrap();
//! assert_eq!(output[0], Complex64::new(4.0, 0.0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

/// Error type shared by every fallible operation.
pub mod error;

/// Radix-2 decimation-in-time FFT engine
///
/// Twiddle precomputation, bit-reversed load, butterfly stages and
/// normalization.
pub mod fft;

/// Complex sample type and float abstraction.
pub mod num;

/// Engine cache keyed by transform size.
pub mod planner;

/// Magnitude, power and peak helpers for transform output.
pub mod spectrum;

#[cfg(feature = "parallel")]
pub use fft::set_parallel_threshold;
pub use error::{Buffer, FftError, MIN_SIZE};
pub use fft::{reverse_bits, FftEngine, Normalization};
pub use num::{Complex, Complex32, Complex64, Float, ParseComplexError};
pub use planner::FftPlanner;
