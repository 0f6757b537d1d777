use core::fmt;

/// Smallest transform length an engine accepts.
pub const MIN_SIZE: usize = 2;

/// Which caller buffer a length check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Buffer {
    Input,
    Output,
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Buffer::Input => f.write_str("input"),
            Buffer::Output => f.write_str("output"),
        }
    }
}

/// Errors reported by engine construction, configuration and `transform`.
///
/// Every variant is a caller contract violation detected before any buffer
/// is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// Requested size is below [`MIN_SIZE`].
    SizeTooSmall { size: usize },
    /// Requested size is at least [`MIN_SIZE`] but not a power of two.
    NonPowerOfTwo { size: usize },
    /// A buffer passed to `transform` does not hold exactly `size` samples.
    MismatchedLength {
        buffer: Buffer,
        expected: usize,
        actual: usize,
    },
    /// Batch transform received a different number of inputs and outputs.
    MismatchedBatch { inputs: usize, outputs: usize },
    /// A normalization mode name or code did not match any known mode.
    InvalidNormalization,
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftError::SizeTooSmall { size } => {
                write!(f, "size {} is below the minimum of {}", size, MIN_SIZE)
            }
            FftError::NonPowerOfTwo { size } => write!(f, "size {} is not a power of two", size),
            FftError::MismatchedLength {
                buffer,
                expected,
                actual,
            } => write!(
                f,
                "{} buffer has length {}, expected {}",
                buffer, actual, expected
            ),
            FftError::MismatchedBatch { inputs, outputs } => write!(
                f,
                "batch has {} inputs but {} outputs",
                inputs, outputs
            ),
            FftError::InvalidNormalization => write!(
                f,
                "normalization must be one of `none`, `1/n` or `1/sqrt(n)`"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}
