//! Complex sample type and the minimal float abstraction behind it.
//!
//! [`Complex`] is a plain two-component value. Besides the usual
//! value-returning operators it offers mutating variants
//! (`add_in_place`, `mul_in_place`, ...) so the butterfly network can work
//! on caller-owned buffers without producing temporaries.

use core::str::FromStr;

// Minimal float trait for the generic engine (no_std, libm backed)
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + Default
    + core::fmt::Debug
    + core::ops::Add<Output = Self>
    + core::ops::Sub<Output = Self>
    + core::ops::Mul<Output = Self>
    + core::ops::Div<Output = Self>
    + core::ops::Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    fn two() -> Self {
        Self::one() + Self::one()
    }
    /// Nearest representable value. Exact for powers of two and for
    /// integers below the mantissa width.
    fn from_usize(x: usize) -> Self;
    fn sqrt(self) -> Self;
    fn sin_cos(self) -> (Self, Self);
    fn atan2(self, other: Self) -> Self;
    fn pi() -> Self;
}

impl Float for f32 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_usize(x: usize) -> Self {
        x as f32
    }
    fn sqrt(self) -> Self {
        libm::sqrtf(self)
    }
    fn sin_cos(self) -> (Self, Self) {
        (libm::sinf(self), libm::cosf(self))
    }
    fn atan2(self, other: Self) -> Self {
        libm::atan2f(self, other)
    }
    fn pi() -> Self {
        core::f32::consts::PI
    }
}

impl Float for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_usize(x: usize) -> Self {
        x as f64
    }
    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }
    fn sin_cos(self) -> (Self, Self) {
        (libm::sin(self), libm::cos(self))
    }
    fn atan2(self, other: Self) -> Self {
        libm::atan2(self, other)
    }
    fn pi() -> Self {
        core::f64::consts::PI
    }
}

/// One complex sample. No invariant beyond IEEE-754: NaN and infinities
/// are accepted and propagate through every operation.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex<T: Float> {
    pub re: T,
    pub im: T,
}

pub type Complex32 = Complex<f32>;
pub type Complex64 = Complex<f64>;

impl<T: Float> Complex<T> {
    #[inline(always)]
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }

    #[inline(always)]
    pub fn zero() -> Self {
        Self {
            re: T::zero(),
            im: T::zero(),
        }
    }

    /// Unit phasor `cos(theta) + i sin(theta)`.
    #[inline(always)]
    pub fn expi(theta: T) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self { re: cos, im: sin }
    }

    /// Copy both components from `other`.
    #[inline(always)]
    pub fn set(&mut self, other: &Self) {
        self.re = other.re;
        self.im = other.im;
    }

    #[inline(always)]
    pub fn add_in_place(&mut self, other: &Self) {
        self.re = self.re + other.re;
        self.im = self.im + other.im;
    }

    #[inline(always)]
    pub fn sub_in_place(&mut self, other: &Self) {
        self.re = self.re - other.re;
        self.im = self.im - other.im;
    }

    /// `(a+bi)(c+di) = (ac-bd) + (ad+bc)i`. Both products are formed before
    /// either component is written back.
    #[inline(always)]
    pub fn mul_in_place(&mut self, other: &Self) {
        let re = self.re * other.re - self.im * other.im;
        let im = self.re * other.im + self.im * other.re;
        self.re = re;
        self.im = im;
    }

    /// Divide both components by a real scalar. Dividing by zero yields
    /// infinities or NaN.
    #[inline(always)]
    pub fn div_in_place_scalar(&mut self, d: T) {
        self.re = self.re / d;
        self.im = self.im / d;
    }

    #[inline(always)]
    pub fn scale_in_place(&mut self, s: T) {
        self.re = self.re * s;
        self.im = self.im * s;
    }

    #[inline(always)]
    pub fn conj_in_place(&mut self) {
        self.im = -self.im;
    }

    #[inline(always)]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    #[inline(always)]
    pub fn norm_sqr(&self) -> T {
        self.re * self.re + self.im * self.im
    }

    pub fn magnitude(&self) -> T {
        self.norm_sqr().sqrt()
    }

    /// Phase angle in radians, in `(-pi, pi]`.
    pub fn arg(&self) -> T {
        self.im.atan2(self.re)
    }
}

impl<T: Float> core::ops::Neg for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl<T: Float> core::ops::Add for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn add(mut self, other: Self) -> Self {
        self.add_in_place(&other);
        self
    }
}

impl<T: Float> core::ops::Sub for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn sub(mut self, other: Self) -> Self {
        self.sub_in_place(&other);
        self
    }
}

impl<T: Float> core::ops::Mul for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn mul(mut self, other: Self) -> Self {
        self.mul_in_place(&other);
        self
    }
}

impl<T: Float> core::ops::AddAssign for Complex<T> {
    #[inline(always)]
    fn add_assign(&mut self, other: Self) {
        self.add_in_place(&other);
    }
}

impl<T: Float> core::ops::SubAssign for Complex<T> {
    #[inline(always)]
    fn sub_assign(&mut self, other: Self) {
        self.sub_in_place(&other);
    }
}

impl<T: Float> core::ops::MulAssign for Complex<T> {
    #[inline(always)]
    fn mul_assign(&mut self, other: Self) {
        self.mul_in_place(&other);
    }
}

impl<T: Float> From<(T, T)> for Complex<T> {
    fn from((re, im): (T, T)) -> Self {
        Self { re, im }
    }
}

/// Parse `"re,im"` into a complex value; whitespace around either part is
/// ignored.
impl<T: Float + FromStr> FromStr for Complex<T> {
    type Err = ParseComplexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (re, im) = s.split_once(',').ok_or(ParseComplexError)?;
        let re = re.trim().parse::<T>().map_err(|_| ParseComplexError)?;
        let im = im.trim().parse::<T>().map_err(|_| ParseComplexError)?;
        Ok(Self { re, im })
    }
}

/// Returned when a string is not of the form `"re,im"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseComplexError;

impl core::fmt::Display for ParseComplexError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "expected a complex value of the form `re,im`")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseComplexError {}
