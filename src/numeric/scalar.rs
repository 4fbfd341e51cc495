// ============================================================================
// Scalar
// High-precision decimal value with tolerance-based zero tests
// ============================================================================

use super::errors::{NumericError, NumericResult};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, MathematicalOps};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decimal coordinate used by every vector, hyperplane and row operation.
///
/// Wraps a 96-bit `rust_decimal::Decimal` (28 significant digits), so row
/// reduction never accumulates binary floating-point drift. Zero tests go
/// through [`Scalar::is_near_zero`] rather than exact equality.
///
/// # Example
/// ```
/// use linsys::numeric::Scalar;
///
/// let third = Scalar::ONE.checked_div(Scalar::from(3)).unwrap();
/// let residual = Scalar::ONE.checked_sub(third.checked_mul(Scalar::from(3)).unwrap()).unwrap();
/// assert!(residual.is_near_zero());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Scalar(Decimal);

impl Scalar {
    /// Zero value
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// One (1.0)
    pub const ONE: Self = Self(Decimal::ONE);

    /// Minus one (-1.0)
    pub const NEGATIVE_ONE: Self = Self(Decimal::NEGATIVE_ONE);

    /// Default near-zero threshold (1e-10)
    pub const TOLERANCE: Self = Self(Decimal::from_parts(1, 0, 0, false, 10));

    // ========================================================================
    // Construction
    // ========================================================================

    /// Wrap an existing decimal.
    #[inline]
    pub const fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    /// Build `mantissa × 10^-scale`, e.g. `Scalar::new(15, 1)` is 1.5.
    #[inline]
    pub fn new(mantissa: i64, scale: u32) -> Self {
        Self(Decimal::new(mantissa, scale))
    }

    /// Convert from a binary float.
    ///
    /// # Errors
    /// Returns `InvalidInput` for NaN, infinities and out-of-range values.
    pub fn from_f64(value: f64) -> NumericResult<Self> {
        Decimal::from_f64(value)
            .map(Self)
            .ok_or(NumericError::InvalidInput)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the underlying decimal.
    #[inline]
    pub const fn to_decimal(self) -> Decimal {
        self.0
    }

    /// Lossy conversion to a binary float (display and trigonometry only).
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    /// Exact zero check.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// `|self| < 1e-10`
    #[inline]
    pub fn is_near_zero(self) -> bool {
        self.is_near_zero_within(Self::TOLERANCE)
    }

    /// `|self| < eps`
    #[inline]
    pub fn is_near_zero_within(self, eps: Scalar) -> bool {
        self.0.abs() < eps.0
    }

    /// Check if value is negative.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Get absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `Overflow` if the result is out of range.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Overflow` if the result is out of range.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Checked multiplication. Digits beyond the 28th are rounded away.
    ///
    /// # Errors
    /// Returns `Overflow` if the result is out of range.
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        self.0
            .checked_mul(rhs.0)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Checked division.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero divisor, `Overflow` otherwise.
    #[inline]
    pub fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        if rhs.0.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        self.0
            .checked_div(rhs.0)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Square root at full decimal precision.
    ///
    /// # Errors
    /// Returns `NegativeSquareRoot` for negative input.
    pub fn sqrt(self) -> NumericResult<Self> {
        if self.is_negative() {
            return Err(NumericError::NegativeSquareRoot);
        }
        self.0
            .sqrt()
            .map(Self)
            .ok_or(NumericError::NegativeSquareRoot)
    }

    // ========================================================================
    // Rounding and Rendering
    // ========================================================================

    /// Round to `places` decimals, half-to-even.
    #[inline]
    pub fn round_dp(self, places: u32) -> Self {
        Self(self.0.round_dp(places))
    }

    /// Render rounded to `places` decimals.
    ///
    /// Integral results drop the fraction entirely (`2`, not `2.000`);
    /// everything else is padded to exactly `places` digits.
    pub fn render(self, places: u32) -> String {
        let rounded = self.0.round_dp(places);
        if rounded.is_zero() {
            return "0".to_string();
        }
        if rounded.fract().is_zero() {
            return rounded.trunc().normalize().to_string();
        }
        let mut padded = rounded;
        padded.rescale(places);
        padded.to_string()
    }

    /// Render with exactly `places` fractional digits, integral or not.
    pub fn render_fixed(self, places: u32) -> String {
        let mut rounded = self.0.round_dp(places);
        if rounded.is_zero() {
            rounded = Decimal::ZERO;
        }
        rounded.rescale(places);
        rounded.to_string()
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Neg for Scalar {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<Decimal> for Scalar {
    #[inline]
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Scalar> for Decimal {
    #[inline]
    fn from(value: Scalar) -> Self {
        value.0
    }
}

impl From<i32> for Scalar {
    #[inline]
    fn from(value: i32) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<i64> for Scalar {
    #[inline]
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<u32> for Scalar {
    #[inline]
    fn from(value: u32) -> Self {
        Self(Decimal::from(value))
    }
}

impl FromStr for Scalar {
    type Err = NumericError;

    /// Parse from a decimal string such as `"-0.125"` or `"42"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Self)
            .map_err(|_| NumericError::InvalidInput)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({})", self.0)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// Tests
// ============================================================================
