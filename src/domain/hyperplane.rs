// ============================================================================
// Hyperplane Domain Model
// Normal vector + constant term: the points x with n · x = k
// ============================================================================

use super::errors::{LinalgError, LinalgResult};
use super::vector::Vector;
use crate::numeric::Scalar;
use std::cell::OnceCell;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decimal places used by `Display`
pub const DEFAULT_DISPLAY_PRECISION: u32 = 3;

/// A hyperplane in two dimensions
pub type Line = Hyperplane;

/// A hyperplane in three dimensions
pub type Plane = Hyperplane;

/// Outcome of intersecting two lines in the plane
#[derive(Debug, Clone, PartialEq)]
pub enum LineIntersection {
    /// The lines cross in exactly one point
    Point(Vector),
    /// The lines are the same line
    Coincident(Line),
    /// Parallel, distinct lines
    Disjoint,
}

/// Affine hyperplane `normal_vector · x = constant_term`.
///
/// Immutable once built. Row operations on a
/// [`LinearSystem`](crate::engine::LinearSystem) produce new hyperplanes.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hyperplane {
    normal_vector: Vector,
    constant_term: Scalar,
    #[cfg_attr(feature = "serde", serde(skip))]
    basepoint: OnceCell<LinalgResult<Option<Vector>>>,
}

impl Hyperplane {
    pub fn new(normal_vector: Vector, constant_term: impl Into<Scalar>) -> Self {
        Self {
            normal_vector,
            constant_term: constant_term.into(),
            basepoint: OnceCell::new(),
        }
    }

    /// Build with defaults: a missing normal vector is the zero vector of
    /// `dimension`, a missing constant term is zero.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the supplied normal vector does not
    /// live in `dimension`, `EmptyCoordinates` if `dimension` is zero.
    pub fn from_optional(
        dimension: usize,
        normal_vector: Option<Vector>,
        constant_term: Option<Scalar>,
    ) -> LinalgResult<Self> {
        let normal_vector = match normal_vector {
            Some(normal) if normal.dimension() != dimension => {
                return Err(LinalgError::DimensionMismatch {
                    expected: dimension,
                    actual: normal.dimension(),
                });
            },
            Some(normal) => normal,
            None => Vector::zero(dimension)?,
        };
        Ok(Self::new(
            normal_vector,
            constant_term.unwrap_or(Scalar::ZERO),
        ))
    }

    /// `0 = 0` in the given dimension.
    pub fn zero(dimension: usize) -> LinalgResult<Self> {
        Self::from_optional(dimension, None, None)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn normal_vector(&self) -> &Vector {
        &self.normal_vector
    }

    #[inline]
    pub fn constant_term(&self) -> Scalar {
        self.constant_term
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.normal_vector.dimension()
    }

    /// One point on the hyperplane, computed on first access.
    ///
    /// The point is zero everywhere except at the first non-zero coefficient
    /// `k`, where it is `constant_term / normal_vector[k]`. `None` when the
    /// normal vector is entirely near zero.
    pub fn basepoint(&self) -> LinalgResult<Option<&Vector>> {
        match self.basepoint.get_or_init(|| self.compute_basepoint()) {
            Ok(point) => Ok(point.as_ref()),
            Err(err) => Err(err.clone()),
        }
    }

    fn compute_basepoint(&self) -> LinalgResult<Option<Vector>> {
        let initial_index = match Self::first_nonzero_index(&self.normal_vector) {
            Ok(index) => index,
            Err(LinalgError::NoNonzeroElements) => return Ok(None),
            Err(err) => return Err(err),
        };
        let initial_coefficient = self.normal_vector[initial_index];
        let mut coordinates = vec![Scalar::ZERO; self.dimension()];
        coordinates[initial_index] = self.constant_term.checked_div(initial_coefficient)?;
        Ok(Some(Vector::new(coordinates)?))
    }

    /// Index of the first coordinate whose magnitude reaches the tolerance.
    ///
    /// # Errors
    /// Returns `NoNonzeroElements` if every coordinate is near zero.
    pub fn first_nonzero_index(vector: &Vector) -> LinalgResult<usize> {
        Self::first_nonzero_index_within(vector, Scalar::TOLERANCE)
    }

    pub fn first_nonzero_index_within(vector: &Vector, eps: Scalar) -> LinalgResult<usize> {
        vector
            .iter()
            .position(|coordinate| !coordinate.is_near_zero_within(eps))
            .ok_or(LinalgError::NoNonzeroElements)
    }

    // ========================================================================
    // Relations
    // ========================================================================

    pub fn is_parallel_to(&self, other: &Hyperplane) -> LinalgResult<bool> {
        self.normal_vector.is_parallel_to(&other.normal_vector)
    }

    /// Same affine subspace, not merely parallel.
    ///
    /// Two degenerate hyperplanes (near-zero normal vectors) are equal when
    /// their constant terms agree within tolerance. A degenerate hyperplane
    /// never equals a proper one.
    pub fn is_same_as(&self, other: &Hyperplane) -> LinalgResult<bool> {
        match (self.normal_vector.is_zero(), other.normal_vector.is_zero()) {
            (true, true) => Ok(self
                .constant_term
                .checked_sub(other.constant_term)?
                .is_near_zero()),
            (true, false) | (false, true) => Ok(false),
            (false, false) => {
                if !self.is_parallel_to(other)? {
                    return Ok(false);
                }
                let (Some(own), Some(theirs)) = (self.basepoint()?, other.basepoint()?) else {
                    return Ok(false);
                };
                own.minus(theirs)?.is_orthogonal_to(&self.normal_vector)
            },
        }
    }

    /// `normal_vector · point = constant_term` within tolerance.
    pub fn is_satisfied_by(&self, point: &Vector) -> LinalgResult<bool> {
        Ok(self
            .normal_vector
            .dot(point)?
            .checked_sub(self.constant_term)?
            .is_near_zero())
    }

    /// Intersect two lines in the plane.
    ///
    /// Parallel lines yield `Coincident` when they are the same line and
    /// `Disjoint` otherwise; crossing lines are solved with Cramer's rule.
    ///
    /// # Errors
    /// Returns `UnsupportedDimension` unless both operands are 2-D.
    pub fn intersection_with(&self, other: &Line) -> LinalgResult<LineIntersection> {
        for dimension in [self.dimension(), other.dimension()] {
            if dimension != 2 {
                return Err(LinalgError::UnsupportedDimension {
                    operation: "line intersection",
                    dimension,
                });
            }
        }

        if self.is_parallel_to(other)? {
            return Ok(if self.is_same_as(other)? {
                LineIntersection::Coincident(self.clone())
            } else {
                LineIntersection::Disjoint
            });
        }

        let (a, b) = (self.normal_vector[0], self.normal_vector[1]);
        let (c, d) = (other.normal_vector[0], other.normal_vector[1]);
        let (k1, k2) = (self.constant_term, other.constant_term);

        let determinant = a.checked_mul(d)?.checked_sub(b.checked_mul(c)?)?;
        let x = d
            .checked_mul(k1)?
            .checked_sub(b.checked_mul(k2)?)?
            .checked_div(determinant)?;
        let y = a
            .checked_mul(k2)?
            .checked_sub(c.checked_mul(k1)?)?
            .checked_div(determinant)?;
        Ok(LineIntersection::Point(Vector::new([x, y])?))
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Equation text with coefficients rounded to `places` decimals, e.g.
    /// `x_1 - 2x_2 + 0.500x_3 = 4`.
    pub fn render(&self, places: u32) -> String {
        let terms = self
            .normal_vector
            .iter()
            .enumerate()
            .filter(|(_, coefficient)| !coefficient.round_dp(places).is_zero())
            .enumerate()
            .map(|(position, (i, coefficient))| {
                format!(
                    "{}x_{}",
                    render_coefficient(coefficient, position == 0, places),
                    i + 1
                )
            })
            .collect::<Vec<_>>();

        let lhs = if terms.is_empty() {
            "0".to_string()
        } else {
            terms.join(" ")
        };
        format!("{} = {}", lhs, self.constant_term.render(places))
    }
}

/// Sign and magnitude of one term. Unit coefficients drop the numeral, the
/// leading term carries a bare `-`, later terms are `+ ` or `- ` prefixed.
fn render_coefficient(coefficient: Scalar, is_initial_term: bool, places: u32) -> String {
    let rounded = coefficient.round_dp(places);
    let mut output = String::new();

    if rounded.is_negative() {
        output.push('-');
    } else if !is_initial_term {
        output.push('+');
    }

    if !is_initial_term {
        output.push(' ');
    }

    if rounded.abs() != Scalar::ONE {
        output.push_str(&rounded.abs().render(places));
    }

    output
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl PartialEq for Hyperplane {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_as(other).unwrap_or(false)
    }
}

impl fmt::Display for Hyperplane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(DEFAULT_DISPLAY_PRECISION))
    }
}
