// ============================================================================
// Vector Domain Model
// Immutable n-dimensional coordinate tuple over Scalar
// ============================================================================

use super::errors::{LinalgError, LinalgResult};
use crate::numeric::{NumericResult, Scalar};
use arrayvec::ArrayVec;
use smallvec::SmallVec;
use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unit for [`Vector::angle_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Radians,
    Degrees,
}

/// Immutable coordinate tuple.
///
/// Every operation returns a new `Vector`. Equality is exact and
/// coordinate-wise; use [`Vector::approx_eq`] for tolerance-based checks.
///
/// # Example
/// ```
/// use linsys::domain::Vector;
/// use linsys::numeric::Scalar;
///
/// let v = Vector::new([1, 2, 3]).unwrap();
/// let w = Vector::new([4, 5, 6]).unwrap();
/// assert_eq!(v.plus(&w).unwrap(), Vector::new([5, 7, 9]).unwrap());
/// assert_eq!(v.dot(&w).unwrap(), Scalar::from(32));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<Scalar>", into = "Vec<Scalar>")
)]
pub struct Vector {
    coordinates: SmallVec<[Scalar; 4]>,
}

impl Vector {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a vector from any sequence of number-like values.
    ///
    /// # Errors
    /// Returns `EmptyCoordinates` if the sequence is empty.
    pub fn new<I, T>(coordinates: I) -> LinalgResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        let coordinates: SmallVec<[Scalar; 4]> =
            coordinates.into_iter().map(Into::into).collect();
        if coordinates.is_empty() {
            return Err(LinalgError::EmptyCoordinates);
        }
        Ok(Self { coordinates })
    }

    /// Parse coordinates from decimal strings such as `["1.5", "-2"]`.
    ///
    /// # Errors
    /// Returns `InvalidCoordinate` for the first entry that is not a number,
    /// `EmptyCoordinates` for an empty slice.
    pub fn parse(coordinates: &[&str]) -> LinalgResult<Self> {
        let parsed = coordinates
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                raw.parse::<Scalar>()
                    .map_err(|_| LinalgError::InvalidCoordinate {
                        index,
                        value: (*raw).to_string(),
                    })
            })
            .collect::<LinalgResult<Vec<_>>>()?;
        Self::new(parsed)
    }

    /// The zero vector of the given dimension.
    pub fn zero(dimension: usize) -> LinalgResult<Self> {
        Self::new(std::iter::repeat(Scalar::ZERO).take(dimension))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    #[inline]
    pub fn coordinates(&self) -> &[Scalar] {
        &self.coordinates
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Scalar> {
        self.coordinates.get(index).copied()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Scalar> + '_ {
        self.coordinates.iter().copied()
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    pub fn plus(&self, other: &Vector) -> LinalgResult<Vector> {
        self.zip_with(other, Scalar::checked_add)
    }

    pub fn minus(&self, other: &Vector) -> LinalgResult<Vector> {
        self.zip_with(other, Scalar::checked_sub)
    }

    pub fn times_scalar(&self, factor: Scalar) -> LinalgResult<Vector> {
        self.map(|x| x.checked_mul(factor))
    }

    pub fn dot(&self, other: &Vector) -> LinalgResult<Scalar> {
        self.ensure_same_dimension(other)?;
        self.iter()
            .zip(other.iter())
            .try_fold(Scalar::ZERO, |acc, (x, y)| acc.checked_add(x.checked_mul(y)?))
            .map_err(LinalgError::from)
    }

    /// Euclidean norm.
    pub fn magnitude(&self) -> LinalgResult<Scalar> {
        Ok(self.dot(self)?.sqrt()?)
    }

    /// Unit vector in the same direction.
    ///
    /// # Errors
    /// Returns `ZeroVector` if the magnitude is near zero.
    pub fn normalized(&self) -> LinalgResult<Vector> {
        let magnitude = self.magnitude()?;
        if magnitude.is_near_zero() {
            return Err(LinalgError::ZeroVector);
        }
        self.map(|x| x.checked_div(magnitude))
    }

    // ========================================================================
    // Predicates
    // ========================================================================

    /// Magnitude below tolerance. A vector too large to measure is not zero.
    pub fn is_zero(&self) -> bool {
        self.magnitude()
            .map(|magnitude| magnitude.is_near_zero())
            .unwrap_or(false)
    }

    /// The zero vector is parallel to everything; otherwise the angle
    /// between the two must be 0 or π within tolerance.
    pub fn is_parallel_to(&self, other: &Vector) -> LinalgResult<bool> {
        self.ensure_same_dimension(other)?;
        if self.is_zero() || other.is_zero() {
            return Ok(true);
        }
        // Lagrange identity: sin²θ = (|u|²|v|² - (u·v)²) / (|u|²|v|²),
        // on copies with every coordinate in [-1, 1]
        let u = self.scaled_by_largest_coordinate()?;
        let w = other.scaled_by_largest_coordinate()?;
        let squared_norms = u.dot(&u)?.checked_mul(w.dot(&w)?)?;
        let dot = u.dot(&w)?;
        let sine_squared = squared_norms
            .checked_sub(dot.checked_mul(dot)?)?
            .checked_div(squared_norms)?;
        let threshold = Scalar::TOLERANCE.checked_mul(Scalar::TOLERANCE)?;
        Ok(sine_squared.is_near_zero_within(threshold))
    }

    pub fn is_orthogonal_to(&self, other: &Vector) -> LinalgResult<bool> {
        Ok(self.dot(other)?.is_near_zero())
    }

    /// Coordinate-wise comparison within the default tolerance.
    pub fn approx_eq(&self, other: &Vector) -> bool {
        self.approx_eq_within(other, Scalar::TOLERANCE)
    }

    pub fn approx_eq_within(&self, other: &Vector, eps: Scalar) -> bool {
        self.dimension() == other.dimension()
            && self.iter().zip(other.iter()).all(|(x, y)| {
                x.checked_sub(y)
                    .map(|diff| diff.is_near_zero_within(eps))
                    .unwrap_or(false)
            })
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Angle between two non-zero vectors.
    ///
    /// # Errors
    /// Returns `ZeroVector` if either operand is the zero vector.
    pub fn angle_with(&self, other: &Vector, unit: AngleUnit) -> LinalgResult<Scalar> {
        self.ensure_same_dimension(other)?;
        if self.is_zero() || other.is_zero() {
            return Err(LinalgError::ZeroVector);
        }
        let radians = self.cosine_with(other)?.to_f64().acos();
        let angle = match unit {
            AngleUnit::Radians => radians,
            AngleUnit::Degrees => radians.to_degrees(),
        };
        Ok(Scalar::from_f64(angle)?)
    }

    /// Cross product for 2-D or 3-D operands. 2-D inputs get a zero third
    /// coordinate; the result is always 3-D.
    ///
    /// # Errors
    /// - `UnsupportedDimension` if either operand is not 2-D or 3-D
    /// - `DimensionMismatch` if the operands differ in dimension
    pub fn cross(&self, other: &Vector) -> LinalgResult<Vector> {
        let a = self.promote_to_3d()?;
        let b = other.promote_to_3d()?;
        self.ensure_same_dimension(other)?;

        let x = a[1].checked_mul(b[2])?.checked_sub(b[1].checked_mul(a[2])?)?;
        let y = b[0].checked_mul(a[2])?.checked_sub(a[0].checked_mul(b[2])?)?;
        let z = a[0].checked_mul(b[1])?.checked_sub(b[0].checked_mul(a[1])?)?;
        Vector::new([x, y, z])
    }

    pub fn area_of_parallelogram_with(&self, other: &Vector) -> LinalgResult<Scalar> {
        self.cross(other)?.magnitude()
    }

    pub fn area_of_triangle_with(&self, other: &Vector) -> LinalgResult<Scalar> {
        Ok(self
            .area_of_parallelogram_with(other)?
            .checked_div(Scalar::from(2))?)
    }

    /// Projection of `self` onto `basis`.
    ///
    /// # Errors
    /// Returns `NoUniqueParallelComponent` if `basis` is the zero vector.
    pub fn component_parallel_to(&self, basis: &Vector) -> LinalgResult<Vector> {
        self.ensure_same_dimension(basis)?;
        if basis.is_zero() {
            return Err(LinalgError::NoUniqueParallelComponent);
        }
        let unit = basis.normalized()?;
        let weight = self.dot(&unit)?;
        unit.times_scalar(weight)
    }

    /// Component of `self` orthogonal to `basis`.
    ///
    /// # Errors
    /// Returns `NoUniqueOrthogonalComponent` if `basis` is the zero vector.
    pub fn component_orthogonal_to(&self, basis: &Vector) -> LinalgResult<Vector> {
        match self.component_parallel_to(basis) {
            Ok(projection) => self.minus(&projection),
            Err(LinalgError::NoUniqueParallelComponent) => {
                Err(LinalgError::NoUniqueOrthogonalComponent)
            },
            Err(err) => Err(err),
        }
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    fn ensure_same_dimension(&self, other: &Vector) -> LinalgResult<()> {
        if self.dimension() != other.dimension() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.dimension(),
                actual: other.dimension(),
            });
        }
        Ok(())
    }

    fn map<F>(&self, f: F) -> LinalgResult<Vector>
    where
        F: Fn(Scalar) -> NumericResult<Scalar>,
    {
        let coordinates = self
            .iter()
            .map(f)
            .collect::<NumericResult<SmallVec<[Scalar; 4]>>>()?;
        Ok(Self { coordinates })
    }

    fn zip_with<F>(&self, other: &Vector, f: F) -> LinalgResult<Vector>
    where
        F: Fn(Scalar, Scalar) -> NumericResult<Scalar>,
    {
        self.ensure_same_dimension(other)?;
        let coordinates = self
            .iter()
            .zip(other.iter())
            .map(|(x, y)| f(x, y))
            .collect::<NumericResult<SmallVec<[Scalar; 4]>>>()?;
        Ok(Self { coordinates })
    }

    /// cos θ clamped to [-1, 1]; both operands must be non-zero.
    fn cosine_with(&self, other: &Vector) -> LinalgResult<Scalar> {
        let u = self.scaled_by_largest_coordinate()?;
        let w = other.scaled_by_largest_coordinate()?;
        let denominator = u.magnitude()?.checked_mul(w.magnitude()?)?;
        let cosine = u.dot(&w)?.checked_div(denominator)?;
        Ok(cosine.clamp(Scalar::NEGATIVE_ONE, Scalar::ONE))
    }

    /// Same direction, largest coordinate magnitude exactly one. Keeps
    /// squared and fourth-power terms in range for huge coordinates.
    fn scaled_by_largest_coordinate(&self) -> LinalgResult<Vector> {
        let largest = self.iter().map(Scalar::abs).max().unwrap_or(Scalar::ZERO);
        if largest.is_zero() {
            return Err(LinalgError::ZeroVector);
        }
        self.map(|x| x.checked_div(largest))
    }

    fn promote_to_3d(&self) -> LinalgResult<ArrayVec<Scalar, 3>> {
        match self.dimension() {
            2 | 3 => {
                let mut promoted: ArrayVec<Scalar, 3> = self.iter().collect();
                if promoted.len() == 2 {
                    promoted.push(Scalar::ZERO);
                }
                Ok(promoted)
            },
            dimension => Err(LinalgError::UnsupportedDimension {
                operation: "cross product",
                dimension,
            }),
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Index<usize> for Vector {
    type Output = Scalar;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.coordinates[index]
    }
}

impl TryFrom<Vec<Scalar>> for Vector {
    type Error = LinalgError;

    fn try_from(coordinates: Vec<Scalar>) -> Result<Self, Self::Error> {
        Self::new(coordinates)
    }
}

impl From<Vector> for Vec<Scalar> {
    fn from(vector: Vector) -> Self {
        vector.coordinates.into_vec()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector: (")?;
        for (i, coordinate) in self.coordinates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", coordinate)?;
        }
        write!(f, ")")
    }
}
