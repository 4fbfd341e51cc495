// ============================================================================
// Linear Algebra Errors
// Construction and undefined-operation failures
// ============================================================================

use crate::numeric::NumericError;
use std::fmt;

/// Errors raised by vector, hyperplane and linear-system operations.
///
/// Solution-space outcomes (no solutions, infinitely many) are not errors;
/// they are reported through [`crate::engine::Solution`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinalgError {
    /// A vector was built from zero coordinates
    EmptyCoordinates,
    /// A coordinate could not be read as a number
    InvalidCoordinate { index: usize, value: String },
    /// Operands or rows live in different dimensions
    DimensionMismatch { expected: usize, actual: usize },
    /// Operation is not defined in this dimension
    UnsupportedDimension {
        operation: &'static str,
        dimension: usize,
    },
    /// Normalizing or measuring an angle against the zero vector
    ZeroVector,
    /// Projection onto the zero vector
    NoUniqueParallelComponent,
    /// Orthogonal complement against the zero vector
    NoUniqueOrthogonalComponent,
    /// Every coordinate of the scanned vector is near zero
    NoNonzeroElements,
    /// A linear system needs at least one equation
    EmptySystem,
    /// Row index outside the system
    RowOutOfBounds { row: usize, rows: usize },
    /// Solver configuration failed validation
    InvalidConfig(String),
    /// Underlying decimal arithmetic failed
    Numeric(NumericError),
}

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinalgError::EmptyCoordinates => write!(f, "the coordinates must be nonempty"),
            LinalgError::InvalidCoordinate { index, value } => {
                write!(f, "coordinate {} is not a number: {:?}", index, value)
            },
            LinalgError::DimensionMismatch { expected, actual } => write!(
                f,
                "dimension mismatch: expected {}, got {}",
                expected, actual
            ),
            LinalgError::UnsupportedDimension {
                operation,
                dimension,
            } => write!(
                f,
                "{} is not defined in dimension {}",
                operation, dimension
            ),
            LinalgError::ZeroVector => write!(f, "operation is undefined for the zero vector"),
            LinalgError::NoUniqueParallelComponent => {
                write!(f, "no unique parallel component")
            },
            LinalgError::NoUniqueOrthogonalComponent => {
                write!(f, "no unique orthogonal component")
            },
            LinalgError::NoNonzeroElements => write!(f, "no nonzero elements found"),
            LinalgError::EmptySystem => {
                write!(f, "a linear system needs at least one equation")
            },
            LinalgError::RowOutOfBounds { row, rows } => {
                write!(f, "row {} out of bounds for a system of {} rows", row, rows)
            },
            LinalgError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
            LinalgError::Numeric(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LinalgError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinalgError::Numeric(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NumericError> for LinalgError {
    fn from(err: NumericError) -> Self {
        LinalgError::Numeric(err)
    }
}

/// Result type alias for linear algebra operations
pub type LinalgResult<T> = Result<T, LinalgError>;
