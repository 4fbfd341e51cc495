// ============================================================================
// Parametrization
// Solution set of an under-determined system: basepoint + span of directions
// ============================================================================

use super::errors::{LinalgError, LinalgResult};
use super::hyperplane::DEFAULT_DISPLAY_PRECISION;
use super::vector::Vector;
use crate::numeric::Scalar;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// The affine set `basepoint + Σ tᵢ · direction_vectors[i]` for free real `tᵢ`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Parametrization {
    basepoint: Vector,
    direction_vectors: Vec<Vector>,
}

impl Parametrization {
    /// # Errors
    /// Returns `DimensionMismatch` if a direction vector does not share the
    /// basepoint's dimension.
    pub fn new(basepoint: Vector, direction_vectors: Vec<Vector>) -> LinalgResult<Self> {
        let dimension = basepoint.dimension();
        if let Some(mismatch) = direction_vectors
            .iter()
            .find(|direction| direction.dimension() != dimension)
        {
            return Err(LinalgError::DimensionMismatch {
                expected: dimension,
                actual: mismatch.dimension(),
            });
        }
        Ok(Self {
            basepoint,
            direction_vectors,
        })
    }

    #[inline]
    pub fn basepoint(&self) -> &Vector {
        &self.basepoint
    }

    #[inline]
    pub fn direction_vectors(&self) -> &[Vector] {
        &self.direction_vectors
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.basepoint.dimension()
    }

    /// Number of free parameters `tᵢ`
    #[inline]
    pub fn free_variable_count(&self) -> usize {
        self.direction_vectors.len()
    }

    /// Evaluate the point for the given parameter values.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if `parameters` does not hold exactly one
    /// value per direction vector.
    pub fn point_at(&self, parameters: &[Scalar]) -> LinalgResult<Vector> {
        if parameters.len() != self.direction_vectors.len() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.direction_vectors.len(),
                actual: parameters.len(),
            });
        }
        self.direction_vectors
            .iter()
            .zip(parameters)
            .try_fold(self.basepoint.clone(), |point, (direction, &t)| {
                point.plus(&direction.times_scalar(t)?)
            })
    }
}

/// Deserialization goes through [`Parametrization::new`] so mismatched
/// dimensions are rejected.
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Parametrization {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Parts {
            basepoint: Vector,
            direction_vectors: Vec<Vector>,
        }

        let parts = Parts::deserialize(deserializer)?;
        Parametrization::new(parts.basepoint, parts.direction_vectors)
            .map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Parametrization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = DEFAULT_DISPLAY_PRECISION;
        for coordinate in 0..self.dimension() {
            if coordinate > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "x_{} = {}",
                coordinate + 1,
                self.basepoint[coordinate].render_fixed(places)
            )?;
            for (free_variable, direction) in self.direction_vectors.iter().enumerate() {
                write!(
                    f,
                    " + {} t_{}",
                    direction[coordinate].render_fixed(places),
                    free_variable + 1
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(coordinates: &[&str]) -> Vector {
        Vector::parse(coordinates).unwrap()
    }

    #[test]
    fn test_construction() {
        let parametrization =
            Parametrization::new(v(&["1", "0"]), vec![v(&["-1", "1"])]).unwrap();
        assert_eq!(parametrization.dimension(), 2);
        assert_eq!(parametrization.free_variable_count(), 1);
        assert_eq!(parametrization.basepoint(), &v(&["1", "0"]));
    }

    #[test]
    fn test_direction_dimension_mismatch() {
        let result = Parametrization::new(v(&["1", "0"]), vec![v(&["1", "0", "0"])]);
        assert_eq!(
            result,
            Err(LinalgError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_point_at() {
        let parametrization = Parametrization::new(
            v(&["1", "2", "0"]),
            vec![v(&["1", "0", "0"]), v(&["0", "-1", "1"])],
        )
        .unwrap();

        let point = parametrization
            .point_at(&[Scalar::from(2), Scalar::from(3)])
            .unwrap();
        assert_eq!(point, v(&["3", "-1", "3"]));

        assert!(parametrization.point_at(&[Scalar::ONE]).is_err());
    }

    #[test]
    fn test_display() {
        let parametrization =
            Parametrization::new(v(&["1", "0"]), vec![v(&["-1", "1"])]).unwrap();
        assert_eq!(
            parametrization.to_string(),
            "x_1 = 1.000 + -1.000 t_1\nx_2 = 0.000 + 1.000 t_1"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_checks_dimensions() {
        let parametrization =
            Parametrization::new(v(&["1", "0"]), vec![v(&["-1", "1"])]).unwrap();
        let json = serde_json::to_string(&parametrization).unwrap();
        let decoded: Parametrization = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, parametrization);

        let mismatched = r#"{"basepoint":["1","0"],"direction_vectors":[["1","0","0"]]}"#;
        assert!(serde_json::from_str::<Parametrization>(mismatched).is_err());
    }
}
