// ============================================================================
// Linear System
// Ordered equations of one dimension, plus the elementary row operations
// ============================================================================

use crate::domain::{Hyperplane, LinalgError, LinalgResult, SolverConfig};
use crate::interfaces::{NoOpObserver, RowOperation, RowOperationObserver};
use crate::numeric::Scalar;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

/// A system of linear equations, one [`Hyperplane`] per row.
///
/// Row operations mutate the system in place by replacing whole rows; the
/// elimination entry points ([`compute_triangular_form`], [`compute_rref`],
/// [`compute_solution`]) borrow the system and work on an owned copy.
///
/// [`compute_triangular_form`]: LinearSystem::compute_triangular_form
/// [`compute_rref`]: LinearSystem::compute_rref
/// [`compute_solution`]: LinearSystem::compute_solution
#[derive(Clone)]
pub struct LinearSystem {
    /// Equations, row index = equation index
    planes: Vec<Hyperplane>,

    /// Shared dimension of every row
    dimension: usize,

    /// Tolerance and rendering settings
    config: SolverConfig,

    /// Receives every completed row operation
    observer: Arc<dyn RowOperationObserver>,
}

impl LinearSystem {
    /// Create a system with the default configuration.
    ///
    /// # Errors
    /// - `EmptySystem` if `planes` is empty
    /// - `DimensionMismatch` if the rows do not share one dimension
    pub fn new(planes: Vec<Hyperplane>) -> LinalgResult<Self> {
        Self::with_config(planes, SolverConfig::default())
    }

    /// Create a system with an explicit configuration.
    ///
    /// # Errors
    /// `InvalidConfig` if `config` fails [`SolverConfig::validate`], then
    /// the same errors as [`LinearSystem::new`].
    pub fn with_config(planes: Vec<Hyperplane>, config: SolverConfig) -> LinalgResult<Self> {
        config.validate()?;

        let dimension = planes
            .first()
            .map(Hyperplane::dimension)
            .ok_or(LinalgError::EmptySystem)?;

        if let Some(mismatch) = planes.iter().find(|p| p.dimension() != dimension) {
            return Err(LinalgError::DimensionMismatch {
                expected: dimension,
                actual: mismatch.dimension(),
            });
        }

        Ok(Self {
            planes,
            dimension,
            config,
            observer: Arc::new(NoOpObserver),
        })
    }

    /// Attach an observer for row operations.
    pub fn with_observer(mut self, observer: Arc<dyn RowOperationObserver>) -> Self {
        self.observer = observer;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of equations
    #[inline]
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// Number of variables
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn planes(&self) -> &[Hyperplane] {
        &self.planes
    }

    #[inline]
    pub fn get(&self, row: usize) -> Option<&Hyperplane> {
        self.planes.get(row)
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    #[inline]
    pub fn tolerance(&self) -> Scalar {
        self.config.tolerance
    }

    /// Replace the equation at `row`.
    ///
    /// # Errors
    /// - `RowOutOfBounds` for a bad index
    /// - `DimensionMismatch` if `plane` lives in another dimension
    pub fn set_row(&mut self, row: usize, plane: Hyperplane) -> LinalgResult<()> {
        self.check_row(row)?;
        if plane.dimension() != self.dimension {
            return Err(LinalgError::DimensionMismatch {
                expected: self.dimension,
                actual: plane.dimension(),
            });
        }
        self.planes[row] = plane;
        Ok(())
    }

    // ========================================================================
    // Row Operations
    // ========================================================================

    pub fn swap_rows(&mut self, first: usize, second: usize) -> LinalgResult<()> {
        self.check_row(first)?;
        self.check_row(second)?;
        self.planes.swap(first, second);
        self.observer
            .on_operation(&RowOperation::Swapped { first, second });
        Ok(())
    }

    /// Replace `row` with `coefficient × row`. A zero coefficient is allowed
    /// and leaves a degenerate `0 = 0` row.
    pub fn multiply_coefficient_and_row(
        &mut self,
        coefficient: Scalar,
        row: usize,
    ) -> LinalgResult<()> {
        self.check_row(row)?;
        let plane = &self.planes[row];
        let normal_vector = plane.normal_vector().times_scalar(coefficient)?;
        let constant_term = plane.constant_term().checked_mul(coefficient)?;
        self.planes[row] = Hyperplane::new(normal_vector, constant_term);
        self.observer
            .on_operation(&RowOperation::Scaled { row, coefficient });
        Ok(())
    }

    /// Replace `target` with `coefficient × source + target`; `source` is
    /// unchanged.
    pub fn add_multiple_times_row_to_row(
        &mut self,
        coefficient: Scalar,
        source: usize,
        target: usize,
    ) -> LinalgResult<()> {
        self.check_row(source)?;
        self.check_row(target)?;
        let (source_plane, target_plane) = (&self.planes[source], &self.planes[target]);
        let normal_vector = source_plane
            .normal_vector()
            .times_scalar(coefficient)?
            .plus(target_plane.normal_vector())?;
        let constant_term = source_plane
            .constant_term()
            .checked_mul(coefficient)?
            .checked_add(target_plane.constant_term())?;
        self.planes[target] = Hyperplane::new(normal_vector, constant_term);
        self.observer.on_operation(&RowOperation::Added {
            coefficient,
            source,
            target,
        });
        Ok(())
    }

    /// Pivot column of each row, `None` for rows whose normal vector is
    /// entirely near zero.
    pub fn indices_of_first_nonzero_terms_in_each_row(&self) -> Vec<Option<usize>> {
        self.planes
            .iter()
            .map(|plane| {
                // NoNonzeroElements is the only failure: the row has no pivot
                Hyperplane::first_nonzero_index_within(plane.normal_vector(), self.tolerance())
                    .ok()
            })
            .collect()
    }

    /// Same shape and every coefficient within the configured tolerance.
    pub fn approx_eq(&self, other: &LinearSystem) -> bool {
        let eps = self.tolerance();
        self.len() == other.len()
            && self.dimension == other.dimension
            && self.planes.iter().zip(&other.planes).all(|(a, b)| {
                a.normal_vector().approx_eq_within(b.normal_vector(), eps)
                    && a.constant_term()
                        .checked_sub(b.constant_term())
                        .map(|diff| diff.is_near_zero_within(eps))
                        .unwrap_or(false)
            })
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    fn check_row(&self, row: usize) -> LinalgResult<()> {
        if row >= self.planes.len() {
            return Err(LinalgError::RowOutOfBounds {
                row,
                rows: self.planes.len(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Index<usize> for LinearSystem {
    type Output = Hyperplane;

    #[inline]
    fn index(&self, row: usize) -> &Self::Output {
        &self.planes[row]
    }
}

impl fmt::Debug for LinearSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearSystem")
            .field("planes", &self.planes)
            .field("dimension", &self.dimension)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for LinearSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Linear System:")?;
        for (i, plane) in self.planes.iter().enumerate() {
            write!(
                f,
                "\nEquation {}: {}",
                i + 1,
                plane.render(self.config.display_precision)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Plane, Vector};
    use crate::interfaces::RowOperationLog;

    fn plane(normal: [i32; 3], constant: i32) -> Plane {
        Plane::new(Vector::new(normal).unwrap(), constant)
    }

    fn sample_system() -> LinearSystem {
        LinearSystem::new(vec![
            plane([0, 1, 0], 2),
            plane([1, 1, 1], 1),
            plane([1, -1, 1], 3),
            plane([1, 0, -2], 2),
        ])
        .unwrap()
    }

    #[test]
    fn test_construction() {
        let system = sample_system();
        assert_eq!(system.len(), 4);
        assert_eq!(system.dimension(), 3);
        assert!(!system.is_empty());
        assert_eq!(system.get(4), None);
    }

    #[test]
    fn test_with_config_rejects_zero_tolerance() {
        let config = SolverConfig::default().with_tolerance(Scalar::ZERO);
        let result = LinearSystem::with_config(vec![plane([0, 1, 0], 2)], config);
        assert!(matches!(result, Err(LinalgError::InvalidConfig(_))));

        let relaxed = LinearSystem::with_config(vec![plane([0, 1, 0], 2)], SolverConfig::relaxed())
            .unwrap();
        assert_eq!(relaxed.tolerance(), SolverConfig::relaxed().tolerance);
    }

    #[test]
    fn test_empty_system_rejected() {
        assert_eq!(
            LinearSystem::new(Vec::new()).unwrap_err(),
            LinalgError::EmptySystem
        );
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let line = Plane::new(Vector::new([1, 1]).unwrap(), 1);
        let err = LinearSystem::new(vec![plane([1, 1, 1], 1), line]).unwrap_err();
        assert_eq!(
            err,
            LinalgError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_set_row_checks_dimension() {
        let mut system = sample_system();
        let line = Plane::new(Vector::new([1, 1]).unwrap(), 1);
        assert!(matches!(
            system.set_row(0, line),
            Err(LinalgError::DimensionMismatch { .. })
        ));
        assert_eq!(
            system.set_row(9, plane([1, 0, 0], 0)),
            Err(LinalgError::RowOutOfBounds { row: 9, rows: 4 })
        );
        system.set_row(0, plane([0, 0, 5], 5)).unwrap();
        assert_eq!(system[0], plane([0, 0, 1], 1));
    }

    #[test]
    fn test_row_operations() {
        let p0 = plane([0, 1, 0], 2);
        let p1 = plane([1, 1, 1], 1);
        let p2 = plane([1, -1, 1], 3);
        let p3 = plane([1, 0, -2], 2);
        let mut s = sample_system();

        s.swap_rows(0, 1).unwrap();
        assert!(s[0] == p1 && s[1] == p0 && s[2] == p2 && s[3] == p3);

        s.swap_rows(1, 3).unwrap();
        assert!(s[0] == p1 && s[1] == p3 && s[2] == p2 && s[3] == p0);

        s.swap_rows(3, 1).unwrap();
        assert!(s[0] == p1 && s[1] == p0 && s[2] == p2 && s[3] == p3);

        s.multiply_coefficient_and_row(Scalar::ONE, 0).unwrap();
        assert!(s[0] == p1 && s[1] == p0 && s[2] == p2 && s[3] == p3);

        s.multiply_coefficient_and_row(Scalar::NEGATIVE_ONE, 2).unwrap();
        assert!(s[0] == p1 && s[1] == p0 && s[2] == plane([-1, 1, -1], -3) && s[3] == p3);

        s.multiply_coefficient_and_row(Scalar::from(10), 1).unwrap();
        assert!(s[1] == plane([0, 10, 0], 20));

        s.add_multiple_times_row_to_row(Scalar::ZERO, 0, 1).unwrap();
        assert!(s[1] == plane([0, 10, 0], 20));

        s.add_multiple_times_row_to_row(Scalar::ONE, 0, 1).unwrap();
        assert!(s[0] == p1 && s[1] == plane([1, 11, 1], 21));

        s.add_multiple_times_row_to_row(Scalar::NEGATIVE_ONE, 1, 0).unwrap();
        assert!(s[0] == plane([0, -10, 0], -20) && s[1] == plane([1, 11, 1], 21));
    }

    #[test]
    fn test_multiply_by_zero_gives_degenerate_row() {
        let mut s = sample_system();
        s.multiply_coefficient_and_row(Scalar::ZERO, 1).unwrap();
        assert_eq!(s[1].normal_vector(), &Vector::zero(3).unwrap());
        assert_eq!(s[1].constant_term(), Scalar::ZERO);
        assert_eq!(s.indices_of_first_nonzero_terms_in_each_row()[1], None);
    }

    #[test]
    fn test_row_out_of_bounds() {
        let mut s = sample_system();
        assert_eq!(
            s.swap_rows(0, 4),
            Err(LinalgError::RowOutOfBounds { row: 4, rows: 4 })
        );
        assert!(s.add_multiple_times_row_to_row(Scalar::ONE, 7, 0).is_err());
    }

    #[test]
    fn test_pivot_indices() {
        let s = LinearSystem::new(vec![
            plane([1, 1, 1], 1),
            plane([0, 0, 2], 2),
            plane([0, 0, 0], 0),
        ])
        .unwrap();
        assert_eq!(
            s.indices_of_first_nonzero_terms_in_each_row(),
            vec![Some(0), Some(2), None]
        );
    }

    #[test]
    fn test_observer_sees_operations() {
        let log = Arc::new(RowOperationLog::new());
        let mut s = sample_system().with_observer(log.clone());

        s.swap_rows(0, 1).unwrap();
        s.multiply_coefficient_and_row(Scalar::from(2), 0).unwrap();
        s.add_multiple_times_row_to_row(Scalar::NEGATIVE_ONE, 0, 2).unwrap();

        assert_eq!(
            log.operations(),
            vec![
                RowOperation::Swapped {
                    first: 0,
                    second: 1
                },
                RowOperation::Scaled {
                    row: 0,
                    coefficient: Scalar::from(2)
                },
                RowOperation::Added {
                    coefficient: Scalar::NEGATIVE_ONE,
                    source: 0,
                    target: 2
                },
            ]
        );
    }

    #[test]
    fn test_display() {
        let s = LinearSystem::new(vec![plane([1, 1, 0], 3), plane([1, -1, 0], 1)]).unwrap();
        assert_eq!(
            s.to_string(),
            "Linear System:\nEquation 1: x_1 + x_2 = 3\nEquation 2: x_1 - x_2 = 1"
        );
    }
}
