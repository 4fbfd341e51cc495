// ============================================================================
// Solution Extraction
// Classifies an RREF system and reads off its solution set
// ============================================================================

use super::linear_system::LinearSystem;
use crate::domain::{LinalgResult, Parametrization, Vector};
use crate::numeric::Scalar;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape of a system's solution set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolutionStatus {
    Unique,
    NoSolutions,
    InfiniteSolutions,
}

/// Result of solving a linear system.
///
/// Contradictory and under-determined systems are ordinary outcomes, not
/// errors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Solution {
    /// Exactly one point satisfies every equation
    Unique(Vector),
    /// The solutions form the affine set described by the parametrization
    Infinite(Parametrization),
    /// Some equation reduces to `0 = k` with `k ≠ 0`
    NoSolutions,
}

impl Solution {
    pub fn status(&self) -> SolutionStatus {
        match self {
            Solution::Unique(_) => SolutionStatus::Unique,
            Solution::Infinite(_) => SolutionStatus::InfiniteSolutions,
            Solution::NoSolutions => SolutionStatus::NoSolutions,
        }
    }

    pub fn as_unique(&self) -> Option<&Vector> {
        match self {
            Solution::Unique(point) => Some(point),
            _ => None,
        }
    }

    pub fn as_parametrization(&self) -> Option<&Parametrization> {
        match self {
            Solution::Infinite(parametrization) => Some(parametrization),
            _ => None,
        }
    }
}

impl LinearSystem {
    /// Solve the system by Gaussian elimination.
    ///
    /// The system itself is not modified. A contradiction (`0 = k`, `k ≠ 0`)
    /// wins over a pivot shortage; with neither, the unique solution is read
    /// from the constant terms of the pivot rows.
    pub fn compute_solution(&self) -> LinalgResult<Solution> {
        tracing::debug!(
            equations = self.len(),
            dimension = self.dimension(),
            "Computing solution"
        );

        let rref = self.compute_rref()?;
        let solution = match rref.classify_rref() {
            SolutionStatus::NoSolutions => Solution::NoSolutions,
            SolutionStatus::InfiniteSolutions => {
                Solution::Infinite(rref.extract_parametrization()?)
            },
            SolutionStatus::Unique => Solution::Unique(rref.extract_unique_solution()?),
        };

        tracing::debug!(status = ?solution.status(), "Solution computed");
        Ok(solution)
    }

    /// Classify the solution set without building it.
    pub fn compute_solution_status(&self) -> LinalgResult<SolutionStatus> {
        Ok(self.compute_rref()?.classify_rref())
    }

    // ========================================================================
    // Private methods (all expect `self` to be in RREF)
    // ========================================================================

    fn classify_rref(&self) -> SolutionStatus {
        if self.has_contradictory_equation() {
            SolutionStatus::NoSolutions
        } else if self.has_too_few_pivots() {
            SolutionStatus::InfiniteSolutions
        } else {
            SolutionStatus::Unique
        }
    }

    fn has_contradictory_equation(&self) -> bool {
        let tolerance = self.tolerance();
        self.indices_of_first_nonzero_terms_in_each_row()
            .iter()
            .zip(self.planes())
            .any(|(pivot, plane)| {
                pivot.is_none() && !plane.constant_term().is_near_zero_within(tolerance)
            })
    }

    fn has_too_few_pivots(&self) -> bool {
        let pivot_count = self
            .indices_of_first_nonzero_terms_in_each_row()
            .iter()
            .filter(|pivot| pivot.is_some())
            .count();
        pivot_count < self.dimension()
    }

    fn extract_unique_solution(&self) -> LinalgResult<Vector> {
        let mut coordinates = vec![Scalar::ZERO; self.dimension()];
        for (row, pivot) in self
            .indices_of_first_nonzero_terms_in_each_row()
            .into_iter()
            .enumerate()
        {
            if let Some(col) = pivot {
                coordinates[col] = self[row].constant_term();
            }
        }
        Vector::new(coordinates)
    }

    /// Free variables are the columns that never hold a pivot. Each one gets
    /// a direction vector with 1 in its own slot and minus its coefficient in
    /// every pivot row's slot.
    fn extract_parametrization(&self) -> LinalgResult<Parametrization> {
        let dimension = self.dimension();
        let pivots = self.indices_of_first_nonzero_terms_in_each_row();
        let mut is_pivot_column = vec![false; dimension];
        for &col in pivots.iter().flatten() {
            is_pivot_column[col] = true;
        }

        let mut direction_vectors = Vec::new();
        for free in (0..dimension).filter(|&col| !is_pivot_column[col]) {
            let mut coordinates = vec![Scalar::ZERO; dimension];
            coordinates[free] = Scalar::ONE;
            for (row, pivot) in pivots.iter().enumerate() {
                if let Some(col) = *pivot {
                    coordinates[col] = -self[row].normal_vector()[free];
                }
            }
            direction_vectors.push(Vector::new(coordinates)?);
        }

        let mut basepoint = vec![Scalar::ZERO; dimension];
        for (row, pivot) in pivots.iter().enumerate() {
            if let Some(col) = *pivot {
                basepoint[col] = self[row].constant_term();
            }
        }

        Parametrization::new(Vector::new(basepoint)?, direction_vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Hyperplane, Line, Plane};
    use proptest::prelude::*;

    fn v(coordinates: &[&str]) -> Vector {
        Vector::parse(coordinates).unwrap()
    }

    fn p(normal: &[&str], constant: &str) -> Plane {
        Plane::new(v(normal), constant.parse::<Scalar>().unwrap())
    }

    fn assert_satisfies_all(system: &LinearSystem, point: &Vector) {
        for plane in system.planes() {
            assert!(
                plane.is_satisfied_by(point).unwrap(),
                "{} not satisfied by {}",
                plane,
                point
            );
        }
    }

    #[test]
    fn test_unique_solution_two_lines() {
        let system = LinearSystem::new(vec![
            Line::new(v(&["1", "1"]), 3),
            Line::new(v(&["1", "-1"]), 1),
        ])
        .unwrap();

        let solution = system.compute_solution().unwrap();
        assert_eq!(solution.status(), SolutionStatus::Unique);
        assert!(solution.as_unique().unwrap().approx_eq(&v(&["2", "1"])));
    }

    #[test]
    fn test_no_solution_two_lines() {
        let system = LinearSystem::new(vec![
            Line::new(v(&["1", "1"]), 1),
            Line::new(v(&["1", "1"]), 2),
        ])
        .unwrap();

        assert_eq!(system.compute_solution().unwrap(), Solution::NoSolutions);
        assert_eq!(
            system.compute_solution_status().unwrap(),
            SolutionStatus::NoSolutions
        );
    }

    #[test]
    fn test_single_line_is_parametrized() {
        let system = LinearSystem::new(vec![Line::new(v(&["1", "1"]), 1)]).unwrap();

        let solution = system.compute_solution().unwrap();
        let parametrization = solution.as_parametrization().unwrap();
        assert_eq!(parametrization.basepoint(), &v(&["1", "0"]));
        assert_eq!(parametrization.direction_vectors(), &[v(&["-1", "1"])]);
    }

    #[test]
    fn test_inconsistent_planes() {
        let system = LinearSystem::new(vec![
            p(&["5.862", "1.178", "-10.366"], "-8.15"),
            p(&["-2.931", "-0.589", "5.183"], "-4.075"),
        ])
        .unwrap();
        assert_eq!(system.compute_solution().unwrap(), Solution::NoSolutions);
    }

    #[test]
    fn test_overdetermined_consistent_planes() {
        let system = LinearSystem::new(vec![
            p(&["5.262", "2.739", "-9.878"], "-3.441"),
            p(&["5.111", "6.358", "7.638"], "-2.152"),
            p(&["2.016", "-9.924", "-1.367"], "-9.278"),
            p(&["2.167", "-13.543", "-18.883"], "-10.567"),
        ])
        .unwrap();

        let solution = system.compute_solution().unwrap();
        let point = solution.as_unique().unwrap();
        assert!(point.approx_eq_within(&v(&["-1.177", "0.707", "-0.083"]), Scalar::new(5, 3)));
        assert_satisfies_all(&system, point);
    }

    #[test]
    fn test_parametrization_one_free_variable() {
        let system = LinearSystem::new(vec![
            p(&["0.786", "0.786", "0.588"], "-0.714"),
            p(&["-0.138", "-0.138", "0.244"], "0.319"),
        ])
        .unwrap();

        let solution = system.compute_solution().unwrap();
        let parametrization = solution.as_parametrization().unwrap();
        assert_eq!(parametrization.free_variable_count(), 1);
        assert_eq!(parametrization.basepoint()[1], Scalar::ZERO);
        assert_satisfies_all(&system, parametrization.basepoint());
        assert!(parametrization.direction_vectors()[0].approx_eq(&v(&["-1", "1", "0"])));
    }

    #[test]
    fn test_parametrization_redundant_equation() {
        let system = LinearSystem::new(vec![
            p(&["8.631", "5.112", "-1.816"], "-5.113"),
            p(&["4.315", "11.132", "-5.27"], "-6.775"),
            p(&["-2.158", "3.01", "-1.727"], "-0.831"),
        ])
        .unwrap();

        let solution = system.compute_solution().unwrap();
        let parametrization = solution.as_parametrization().unwrap();
        let eps = Scalar::new(1, 3);
        assert!(parametrization
            .basepoint()
            .approx_eq_within(&v(&["-0.301", "-0.492", "0"]), eps));
        assert!(parametrization.direction_vectors()[0]
            .approx_eq_within(&v(&["-0.091", "0.509", "1"]), eps));
    }

    #[test]
    fn test_parametrization_two_free_variables() {
        let system = LinearSystem::new(vec![
            p(&["0.935", "1.76", "-9.365"], "-9.955"),
            p(&["0.187", "0.352", "-1.873"], "-1.991"),
            p(&["0.374", "0.704", "-3.746"], "-3.982"),
            p(&["-0.561", "-1.056", "5.619"], "5.973"),
        ])
        .unwrap();

        let solution = system.compute_solution().unwrap();
        let parametrization = solution.as_parametrization().unwrap();
        let eps = Scalar::new(1, 3);
        assert_eq!(parametrization.free_variable_count(), 2);
        assert!(parametrization
            .basepoint()
            .approx_eq_within(&v(&["-10.647", "0", "0"]), eps));
        assert!(parametrization.direction_vectors()[0]
            .approx_eq_within(&v(&["-1.882", "1", "0"]), eps));
        assert!(parametrization.direction_vectors()[1]
            .approx_eq_within(&v(&["10.016", "0", "1"]), eps));
    }

    #[test]
    fn test_contradiction_beats_pivot_shortage() {
        // Rank 1, three variables, and a contradiction
        let system = LinearSystem::new(vec![
            p(&["1", "2", "3"], "1"),
            p(&["2", "4", "6"], "5"),
        ])
        .unwrap();
        assert_eq!(system.compute_solution().unwrap(), Solution::NoSolutions);
    }

    #[test]
    fn test_pivot_in_first_column_counts() {
        let system = LinearSystem::new(vec![
            p(&["3", "0"], "6"),
            p(&["0", "2"], "8"),
        ])
        .unwrap();
        let solution = system.compute_solution().unwrap();
        assert!(solution.as_unique().unwrap().approx_eq(&v(&["2", "4"])));
    }

    #[test]
    fn test_all_zero_system() {
        let system = LinearSystem::new(vec![Hyperplane::zero(2).unwrap()]).unwrap();
        let solution = system.compute_solution().unwrap();
        let parametrization = solution.as_parametrization().unwrap();
        assert_eq!(parametrization.basepoint(), &Vector::zero(2).unwrap());
        assert_eq!(
            parametrization.direction_vectors(),
            &[v(&["1", "0"]), v(&["0", "1"])]
        );
    }

    #[test]
    fn test_solution_does_not_modify_system() {
        let system = LinearSystem::new(vec![
            Line::new(v(&["1", "1"]), 3),
            Line::new(v(&["1", "-1"]), 1),
        ])
        .unwrap();
        let before = system.clone();
        system.compute_solution().unwrap();
        assert_eq!(system[0].normal_vector(), before[0].normal_vector());
        assert_eq!(system[1].normal_vector(), before[1].normal_vector());
    }

    fn integer_system(entries: Vec<i64>, equations: usize, dimension: usize) -> LinearSystem {
        let planes = entries
            .chunks(dimension + 1)
            .take(equations)
            .map(|row| {
                Plane::new(
                    Vector::new(row[..dimension].iter().copied()).unwrap(),
                    row[dimension],
                )
            })
            .collect();
        LinearSystem::new(planes).unwrap()
    }

    proptest! {
        #[test]
        fn prop_solutions_satisfy_every_equation(entries in prop::collection::vec(-10i64..=10, 12)) {
            let system = integer_system(entries, 3, 3);
            match system.compute_solution().unwrap() {
                Solution::Unique(point) => {
                    for plane in system.planes() {
                        prop_assert!(plane.is_satisfied_by(&point).unwrap());
                    }
                },
                Solution::Infinite(parametrization) => {
                    let parameters: Vec<Scalar> = (0..parametrization.free_variable_count())
                        .map(|i| Scalar::from(i as i64 * 3 - 2))
                        .collect();
                    let point = parametrization.point_at(&parameters).unwrap();
                    for plane in system.planes() {
                        prop_assert!(plane.is_satisfied_by(&point).unwrap());
                    }
                },
                Solution::NoSolutions => {},
            }
        }

        #[test]
        fn prop_rref_is_idempotent(entries in prop::collection::vec(-10i64..=10, 12)) {
            let system = integer_system(entries, 3, 3);
            let once = system.compute_rref().unwrap();
            let twice = once.compute_rref().unwrap();
            prop_assert!(once.approx_eq(&twice));
        }

        #[test]
        fn prop_row_order_does_not_change_status(entries in prop::collection::vec(-10i64..=10, 12)) {
            let system = integer_system(entries, 3, 3);
            let mut reversed = system.clone();
            reversed.swap_rows(0, 2).unwrap();
            prop_assert_eq!(
                system.compute_solution_status().unwrap(),
                reversed.compute_solution_status().unwrap()
            );
        }
    }
}
