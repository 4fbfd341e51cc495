// ============================================================================
// Gaussian Elimination
// Forward elimination to triangular form, back-substitution to RREF
// ============================================================================

use super::linear_system::LinearSystem;
use crate::domain::{LinalgError, LinalgResult};
use crate::numeric::{NumericError, Scalar};

impl LinearSystem {
    /// Forward elimination on a copy of the system.
    ///
    /// Walks the rows top to bottom with a column pointer. A row whose
    /// coefficient in the current column is near zero is swapped with the
    /// first lower row that has a usable one; if there is none the column is
    /// skipped for this row. Once a pivot is in place every lower row is
    /// cleared in that column. Each row's pivot column ends up strictly
    /// greater than the previous row's, and all-zero rows sink to the bottom.
    pub fn compute_triangular_form(&self) -> LinalgResult<LinearSystem> {
        let mut system = self.clone();
        let tolerance = system.tolerance();
        let mut col = 0;

        for row in 0..system.len() {
            while col < system.dimension() {
                if system[row].normal_vector()[col].is_near_zero_within(tolerance) {
                    match system.find_row_with_nonzero_coefficient_below(row, col) {
                        Some(other) => system.swap_rows(row, other)?,
                        None => {
                            tracing::trace!(row, col, "no pivot in column, skipping");
                            col += 1;
                            continue;
                        },
                    }
                }
                tracing::trace!(row, col, "pivot selected");
                system.clear_coefficients_below(row, col)?;
                col += 1;
                break;
            }
        }

        Ok(system)
    }

    /// Reduced row-echelon form of a copy of the system.
    ///
    /// Starts from [`compute_triangular_form`](Self::compute_triangular_form)
    /// and walks the rows bottom to top, scaling each pivot to one and
    /// clearing its column in every row above.
    pub fn compute_rref(&self) -> LinalgResult<LinearSystem> {
        let mut system = self.compute_triangular_form()?;
        let pivots = system.indices_of_first_nonzero_terms_in_each_row();

        for row in (0..system.len()).rev() {
            if let Some(col) = pivots[row] {
                system.scale_row_to_make_coefficient_equal_one(row, col)?;
                system.clear_coefficients_above(row, col)?;
            }
        }

        Ok(system)
    }

    /// Multiply `row` by the reciprocal of its coefficient in `col`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if that coefficient is near zero.
    pub fn scale_row_to_make_coefficient_equal_one(
        &mut self,
        row: usize,
        col: usize,
    ) -> LinalgResult<()> {
        let coefficient = self.coefficient(row, col)?;
        if coefficient.is_near_zero_within(self.tolerance()) {
            return Err(NumericError::DivisionByZero.into());
        }
        self.multiply_coefficient_and_row(Scalar::ONE.checked_div(coefficient)?, row)
    }

    /// Eliminate column `col` from every row below `row`.
    pub fn clear_coefficients_below(&mut self, row: usize, col: usize) -> LinalgResult<()> {
        let pivot = self.coefficient(row, col)?;
        for below in row + 1..self.len() {
            let coefficient = self.coefficient(below, col)?;
            if coefficient.is_near_zero_within(self.tolerance()) {
                continue;
            }
            let multiple = -coefficient.checked_div(pivot)?;
            self.add_multiple_times_row_to_row(multiple, row, below)?;
        }
        Ok(())
    }

    /// Eliminate column `col` from every row above `row`. The pivot at
    /// (`row`, `col`) must already be one.
    pub fn clear_coefficients_above(&mut self, row: usize, col: usize) -> LinalgResult<()> {
        for above in (0..row).rev() {
            let coefficient = self.coefficient(above, col)?;
            if coefficient.is_near_zero_within(self.tolerance()) {
                continue;
            }
            self.add_multiple_times_row_to_row(-coefficient, row, above)?;
        }
        Ok(())
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    fn coefficient(&self, row: usize, col: usize) -> LinalgResult<Scalar> {
        let plane = self.get(row).ok_or(LinalgError::RowOutOfBounds {
            row,
            rows: self.len(),
        })?;
        plane
            .normal_vector()
            .get(col)
            .ok_or(LinalgError::DimensionMismatch {
                expected: self.dimension(),
                actual: col + 1,
            })
    }

    fn find_row_with_nonzero_coefficient_below(&self, row: usize, col: usize) -> Option<usize> {
        let tolerance = self.tolerance();
        (row + 1..self.len())
            .find(|&below| !self[below].normal_vector()[col].is_near_zero_within(tolerance))
    }
}
