// ============================================================================
// Solver Configuration
// Tolerance and rendering settings for elimination
// ============================================================================

use super::errors::{LinalgError, LinalgResult};
use super::hyperplane::DEFAULT_DISPLAY_PRECISION;
use crate::numeric::Scalar;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest number of fractional digits a 96-bit decimal can carry
const MAX_DECIMAL_PLACES: u32 = 28;

/// Settings shared by every row operation of a [`LinearSystem`](crate::engine::LinearSystem)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Coefficients with magnitude below this are treated as zero when
    /// choosing pivots and classifying solutions
    pub tolerance: Scalar,

    /// Decimal places used when printing equations of the system
    pub display_precision: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: Scalar::TOLERANCE,
            display_precision: DEFAULT_DISPLAY_PRECISION,
        }
    }
}

impl SolverConfig {
    /// Builder method: Set zero tolerance
    pub fn with_tolerance(mut self, tolerance: Scalar) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder method: Set display precision
    pub fn with_display_precision(mut self, places: u32) -> Self {
        self.display_precision = places;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> LinalgResult<()> {
        if self.tolerance <= Scalar::ZERO {
            return Err(LinalgError::InvalidConfig(
                "tolerance must be positive".to_string(),
            ));
        }

        if self.tolerance >= Scalar::ONE {
            return Err(LinalgError::InvalidConfig(
                "tolerance must be below one".to_string(),
            ));
        }

        if self.display_precision > MAX_DECIMAL_PLACES {
            return Err(LinalgError::InvalidConfig(format!(
                "display precision cannot exceed {} places",
                MAX_DECIMAL_PLACES
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl SolverConfig {
    /// Tight tolerance (1e-20) for exactly representable inputs
    pub fn strict() -> Self {
        Self::default().with_tolerance(Scalar::new(1, 20))
    }

    /// Loose tolerance (1e-6) for coefficients measured with noise
    pub fn relaxed() -> Self {
        Self::default().with_tolerance(Scalar::new(1, 6))
    }
}
