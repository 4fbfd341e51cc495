// ============================================================================
// Linear System Factory
// Creates linear systems with validated configuration
// ============================================================================

use crate::domain::{Hyperplane, LinalgResult, SolverConfig, Vector};
use crate::engine::LinearSystem;
use crate::interfaces::{NoOpObserver, RowOperationObserver};
use crate::numeric::Scalar;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a linear system from configuration
///
/// # Arguments
/// * `planes` - One equation per row, all of the same dimension
/// * `config` - Tolerance and display settings
/// * `observer` - Receives every row operation
///
/// # Example
/// ```
/// use linsys::prelude::*;
/// use linsys::engine::factory::create_from_config;
/// use std::sync::Arc;
///
/// let planes = vec![
///     Hyperplane::new(Vector::new([1, 1]).unwrap(), 3),
///     Hyperplane::new(Vector::new([1, -1]).unwrap(), 1),
/// ];
/// let system = create_from_config(planes, SolverConfig::default(), Arc::new(NoOpObserver)).unwrap();
/// assert_eq!(system.len(), 2);
/// ```
pub fn create_from_config(
    planes: Vec<Hyperplane>,
    config: SolverConfig,
    observer: Arc<dyn RowOperationObserver>,
) -> LinalgResult<LinearSystem> {
    tracing::debug!(
        equations = planes.len(),
        tolerance = %config.tolerance,
        "Creating linear system"
    );

    Ok(LinearSystem::with_config(planes, config)?.with_observer(observer))
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for assembling a linear system one equation at a time
///
/// # Example
/// ```
/// use linsys::prelude::*;
///
/// let solution = LinearSystemBuilder::new()
///     .equation(Vector::new([1, 1]).unwrap(), 3)
///     .equation(Vector::new([1, -1]).unwrap(), 1)
///     .build()
///     .unwrap()
///     .compute_solution()
///     .unwrap();
///
/// assert_eq!(solution.status(), SolutionStatus::Unique);
/// ```
pub struct LinearSystemBuilder {
    planes: Vec<Hyperplane>,
    config: SolverConfig,
    observer: Arc<dyn RowOperationObserver>,
}

impl Default for LinearSystemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearSystemBuilder {
    pub fn new() -> Self {
        Self {
            planes: Vec::new(),
            config: SolverConfig::default(),
            observer: Arc::new(NoOpObserver),
        }
    }

    // ========================================================================
    // Equations
    // ========================================================================

    /// Append the equation `normal · x = constant`
    pub fn equation(mut self, normal_vector: Vector, constant_term: impl Into<Scalar>) -> Self {
        self.planes.push(Hyperplane::new(normal_vector, constant_term));
        self
    }

    pub fn hyperplane(mut self, hyperplane: Hyperplane) -> Self {
        self.planes.push(hyperplane);
        self
    }

    pub fn hyperplanes(mut self, hyperplanes: impl IntoIterator<Item = Hyperplane>) -> Self {
        self.planes.extend(hyperplanes);
        self
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the near-zero threshold used by elimination and classification
    pub fn with_tolerance(mut self, tolerance: Scalar) -> Self {
        self.config = self.config.with_tolerance(tolerance);
        self
    }

    pub fn with_display_precision(mut self, places: u32) -> Self {
        self.config = self.config.with_display_precision(places);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn RowOperationObserver>) -> Self {
        self.observer = observer;
        self
    }

    // ========================================================================
    // Presets
    // ========================================================================

    /// Start with [`SolverConfig::strict`]
    pub fn strict() -> Self {
        Self::new().with_config(SolverConfig::strict())
    }

    /// Start with [`SolverConfig::relaxed`]
    pub fn relaxed() -> Self {
        Self::new().with_config(SolverConfig::relaxed())
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the linear system
    ///
    /// # Errors
    /// `InvalidConfig`, `EmptySystem` or `DimensionMismatch`
    pub fn build(self) -> LinalgResult<LinearSystem> {
        create_from_config(self.planes, self.config, self.observer)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &SolverConfig {
        &self.config
    }
}
