// ============================================================================
// Linear Systems Library
// Vectors, hyperplanes and exact-decimal Gaussian elimination
// ============================================================================

//! # linsys
//!
//! Small linear-algebra toolkit built on high-precision decimals.
//!
//! ## Features
//!
//! - **Vectors** of any dimension with dot/cross products, angles and projections
//! - **Lines, planes and hyperplanes** with parallel/coincident tests and 2D intersection
//! - **Gaussian elimination** to triangular form and RREF without touching the input
//! - **Solution classification**: unique point, parametrized family, or no solution
//! - **Row operation observers** for step-by-step tracing of the elimination
//!
//! ## Example
//!
//! ```rust
//! use linsys::prelude::*;
//!
//! // x + y = 3, x - y = 1
//! let system = LinearSystem::new(vec![
//!     Line::new(Vector::new([1, 1]).unwrap(), 3),
//!     Line::new(Vector::new([1, -1]).unwrap(), 1),
//! ])
//! .unwrap();
//!
//! match system.compute_solution().unwrap() {
//!     Solution::Unique(point) => println!("Solution: {}", point),
//!     Solution::Infinite(parametrization) => println!("{}", parametrization),
//!     Solution::NoSolutions => println!("No solutions"),
//! }
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        AngleUnit, Hyperplane, LinalgError, LinalgResult, Line, LineIntersection,
        Parametrization, Plane, SolverConfig, Vector,
    };
    pub use crate::engine::{
        create_from_config, LinearSystem, LinearSystemBuilder, Solution, SolutionStatus,
    };
    pub use crate::interfaces::{
        LoggingObserver, NoOpObserver, RowOperation, RowOperationLog, RowOperationObserver,
    };
    pub use crate::numeric::Scalar;
}
