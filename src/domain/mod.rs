// ============================================================================
// Domain Models Module
// Value objects consumed and produced by the elimination engine
// ============================================================================

pub mod config;
pub mod errors;
pub mod hyperplane;
pub mod parametrization;
pub mod vector;

pub use config::SolverConfig;
pub use errors::{LinalgError, LinalgResult};
pub use hyperplane::{Hyperplane, Line, LineIntersection, Plane};
pub use parametrization::Parametrization;
pub use vector::{AngleUnit, Vector};
