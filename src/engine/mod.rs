// ============================================================================
// Engine Module
// Contains the linear system and Gaussian elimination logic
// ============================================================================

mod elimination;
mod linear_system;
mod solution;

pub mod factory;

pub use factory::{create_from_config, LinearSystemBuilder};
pub use linear_system::LinearSystem;
pub use solution::{Solution, SolutionStatus};
