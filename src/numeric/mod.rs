// ============================================================================
// Numeric Module
// High-precision decimal scalars for row reduction
// ============================================================================
//
// This module provides:
// - Scalar: decimal value type with a near-zero tolerance predicate
// - NumericError: Error types for arithmetic operations
//
// Design principles:
// - No binary floating-point in elimination
// - All arithmetic returns Result (no panics)
// - Zero tests are tolerance based (1e-10 unless configured otherwise)

mod errors;
mod scalar;

pub use errors::{NumericError, NumericResult};
pub use scalar::Scalar;
