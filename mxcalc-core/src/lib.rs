//! mxcalc-core - Core types for the matrix calculator engine
//!
//! Provides the three types everything else is built on:
//! - `Matrix`: a rectangular array of f64 with validated shape
//! - `Value`: the tagged union the evaluator computes over
//!   (scalar, matrix, or an L/U factor pair)
//! - `CalcError`: structured, recoverable errors with machine-readable codes
//!
//! Errors never crash the engine. They are values that propagate through
//! computations up to the evaluation boundary.

mod error;
mod matrix;
mod value;

pub use error::{codes, CalcError};
pub use matrix::{LuFactors, Matrix};
pub use value::Value;

/// Engine-wide floating tolerance.
///
/// Used for row-echelon noise snapping, rank counting, and trigonometric
/// pole detection. Applied identically everywhere so that REF and rank
/// agree on what counts as zero.
pub const EPSILON: f64 = 1e-9;
